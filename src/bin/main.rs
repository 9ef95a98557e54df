use lox_scanner::lox::Lox;
use std::{env, io};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => {
            let stdin = io::stdin();
            let result = Lox::new(io::stdout(), io::stderr()).run_prompt(stdin.lock());
            if let Err(e) = result {
                eprintln!("{}", e);
                std::process::exit(74);
            }
        },
        2 => match Lox::new(io::stdout(), io::stderr()).run_file(args[1].as_str()) {
            Ok(false) => {},
            Ok(true) => std::process::exit(65),
            Err(e) => {
                eprintln!("Could not read {}: {}", args[1], e);
                std::process::exit(74);
            },
        },
        _ => {
            println!("Usage: rlox [script]");
            std::process::exit(64);
        },
    }
}

/// Logs go to stderr, and only when `RUST_LOG` is set, so token output is
/// untouched by default.
fn init_tracing() {
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
