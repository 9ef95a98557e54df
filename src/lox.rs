use crate::scanner::Scanner;
use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};
use tracing::debug;

/// A scanning session: prints tokens to `out` and diagnostics to `err_out`.
pub struct Lox<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
}

impl <Out: Write, ErrOut: Write> Lox<Out, ErrOut> {
    pub fn new(out: Out, err_out: ErrOut) -> Self {
        Self { out, err_out }
    }

    /// Scans one source text and prints the result. Returns whether any
    /// lexical error was reported for this source.
    pub fn run(&mut self, source: &str) -> io::Result<bool> {
        let (tokens, errors) = Scanner::new(source).scan();

        for e in errors.iter() {
            self.report(e.line(), e.location(), e.message())?;
        }

        for token in tokens.iter() {
            writeln!(self.out, "{}", token)?;
        }

        Ok(!errors.is_empty())
    }

    pub fn report(&mut self, line: usize, location: &str, message: &str) -> io::Result<()> {
        writeln!(self.err_out, "[line {}] Error{}: {}", line, location, message)
    }

    pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<bool> {
        let contents = fs::read_to_string(path)?;
        self.run(contents.as_str())
    }

    /// Reads and scans `input` one line at a time until it is exhausted.
    /// Errors on one line, including a line that is not UTF-8, do not
    /// carry over to the next.
    pub fn run_prompt<In: BufRead>(&mut self, mut input: In) -> io::Result<()> {
        let mut buffer = Vec::new();

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            buffer.clear();

            let num_bytes = input.read_until(b'\n', &mut buffer)?;
            if num_bytes == 0 { break };

            match std::str::from_utf8(&buffer) {
                Ok(line) => { self.run(line)?; },
                Err(e) => {
                    debug!(error = %e, "skipping non UTF-8 line");
                    self.report(1, "", "Input is not valid UTF-8.")?;
                },
            }
        }

        Ok(())
    }
}
