pub mod error;
pub mod lox;
pub mod scanner;
pub mod token;

pub use crate::error::{Error, ErrorKind, Result};
