//! Aggregates every stage's error type into one the front-end can match
//! `std::process::exit(1)` on, mirroring `dandy-cli`'s own aggregate
//! `Error` enum over its library's per-stage error types.

use dfa_compiler::error::{DfaBuildError, XmlError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("usage: compile-dfa <input-path> <output-path>")]
    Usage,
    #[error("could not read {0}: {1}")]
    InputRead(PathBuf, std::io::Error),
    #[error("could not write {0}: {1}")]
    OutputWrite(PathBuf, std::io::Error),
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(PathBuf),
    #[error(transparent)]
    Xml(#[from] XmlError),
    #[error(transparent)]
    Build(#[from] DfaBuildError),
}
