use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving, reading, parsing, or reading back variables.
///
/// Messages never include raw line contents or values, which may be secrets.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error reading input: {0}")]
    Read(#[source] std::io::Error),

    #[error("environment file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("unable to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid UTF-8 input: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("value of {key} is not an integer: {source}")]
    InvalidInteger {
        key: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line}, column {column}: {kind}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: u32, column: u32, kind: ParseErrorKind) -> Self {
        Self { line, column, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No `=` separator on a non-comment, non-blank line.
    InvalidSyntax,
    /// Nothing before the `=` separator.
    MissingKey,
    /// A NUL byte, which the process environment cannot store.
    NulByte,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax => write!(f, "invalid syntax"),
            Self::MissingKey => write!(f, "missing key"),
            Self::NulByte => write!(f, "unexpected NUL byte"),
        }
    }
}
