use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// A data-format problem found while reading one entry.
///
/// These never stop the stream: the parser resynchronizes at the next
/// entry or field boundary and reports the entry as skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LexingError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("expected '{{' or '\"' to start field data, found '{0}'")]
    InvalidValueStart(char),
    #[error("field data is not terminated before end of input")]
    UnterminatedValue,
    #[error("expected '{expected}', found '{found}'")]
    MissingDelimiter { expected: char, found: char },
}

/// An error after which no further entries can be read.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("failed to allocate memory for token buffer: {0}")]
    AllocationFailure(#[from] TryReserveError),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

// Result type of the delimited reader: the record parser recovers from
// the first kind and passes the second one on.
#[derive(Debug, Error)]
pub(crate) enum ReadError {
    #[error(transparent)]
    Lexing(#[from] LexingError),
    #[error(transparent)]
    Fatal(#[from] FatalError),
}
