use std::{fmt, path::Path};

use crate::parsing::ParsingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

impl<'i> std::error::Error for LoadingError<'i> {}

/// Failure scanning a document pulled from a reader: either the stream
/// itself failed, or the text it produced didn't scan.
#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}
