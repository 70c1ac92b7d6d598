use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Element not initialized: {msg}")]
    Uninitialized { msg: String },
    /// A solve parameter failed to parse or is outside its domain.
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    /// Export was requested before any solve succeeded.
    #[error("No solution available for export")]
    NoData,
    #[error("Failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("Encountered non-finite state at sample {index} (t = {t})")]
    NonFinite { index: usize, t: f64 },
}

impl Error {
    pub(crate) fn uninitialized<T: Into<String>>(msg: T) -> Self {
        Error::Uninitialized { msg: msg.into() }
    }

    pub(crate) fn invalid<T: Into<String>>(field: &'static str, reason: T) -> Self {
        Error::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the input validation class.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}
