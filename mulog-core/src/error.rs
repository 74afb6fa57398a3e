use thiserror::Error;

use crate::sink::LoggerType;

pub type Result<T> = std::result::Result<T, Error>;

/// Flat status code of an [`Error`], for callers comparing codes rather than values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The operation is not supported by the logger's variant.
    TypeMismatch,
    /// A value was out of the accepted range.
    InvalidArgument,
    /// The underlying destination failed.
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{operation}` is not supported by {found} loggers")]
    TypeMismatch {
        operation: &'static str,
        found: LoggerType,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn type_mismatch(operation: &'static str, found: LoggerType) -> Self {
        Error::TypeMismatch { operation, found }
    }

    pub fn status(&self) -> Status {
        match self {
            Error::TypeMismatch { .. } => Status::TypeMismatch,
            Error::InvalidArgument(_) => Status::InvalidArgument,
            Error::Io(_) => Status::Io,
        }
    }
}

#[test]
fn test_error_display() {
    let err = Error::type_mismatch("set_with_color", LoggerType::File);
    assert_eq!(err.status(), Status::TypeMismatch);
    assert_eq!(
        err.to_string(),
        "`set_with_color` is not supported by file loggers"
    );
    let err: Error = std::io::Error::other("disk full").into();
    assert_eq!(err.status(), Status::Io);
    assert_eq!(err.to_string(), "disk full");
}
