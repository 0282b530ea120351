use thiserror::Error;

/// Machine-checkable classification of an engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfiguration,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindingError {
    /// A hard precondition on (Z, 2p, m, pitch) failed. Nothing was generated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl WindingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WindingError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
        }
    }

    /// The bare message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            WindingError::InvalidConfiguration(msg) => msg,
        }
    }
}

/// Recover the typed kind from a report, if it wraps a `WindingError`.
pub fn kind_of(err: &Report) -> Option<ErrorKind> {
    err.downcast_ref::<WindingError>().map(WindingError::kind)
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
