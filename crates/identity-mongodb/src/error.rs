use mongodb::error::{ErrorKind, WriteFailure};

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Failures surfaced by the user and role stores.
///
/// "Not found" is never an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The call is valid but the store state does not allow it, e.g. adding
    /// a user to a role that does not exist.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// The operation is not implemented by this store.
    #[error("operation not supported: {0}")]
    NotSupported(&'static str),
    /// The server rejected a write because of a unique index.
    #[error("duplicate key")]
    DuplicateKey(#[source] mongodb::error::Error),
    /// Any other driver or transport failure, passed through unchanged.
    #[error("database error")]
    Database(#[source] mongodb::error::Error),
    /// The caller's cancellation token fired before the operation finished.
    #[error("operation cancelled")]
    Cancelled,
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOperation(_) => "INVALID_OPERATION",
            Self::NotSupported(_) => "NOT_SUPPORTED",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::Database(_) => "DATABASE",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            Self::DuplicateKey(err)
        } else {
            Self::Database(err)
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
