//! Ledger error types

use thiserror::Error;

/// Errors surfaced by the transfer engine
///
/// Validation errors never reach storage. Every storage-layer failure
/// aborts the whole transaction; nothing is partially recovered inside
/// the engine.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    // === Validation errors ===
    #[error("Source and destination account cannot be the same")]
    SameAccount,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    // === Account errors ===
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Insufficient balance on account {0}")]
    InsufficientBalance(i64),

    // === Storage errors ===
    #[error("Serialization conflict: {0}")]
    TransientConflict(String),

    #[error("Database error: {0}")]
    Storage(String),

    #[error("Transaction failed: {cause}; rollback also failed: {rollback}")]
    RollbackFailed {
        cause: Box<LedgerError>,
        rollback: String,
    },
}

impl LedgerError {
    /// Stable error code for callers that map failures onto a wire format
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::SameAccount => "SAME_ACCOUNT",
            LedgerError::InvalidAmount => "INVALID_AMOUNT",
            LedgerError::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            LedgerError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            LedgerError::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            LedgerError::TransientConflict(_) => "TRANSIENT_CONFLICT",
            LedgerError::Storage(_) => "STORAGE_ERROR",
            LedgerError::RollbackFailed { .. } => "ROLLBACK_FAILED",
        }
    }

    /// Whether a caller may retry the operation
    ///
    /// Only transient serialization conflicts are retryable: the failed
    /// attempt committed nothing. Every other class is terminal for the
    /// request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::TransientConflict(_))
    }
}

// PostgreSQL reports serialization failures as SQLSTATE 40001 and
// deadlocks as 40P01; both are the retryable class.
impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if let Some(code) = db.code() {
                if code == "40001" || code == "40P01" {
                    return LedgerError::TransientConflict(db.message().to_string());
                }
            }
        }
        LedgerError::Storage(e.to_string())
    }
}
