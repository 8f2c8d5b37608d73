//! Data models for the ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::error::LedgerError;

/// A customer account holding a balance in minor currency units
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub account_id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// One immutable ledger line (negative amount = debit, positive = credit)
///
/// Entries are created in pairs per transfer, summing to zero. They are
/// never updated or deleted once committed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub entry_id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// An immutable record of one committed transfer between two accounts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transfer {
    pub transfer_id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Input parameters of one transfer operation
#[derive(Debug, Clone, Copy)]
pub struct TransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferParams {
    /// Caller-input checks, run before any storage is touched
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if self.from_account_id == self.to_account_id {
            return Err(LedgerError::SameAccount);
        }
        Ok(())
    }
}

/// Everything produced by one committed transfer: the transfer record,
/// both entry legs, and both post-mutation account snapshots.
///
/// Lives only for the duration of the calling request; not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_amount() {
        let params = TransferParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: 0,
        };
        assert!(matches!(params.validate(), Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let params = TransferParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: -10,
        };
        assert!(matches!(params.validate(), Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn test_validate_rejects_same_account() {
        let params = TransferParams {
            from_account_id: 7,
            to_account_id: 7,
            amount: 10,
        };
        assert!(matches!(params.validate(), Err(LedgerError::SameAccount)));
    }

    #[test]
    fn test_validate_accepts_valid_params() {
        let params = TransferParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: 10,
        };
        assert!(params.validate().is_ok());
    }
}
