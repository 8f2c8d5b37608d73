//! Overdraft policy hook
//!
//! The ordering algorithm never inspects balances. Whether a debit may
//! drive an account negative is a policy decision, applied to the
//! post-mutation snapshot while the transaction is still open so a
//! rejection rolls everything back.

use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::models::Account;

/// What to do when a debit would leave the source account negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverdraftPolicy {
    /// No sufficiency check; balances may go negative
    #[default]
    Permit,
    /// Reject any transfer that would leave the source account negative
    Reject,
}

impl OverdraftPolicy {
    /// Apply the policy to the refreshed source-account snapshot
    pub fn check(&self, source: &Account) -> Result<(), LedgerError> {
        match self {
            OverdraftPolicy::Permit => Ok(()),
            OverdraftPolicy::Reject => {
                if source.balance < 0 {
                    Err(LedgerError::InsufficientBalance(source.account_id))
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account_with_balance(balance: i64) -> Account {
        Account {
            account_id: 1,
            owner: "alice".to_string(),
            balance,
            currency: "USD".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_permit_allows_negative_balance() {
        let account = account_with_balance(-50);
        assert!(OverdraftPolicy::Permit.check(&account).is_ok());
    }

    #[test]
    fn test_reject_blocks_negative_balance() {
        let account = account_with_balance(-1);
        assert!(matches!(
            OverdraftPolicy::Reject.check(&account),
            Err(LedgerError::InsufficientBalance(1))
        ));
    }

    #[test]
    fn test_reject_allows_zero_and_positive() {
        assert!(OverdraftPolicy::Reject.check(&account_with_balance(0)).is_ok());
        assert!(OverdraftPolicy::Reject.check(&account_with_balance(10)).is_ok());
    }
}
