//! Transactional ledger store
//!
//! [`LedgerStore`] owns the connection pool and is the only place a
//! transaction boundary is opened for a transfer. The transfer itself is
//! four writes in one unit of work: the transfer row, the two entry legs,
//! and the two balance mutations.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

use super::error::LedgerError;
use super::models::{Account, TransferParams, TransferResult};
use super::policy::OverdraftPolicy;
use super::repository::{AccountRepository, EntryRepository, TransferRepository};

/// Ledger store over a PostgreSQL pool
#[derive(Clone)]
pub struct LedgerStore {
    pool: PgPool,
    overdraft: OverdraftPolicy,
}

impl LedgerStore {
    /// Create a store with the default overdraft policy (permit)
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            overdraft: OverdraftPolicy::default(),
        }
    }

    /// Create a store with an explicit overdraft policy
    pub fn with_overdraft_policy(pool: PgPool, overdraft: OverdraftPolicy) -> Self {
        Self { pool, overdraft }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `work` inside one database transaction.
    ///
    /// Commits when `work` returns `Ok`; rolls back and propagates the
    /// original error otherwise. If the rollback itself fails, the caller
    /// gets [`LedgerError::RollbackFailed`] carrying both causes rather
    /// than losing the original one.
    ///
    /// Cancellation: dropping the returned future mid-flight drops the
    /// open transaction, which rolls it back. No exit path can leave a
    /// partial commit behind.
    pub async fn execute_tx<T, F>(&self, work: F) -> Result<T, LedgerError>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, LedgerError>>,
    {
        let mut tx = self.pool.begin().await?;
        match work(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(cause) => match tx.rollback().await {
                Ok(()) => Err(cause),
                Err(rb_err) => Err(LedgerError::RollbackFailed {
                    cause: Box::new(cause),
                    rollback: rb_err.to_string(),
                }),
            },
        }
    }

    /// Move `amount` minor units from one account to another.
    ///
    /// Inserts the transfer record and both entry legs, then mutates both
    /// balances, all in one transaction. Any failing step rolls the whole
    /// unit of work back; the engine never retries on its own.
    pub async fn transfer_tx(
        &self,
        params: TransferParams,
    ) -> Result<TransferResult, LedgerError> {
        params.validate()?;

        let TransferParams {
            from_account_id,
            to_account_id,
            amount,
        } = params;
        let overdraft = self.overdraft;

        let result = self
            .execute_tx(move |conn: &mut PgConnection| {
                Box::pin(async move {
                    let transfer = TransferRepository::create(
                        &mut *conn,
                        from_account_id,
                        to_account_id,
                        amount,
                    )
                    .await?;

                    let from_entry =
                        EntryRepository::create(&mut *conn, from_account_id, -amount).await?;
                    let to_entry =
                        EntryRepository::create(&mut *conn, to_account_id, amount).await?;

                    // Mutation order is fixed by ascending account ID, not by
                    // transfer direction. Two concurrent opposite-direction
                    // transfers between the same accounts would otherwise
                    // request the two row locks in reverse order of each
                    // other and deadlock.
                    let (from_account, to_account) = if from_account_id < to_account_id {
                        add_money(conn, from_account_id, -amount, to_account_id, amount).await?
                    } else {
                        let (to_account, from_account) =
                            add_money(conn, to_account_id, amount, from_account_id, -amount)
                                .await?;
                        (from_account, to_account)
                    };

                    overdraft.check(&from_account)?;

                    Ok(TransferResult {
                        transfer,
                        from_account,
                        to_account,
                        from_entry,
                        to_entry,
                    })
                })
            })
            .await?;

        tracing::debug!(
            transfer_id = result.transfer.transfer_id,
            from_account_id,
            to_account_id,
            amount,
            "transfer committed"
        );

        Ok(result)
    }
}

/// Apply two balance deltas in the order given by the caller
async fn add_money(
    conn: &mut PgConnection,
    first_account_id: i64,
    first_delta: i64,
    second_account_id: i64,
    second_delta: i64,
) -> Result<(Account, Account), LedgerError> {
    let first = AccountRepository::add_balance(&mut *conn, first_account_id, first_delta).await?;
    let second =
        AccountRepository::add_balance(&mut *conn, second_account_id, second_delta).await?;
    Ok((first, second))
}
