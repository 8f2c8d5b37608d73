//! Repository layer for ledger rows
//!
//! Pool-scoped reads take `&PgPool`. Writes that must join an open
//! transaction take the transaction's `&mut PgConnection` handle instead,
//! so they are only callable inside a unit of work.

use sqlx::{PgConnection, PgPool};

use super::currency;
use super::error::LedgerError;
use super::models::{Account, Entry, Transfer};

/// Account row operations
pub struct AccountRepository;

impl AccountRepository {
    /// Create an account with an opening balance
    pub async fn create(
        pool: &PgPool,
        owner: &str,
        currency_code: &str,
        balance: i64,
    ) -> Result<Account, LedgerError> {
        if !currency::is_supported(currency_code) {
            return Err(LedgerError::UnsupportedCurrency(currency_code.to_string()));
        }

        let account = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts_tb (owner, balance, currency)
               VALUES ($1, $2, $3)
               RETURNING account_id, owner, balance, currency, created_at"#,
        )
        .bind(owner)
        .bind(balance)
        .bind(currency_code)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Get an account by ID
    pub async fn get(pool: &PgPool, account_id: i64) -> Result<Option<Account>, LedgerError> {
        let account = sqlx::query_as::<_, Account>(
            r#"SELECT account_id, owner, balance, currency, created_at
               FROM accounts_tb WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// List accounts ordered by ID
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, LedgerError> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"SELECT account_id, owner, balance, currency, created_at
               FROM accounts_tb ORDER BY account_id LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(accounts)
    }

    /// Add a signed delta to an account balance and return the refreshed row
    ///
    /// The arithmetic runs server-side in a single statement. Reading the
    /// balance first and writing the sum back across two round trips loses
    /// updates under concurrent mutation of the same row; this must stay
    /// one atomic read-modify-write.
    pub async fn add_balance(
        conn: &mut PgConnection,
        account_id: i64,
        delta: i64,
    ) -> Result<Account, LedgerError> {
        let account = sqlx::query_as::<_, Account>(
            r#"UPDATE accounts_tb
               SET balance = balance + $2
               WHERE account_id = $1
               RETURNING account_id, owner, balance, currency, created_at"#,
        )
        .bind(account_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await?;

        account.ok_or(LedgerError::AccountNotFound(account_id))
    }
}

/// Entry row operations (append-only)
pub struct EntryRepository;

impl EntryRepository {
    /// Record one ledger line inside the current transaction
    pub async fn create(
        conn: &mut PgConnection,
        account_id: i64,
        amount: i64,
    ) -> Result<Entry, LedgerError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"INSERT INTO entries_tb (account_id, amount)
               VALUES ($1, $2)
               RETURNING entry_id, account_id, amount, created_at"#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(&mut *conn)
        .await?;

        Ok(entry)
    }

    /// Get an entry by ID
    pub async fn get(pool: &PgPool, entry_id: i64) -> Result<Option<Entry>, LedgerError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"SELECT entry_id, account_id, amount, created_at
               FROM entries_tb WHERE entry_id = $1"#,
        )
        .bind(entry_id)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// List the entries of one account, oldest first
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, LedgerError> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"SELECT entry_id, account_id, amount, created_at
               FROM entries_tb WHERE account_id = $1
               ORDER BY entry_id LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}

/// Transfer row operations (append-only)
pub struct TransferRepository;

impl TransferRepository {
    /// Record the transfer inside the current transaction
    pub async fn create(
        conn: &mut PgConnection,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<Transfer, LedgerError> {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"INSERT INTO transfers_tb (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING transfer_id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(&mut *conn)
        .await?;

        Ok(transfer)
    }

    /// Get a transfer by ID
    pub async fn get(pool: &PgPool, transfer_id: i64) -> Result<Option<Transfer>, LedgerError> {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"SELECT transfer_id, from_account_id, to_account_id, amount, created_at
               FROM transfers_tb WHERE transfer_id = $1"#,
        )
        .bind(transfer_id)
        .fetch_optional(pool)
        .await?;

        Ok(transfer)
    }

    /// List transfers between two accounts, oldest first
    pub async fn list_between(
        pool: &PgPool,
        from_account_id: i64,
        to_account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, LedgerError> {
        let transfers = sqlx::query_as::<_, Transfer>(
            r#"SELECT transfer_id, from_account_id, to_account_id, amount, created_at
               FROM transfers_tb
               WHERE from_account_id = $1 AND to_account_id = $2
               ORDER BY transfer_id LIMIT $3 OFFSET $4"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(transfers)
    }
}
