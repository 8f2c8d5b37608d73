//! PostgreSQL schema for the ledger tables

use anyhow::Result;
use sqlx::PgPool;

// No foreign keys on entries_tb/transfers_tb: a leg referencing a missing
// account fails at the balance mutation (AccountNotFound) and the whole
// transaction rolls back.

pub const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts_tb (
    account_id  BIGSERIAL PRIMARY KEY,
    owner       TEXT NOT NULL,
    balance     BIGINT NOT NULL DEFAULT 0,
    currency    VARCHAR(8) NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries_tb (
    entry_id    BIGSERIAL PRIMARY KEY,
    account_id  BIGINT NOT NULL,
    amount      BIGINT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transfers_tb (
    transfer_id      BIGSERIAL PRIMARY KEY,
    from_account_id  BIGINT NOT NULL,
    to_account_id    BIGINT NOT NULL,
    amount           BIGINT NOT NULL,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS entries_account_id_idx ON entries_tb (account_id)",
    "CREATE INDEX IF NOT EXISTS transfers_from_account_id_idx ON transfers_tb (from_account_id)",
    "CREATE INDEX IF NOT EXISTS transfers_to_account_id_idx ON transfers_tb (to_account_id)",
];

/// Create the ledger tables and indexes if they do not exist
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing ledger schema...");

    for stmt in [
        CREATE_ACCOUNTS_TABLE,
        CREATE_ENTRIES_TABLE,
        CREATE_TRANSFERS_TABLE,
    ] {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create ledger table: {}", e))?;
    }

    for stmt in CREATE_INDEXES {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create ledger index: {}", e))?;
    }

    tracing::info!("Ledger schema ready");
    Ok(())
}
