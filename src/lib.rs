//! bankcore - Money-Transfer Transaction Engine
//!
//! The core of a banking backend: moving funds between two accounts while
//! preserving ledger correctness under concurrent, conflicting requests.
//! The enclosing HTTP layer hands this crate validated transfer requests
//! and turns its results into responses.
//!
//! # Modules
//!
//! - [`ledger`] - Record types, repositories, and the transfer engine
//! - [`db`] - PostgreSQL connection pool management
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use ledger::{
    Account, Entry, LedgerError, LedgerStore, OverdraftPolicy, Transfer, TransferParams,
    TransferResult,
};
