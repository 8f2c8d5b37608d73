//! Double-entry transfer engine over PostgreSQL
//!
//! Balances are justified by an append-only set of entries: every committed
//! transfer is one transfer row plus a debit/credit entry pair summing to
//! zero, applied atomically with both balance mutations.

pub mod currency;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::LedgerError;
pub use models::{Account, Entry, Transfer, TransferParams, TransferResult};
pub use policy::OverdraftPolicy;
pub use repository::{AccountRepository, EntryRepository, TransferRepository};
pub use schema::init_schema;
pub use store::LedgerStore;
