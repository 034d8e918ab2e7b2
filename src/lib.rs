//! Book records on an ordered key/value ledger.
//!
//! Books are stored under composite keys(`bookname`, `location`, `library`)
//! so that a prefix of the key can be queried as a single range scan.

pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod invoke;
pub mod key;
pub mod ledger;
pub mod schema;
pub mod store;

pub use futures;
pub use tokio;
pub use tokio_stream;
pub use tonic;

pub use error::BookError;
pub use invoke::{Operation, Response};
pub use ledger::mem::MemLedger;
pub use ledger::Ledger;
pub use store::BookStore;
