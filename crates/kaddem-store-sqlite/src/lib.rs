//! SQLite backend for the Kaddem contract store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. One [`SqliteStore`] implements both
//! [`ContratStore`](kaddem_core::store::ContratStore) and
//! [`EtudiantStore`](kaddem_core::store::EtudiantStore).

mod encode;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
