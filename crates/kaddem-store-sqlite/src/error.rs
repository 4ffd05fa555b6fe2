//! Error type for `kaddem-store-sqlite`.

use kaddem_core::contrat::ContratId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("config error: {0}")]
  Config(#[from] ::config::ConfigError),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("unknown specialite: {0:?}")]
  UnknownSpecialite(String),

  #[error("malformed contrat id list: {0:?}")]
  IdList(String),

  /// Attempted to delete a contract that is not in the store.
  #[error("contrat not found: {0}")]
  ContratNotFound(ContratId),

  /// A contract without an id cannot be deleted.
  #[error("contrat has no id")]
  MissingId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
