//! Error types for `kaddem-core`.

use thiserror::Error;

use crate::contrat::ContratId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contrat not found: {0}")]
  ContratNotFound(ContratId),

  #[error("etudiant not found: {nom} {prenom}")]
  EtudiantNotFound { nom: String, prenom: String },

  /// Any failure reported by a store backend, passed through untouched.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
