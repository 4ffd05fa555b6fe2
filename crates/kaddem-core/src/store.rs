//! The `ContratStore` and `EtudiantStore` traits.
//!
//! The traits are implemented by storage backends (e.g. `kaddem-store-sqlite`)
//! and by in-memory fakes in tests. [`ContratService`](crate::service::ContratService)
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  contrat::{Contrat, ContratId},
  etudiant::Etudiant,
};

// ─── Contrats ────────────────────────────────────────────────────────────────

/// Persistence for [`Contrat`] records.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes. Locking and transactions are the backend's business.
pub trait ContratStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored contract.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Contrat>, Self::Error>> + Send + '_;

  /// Insert or update `contrat` and return the persisted value.
  ///
  /// A contract with `id_contrat == None` is inserted and receives a fresh id.
  /// A contract with an id is upserted under that id; the id never changes.
  /// The student link in `contrat.etudiant` is persisted as well.
  fn save(
    &self,
    contrat: Contrat,
  ) -> impl Future<Output = Result<Contrat, Self::Error>> + Send + '_;

  /// Retrieve a contract by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: ContratId,
  ) -> impl Future<Output = Result<Option<Contrat>, Self::Error>> + Send + '_;

  /// Remove the given (previously fetched) contract.
  fn delete(
    &self,
    contrat: Contrat,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Lookup used by the student assignment path. Backends that keep a
  /// separate query for it override this; the default is [`find_by_id`].
  ///
  /// [`find_by_id`]: ContratStore::find_by_id
  fn find_by_id_contrat(
    &self,
    id: ContratId,
  ) -> impl Future<Output = Result<Option<Contrat>, Self::Error>> + Send + '_ {
    self.find_by_id(id)
  }
}

// ─── Etudiants ───────────────────────────────────────────────────────────────

/// Read-only access to [`Etudiant`] records.
pub trait EtudiantStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Exact match on `(nom_e, prenom_e)`. When several students share the
  /// pair, the one with the lowest id is returned.
  fn find_by_nom_e_and_prenom_e<'a>(
    &'a self,
    nom: &'a str,
    prenom: &'a str,
  ) -> impl Future<Output = Result<Option<Etudiant>, Self::Error>> + Send + 'a;
}
