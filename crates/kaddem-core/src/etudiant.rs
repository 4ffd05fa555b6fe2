//! Etudiant — the student side of the contract association.
//!
//! Students are managed outside this crate; the service only ever reads them
//! by name and links contracts to them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::contrat::ContratId;

pub type EtudiantId = i64;

/// A student, identified in practice by its `(nom_e, prenom_e)` pair.
///
/// `contrats` is the inverse side of [`Contrat::etudiant`](crate::contrat::Contrat::etudiant)
/// and holds ids only, so the two types never nest into each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etudiant {
  pub id_etudiant: EtudiantId,
  pub nom_e:       String,
  pub prenom_e:    String,
  #[serde(default)]
  pub contrats:    BTreeSet<ContratId>,
}

impl Etudiant {
  pub fn new(
    id_etudiant: EtudiantId,
    nom_e: impl Into<String>,
    prenom_e: impl Into<String>,
  ) -> Self {
    Self {
      id_etudiant,
      nom_e: nom_e.into(),
      prenom_e: prenom_e.into(),
      contrats: BTreeSet::new(),
    }
  }
}
