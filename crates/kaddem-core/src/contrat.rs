//! Contrat — a student contract with a validity period and a specialty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::etudiant::Etudiant;

pub type ContratId = i64;

// ─── Specialite ──────────────────────────────────────────────────────────────

/// The closed set of contract specialties.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialite {
  Ia,
  Reseaux,
  Cloud,
  Securite,
}

impl Specialite {
  /// Monthly amount billed for a contract of this specialty.
  pub fn monthly_rate(self) -> f64 {
    match self {
      Specialite::Ia => 300.0,
      Specialite::Reseaux => 350.0,
      Specialite::Cloud => 400.0,
      Specialite::Securite => 450.0,
    }
  }
}

// ─── Contrat ─────────────────────────────────────────────────────────────────

/// A contract. `id_contrat` is `None` until the store first persists it and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contrat {
  pub id_contrat:         Option<ContratId>,
  pub date_debut_contrat: NaiveDate,
  pub date_fin_contrat:   NaiveDate,
  pub specialite:         Specialite,
  #[serde(default)]
  pub archive:            bool,
  pub montant_contrat:    Option<i64>,
  pub etudiant:           Option<Etudiant>,
}

impl Contrat {
  /// An unsaved, non-archived contract with no student.
  pub fn new(
    date_debut_contrat: NaiveDate,
    date_fin_contrat: NaiveDate,
    specialite: Specialite,
  ) -> Self {
    Self {
      id_contrat: None,
      date_debut_contrat,
      date_fin_contrat,
      specialite,
      archive: false,
      montant_contrat: None,
      etudiant: None,
    }
  }

  /// `true` if the contract is live and its period overlaps `[start, end]`.
  pub fn is_valid_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
    !self.archive
      && self.date_debut_contrat <= end
      && self.date_fin_contrat >= start
  }

  /// `true` once `today` is past the last day of the contract.
  pub fn is_expired(&self, today: NaiveDate) -> bool {
    self.date_fin_contrat < today
  }

  /// Days left until the contract ends, counted from `today`.
  pub fn days_remaining(&self, today: NaiveDate) -> i64 {
    (self.date_fin_contrat - today).num_days()
  }
}
