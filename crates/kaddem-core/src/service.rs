//! [`ContratService`] — CRUD and student assignment for contracts.
//!
//! Every operation follows the same shape: fetch (or fail with a not-found
//! error), mutate in memory, hand the result back to the store. Store errors
//! are wrapped in [`Error::Store`] and returned as-is; nothing is retried.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  Error, Result,
  contrat::{Contrat, ContratId},
  store::{ContratStore, EtudiantStore},
};

/// Contracts ending within this many days are reported by
/// [`ContratService::retrieve_and_update_status_contrat`].
pub const EXPIRY_WARNING_DAYS: i64 = 15;

// ─── Status report ───────────────────────────────────────────────────────────

/// Outcome of a status sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContratStatusReport {
  /// Contracts that were past their end date and have just been archived.
  pub archived:      Vec<Contrat>,
  /// Live contracts ending within [`EXPIRY_WARNING_DAYS`].
  pub expiring_soon: Vec<Contrat>,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct ContratService<C, E> {
  contrats:  Arc<C>,
  etudiants: Arc<E>,
}

impl<C, E> Clone for ContratService<C, E> {
  fn clone(&self) -> Self {
    Self {
      contrats:  Arc::clone(&self.contrats),
      etudiants: Arc::clone(&self.etudiants),
    }
  }
}

impl<C, E> ContratService<C, E>
where
  C: ContratStore,
  E: EtudiantStore,
{
  pub fn new(contrats: Arc<C>, etudiants: Arc<E>) -> Self {
    Self { contrats, etudiants }
  }

  // ── CRUD ──────────────────────────────────────────────────────────────────

  pub async fn retrieve_all_contrats(&self) -> Result<Vec<Contrat>> {
    let contrats = self.contrats.find_all().await.map_err(Error::store)?;
    tracing::debug!(count = contrats.len(), "retrieved all contrats");
    Ok(contrats)
  }

  /// Persist a new contract. `save` is an upsert, so a contract that already
  /// carries the id of a stored record overwrites that record in place.
  pub async fn add_contrat(&self, contrat: Contrat) -> Result<Contrat> {
    let saved = self.contrats.save(contrat).await.map_err(Error::store)?;
    tracing::info!(id = ?saved.id_contrat, "added contrat");
    Ok(saved)
  }

  pub async fn update_contrat(&self, contrat: Contrat) -> Result<Contrat> {
    let saved = self.contrats.save(contrat).await.map_err(Error::store)?;
    tracing::info!(id = ?saved.id_contrat, "updated contrat");
    Ok(saved)
  }

  pub async fn retrieve_contrat(&self, id: ContratId) -> Result<Contrat> {
    self
      .contrats
      .find_by_id(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| {
        tracing::warn!(id, "contrat not found");
        Error::ContratNotFound(id)
      })
  }

  /// Look the contract up, then delete exactly that record. An unknown id
  /// fails before the store's delete is reached.
  pub async fn remove_contrat(&self, id: ContratId) -> Result<()> {
    let contrat = self.retrieve_contrat(id).await?;
    self.contrats.delete(contrat).await.map_err(Error::store)?;
    tracing::info!(id, "removed contrat");
    Ok(())
  }

  // ── Association ───────────────────────────────────────────────────────────

  /// Link contract `id_contrat` to the student named `nom prenom` and persist
  /// it. Both sides of the association are updated: the contract points at
  /// the student, and the student's `contrats` set gains the contract id.
  pub async fn affect_contrat_to_etudiant(
    &self,
    id_contrat: ContratId,
    nom: &str,
    prenom: &str,
  ) -> Result<Contrat> {
    let mut etudiant = self
      .etudiants
      .find_by_nom_e_and_prenom_e(nom, prenom)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| {
        tracing::warn!(nom, prenom, "etudiant not found");
        Error::EtudiantNotFound { nom: nom.to_owned(), prenom: prenom.to_owned() }
      })?;

    let mut contrat = self
      .contrats
      .find_by_id_contrat(id_contrat)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| {
        tracing::warn!(id = id_contrat, "contrat not found");
        Error::ContratNotFound(id_contrat)
      })?;

    etudiant.contrats.insert(contrat.id_contrat.unwrap_or(id_contrat));
    contrat.etudiant = Some(etudiant);

    let saved = self.contrats.save(contrat).await.map_err(Error::store)?;
    tracing::info!(id = id_contrat, nom, prenom, "affected contrat to etudiant");
    Ok(saved)
  }

  // ── Reporting ─────────────────────────────────────────────────────────────

  /// Number of live contracts whose period overlaps `[start, end]`.
  pub async fn nb_contrats_valides(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<usize> {
    let contrats = self.retrieve_all_contrats().await?;
    Ok(
      contrats
        .iter()
        .filter(|c| c.is_valid_between(start, end))
        .count(),
    )
  }

  /// Archive every live contract that ended before `today` and report the
  /// ones about to end.
  pub async fn retrieve_and_update_status_contrat(
    &self,
    today: NaiveDate,
  ) -> Result<ContratStatusReport> {
    let mut report = ContratStatusReport::default();

    for mut contrat in self.retrieve_all_contrats().await? {
      if contrat.archive {
        continue;
      }
      if contrat.is_expired(today) {
        contrat.archive = true;
        let saved = self.contrats.save(contrat).await.map_err(Error::store)?;
        tracing::info!(id = ?saved.id_contrat, "archived expired contrat");
        report.archived.push(saved);
      } else if contrat.days_remaining(today) <= EXPIRY_WARNING_DAYS {
        tracing::info!(
          id = ?contrat.id_contrat,
          ends = %contrat.date_fin_contrat,
          etudiant = ?contrat.etudiant.as_ref().map(|e| (&e.nom_e, &e.prenom_e)),
          "contrat expires soon"
        );
        report.expiring_soon.push(contrat);
      }
    }

    Ok(report)
  }

  /// Revenue over `[start, end]`: the length of the range in 30-day months
  /// times each live contract's monthly rate. An inverted range yields 0.
  pub async fn chiffre_affaire_entre_deux_dates(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<f64> {
    let days = (end - start).num_days();
    if days <= 0 {
      return Ok(0.0);
    }
    let months = days as f64 / 30.0;

    let contrats = self.retrieve_all_contrats().await?;
    Ok(
      contrats
        .iter()
        .filter(|c| !c.archive)
        .map(|c| months * c.specialite.monthly_rate())
        .sum(),
    )
  }
}
