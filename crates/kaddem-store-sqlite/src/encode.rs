//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`. The specialty is stored as its
//! upper-case name. A student's contract set is read back from a
//! `group_concat` of ids.

use std::{collections::BTreeSet, str::FromStr as _};

use chrono::NaiveDate;
use kaddem_core::{
  contrat::{Contrat, ContratId, Specialite},
  etudiant::{Etudiant, EtudiantId},
};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Specialite ──────────────────────────────────────────────────────────────

pub fn encode_specialite(s: Specialite) -> String { s.to_string() }

pub fn decode_specialite(s: &str) -> Result<Specialite> {
  Specialite::from_str(s).map_err(|_| Error::UnknownSpecialite(s.to_owned()))
}

// ─── Contract id lists ───────────────────────────────────────────────────────

pub fn decode_id_list(s: Option<&str>) -> Result<BTreeSet<ContratId>> {
  let Some(s) = s else { return Ok(BTreeSet::new()) };
  s.split(',')
    .map(|part| {
      part
        .trim()
        .parse::<ContratId>()
        .map_err(|_| Error::IdList(s.to_owned()))
    })
    .collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected for an [`Etudiant`], including the derived contract set.
pub const ETUDIANT_COLUMNS: &str = "
  e.id_etudiant, e.nom_e, e.prenom_e,
  (SELECT group_concat(x.id_contrat) FROM contrats x
    WHERE x.etudiant_id = e.id_etudiant) AS etudiant_contrats";

/// Columns selected for a [`Contrat`] joined with its optional student.
pub const CONTRAT_COLUMNS: &str = "
  c.id_contrat, c.date_debut_contrat, c.date_fin_contrat,
  c.specialite, c.archive, c.montant_contrat,
  e.id_etudiant, e.nom_e, e.prenom_e,
  (SELECT group_concat(x.id_contrat) FROM contrats x
    WHERE x.etudiant_id = e.id_etudiant) AS etudiant_contrats";

/// Raw values read directly from an `etudiants` row.
pub struct RawEtudiant {
  pub id_etudiant: EtudiantId,
  pub nom_e:       String,
  pub prenom_e:    String,
  pub contrats:    Option<String>,
}

impl RawEtudiant {
  /// Read the four [`ETUDIANT_COLUMNS`] starting at column `at`.
  pub fn from_row(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id_etudiant: row.get(at)?,
      nom_e:       row.get(at + 1)?,
      prenom_e:    row.get(at + 2)?,
      contrats:    row.get(at + 3)?,
    })
  }

  pub fn into_etudiant(self) -> Result<Etudiant> {
    Ok(Etudiant {
      id_etudiant: self.id_etudiant,
      nom_e:       self.nom_e,
      prenom_e:    self.prenom_e,
      contrats:    decode_id_list(self.contrats.as_deref())?,
    })
  }
}

/// Raw values read from a `contrats` row left-joined with `etudiants`.
pub struct RawContrat {
  pub id_contrat:         ContratId,
  pub date_debut_contrat: String,
  pub date_fin_contrat:   String,
  pub specialite:         String,
  pub archive:            bool,
  pub montant_contrat:    Option<i64>,
  pub etudiant:           Option<RawEtudiant>,
}

impl RawContrat {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let etudiant_id: Option<EtudiantId> = row.get(6)?;
    let etudiant = match etudiant_id {
      Some(_) => Some(RawEtudiant::from_row(row, 6)?),
      None => None,
    };
    Ok(Self {
      id_contrat: row.get(0)?,
      date_debut_contrat: row.get(1)?,
      date_fin_contrat: row.get(2)?,
      specialite: row.get(3)?,
      archive: row.get(4)?,
      montant_contrat: row.get(5)?,
      etudiant,
    })
  }

  pub fn into_contrat(self) -> Result<Contrat> {
    Ok(Contrat {
      id_contrat:         Some(self.id_contrat),
      date_debut_contrat: decode_date(&self.date_debut_contrat)?,
      date_fin_contrat:   decode_date(&self.date_fin_contrat)?,
      specialite:         decode_specialite(&self.specialite)?,
      archive:            self.archive,
      montant_contrat:    self.montant_contrat,
      etudiant:           self.etudiant.map(RawEtudiant::into_etudiant).transpose()?,
    })
  }
}
