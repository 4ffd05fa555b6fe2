//! [`SqliteStore`] — the SQLite implementation of [`ContratStore`] and
//! [`EtudiantStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use kaddem_core::{
  contrat::{Contrat, ContratId},
  etudiant::Etudiant,
  store::{ContratStore, EtudiantStore},
};

use crate::{
  Error, Result, StoreConfig,
  encode::{
    CONTRAT_COLUMNS, ETUDIANT_COLUMNS, RawContrat, RawEtudiant, encode_date,
    encode_specialite,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Kaddem store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store described by `config`.
  pub async fn from_config(config: &StoreConfig) -> Result<Self> {
    Self::open(config.resolved_path()).await
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Persist a new student and return it with its assigned id.
  ///
  /// Students are owned by the wider application; this exists so it (and
  /// tests) can seed the table the contract service reads from.
  pub async fn insert_etudiant(
    &self,
    nom: impl Into<String>,
    prenom: impl Into<String>,
  ) -> Result<Etudiant> {
    let nom = nom.into();
    let prenom = prenom.into();

    let (nom_c, prenom_c) = (nom.clone(), prenom.clone());
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO etudiants (nom_e, prenom_e) VALUES (?1, ?2)",
          rusqlite::params![nom_c, prenom_c],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Etudiant::new(id, nom, prenom))
  }
}

// ─── ContratStore impl ───────────────────────────────────────────────────────

impl ContratStore for SqliteStore {
  type Error = Error;

  async fn find_all(&self) -> Result<Vec<Contrat>> {
    let raws: Vec<RawContrat> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTRAT_COLUMNS}
           FROM contrats c
           LEFT JOIN etudiants e ON e.id_etudiant = c.etudiant_id
           ORDER BY c.id_contrat"
        ))?;
        let rows = stmt
          .query_map([], RawContrat::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContrat::into_contrat).collect()
  }

  async fn save(&self, contrat: Contrat) -> Result<Contrat> {
    let id          = contrat.id_contrat;
    let debut_str   = encode_date(contrat.date_debut_contrat);
    let fin_str     = encode_date(contrat.date_fin_contrat);
    let specialite  = encode_specialite(contrat.specialite);
    let archive     = contrat.archive;
    let montant     = contrat.montant_contrat;
    let etudiant_id = contrat.etudiant.as_ref().map(|e| e.id_etudiant);

    let saved_id: ContratId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contrats (
             id_contrat, date_debut_contrat, date_fin_contrat,
             specialite, archive, montant_contrat, etudiant_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT(id_contrat) DO UPDATE SET
             date_debut_contrat = excluded.date_debut_contrat,
             date_fin_contrat   = excluded.date_fin_contrat,
             specialite         = excluded.specialite,
             archive            = excluded.archive,
             montant_contrat    = excluded.montant_contrat,
             etudiant_id        = excluded.etudiant_id",
          rusqlite::params![
            id,
            debut_str,
            fin_str,
            specialite,
            archive,
            montant,
            etudiant_id,
          ],
        )?;
        Ok(id.unwrap_or_else(|| conn.last_insert_rowid()))
      })
      .await?;

    // Read back so the student's contract set reflects this write.
    self
      .find_by_id(saved_id)
      .await?
      .ok_or(Error::ContratNotFound(saved_id))
  }

  async fn find_by_id(&self, id: ContratId) -> Result<Option<Contrat>> {
    let raw: Option<RawContrat> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTRAT_COLUMNS}
                 FROM contrats c
                 LEFT JOIN etudiants e ON e.id_etudiant = c.etudiant_id
                 WHERE c.id_contrat = ?1"
              ),
              rusqlite::params![id],
              RawContrat::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContrat::into_contrat).transpose()
  }

  async fn delete(&self, contrat: Contrat) -> Result<()> {
    let id = contrat.id_contrat.ok_or(Error::MissingId)?;

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contrats WHERE id_contrat = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if removed == 0 {
      return Err(Error::ContratNotFound(id));
    }
    Ok(())
  }
}

// ─── EtudiantStore impl ──────────────────────────────────────────────────────

impl EtudiantStore for SqliteStore {
  type Error = Error;

  async fn find_by_nom_e_and_prenom_e(
    &self,
    nom: &str,
    prenom: &str,
  ) -> Result<Option<Etudiant>> {
    let nom = nom.to_owned();
    let prenom = prenom.to_owned();

    let raw: Option<RawEtudiant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ETUDIANT_COLUMNS}
                 FROM etudiants e
                 WHERE e.nom_e = ?1 AND e.prenom_e = ?2
                 ORDER BY e.id_etudiant
                 LIMIT 1"
              ),
              rusqlite::params![nom, prenom],
              |row| RawEtudiant::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEtudiant::into_etudiant).transpose()
  }
}
