//! SQL schema for the Kaddem SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS etudiants (
    id_etudiant INTEGER PRIMARY KEY AUTOINCREMENT,
    nom_e       TEXT NOT NULL,
    prenom_e    TEXT NOT NULL
);

-- The student side of the association is derived from etudiant_id;
-- there is no join table to keep in sync.
CREATE TABLE IF NOT EXISTS contrats (
    id_contrat         INTEGER PRIMARY KEY AUTOINCREMENT,
    date_debut_contrat TEXT    NOT NULL,   -- YYYY-MM-DD
    date_fin_contrat   TEXT    NOT NULL,   -- YYYY-MM-DD
    specialite         TEXT    NOT NULL,   -- 'IA' | 'RESEAUX' | 'CLOUD' | 'SECURITE'
    archive            INTEGER NOT NULL DEFAULT 0,
    montant_contrat    INTEGER,
    etudiant_id        INTEGER REFERENCES etudiants(id_etudiant) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS etudiants_name_idx    ON etudiants(nom_e, prenom_e);
CREATE INDEX IF NOT EXISTS contrats_etudiant_idx ON contrats(etudiant_id);

PRAGMA user_version = 1;
";
