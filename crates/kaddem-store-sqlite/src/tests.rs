//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::NaiveDate;
use kaddem_core::{
  contrat::{Contrat, Specialite},
  service::ContratService,
  store::{ContratStore, EtudiantStore},
};

use crate::{Error, SqliteStore, StoreConfig, config::DEFAULT_STORE_PATH};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn contrat() -> Contrat {
  Contrat::new(date(2025, 1, 1), date(2025, 12, 31), Specialite::Ia)
}

// ─── Contrats ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_assigns_id_and_roundtrips() {
  let s = store().await;

  let mut input = contrat();
  input.montant_contrat = Some(1200);
  let saved = s.save(input.clone()).await.unwrap();
  assert_eq!(saved.id_contrat, Some(1));

  let fetched = s.find_by_id(1).await.unwrap().unwrap();
  assert_eq!(fetched.date_debut_contrat, input.date_debut_contrat);
  assert_eq!(fetched.date_fin_contrat, input.date_fin_contrat);
  assert_eq!(fetched.specialite, Specialite::Ia);
  assert_eq!(fetched.montant_contrat, Some(1200));
  assert!(!fetched.archive);
  assert!(fetched.etudiant.is_none());
}

#[tokio::test]
async fn save_with_id_updates_in_place() {
  let s = store().await;
  let mut saved = s.save(contrat()).await.unwrap();

  saved.specialite = Specialite::Cloud;
  saved.archive = true;
  let updated = s.save(saved.clone()).await.unwrap();
  assert_eq!(updated.id_contrat, saved.id_contrat);
  assert_eq!(updated.specialite, Specialite::Cloud);
  assert!(updated.archive);

  assert_eq!(s.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn save_with_unknown_id_inserts_under_that_id() {
  let s = store().await;
  let mut c = contrat();
  c.id_contrat = Some(40);

  let saved = s.save(c).await.unwrap();
  assert_eq!(saved.id_contrat, Some(40));
  assert!(s.find_by_id(40).await.unwrap().is_some());
}

#[tokio::test]
async fn find_all_is_ordered_by_id() {
  let s = store().await;
  s.save(contrat()).await.unwrap();
  s.save(Contrat::new(date(2024, 2, 1), date(2024, 8, 1), Specialite::Reseaux))
    .await
    .unwrap();
  s.save(Contrat::new(date(2023, 3, 1), date(2023, 9, 1), Specialite::Securite))
    .await
    .unwrap();

  let all = s.find_all().await.unwrap();
  let ids: Vec<_> = all.iter().map(|c| c.id_contrat.unwrap()).collect();
  assert_eq!(ids, [1, 2, 3]);
  assert_eq!(all[2].specialite, Specialite::Securite);
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_id(99).await.unwrap().is_none());
  assert!(s.find_by_id_contrat(99).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let saved = s.save(contrat()).await.unwrap();

  s.delete(saved).await.unwrap();
  assert!(s.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_or_unsaved_fails() {
  let s = store().await;

  let mut ghost = contrat();
  ghost.id_contrat = Some(5);
  assert!(matches!(s.delete(ghost).await, Err(Error::ContratNotFound(5))));
  assert!(matches!(s.delete(contrat()).await, Err(Error::MissingId)));
}

// ─── Etudiants ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_etudiant_by_exact_name() {
  let s = store().await;
  let inserted = s.insert_etudiant("Test", "Student").await.unwrap();
  s.insert_etudiant("Other", "Student").await.unwrap();

  let found = s
    .find_by_nom_e_and_prenom_e("Test", "Student")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found, inserted);
  assert!(found.contrats.is_empty());

  assert!(
    s.find_by_nom_e_and_prenom_e("test", "student")
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn duplicate_names_resolve_to_lowest_id() {
  let s = store().await;
  let first = s.insert_etudiant("Ben", "Ali").await.unwrap();
  s.insert_etudiant("Ben", "Ali").await.unwrap();

  let found = s.find_by_nom_e_and_prenom_e("Ben", "Ali").await.unwrap().unwrap();
  assert_eq!(found.id_etudiant, first.id_etudiant);
}

#[tokio::test]
async fn student_link_is_visible_from_both_sides() {
  let s = store().await;
  let etudiant = s.insert_etudiant("Test", "Student").await.unwrap();
  let mut a = s.save(contrat()).await.unwrap();
  let mut b = s.save(contrat()).await.unwrap();

  a.etudiant = Some(etudiant.clone());
  b.etudiant = Some(etudiant);
  s.save(a).await.unwrap();
  let b = s.save(b).await.unwrap();

  let linked = b.etudiant.unwrap();
  assert_eq!(linked.contrats.into_iter().collect::<Vec<_>>(), [1, 2]);

  let found = s
    .find_by_nom_e_and_prenom_e("Test", "Student")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.contrats.len(), 2);
}

#[tokio::test]
async fn deleting_contrat_drops_it_from_student_set() {
  let s = store().await;
  let etudiant = s.insert_etudiant("Test", "Student").await.unwrap();
  let mut c = contrat();
  c.etudiant = Some(etudiant);
  let saved = s.save(c).await.unwrap();

  s.delete(saved).await.unwrap();
  let found = s
    .find_by_nom_e_and_prenom_e("Test", "Student")
    .await
    .unwrap()
    .unwrap();
  assert!(found.contrats.is_empty());
}

// ─── Service over SQLite ─────────────────────────────────────────────────────

fn service(s: &SqliteStore) -> ContratService<SqliteStore, SqliteStore> {
  let shared = Arc::new(s.clone());
  ContratService::new(shared.clone(), shared)
}

#[tokio::test]
async fn service_affects_contrat_to_etudiant() {
  let s = store().await;
  let svc = service(&s);
  let etudiant = s.insert_etudiant("Test", "Student").await.unwrap();
  let added = svc.add_contrat(contrat()).await.unwrap();
  let id = added.id_contrat.unwrap();

  let result = svc
    .affect_contrat_to_etudiant(id, "Test", "Student")
    .await
    .unwrap();
  let linked = result.etudiant.unwrap();
  assert_eq!(linked.id_etudiant, etudiant.id_etudiant);
  assert!(linked.contrats.contains(&id));

  let reread = svc.retrieve_contrat(id).await.unwrap();
  assert_eq!(reread.etudiant.map(|e| e.id_etudiant), Some(etudiant.id_etudiant));
}

#[tokio::test]
async fn service_reassignment_moves_contrat_between_students() {
  let s = store().await;
  let svc = service(&s);
  let first = s.insert_etudiant("A", "One").await.unwrap();
  let second = s.insert_etudiant("B", "Two").await.unwrap();
  let id = svc.add_contrat(contrat()).await.unwrap().id_contrat.unwrap();

  svc.affect_contrat_to_etudiant(id, "A", "One").await.unwrap();
  let moved = svc.affect_contrat_to_etudiant(id, "B", "Two").await.unwrap();
  assert_eq!(moved.etudiant.as_ref().map(|e| e.id_etudiant), Some(second.id_etudiant));

  let a = s.find_by_nom_e_and_prenom_e("A", "One").await.unwrap().unwrap();
  assert_eq!(a.id_etudiant, first.id_etudiant);
  assert!(a.contrats.is_empty());

  let b = s.find_by_nom_e_and_prenom_e("B", "Two").await.unwrap().unwrap();
  assert_eq!(b.contrats.into_iter().collect::<Vec<_>>(), [id]);
}

#[tokio::test]
async fn service_add_with_existing_id_overwrites() {
  let s = store().await;
  let svc = service(&s);
  let original = svc.add_contrat(contrat()).await.unwrap();

  let mut replacement =
    Contrat::new(date(2026, 1, 1), date(2026, 6, 30), Specialite::Reseaux);
  replacement.id_contrat = original.id_contrat;
  let added = svc.add_contrat(replacement).await.unwrap();
  assert_eq!(added.id_contrat, original.id_contrat);

  let all = svc.retrieve_all_contrats().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].specialite, Specialite::Reseaux);
  assert_eq!(all[0].date_debut_contrat, date(2026, 1, 1));
}

#[tokio::test]
async fn service_crud_roundtrip() {
  let s = store().await;
  let svc = service(&s);

  let mut added = svc.add_contrat(contrat()).await.unwrap();
  let id = added.id_contrat.unwrap();

  added.specialite = Specialite::Cloud;
  let updated = svc.update_contrat(added).await.unwrap();
  assert_eq!(updated.specialite, Specialite::Cloud);
  assert_eq!(svc.retrieve_all_contrats().await.unwrap().len(), 1);

  svc.remove_contrat(id).await.unwrap();
  let err = svc.retrieve_contrat(id).await.unwrap_err();
  assert!(matches!(err, kaddem_core::Error::ContratNotFound(_)));
  let err = svc.remove_contrat(id).await.unwrap_err();
  assert!(matches!(err, kaddem_core::Error::ContratNotFound(_)));
}

#[tokio::test]
async fn service_status_sweep_persists_archive_flag() {
  let s = store().await;
  let svc = service(&s);
  svc
    .add_contrat(Contrat::new(date(2024, 1, 1), date(2024, 6, 30), Specialite::Ia))
    .await
    .unwrap();
  svc.add_contrat(contrat()).await.unwrap();

  let report = svc
    .retrieve_and_update_status_contrat(date(2025, 12, 20))
    .await
    .unwrap();
  assert_eq!(report.archived.len(), 1);
  assert_eq!(report.expiring_soon.len(), 1);

  assert!(s.find_by_id(1).await.unwrap().unwrap().archive);
  assert_eq!(
    svc
      .nb_contrats_valides(date(2024, 1, 1), date(2025, 12, 31))
      .await
      .unwrap(),
    1
  );
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn config_reads_path_from_toml() {
  let cfg = StoreConfig::from_builder(::config::Config::builder().add_source(
    ::config::File::from_str("path = \"/var/lib/kaddem.db\"", ::config::FileFormat::Toml),
  ))
  .unwrap();
  assert_eq!(cfg.path, std::path::PathBuf::from("/var/lib/kaddem.db"));
}

#[test]
fn config_defaults_when_empty() {
  let cfg = StoreConfig::from_builder(::config::Config::builder()).unwrap();
  assert_eq!(cfg.path, std::path::PathBuf::from(DEFAULT_STORE_PATH));
}

#[test]
fn resolved_path_leaves_plain_paths_alone() {
  let cfg = StoreConfig { path: "/tmp/kaddem.db".into() };
  assert_eq!(cfg.resolved_path(), std::path::PathBuf::from("/tmp/kaddem.db"));
}
