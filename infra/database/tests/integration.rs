use quire_database::*;
use quire_domain::config::DatabaseConfig;

const NOTES_V1: Migration =
    Migration::new("notes", "0001", "DEFINE TABLE IF NOT EXISTS note SCHEMALESS;");
const NOTES_V2: Migration = Migration::new(
    "notes",
    "0002",
    "DEFINE INDEX IF NOT EXISTS note_slug ON TABLE note FIELDS slug UNIQUE;",
);

async fn memory_db() -> Database {
    Database::builder().url("mem://").session("test_ns", "test_db").init().await.expect("mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = memory_db().await;

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn builder_reads_database_section() {
    let cfg = DatabaseConfig::default();
    let db = DatabaseBuilder::from_config(&cfg).init().await.expect("default config connects");
    assert_eq!(db.namespace(), cfg.namespace);
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").session(" ", "db").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn migrations_apply_once() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .migrations([NOTES_V1])
        .init()
        .await
        .expect("init with migrations");

    let report = db.migrate(&[NOTES_V1, NOTES_V2]).await.expect("second run");
    assert_eq!(report.skipped, vec!["notes_0001".to_owned()]);
    assert_eq!(report.applied, vec!["notes_0002".to_owned()]);

    let report = db.migrate(&[NOTES_V1, NOTES_V2]).await.expect("third run");
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 2);
}

#[tokio::test]
async fn changed_migration_is_rejected() {
    let db = memory_db().await;
    db.migrate(&[NOTES_V1]).await.expect("first run");

    let edited = Migration::new("notes", "0001", "DEFINE TABLE IF NOT EXISTS note SCHEMAFULL;");
    let err = db.migrate(&[edited]).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Migration { .. }));
}
