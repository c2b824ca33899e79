use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use quire_domain::constants::MIGRATION;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// A schema script owned by one slice.
///
/// Slices expose their migrations as constants and hand them to
/// [`DatabaseBuilder::migrations`](crate::DatabaseBuilder::migrations).
/// Once applied, a migration must never change: the stored checksum is
/// compared on every start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub slice: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub const fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice, version, script }
    }

    /// Record key in the `migration` table.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.slice, self.version)
    }

    #[must_use]
    pub fn checksum(&self) -> String {
        format!("{:016x}", fxhash::hash64(self.script))
    }
}

/// Outcome of a migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AppliedMigration {
    slice: String,
    version: String,
    checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(
        &self,
        migrations: &[Migration],
    ) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(format!("DEFINE TABLE IF NOT EXISTS {MIGRATION} SCHEMALESS;"))
            .await
            .context("Defining migration table")?
            .check()
            .context("Defining migration table")?;

        let applied = self.applied().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            let key = migration.key();
            match applied.get(&key) {
                Some(existing) => {
                    ensure_checksum(migration, &existing.checksum)?;
                    report.skipped.push(key);
                },
                None => {
                    self.apply(migration, &key).await?;
                    report.applied.push(key);
                },
            }
        }

        Ok(report)
    }

    async fn applied(&self) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let rows: Vec<AppliedMigration> = self
            .db
            .query(format!("SELECT slice, version, checksum FROM {MIGRATION}"))
            .await
            .context("Loading applied migrations")?
            .take(0)
            .context("Parsing applied migrations")?;

        Ok(rows.into_iter().map(|row| (format!("{}_{}", row.slice, row.version), row)).collect())
    }

    async fn apply(&self, migration: &Migration, key: &str) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE type::thing($table, $key) CONTENT {{
                slice: $slice,
                version: $version,
                checksum: $checksum,
                applied_at: time::now()
            }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("table", MIGRATION))
            .bind(("key", key.to_owned()))
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("Executing migration {key}"))?
            .check()
            .context(format!("Migration {key} was rejected"))?;

        Ok(())
    }
}

fn ensure_checksum(migration: &Migration, stored: &str) -> Result<(), DatabaseError> {
    let current = migration.checksum();
    if stored == current {
        return Ok(());
    }
    Err(DatabaseError::Migration {
        message: format!(
            "Checksum mismatch for {} (applied {stored}, found {current})",
            migration.key()
        )
        .into(),
        context: Some("Migration already applied with different contents".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_tracks_script_contents() {
        let a = Migration::new("article", "0001", "DEFINE TABLE article;");
        let b = Migration::new("article", "0001", "DEFINE TABLE article SCHEMALESS;");

        assert_eq!(a.checksum(), a.checksum());
        assert_ne!(a.checksum(), b.checksum());
        assert_eq!(a.key(), "article_0001");
    }

    #[test]
    fn checksum_mismatch_is_a_migration_error() {
        let m = Migration::new("article", "0001", "DEFINE TABLE article;");
        assert!(ensure_checksum(&m, &m.checksum()).is_ok());
        assert!(matches!(
            ensure_checksum(&m, "deadbeef"),
            Err(DatabaseError::Migration { .. })
        ));
    }
}
