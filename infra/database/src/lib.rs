//! # Database Infrastructure
//!
//! Connects to [SurrealDB](https://surrealdb.com) through the `any` engine
//! (`mem://`, `rocksdb://`, `ws://`, `http://`), waits for the engine to become
//! healthy, signs in, selects the namespace/database, and applies the schema
//! migrations contributed by the feature slices.
//!
//! ```rust
//! use quire_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder().url("mem://").session("quire", "docs").init().await?;
//!     db.health().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use migrations::{Migration, MigrationReport};
pub use surrealdb;

use migrations::MigrationRunner;
use quire_domain::config::DatabaseConfig;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, trace, warn};

const HEALTH_ATTEMPTS: u32 = 3;
const HEALTH_INITIAL_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// Shared `SurrealDB` client handle.
///
/// Dereferences to [`Surreal<Any>`], so queries run directly on it.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::default()
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.ns
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.inner.db
    }

    /// Applies migrations not yet recorded in the `migration` table.
    ///
    /// # Errors
    /// [`DatabaseError::Migration`] when an applied migration changed, or the
    /// engine error when a script fails.
    pub async fn migrate(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        MigrationRunner::new(&self.inner.instance).run(migrations).await
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// Fluent connection builder.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
    migrations: Vec<Migration>,
}

impl DatabaseBuilder {
    /// Pre-fills the builder from the `[database]` config section.
    pub fn from_config(cfg: &DatabaseConfig) -> Self {
        let builder = Self::default().url(&cfg.url).session(&cfg.namespace, &cfg.database);
        match &cfg.credentials {
            Some(creds) => builder.auth(&creds.username, &creds.password),
            None => builder,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Signs in as a root user after connecting.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Adds schema migrations; they run in the given order.
    pub fn migrations(mut self, migrations: impl IntoIterator<Item = Migration>) -> Self {
        self.migrations.extend(migrations);
        self
    }

    /// Connects and prepares the database.
    ///
    /// # Process
    /// 1. Validates that URL, namespace and database are set.
    /// 2. Starts the engine and runs up to three health checks with exponential
    ///    backoff starting at 500ms.
    /// 3. Signs in with root credentials when configured.
    /// 4. Activates the namespace/database and applies pending migrations.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] when a required parameter is missing.
    /// * [`DatabaseError::Connection`] when the engine stays unhealthy.
    /// * [`DatabaseError::Auth`] when the credentials are rejected.
    /// * [`DatabaseError::Migration`] / [`DatabaseError::Surreal`] when a migration fails.
    #[instrument(skip(self), fields(url = ?self.url, ns = ?self.ns, db = ?self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = required(self.url, "URL")?;
        let ns = required(self.ns, "Namespace")?;
        let db = required(self.db, "Database")?;

        let instance = connect(url.as_str()).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        let mut delay = HEALTH_INITIAL_DELAY;
        for attempt in 1..=HEALTH_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((username, password)) = &self.auth {
            instance
                .signin(Root { username, password })
                .await
                .map_err(|e| DatabaseError::Auth {
                    message: e.to_string().into(),
                    context: Some(url.clone().into()),
                })?;
        }

        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        let report = MigrationRunner::new(&instance).run(&self.migrations).await?;
        for key in &report.skipped {
            trace!(migration = %key, "Migration already applied");
        }
        for key in &report.applied {
            info!(migration = %key, "Applied migration");
        }

        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db }) })
    }
}

fn required(value: Option<String>, what: &'static str) -> Result<String, DatabaseError> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| DatabaseError::Validation {
        message: format!("{what} is required").into(),
        context: None,
    })
}
