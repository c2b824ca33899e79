//! Plugin settings kept in the `core_store` table.
//!
//! Each entry is one record keyed `plugin_{plugin}_{key}` holding the value as
//! a JSON document string, so plugins can store any serde type without a schema.

use quire_database::Database;
use quire_database::surrealdb;
use quire_domain::constants::CORE_STORE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use tracing::{debug, instrument};

#[quire_derive::quire_error]
pub enum StoreError {
    #[error("Settings query failed{}: {source}", format_context(.context))]
    Query { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Settings value is not valid JSON{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Typed key-value access to plugin settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    db: Database,
}

impl SettingsStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record key of a plugin setting.
    #[must_use]
    pub fn key(plugin: &str, key: &str) -> String {
        format!("plugin_{plugin}_{key}")
    }

    /// Reads a setting; `None` when it was never written.
    #[instrument(skip(self), err)]
    pub async fn get<T>(&self, plugin: &str, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let raw: Option<String> = self
            .db
            .query("SELECT VALUE value FROM type::thing($table, $key)")
            .bind(("table", CORE_STORE))
            .bind(("key", Self::key(plugin, key)))
            .await
            .context("Reading setting")?
            .take(0)
            .context("Decoding setting")?;

        raw.map(|json| serde_json::from_str(&json).context("Parsing stored value")).transpose()
    }

    /// Creates or replaces a setting.
    #[instrument(skip(self, value), err)]
    pub async fn set<T>(&self, plugin: &str, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value).context("Encoding setting")?;
        let record = Self::key(plugin, key);

        self.db
            .query(
                "UPSERT type::thing($table, $key) CONTENT {
                    key: $key,
                    value: $value,
                    updated_at: time::now()
                } RETURN NONE",
            )
            .bind(("table", CORE_STORE))
            .bind(("key", record))
            .bind(("value", json))
            .await
            .context("Writing setting")?
            .check()
            .context("Setting rejected")?;

        debug!(plugin, key, "Setting stored");
        Ok(())
    }
}
