use super::{
    ContentError, ContentErrorExt, ContentListResponse, ContentQuery, ContentResponse,
    ContentType, Entry, EntryAttributes, ListMeta, Pagination, PublicationState,
};
use crate::safe_nanoid;
use crate::security::resource::ResourceGuard;
use chrono::{DateTime, Utc};
use quire_database::Database;
use quire_domain::config::ContentConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, instrument};

const PUBLISHED_AT: &str = "publishedAt";
const DEFAULT_ORDER: &str = "created_at ASC";

/// Entry as written to the database.
#[derive(Debug, Serialize)]
struct StoredEntry<A> {
    attributes: A,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    updated_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    published_at: Option<DateTime<Utc>>,
}

/// Entry as read back, with the record key as `id`.
#[derive(Debug, Deserialize)]
struct Row<A> {
    id: String,
    attributes: A,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    updated_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

impl<A> From<Row<A>> for Entry<A> {
    fn from(row: Row<A>) -> Self {
        Self {
            id: row.id,
            attributes: EntryAttributes {
                fields: row.attributes,
                created_at: row.created_at,
                updated_at: row.updated_at,
                published_at: row.published_at,
            },
        }
    }
}

/// CRUD operations for one [`ContentType`].
pub struct ContentService<C: ContentType> {
    db: Database,
    limits: ContentConfig,
    _type: PhantomData<fn() -> C>,
}

impl<C: ContentType> Clone for ContentService<C> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), limits: self.limits.clone(), _type: PhantomData }
    }
}

impl<C: ContentType> fmt::Debug for ContentService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentService").field("uid", &C::UID).field("limits", &self.limits).finish()
    }
}

impl<C: ContentType> ContentService<C> {
    #[must_use]
    pub const fn new(db: Database, limits: ContentConfig) -> Self {
        Self { db, limits, _type: PhantomData }
    }

    /// One page of entries plus pagination metadata.
    #[instrument(skip(self), fields(uid = C::UID), err)]
    pub async fn list(
        &self,
        query: &ContentQuery,
    ) -> Result<ContentListResponse<C::Attributes>, ContentError> {
        let (page, page_size) = query.page(&self.limits);
        let order = query.sort_fields(C::SORTABLE)?;
        let order_by = if order.is_empty() {
            DEFAULT_ORDER.to_owned()
        } else {
            order.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        let filter = publication_filter(query.state());
        let start = u64::from(page - 1) * u64::from(page_size);

        let sql = format!(
            "SELECT *, record::id(id) AS id FROM type::table($table) {filter}
                ORDER BY {order_by} LIMIT {page_size} START {start};
            SELECT count() AS total FROM type::table($table) {filter} GROUP ALL;"
        );

        let mut response =
            self.db.query(sql).bind(("table", C::TABLE)).await.context("Listing entries")?;
        let rows: Vec<Row<C::Attributes>> = response.take(0).context("Decoding entries")?;
        let total = response
            .take::<Option<CountRow>>(1)
            .context("Counting entries")?
            .map_or(0, |row| row.total);

        debug!(returned = rows.len(), total, "Listed entries");

        Ok(ContentListResponse {
            data: rows.into_iter().map(Entry::from).collect(),
            meta: ListMeta { pagination: Pagination::new(page, page_size, total) },
        })
    }

    /// A single entry; drafts are visible only with `publicationState=preview`.
    #[instrument(skip(self), fields(uid = C::UID), err)]
    pub async fn find_one(
        &self,
        id: &str,
        query: &ContentQuery,
    ) -> Result<ContentResponse<C::Attributes>, ContentError> {
        let key = record_key::<C>(id)?;
        let row = self.fetch(&key, query.state()).await?.ok_or_else(|| not_found::<C>(&key))?;
        Ok(Entry::from(row).into())
    }

    /// Creates an entry from the `data` object of the request body.
    ///
    /// `publishedAt` may be sent alongside the attributes: `null` creates a
    /// draft, a timestamp publishes at that time, omitting it publishes now.
    #[instrument(skip(self, data), fields(uid = C::UID), err)]
    pub async fn create(
        &self,
        mut data: Map<String, Value>,
    ) -> Result<ContentResponse<C::Attributes>, ContentError> {
        let now = Utc::now();
        let published_at = match data.remove(PUBLISHED_AT) {
            Some(value) => parse_published(value)?,
            None => Some(now),
        };
        let attributes = parse_attributes::<C>(data)?;
        let key = safe_nanoid!();

        let stored = StoredEntry { attributes, created_at: now, updated_at: now, published_at };
        let row = self.write("CREATE", &key, stored).await?.ok_or_else(|| not_found::<C>(&key))?;

        debug!(id = %key, "Entry created");
        Ok(Entry::from(row).into())
    }

    /// Merges the given attributes into an existing entry.
    ///
    /// Attributes not present in `patch` keep their values; the merged result
    /// must still be a valid attribute set.
    #[instrument(skip(self, patch), fields(uid = C::UID), err)]
    pub async fn update(
        &self,
        id: &str,
        mut patch: Map<String, Value>,
    ) -> Result<ContentResponse<C::Attributes>, ContentError> {
        let key = record_key::<C>(id)?;
        let existing = self
            .fetch(&key, PublicationState::Preview)
            .await?
            .ok_or_else(|| not_found::<C>(&key))?;

        let published_at = match patch.remove(PUBLISHED_AT) {
            Some(value) => parse_published(value)?,
            None => existing.published_at,
        };

        let mut merged = match serde_json::to_value(&existing.attributes)
            .context("Encoding stored attributes")?
        {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(patch);
        let attributes = parse_attributes::<C>(merged)?;

        let stored = StoredEntry {
            attributes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            published_at,
        };
        let row = self.write("UPDATE", &key, stored).await?.ok_or_else(|| not_found::<C>(&key))?;

        debug!(id = %key, "Entry updated");
        Ok(Entry::from(row).into())
    }

    /// Deletes an entry and returns it as it was.
    #[instrument(skip(self), fields(uid = C::UID), err)]
    pub async fn delete(&self, id: &str) -> Result<ContentResponse<C::Attributes>, ContentError> {
        let key = record_key::<C>(id)?;
        let existing = self
            .fetch(&key, PublicationState::Preview)
            .await?
            .ok_or_else(|| not_found::<C>(&key))?;

        self.db
            .query("DELETE type::thing($table, $key)")
            .bind(("table", C::TABLE))
            .bind(("key", key.clone()))
            .await
            .context("Deleting entry")?
            .check()
            .context("Delete rejected")?;

        debug!(id = %key, "Entry deleted");
        Ok(Entry::from(existing).into())
    }

    async fn fetch(
        &self,
        key: &str,
        state: PublicationState,
    ) -> Result<Option<Row<C::Attributes>>, ContentError> {
        let filter = publication_filter(state);
        self.db
            .query(format!(
                "SELECT *, record::id(id) AS id FROM type::thing($table, $key) {filter}"
            ))
            .bind(("table", C::TABLE))
            .bind(("key", key.to_owned()))
            .await
            .context("Reading entry")?
            .take(0)
            .context("Decoding entry")
    }

    /// Runs `CREATE`/`UPDATE` with the full content and reads the record back.
    async fn write(
        &self,
        statement: &'static str,
        key: &str,
        stored: StoredEntry<C::Attributes>,
    ) -> Result<Option<Row<C::Attributes>>, ContentError> {
        self.db
            .query(format!(
                "{statement} type::thing($table, $key) CONTENT $data RETURN NONE;
                SELECT *, record::id(id) AS id FROM type::thing($table, $key);"
            ))
            .bind(("table", C::TABLE))
            .bind(("key", key.to_owned()))
            .bind(("data", stored))
            .await
            .context("Writing entry")?
            .take(1)
            .context("Decoding written entry")
    }
}

fn publication_filter(state: PublicationState) -> &'static str {
    match state {
        PublicationState::Live => "WHERE published_at != NONE AND published_at != NULL",
        PublicationState::Preview => "",
    }
}

fn record_key<C: ContentType>(id: &str) -> Result<String, ContentError> {
    ResourceGuard::verify(id, C::TABLE).map_err(|e| ContentError::Validation {
        message: e.to_string().into(),
        context: Some(C::UID.into()),
    })
}

fn not_found<C: ContentType>(key: &str) -> ContentError {
    ContentError::NotFound { message: format!("{} '{key}'", C::TABLE).into(), context: None }
}

fn parse_published(value: Value) -> Result<Option<DateTime<Utc>>, ContentError> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|at| Some(at.to_utc()))
            .map_err(|e| ContentError::Validation {
                message: format!("Invalid {PUBLISHED_AT} '{raw}': {e}").into(),
                context: None,
            }),
        other => Err(ContentError::Validation {
            message: format!("Invalid {PUBLISHED_AT}: {other}").into(),
            context: None,
        }),
    }
}

fn parse_attributes<C: ContentType>(data: Map<String, Value>) -> Result<C::Attributes, ContentError> {
    serde_json::from_value(Value::Object(data)).map_err(|e| ContentError::Validation {
        message: e.to_string().into(),
        context: Some(format!("Invalid {} attributes", C::UID).into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_at_accepts_null_and_timestamps() {
        assert_eq!(parse_published(Value::Null).unwrap(), None);

        let at = parse_published(Value::String("2026-03-01T10:00:00+02:00".to_owned())).unwrap();
        assert_eq!(at.unwrap().to_rfc3339(), "2026-03-01T08:00:00+00:00");

        assert!(parse_published(Value::String("yesterday".to_owned())).is_err());
        assert!(parse_published(Value::Bool(true)).is_err());
    }

    #[test]
    fn live_state_filters_drafts() {
        assert!(publication_filter(PublicationState::Live).contains("published_at"));
        assert!(publication_filter(PublicationState::Preview).is_empty());
    }
}
