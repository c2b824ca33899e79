use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body of create and update: `{ "data": { ...attributes } }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentPayload<T> {
    pub data: T,
}

/// One entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Entry<A> {
    pub id: String,
    pub attributes: EntryAttributes<A>,
}

/// Content attributes plus the managed timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryAttributes<A> {
    #[serde(flatten)]
    pub fields: A,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `null` while the entry is a draft.
    pub published_at: Option<DateTime<Utc>>,
}

/// `{ "data": entry, "meta": {} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentResponse<A> {
    pub data: Entry<A>,
    pub meta: EmptyMeta,
}

/// `{ "data": [entry], "meta": { "pagination": {..} } }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentListResponse<A> {
    pub data: Vec<Entry<A>>,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmptyMeta {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u64,
    pub total: u64,
}

impl Pagination {
    #[must_use]
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let page_count = if page_size == 0 { 0 } else { total.div_ceil(u64::from(page_size)) };
        Self { page, page_size, page_count, total }
    }
}

impl<A> From<Entry<A>> for ContentResponse<A> {
    fn from(data: Entry<A>) -> Self {
        Self { data, meta: EmptyMeta {} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Pagination::new(1, 25, 0).page_count, 0);
        assert_eq!(Pagination::new(1, 25, 25).page_count, 1);
        assert_eq!(Pagination::new(1, 25, 26).page_count, 2);
    }

    #[test]
    fn entry_flattens_attributes() {
        let at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z").unwrap().to_utc();
        let entry = Entry {
            id: "abc".to_owned(),
            attributes: EntryAttributes {
                fields: json!({ "title": "Hello" }),
                created_at: at,
                updated_at: at,
                published_at: None,
            },
        };

        let value = serde_json::to_value(ContentResponse::from(entry)).unwrap();
        assert_eq!(value["data"]["id"], "abc");
        assert_eq!(value["data"]["attributes"]["title"], "Hello");
        assert_eq!(value["data"]["attributes"]["createdAt"], "2026-01-02T03:04:05Z");
        assert!(value["data"]["attributes"]["publishedAt"].is_null());
        assert_eq!(value["meta"], json!({}));
    }
}
