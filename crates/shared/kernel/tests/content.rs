use quire_database::Database;
use quire_kernel::content::{ContentError, ContentQuery, ContentService, ContentType};
use quire_kernel::domain::config::ContentConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct NoteAttributes {
    title: String,
    #[serde(default)]
    body: Option<String>,
}

struct Note;

impl ContentType for Note {
    const UID: &'static str = "api::note.note";
    const TABLE: &'static str = "note";
    const SORTABLE: &'static [&'static str] = &["title"];
    type Attributes = NoteAttributes;
}

async fn service() -> ContentService<Note> {
    let db = Database::builder().url("mem://").session("kernel", "content").init().await.unwrap();
    ContentService::new(db, ContentConfig { default_page_size: 2, max_page_size: 3 })
}

fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test payload must be an object"),
    }
}

#[tokio::test]
async fn create_then_find() {
    let notes = service().await;

    let created = notes.create(data(json!({ "title": "First" }))).await.unwrap();
    assert_eq!(created.data.attributes.fields.title, "First");
    assert!(created.data.attributes.published_at.is_some());

    let found = notes.find_one(&created.data.id, &ContentQuery::default()).await.unwrap();
    assert_eq!(found.data, created.data);

    let prefixed = format!("note:{}", created.data.id);
    assert!(notes.find_one(&prefixed, &ContentQuery::default()).await.is_ok());
}

#[tokio::test]
async fn rejects_unknown_attributes() {
    let notes = service().await;
    let err = notes.create(data(json!({ "title": "x", "author": "me" }))).await.unwrap_err();
    assert!(matches!(err, ContentError::Validation { .. }));

    let err = notes.create(data(json!({ "body": "no title" }))).await.unwrap_err();
    assert!(matches!(err, ContentError::Validation { .. }));
}

#[tokio::test]
async fn drafts_are_hidden_from_live_queries() {
    let notes = service().await;
    let draft = notes.create(data(json!({ "title": "Draft", "publishedAt": null }))).await.unwrap();
    notes.create(data(json!({ "title": "Live" }))).await.unwrap();

    let err = notes.find_one(&draft.data.id, &ContentQuery::default()).await.unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));
    assert!(notes.find_one(&draft.data.id, &ContentQuery::preview()).await.is_ok());

    let live = notes.list(&ContentQuery::default()).await.unwrap();
    assert_eq!(live.meta.pagination.total, 1);
    assert_eq!(live.data[0].attributes.fields.title, "Live");

    let preview = notes.list(&ContentQuery::preview()).await.unwrap();
    assert_eq!(preview.meta.pagination.total, 2);
}

#[tokio::test]
async fn list_paginates_and_sorts() {
    let notes = service().await;
    for title in ["b", "d", "a", "c", "e"] {
        notes.create(data(json!({ "title": title }))).await.unwrap();
    }

    let query = ContentQuery { sort: Some("title:desc".to_owned()), ..ContentQuery::default() };
    let first = notes.list(&query).await.unwrap();
    let titles: Vec<_> = first.data.iter().map(|e| e.attributes.fields.title.as_str()).collect();
    assert_eq!(titles, ["e", "d"]);
    assert_eq!(first.meta.pagination.page_size, 2);
    assert_eq!(first.meta.pagination.page_count, 3);
    assert_eq!(first.meta.pagination.total, 5);

    let last = ContentQuery { page: Some(3), ..query.clone() };
    let last = notes.list(&last).await.unwrap();
    assert_eq!(last.data.len(), 1);
    assert_eq!(last.data[0].attributes.fields.title, "a");

    let capped = ContentQuery { page_size: Some(50), ..query };
    assert_eq!(notes.list(&capped).await.unwrap().data.len(), 3);

    let bad = ContentQuery { sort: Some("body".to_owned()), ..ContentQuery::default() };
    assert!(matches!(notes.list(&bad).await, Err(ContentError::Validation { .. })));
}

#[tokio::test]
async fn update_merges_attributes() {
    let notes = service().await;
    let created =
        notes.create(data(json!({ "title": "Old", "body": "kept" }))).await.unwrap().data;

    let updated = notes.update(&created.id, data(json!({ "title": "New" }))).await.unwrap().data;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.attributes.fields.title, "New");
    assert_eq!(updated.attributes.fields.body.as_deref(), Some("kept"));
    assert_eq!(updated.attributes.created_at, created.attributes.created_at);
    assert!(updated.attributes.updated_at >= created.attributes.updated_at);

    let unpublished =
        notes.update(&created.id, data(json!({ "publishedAt": null }))).await.unwrap().data;
    assert!(unpublished.attributes.published_at.is_none());

    let err = notes.update("missing", data(json!({ "title": "x" }))).await.unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));
}

#[tokio::test]
async fn delete_returns_the_entry() {
    let notes = service().await;
    let created = notes.create(data(json!({ "title": "Gone" }))).await.unwrap().data;

    let deleted = notes.delete(&created.id).await.unwrap().data;
    assert_eq!(deleted.id, created.id);

    assert!(matches!(notes.delete(&created.id).await, Err(ContentError::NotFound { .. })));
    assert!(matches!(notes.delete("other:x").await, Err(ContentError::Validation { .. })));
}
