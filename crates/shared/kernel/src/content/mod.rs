//! Generic content factory.
//!
//! A content type declares its UID, storage table, sortable attributes and an
//! attribute struct; [`ContentService`] then provides list, read, create,
//! update and delete with the pagination, sorting and publication rules every
//! content API shares.
//!
//! ```rust,ignore
//! struct Page;
//!
//! impl ContentType for Page {
//!     const UID: &'static str = "api::page.page";
//!     const TABLE: &'static str = "page";
//!     const SORTABLE: &'static [&'static str] = &["title"];
//!     type Attributes = PageAttributes;
//! }
//!
//! let pages = ContentService::<Page>::new(db, config.content.clone());
//! let list = pages.list(&ContentQuery::default()).await?;
//! ```

mod error;
mod query;
mod response;
mod service;

pub use error::{ContentError, ContentErrorExt};
pub use query::{ContentQuery, PublicationState, SortDirection, SortField};
pub use response::{
    ContentListResponse, ContentPayload, ContentResponse, EmptyMeta, Entry, EntryAttributes, ListMeta,
    Pagination,
};
pub use service::ContentService;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A content type served by the generic factory.
pub trait ContentType: Send + Sync + 'static {
    /// Content type identifier, e.g. `api::article.article`.
    const UID: &'static str;
    /// Storage table.
    const TABLE: &'static str;
    /// Attribute names (as sent on the wire) accepted by `sort`.
    const SORTABLE: &'static [&'static str];

    /// Attributes editable through the API.
    type Attributes: Serialize + DeserializeOwned + Debug + Clone + Send + Sync + 'static;
}
