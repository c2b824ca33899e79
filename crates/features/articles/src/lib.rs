//! Articles feature slice.
//!
//! Binds the `api::article.article` content type to the kernel's generic
//! content factory. The slice adds no behavior of its own: every endpoint
//! delegates straight to [`ContentService`].
#[cfg(feature = "server")]
mod handlers;

use quire_derive::api_model;

#[cfg(feature = "server")]
use quire_database::{Database, Migration};
#[cfg(feature = "server")]
use quire_domain::config::ApiConfig;
#[cfg(feature = "server")]
use quire_domain::constants::{ARTICLE, ARTICLE_UID};
#[cfg(feature = "server")]
use quire_kernel::content::{ContentService, ContentType};
#[cfg(feature = "server")]
use quire_kernel::domain::registry::InitializedSlice;
#[cfg(feature = "server")]
use quire_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::{router::OpenApiRouter, routes};

/// Article attributes.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Rich text body.
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(feature = "server")]
impl ContentType for Article {
    const UID: &'static str = ARTICLE_UID;
    const TABLE: &'static str = ARTICLE;
    const SORTABLE: &'static [&'static str] = &["title", "slug"];
    type Attributes = Self;
}

/// Schema migrations of the `article` table.
#[cfg(feature = "server")]
pub const MIGRATIONS: &[Migration] =
    &[Migration::new(ARTICLE, "0001", include_str!("../migrations/0001_article.surql"))];

/// Articles feature state.
#[cfg(feature = "server")]
#[quire_derive::quire_slice]
pub struct Articles {
    pub service: ContentService<Article>,
}

/// Initialize the articles feature.
#[cfg(feature = "server")]
#[must_use]
pub fn init(config: &ApiConfig, database: &Database) -> InitializedSlice {
    let service = ContentService::new(database.clone(), config.content.clone());
    tracing::info!(uid = ARTICLE_UID, "Articles slice initialized");

    InitializedSlice::new(Articles::new(ArticlesInner { service }))
}

/// `/api/articles` routes.
#[cfg(feature = "server")]
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::find, handlers::create))
        .routes(routes!(handlers::find_one, handlers::update, handlers::delete))
}
