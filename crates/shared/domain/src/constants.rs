//! Identifiers shared between slices, the router and the OpenAPI document.

/// `OpenAPI` tag for platform endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for article endpoints.
pub const ARTICLE_TAG: &str = "Article";
/// `OpenAPI` tag for the payment settings plugin.
pub const PAYMENTS_TAG: &str = "Payments";

/// Prefix of the content API routes.
pub const CONTENT_API_PREFIX: &str = "/api";

/// Content type UID of articles.
pub const ARTICLE_UID: &str = "api::article.article";
/// Storage table of articles.
pub const ARTICLE: &str = "article";

/// Plugin name of the payment settings panel.
pub const PAYMENTS_PLUGIN: &str = "payments";
/// Settings store table.
pub const CORE_STORE: &str = "core_store";
/// Schema migrations bookkeeping table.
pub const MIGRATION: &str = "migration";
