#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros used across the Quire workspace: error enums with context
//! support, API data models and handlers, feature slice handles, and the
//! runtime bootstrap for binaries.
//!
//! The generated code refers to downstream crates by absolute path
//! (`::thiserror`, `::serde`, `::utoipa`, `::quire_kernel`, `::quire_runtime`),
//! so consumers must depend on the crates a macro expands into.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a blocking `fn main` running on a tuned Tokio runtime.
///
/// # Arguments
///
/// * `high_performance` - server profile (bigger stacks, longer keep-alive).
/// * `memory_efficient` - half the workers, smaller stacks.
/// * `default` or nothing - auto-detected worker count.
///
/// The function must return a `Result`.
///
/// ```rust,ignore
/// #[quire_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a DTO exchanged over the HTTP API.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when they are not derived yet,
/// `utoipa::ToSchema` when the consuming crate is built with its `server` feature,
/// `#[serde(rename_all = "camelCase")]` and `#[serde(deny_unknown_fields)]`.
///
/// Both serde policies can be overridden:
///
/// ```rust,ignore
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct Pagination {
///     pub page: u32,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Documents an Axum handler with `utoipa::path` when the `server` feature is on.
///
/// Arguments are forwarded verbatim to `utoipa::path`.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)))]
/// pub async fn health_handler() -> Json<HealthResponse> { .. }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines a crate error enum with context propagation.
///
/// Every variant must use named fields. A variant that wraps another error
/// (a field called `source`, or marked `#[source]`/`#[from]`) must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// Generated items:
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<Name>Ext` trait with `.context(..)` on `Result<T, Name>` and on
///   `Result<T, Source>` for every wrapped source type.
/// * `From<Source>` for every wrapping variant.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, .. }` variant exists.
/// * A private `format_context` helper used inside `#[error(..)]` strings,
///   so only one `quire_error` enum may live in a module.
///
/// ```rust,ignore
/// #[quire_derive::quire_error]
/// pub enum StoreError {
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database { source: DatabaseError, context: Option<Cow<'static, str>> },
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn quire_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Wraps a feature state struct into a cheap-to-clone slice handle.
///
/// `#[quire_slice] pub struct Articles { .. }` produces `ArticlesInner` with the
/// declared fields, an `Articles` handle holding `Arc<ArticlesInner>`, `Deref`
/// to the inner state and the `FeatureSlice` registration impl.
///
/// ```rust,ignore
/// #[quire_derive::quire_slice]
/// pub struct Articles {
///     pub service: ContentService<Article>,
/// }
///
/// let slice = Articles::new(ArticlesInner { service });
/// ```
#[proc_macro_attribute]
pub fn quire_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
