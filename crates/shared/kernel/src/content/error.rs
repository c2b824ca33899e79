use quire_database::surrealdb;
use std::borrow::Cow;

#[quire_derive::quire_error]
pub enum ContentError {
    /// Bad query options, identifiers or attributes.
    #[error("Content validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Entry not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Content query failed{}: {source}", format_context(.context))]
    Query { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Content serialization failed{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal content error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
