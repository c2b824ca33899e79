//! Facade crate for the Quire feature slices and shared modules.
//! Re-exports domain/kernel primitives and aggregates slice initialization,
//! migrations and routes. Keep this crate thin: it composes other crates.
//!
//! ## Usage
//! - Add `quire` with the desired feature flags (`server`/`client`).
//! - On the server, pass [`migrations`] to the database builder, then call
//!   [`init`] and mount [`server::router`].

pub use quire_domain as domain;
pub use quire_kernel as kernel;

#[cfg(feature = "server")]
use quire_database::{Database, Migration};
#[cfg(feature = "server")]
use quire_domain::config::ApiConfig;
#[cfg(feature = "server")]
use quire_domain::registry::InitializedSlice;

#[cfg(feature = "server")]
pub mod server {
    use quire_kernel::server::{ApiState, system_router};
    use utoipa_axum::router::OpenApiRouter;

    /// System, content and plugin routes with their `OpenAPI` paths.
    ///
    /// The payments routes are mounted only when its slice is registered.
    pub fn router(state: &ApiState) -> OpenApiRouter<ApiState> {
        let router = system_router().merge(super::features::articles::router());

        match state.get_slice::<super::features::payments::Payments>() {
            Some(payments) => router.merge(super::features::payments::router(&payments.namespace)),
            None => router,
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use quire_articles as articles;
    pub use quire_payments as payments;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
        #[cfg(feature = "server")]
        "articles",
        #[cfg(any(feature = "server", feature = "client"))]
        "payments",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema migrations of every server slice, in apply order.
#[cfg(feature = "server")]
#[must_use]
pub fn migrations() -> Vec<Migration> {
    features::payments::MIGRATIONS.iter().chain(features::articles::MIGRATIONS).copied().collect()
}

/// Initialize all enabled features for server mode.
#[cfg(feature = "server")]
#[must_use]
pub fn init(config: &ApiConfig, database: &Database) -> Vec<InitializedSlice> {
    let mut slices = vec![features::articles::init(config, database)];

    if config.payments.enabled {
        slices.push(features::payments::init(config));
    } else {
        tracing::info!("Payments slice disabled by configuration");
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_registry() {
        assert_eq!(features::is_enabled("server"), cfg!(feature = "server"));
        assert!(!features::is_enabled("billing"));
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn disabled_payments_are_not_registered() {
        let mut config = ApiConfig::default();
        config.payments.enabled = false;
        let db = Database::builder()
            .url("mem://")
            .session("quire", "facade")
            .migrations(migrations())
            .init()
            .await
            .unwrap();

        assert_eq!(init(&config, &db).len(), 1);
        assert_eq!(init(&ApiConfig::default(), &db).len(), 2);
    }
}
