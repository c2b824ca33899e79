//! Payment settings plugin.
//!
//! Two halves share the model, the key rules and the message catalog:
//! * `server`: `GET`/`PUT /{namespace}/config` backed by the settings store.
//! * `client`: the admin panel flow ([`client::ConfigPanel`]) that loads,
//!   validates and saves the key through a [`client::ConfigApi`].
#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
mod handlers;
pub mod messages;
pub mod model;
pub mod validation;

pub use messages::{MessageKey, Messages};
pub use model::PaymentConfig;
pub use validation::{KeyMode, KeyRejection, mask_key, validate_stripe_key};

#[cfg(feature = "server")]
use quire_database::Migration;
#[cfg(feature = "server")]
use quire_domain::config::ApiConfig;
#[cfg(feature = "server")]
use quire_domain::constants::PAYMENTS_PLUGIN;
#[cfg(feature = "server")]
use quire_kernel::domain::registry::InitializedSlice;
#[cfg(feature = "server")]
use quire_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::{router::OpenApiRouter, routes};

/// Schema migrations of the settings store.
#[cfg(feature = "server")]
pub const MIGRATIONS: &[Migration] = &[Migration::new(
    PAYMENTS_PLUGIN,
    "0001",
    include_str!("../migrations/0001_core_store.surql"),
)];

/// Payments plugin state.
#[cfg(feature = "server")]
#[quire_derive::quire_slice]
pub struct Payments {
    /// Route prefix without slashes.
    pub namespace: String,
}

/// Initialize the payments plugin.
#[cfg(feature = "server")]
#[must_use]
pub fn init(config: &ApiConfig) -> InitializedSlice {
    let namespace = normalize_namespace(&config.payments.namespace);
    tracing::info!(%namespace, "Payments slice initialized");

    InitializedSlice::new(Payments::new(PaymentsInner { namespace }))
}

/// `/{namespace}/config` routes.
#[cfg(feature = "server")]
pub fn router(namespace: &str) -> OpenApiRouter<ApiState> {
    let routes = OpenApiRouter::new()
        .routes(routes!(handlers::get_config, handlers::put_config));
    OpenApiRouter::new().nest(&format!("/{}", normalize_namespace(namespace)), routes)
}

#[cfg(feature = "server")]
fn normalize_namespace(namespace: &str) -> String {
    match namespace.trim().trim_matches('/') {
        "" => PAYMENTS_PLUGIN.to_owned(),
        ns => ns.to_owned(),
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn namespace_is_normalized() {
        assert_eq!(normalize_namespace("/billing/"), "billing");
        assert_eq!(normalize_namespace("  "), "payments");
    }
}
