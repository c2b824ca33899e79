use crate::model::PaymentConfig;
use crate::validation::{key_mode, mask_key, validate_stripe_key};
use axum::Json;
use axum::extract::State;
use quire_derive::api_handler;
use quire_domain::constants::{PAYMENTS_PLUGIN, PAYMENTS_TAG};
use quire_kernel::server::{ApiError, ErrorEnvelope};
use quire_kernel::store::SettingsStore;
use tracing::info;

/// Settings store key of the plugin config.
pub(crate) const CONFIG_KEY: &str = "config";

#[api_handler(
    get,
    path = "/config",
    responses(
        (status = OK, description = "Current payment settings", body = PaymentConfig),
        (status = INTERNAL_SERVER_ERROR, description = "Settings store unavailable", body = ErrorEnvelope),
    ),
    tag = PAYMENTS_TAG,
)]
pub(crate) async fn get_config(
    State(store): State<SettingsStore>,
) -> Result<Json<PaymentConfig>, ApiError> {
    let config = store.get::<PaymentConfig>(PAYMENTS_PLUGIN, CONFIG_KEY).await?;
    Ok(Json(config.unwrap_or_default()))
}

#[api_handler(
    put,
    path = "/config",
    request_body = PaymentConfig,
    responses(
        (status = OK, description = "Saved payment settings", body = PaymentConfig),
        (status = BAD_REQUEST, description = "Missing or malformed key", body = ErrorEnvelope),
        (status = INTERNAL_SERVER_ERROR, description = "Settings store unavailable", body = ErrorEnvelope),
    ),
    tag = PAYMENTS_TAG,
)]
pub(crate) async fn put_config(
    State(store): State<SettingsStore>,
    Json(body): Json<PaymentConfig>,
) -> Result<Json<PaymentConfig>, ApiError> {
    let key = validate_stripe_key(body.stripe_key.as_deref().unwrap_or_default())
        .map_err(|rejection| ApiError::validation(rejection.to_string()))?;

    let config = PaymentConfig::new(key);
    store.set(PAYMENTS_PLUGIN, CONFIG_KEY, &config).await?;

    info!(
        stripe_key = %mask_key(key),
        mode = ?key_mode(key),
        "Payment settings saved"
    );
    Ok(Json(config))
}
