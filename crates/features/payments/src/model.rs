use quire_derive::api_model;

/// Payment provider settings stored by the plugin.
///
/// On the wire: `{ "stripeKey": "sk_test_..." }` or `{ "stripeKey": null }`.
#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentConfig {
    /// Secret API key, `sk_test_` or `sk_live_` prefixed.
    #[serde(default)]
    pub stripe_key: Option<String>,
}

impl PaymentConfig {
    #[must_use]
    pub fn new(stripe_key: impl Into<String>) -> Self {
        Self { stripe_key: Some(stripe_key.into()) }
    }
}
