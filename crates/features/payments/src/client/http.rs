use super::{ApiFailure, ConfigApi};
use crate::model::PaymentConfig;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

/// Failure envelope as sent by the server; every part is optional here.
#[derive(Debug, Default, Deserialize)]
struct FailureEnvelope {
    #[serde(default)]
    error: Option<FailureBody>,
}

#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
}

/// [`ConfigApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConfigApi {
    client: Client,
    endpoint: String,
}

impl HttpConfigApi {
    /// Targets `{base_url}/{namespace}/config`.
    #[must_use]
    pub fn new(base_url: &str, namespace: &str) -> Self {
        Self::with_client(Client::new(), base_url, namespace)
    }

    /// Uses a preconfigured client, e.g. one carrying admin auth headers.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, namespace: &str) -> Self {
        let endpoint =
            format!("{}/{}/config", base_url.trim_end_matches('/'), namespace.trim_matches('/'));
        Self { client, endpoint }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn decode(response: Response) -> Result<PaymentConfig, ApiFailure> {
        let status = response.status();
        if status.is_success() {
            return response.json::<PaymentConfig>().await.map_err(|e| {
                warn!(error = %e, "Unreadable config response");
                ApiFailure::default()
            });
        }

        let envelope = response.json::<FailureEnvelope>().await.unwrap_or_default();
        let message = envelope.error.and_then(|body| body.message);
        debug!(%status, ?message, "Config request rejected");
        Err(ApiFailure { message })
    }
}

fn transport_failure(err: &reqwest::Error) -> ApiFailure {
    warn!(error = %err, "Config request failed");
    ApiFailure::default()
}

impl ConfigApi for HttpConfigApi {
    async fn fetch_config(&self) -> Result<PaymentConfig, ApiFailure> {
        let response =
            self.client.get(&self.endpoint).send().await.map_err(|e| transport_failure(&e))?;
        Self::decode(response).await
    }

    async fn save_config(&self, config: &PaymentConfig) -> Result<PaymentConfig, ApiFailure> {
        let response = self
            .client
            .put(&self.endpoint)
            .json(config)
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;
        Self::decode(response).await
    }
}
