use crate::model::PaymentConfig;
use std::future::Future;

/// A failed config request.
///
/// `message` carries the server's `error.message` when the response had one;
/// transport failures and unreadable bodies leave it empty. The panel treats a
/// message that is empty or only whitespace like a missing one and shows its
/// own `load.error`/`save.error` text instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("config request failed"))]
pub struct ApiFailure {
    pub message: Option<String>,
}

impl ApiFailure {
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }
}

/// Transport used by the panel to reach `/{namespace}/config`.
pub trait ConfigApi: Send + Sync {
    /// `GET /{namespace}/config`
    fn fetch_config(&self) -> impl Future<Output = Result<PaymentConfig, ApiFailure>> + Send;

    /// `PUT /{namespace}/config`
    fn save_config(
        &self,
        config: &PaymentConfig,
    ) -> impl Future<Output = Result<PaymentConfig, ApiFailure>> + Send;
}
