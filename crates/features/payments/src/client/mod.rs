//! Admin panel flow for the payment settings.
//!
//! [`ConfigPanel`] owns the panel state and drives a [`ConfigApi`]; feedback is
//! pushed to a [`Notifier`]. The panel is UI-agnostic: a front end renders
//! [`ConfigPanel::snapshot`] and forwards user input.

mod api;
mod http;
mod notifier;
mod panel;

pub use api::{ApiFailure, ConfigApi};
pub use http::HttpConfigApi;
pub use notifier::{ChannelNotifier, Notification, NotificationKind, Notifier};
pub use panel::{ConfigPanel, LoadOutcome, PanelSnapshot, SubmitOutcome};
