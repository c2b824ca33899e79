use super::{ApiFailure, ConfigApi, Notification, Notifier};
use crate::messages::{MessageKey, Messages};
use crate::model::PaymentConfig;
use crate::validation::{KeyRejection, mask_key, validate_stripe_key};
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct PanelState {
    current_edit_value: String,
    last_saved_value: Option<String>,
    is_loading: bool,
    is_saving: bool,
    error_message: Option<String>,
    load_started: bool,
}

impl PanelState {
    fn has_unsaved_changes(&self) -> bool {
        self.current_edit_value != self.last_saved_value.as_deref().unwrap_or_default()
    }

    fn can_save(&self) -> bool {
        self.has_unsaved_changes() && !self.is_saving && !self.is_loading
    }
}

/// Point-in-time view of the panel, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub current_edit_value: String,
    pub last_saved_value: Option<String>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub error_message: Option<String>,
    pub has_unsaved_changes: bool,
    pub can_save: bool,
    /// Redacted saved key, once loading has completed.
    pub masked_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// The panel already loaded once.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Rejected locally; nothing was sent.
    Invalid(KeyRejection),
    Failed,
    /// A load or another submit is still in flight; nothing was sent.
    Busy,
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Loading,
    Saving,
}

impl Flag {
    const fn slot(self, state: &mut PanelState) -> &mut bool {
        match self {
            Self::Loading => &mut state.is_loading,
            Self::Saving => &mut state.is_saving,
        }
    }
}

/// Lowers a busy flag when dropped, on every exit path.
struct LowerOnDrop<'a> {
    state: &'a Mutex<PanelState>,
    flag: Flag,
}

impl Drop for LowerOnDrop<'_> {
    fn drop(&mut self) {
        *self.flag.slot(&mut self.state.lock()) = false;
    }
}

/// Load/validate/save flow of the payment settings panel.
///
/// Methods take `&self`; share one panel between UI handles with an `Arc`.
/// The state lock is never held across a request.
pub struct ConfigPanel<A, N> {
    api: A,
    notifier: N,
    messages: Messages,
    state: Mutex<PanelState>,
}

impl<A, N> fmt::Debug for ConfigPanel<A, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ConfigPanel")
            .field("is_loading", &state.is_loading)
            .field("is_saving", &state.is_saving)
            .field("has_saved_value", &state.last_saved_value.is_some())
            .finish_non_exhaustive()
    }
}

impl<A, N> ConfigPanel<A, N>
where
    A: ConfigApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier, messages: Messages::default(), state: Mutex::default() }
    }

    /// Replaces the English texts.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Loads the stored config. Only the first call does anything.
    #[instrument(skip_all)]
    pub async fn load(&self) -> LoadOutcome {
        {
            let mut state = self.state.lock();
            if state.load_started {
                return LoadOutcome::Skipped;
            }
            state.load_started = true;
            state.is_loading = true;
            state.error_message = None;
        }

        let (outcome, notification) = {
            let _loading = LowerOnDrop { state: &self.state, flag: Flag::Loading };
            let result = self.api.fetch_config().await;
            self.apply_load(result)
        };

        if let Some(notification) = notification {
            self.notifier.notify(notification);
        }
        outcome
    }

    /// Validates `candidate` and saves it trimmed.
    ///
    /// `candidate` becomes the edit buffer. Validation failures never reach
    /// the network; a submit while a load or another submit is in flight
    /// returns [`SubmitOutcome::Busy`] without side effects, so a late load
    /// reply can never overwrite a saved key.
    #[instrument(skip_all)]
    pub async fn submit(&self, candidate: &str) -> SubmitOutcome {
        let key = {
            let mut state = self.state.lock();
            if state.is_saving || state.is_loading {
                return SubmitOutcome::Busy;
            }
            state.current_edit_value = candidate.to_owned();

            match validate_stripe_key(candidate) {
                Ok(key) => {
                    state.is_saving = true;
                    state.error_message = None;
                    key.to_owned()
                },
                Err(rejection) => {
                    let message = self.messages.get(rejection.message_key()).to_owned();
                    state.error_message = Some(message.clone());
                    drop(state);

                    debug!(?rejection, "Stripe key rejected locally");
                    self.notifier.notify(Notification::warning(message));
                    return SubmitOutcome::Invalid(rejection);
                },
            }
        };

        let (outcome, notification) = {
            let _saving = LowerOnDrop { state: &self.state, flag: Flag::Saving };
            let result = self.api.save_config(&PaymentConfig::new(key.clone())).await;
            self.apply_save(result, key)
        };

        self.notifier.notify(notification);
        outcome
    }

    /// Replaces the edit buffer with user input.
    pub fn set_value(&self, value: impl Into<String>) {
        self.state.lock().current_edit_value = value.into();
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.state.lock().has_unsaved_changes()
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.state.lock().can_save()
    }

    /// The saved key redacted for display; `None` while loading or when unset.
    #[must_use]
    pub fn masked_key(&self) -> Option<String> {
        let state = self.state.lock();
        masked(&state)
    }

    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        let state = self.state.lock();
        PanelSnapshot {
            current_edit_value: state.current_edit_value.clone(),
            last_saved_value: state.last_saved_value.clone(),
            is_loading: state.is_loading,
            is_saving: state.is_saving,
            error_message: state.error_message.clone(),
            has_unsaved_changes: state.has_unsaved_changes(),
            can_save: state.can_save(),
            masked_key: masked(&state),
        }
    }

    fn apply_load(
        &self,
        result: Result<PaymentConfig, ApiFailure>,
    ) -> (LoadOutcome, Option<Notification>) {
        let mut state = self.state.lock();
        match result {
            Ok(config) => {
                if let Some(key) = config.stripe_key.filter(|key| !key.is_empty()) {
                    debug!(stripe_key = %mask_key(&key), "Payment settings loaded");
                    state.current_edit_value.clone_from(&key);
                    state.last_saved_value = Some(key);
                }
                (LoadOutcome::Loaded, None)
            },
            Err(failure) => {
                let message = self.failure_message(failure, MessageKey::LoadError);
                state.error_message = Some(message.clone());
                (LoadOutcome::Failed, Some(Notification::warning(message)))
            },
        }
    }

    fn apply_save(
        &self,
        result: Result<PaymentConfig, ApiFailure>,
        key: String,
    ) -> (SubmitOutcome, Notification) {
        let mut state = self.state.lock();
        match result {
            Ok(_) => {
                debug!(stripe_key = %mask_key(&key), "Payment settings saved");
                state.current_edit_value.clone_from(&key);
                state.last_saved_value = Some(key);
                let message = self.messages.get(MessageKey::SaveSuccess);
                (SubmitOutcome::Saved, Notification::success(message))
            },
            Err(failure) => {
                let message = self.failure_message(failure, MessageKey::SaveError);
                state.error_message = Some(message.clone());
                (SubmitOutcome::Failed, Notification::warning(message))
            },
        }
    }

    fn failure_message(&self, failure: ApiFailure, fallback: MessageKey) -> String {
        failure
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| self.messages.get(fallback).to_owned())
    }
}

fn masked(state: &PanelState) -> Option<String> {
    if state.is_loading {
        return None;
    }
    state.last_saved_value.as_deref().map(mask_key)
}
