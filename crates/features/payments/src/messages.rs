//! User-facing texts of the settings panel.
//!
//! Every [`MessageKey`] has an English default. Hosts supply translations
//! per locale through [`Messages::with_overrides`] or, from an untyped
//! catalog, [`Messages::from_catalog`].

use fxhash::FxHashMap;
use std::borrow::Cow;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Localization identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
)]
pub enum MessageKey {
    #[strum(serialize = "required")]
    Required,
    #[strum(serialize = "format")]
    Format,
    #[strum(serialize = "load.error")]
    LoadError,
    #[strum(serialize = "save.error")]
    SaveError,
    #[strum(serialize = "save.success")]
    SaveSuccess,
}

impl MessageKey {
    #[must_use]
    pub const fn english(self) -> &'static str {
        match self {
            Self::Required => "Stripe key is required",
            Self::Format => "Stripe key must start with sk_test_ or sk_live_",
            Self::LoadError => "Failed to load payment settings",
            Self::SaveError => "Failed to save payment settings",
            Self::SaveSuccess => "Payment settings saved",
        }
    }
}

/// Message catalog of one locale.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: FxHashMap<MessageKey, Cow<'static, str>>,
}

impl Messages {
    #[must_use]
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (MessageKey, S)>,
        S: Into<Cow<'static, str>>,
    {
        self.overrides.extend(overrides.into_iter().map(|(key, text)| (key, text.into())));
        self
    }

    /// Builds a catalog from `identifier -> text` pairs, e.g. a locale file
    /// already parsed by the host.
    ///
    /// # Errors
    /// Returns the first identifier that is not a [`MessageKey`].
    pub fn from_catalog<'a, I>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let overrides = entries
            .into_iter()
            .map(|(id, text)| MessageKey::from_str(id).map(|key| (key, text)).map_err(|_| id.to_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::default().with_overrides(overrides))
    }

    #[must_use]
    pub fn get(&self, key: MessageKey) -> &str {
        self.overrides.get(&key).map_or_else(|| key.english(), |text| &**text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn identifiers_match_catalog_names() {
        let ids: Vec<String> = MessageKey::iter().map(|k| k.to_string()).collect();
        assert_eq!(ids, ["required", "format", "load.error", "save.error", "save.success"]);
        assert_eq!(MessageKey::from_str("save.error").unwrap(), MessageKey::SaveError);
    }

    #[test]
    fn overrides_replace_defaults() {
        let messages = Messages::default().with_overrides([(MessageKey::Required, "Requis")]);
        assert_eq!(messages.get(MessageKey::Required), "Requis");
        assert_eq!(messages.get(MessageKey::Format), MessageKey::Format.english());
    }

    #[test]
    fn catalog_rejects_unknown_ids() {
        let ok = Messages::from_catalog([("load.error", "Laden fehlgeschlagen".to_owned())]).unwrap();
        assert_eq!(ok.get(MessageKey::LoadError), "Laden fehlgeschlagen");

        let err = Messages::from_catalog([("save.oops", String::new())]).unwrap_err();
        assert_eq!(err, "save.oops");
    }
}
