//! Stripe key rules shared by the panel and the `PUT` handler.

use crate::messages::MessageKey;
use std::fmt;

pub const TEST_PREFIX: &str = "sk_test_";
pub const LIVE_PREFIX: &str = "sk_live_";

const MASK_HEAD: usize = 12;
const MASK_TAIL: usize = 4;

/// Mode implied by the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum KeyMode {
    Test,
    Live,
}

/// First rule a candidate key failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRejection {
    /// Empty after trimming.
    Required,
    /// Not `sk_test_` or `sk_live_` prefixed.
    Format,
}

impl KeyRejection {
    #[must_use]
    pub const fn message_key(self) -> MessageKey {
        match self {
            Self::Required => MessageKey::Required,
            Self::Format => MessageKey::Format,
        }
    }
}

impl fmt::Display for KeyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_key().english())
    }
}

/// Validates a candidate key and returns it trimmed.
///
/// Rules run in order and the first failure wins: the trimmed value must be
/// non-empty, then it must carry a test or live prefix.
///
/// # Errors
/// The [`KeyRejection`] of the first failing rule.
pub fn validate_stripe_key(candidate: &str) -> Result<&str, KeyRejection> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(KeyRejection::Required);
    }
    if key_mode(trimmed).is_none() {
        return Err(KeyRejection::Format);
    }
    Ok(trimmed)
}

#[must_use]
pub fn key_mode(key: &str) -> Option<KeyMode> {
    if key.starts_with(TEST_PREFIX) {
        Some(KeyMode::Test)
    } else if key.starts_with(LIVE_PREFIX) {
        Some(KeyMode::Live)
    } else {
        None
    }
}

/// Redacted form of a key for display and logs.
///
/// Longer than 16 characters: first 12, `...`, last 4. Between 5 and 16: only
/// `...` and the last 4. Anything shorter becomes `****`.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    let tail: String = chars[len.saturating_sub(MASK_TAIL)..].iter().collect();

    if len > MASK_HEAD + MASK_TAIL {
        let head: String = chars[..MASK_HEAD].iter().collect();
        format!("{head}...{tail}")
    } else if len > MASK_TAIL {
        format!("...{tail}")
    } else {
        "****".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_failing_rule_wins() {
        assert_eq!(validate_stripe_key(""), Err(KeyRejection::Required));
        assert_eq!(validate_stripe_key("   \t"), Err(KeyRejection::Required));
        assert_eq!(validate_stripe_key("abc123"), Err(KeyRejection::Format));
        assert_eq!(validate_stripe_key("pk_test_abc"), Err(KeyRejection::Format));
        assert_eq!(validate_stripe_key("  sk_test_abc  "), Ok("sk_test_abc"));
        assert_eq!(validate_stripe_key("sk_live_abc"), Ok("sk_live_abc"));
    }

    #[test]
    fn modes() {
        assert_eq!(key_mode("sk_test_1"), Some(KeyMode::Test));
        assert_eq!(key_mode("sk_live_1"), Some(KeyMode::Live));
        assert_eq!(key_mode("sk_1"), None);
        assert_eq!(KeyMode::Live.to_string(), "live");
    }

    #[test]
    fn masks_long_keys() {
        assert_eq!(mask_key("sk_test_51HxYzAbCdEf1234"), "sk_test_51Hx...1234");
        assert_eq!(mask_key("sk_test_abcdefgh"), "...efgh");
        assert_eq!(mask_key("abcd"), "****");
        assert_eq!(mask_key(""), "****");
    }

    proptest! {
        #[test]
        fn valid_keys_are_trimmed_and_prefixed(
            live in any::<bool>(),
            body in "[A-Za-z0-9]{0,40}",
            pad in " {0,3}",
        ) {
            let prefix = if live { LIVE_PREFIX } else { TEST_PREFIX };
            let key = format!("{prefix}{body}");
            let candidate = format!("{pad}{key}{pad}");
            prop_assert_eq!(validate_stripe_key(&candidate), Ok(key.as_str()));
        }

        #[test]
        fn unprefixed_keys_are_rejected(body in "[a-z0-9_]{1,40}") {
            prop_assume!(!body.starts_with(TEST_PREFIX) && !body.starts_with(LIVE_PREFIX));
            prop_assert_eq!(validate_stripe_key(&body), Err(KeyRejection::Format));
        }

        #[test]
        fn mask_never_reveals_short_secrets(key in "\\PC{0,64}") {
            let masked = mask_key(&key);
            let len = key.chars().count();
            if len <= 4 {
                prop_assert_eq!(masked.as_str(), "****");
            } else if len <= 16 {
                prop_assert!(masked.starts_with("..."));
                prop_assert_eq!(masked.chars().count(), 7);
            } else {
                prop_assert_eq!(masked.chars().count(), 19);
                prop_assert!(masked.ends_with(&key.chars().skip(len - 4).collect::<String>()));
            }
        }
    }
}
