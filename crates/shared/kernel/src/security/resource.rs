use std::borrow::Cow;

#[quire_derive::quire_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Utilities for safe resource handling and ID validation.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a record identifier taken from a request path and returns its key.
    ///
    /// Accepts either the bare key (`"V3kq9xRt2hPa"`) or the full record ID
    /// (`"article:V3kq9xRt2hPa"`). An ID pointing at another table is rejected,
    /// so a `core_store` record cannot be reached through the article routes.
    ///
    /// # Errors
    /// Returns an error on a table mismatch, or when the key is empty or
    /// contains characters outside `[A-Za-z0-9_-]`.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref().trim();
        let table_ref = expected_table.as_ref();

        let key = match id_ref.split_once(':') {
            Some((table, _)) if table != table_ref => {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            },
            Some((_, key)) => key,
            None => id_ref,
        };

        if key.is_empty()
            || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ResourceGuardError::Validation {
                message: format!("Malformed record key '{key}'").into(),
                context: Some(table_ref.to_owned().into()),
            });
        }

        Ok(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_verification() {
        assert_eq!(ResourceGuard::verify("article:123", "article").unwrap(), "123");
        assert_eq!(ResourceGuard::verify("123", "article").unwrap(), "123");

        // Foreign table
        assert!(ResourceGuard::verify("core_store:plugin_payments_config", "article").is_err());
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(ResourceGuard::verify("", "article").is_err());
        assert!(ResourceGuard::verify("article:", "article").is_err());
        assert!(ResourceGuard::verify("a b", "article").is_err());
        assert!(ResourceGuard::verify("x;DELETE", "article").is_err());
    }
}
