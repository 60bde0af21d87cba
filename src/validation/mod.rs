//! Form validation. Each schema turns a raw form into a typed command or a
//! set of field-keyed messages, before anything reaches the stores.

mod auth;
mod catalog;
mod order;

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub use auth::*;
pub use catalog::*;
pub use order::*;

/// A submitted form, as decoded from `application/x-www-form-urlencoded`.
pub type FormData = HashMap<String, String>;

/// Field name to the first message raised for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Records `message` unless the field already has one.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Trimmed field value, empty when absent.
pub(crate) fn text<'a>(form: &'a FormData, field: &str) -> &'a str {
    form.get(field).map(|v| v.trim()).unwrap_or("")
}

pub(crate) fn optional_text(form: &FormData, field: &str) -> Option<String> {
    Some(text(form, field)).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Requires at least `min` characters, recording `message` otherwise.
pub(crate) fn min_len(errors: &mut FieldErrors, form: &FormData, field: &str, min: usize, message: &str) -> String {
    let value = text(form, field);
    if value.chars().count() < min {
        errors.add(field, message);
    }
    value.to_string()
}

/// Keeps post-login redirects on this site: only local absolute paths pass.
///
/// Browsers drop tabs and newlines inside a `Location`, so `/\t/host` would
/// become `//host`. Anything outside visible ASCII falls back to `/`.
pub fn safe_redirect(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

#[cfg(test)]
pub(crate) fn form(pairs: &[(&str, &str)]) -> FormData {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::default();
        errors.add("email", "Invalid email");
        errors.add("email", "Something else");
        assert_eq!(errors.get("email"), Some("Invalid email"));
        assert_eq!(serde_json::to_value(&errors).unwrap(), serde_json::json!({"email": "Invalid email"}));
    }

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/orders")), "/orders");
        assert_eq!(safe_redirect(Some("/product/milk?x=1")), "/product/milk?x=1");
        assert_eq!(safe_redirect(Some("//evil.example")), "/");
        assert_eq!(safe_redirect(Some("https://evil.example")), "/");
        assert_eq!(safe_redirect(Some("/\\evil.example")), "/");
        assert_eq!(safe_redirect(None), "/");
    }

    #[test]
    fn test_safe_redirect_rejects_invisible_characters() {
        assert_eq!(safe_redirect(Some("/\t/evil.example")), "/");
        assert_eq!(safe_redirect(Some("/orders\nX-Injected: 1")), "/");
        assert_eq!(safe_redirect(Some("/orders\r\nSet-Cookie: a=b")), "/");
        assert_eq!(safe_redirect(Some("/a b")), "/");
        assert_eq!(safe_redirect(Some("/caf\u{e9}")), "/");
        assert_eq!(safe_redirect(Some(" /orders ")), "/orders");
    }
}
