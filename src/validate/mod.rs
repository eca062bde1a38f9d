//! Field-constraint schemas evaluated against drafts before they reach a slice
//! or the backend.

mod schemas;

use serde_json::{json, Value};

use crate::i18n::{self, Locale};

pub use schemas::LoginForm;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub code: &'static str,
    pub args: Vec<(&'static str, String)>,
}

impl FieldError {
    pub fn message(&self, locale: Locale) -> String {
        i18n::render(locale, &format!("validation.{}", self.code), &self.args)
    }

    pub fn to_json(&self, locale: Locale) -> Value {
        json!({
            "field": self.field,
            "code": self.code,
            "message": self.message(locale),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("validation failed: {}", summary(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.code))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }

    #[cfg(test)]
    pub fn has(&self, field: &str, code: &str) -> bool {
        self.0.iter().any(|e| e.field == field && e.code == code)
    }

    pub fn to_json(&self, locale: Locale) -> Value {
        Value::Array(self.0.iter().map(|e| e.to_json(locale)).collect())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulates field errors; one schema builds one of these and finishes it.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
    prefix: String,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        }
    }

    pub fn fail(&mut self, field: &str, code: &'static str, args: Vec<(&'static str, String)>) {
        let field = self.path(field);
        self.errors.push(FieldError { field, code, args });
    }

    /// Runs `f` with every field reported under `prefix.`.
    pub fn nested(&mut self, prefix: &str, f: impl FnOnce(&mut Checks)) {
        let next = self.path(prefix);
        let saved = std::mem::replace(&mut self.prefix, next);
        f(self);
        self.prefix = saved;
    }

    pub fn required(&mut self, field: &str, value: &str, max_chars: usize) -> &mut Self {
        let v = value.trim();
        if v.is_empty() {
            self.fail(field, "required", vec![]);
        } else {
            self.max_len(field, v, max_chars);
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max_chars: usize) -> &mut Self {
        if value.chars().count() > max_chars {
            self.fail(field, "tooLong", vec![("max", max_chars.to_string())]);
        }
        self
    }

    pub fn min_len(&mut self, field: &str, value: &str, min_chars: usize) -> &mut Self {
        if value.chars().count() < min_chars {
            self.fail(field, "tooShort", vec![("min", min_chars.to_string())]);
        }
        self
    }

    pub fn optional_max_len(
        &mut self,
        field: &str,
        value: Option<&str>,
        max_chars: usize,
    ) -> &mut Self {
        if let Some(v) = value {
            self.max_len(field, v, max_chars);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !looks_like_email(value.trim()) {
            self.fail(field, "invalidEmail", vec![]);
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value < 0.0 {
            self.fail(field, "negative", vec![]);
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value <= 0.0 {
            self.fail(field, "notPositive", vec![]);
        }
        self
    }

    pub fn range(&mut self, field: &str, value: usize, min: usize, max: usize) -> &mut Self {
        if value < min || value > max {
            self.fail(
                field,
                "outOfRange",
                vec![("min", min.to_string()), ("max", max.to_string())],
            );
        }
        self
    }

    pub fn distinct(&mut self, field: &str, values: &[String]) -> &mut Self {
        let mut seen = std::collections::HashSet::new();
        if !values.iter().all(|v| seen.insert(v)) {
            self.fail(field, "duplicate", vec![]);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || s.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a.b@school.ma"));
        assert!(!looks_like_email("a.b@school"));
        assert!(!looks_like_email("@school.ma"));
        assert!(!looks_like_email("a b@school.ma"));
        assert!(!looks_like_email("a@b@school.ma"));
    }

    #[test]
    fn nested_fields_are_prefixed() {
        let mut c = Checks::new();
        c.nested("entries[2]", |c| {
            c.non_negative("value", -1.0);
        });
        c.required("title", "  ", 10);
        let err = c.finish().expect_err("two failures");
        assert!(err.has("entries[2].value", "negative"));
        assert!(err.has("title", "required"));
    }

    #[test]
    fn messages_are_localized_with_args() {
        let mut c = Checks::new();
        c.required("name", &"x".repeat(5), 3);
        let err = c.finish().expect_err("too long");
        assert_eq!(err.0[0].message(Locale::En), "Must be at most 3 characters");
        assert_eq!(
            err.0[0].message(Locale::Fr),
            "Doit contenir au plus 3 caractères"
        );
    }
}
