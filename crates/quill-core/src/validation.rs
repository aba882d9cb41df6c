//! Configuration-driven form validation.
//!
//! A form is a mapping from field name to a rule; validating submitted input
//! yields either the cleaned values or a field -> error-messages mapping.
//! Validation failure is not an HTTP error: handlers re-render the same view
//! with the errors attached.

use std::collections::BTreeMap;

/// Per-field validation errors, keyed by field name.
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Cleaned, trimmed field values. Optional fields that were absent are
/// present with an empty value.
pub type CleanedData = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

/// Validation rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
}

impl FieldRule {
    pub fn text() -> Self {
        Self {
            kind: FieldKind::Text,
            required: false,
            max_length: None,
        }
    }

    pub fn email() -> Self {
        Self {
            kind: FieldKind::Email,
            required: false,
            max_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn max_length(mut self, limit: usize) -> Self {
        self.max_length = Some(limit);
        self
    }
}

/// Ordered set of field rules making up one form.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<(String, FieldRule)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rule: FieldRule) -> Self {
        self.fields.push((name.to_string(), rule));
        self
    }

    /// Field names in declaration order, for rendering an empty form.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Validate submitted input against this schema.
    pub fn validate(&self, input: &BTreeMap<String, String>) -> Result<CleanedData, FormErrors> {
        let mut cleaned = CleanedData::new();
        let mut errors = FormErrors::new();

        for (name, rule) in &self.fields {
            let value = input.get(name).map(|v| v.trim()).unwrap_or("");

            if value.is_empty() {
                if rule.required {
                    errors
                        .entry(name.clone())
                        .or_default()
                        .push("This field is required.".to_string());
                } else {
                    cleaned.insert(name.clone(), String::new());
                }
                continue;
            }

            let mut field_errors = Vec::new();

            if let Some(limit) = rule.max_length {
                if value.chars().count() > limit {
                    field_errors.push(format!(
                        "Ensure this value has at most {limit} characters."
                    ));
                }
            }

            if rule.kind == FieldKind::Email && !looks_like_email(value) {
                field_errors.push("Enter a valid email address.".to_string());
            }

            if field_errors.is_empty() {
                cleaned.insert(name.clone(), value.to_string());
            } else {
                errors.insert(name.clone(), field_errors);
            }
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// Fields for sharing a post by email: sender name and address, recipient
/// address, and an optional note.
pub fn share_form() -> FormSchema {
    FormSchema::new()
        .field("name", FieldRule::text().required().max_length(80))
        .field("email", FieldRule::email().required())
        .field("to", FieldRule::email().required())
        .field("comments", FieldRule::text())
}

/// Fields for submitting a comment.
pub fn comment_form() -> FormSchema {
    FormSchema::new()
        .field("name", FieldRule::text().required().max_length(80))
        .field("email", FieldRule::email().required())
        .field("body", FieldRule::text().required())
}
