//! Validation failure types

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// What is wrong with one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Required key is absent
    Missing,

    /// Value has the wrong JSON type
    WrongType {
        /// Expected type description
        expected: &'static str,
        /// JSON type found
        found: &'static str,
    },

    /// String outside the field's enumeration
    NotInEnumeration {
        /// Value found
        value: String,
        /// Accepted values
        allowed: &'static [&'static str],
    },

    /// Container quantity is negative, fractional or too large
    InvalidQuantity {
        /// Value found, as JSON
        value: String,
    },

    /// Key not defined by the record
    UnknownField,

    /// Incoterms code not in the known list
    UnknownIncoterm {
        /// Value found
        value: String,
    },

    /// Final typed conversion failed
    Deserialize {
        /// serde message
        message: String,
    },
}

/// A problem with one field of a candidate record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// JSON path of the field, e.g. `containers[1].quantity`; `$` is the root
    pub field: String,

    /// The problem
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Create a field error
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{}: field required", self.field),
            FieldErrorKind::WrongType { expected, found } => {
                write!(f, "{}: expected {}, found {}", self.field, expected, found)
            }
            FieldErrorKind::NotInEnumeration { value, allowed } => write!(
                f,
                "{}: '{}' is not one of {}",
                self.field,
                value,
                allowed.join(", ")
            ),
            FieldErrorKind::InvalidQuantity { value } => {
                write!(f, "{}: {} is not a non-negative integer", self.field, value)
            }
            FieldErrorKind::UnknownField => write!(f, "{}: unknown field", self.field),
            FieldErrorKind::UnknownIncoterm { value } => {
                write!(f, "{}: '{}' is not a known Incoterms code", self.field, value)
            }
            FieldErrorKind::Deserialize { message } => write!(f, "{}: {}", self.field, message),
        }
    }
}

/// A candidate record rejected by the gatekeeper
#[derive(Error, Debug, Clone)]
#[error("{} validation error(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationFailure {
    /// Every field-level problem found
    pub errors: Vec<FieldError>,

    /// The rejected candidate, unmodified
    pub raw: Value,
}

impl ValidationFailure {
    /// Whether a given field has an error
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Names of required fields that were absent
    pub fn missing_fields(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.kind == FieldErrorKind::Missing)
            .map(|e| e.field.as_str())
            .collect()
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
