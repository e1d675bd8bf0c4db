//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Incoterms 2020 codes accepted by strict validation
pub const INCOTERMS: &[&str] = &[
    "EXW", "FCA", "CPT", "CIP", "DAP", "DPU", "DDP", "FAS", "FOB", "CFR", "CIF",
];

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject keys the record does not define
    pub reject_unknown_fields: bool,

    /// Reject incoterms outside [`INCOTERMS`]
    pub validate_incoterms: bool,
}

impl Default for ValidationConfig {
    /// Unknown keys are ignored and incoterms are free text
    fn default() -> Self {
        Self {
            reject_unknown_fields: false,
            validate_incoterms: false,
        }
    }
}

impl ValidationConfig {
    /// Create a strict configuration (all validations enabled)
    pub fn strict() -> Self {
        Self {
            reject_unknown_fields: true,
            validate_incoterms: true,
        }
    }
}
