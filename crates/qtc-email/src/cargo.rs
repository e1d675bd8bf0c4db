//! Numeric extraction from free-text cargo details

use crate::error::EmailError;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::warn;

/// Divisor of the volumetric weight formula, cm³ per kg
const VOLUMETRIC_DIVISOR: f64 = 6000.0;

/// Values recovered from a cargo description
///
/// Every field is a string and stays empty when its pattern does not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CargoDetails {
    /// Length in cm
    pub length: String,
    /// Width in cm
    pub width: String,
    /// Height in cm
    pub height: String,
    /// Number of pallets or packages
    pub num_packages: String,
    /// `l * w * h / 6000`, two decimals
    pub volume_weight: String,
    /// Stated weight
    pub gross_weight: String,
}

struct CargoPatterns {
    dimensions: Regex,
    packages: Regex,
    weight: Regex,
}

impl CargoPatterns {
    fn new() -> Result<Self, EmailError> {
        Ok(Self {
            dimensions: Regex::new(r"(\d+)\s*[xX×]\s*(\d+)\s*[xX×]\s*(\d+)\s*cm")?,
            packages: Regex::new(r"(?i)(?:No of Pallet|packages?)\s*:?\s*(\d+)")?,
            weight: Regex::new(r"(?i)(?:Total Weight|Weight)\s*:?\s*(\d+(?:\.\d+)?)")?,
        })
    }
}

static PATTERNS: LazyLock<Result<CargoPatterns, EmailError>> = LazyLock::new(CargoPatterns::new);

/// Extract dimensions, package count and weight from a cargo description
///
/// The three patterns are matched independently. Only the `cm` suffix of the
/// dimension triple is case-sensitive.
///
/// # Examples
///
/// ```
/// use qtc_email::extract_cargo_details;
///
/// let details = extract_cargo_details("2 pallets, 120 x 80 x 100 cm, Total Weight: 450.5 kg");
/// assert_eq!(details.length, "120");
/// assert_eq!(details.volume_weight, "160.00");
/// assert_eq!(details.gross_weight, "450.5");
/// ```
pub fn extract_cargo_details(details: &str) -> CargoDetails {
    let mut result = CargoDetails::default();
    if details.is_empty() {
        return result;
    }

    let patterns = match PATTERNS.as_ref() {
        Ok(patterns) => patterns,
        Err(e) => {
            warn!("Cargo patterns unavailable: {}", e);
            return result;
        }
    };

    if let Some(caps) = patterns.dimensions.captures(details) {
        result.length = caps[1].to_string();
        result.width = caps[2].to_string();
        result.height = caps[3].to_string();
        result.volume_weight = volume_weight(&result.length, &result.width, &result.height)
            .map(|v| format!("{:.2}", v))
            .unwrap_or_default();
    }

    if let Some(caps) = patterns.packages.captures(details) {
        result.num_packages = caps[1].to_string();
    }

    if let Some(caps) = patterns.weight.captures(details) {
        result.gross_weight = caps[1].to_string();
    }

    result
}

fn volume_weight(length: &str, width: &str, height: &str) -> Option<f64> {
    let l: f64 = length.parse().ok()?;
    let w: f64 = width.parse().ok()?;
    let h: f64 = height.parse().ok()?;
    Some(l * w * h / VOLUMETRIC_DIVISOR)
}
