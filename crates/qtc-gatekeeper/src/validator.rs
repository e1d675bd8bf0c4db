//! Candidate record validation logic

use crate::error::{FieldError, FieldErrorKind, ValidationFailure};
use crate::{ValidationConfig, INCOTERMS};
use qtc_domain::{FreightQuoteRecord, InquiryType, OceanType, Product, HIL_SENTINEL};
use serde_json::{Map, Number, Value};
use tracing::{debug, error, info};

const CONTAINER_FIELDS: &[&str] = &["container_type", "quantity", "gross_weight_per_container"];

/// The Gatekeeper validates extractor output before automation
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a candidate record
    ///
    /// A sentinel in a mandatory field is valid. On failure the field errors
    /// and the raw candidate are logged and returned; nothing is forwarded.
    pub fn validate(&self, candidate: &Value) -> Result<FreightQuoteRecord, ValidationFailure> {
        let errors = match candidate.as_object() {
            Some(object) => self.check_record(object),
            None => vec![FieldError::new(
                "$",
                FieldErrorKind::WrongType {
                    expected: "object",
                    found: json_type(candidate),
                },
            )],
        };

        let result = if errors.is_empty() {
            serde_json::from_value::<FreightQuoteRecord>(normalized(candidate)).map_err(|e| {
                vec![FieldError::new(
                    "$",
                    FieldErrorKind::Deserialize {
                        message: e.to_string(),
                    },
                )]
            })
        } else {
            Err(errors)
        };

        match result {
            Ok(record) => {
                info!("Data validated for client '{}'", record.client_name);
                let review = record.fields_needing_review();
                if !review.is_empty() {
                    info!("Fields needing human review: {}", review.join(", "));
                }
                Ok(record)
            }
            Err(errors) => {
                let failure = ValidationFailure {
                    errors,
                    raw: candidate.clone(),
                };
                error!("Data validation failed: {}", failure);
                error!("AI Output: {}", candidate);
                Err(failure)
            }
        }
    }

    fn check_record(&self, record: &Map<String, Value>) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in FreightQuoteRecord::REQUIRED_FIELDS {
            if !record.contains_key(*field) {
                errors.push(FieldError::new(*field, FieldErrorKind::Missing));
            }
        }

        if self.config.reject_unknown_fields {
            unknown_fields(record, FreightQuoteRecord::ALL_FIELDS, "", &mut errors);
        }

        for (key, value) in record {
            let mut check = FieldCheck {
                field: key,
                value,
                errors: &mut errors,
            };
            match key.as_str() {
                "inquiry_type" => check.enumeration(InquiryType::ALL),
                "product" => check.enumeration(Product::ALL),
                "ocean_type" => check.nullable(|c| c.enumeration(OceanType::ALL)),
                "client_name" | "port_of_loading" | "port_of_discharge" | "commodity" => check.string(),
                "movement_type" => check.nullable(FieldCheck::string),
                "incoterms" => {
                    check.string();
                    if self.config.validate_incoterms {
                        check_incoterm(value, &mut errors);
                    }
                }
                "freetime_requirement" => check_freetime(value, &mut errors),
                "dangerous_goods" => check.boolean(),
                "containers" => self.check_containers(value, &mut errors),
                _ => debug!("Ignoring unknown field '{}'", key),
            }
        }

        errors
    }

    fn check_containers(&self, value: &Value, errors: &mut Vec<FieldError>) {
        let Some(items) = value.as_array() else {
            errors.push(wrong_type("containers", "array", value));
            return;
        };

        for (index, item) in items.iter().enumerate() {
            let path = format!("containers[{}]", index);
            let Some(line) = item.as_object() else {
                errors.push(wrong_type(path, "object", item));
                continue;
            };

            if self.config.reject_unknown_fields {
                unknown_fields(line, CONTAINER_FIELDS, &path, errors);
            }

            match line.get("container_type") {
                Some(value) => FieldCheck {
                    field: &format!("{}.container_type", path),
                    value,
                    errors: &mut *errors,
                }
                .string(),
                None => errors.push(FieldError::new(format!("{}.container_type", path), FieldErrorKind::Missing)),
            }

            match line.get("quantity") {
                Some(quantity) => check_quantity(&format!("{}.quantity", path), quantity, errors),
                None => errors.push(FieldError::new(format!("{}.quantity", path), FieldErrorKind::Missing)),
            }

            if let Some(weight) = line.get("gross_weight_per_container") {
                if !(weight.is_null() || weight.is_number()) {
                    errors.push(wrong_type(format!("{}.gross_weight_per_container", path), "number", weight));
                }
            }
        }
    }
}

/// Type checks for a single value
struct FieldCheck<'a> {
    field: &'a str,
    value: &'a Value,
    errors: &'a mut Vec<FieldError>,
}

impl FieldCheck<'_> {
    fn string(&mut self) {
        if !self.value.is_string() {
            self.errors.push(wrong_type(self.field, "string", self.value));
        }
    }

    fn boolean(&mut self) {
        if !self.value.is_boolean() {
            self.errors.push(wrong_type(self.field, "boolean", self.value));
        }
    }

    fn enumeration(&mut self, allowed: &'static [&'static str]) {
        match self.value.as_str() {
            Some(value) if allowed.contains(&value) => {}
            Some(value) => self.errors.push(FieldError::new(
                self.field,
                FieldErrorKind::NotInEnumeration {
                    value: value.to_string(),
                    allowed,
                },
            )),
            None => self.errors.push(wrong_type(self.field, "string", self.value)),
        }
    }

    fn nullable(&mut self, check: impl FnOnce(&mut Self)) {
        if !self.value.is_null() {
            check(self);
        }
    }
}

fn check_incoterm(value: &Value, errors: &mut Vec<FieldError>) {
    if let Some(code) = value.as_str() {
        if !INCOTERMS.contains(&code) {
            errors.push(FieldError::new(
                "incoterms",
                FieldErrorKind::UnknownIncoterm {
                    value: code.to_string(),
                },
            ));
        }
    }
}

/// A non-negative integer or the sentinel; numeric strings are rejected
fn check_freetime(value: &Value, errors: &mut Vec<FieldError>) {
    let valid = match value {
        Value::String(s) => s == HIL_SENTINEL,
        Value::Number(n) => whole_number(n).is_some(),
        _ => false,
    };
    if !valid {
        errors.push(wrong_type(
            "freetime_requirement",
            "non-negative integer or \"NOT_FOUND_HIL\"",
            value,
        ));
    }
}

fn check_quantity(field: &str, value: &Value, errors: &mut Vec<FieldError>) {
    match value {
        Value::Number(n) => {
            if whole_number(n).is_none() {
                errors.push(FieldError::new(
                    field,
                    FieldErrorKind::InvalidQuantity { value: n.to_string() },
                ));
            }
        }
        other => errors.push(wrong_type(field, "integer", other)),
    }
}

/// A JSON number that denotes a `u32`, including whole floats such as `14.0`
fn whole_number(n: &Number) -> Option<u32> {
    if let Some(value) = n.as_u64() {
        return u32::try_from(value).ok();
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

/// Copy of a checked candidate with whole floats in integer fields rewritten as integers
fn normalized(candidate: &Value) -> Value {
    let mut value = candidate.clone();
    integerize(value.get_mut("freetime_requirement"));
    if let Some(items) = value.get_mut("containers").and_then(Value::as_array_mut) {
        for item in items {
            integerize(item.get_mut("quantity"));
        }
    }
    value
}

fn integerize(slot: Option<&mut Value>) {
    if let Some(slot) = slot {
        let whole = match slot {
            Value::Number(n) => whole_number(n),
            _ => None,
        };
        if let Some(n) = whole {
            *slot = Value::from(n);
        }
    }
}

fn unknown_fields(object: &Map<String, Value>, known: &[&str], prefix: &str, errors: &mut Vec<FieldError>) {
    for key in object.keys() {
        if !known.contains(&key.as_str()) {
            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            errors.push(FieldError::new(field, FieldErrorKind::UnknownField));
        }
    }
}

fn wrong_type(field: impl Into<String>, expected: &'static str, value: &Value) -> FieldError {
    FieldError::new(
        field,
        FieldErrorKind::WrongType {
            expected,
            found: json_type(value),
        },
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtc_domain::{Mandatory, HIL_SENTINEL};
    use serde_json::json;

    fn candidate() -> Value {
        json!({
            "inquiry_type": "Bid to win",
            "client_name": "ATIQ AL DHAHERI & CO LLC",
            "product": "Ocean",
            "incoterms": "FOB",
            "movement_type": null,
            "ocean_type": "FCL",
            "containers": [
                {"container_type": "20GP", "quantity": 2},
                {"container_type": "40HC", "quantity": 1, "gross_weight_per_container": 22000.5}
            ],
            "port_of_loading": "Shanghai",
            "port_of_discharge": "Jebel Ali",
            "commodity": "Electronics",
            "freetime_requirement": 14,
            "dangerous_goods": false
        })
    }

    fn gatekeeper() -> Gatekeeper {
        Gatekeeper::default_config()
    }

    #[test]
    fn test_valid_record() {
        let record = gatekeeper().validate(&candidate()).unwrap();
        assert_eq!(record.client_name, "ATIQ AL DHAHERI & CO LLC");
        assert_eq!(record.containers.len(), 2);
        assert_eq!(record.freetime_requirement, Mandatory::Known(14));
        assert!(record.fields_needing_review().is_empty());
    }

    #[test]
    fn test_sentinel_commodity_with_zero_freetime_passes() {
        let mut value = candidate();
        value["commodity"] = json!(HIL_SENTINEL);
        value["freetime_requirement"] = json!(0);

        let record = gatekeeper().validate(&value).unwrap();
        assert!(record.commodity.is_not_found());
        assert_eq!(record.freetime_requirement, Mandatory::Known(0));
        assert_eq!(record.fields_needing_review(), vec!["commodity"]);
    }

    #[test]
    fn test_sentinel_freetime_passes() {
        let mut value = candidate();
        value["freetime_requirement"] = json!(HIL_SENTINEL);
        assert!(gatekeeper().validate(&value).unwrap().freetime_requirement.is_not_found());
    }

    #[test]
    fn test_missing_client_name_fails() {
        let mut value = candidate();
        value.as_object_mut().unwrap().remove("client_name");

        let failure = gatekeeper().validate(&value).unwrap_err();
        assert_eq!(failure.missing_fields(), vec!["client_name"]);
        assert_eq!(failure.raw, value);
    }

    #[test]
    fn test_missing_mandatory_without_sentinel_fails() {
        let mut value = candidate();
        let object = value.as_object_mut().unwrap();
        object.remove("commodity");
        object.remove("freetime_requirement");

        let failure = gatekeeper().validate(&value).unwrap_err();
        assert_eq!(failure.missing_fields(), vec!["commodity", "freetime_requirement"]);
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let mut value = candidate();
        let object = value.as_object_mut().unwrap();
        for field in ["inquiry_type", "movement_type", "ocean_type", "containers", "dangerous_goods"] {
            object.remove(field);
        }

        let record = gatekeeper().validate(&value).unwrap();
        assert_eq!(record.inquiry_type, InquiryType::BidToWin);
        assert!(record.containers.is_empty());
        assert!(!record.dangerous_goods);
    }

    #[test]
    fn test_all_errors_collected() {
        let value = json!({
            "client_name": 42,
            "product": "Rail",
            "incoterms": "FOB",
            "ocean_type": "Reefer",
            "containers": [{"container_type": "20GP", "quantity": -1}, {"quantity": 1.5}, "40HC"],
            "port_of_loading": "Shanghai",
            "port_of_discharge": "Jebel Ali",
            "commodity": "Toys",
            "freetime_requirement": "14",
            "dangerous_goods": "no"
        });

        let failure = gatekeeper().validate(&value).unwrap_err();
        for field in [
            "client_name",
            "product",
            "ocean_type",
            "containers[0].quantity",
            "containers[1].container_type",
            "containers[1].quantity",
            "containers[2]",
            "freetime_requirement",
            "dangerous_goods",
        ] {
            assert!(failure.has_error_for(field), "expected an error for {}: {}", field, failure);
        }
        assert_eq!(failure.errors.len(), 9);
    }

    #[test]
    fn test_null_optional_fields_accepted() {
        let mut value = candidate();
        value["ocean_type"] = Value::Null;
        value["containers"][1]["gross_weight_per_container"] = Value::Null;
        let record = gatekeeper().validate(&value).unwrap();
        assert_eq!(record.ocean_type, None);
    }

    #[test]
    fn test_whole_floats_accepted_for_integer_fields() {
        let mut value = candidate();
        value["containers"][0]["quantity"] = json!(2.0);
        value["freetime_requirement"] = json!(14.0);

        let record = gatekeeper().validate(&value).unwrap();
        assert_eq!(record.containers[0].quantity, 2);
        assert_eq!(record.freetime_requirement, Mandatory::Known(14));
        assert_eq!(record.containers[1].quantity, 1);
    }

    #[test]
    fn test_fractional_and_negative_floats_rejected() {
        let mut value = candidate();
        value["containers"][0]["quantity"] = json!(-2.0);
        value["freetime_requirement"] = json!(14.5);

        let failure = gatekeeper().validate(&value).unwrap_err();
        assert!(failure.has_error_for("containers[0].quantity"));
        assert!(failure.has_error_for("freetime_requirement"));
    }

    #[test]
    fn test_whole_number_bounds() {
        assert_eq!(whole_number(&Number::from(7u64)), Some(7));
        assert_eq!(whole_number(&Number::from_f64(3.0).unwrap()), Some(3));
        assert_eq!(whole_number(&Number::from(u64::from(u32::MAX) + 1)), None);
        assert_eq!(whole_number(&Number::from_f64(1e12).unwrap()), None);
    }

    #[test]
    fn test_non_object_rejected() {
        let failure = gatekeeper().validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            failure.errors,
            vec![FieldError::new("$", FieldErrorKind::WrongType { expected: "object", found: "array" })]
        );
    }

    #[test]
    fn test_unknown_fields_ignored_by_default() {
        let mut value = candidate();
        value["remarks"] = json!("urgent");
        value["containers"][0]["reefer"] = json!(true);
        assert!(gatekeeper().validate(&value).is_ok());
    }

    #[test]
    fn test_strict_rejects_unknown_fields_and_incoterms() {
        let mut value = candidate();
        value["remarks"] = json!("urgent");
        value["containers"][0]["reefer"] = json!(true);
        value["incoterms"] = json!("XYZ");

        let failure = Gatekeeper::new(ValidationConfig::strict()).validate(&value).unwrap_err();
        assert!(failure.has_error_for("remarks"));
        assert!(failure.has_error_for("containers[0].reefer"));
        assert!(failure.errors.iter().any(|e| matches!(
            &e.kind,
            FieldErrorKind::UnknownIncoterm { value } if value == "XYZ"
        )));
    }

    #[test]
    fn test_strict_accepts_clean_record() {
        assert!(Gatekeeper::new(ValidationConfig::strict()).validate(&candidate()).is_ok());
    }
}
