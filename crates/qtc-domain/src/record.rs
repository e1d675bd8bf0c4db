//! Freight quote record - the structured output of the extraction pipeline

use crate::mandatory::Mandatory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Purpose of the quote request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum InquiryType {
    /// Estimation or costing exercise
    #[serde(rename = "Budgetary")]
    Budgetary,

    /// Live tender the customer intends to award
    #[default]
    #[serde(rename = "Bid to win")]
    BidToWin,
}

impl InquiryType {
    /// Every accepted wire value
    pub const ALL: &'static [&'static str] = &["Budgetary", "Bid to win"];

    /// Get the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::Budgetary => "Budgetary",
            InquiryType::BidToWin => "Bid to win",
        }
    }
}

/// Transport product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Product {
    /// Sea freight
    Ocean,
    /// Air freight
    Air,
    /// Land transport
    Road,
    /// Customs clearance only
    Brokerage,
}

impl Product {
    /// Every accepted wire value
    pub const ALL: &'static [&'static str] = &["Ocean", "Air", "Road", "Brokerage"];

    /// Get the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Ocean => "Ocean",
            Product::Air => "Air",
            Product::Road => "Road",
            Product::Brokerage => "Brokerage",
        }
    }
}

/// Ocean shipment sub-type, describing how the cargo is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OceanType {
    /// Full container load
    #[serde(rename = "FCL")]
    Fcl,
    /// Less than container load
    #[serde(rename = "LCL")]
    Lcl,
    /// Roll-on/roll-off (vehicles)
    #[serde(rename = "RORO")]
    Roro,
    /// Machinery and bulk cargo
    #[serde(rename = "Break Bulk")]
    BreakBulk,
}

impl OceanType {
    /// Every accepted wire value
    pub const ALL: &'static [&'static str] = &["FCL", "LCL", "RORO", "Break Bulk"];

    /// Get the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            OceanType::Fcl => "FCL",
            OceanType::Lcl => "LCL",
            OceanType::Roro => "RORO",
            OceanType::BreakBulk => "Break Bulk",
        }
    }
}

/// One container line item of an FCL request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerLine {
    /// Short container code, e.g. 20GP, 40HC
    pub container_type: String,

    /// Number of containers of this type
    pub quantity: u32,

    /// Gross weight per container, if stated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_weight_per_container: Option<f64>,
}

/// Structured freight quote request, ready for form automation
///
/// Constructed only from validated extractor output. `commodity` and
/// `freetime_requirement` are mandatory: when the email does not state them
/// they carry `NOT_FOUND_HIL` instead of being left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FreightQuoteRecord {
    /// Budgetary or Bid to win
    #[serde(default)]
    pub inquiry_type: InquiryType,

    /// Customer company name
    pub client_name: String,

    /// Transport product line
    pub product: Product,

    /// Three-letter Incoterms code, e.g. FOB, EXW
    pub incoterms: String,

    /// Free-text movement type (door-to-port, port-to-port, ...)
    #[serde(default)]
    pub movement_type: Option<String>,

    /// Ocean sub-type; only meaningful when product is Ocean
    #[serde(default)]
    pub ocean_type: Option<OceanType>,

    /// Container line items; only meaningful for FCL
    #[serde(default)]
    pub containers: Vec<ContainerLine>,

    /// Origin port or city
    pub port_of_loading: String,

    /// Destination port or city
    pub port_of_discharge: String,

    /// This is mandatory, HIL if missing
    pub commodity: Mandatory<String>,

    /// Mandatory free days at destination, HIL if missing
    pub freetime_requirement: Mandatory<u32>,

    /// Whether the cargo is dangerous goods
    #[serde(default)]
    pub dangerous_goods: bool,
}

impl FreightQuoteRecord {
    /// JSON field names that are required on input
    pub const REQUIRED_FIELDS: &'static [&'static str] = &[
        "client_name",
        "product",
        "incoterms",
        "port_of_loading",
        "port_of_discharge",
        "commodity",
        "freetime_requirement",
    ];

    /// Every JSON field name the record knows
    pub const ALL_FIELDS: &'static [&'static str] = &[
        "inquiry_type",
        "client_name",
        "product",
        "incoterms",
        "movement_type",
        "ocean_type",
        "containers",
        "port_of_loading",
        "port_of_discharge",
        "commodity",
        "freetime_requirement",
        "dangerous_goods",
    ];

    /// Names of mandatory fields that carry the sentinel
    pub fn fields_needing_review(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.commodity.is_not_found() {
            fields.push("commodity");
        }
        if self.freetime_requirement.is_not_found() {
            fields.push("freetime_requirement");
        }
        fields
    }

    /// The record's JSON Schema, pretty printed
    ///
    /// This is the schema embedded in the extraction prompt.
    pub fn json_schema_pretty() -> Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(FreightQuoteRecord);
        serde_json::to_string_pretty(&schema)
    }
}
