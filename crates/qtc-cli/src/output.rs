//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use qtc_domain::{FreightQuoteRecord, Mailbox, ParsedEmail};
use qtc_email::CargoDetails;
use qtc_gatekeeper::ValidationFailure;
use qtc_pipeline::PipelineOutcome;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a processed notification.
    pub fn format_outcome(&self, outcome: &PipelineOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(outcome)?);
        }

        let mut sections = vec![self.record_table(&outcome.record)?];

        if !outcome.attachments.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Attachment", "Kind", "Status", "Chars", "Sheets"]);
            for attachment in &outcome.attachments {
                builder.push_record([
                    attachment.filename.clone(),
                    attachment.kind.as_str().to_string(),
                    attachment.status.as_str().to_string(),
                    attachment.chars.to_string(),
                    attachment.sheets.to_string(),
                ]);
            }
            sections.push(styled(builder.build()));
        }

        if !outcome.needs_review.is_empty() {
            sections.push(self.warning(&format!(
                "Needs human review: {}",
                outcome.needs_review.join(", ")
            )));
        }
        sections.push(self.success(&outcome.automation_result));

        Ok(sections.join("\n"))
    }

    /// Format a rejected candidate record.
    pub fn format_validation_failure(&self, failure: &ValidationFailure) -> Result<String> {
        if self.format == OutputFormat::Json {
            let value = json!({
                "errors": failure.errors,
                "candidate": failure.raw,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Problem"]);
        for error in &failure.errors {
            let text = error.to_string();
            let problem = text
                .strip_prefix(&format!("{}: ", error.field))
                .unwrap_or(&text)
                .to_string();
            builder.push_record([error.field.clone(), problem]);
        }

        Ok(format!(
            "{}\n{}",
            self.error(&format!("Candidate rejected with {} error(s)", failure.errors.len())),
            styled(builder.build())
        ))
    }

    /// Format a parsed email.
    pub fn format_email(&self, email: &ParsedEmail) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(email)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Header", "Value"]);
        builder.push_record(["From".to_string(), mailbox(&email.sender)]);
        builder.push_record(["To".to_string(), mailboxes(&email.recipients)]);
        builder.push_record(["Cc".to_string(), mailboxes(&email.cc_recipients)]);
        builder.push_record(["Subject".to_string(), email.subject.clone()]);
        let headers = styled(builder.build());

        if email.table_data.is_empty() {
            return Ok(format!("{}\n{}", headers, self.info("No key/value table found.")));
        }

        let mut builder = Builder::default();
        builder.push_record(["Description", "Values"]);
        for (key, value) in email.table_data.iter() {
            builder.push_record([key, value]);
        }

        Ok(format!("{}\n{}", headers, styled(builder.build())))
    }

    /// Format cargo details.
    pub fn format_cargo(&self, details: &CargoDetails) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(details)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Detail", "Value"]);
        for (name, value) in [
            ("Length (cm)", &details.length),
            ("Width (cm)", &details.width),
            ("Height (cm)", &details.height),
            ("Packages", &details.num_packages),
            ("Volume weight", &details.volume_weight),
            ("Gross weight", &details.gross_weight),
        ] {
            builder.push_record([name, value.as_str()]);
        }

        Ok(styled(builder.build()))
    }

    fn record_table(&self, record: &FreightQuoteRecord) -> Result<String> {
        let value = serde_json::to_value(record)?;

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for field in FreightQuoteRecord::ALL_FIELDS {
            let cell = match value.get(*field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            builder.push_record([field.to_string(), cell]);
        }

        Ok(styled(builder.build()))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn mailbox(mailbox: &Mailbox) -> String {
    match (mailbox.name.is_empty(), mailbox.email.is_empty()) {
        (_, true) => mailbox.name.clone(),
        (true, false) => mailbox.email.clone(),
        (false, false) => format!("{} <{}>", mailbox.name, mailbox.email),
    }
}

fn mailboxes(list: &[Mailbox]) -> String {
    list.iter().map(mailbox).collect::<Vec<_>>().join(", ")
}
