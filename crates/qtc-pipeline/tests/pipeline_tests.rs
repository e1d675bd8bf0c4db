//! End-to-end tests for notification processing

use qtc_domain::traits::AutomationSink;
use qtc_domain::{DocumentKind, FreightQuoteRecord, Mandatory, RawDocument};
use qtc_extractor::{AttachmentStatus, ExtractorConfig, SchemaExtractor};
use qtc_gatekeeper::Gatekeeper;
use qtc_llm::MockProvider;
use qtc_pipeline::{Notification, PipelineError, QuotePipeline};
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use zip::write::SimpleFileOptions;

#[derive(Clone, Default)]
struct RecordingSink {
    records: Arc<Mutex<Vec<FreightQuoteRecord>>>,
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl AutomationSink for RecordingSink {
    type Error = String;

    fn submit(&self, record: &FreightQuoteRecord) -> Result<String, Self::Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(format!("form filled for {}", record.client_name))
    }
}

struct FailingSink;

impl AutomationSink for FailingSink {
    type Error = String;

    fn submit(&self, _record: &FreightQuoteRecord) -> Result<String, Self::Error> {
        Err("portal login rejected".to_string())
    }
}

fn message() -> Value {
    json!({
        "subject": "RFQ Shanghai to Jebel Ali",
        "from": {"emailAddress": {"name": "Atiq Sales", "address": "sales@atiq.example"}},
        "toRecipients": [{"emailAddress": {"name": "Pricing", "address": "pricing@forwarder.example"}}],
        "body": {
            "contentType": "html",
            "content": "<table><tr><th>Description</th><th>Values</th></tr>\
                        <tr><td>Commodity</td><td>Electronics</td></tr>\
                        <tr><td>Incoterms</td><td>FOB</td></tr></table>"
        }
    })
}

fn candidate() -> Value {
    json!({
        "inquiry_type": "Bid to win",
        "client_name": "ATIQ AL DHAHERI & CO LLC",
        "product": "Ocean",
        "incoterms": "FOB",
        "ocean_type": "FCL",
        "containers": [{"container_type": "40HC", "quantity": 1}],
        "port_of_loading": "Shanghai",
        "port_of_discharge": "Jebel Ali",
        "commodity": "Electronics",
        "freetime_requirement": 14,
        "dangerous_goods": false
    })
}

fn docx(text: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>"#,
        text
    );
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn pipeline_with(
    response: Value,
    sink: RecordingSink,
) -> (QuotePipeline<MockProvider, RecordingSink>, MockProvider) {
    let llm = MockProvider::new(response.to_string());
    let extractor = SchemaExtractor::new(llm.clone(), ExtractorConfig::default()).unwrap();
    (QuotePipeline::new(extractor, Gatekeeper::default_config(), sink), llm)
}

#[tokio::test]
async fn test_notification_reaches_sink() {
    let sink = RecordingSink::default();
    let (pipeline, llm) = pipeline_with(candidate(), sink.clone());

    let notification = Notification::new(
        message(),
        vec![
            RawDocument::new("booking.docx", docx("Freetime 14 days at destination")),
            RawDocument::new("photo.png", vec![0x89, 0x50, 0x4e, 0x47]),
            RawDocument::new("notes.txt", b"ignored".to_vec()),
        ],
    );
    let id = notification.id;

    let outcome = pipeline.process(notification).await.unwrap();

    assert_eq!(outcome.notification_id, id);
    assert_eq!(outcome.automation_result, "form filled for ATIQ AL DHAHERI & CO LLC");
    assert!(outcome.needs_review.is_empty());
    assert_eq!(outcome.record.commodity, Mandatory::Known("Electronics".to_string()));
    assert_eq!(sink.count(), 1);

    let statuses: Vec<(DocumentKind, AttachmentStatus)> =
        outcome.attachments.iter().map(|a| (a.kind, a.status)).collect();
    assert_eq!(
        statuses,
        vec![
            (DocumentKind::Word, AttachmentStatus::Included),
            (DocumentKind::Image, AttachmentStatus::SkippedImage),
            (DocumentKind::Unknown, AttachmentStatus::SkippedUnsupported),
        ]
    );
    assert_eq!(outcome.attachments[0].filename, "booking.docx");
    assert_eq!(outcome.attachments[0].chars, "Freetime 14 days at destination".len());
    assert_eq!(outcome.attachments[0].sheets, 0);

    let prompt = llm.last_call().unwrap().prompt;
    assert!(prompt.contains("Email Subject: RFQ Shanghai to Jebel Ali"));
    assert!(prompt.contains("--- Attachment: booking.docx ---\nFreetime 14 days at destination\n"));
    assert!(!prompt.contains("photo.png"));
}

#[tokio::test]
async fn test_missing_required_field_stops_before_sink() {
    let mut response = candidate();
    response.as_object_mut().unwrap().remove("client_name");

    let sink = RecordingSink::default();
    let (pipeline, _) = pipeline_with(response, sink.clone());

    let err = pipeline
        .process(Notification::new(message(), vec![]))
        .await
        .unwrap_err();

    match err {
        PipelineError::SchemaValidation(failure) => {
            assert!(failure.has_error_for("client_name"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_malformed_output_stops_before_sink() {
    let llm = MockProvider::new("Sorry, I cannot help with that.");
    let extractor = SchemaExtractor::new(llm, ExtractorConfig::default()).unwrap();
    let sink = RecordingSink::default();
    let pipeline = QuotePipeline::new(extractor, Gatekeeper::default_config(), sink.clone());

    let err = pipeline
        .process(Notification::new(message(), vec![]))
        .await
        .unwrap_err();

    assert!(err.is_malformed_ai_output());
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_sentinel_fields_flagged_for_review() {
    let mut response = candidate();
    response["commodity"] = json!("NOT_FOUND_HIL");
    response["freetime_requirement"] = json!("NOT_FOUND_HIL");

    let sink = RecordingSink::default();
    let (pipeline, _) = pipeline_with(response, sink.clone());

    let outcome = pipeline
        .process(Notification::new(message(), vec![]))
        .await
        .unwrap();

    assert_eq!(outcome.needs_review, vec!["commodity", "freetime_requirement"]);
    assert!(outcome.record.freetime_requirement.is_not_found());
    assert_eq!(sink.count(), 1);
}

#[tokio::test]
async fn test_sink_failure_is_reported() {
    let llm = MockProvider::new(candidate().to_string());
    let extractor = SchemaExtractor::new(llm, ExtractorConfig::default()).unwrap();
    let pipeline = QuotePipeline::new(extractor, Gatekeeper::default_config(), FailingSink);

    let err = pipeline
        .process(Notification::new(message(), vec![]))
        .await
        .unwrap_err();

    match err {
        PipelineError::Automation(reason) => assert_eq!(reason, "portal login rejected"),
        other => panic!("expected automation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_corrupt_attachment_does_not_abort() {
    let sink = RecordingSink::default();
    let (pipeline, _) = pipeline_with(candidate(), sink.clone());

    let notification = Notification::new(
        message(),
        vec![RawDocument::new("rates.xlsx", b"not a workbook".to_vec())],
    );
    let outcome = pipeline.process(notification).await.unwrap();

    assert_eq!(outcome.attachments[0].kind, DocumentKind::Spreadsheet);
    assert_eq!(outcome.attachments[0].status, AttachmentStatus::SkippedEmpty);
    assert_eq!(outcome.attachments[0].sheets, 0);
    assert_eq!(sink.count(), 1);
}

#[tokio::test]
async fn test_notifications_processed_concurrently() {
    let sink = RecordingSink::default();
    let (pipeline, llm) = pipeline_with(candidate(), sink.clone());

    let first = Notification::new(message(), vec![]);
    let second = Notification::new(message(), vec![]);
    let (first_id, second_id) = (first.id, second.id);

    let (a, b) = tokio::join!(pipeline.process(first), pipeline.process(second));

    assert_eq!(a.unwrap().notification_id, first_id);
    assert_eq!(b.unwrap().notification_id, second_id);
    assert_eq!(sink.count(), 2);
    assert_eq!(llm.call_count(), 2);
}
