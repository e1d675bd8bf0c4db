//! Word-processor extraction (`.docx`)
//!
//! Reads `word/document.xml` out of the OOXML package and walks the body in
//! document order. Paragraphs become lines; each table row becomes one line
//! with its non-empty cells joined by ` | `. Legacy binary `.doc` files are not
//! zip packages and degrade to empty text.

use crate::error::DocumentError;
use qtc_domain::ExtractedDocument;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const BODY_PART: &str = "word/document.xml";

/// Extract paragraph and table text from a Word document
pub fn extract_word(path: &Path) -> ExtractedDocument {
    let text = match read_docx(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Error extracting text from Word document {}: {}", path.display(), e);
            String::new()
        }
    };

    debug!("Extracted {} chars from {}", text.len(), path.display());
    ExtractedDocument::Word { text }
}

fn read_docx(path: &Path) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(BODY_PART)?.read_to_string(&mut xml)?;
    body_text(&xml)
}

/// Walk a `document.xml` body and return its text lines joined by newlines
fn body_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut walker = BodyWalker::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => walker.open(e.local_name().as_ref()),
            Event::Empty(e) => {
                let name = e.local_name();
                walker.open(name.as_ref());
                walker.close(name.as_ref());
            }
            Event::End(e) => walker.close(e.local_name().as_ref()),
            Event::Text(t) if walker.in_text => {
                walker.paragraph.push_str(&t.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.lines.join("\n"))
}

#[derive(Default)]
struct TableState {
    row: Vec<String>,
    cell: Option<Vec<String>>,
}

#[derive(Default)]
struct BodyWalker {
    lines: Vec<String>,
    tables: Vec<TableState>,
    paragraph: String,
    in_text: bool,
}

impl BodyWalker {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"p" => self.paragraph.clear(),
            b"t" => self.in_text = true,
            b"tab" => self.paragraph.push('\t'),
            b"br" | b"cr" => self.paragraph.push('\n'),
            b"tbl" => self.tables.push(TableState::default()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.row.clear();
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.cell = Some(Vec::new());
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"p" => {
                let text = self.paragraph.trim().to_string();
                self.paragraph.clear();
                if !text.is_empty() {
                    self.emit(self.tables.len(), text);
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    let cell = table.cell.take().unwrap_or_default().join("\n");
                    let cell = cell.trim();
                    if !cell.is_empty() {
                        table.row.push(cell.to_string());
                    }
                }
            }
            b"tr" => {
                let row = match self.tables.last_mut() {
                    Some(table) => std::mem::take(&mut table.row),
                    None => return,
                };
                if !row.is_empty() {
                    self.emit(self.tables.len() - 1, row.join(" | "));
                }
            }
            b"tbl" => {
                self.tables.pop();
            }
            _ => {}
        }
    }

    /// Send a line to the open cell of the table at `depth`, or to the body at depth 0
    fn emit(&mut self, depth: usize, line: String) {
        let cell = depth
            .checked_sub(1)
            .and_then(|i| self.tables.get_mut(i))
            .and_then(|table| table.cell.as_mut());
        match cell {
            Some(cell) => cell.push(line),
            None => self.lines.push(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
    }

    fn cell(text: &str) -> String {
        format!("<w:tc>{}</w:tc>", para(text))
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = document(&format!("{}{}{}", para("RFQ"), para(""), para("POL: Shanghai")));
        assert_eq!(body_text(&xml).unwrap(), "RFQ\nPOL: Shanghai");
    }

    #[test]
    fn test_runs_are_concatenated() {
        let xml = document(
            r#"<w:p><w:r><w:t xml:space="preserve">Jebel </w:t></w:r><w:r><w:t>Ali</w:t></w:r></w:p>"#,
        );
        assert_eq!(body_text(&xml).unwrap(), "Jebel Ali");
    }

    #[test]
    fn test_table_rows_after_preceding_paragraphs() {
        let table = format!(
            "<w:tbl><w:tr>{}{}</w:tr><w:tr>{}{}{}</w:tr></w:tbl>",
            cell("Commodity"),
            cell("Electronics"),
            cell("Containers"),
            cell(""),
            cell("1 x 40HC")
        );
        let xml = document(&format!("{}{}{}", para("Details below"), table, para("Regards")));
        assert_eq!(
            body_text(&xml).unwrap(),
            "Details below\nCommodity | Electronics\nContainers | 1 x 40HC\nRegards"
        );
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = document(&para("ATIQ AL DHAHERI &amp; CO LLC"));
        assert_eq!(body_text(&xml).unwrap(), "ATIQ AL DHAHERI & CO LLC");
    }

    #[test]
    fn test_text_outside_t_ignored() {
        let xml = document(
            r#"<w:p><w:r><w:instrText>PAGE</w:instrText><w:t>Visible</w:t></w:r></w:p>"#,
        );
        assert_eq!(body_text(&xml).unwrap(), "Visible");
    }

    #[test]
    fn test_extract_from_package() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("booking.docx");

        let file = File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file(BODY_PART, SimpleFileOptions::default()).unwrap();
        zip.write_all(document(&para("Freetime 14 days")).as_bytes()).unwrap();
        zip.finish().unwrap();

        let doc = extract_word(&path);
        assert_eq!(doc, ExtractedDocument::Word { text: "Freetime 14 days".to_string() });
    }

    #[test]
    fn test_package_without_body_degrades() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.docx");

        let file = File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("docProps/app.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<Properties/>").unwrap();
        zip.finish().unwrap();

        assert_eq!(extract_word(&path).text(), Some(""));
    }
}
