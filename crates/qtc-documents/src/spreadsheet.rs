//! Spreadsheet extraction (`.xlsx`, `.xls`)

use crate::error::DocumentError;
use calamine::{open_workbook_auto, Data, Reader};
use qtc_domain::{ExtractedDocument, SheetText};
use std::path::Path;
use tracing::{debug, warn};

/// Extract every sheet of a workbook as aligned tabular text
///
/// Each sheet becomes a `Sheet: <name>` line followed by its rows; sheets are
/// joined by a blank line. Empty cells render as empty strings. Any failure
/// degrades to an empty workbook.
pub fn extract_spreadsheet(path: &Path) -> ExtractedDocument {
    let sheets = match read_workbook(path) {
        Ok(sheets) => sheets,
        Err(e) => {
            warn!("Error extracting data from spreadsheet {}: {}", path.display(), e);
            Vec::new()
        }
    };

    let text = sheets
        .iter()
        .map(|sheet| sheet.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    debug!(
        "Extracted {} sheet(s), {} chars from {}",
        sheets.len(),
        text.len(),
        path.display()
    );

    ExtractedDocument::Spreadsheet { text, sheets }
}

fn read_workbook(path: &Path) -> Result<Vec<SheetText>, DocumentError> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();

        sheets.push(sheet_text(name, &rows));
    }

    Ok(sheets)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn sheet_text(name: String, rows: &[Vec<String>]) -> SheetText {
    let text = format!("Sheet: {}\n{}", name, render_rows(rows));
    SheetText {
        name,
        text: text.trim_end().to_string(),
        // first row is the header
        row_count: rows.len().saturating_sub(1),
    }
}

/// Render rows as right-aligned columns separated by two spaces
///
/// Ragged rows are padded with empty cells.
///
/// # Examples
///
/// ```
/// use qtc_documents::render_rows;
///
/// let rows = vec![
///     vec!["Type".to_string(), "Qty".to_string()],
///     vec!["40HC".to_string(), "2".to_string()],
/// ];
/// assert_eq!(render_rows(&rows), "Type  Qty\n40HC    2");
/// ```
pub fn render_rows(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    format!("{:>width$}", cell, width = *width)
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    type Sheet<'a> = (&'a str, &'a [&'a [Option<&'a str>]]);

    fn column(index: usize) -> char {
        (b'A' + index as u8) as char
    }

    /// Minimal xlsx package: one worksheet part per sheet, all cells as shared strings
    fn write_workbook(path: &Path, sheets: &[Sheet<'_>]) {
        let mut strings: Vec<&str> = Vec::new();
        let mut parts = Vec::new();
        for (_, rows) in sheets {
            let mut data = String::new();
            for (r, row) in rows.iter().enumerate() {
                data.push_str(&format!("<row r=\"{}\">", r + 1));
                for (c, cell) in row.iter().enumerate() {
                    if let Some(text) = cell {
                        strings.push(*text);
                        data.push_str(&format!(
                            "<c r=\"{}{}\" t=\"s\"><v>{}</v></c>",
                            column(c),
                            r + 1,
                            strings.len() - 1
                        ));
                    }
                }
                data.push_str("</row>");
            }
            parts.push(format!(r#"<worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#, MAIN_NS, data));
        }

        let entries: String = sheets
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!(r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#, name, i + 1, i + 1))
            .collect();
        let workbook = format!(
            r#"<workbook xmlns="{}" xmlns:r="{}"><sheets>{}</sheets></workbook>"#,
            MAIN_NS, REL_NS, entries
        );
        let rels: String = (1..=sheets.len())
            .map(|i| {
                format!(
                    r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                    i, REL_NS, i
                )
            })
            .collect();
        let rels = format!(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        );
        let shared: String = strings.iter().map(|s| format!("<si><t>{}</t></si>", s)).collect();
        let shared = format!(
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">{}</sst>"#,
            MAIN_NS,
            strings.len(),
            strings.len(),
            shared
        );
        let overrides: String = (1..=sheets.len())
            .map(|i| {
                format!(
                    r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                    i
                )
            })
            .collect();
        let content_types = format!(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>{}</Types>"#,
            overrides
        );

        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let mut add = |name: &str, body: &str| {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };
        add("[Content_Types].xml", &content_types);
        add("xl/workbook.xml", &workbook);
        add("xl/_rels/workbook.xml.rels", &rels);
        add("xl/sharedStrings.xml", &shared);
        for (i, part) in parts.iter().enumerate() {
            add(&format!("xl/worksheets/sheet{}.xml", i + 1), part);
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_workbook_with_two_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.xlsx");
        write_workbook(
            &path,
            &[
                (
                    "Rates",
                    &[
                        &[Some("POL"), Some("POD"), Some("Carrier")],
                        &[Some("Shanghai"), Some("Jebel Ali"), Some("MSC")],
                        &[Some("Ningbo"), None, Some("COSCO")],
                    ],
                ),
                (
                    "Cargo",
                    &[
                        &[Some("Commodity"), Some("Packages")],
                        &[Some("Electronics"), Some("12")],
                    ],
                ),
            ],
        );

        let doc = extract_spreadsheet(&path);
        let sheets = doc.sheets();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Rates");
        assert_eq!(sheets[0].row_count, 2);
        assert_eq!(sheets[1].name, "Cargo");
        assert_eq!(sheets[1].row_count, 1);

        let rates: Vec<&str> = sheets[0].text.lines().collect();
        assert_eq!(rates[0], "Sheet: Rates");
        assert_eq!(rates[1], "     POL        POD  Carrier");
        assert_eq!(rates[2], "Shanghai  Jebel Ali      MSC");
        // the missing POD cell renders as padding
        assert_eq!(rates[3], format!("  Ningbo{}COSCO", " ".repeat(15)));

        let text = doc.text().unwrap();
        assert!(text.starts_with("Sheet: Rates\n"));
        assert!(text.contains("COSCO\n\nSheet: Cargo\n"));
        assert!(text.ends_with("Electronics        12"));
    }

    #[test]
    fn test_unreadable_workbook_degrades() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();

        let doc = extract_spreadsheet(&path);
        assert_eq!(doc.text(), Some(""));
        assert!(doc.sheets().is_empty());
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_render_aligns_columns() {
        let table = rows(&[
            &["Container", "Qty", "Weight"],
            &["20GP", "2", "18000"],
            &["40HC", "10", ""],
        ]);
        let rendered = render_rows(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Container  Qty  Weight");
        assert_eq!(lines[1], "     20GP    2   18000");
        assert_eq!(lines[2], "     40HC   10");
    }

    #[test]
    fn test_render_pads_ragged_rows() {
        let table = rows(&[&["a", "b", "c"], &["d"]]);
        assert_eq!(render_rows(&table), "a  b  c\nd");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_rows(&[]), "");
    }

    #[test]
    fn test_sheet_text_header_and_count() {
        let table = rows(&[&["POL", "POD"], &["Shanghai", "Jebel Ali"], &["Ningbo", "Dammam"]]);
        let sheet = sheet_text("Rates".to_string(), &table);
        assert!(sheet.text.starts_with("Sheet: Rates\n"));
        assert!(sheet.text.contains("Jebel Ali"));
        assert_eq!(sheet.row_count, 2);
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = sheet_text("Blank".to_string(), &[]);
        assert_eq!(sheet.text, "Sheet: Blank");
        assert_eq!(sheet.row_count, 0);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("FOB".to_string())), "FOB");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }
}
