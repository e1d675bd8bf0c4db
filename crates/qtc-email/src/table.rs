//! Key/value table matcher for HTML email bodies

use crate::error::EmailError;
use qtc_domain::TableData;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const TABLE: &str = "table";
const ROW: &str = "tr";
const CELL: &str = "th, td";

/// Number of leading cells inspected for the header labels
const HEADER_CELLS: usize = 4;

/// Labels of the matcher's own header row, never emitted as keys
const HEADER_LABELS: [&str; 2] = ["description", "values"];

struct TableSelectors {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl TableSelectors {
    fn new() -> Result<Self, EmailError> {
        Ok(Self {
            table: compile(TABLE)?,
            row: compile(ROW)?,
            cell: compile(CELL)?,
        })
    }
}

fn compile(selector: &'static str) -> Result<Selector, EmailError> {
    Selector::parse(selector).map_err(|e| EmailError::Selector {
        selector,
        reason: e.to_string(),
    })
}

/// Recover the key/value mapping of the quote table in an HTML body
///
/// Never fails: any internal error is logged and yields an empty mapping.
pub fn parse_key_value_table(html: &str) -> TableData {
    match try_parse_key_value_table(html) {
        Ok(data) => data,
        Err(e) => {
            warn!("Error parsing key/value table: {}", e);
            TableData::new()
        }
    }
}

/// Fallible form of [`parse_key_value_table`]
pub fn try_parse_key_value_table(html: &str) -> Result<TableData, EmailError> {
    if html.is_empty() {
        return Ok(TableData::new());
    }

    let selectors = TableSelectors::new()?;
    let document = Html::parse_document(html);
    let tables: Vec<ElementRef<'_>> = document.select(&selectors.table).collect();

    let primary = tables
        .iter()
        .copied()
        .find(|table| has_description_values_header(*table, &selectors));

    let main = match primary {
        Some(table) => table,
        None => match most_rows(&tables, &selectors) {
            Some(table) => {
                debug!("No Description/Values table among {}, using the longest", tables.len());
                table
            }
            None => {
                debug!("No tables in email body");
                return Ok(TableData::new());
            }
        },
    };

    let data = table_rows(main, &selectors);
    debug!("Recovered {} key/value pair(s)", data.len());
    Ok(data)
}

fn has_description_values_header(table: ElementRef<'_>, selectors: &TableSelectors) -> bool {
    let header = table
        .select(&selectors.cell)
        .take(HEADER_CELLS)
        .map(|cell| stripped_text(cell).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    HEADER_LABELS.iter().all(|label| header.contains(label))
}

/// The table with the most rows; the earliest one wins a tie
fn most_rows<'a>(tables: &[ElementRef<'a>], selectors: &TableSelectors) -> Option<ElementRef<'a>> {
    let mut best: Option<(ElementRef<'a>, usize)> = None;
    for table in tables {
        let rows = table.select(&selectors.row).count();
        if best.map_or(true, |(_, most)| rows > most) {
            best = Some((*table, rows));
        }
    }
    best.map(|(table, _)| table)
}

fn table_rows(table: ElementRef<'_>, selectors: &TableSelectors) -> TableData {
    let mut data = TableData::new();

    for row in table.select(&selectors.row) {
        let cells: Vec<ElementRef<'_>> = row.select(&selectors.cell).collect();
        if cells.len() < 2 {
            continue;
        }

        let key = clean_text(&stripped_text(cells[0]));
        let value = clean_text(&stripped_text(cells[1]));

        let lowered = key.to_lowercase();
        if key.is_empty() || HEADER_LABELS.contains(&lowered.as_str()) {
            continue;
        }
        data.insert(key, value);
    }

    data
}

/// Text of every descendant node, each trimmed, blanks dropped, concatenated
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize cell text: decode HTML entities, collapse whitespace runs, trim
///
/// Applied until nothing changes, so `clean_text(clean_text(x)) == clean_text(x)`.
///
/// # Examples
///
/// ```
/// use qtc_email::clean_text;
///
/// assert_eq!(clean_text("a   b\n c"), "a b c");
/// assert_eq!(clean_text("Ships &amp; Co"), "Ships & Co");
/// ```
pub fn clean_text(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = html_escape::decode_html_entities(&current)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if next == current {
            return next;
        }
        current = next;
    }
}
