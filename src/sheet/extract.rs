//! Record extraction - data rows to per-target output values

use crate::sheet::columns::ColumnPlan;
use crate::sheet::meta::{SheetMeta, HEADER_ROWS};
use crate::types::Record;
use crate::workbook::SheetGrid;

/// Literal token a value-row newline collapses to, keeping delimited output
/// single-line safe.
pub const NEWLINE_TOKEN: &str = "\\n";

/// Full-width substitute for the field separator inside values.
pub const FULLWIDTH_COMMA: char = '，';

/// Sheets whose values get quote-wrapped when they contain the newline token
/// or a comma variant.
const QUOTE_WRAP_SHEETS: &[&str] = &["Language", "BadWords"];

/// Sheets whose values have embedded quote characters stripped outright.
const QUOTE_STRIP_SHEETS: &[&str] = &["BadWords"];

/// Which of the two artifacts a record is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Server,
    Client,
}

/// Normalize a row-0 identifier cell: separators and newlines become spaces.
pub fn normalize_header(raw: &str) -> String {
    raw.replace(',', " ")
        .replace("\r\n", " ")
        .replace('\n', " ")
}

/// Normalize a value cell (rows 1 and up): commas become their full-width
/// substitute, newlines become the literal `\n` token.
pub fn normalize_value(raw: &str) -> String {
    let value = raw.replace(',', "，").replace("\r\n", "\n");
    value.replace('\n', NEWLINE_TOKEN)
}

/// Per-sheet quoting policy for the delimited-text path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvPolicy {
    pub wrap_quotes: bool,
    pub strip_quotes: bool,
}

impl CsvPolicy {
    pub fn for_export_name(name: &str) -> Self {
        Self {
            wrap_quotes: QUOTE_WRAP_SHEETS.contains(&name),
            strip_quotes: QUOTE_STRIP_SHEETS.contains(&name),
        }
    }

    /// Apply quote stripping/wrapping to an already-normalized value.
    /// Wrapped values double their embedded quotes per standard CSV escaping.
    fn apply(&self, value: String) -> String {
        let value = if self.strip_quotes {
            value.replace('"', "")
        } else {
            value
        };
        if self.wrap_quotes
            && (value.contains(NEWLINE_TOKEN)
                || value.contains(',')
                || value.contains(FULLWIDTH_COMMA))
        {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value
        }
    }
}

/// Row matrices for the two delimited-text artifacts.
///
/// The server artifact keeps all three header rows (identifiers, titles,
/// server types); the client artifact starts at the title row and carries the
/// client-side type texts on its type line.
#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    pub server: Vec<Vec<String>>,
    pub client: Vec<Vec<String>>,
}

/// Walk the sheet once and build both CSV row matrices, honoring the frozen
/// column plan, the row limit and the sheet's quoting policy.
pub fn extract_csv(
    grid: &SheetGrid,
    meta: &SheetMeta,
    plan: &ColumnPlan,
    policy: &CsvPolicy,
) -> CsvRows {
    let mut rows = CsvRows::default();

    for row_idx in 0..grid.rows.len() {
        if meta.row_limit > 0 && row_idx >= meta.row_limit {
            break;
        }

        let mut server_row = Vec::with_capacity(plan.columns.len());
        let mut client_row = Vec::with_capacity(plan.columns.len());

        for col in &plan.columns {
            if row_idx == 2 {
                // Type line: the one place the two artifacts diverge textually
                server_row.push(policy.apply(normalize_value(&col.server_type_text)));
                client_row.push(normalize_value(&col.client_type_text));
                continue;
            }
            let value = if row_idx == 0 {
                policy.apply(normalize_header(grid.cell(row_idx, col.index)))
            } else {
                policy.apply(normalize_value(grid.cell(row_idx, col.index)))
            };
            server_row.push(value.clone());
            client_row.push(value);
        }

        rows.server.push(server_row);
        if row_idx > 0 {
            rows.client.push(client_row);
        }
    }

    rows
}

/// Build one record per data row for the given target, coercing each value
/// by the column's type tag for that side.
pub fn extract_records(
    grid: &SheetGrid,
    meta: &SheetMeta,
    plan: &ColumnPlan,
    target: Target,
) -> Vec<Record> {
    let mut records = Vec::new();

    for row_idx in HEADER_ROWS..grid.rows.len() {
        if meta.row_limit > 0 && row_idx >= meta.row_limit {
            break;
        }

        let mut record = Record::new();
        for col in &plan.columns {
            let value = normalize_value(grid.cell(row_idx, col.index));
            let tag = match target {
                Target::Server => col.server_type,
                Target::Client => col.client_type,
            };
            record.push(col.title.clone(), tag.coerce(&value));
        }
        records.push(record);
    }

    records
}
