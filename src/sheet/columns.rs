//! Column classification - one frozen export decision per column

use crate::sheet::extract::normalize_header;
use crate::types::TypeTag;
use crate::workbook::SheetGrid;

/// Columns whose row-0 identifier starts with this marker never reach any
/// output.
pub const UNEXPORT_PREFIX: &str = "UNEXPORT_";

/// One column that survived classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportColumn {
    /// Source column position in the sheet
    pub index: usize,
    /// Row-0 identifier, normalized for single-line output
    pub field: String,
    /// Row-1 title; the output field name for record formats
    pub title: String,
    /// Row-2 type text, left of `#`
    pub server_type_text: String,
    /// Row-2 type text, right of `#` (same as server when no `#`)
    pub client_type_text: String,
    pub server_type: TypeTag,
    pub client_type: TypeTag,
}

/// The per-sheet export plan: which columns are included and how their
/// values coerce for each target. Computed once from the three header rows
/// and reused for every data row.
#[derive(Debug, Clone, Default)]
pub struct ColumnPlan {
    pub columns: Vec<ExportColumn>,
}

impl ColumnPlan {
    /// Classify every column of the sheet from rows 0-2.
    ///
    /// A column is excluded when its identifier is blank or carries the
    /// [`UNEXPORT_PREFIX`] marker, or when its title is blank. Excluded
    /// columns are dropped from every output row, header rows included.
    pub fn classify(grid: &SheetGrid) -> Self {
        let mut columns = Vec::new();

        for index in 0..grid.width() {
            let identifier = grid.cell(0, index);
            let field = normalize_header(identifier);
            if identifier.trim().is_empty() || field.starts_with(UNEXPORT_PREFIX) {
                continue;
            }

            let title = grid.cell(1, index);
            if title.trim().is_empty() {
                // A title is mandatory once a column is considered for export
                continue;
            }

            let type_cell = grid.cell(2, index);
            let (server_text, client_text) = match type_cell.split_once('#') {
                Some((server, client)) => (server, client),
                None => (type_cell, type_cell),
            };

            columns.push(ExportColumn {
                index,
                field,
                title: title.to_string(),
                server_type_text: server_text.to_string(),
                client_type_text: client_text.to_string(),
                server_type: TypeTag::parse(server_text),
                client_type: TypeTag::parse(client_text),
            });
        }

        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
