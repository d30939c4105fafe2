//! Workbook reading - one .xlsx file to a set of textual sheet grids

use crate::error::{ExportError, ExportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// One sheet, fully materialized as rows of cell text at absolute
/// coordinates. The tables this tool consumes store everything as text (or
/// numbers rendered as text); formulas are already resolved by calamine.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    /// Cell text at (row, col); absent cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Widest row in the grid, in cells.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Open a workbook file and read every sheet into a [`SheetGrid`].
///
/// Each call owns its own workbook handle; nothing is shared across files.
pub fn load_workbook(path: &Path) -> ExportResult<Vec<SheetGrid>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| ExportError::Workbook(format!("file: {} open err: {e}", path.display())))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in sheet_names {
        let range = workbook.worksheet_range(&name).map_err(|e| {
            ExportError::Workbook(format!("file: {} sheet: {name} read err: {e}", path.display()))
        })?;

        // calamine anchors the range at the first used cell; pad the grid
        // back out so row/column indices stay absolute.
        let (start_row, start_col) = match range.start() {
            Some((r, c)) => (r as usize, c as usize),
            None => (0, 0), // empty sheet
        };

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row];
        for cells in range.rows() {
            let mut row = vec![String::new(); start_col];
            row.extend(cells.iter().map(cell_text));
            rows.push(row);
        }

        sheets.push(SheetGrid { name, rows });
    }

    Ok(sheets)
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
