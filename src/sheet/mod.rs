//! Sheet-to-record conversion: metadata parsing, column classification and
//! record extraction.

pub mod columns;
pub mod extract;
pub mod meta;

pub use columns::{ColumnPlan, ExportColumn, UNEXPORT_PREFIX};
pub use extract::{extract_csv, extract_records, CsvPolicy, CsvRows, Target};
pub use meta::{SheetMeta, HEADER_ROWS};
