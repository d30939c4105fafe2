//! Tableport - spreadsheet game-config tables to server/client data files
//!
//! This library converts workbook sheets that follow a fixed three-row
//! header convention (metadata, titles, types) into two divergent output
//! artifacts per sheet: one for the game server, one for the game client,
//! as delimited text or compact JSON.
//!
//! # Features
//!
//! - `#`-delimited routing metadata in row 0 (target flags, row limit)
//! - Column filtering via the `UNEXPORT_` marker and blank titles
//! - Per-column server/client type pairs (`int#string`) with coercion
//! - Overwrite-skip policy and two-phase client writes
//! - Fatal errors wipe the partial server output directory
//!
//! # Example
//!
//! ```no_run
//! use tableport::{ExportOptions, Exporter};
//!
//! let mut options = ExportOptions::new("tables", "out");
//! options.all_files = true;
//!
//! let mut exporter = Exporter::new(options);
//! exporter.set_progress(|completed, total| {
//!     println!("{completed} / {total}");
//! });
//! exporter.run()?;
//! # Ok::<(), tableport::ExportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod render;
pub mod sheet;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use error::{ExportError, ExportResult};
pub use exporter::{Exporter, PendingWrite};
pub use types::{ExportOptions, FieldValue, OutputFormat, Record, TypeTag};
