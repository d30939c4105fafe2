//! Export orchestration - one full input-dir to output-dir run
//!
//! The run is strictly sequential: a server phase over every selected
//! workbook, a check phase over the server artifacts, then a deferred phase
//! that commits all client artifacts together. Any fatal error removes the
//! partially-written server directory before it is returned.

use crate::error::{ExportError, ExportResult};
use crate::render;
use crate::sheet::{self, ColumnPlan, CsvPolicy, SheetMeta, Target, HEADER_ROWS};
use crate::types::{ExportOptions, OutputFormat};
use crate::workbook::{load_workbook, SheetGrid};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Progress callback: `(completed, total)`, invoked synchronously from
/// inside the run, zero or more times before [`Exporter::run`] returns.
pub type ProgressFn = Box<dyn FnMut(usize, usize)>;

/// A queued second-phase write. Client artifacts only commit after every
/// input file's server phase has finished, so a late fatal error never
/// leaves the client set ahead of the server set.
pub struct PendingWrite {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// One server artifact written this run; re-verified in the check phase.
struct ExportedSheet {
    file_stem: String,
    sheet_name: String,
    path: PathBuf,
}

pub struct Exporter {
    options: ExportOptions,
    server_dir: PathBuf,
    client_dir: PathBuf,
    progress: Option<ProgressFn>,
    log: Option<File>,
    deferred: Vec<PendingWrite>,
    exported: Vec<ExportedSheet>,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        let server_dir = options.output_dir.join("server");
        let client_dir = options.output_dir.join("client");
        Self {
            options,
            server_dir,
            client_dir,
            progress: None,
            log: None,
            deferred: Vec::new(),
            exported: Vec::new(),
        }
    }

    pub fn set_progress(&mut self, callback: impl FnMut(usize, usize) + 'static) {
        self.progress = Some(Box::new(callback));
    }

    pub fn server_dir(&self) -> &Path {
        &self.server_dir
    }

    pub fn client_dir(&self) -> &Path {
        &self.client_dir
    }

    /// Execute the run. Soft issues go to the error-log sink and the run
    /// continues; a fatal error removes the server output directory and is
    /// returned as the single run error.
    pub fn run(&mut self) -> ExportResult<()> {
        if let Some(path) = self.options.error_log.clone() {
            self.log = Some(File::create(&path)?);
        }

        let result = self.run_phases();
        if result.is_err() {
            let _ = fs::remove_dir_all(&self.server_dir);
        }
        result
    }

    fn run_phases(&mut self) -> ExportResult<()> {
        let files = self.input_files()?;

        fs::create_dir_all(&self.server_dir)?;
        if self.options.format == OutputFormat::Csv {
            fs::create_dir_all(&self.client_dir)?;
        }

        for name in &files {
            if name.starts_with('~') || name.starts_with('.') {
                continue; // editor temp / hidden files
            }
            if !self.options.all_files && !self.options.filenames.contains(name) {
                continue;
            }
            let path = self.options.input_dir.join(name);
            self.process_file(&path)?;
        }

        // The denominator is fixed here: files walked + artifacts to check
        // + client writes still queued.
        let mut counter = files.len();
        let total = files.len() + self.exported.len() + self.deferred.len();
        self.report_progress(counter, total);

        let exported = std::mem::take(&mut self.exported);
        for entry in &exported {
            self.check_artifact(entry)?;
            counter += 1;
            self.report_progress(counter, total);
        }

        let deferred = std::mem::take(&mut self.deferred);
        for write in deferred {
            if let Err(e) = fs::write(&write.path, &write.bytes) {
                self.log_error(&format!("file: {} write err: {e}", write.path.display()));
            }
            counter += 1;
            self.report_progress(counter, total);
        }

        Ok(())
    }

    /// All entry names in the input directory, sorted for a deterministic
    /// walk order.
    fn input_files(&self) -> ExportResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.options.input_dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn process_file(&mut self, path: &Path) -> ExportResult<()> {
        let sheets = match load_workbook(path) {
            Ok(sheets) => sheets,
            Err(e) => {
                // Unreadable workbook is a per-file soft failure
                self.log_error(&e.to_string());
                return Ok(());
            }
        };

        let stem = file_stem(path);
        for grid in &sheets {
            self.process_sheet(&stem, grid)?;
        }
        Ok(())
    }

    fn process_sheet(&mut self, file_stem: &str, grid: &SheetGrid) -> ExportResult<()> {
        if grid.rows.len() < HEADER_ROWS {
            self.log_sheet_error(file_stem, &grid.name, "missing header rows 0-2");
            return Ok(());
        }

        let meta = SheetMeta::parse(grid.cell(0, 0));
        if meta.export_name.trim().is_empty() {
            self.log_sheet_error(file_stem, &grid.name, "missing metadata header");
            return Ok(());
        }
        if meta.invalid_row_limit() {
            return Err(ExportError::Meta(format!(
                "check sheet <<{file_stem}>> - {}: row limit must be 0 (unlimited) or at least \
                 {HEADER_ROWS}; rows 0-2 are required headers",
                grid.name
            )));
        }

        let file_name = format!("{}.{}", meta.export_name, self.options.format.extension());
        let server_path = self.server_dir.join(&file_name);
        let client_path = self.client_dir.join(&file_name);

        let mut for_server = meta.for_server;
        // The structured-document artifact is produced for the server side only
        let mut for_client = meta.for_client && self.options.format == OutputFormat::Csv;

        if for_server && !self.options.force && server_path.exists() {
            for_server = false;
            self.log_warn(&format!("file: {} exist skip", server_path.display()));
        }
        if for_client && !self.options.force && client_path.exists() {
            for_client = false;
            self.log_warn(&format!("file: {} exist skip", client_path.display()));
        }
        if !for_server && !for_client {
            return Ok(());
        }

        let plan = ColumnPlan::classify(grid);

        match self.options.format {
            OutputFormat::Csv => {
                let policy = CsvPolicy::for_export_name(&meta.export_name);
                let rows = sheet::extract_csv(grid, &meta, &plan, &policy);
                if for_server {
                    let content = render::csv::render(&rows.server);
                    self.write_server_artifact(file_stem, &grid.name, &server_path, content.into_bytes());
                }
                if for_client {
                    let content = render::csv::render(&rows.client);
                    self.deferred.push(PendingWrite {
                        path: client_path,
                        bytes: content.into_bytes(),
                    });
                }
            }
            OutputFormat::Json => {
                if for_server {
                    let records = sheet::extract_records(grid, &meta, &plan, Target::Server);
                    let bytes = render::json::render(&records)?;
                    self.write_server_artifact(file_stem, &grid.name, &server_path, bytes);
                }
            }
        }

        Ok(())
    }

    /// Write one server artifact now; a failed write is a per-sheet soft
    /// failure, a successful one is queued for the check phase.
    fn write_server_artifact(
        &mut self,
        file_stem: &str,
        sheet_name: &str,
        path: &Path,
        bytes: Vec<u8>,
    ) {
        if let Err(e) = fs::write(path, bytes) {
            self.log_sheet_error(file_stem, sheet_name, &e.to_string());
            return;
        }
        self.exported.push(ExportedSheet {
            file_stem: file_stem.to_string(),
            sheet_name: sheet_name.to_string(),
            path: path.to_path_buf(),
        });
    }

    fn check_artifact(&self, entry: &ExportedSheet) -> ExportResult<()> {
        let build_err = |msg: String| {
            ExportError::Check(format!(
                "check server file <<{}>> - {}: {msg}",
                entry.file_stem, entry.sheet_name
            ))
        };
        let metadata = fs::metadata(&entry.path).map_err(|e| build_err(e.to_string()))?;
        if metadata.len() == 0 {
            return Err(build_err(format!("{} is empty", entry.path.display())));
        }
        Ok(())
    }

    fn report_progress(&mut self, counter: usize, total: usize) {
        if let Some(callback) = self.progress.as_mut() {
            callback(counter, total);
        }
    }

    fn log_line(&mut self, flag: &str, content: &str) {
        if let Some(file) = self.log.as_mut() {
            let _ = writeln!(file, "[{flag}] {content}");
        }
    }

    fn log_warn(&mut self, content: &str) {
        self.log_line("warn", content);
    }

    fn log_error(&mut self, content: &str) {
        self.log_line("error", content);
    }

    fn log_sheet_error(&mut self, file: &str, sheet: &str, err: &str) {
        self.log_error(&format!("file: {file}, sheet: {sheet}, err: {err}"));
    }
}

/// Workbook base name up to the first dot, matching the historical naming of
/// table files like `Item.v2.xlsx`.
fn file_stem(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_stem_stops_at_first_dot() {
        assert_eq!(file_stem(Path::new("/data/Item.xlsx")), "Item");
        assert_eq!(file_stem(Path::new("Item.v2.xlsx")), "Item");
        assert_eq!(file_stem(Path::new("noext")), "noext");
    }

    #[test]
    fn test_output_dirs_derived_from_options() {
        let exporter = Exporter::new(ExportOptions::new("in", "out"));
        assert_eq!(exporter.server_dir(), Path::new("out/server"));
        assert_eq!(exporter.client_dir(), Path::new("out/client"));
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let mut options = ExportOptions::new(tmp.path().join("nope"), tmp.path().join("out"));
        options.all_files = true;

        let err = Exporter::new(options).run().unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
