use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tableport::cli;
use tableport::error::ExportResult;
use tableport::types::OutputFormat;

#[derive(Parser)]
#[command(name = "tableport")]
#[command(about = "Export spreadsheet game-config tables to server/client data files")]
#[command(long_about = "Tableport - batch exporter for spreadsheet game-config tables

Each workbook sheet carries a three-row header convention:
  row 0: field identifiers; cell 0 also holds '#'-delimited routing metadata
         exportName[#forServer[#forClient[#rowLimit]]]
  row 1: human-readable titles (the output field names)
  row 2: type declarations; 'serverType#clientType' splits the two targets

Data rows (row 3 onward) are exported as one file per sheet under
<outputDir>/server/ and <outputDir>/client/. Columns whose identifier is
blank or starts with UNEXPORT_ are never exported.

COMMANDS:
  export       - Convert selected workbooks to csv or json
  save-config  - Persist the directory pair and format as defaults

EXAMPLES:
  tableport export ./tables ./out --all
  tableport export --files Item.xlsx,Skill.xlsx --force --log err.log
  tableport save-config ./tables ./out --format json")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert selected workbooks to csv or json.

Server artifacts are written first, verified, and only then are all client
artifacts committed together - a failure in a later file never leaves the
client set ahead of the server set. Any fatal error deletes the partial
server output directory and aborts the run.

Existing output files are skipped unless --force is given; skips are
warnings, not errors. Per-sheet problems (unreadable sheet, one failed
write) go to the --log file and the run continues.

EXAMPLES:
  tableport export ./tables ./out --all
  tableport export --files Item.xlsx --format json --log err.log")]
    /// Convert selected workbooks to csv or json
    Export {
        /// Directory of .xlsx table files (defaults to the saved config)
        input_dir: Option<PathBuf>,

        /// Output directory receiving server/ and client/ (defaults to the saved config)
        output_dir: Option<PathBuf>,

        /// Output format: csv or json (defaults to the saved config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Overwrite existing output files instead of skipping them
        #[arg(long)]
        force: bool,

        /// Export every workbook in the input directory
        #[arg(short, long)]
        all: bool,

        /// Comma-separated workbook file names to export
        #[arg(long, value_delimiter = ',')]
        files: Vec<String>,

        /// Write per-sheet warnings and errors to this file
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Show selection detail
        #[arg(short, long)]
        verbose: bool,
    },

    /// Persist the directory pair and output format as defaults
    SaveConfig {
        /// Directory of .xlsx table files
        input_dir: PathBuf,

        /// Output directory receiving server/ and client/
        output_dir: PathBuf,

        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },
}

fn main() -> ExportResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input_dir,
            output_dir,
            format,
            force,
            all,
            files,
            log,
            verbose,
        } => cli::export(input_dir, output_dir, format, force, all, files, log, verbose),

        Commands::SaveConfig {
            input_dir,
            output_dir,
            format,
        } => cli::save_config(input_dir, output_dir, format),
    }
}
