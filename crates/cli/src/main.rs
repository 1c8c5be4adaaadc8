// StockRec CLI - batch reconciliation of stock-position exports

mod convert;
mod emit;
mod exit_codes;
mod reconcile;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "srec")]
#[command(about = "Duplicate-barcode reconciliation for retail stock-position exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an export and write the report artifacts
    #[command(after_help = "\
Writes into the output directory:
  <outlet>.json               (one per outlet with duplicate groups)
  products_to_delete.json     (ascending ids safe to delete upstream)
  correct_products.csv        (corrected quantities for re-import)

Examples:
  srec run stock-position.csv
  srec run stock-position.csv --output-dir reports --json
  srec run stock-position.csv --config close.toml --quiet")]
    Run {
        /// Input stock-position CSV
        input: PathBuf,

        /// TOML config (column mapping, output names)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory (overrides the config's)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the full result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Parse and reconcile without writing anything
    #[command(after_help = "\
Examples:
  srec validate stock-position.csv
  srec validate stock-position.csv --config close.toml")]
    Validate {
        /// Input stock-position CSV
        input: PathBuf,

        /// TOML config (column mapping, output names)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert a CSV export to a JSON array of row objects
    #[command(after_help = "\
Strips non-ASCII characters from headers and values and coerces the
identifier/quantity columns to integers (0 when non-numeric).

Examples:
  srec convert stock-position.csv
  srec convert stock-position.csv --output-dir input")]
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output directory (default: alongside the input)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { input, config, output_dir, json, quiet } => {
            reconcile::cmd_run(input, config, output_dir, json, quiet)
        }
        Commands::Validate { input, config } => reconcile::cmd_validate(input, config),
        Commands::Convert { input, output_dir, quiet } => {
            convert::cmd_convert(input, output_dir, quiet)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Internal failure with no better classification.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from an engine error with the matching exit code.
    pub fn engine(err: stockrec_recon::StockError) -> Self {
        let code = exit_codes::engine_exit_code(&err);
        Self { code, message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
