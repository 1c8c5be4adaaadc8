//! `srec run` / `srec validate` — drive the engine over one export.

use std::path::{Path, PathBuf};

use stockrec_recon::model::ReconcileResult;
use stockrec_recon::{load_stock_rows, run, StockConfig};

use crate::emit;
use crate::CliError;

fn load_config(path: Option<&Path>) -> Result<StockConfig, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
            StockConfig::from_toml(&text).map_err(CliError::engine)
        }
        None => Ok(StockConfig::default()),
    }
}

fn reconcile_file(input: &Path, config: &StockConfig) -> Result<ReconcileResult, CliError> {
    let csv_data = std::fs::read_to_string(input)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", input.display())))?;
    let stock = load_stock_rows(&csv_data, &config.columns).map_err(CliError::engine)?;
    run(config, &stock).map_err(CliError::engine)
}

pub fn cmd_run(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    json_output: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let result = reconcile_file(&input, &config)?;

    let dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir));
    emit::write_artifacts(&result, &config, &dir, quiet)?;

    if json_output {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if !quiet {
        print_summary(&result);
    }

    Ok(())
}

pub fn cmd_validate(input: PathBuf, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let result = reconcile_file(&input, &config)?;

    let s = &result.summary;
    eprintln!(
        "valid: {} outlet(s), {} duplicate group(s) — a run would correct {} and delete {} product(s)",
        s.outlets, s.duplicate_groups, s.corrected_groups, s.deletable_products,
    );

    Ok(())
}

// Human summary to stderr
fn print_summary(result: &ReconcileResult) {
    let s = &result.summary;
    eprintln!(
        "{} outlet(s), {} with duplicates: {} group(s) — {} corrected, {} unresolved, {} product(s) to delete",
        s.outlets,
        s.outlets_with_duplicates,
        s.duplicate_groups,
        s.corrected_groups,
        s.unresolved_groups,
        s.deletable_products,
    );
}
