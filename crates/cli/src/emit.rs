//! Report emission: per-outlet JSON, deletable-id list, corrected CSV.
//!
//! Plain create/truncate writes. Files already written stay on disk when a
//! later write fails.

use std::path::Path;

use stockrec_recon::model::ReconcileResult;
use stockrec_recon::StockConfig;

use crate::CliError;

/// Corrected-products header, written even when no group was corrected.
const CORRECTED_HEADER: [&str; 6] = [
    "ProductId",
    "Outlet",
    "CorrectOpeningQuantity",
    "CorrectSoldQuantity",
    "CorrectDeliveryQuantity",
    "IncorrectProductIds",
];

/// Outlet display name as a report filename: spaces and path separators
/// become underscores.
pub fn outlet_file_name(outlet: &str) -> String {
    let sanitized: String = outlet
        .chars()
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{sanitized}.json")
}

/// Write all three artifact kinds into `dir`, creating it if absent.
pub fn write_artifacts(
    result: &ReconcileResult,
    config: &StockConfig,
    dir: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", dir.display())))?;

    for (outlet, groups) in &result.outlets {
        let path = dir.join(outlet_file_name(outlet));
        let json = serde_json::to_string_pretty(groups)
            .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
        std::fs::write(&path, json)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    let path = dir.join(&config.output.delete_list);
    let json = serde_json::to_string_pretty(&result.products_to_delete)
        .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
    std::fs::write(&path, json)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
    if !quiet {
        eprintln!("wrote {}", path.display());
    }

    let path = dir.join(&config.output.corrected_csv);
    write_corrected_csv(result, &path)?;
    if !quiet {
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}

fn write_corrected_csv(result: &ReconcileResult, path: &Path) -> Result<(), CliError> {
    let write_err = |e: &dyn std::fmt::Display| {
        CliError::io(format!("cannot write {}: {e}", path.display()))
    };

    // Manual header so the file carries one even with zero corrected rows
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_err(&e))?;

    writer.write_record(CORRECTED_HEADER).map_err(|e| write_err(&e))?;
    for row in &result.corrected {
        writer.serialize(row).map_err(|e| write_err(&e))?;
    }
    writer.flush().map_err(|e| write_err(&e))?;

    Ok(())
}
