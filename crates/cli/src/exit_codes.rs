//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Description                                        |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | CLI usage error (bad args)                         |
//! | 3    | Parse error (malformed row, missing column, config)|
//! | 4    | IO error (unreadable input, unwritable output)     |

use stockrec_recon::StockError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Parse error - malformed data row, missing header column, bad config.
pub const EXIT_PARSE: u8 = 3;

/// IO error - input unreadable, output directory unwritable.
pub const EXIT_IO: u8 = 4;

/// Map an engine error to its exit code.
pub fn engine_exit_code(err: &StockError) -> u8 {
    match err {
        StockError::ConfigParse(_)
        | StockError::ConfigValidation(_)
        | StockError::MissingColumn { .. }
        | StockError::NumberParse { .. } => EXIT_PARSE,
        StockError::Io(_) => EXIT_IO,
    }
}
