use std::fmt;

#[derive(Debug)]
pub enum StockError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty or duplicated column names).
    ConfigValidation(String),
    /// Missing required column in the input header row.
    MissingColumn { column: String },
    /// Numeric parse error. `row` is the 1-based data-row index.
    NumberParse { row: usize, column: String, value: String },
    /// IO error (file read, CSV record error).
    Io(String),
}

impl fmt::Display for StockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "missing column '{column}' in header row")
            }
            Self::NumberParse { row, column, value } => {
                write!(f, "row {row}, column '{column}': cannot parse number '{value}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for StockError {}
