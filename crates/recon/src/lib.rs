//! `stockrec-recon` — duplicate-barcode reconciliation engine.
//!
//! Pure engine crate: receives stock-position text, returns reconciled
//! results. No CLI or filesystem-write dependencies.

pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod model;
pub mod reconcile;

pub use config::StockConfig;
pub use engine::run;
pub use error::StockError;
pub use ingest::load_stock_rows;
pub use model::{ProductRecord, ReconcileResult, StockInput};
