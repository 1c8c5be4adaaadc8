use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One product line-item at a single barcode within an outlet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    pub name: String,
    pub product_id: i64,
    pub opening_quantity: f64,
    pub delivery_quantity: f64,
    pub sold_quantity: f64,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_opening_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_delivery_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_sold_quantity: Option<f64>,
}

impl ProductRecord {
    /// Correctness heuristic over the catalog name: the lowercased name must
    /// contain an 'x' and the raw name a literal '*'.
    pub fn name_marks_correct(name: &str) -> bool {
        name.to_lowercase().contains('x') && name.contains('*')
    }

    pub fn effective_opening(&self) -> f64 {
        self.correct_opening_quantity.unwrap_or(self.opening_quantity)
    }

    pub fn effective_delivery(&self) -> f64 {
        self.correct_delivery_quantity.unwrap_or(self.delivery_quantity)
    }

    pub fn effective_sold(&self) -> f64 {
        self.correct_sold_quantity.unwrap_or(self.sold_quantity)
    }
}

/// All records sharing one barcode within one outlet, in parse order.
pub type BarcodeGroup = Vec<ProductRecord>;

/// Barcode → group, for a single outlet.
pub type OutletGroups = BTreeMap<String, BarcodeGroup>;

/// Parsed input: outlet name → barcode groups.
#[derive(Debug, Default)]
pub struct StockInput {
    pub outlets: BTreeMap<String, OutletGroups>,
}

// ---------------------------------------------------------------------------
// Reconciliation outcomes
// ---------------------------------------------------------------------------

/// One duplicate group after reconciliation. `records` is an annotated copy
/// ordered by descending product id; the parsed input is left untouched.
#[derive(Debug)]
pub struct GroupOutcome {
    pub records: Vec<ProductRecord>,
    /// Elected record, when the group kept exactly one correct record.
    pub correct_id: Option<i64>,
    /// Ids slated for deletion. Empty when no record was elected.
    pub deletable_ids: Vec<i64>,
}

/// One outlet's fold result. The engine merges these across outlets; there
/// is no accumulator shared between outlets.
#[derive(Debug, Default)]
pub struct OutletOutcome {
    /// Barcode → annotated duplicate group.
    pub duplicates: BTreeMap<String, Vec<ProductRecord>>,
    pub corrected: Vec<CorrectedRow>,
    pub deletable_ids: BTreeSet<i64>,
}

/// One row of the corrected-quantities CSV export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CorrectedRow {
    pub product_id: i64,
    pub outlet: String,
    pub correct_opening_quantity: f64,
    pub correct_sold_quantity: f64,
    pub correct_delivery_quantity: f64,
    /// Pipe-joined ids of the group's non-correct records.
    pub incorrect_product_ids: String,
}

// ---------------------------------------------------------------------------
// Summary + Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileSummary {
    pub outlets: usize,
    pub outlets_with_duplicates: usize,
    pub duplicate_groups: usize,
    pub corrected_groups: usize,
    /// Duplicate groups where no record carried the correct flag.
    pub unresolved_groups: usize,
    pub deletable_products: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResult {
    pub meta: ReconcileMeta,
    pub summary: ReconcileSummary,
    /// Outlet → barcode → annotated duplicate group. Only outlets with at
    /// least one duplicate group appear here.
    pub outlets: BTreeMap<String, BTreeMap<String, Vec<ProductRecord>>>,
    /// Ascending ids safe to delete from the source catalog.
    pub products_to_delete: Vec<i64>,
    pub corrected: Vec<CorrectedRow>,
}
