use std::collections::{BTreeMap, BTreeSet};

use crate::config::StockConfig;
use crate::error::StockError;
use crate::model::{ReconcileMeta, ReconcileResult, ReconcileSummary, StockInput};
use crate::reconcile::reconcile_outlet;

/// Run the reconciliation pass: fold over outlets in name order, merge each
/// outlet's outcome into the run-wide result.
pub fn run(config: &StockConfig, input: &StockInput) -> Result<ReconcileResult, StockError> {
    let mut outlets = BTreeMap::new();
    let mut deletable: BTreeSet<i64> = BTreeSet::new();
    let mut corrected = Vec::new();
    let mut duplicate_groups = 0usize;
    let mut unresolved_groups = 0usize;

    for (outlet_name, groups) in &input.outlets {
        let outcome = reconcile_outlet(outlet_name, groups);

        duplicate_groups += outcome.duplicates.len();
        unresolved_groups += outcome.duplicates.len() - outcome.corrected.len();
        deletable.extend(outcome.deletable_ids.iter().copied());
        corrected.extend(outcome.corrected);

        if !outcome.duplicates.is_empty() {
            outlets.insert(outlet_name.clone(), outcome.duplicates);
        }
    }

    let summary = ReconcileSummary {
        outlets: input.outlets.len(),
        outlets_with_duplicates: outlets.len(),
        duplicate_groups,
        corrected_groups: corrected.len(),
        unresolved_groups,
        deletable_products: deletable.len(),
    };

    Ok(ReconcileResult {
        meta: ReconcileMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        outlets,
        products_to_delete: deletable.into_iter().collect(),
        corrected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnMapping;
    use crate::ingest::load_stock_rows;

    const HEADER: &str = "Outlet,Barcode,Name,ProductId,OpeningQuantity,DeliveryQuantity,SoldQuantity\n";

    fn run_csv(csv: &str) -> ReconcileResult {
        let input = load_stock_rows(csv, &ColumnMapping::default()).unwrap();
        run(&StockConfig::default(), &input).unwrap()
    }

    #[test]
    fn end_to_end_worked_example() {
        let csv = format!(
            "{HEADER}\
Store A,999,Widget x*,10,5,0,0
Store A,999,Widget,20,7,0,0
"
        );
        let result = run_csv(&csv);

        assert_eq!(result.summary.outlets, 1);
        assert_eq!(result.summary.duplicate_groups, 1);
        assert_eq!(result.summary.corrected_groups, 1);
        assert_eq!(result.summary.unresolved_groups, 0);

        let group = &result.outlets["Store A"]["999"];
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].product_id, 20);
        assert!(group[1].is_correct);
        assert_eq!(group[1].correct_opening_quantity, Some(12.0));

        assert_eq!(result.products_to_delete, vec![20]);

        let row = &result.corrected[0];
        assert_eq!(row.product_id, 10);
        assert_eq!(row.outlet, "Store A");
        assert_eq!(row.correct_opening_quantity, 12.0);
        assert_eq!(row.incorrect_product_ids, "20");
    }

    #[test]
    fn deletable_ids_merge_across_outlets_ascending() {
        let csv = format!(
            "{HEADER}\
Store B,111,Widget x*,40,1,0,0
Store B,111,Widget,30,1,0,0
Store A,222,Gadget x*,20,1,0,0
Store A,222,Gadget,10,1,0,0
"
        );
        let result = run_csv(&csv);
        assert_eq!(result.products_to_delete, vec![10, 30]);
        // corrected rows follow outlet name order
        assert_eq!(result.corrected[0].outlet, "Store A");
        assert_eq!(result.corrected[1].outlet, "Store B");
    }

    #[test]
    fn outlets_without_duplicates_not_reported() {
        let csv = format!(
            "{HEADER}\
Store A,111,Widget x*,10,1,0,0
Store A,111,Widget,20,1,0,0
Store B,999,Gadget,30,1,0,0
"
        );
        let result = run_csv(&csv);
        assert_eq!(result.summary.outlets, 2);
        assert_eq!(result.summary.outlets_with_duplicates, 1);
        assert!(result.outlets.contains_key("Store A"));
        assert!(!result.outlets.contains_key("Store B"));
    }

    #[test]
    fn meta_carries_engine_version() {
        let result = run_csv(HEADER);
        assert_eq!(result.meta.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.meta.config_name, "stock-position");
    }
}
