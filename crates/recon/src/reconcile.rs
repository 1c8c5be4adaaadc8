use crate::detect::duplicate_groups;
use crate::model::{CorrectedRow, GroupOutcome, OutletGroups, OutletOutcome, ProductRecord};

/// Reconcile one duplicate group. Works on a copy; the parsed records stay
/// inspectable as ingested.
///
/// Ordering is by descending product id (stable, so equal ids keep their
/// parse order). When several records carry the correct flag, only the one
/// with the highest id keeps it. The surviving correct record receives the
/// quantities summed over the WHOLE group, correct and incorrect alike, and
/// every non-correct record's id becomes deletable. A group with no correct
/// record is reported but produces neither corrected quantities nor
/// deletions.
pub fn reconcile_group(group: &[ProductRecord]) -> GroupOutcome {
    let mut records: Vec<ProductRecord> = group.to_vec();
    records.sort_by(|a, b| b.product_id.cmp(&a.product_id));

    let flagged: Vec<i64> = records
        .iter()
        .filter(|r| r.is_correct)
        .map(|r| r.product_id)
        .collect();
    if flagged.len() > 1 {
        if let Some(highest) = flagged.iter().copied().max() {
            for record in records.iter_mut() {
                if record.is_correct && record.product_id != highest {
                    record.is_correct = false;
                }
            }
        }
    }

    let mut correct_id = None;
    let mut deletable_ids = Vec::new();

    if let Some(pos) = records.iter().position(|r| r.is_correct) {
        let opening = records.iter().map(|r| r.opening_quantity).sum();
        let delivery = records.iter().map(|r| r.delivery_quantity).sum();
        let sold = records.iter().map(|r| r.sold_quantity).sum();

        let elected = &mut records[pos];
        elected.correct_opening_quantity = Some(opening);
        elected.correct_delivery_quantity = Some(delivery);
        elected.correct_sold_quantity = Some(sold);
        correct_id = Some(elected.product_id);

        deletable_ids = records
            .iter()
            .filter(|r| !r.is_correct)
            .map(|r| r.product_id)
            .collect();
    }

    GroupOutcome { records, correct_id, deletable_ids }
}

/// Reconcile every duplicate group in one outlet. Pure fold step: the
/// caller merges each outlet's outcome into the run-wide result.
pub fn reconcile_outlet(outlet_name: &str, groups: &OutletGroups) -> OutletOutcome {
    let mut outcome = OutletOutcome::default();

    for (barcode, group) in duplicate_groups(groups) {
        let reconciled = reconcile_group(group);

        if reconciled.correct_id.is_some() {
            if let Some(elected) = reconciled.records.iter().find(|r| r.is_correct) {
                let incorrect: Vec<String> = reconciled
                    .records
                    .iter()
                    .filter(|r| !r.is_correct)
                    .map(|r| r.product_id.to_string())
                    .collect();

                outcome.corrected.push(CorrectedRow {
                    product_id: elected.product_id,
                    outlet: outlet_name.to_string(),
                    correct_opening_quantity: elected.effective_opening(),
                    correct_sold_quantity: elected.effective_sold(),
                    correct_delivery_quantity: elected.effective_delivery(),
                    incorrect_product_ids: incorrect.join("|"),
                });
            }
            outcome.deletable_ids.extend(reconciled.deletable_ids.iter().copied());
        }

        outcome.duplicates.insert(barcode.to_string(), reconciled.records);
    }

    outcome
}
