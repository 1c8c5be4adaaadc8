use std::collections::BTreeMap;

use crate::model::{BarcodeGroup, OutletGroups};

/// Barcode groups holding two or more records, borrowed from the outlet.
/// Singleton groups take no part in reconciliation but stay in the outlet
/// data untouched.
pub fn duplicate_groups(groups: &OutletGroups) -> BTreeMap<&str, &BarcodeGroup> {
    groups
        .iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|(barcode, group)| (barcode.as_str(), group))
        .collect()
}
