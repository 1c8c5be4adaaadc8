use crate::config::ColumnMapping;
use crate::error::StockError;
use crate::model::{ProductRecord, StockInput};

/// Parse a stock-position export into outlet-scoped barcode groups.
///
/// The barcode field may hold several comma-separated codes; the record is
/// replicated into each code's group. A code repeated within one field lands
/// in that group once per occurrence — fan-out, not deduplication.
pub fn load_stock_rows(csv_data: &str, columns: &ColumnMapping) -> Result<StockInput, StockError> {
    // Excel-flavored exports lead with a UTF-8 BOM
    let csv_data = csv_data.strip_prefix('\u{feff}').unwrap_or(csv_data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| StockError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, StockError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StockError::MissingColumn { column: name.into() })
    };

    let outlet_idx = idx(&columns.outlet)?;
    let barcode_idx = idx(&columns.barcode)?;
    let name_idx = idx(&columns.name)?;
    let product_id_idx = idx(&columns.product_id)?;
    let opening_idx = idx(&columns.opening_quantity)?;
    let delivery_idx = idx(&columns.delivery_quantity)?;
    let sold_idx = idx(&columns.sold_quantity)?;

    let mut input = StockInput::default();

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| StockError::Io(e.to_string()))?;
        let row = row_idx + 1;

        let parse_quantity = |field_idx: usize, column: &str| -> Result<f64, StockError> {
            let raw = record.get(field_idx).unwrap_or("");
            raw.parse().map_err(|_| StockError::NumberParse {
                row,
                column: column.into(),
                value: raw.into(),
            })
        };

        let outlet = record.get(outlet_idx).unwrap_or("").to_string();
        let name = record.get(name_idx).unwrap_or("").to_string();

        let raw_id = record.get(product_id_idx).unwrap_or("");
        let product_id: i64 = raw_id.parse().map_err(|_| StockError::NumberParse {
            row,
            column: columns.product_id.clone(),
            value: raw_id.into(),
        })?;

        let opening_quantity = parse_quantity(opening_idx, &columns.opening_quantity)?;
        let delivery_quantity = parse_quantity(delivery_idx, &columns.delivery_quantity)?;
        let sold_quantity = parse_quantity(sold_idx, &columns.sold_quantity)?;

        // Flag derived once at ingestion, never re-derived afterwards
        let is_correct = ProductRecord::name_marks_correct(&name);

        // The outlet entry exists even when the barcode field yields no codes
        let groups = input.outlets.entry(outlet).or_default();

        for code in record.get(barcode_idx).unwrap_or("").split(',') {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            groups.entry(code.to_string()).or_default().push(ProductRecord {
                name: name.clone(),
                product_id,
                opening_quantity,
                delivery_quantity,
                sold_quantity,
                is_correct,
                correct_opening_quantity: None,
                correct_delivery_quantity: None,
                correct_sold_quantity: None,
            });
        }
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Outlet,Barcode,Name,ProductId,OpeningQuantity,DeliveryQuantity,SoldQuantity\n";

    fn load(csv: &str) -> StockInput {
        load_stock_rows(csv, &ColumnMapping::default()).unwrap()
    }

    #[test]
    fn load_basic() {
        let csv = format!(
            "{HEADER}\
Store A,111,Widget,10,5,1,2
Store A,111,Widget x*,20,3,0,1
Store B,999,Gadget,30,7.5,0.5,2.25
"
        );
        let input = load(&csv);
        assert_eq!(input.outlets.len(), 2);
        let group = &input.outlets["Store A"]["111"];
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].product_id, 10);
        assert!(!group[0].is_correct);
        assert!(group[1].is_correct);
        assert_eq!(input.outlets["Store B"]["999"][0].opening_quantity, 7.5);
    }

    #[test]
    fn barcode_fan_out() {
        let csv = format!("{HEADER}Store A,\"111, 222,222\",Widget,10,5,0,0\n");
        let input = load(&csv);
        let groups = &input.outlets["Store A"];
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["111"].len(), 1);
        // repeated occurrence is kept, not deduplicated
        assert_eq!(groups["222"].len(), 2);
    }

    #[test]
    fn empty_barcode_pieces_dropped() {
        let csv = format!("{HEADER}Store A,\"111,, , 222\",Widget,10,5,0,0\n");
        let input = load(&csv);
        let groups = &input.outlets["Store A"];
        assert_eq!(groups.len(), 2);
        assert!(groups.contains_key("111"));
        assert!(groups.contains_key("222"));
    }

    #[test]
    fn outlet_kept_when_barcode_field_empty() {
        let csv = format!("{HEADER}Store A,\"\",Widget,10,5,0,0\n");
        let input = load(&csv);
        assert!(input.outlets["Store A"].is_empty());
    }

    #[test]
    fn bom_stripped() {
        let csv = format!("\u{feff}{HEADER}Store A,111,Widget,10,5,0,0\n");
        let input = load(&csv);
        assert_eq!(input.outlets["Store A"]["111"].len(), 1);
    }

    #[test]
    fn correctness_rule() {
        // needs both an x (case-insensitive) and a literal *
        assert!(ProductRecord::name_marks_correct("Widget x*"));
        assert!(ProductRecord::name_marks_correct("BOX *6"));
        assert!(!ProductRecord::name_marks_correct("Widget x"));
        assert!(!ProductRecord::name_marks_correct("Widget *"));
        assert!(!ProductRecord::name_marks_correct(""));
    }

    #[test]
    fn malformed_product_id_fails() {
        let csv = format!("{HEADER}Store A,111,Widget,ten,5,0,0\n");
        let err = load_stock_rows(&csv, &ColumnMapping::default()).unwrap_err();
        match err {
            StockError::NumberParse { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "ProductId");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_quantity_names_row_and_column() {
        let csv = format!(
            "{HEADER}\
Store A,111,Widget,10,5,0,0
Store A,222,Gadget,20,5,n/a,0
"
        );
        let err = load_stock_rows(&csv, &ColumnMapping::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "row 2, column 'DeliveryQuantity': cannot parse number 'n/a'"
        );
    }

    #[test]
    fn missing_column_fails() {
        let csv = "Outlet,Barcode,Name,ProductId,OpeningQuantity,DeliveryQuantity\n";
        let err = load_stock_rows(csv, &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, StockError::MissingColumn { column } if column == "SoldQuantity"));
    }

    #[test]
    fn renamed_columns_resolve() {
        let csv = "Shop,EAN,Name,ProductId,OpeningQuantity,DeliveryQuantity,SoldQuantity\n\
Store A,111,Widget,10,5,0,0\n";
        let columns = ColumnMapping {
            outlet: "Shop".into(),
            barcode: "EAN".into(),
            ..ColumnMapping::default()
        };
        let input = load_stock_rows(csv, &columns).unwrap();
        assert_eq!(input.outlets["Store A"]["111"].len(), 1);
    }
}
