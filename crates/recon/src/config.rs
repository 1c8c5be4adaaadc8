use serde::Deserialize;

use crate::error::StockError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every field defaults to the standard stock-position
/// export layout, so a config file is only needed to rename columns or
/// output artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    pub name: String,
    pub columns: ColumnMapping,
    pub output: OutputConfig,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            name: "stock-position".into(),
            columns: ColumnMapping::default(),
            output: OutputConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Input header names for the seven consumed columns. Extra columns in the
/// export are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub outlet: String,
    pub barcode: String,
    pub name: String,
    pub product_id: String,
    pub opening_quantity: String,
    pub delivery_quantity: String,
    pub sold_quantity: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            outlet: "Outlet".into(),
            barcode: "Barcode".into(),
            name: "Name".into(),
            product_id: "ProductId".into(),
            opening_quantity: "OpeningQuantity".into(),
            delivery_quantity: "DeliveryQuantity".into(),
            sold_quantity: "SoldQuantity".into(),
        }
    }
}

impl ColumnMapping {
    fn names(&self) -> [&str; 7] {
        [
            &self.outlet,
            &self.barcode,
            &self.name,
            &self.product_id,
            &self.opening_quantity,
            &self.delivery_quantity,
            &self.sold_quantity,
        ]
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub delete_list: String,
    pub corrected_csv: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".into(),
            delete_list: "products_to_delete.json".into(),
            corrected_csv: "correct_products.csv".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl StockConfig {
    pub fn from_toml(input: &str) -> Result<Self, StockError> {
        let config: StockConfig =
            toml::from_str(input).map_err(|e| StockError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StockError> {
        let names = self.columns.names();

        for name in names {
            if name.is_empty() {
                return Err(StockError::ConfigValidation(
                    "column names must not be empty".into(),
                ));
            }
        }

        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].contains(a) {
                return Err(StockError::ConfigValidation(format!(
                    "column name '{a}' is mapped twice"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
