use crate::model::fiterror::{FitError, FitResult};
use crate::table::Table;
use crate::utils::normalize_name;
use serde::{Deserialize, Serialize};

pub const TARGET_COLUMN: &str = "Rented Bike Count";

/// Column dropped from the feature set even though the source data carries it.
pub const EXCLUDED_COLUMN: &str = "Visibility";

/// Ordered list of feature column names, taken from the table's column order
/// with the target and excluded columns removed. The order is load-bearing:
/// feature vectors are built against it and validated against it, both at fit
/// time and at predict time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn from_table(table: &Table) -> FitResult<Self> {
        let target = normalize_name(TARGET_COLUMN);
        let excluded = normalize_name(EXCLUDED_COLUMN);

        if table.column(TARGET_COLUMN).is_none() {
            return Err(FitError::MissingColumn(TARGET_COLUMN.to_string()));
        }

        let names: Vec<String> = table
            .headers()
            .iter()
            .filter(|h| {
                let key = normalize_name(h);
                key != target && !key.starts_with(&excluded)
            })
            .cloned()
            .collect();

        if names.is_empty() {
            return Err(FitError::NoFeatureColumns);
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check a positional feature vector against the schema.
    pub fn validate(&self, features: &[f64]) -> FitResult<()> {
        if features.len() != self.names.len() {
            return Err(FitError::LengthMismatch {
                expected: self.names.len(),
                got: features.len(),
            });
        }
        Ok(())
    }

    /// Extract the feature matrix (row-major) and target vector from a table,
    /// in schema order.
    pub fn design_rows(&self, table: &Table) -> FitResult<(Vec<Vec<f64>>, Vec<f64>)> {
        let mut feature_cols: Vec<&[f64]> = Vec::with_capacity(self.names.len());
        for name in &self.names {
            let col =
                table.column(name).ok_or_else(|| FitError::MissingColumn(name.clone()))?;
            feature_cols.push(col);
        }
        let target = table
            .column(TARGET_COLUMN)
            .ok_or_else(|| FitError::MissingColumn(TARGET_COLUMN.to_string()))?;

        let rows: Vec<Vec<f64>> = (0..table.n_rows())
            .map(|i| feature_cols.iter().map(|col| col[i]).collect())
            .collect();

        Ok((rows, target.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn toy_table() -> Table {
        Table::from_columns(
            vec![
                "Hour".into(),
                "Temperature(C)".into(),
                "Visibility (10m)".into(),
                "Rented Bike Count".into(),
            ],
            vec![
                vec![0.0, 1.0, 2.0],
                vec![-3.0, -2.5, -2.0],
                vec![2000.0, 1800.0, 1750.0],
                vec![120.0, 95.0, 80.0],
            ],
        )
    }

    #[test]
    fn drops_target_and_visibility_keeps_order() {
        let schema = FeatureSchema::from_table(&toy_table()).unwrap();
        assert_eq!(schema.names(), &["Hour".to_string(), "Temperature(C)".to_string()]);
    }

    #[test]
    fn missing_target_is_an_error() {
        let table = Table::from_columns(vec!["Hour".into()], vec![vec![1.0]]);
        assert_eq!(
            FeatureSchema::from_table(&table),
            Err(FitError::MissingColumn(TARGET_COLUMN.to_string()))
        );
    }

    #[test]
    fn validate_rejects_wrong_length() {
        let schema = FeatureSchema::from_table(&toy_table()).unwrap();
        assert_eq!(
            schema.validate(&[1.0]),
            Err(FitError::LengthMismatch { expected: 2, got: 1 })
        );
        assert!(schema.validate(&[1.0, 2.0]).is_ok());
    }

    #[test]
    fn design_rows_follow_schema_order() {
        let schema = FeatureSchema::from_table(&toy_table()).unwrap();
        let (rows, y) = schema.design_rows(&toy_table()).unwrap();
        assert_eq!(rows, vec![vec![0.0, -3.0], vec![1.0, -2.5], vec![2.0, -2.0]]);
        assert_eq!(y, vec![120.0, 95.0, 80.0]);
    }
}
