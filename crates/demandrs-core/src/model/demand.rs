use crate::model_selection::{train_test_split, SPLIT_SEED, TEST_FRACTION};
use crate::model::fiterror::{FitError, FitResult};
use crate::model::schema::FeatureSchema;
use crate::stats::{r2_from_predictions, rmse, std_pop, OlsReg};
use crate::table::Table;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Interval half-width multiplier. Gives roughly an 85% interval under normal
/// residuals; a placeholder, not a calibrated confidence level.
pub const INTERVAL_Z: f64 = 1.44;

#[derive(Debug, Clone, Serialize)]
pub struct FitDiagnostics {
    pub r2: f64,
    pub rmse: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// Fitted demand model: ordered coefficients, intercept and the residual
/// dispersion estimated on the held-out partition. Immutable once fit.
#[derive(Debug, Clone)]
pub struct DemandModel {
    schema: FeatureSchema,
    model: OlsReg,
    dispersion: f64,
    diagnostics: FitDiagnostics,
}

/// Serializable view of a fitted model for reports and the `fit` command.
#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub dispersion: f64,
    pub r2: f64,
    pub rmse: f64,
    pub n_train: usize,
    pub n_test: usize,
}

impl DemandModel {
    /// Fit ordinary least squares on an 80% training partition and estimate
    /// the residual dispersion on the held-out 20%, both from one fixed-seed
    /// split so the whole fit is reproducible.
    pub fn fit(table: &Table) -> FitResult<DemandModel> {
        let schema = FeatureSchema::from_table(table)?;
        let (rows, y) = schema.design_rows(table)?;

        // need enough rows for the solve to be determined and for the
        // held-out partition to be non-empty
        let needed = schema.len() + 2;
        if rows.len() < needed {
            return Err(FitError::NotEnoughRows { rows: rows.len(), needed });
        }

        let (train_idx, test_idx) = train_test_split(rows.len(), TEST_FRACTION, SPLIT_SEED);

        let train_rows: Vec<Vec<f64>> = train_idx.iter().map(|&i| rows[i].clone()).collect();
        let train_y: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();

        let model = OlsReg::train(&train_rows, &train_y).ok_or(FitError::DegenerateDesign)?;

        let residuals: Vec<f64> =
            test_idx.iter().map(|&i| y[i] - model.calculate(&rows[i])).collect();
        let dispersion = std_pop(&residuals);
        if !dispersion.is_finite() {
            return Err(FitError::NonFiniteDispersion);
        }

        let test_y: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();
        let test_y_hat: Vec<f64> = test_idx.iter().map(|&i| model.calculate(&rows[i])).collect();
        let diagnostics = FitDiagnostics {
            r2: r2_from_predictions(&test_y, &test_y_hat).unwrap_or(0.0),
            rmse: rmse(&test_y, &test_y_hat).unwrap_or(0.0),
            n_train: train_idx.len(),
            n_test: test_idx.len(),
        };

        Ok(DemandModel { schema, model, dispersion, diagnostics })
    }

    /// Point estimate for one feature vector. The vector must match the
    /// schema's length; order is the schema's order.
    pub fn predict(&self, features: &[f64]) -> FitResult<f64> {
        self.schema.validate(features)?;
        Ok(self.model.calculate(features))
    }

    /// Symmetric interval around a point estimate, half-width
    /// `INTERVAL_Z * dispersion`.
    pub fn confidence_interval(&self, estimate: f64) -> (f64, f64) {
        (estimate - INTERVAL_Z * self.dispersion, estimate + INTERVAL_Z * self.dispersion)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.model.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.model.intercept
    }

    pub fn dispersion(&self) -> f64 {
        self.dispersion
    }

    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            features: self.schema.names().to_vec(),
            coefficients: self.model.coefficients.clone(),
            intercept: self.model.intercept,
            dispersion: self.dispersion,
            r2: self.diagnostics.r2,
            rmse: self.diagnostics.rmse,
            n_train: self.diagnostics.n_train,
            n_test: self.diagnostics.n_test,
        }
    }
}

/// Two-sided coverage the fixed multiplier would give under exactly normal
/// residuals, `2 * phi(INTERVAL_Z) - 1`.
pub fn nominal_coverage() -> FitResult<f64> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|_| FitError::StatError("failed to construct standard normal"))?;
    Ok(2.0 * normal.cdf(INTERVAL_Z) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    // synthetic hourly table with a known linear signal plus deterministic
    // "noise" so the fit has nonzero residuals
    fn synthetic_table(n: usize) -> Table {
        let hour: Vec<f64> = (0..n).map(|i| (i % 24) as f64).collect();
        let temperature: Vec<f64> = (0..n).map(|i| -5.0 + (i % 40) as f64).collect();
        let functioning: Vec<f64> = (0..n).map(|_| 1.0).collect();
        let noise: Vec<f64> = (0..n).map(|i| ((i * 7919) % 13) as f64 - 6.0).collect();
        let count: Vec<f64> = (0..n)
            .map(|i| 50.0 + 12.0 * hour[i] + 4.0 * temperature[i] + noise[i])
            .collect();

        Table::from_columns(
            vec![
                "Hour".into(),
                "Temperature(C)".into(),
                "Functioning Day".into(),
                "Rented Bike Count".into(),
            ],
            vec![hour, temperature, functioning, count],
        )
    }

    #[test]
    fn fit_is_deterministic() {
        let table = synthetic_table(200);
        let a = DemandModel::fit(&table).unwrap();
        let b = DemandModel::fit(&table).unwrap();

        assert_eq!(a.intercept(), b.intercept());
        assert_eq!(a.coefficients(), b.coefficients());
        assert_eq!(a.dispersion(), b.dispersion());
    }

    #[test]
    fn fit_recovers_linear_signal() {
        let table = synthetic_table(400);
        let model = DemandModel::fit(&table).unwrap();

        // noise is bounded by 6, so the slopes land close to the truth
        assert!((model.coefficients()[0] - 12.0).abs() < 1.0);
        assert!((model.coefficients()[1] - 4.0).abs() < 1.0);
        assert!(model.dispersion() > 0.0);
    }

    #[test]
    fn predict_difference_is_linear_in_features() {
        let table = synthetic_table(200);
        let model = DemandModel::fit(&table).unwrap();

        let v1 = vec![10.0, 20.0, 1.0];
        let v2 = vec![4.0, -3.0, 1.0];
        let diff = model.predict(&v1).unwrap() - model.predict(&v2).unwrap();
        let expected: f64 = model
            .coefficients()
            .iter()
            .zip(v1.iter().zip(v2.iter()))
            .map(|(c, (a, b))| c * (a - b))
            .sum();
        assert!((diff - expected).abs() < 1e-9);
    }

    #[test]
    fn predict_rejects_wrong_length() {
        let table = synthetic_table(100);
        let model = DemandModel::fit(&table).unwrap();
        assert_eq!(
            model.predict(&[1.0, 2.0]),
            Err(FitError::LengthMismatch { expected: 3, got: 2 })
        );
    }

    #[test]
    fn interval_is_symmetric_with_z_half_width() {
        let table = synthetic_table(200);
        let model = DemandModel::fit(&table).unwrap();

        let estimate = 500.0;
        let (low, high) = model.confidence_interval(estimate);
        assert!(((high - estimate) - (estimate - low)).abs() < 1e-12);
        assert!(((high - estimate) - INTERVAL_Z * model.dispersion()).abs() < 1e-12);
    }

    #[test]
    fn not_enough_rows_is_reported() {
        let table = Table::from_columns(
            vec!["Hour".into(), "Rented Bike Count".into()],
            vec![vec![0.0, 1.0], vec![10.0, 20.0]],
        );
        let err = DemandModel::fit(&table).unwrap_err();
        assert_eq!(err, FitError::NotEnoughRows { rows: 2, needed: 3 });
    }

    #[test]
    fn nominal_coverage_is_about_85_percent() {
        let coverage = nominal_coverage().unwrap();
        assert!((coverage - 0.85).abs() < 0.005);
    }
}
