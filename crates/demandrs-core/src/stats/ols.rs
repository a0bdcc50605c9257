use nalgebra::{DMatrix, DVector};

/// Multiple linear regression fit by ordinary least squares.
/// `coefficients` are ordered to match the columns the model was trained on.
#[derive(Clone, Debug)]
pub struct OlsReg {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl OlsReg {
    pub fn from_val(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self { intercept, coefficients }
    }

    pub fn calculate(&self, x: &[f64]) -> f64 {
        self.intercept + self.coefficients.iter().zip(x.iter()).map(|(c, xi)| c * xi).sum::<f64>()
    }

    /// Fit on row-major observations. Returns `None` when the design matrix is
    /// too ill-conditioned to solve or the solution is non-finite.
    pub fn train(rows: &[Vec<f64>], y: &[f64]) -> Option<Self> {
        assert!(rows.len() == y.len(), "Input rows and y must have the same length");
        if rows.is_empty() {
            return None;
        }

        let n_features = rows[0].len();
        let n = rows.len();

        // design matrix with a leading column of ones for the intercept
        let mut design = DMatrix::zeros(n, n_features + 1);
        for (i, row) in rows.iter().enumerate() {
            design[(i, 0)] = 1.0;
            for (j, &v) in row.iter().enumerate() {
                design[(i, j + 1)] = v;
            }
        }
        let y = DVector::from_row_slice(y);

        let beta = solve_least_squares(&design, &y)?;
        let intercept = beta[0];
        let coefficients: Vec<f64> = beta.iter().skip(1).copied().collect();

        Some(Self { intercept, coefficients })
    }
}

/// Solve a least squares problem using SVD, loosening the tolerance for
/// near-singular systems before giving up.
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::OlsReg;

    #[test]
    fn recovers_plane_coefficients() {
        // y = 1 + 2*x1 + 3*x2, exact data
        let rows = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![2.0, 1.0],
        ];
        let y: Vec<f64> = rows.iter().map(|r| 1.0 + 2.0 * r[0] + 3.0 * r[1]).collect();

        let model = OlsReg::train(&rows, &y).unwrap();
        assert!((model.intercept - 1.0).abs() < 1e-8);
        assert!((model.coefficients[0] - 2.0).abs() < 1e-8);
        assert!((model.coefficients[1] - 3.0).abs() < 1e-8);
    }

    #[test]
    fn calculate_is_intercept_plus_dot() {
        let model = OlsReg::from_val(10.0, vec![1.0, -2.0]);
        assert_eq!(model.calculate(&[3.0, 4.0]), 10.0 + 3.0 - 8.0);
    }

    #[test]
    fn train_handles_tall_systems() {
        // more rows than columns, with noise-free single feature: y = 5x
        let rows: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..50).map(|i| 5.0 * i as f64).collect();

        let model = OlsReg::train(&rows, &y).unwrap();
        assert!(model.intercept.abs() < 1e-6);
        assert!((model.coefficients[0] - 5.0).abs() < 1e-8);
    }
}
