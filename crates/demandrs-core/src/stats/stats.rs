pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divisor n, not n-1). The dispersion the
/// model reports is the population std of its held-out residuals.
pub fn std_pop(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let m = mean(data);
    let var = data.iter().map(|v| (v - m).powi(2)).sum::<f64>() / data.len() as f64;
    var.sqrt()
}

pub fn rmse(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }

    let sum_sq: f64 = y.iter().zip(y_hat.iter()).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();

    Some((sum_sq / y.len() as f64).sqrt())
}

pub fn r2_from_predictions(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }

    let y_mean = mean(y);
    let ss_res: f64 = y.iter().zip(y_hat.iter()).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        None
    } else {
        Some(1.0 - ss_res / ss_tot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_pop_uses_n_divisor() {
        // variance of [2,4,4,4,5,5,7,9] is 4 with the population divisor
        let data = vec![2., 4., 4., 4., 5., 5., 7., 9.];
        assert!((std_pop(&data) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rmse_length_mismatch() {
        assert_eq!(rmse(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn r2_perfect_fit() {
        let y = vec![1.0, 2.0, 3.0];
        assert_eq!(r2_from_predictions(&y, &y), Some(1.0));
    }

    #[test]
    fn r2_constant_target_is_undefined() {
        let y = vec![2.0, 2.0, 2.0];
        assert_eq!(r2_from_predictions(&y, &[1.0, 2.0, 3.0]), None);
    }
}
