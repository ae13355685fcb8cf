//! Goodness-of-fit measures for comparing samples with fitted values.
use crate::Error;

/// Pearson correlation coefficient of `x` and `y`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64, Error> {
    check_lengths(x, y)?;

    let mean_x = mean(x);
    let mean_y = mean(y);

    let covariance: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();
    let std_x = x.iter().map(|xi| (xi - mean_x).powi(2)).sum::<f64>().sqrt();
    let std_y = y.iter().map(|yi| (yi - mean_y).powi(2)).sum::<f64>().sqrt();

    Ok(covariance / (std_x * std_y))
}

pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64, Error> {
    check_lengths(y_true, y_pred)?;
    let squared: Vec<f64> = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .collect();
    Ok(mean(&squared))
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64, Error> {
    check_lengths(actual, predicted)?;

    let mean_actual = mean(actual);
    let ss_total: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let ss_residual: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(1.0 - ss_residual / ss_total)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), Error> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(Error::NotEnoughPoints { needed: 1, got: 0 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fit_quadratic;

    #[test]
    fn test_pearson() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(
            pearson_correlation(&x, &[2.0, 4.0, 6.0, 8.0]).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            pearson_correlation(&x, &[8.0, 6.0, 4.0, 2.0]).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
        assert_eq!(
            pearson_correlation(&x, &[1.0]),
            Err(Error::LengthMismatch { x: 4, y: 1 })
        );
    }

    #[test]
    fn test_mse() {
        let mse = mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 3.0, 5.0]).unwrap();
        assert_relative_eq!(mse, 5.0 / 3.0, epsilon = 1e-12);
        assert_eq!(
            mean_squared_error(&[], &[]),
            Err(Error::NotEnoughPoints { needed: 1, got: 0 })
        );
    }

    #[test]
    fn test_r_squared_of_exact_fit() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|x| x * x + 1.0).collect();
        let fit = fit_quadratic(&x, &y).unwrap();
        assert_relative_eq!(r_squared(&y, &fit.approx).unwrap(), 1.0, epsilon = 1e-9);

        assert_relative_eq!(
            r_squared(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]).unwrap(),
            0.0,
            epsilon = 1e-12
        );
    }
}
