//! Least-squares approximation of sampled points by polynomials and by the usual linearizable
//! models. Polynomials of degree two and up go through the normal equations, solved with
//! [`linear::gaussian_elimination`].
use linear::{gaussian_elimination, Matrix};
use log::debug;

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitKind {
    /// `a x + b`
    Linear,
    /// `a x^2 + b x + c`
    Quadratic,
    /// `a x^3 + b x^2 + c x + d`
    Cubic,
    /// `a ln(x) + b`
    Logarithmic,
    /// `a e^(b x)`
    Exponential,
    /// `a x^b`
    Power,
}

/// A fitted model with its values at the sample points.
#[derive(Clone, Debug, PartialEq)]
pub struct Fit {
    pub kind: FitKind,
    /// model coefficients, in the order they appear in the [`FitKind`] formula
    pub coefficients: Vec<f64>,
    /// model evaluated at every sample `x`
    pub approx: Vec<f64>,
}

impl Fit {
    fn new(kind: FitKind, coefficients: Vec<f64>, x: &[f64]) -> Self {
        let mut fit = Fit {
            kind,
            coefficients,
            approx: Vec::new(),
        };
        fit.approx = x.iter().map(|&xi| fit.eval(xi)).collect();
        debug!("{:?} fit: {:?}", fit.kind, fit.coefficients);
        fit
    }

    pub fn eval(&self, x: f64) -> f64 {
        let c = &self.coefficients;
        match self.kind {
            FitKind::Linear | FitKind::Quadratic | FitKind::Cubic => {
                // Horner, highest power first
                c.iter().fold(0.0, |acc, &ci| acc * x + ci)
            }
            FitKind::Logarithmic => c[0] * x.ln() + c[1],
            FitKind::Exponential => c[0] * (c[1] * x).exp(),
            FitKind::Power => c[0] * x.powf(c[1]),
        }
    }
}

/// `y = a x + b`, closed form.
pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<Fit, Error> {
    let (a, b) = line(x, y)?;
    Ok(Fit::new(FitKind::Linear, vec![a, b], x))
}

/// `y = a x^2 + b x + c`
pub fn fit_quadratic(x: &[f64], y: &[f64]) -> Result<Fit, Error> {
    let coefficients = fit_polynomial(x, y, 2)?;
    Ok(Fit::new(FitKind::Quadratic, coefficients, x))
}

/// `y = a x^3 + b x^2 + c x + d`
pub fn fit_cubic(x: &[f64], y: &[f64]) -> Result<Fit, Error> {
    let coefficients = fit_polynomial(x, y, 3)?;
    Ok(Fit::new(FitKind::Cubic, coefficients, x))
}

/// `y = a ln(x) + b`, a line through `(ln x, y)`. Requires `x > 0`.
pub fn fit_logarithmic(x: &[f64], y: &[f64]) -> Result<Fit, Error> {
    let log_x = ln_all(x, "x")?;
    let (a, b) = line(&log_x, y)?;
    Ok(Fit::new(FitKind::Logarithmic, vec![a, b], x))
}

/// `y = a e^(b x)`, a line through `(x, ln y)`. Requires `y > 0`.
pub fn fit_exponential(x: &[f64], y: &[f64]) -> Result<Fit, Error> {
    let log_y = ln_all(y, "y")?;
    let (slope, intercept) = line(x, &log_y)?;
    Ok(Fit::new(FitKind::Exponential, vec![intercept.exp(), slope], x))
}

/// `y = a x^b`, a line through `(ln x, ln y)`. Requires `x > 0` and `y > 0`.
pub fn fit_power(x: &[f64], y: &[f64]) -> Result<Fit, Error> {
    let log_x = ln_all(x, "x")?;
    let log_y = ln_all(y, "y")?;
    let (slope, intercept) = line(&log_x, &log_y)?;
    Ok(Fit::new(FitKind::Power, vec![intercept.exp(), slope], x))
}

/// Coefficients of the least-squares polynomial of the given degree, highest power first.
///
/// Builds the normal equations `sum_k x_k^(2d-r-c)` / `sum_k x_k^(d-r) y_k` for rows `r` and
/// columns `c`, and solves them without pivoting.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>, Error> {
    check_samples(x, y, degree + 1)?;

    // power_sums[p] = sum x^p, p = 0..=2d
    let power_sums: Vec<f64> = (0..=2 * degree)
        .map(|p| x.iter().map(|&xi| xi.powi(p as i32)).sum())
        .collect();

    let rows: Vec<Vec<f64>> = (0..=degree)
        .map(|r| {
            (0..=degree)
                .map(|c| power_sums[2 * degree - r - c])
                .collect()
        })
        .collect();
    let rhs: Vec<f64> = (0..=degree)
        .map(|r| {
            x.iter()
                .zip(y)
                .map(|(&xi, &yi)| xi.powi((degree - r) as i32) * yi)
                .sum()
        })
        .collect();

    let solution = gaussian_elimination(&Matrix::new(rows)?, &rhs)?;
    Ok(solution.iter().copied().collect())
}

/// Slope and intercept of the least-squares line.
fn line(x: &[f64], y: &[f64]) -> Result<(f64, f64), Error> {
    check_samples(x, y, 2)?;

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x2: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(xi, yi)| xi * yi).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(Error::Degenerate);
    }

    let a = (n * sum_xy - sum_x * sum_y) / denominator;
    let b = (sum_y - a * sum_x) / n;
    Ok((a, b))
}

fn check_samples(x: &[f64], y: &[f64], needed: usize) -> Result<(), Error> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < needed {
        return Err(Error::NotEnoughPoints {
            needed,
            got: x.len(),
        });
    }
    Ok(())
}

fn ln_all(values: &[f64], what: &'static str) -> Result<Vec<f64>, Error> {
    if values.iter().any(|&v| v <= 0.0) {
        return Err(Error::NonPositive { what });
    }
    Ok(values.iter().map(|v| v.ln()).collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const X: [f64; 6] = [1.0, 1.5, 2.0, 3.0, 4.5, 6.0];

    fn sample(f: impl Fn(f64) -> f64) -> Vec<f64> {
        X.iter().map(|&x| f(x)).collect()
    }

    #[test]
    fn test_fit_linear() {
        let y = sample(|x| 2.0 * x - 1.0);
        let fit = fit_linear(&X, &y).unwrap();
        assert_relative_eq!(fit.coefficients[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], -1.0, epsilon = 1e-10);
        for (fitted, exact) in fit.approx.iter().zip(&y) {
            assert_relative_eq!(*fitted, *exact, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fit_linear_degenerate() {
        assert_eq!(
            fit_linear(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(Error::Degenerate)
        );
    }

    #[test]
    fn test_fit_quadratic() {
        let y = sample(|x| 0.5 * x * x - 3.0 * x + 2.0);
        let fit = fit_quadratic(&X, &y).unwrap();
        let expected = [0.5, -3.0, 2.0];
        for (c, e) in fit.coefficients.iter().zip(expected) {
            assert_relative_eq!(*c, e, epsilon = 1e-7);
        }
        assert_relative_eq!(fit.eval(10.0), 22.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fit_cubic() {
        let y = sample(|x| x.powi(3) - 2.0 * x * x + 0.25 * x + 4.0);
        let fit = fit_cubic(&X, &y).unwrap();
        let expected = [1.0, -2.0, 0.25, 4.0];
        for (c, e) in fit.coefficients.iter().zip(expected) {
            assert_relative_eq!(*c, e, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_fit_logarithmic() {
        let y = sample(|x| 3.0 * x.ln() + 0.5);
        let fit = fit_logarithmic(&X, &y).unwrap();
        assert_relative_eq!(fit.coefficients[0], 3.0, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], 0.5, epsilon = 1e-10);

        assert_eq!(
            fit_logarithmic(&[0.0, 1.0], &[1.0, 2.0]),
            Err(Error::NonPositive { what: "x" })
        );
    }

    #[test]
    fn test_fit_exponential() {
        let y = sample(|x| 1.5 * (0.3 * x).exp());
        let fit = fit_exponential(&X, &y).unwrap();
        assert_relative_eq!(fit.coefficients[0], 1.5, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], 0.3, epsilon = 1e-10);
        assert_relative_eq!(fit.eval(2.0), 1.5 * 0.6_f64.exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_fit_power() {
        let y = sample(|x| 2.0 * x.powf(1.7));
        let fit = fit_power(&X, &y).unwrap();
        assert_relative_eq!(fit.coefficients[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], 1.7, epsilon = 1e-10);

        assert_eq!(
            fit_power(&[1.0, 2.0], &[1.0, -2.0]),
            Err(Error::NonPositive { what: "y" })
        );
    }

    #[test]
    fn test_sample_checks() {
        assert_eq!(
            fit_linear(&[1.0, 2.0], &[1.0]),
            Err(Error::LengthMismatch { x: 2, y: 1 })
        );
        assert_eq!(
            fit_cubic(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]),
            Err(Error::NotEnoughPoints { needed: 4, got: 3 })
        );
    }
}
