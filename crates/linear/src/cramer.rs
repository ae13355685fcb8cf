use crate::Matrix;

/// Solves the 2x2 system `coefficients * (x, y) = constants` by Cramer's rule.
///
/// Returns `None` if the coefficient matrix is singular.
pub fn cramer_2d(coefficients: [[f64; 2]; 2], constants: [f64; 2]) -> Option<(f64, f64)> {
    let [[a, b], [c, d]] = coefficients;
    let [e, f] = constants;

    let det = |rows: [[f64; 2]; 2]| Matrix::new(rows.map(Vec::from).to_vec()).ok()?.det().ok();

    let denominator = det(coefficients)?;
    if denominator == 0.0 {
        return None;
    }

    let x = det([[e, b], [f, d]])? / denominator;
    let y = det([[a, e], [c, f]])? / denominator;
    Some((x, y))
}
