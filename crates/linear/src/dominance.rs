//! Reordering of unknowns (matrix columns) so that a square matrix becomes row diagonally
//! dominant, which is what the fixed-point solvers need to converge.
//!
//! The search runs in two phases. A single greedy pass moves the largest entry of each
//! non-dominant row onto the diagonal; if that does not produce a dominant matrix, every column
//! permutation is tried in lexicographic order, up to [`BRUTEFORCE_MAX_COLS`] columns.
use itertools::Itertools;
use log::{debug, warn};

use crate::{Error, Matrix};

/// Largest column count for which the exhaustive permutation search is attempted (10! orders).
pub const BRUTEFORCE_MAX_COLS: usize = 10;

/// Checks `|a(i,i)| >= sum_{j != i} |a(i,j)|` for every row. Ties count as dominant.
pub fn is_diagonally_dominant(mat_a: &Matrix) -> Result<bool, Error> {
    check_square("is_diagonally_dominant", mat_a)?;
    let order: Vec<usize> = (0..mat_a.ncols()).collect();
    Ok(dominant_under(mat_a, &order))
}

/// Returns a copy of `mat_a` with its columns reordered so that it is diagonally dominant, or
/// `None` if no such reordering was found.
pub fn get_diagonally_dominant(mat_a: &Matrix) -> Result<Option<Matrix>, Error> {
    find_dominant_permutation(mat_a)?
        .map(|order| mat_a.permute_columns(&order))
        .transpose()
}

/// Same search as [`get_diagonally_dominant`], returning the column order instead of the
/// reordered matrix: column `k` of the dominant matrix is column `order[k]` of `mat_a`.
pub fn find_dominant_permutation(mat_a: &Matrix) -> Result<Option<Vec<usize>>, Error> {
    check_square("get_diagonally_dominant", mat_a)?;
    let n = mat_a.ncols();

    let greedy = greedy_order(mat_a);
    if dominant_under(mat_a, &greedy) {
        debug!("greedy pass found a dominant column order {:?}", greedy);
        return Ok(Some(greedy));
    }

    if n > BRUTEFORCE_MAX_COLS {
        warn!(
            "greedy pass failed and {} columns exceed the bruteforce limit of {}",
            n, BRUTEFORCE_MAX_COLS
        );
        return Ok(None);
    }

    let found = (0..n)
        .permutations(n)
        .find(|order| dominant_under(mat_a, order));
    match &found {
        Some(order) => debug!("bruteforce found a dominant column order {:?}", order),
        None => debug!("no column order of the {n}x{n} matrix is diagonally dominant"),
    }
    Ok(found)
}

/// One left-to-right pass: a row that is not dominant at its diagonal gets its largest
/// magnitude column swapped onto the diagonal. Swaps apply to all rows, so an earlier row may
/// lose dominance again; the pass is not repeated.
fn greedy_order(mat_a: &Matrix) -> Vec<usize> {
    let n = mat_a.ncols();
    let mut order: Vec<usize> = (0..n).collect();

    for i in 0..n {
        if row_dominant_under(mat_a, &order, i) {
            continue;
        }

        // first column with the largest magnitude in row i
        let mut max_col = 0;
        for j in 1..n {
            if mat_a[(i, order[j])].abs() > mat_a[(i, order[max_col])].abs() {
                max_col = j;
            }
        }
        order.swap(i, max_col);
    }

    order
}

fn dominant_under(mat_a: &Matrix, order: &[usize]) -> bool {
    (0..mat_a.nrows()).all(|i| row_dominant_under(mat_a, order, i))
}

/// Dominance of row `i` once the columns are arranged as `order`.
fn row_dominant_under(mat_a: &Matrix, order: &[usize], i: usize) -> bool {
    let diag = mat_a[(i, order[i])].abs();
    let off_diag: f64 = order
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != i)
        .map(|(_, &j)| mat_a[(i, j)].abs())
        .sum();
    diag >= off_diag
}

fn check_square(op: &'static str, mat_a: &Matrix) -> Result<(), Error> {
    if mat_a.is_square() {
        Ok(())
    } else {
        Err(Error::not_square(op, mat_a.shape()))
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_is_diagonally_dominant() {
        let a = m(&[&[4.0, 1.0, 1.0], &[1.0, 3.0, 1.0], &[1.0, 1.0, 5.0]]);
        assert!(is_diagonally_dominant(&a).unwrap());
        // ties count
        assert!(is_diagonally_dominant(&m(&[&[2.0, -2.0], &[1.0, 1.0]])).unwrap());
        // magnitudes, not signed values
        assert!(is_diagonally_dominant(&m(&[&[-5.0, 2.0], &[1.0, -3.0]])).unwrap());
        assert!(!is_diagonally_dominant(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap());

        assert!(matches!(
            is_diagonally_dominant(&m(&[&[1.0, 2.0]])),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_already_dominant_is_unchanged() {
        let a = m(&[&[4.0, 1.0, 1.0], &[1.0, 3.0, 1.0], &[1.0, 1.0, 5.0]]);
        assert_eq!(find_dominant_permutation(&a).unwrap(), Some(vec![0, 1, 2]));
        assert_eq!(get_diagonally_dominant(&a).unwrap(), Some(a));
    }

    #[test]
    fn test_greedy_swaps_columns() {
        let a = m(&[&[1.0, 5.0], &[4.0, 1.0]]);
        let dominant = get_diagonally_dominant(&a).unwrap().unwrap();
        assert_eq!(dominant, m(&[&[5.0, 1.0], &[1.0, 4.0]]));
        assert_eq!(find_dominant_permutation(&a).unwrap(), Some(vec![1, 0]));
    }

    #[test]
    fn test_bruteforce_after_greedy_fails() {
        // Row 1 pulls column 0 onto its diagonal, which breaks row 0. The pass is not repeated,
        // so the exhaustive search has to find [0, 2, 1].
        let a = m(&[&[9.0, 2.0, 2.0], &[5.0, 0.0, 5.0], &[0.0, 7.0, 7.0]]);
        let greedy = greedy_order(&a);
        assert_eq!(greedy, vec![1, 0, 2]);
        assert!(!dominant_under(&a, &greedy));

        assert_eq!(find_dominant_permutation(&a).unwrap(), Some(vec![0, 2, 1]));
        assert_eq!(
            get_diagonally_dominant(&a).unwrap(),
            Some(m(&[&[9.0, 2.0, 2.0], &[5.0, 5.0, 0.0], &[0.0, 7.0, 7.0]]))
        );
    }

    #[test]
    fn test_not_dominant_2x2() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let result = get_diagonally_dominant(&a).unwrap();
        assert_eq!(result, None);
        for order in [[0, 1], [1, 0]] {
            let permuted = a.permute_columns(&order).unwrap();
            assert!(!is_diagonally_dominant(&permuted).unwrap());
        }
    }

    #[test]
    fn test_none_iff_no_permutation_is_dominant() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 1..=5 {
            for _ in 0..40 {
                let a = Matrix::try_from(DMatrix::<f64>::from_fn(n, n, |i, j| {
                    let v: f64 = rng.random_range(-4.0..4.0);
                    // inflate one column per row so dominant orders actually turn up
                    if (i * 7 + j * 3) % n == 0 {
                        v * 4.0
                    } else {
                        v
                    }
                }))
                .unwrap();

                let exists = (0..n)
                    .permutations(n)
                    .any(|order| {
                        is_diagonally_dominant(&a.permute_columns(&order).unwrap()).unwrap()
                    });
                let found = get_diagonally_dominant(&a).unwrap();

                assert_eq!(found.is_some(), exists, "matrix:\n{a}");
                if let Some(dominant) = found {
                    assert!(is_diagonally_dominant(&dominant).unwrap());
                }
            }
        }
    }

    /// `n x n` identity with the 3x3 block that defeats the greedy pass in its top-left corner.
    /// The first dominant order is `[0, 2, 1, 3, .., n-1]`.
    fn greedy_resistant(n: usize) -> Matrix {
        let block = [[9.0, 2.0, 2.0], [5.0, 0.0, 5.0], [0.0, 7.0, 7.0]];
        Matrix::try_from(DMatrix::<f64>::from_fn(n, n, |i, j| {
            if i < 3 && j < 3 {
                block[i][j]
            } else if i == j {
                1.0
            } else {
                0.0
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_bruteforce_at_cutoff() {
        let n = BRUTEFORCE_MAX_COLS;
        let a = greedy_resistant(n);
        assert!(!dominant_under(&a, &greedy_order(&a)));

        let mut expected: Vec<usize> = (0..n).collect();
        expected.swap(1, 2);
        assert_eq!(find_dominant_permutation(&a).unwrap(), Some(expected));
    }

    #[test]
    fn test_bruteforce_cutoff() {
        // a dominant order exists, but 11 columns are past the exhaustive search limit
        let n = BRUTEFORCE_MAX_COLS + 1;
        let a = greedy_resistant(n);
        assert!(!dominant_under(&a, &greedy_order(&a)));

        let mut order: Vec<usize> = (0..n).collect();
        order.swap(1, 2);
        assert!(dominant_under(&a, &order));
        assert_eq!(find_dominant_permutation(&a).unwrap(), None);
        assert_eq!(get_diagonally_dominant(&a).unwrap(), None);

        // identity of the same size needs no search at all
        let eye = Matrix::identity(n).unwrap();
        assert_eq!(get_diagonally_dominant(&eye).unwrap(), Some(eye));
    }
}
