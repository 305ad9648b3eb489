//! Linear algebra utilities.
//!
//! Covariance estimation and ordered eigen-decomposition used by the
//! principal component analysis of curve movements.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector, SymmetricEigen};

/// Relative tolerance used when checking a matrix for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Unbiased sample covariance of the rows of `data`.
///
/// Each row is a variable and each column an observation; the result is a
/// `rows x rows` matrix with denominator `n - 1`.
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] with fewer than 2 observations,
/// or [`MathError::InvalidInput`] if the data contain non-finite values.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use termstruct_math::linear_algebra::sample_covariance;
///
/// let data = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
/// let cov = sample_covariance(&data).unwrap();
///
/// assert!((cov[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((cov[(0, 1)] - 2.0).abs() < 1e-12);
/// assert!((cov[(1, 1)] - 4.0).abs() < 1e-12);
/// ```
pub fn sample_covariance(data: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let (variables, observations) = data.shape();
    if observations < 2 {
        return Err(MathError::insufficient_data(2, observations));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input(
            "covariance input contains non-finite values",
        ));
    }

    let means = data.column_mean();
    let mut centered = data.clone();
    for (mut row, mean) in centered.row_iter_mut().zip(means.iter()) {
        row.add_scalar_mut(-mean);
    }

    let denominator = (observations - 1) as f64;
    let mut cov = &centered * centered.transpose() / denominator;

    // Force exact symmetry against rounding in the product
    for i in 0..variables {
        for j in (i + 1)..variables {
            let avg = 0.5 * (cov[(i, j)] + cov[(j, i)]);
            cov[(i, j)] = avg;
            cov[(j, i)] = avg;
        }
    }

    Ok(cov)
}

/// Returns true if `matrix` is square and symmetric within a relative tolerance.
pub fn is_symmetric(matrix: &DMatrix<f64>) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let scale = matrix.amax().max(1.0);
    let n = matrix.nrows();
    (0..n).all(|i| {
        ((i + 1)..n).all(|j| (matrix[(i, j)] - matrix[(j, i)]).abs() <= SYMMETRY_TOLERANCE * scale)
    })
}

/// Symmetric eigen-decomposition with eigenvalues in descending order.
///
/// Column `k` of the returned matrix is the unit eigenvector for eigenvalue
/// `k`. Each eigenvector is oriented so that its component of largest
/// magnitude is non-negative, which makes the output deterministic.
///
/// # Errors
///
/// Returns [`MathError::DimensionMismatch`] for a non-square matrix,
/// [`MathError::InsufficientData`] for an empty one, and
/// [`MathError::InvalidInput`] if it is not symmetric or not finite.
pub fn sorted_symmetric_eigen(matrix: &DMatrix<f64>) -> MathResult<(DVector<f64>, DMatrix<f64>)> {
    if !matrix.is_square() {
        return Err(MathError::dimension_mismatch(
            matrix.shape(),
            (matrix.nrows(), matrix.nrows()),
        ));
    }
    let n = matrix.nrows();
    if n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("matrix contains non-finite values"));
    }
    if !is_symmetric(matrix) {
        return Err(MathError::invalid_input("matrix is not symmetric"));
    }

    let eig = SymmetricEigen::new(matrix.clone());

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));

    let values = DVector::from_iterator(n, order.iter().map(|&k| eig.eigenvalues[k]));
    let mut vectors = DMatrix::zeros(n, n);
    for (dst, &src) in order.iter().enumerate() {
        let mut column = eig.eigenvectors.column(src).clone_owned();
        let pivot = column.iamax();
        if column[pivot] < 0.0 {
            column.neg_mut();
        }
        vectors.set_column(dst, &column);
    }

    Ok((values, vectors))
}
