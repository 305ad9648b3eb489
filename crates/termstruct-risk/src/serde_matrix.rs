//! Row-major serialization of nalgebra matrices for report output.

use nalgebra::{DMatrix, DVector};
use serde::ser::SerializeSeq;
use serde::Serializer;

/// Serializes a matrix as a list of rows.
pub(crate) fn rows<S: Serializer>(matrix: &DMatrix<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(matrix.nrows()))?;
    for row in matrix.row_iter() {
        let values: Vec<f64> = row.iter().copied().collect();
        seq.serialize_element(&values)?;
    }
    seq.end()
}

/// Serializes a vector as a flat list.
pub(crate) fn vector<S: Serializer>(vector: &DVector<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(vector.iter())
}
