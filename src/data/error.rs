use thiserror::Error;

use super::model::Shape;

/// Everything that can go wrong between raw bytes and a validated comparison.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("file is {0} bytes long, which is not a whole number of float32 values")]
    Misaligned(usize),

    #[error("file holds {0} float32 values, too few for the (L, M, N) header")]
    TruncatedHeader(usize),

    #[error("header declares a negative dimension: {0:?}")]
    NegativeDimension([i32; 3]),

    #[error("header declares shape {shape} ({expected} samples) but the file holds {actual}")]
    ElementCount {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    #[error("Data must be 3D, got {0} dimensions")]
    NotThreeDimensional(usize),

    #[error("Data shapes must match. {left_name}.shape = {left}, {right_name}.shape = {right}")]
    ShapeMismatch {
        left_name: String,
        left: Shape,
        right_name: String,
        right: Shape,
    },

    #[error("slice index {index} is out of range for {slices} slices")]
    SliceOutOfRange { index: usize, slices: usize },
}
