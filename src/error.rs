//! Error types.

use ndarray::{ArrayView2, ArrayViewD, Ix2};
use thiserror::Error;
use crate::key::ScalarKind;

/// Errors raised while validating the arguments of a mapping call.
///
/// All of them are detected before the lookup table is built or any
/// output is allocated.  A value missing from the colormap is *not*
/// an error: it is colored with the fallback color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument does not have the required number of dimensions
    /// (or the required trailing dimension).
    #[error("invalid shape for `{argument}`: expected {expected}, got {actual:?}")]
    InvalidShape {
        argument: &'static str,
        expected: &'static str,
        actual: Vec<usize>,
    },

    /// Two arguments that must have the same length do not.
    #[error("length mismatch: `{left}` has {left_len} rows but `{right}` has {right_len}")]
    ShapeMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// The data and the colormap keys are of different scalar kinds.
    #[error("type mismatch: colormap is keyed by {expected} but data is {actual}")]
    TypeMismatch { expected: ScalarKind, actual: ScalarKind },

    /// A dtype name could not be parsed into a [`ScalarKind`].
    #[error("unsupported dtype: {0:?}")]
    UnknownDtype(String),

    /// A dedicated worker pool could not be created.
    #[error("cannot build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Require `shape` to be one-dimensional.
pub(crate) fn ensure_1d(argument: &'static str, shape: &[usize])
                        -> Result<()> {
    if shape.len() == 1 { Ok(()) }
    else { Err(Error::InvalidShape { argument, expected: "a 1-D array",
                                     actual: shape.to_vec() }) }
}

/// Require `colors` to be a `[n, 4]` array and return it as such.
pub(crate) fn ensure_rgba_rows<'a>(argument: &'static str,
                                   colors: ArrayViewD<'a, u8>)
                                   -> Result<ArrayView2<'a, u8>> {
    let invalid = |actual: &[usize]| Error::InvalidShape {
        argument, expected: "a 2-D array with 4 columns",
        actual: actual.to_vec() };
    if !matches!(colors.shape(), &[_, 4]) {
        return Err(invalid(colors.shape()))
    }
    let shape = colors.shape().to_vec();
    colors.into_dimensionality::<Ix2>().map_err(|_| invalid(&shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, ArrayD, IxDyn};

    #[test]
    fn one_dimensional() {
        assert!(ensure_1d("data", &[0]).is_ok());
        assert!(ensure_1d("data", &[12]).is_ok());
        assert_eq!(ensure_1d("data", &[3, 4]),
                   Err(Error::InvalidShape { argument: "data",
                                             expected: "a 1-D array",
                                             actual: vec![3, 4] }));
        assert!(ensure_1d("data", &[]).is_err());
    }

    #[test]
    fn rgba_rows() {
        let colors = Array2::<u8>::zeros((7, 4));
        let rows = ensure_rgba_rows("colors", colors.view().into_dyn()).unwrap();
        assert_eq!(rows.nrows(), 7);
        let empty = Array2::<u8>::zeros((0, 4));
        assert!(ensure_rgba_rows("colors", empty.view().into_dyn()).is_ok());
        for shape in [&[7usize, 3][..], &[28][..], &[7, 4, 1][..]] {
            let a = ArrayD::<u8>::zeros(IxDyn(shape));
            assert_eq!(ensure_rgba_rows("colors", a.view()),
                       Err(Error::InvalidShape {
                           argument: "colors",
                           expected: "a 2-D array with 4 columns",
                           actual: shape.to_vec() }));
        }
    }

    #[test]
    fn messages() {
        let e = Error::ShapeMismatch { left: "values", left_len: 3,
                                       right: "colors", right_len: 2 };
        assert_eq!(e.to_string(),
                   "length mismatch: `values` has 3 rows but `colors` has 2");
        let e = Error::TypeMismatch { expected: ScalarKind::I32,
                                      actual: ScalarKind::I64 };
        assert_eq!(e.to_string(),
                   "type mismatch: colormap is keyed by int32 but data is int64");
    }
}
