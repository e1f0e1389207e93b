//! Map arrays of categorical values to RGBA colors.
//!
//! - [`Colormap`]: an exact-match table from values to colors.
//! - [`apply`], [`apply_with`], [`apply_into`]: color a slice of
//!   values with a colormap.
//! - [`map_categorical`] and [`map_discrete`]: the array entry points,
//!   taking the colormap as a list of [`ColormapEntry`] or as two
//!   parallel arrays of values and `[n, 4]` RGBA bytes.
//! - [`ScalarArray`], [`DynColormap`], [`map_dyn`]: the same for arrays
//!   whose element type is only known at run time.
//!
//! Keys may be any of `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`,
//! `i64`, `f32` and `f64` (see [`CategoricalKey`]).  Values absent
//! from the colormap get the fallback color, which defaults to
//! [`TRANSPARENT`] black.  Colors are [`RGBA8`]; a mapped array is a
//! `Vec<RGBA8>` with one color per input element, in input order.
//!
//! # Example
//!
//! ```
//! use ndarray::arr1;
//! use rgb::RGBA8;
//! use categorical_colormap::{map_categorical, ColormapEntry, TRANSPARENT};
//! let red = RGBA8::new(255, 0, 0, 255);
//! let green = RGBA8::new(0, 255, 0, 255);
//! let data = arr1(&[1i32, 2, 3, 99]);
//! let cmap = arr1(&[ColormapEntry::new(1, red), ColormapEntry::new(2, green)]);
//! let colors = map_categorical(data.view().into_dyn(),
//!                              cmap.view().into_dyn(), None).unwrap();
//! assert_eq!(colors, [red, green, TRANSPARENT, TRANSPARENT]);
//! ```
//!
//! # Floating point keys
//!
//! Float keys are matched on their bit pattern, without tolerance:
//! `0.1 + 0.2` does not match a `0.3` key, `-0.0` does not match
//! `0.0`, and a `NaN` key matches `NaN` values with the same payload.

use ndarray::{Array2, ArrayViewD};
pub use rgb::RGBA8;

mod error;
mod key;
mod colormap;
mod options;
mod mapper;
mod dynamic;

pub use error::{Error, Result};
pub use key::{CategoricalKey, ScalarKind};
pub use colormap::{Colormap, ColormapEntry};
pub use options::{MapOptions, ProcessingMode, TRANSPARENT};
pub use mapper::{apply, apply_into, apply_with, to_rgba_array};
pub use dynamic::{map_discrete_dyn, map_dyn, DynColormap, ScalarArray};

/// Color each element of the 1-D array `data` with `colormap`, a 1-D
/// array of entries.  Later entries override earlier ones with the
/// same value.  Values that are not in the colormap get `nan_color`,
/// [`TRANSPARENT`] if `None`.
///
/// Errors: [`Error::InvalidShape`] if `data` or `colormap` is not
/// one-dimensional.
pub fn map_categorical<T: CategoricalKey>(
    data: ArrayViewD<'_, T>, colormap: ArrayViewD<'_, ColormapEntry<T>>,
    nan_color: Option<RGBA8>) -> Result<Vec<RGBA8>> {
    let options = MapOptions::new().fallback(nan_color.unwrap_or(TRANSPARENT));
    map_categorical_with(data, colormap, &options)
}

/// Same as [`map_categorical`], the fallback color and scheduling
/// being taken from `options`.
pub fn map_categorical_with<T: CategoricalKey>(
    data: ArrayViewD<'_, T>, colormap: ArrayViewD<'_, ColormapEntry<T>>,
    options: &MapOptions) -> Result<Vec<RGBA8>> {
    error::ensure_1d("data", data.shape())?;
    let colormap = Colormap::from_entries(colormap)?;
    mapper::apply_view(&data, &colormap, options)
}

/// Color each element of the 1-D array `data`, the colormap being
/// given as a 1-D array of `values` and a `[n, 4]` array of RGBA bytes
/// `colors` (row `i` is the color of `values[i]`).  Returns an
/// `[len(data), 4]` array of RGBA bytes.
///
/// Errors: [`Error::InvalidShape`] if `data` or `values` is not 1-D
/// or `colors` is not `[n, 4]`; [`Error::ShapeMismatch`] if `values`
/// and `colors` do not have the same number of rows.
pub fn map_discrete<T: CategoricalKey>(
    data: ArrayViewD<'_, T>, values: ArrayViewD<'_, T>,
    colors: ArrayViewD<'_, u8>, nan_color: Option<RGBA8>)
    -> Result<Array2<u8>> {
    let options = MapOptions::new().fallback(nan_color.unwrap_or(TRANSPARENT));
    map_discrete_with(data, values, colors, &options)
}

/// Same as [`map_discrete`], the fallback color and scheduling being
/// taken from `options`.
pub fn map_discrete_with<T: CategoricalKey>(
    data: ArrayViewD<'_, T>, values: ArrayViewD<'_, T>,
    colors: ArrayViewD<'_, u8>, options: &MapOptions)
    -> Result<Array2<u8>> {
    error::ensure_1d("data", data.shape())?;
    let colormap = Colormap::from_arrays(values, colors)?;
    let out = mapper::apply_view(&data, &colormap, options)?;
    Ok(to_rgba_array(&out))
}
