//! Runtime-typed arrays and colormaps.
//!
//! Bindings to dynamically typed array libraries only know the dtype
//! of a buffer at run time.  [`ScalarArray`] and [`DynColormap`]
//! carry that tag; [`map_dyn`] checks that data and colormap agree
//! and forwards to the generic mapper.  No implicit widening is done:
//! an `int64` array against an `int32` colormap is an
//! [`Error::TypeMismatch`], even when every value would fit.

use ndarray::{Array2, ArrayViewD};
use rgb::RGBA8;
use crate::colormap::Colormap;
use crate::error::{self, Error, Result};
use crate::key::{CategoricalKey, ScalarKind};
use crate::mapper;
use crate::options::MapOptions;

/// Expand `$body` once per scalar kind, binding `$x` to the payload
/// of the matching variant of `$enum`.  This is the only place where
/// the concrete key types are enumerated.
macro_rules! dispatch {
    ($enum: ident, $value: expr, $x: ident => $body: expr) => {
        match $value {
            $enum::U8($x) => $body,
            $enum::U16($x) => $body,
            $enum::U32($x) => $body,
            $enum::U64($x) => $body,
            $enum::I8($x) => $body,
            $enum::I16($x) => $body,
            $enum::I32($x) => $body,
            $enum::I64($x) => $body,
            $enum::F32($x) => $body,
            $enum::F64($x) => $body,
        }
    };
}

/// A view on an array whose element type is only known at run time.
#[derive(Clone, Debug)]
pub enum ScalarArray<'a> {
    U8(ArrayViewD<'a, u8>),
    U16(ArrayViewD<'a, u16>),
    U32(ArrayViewD<'a, u32>),
    U64(ArrayViewD<'a, u64>),
    I8(ArrayViewD<'a, i8>),
    I16(ArrayViewD<'a, i16>),
    I32(ArrayViewD<'a, i32>),
    I64(ArrayViewD<'a, i64>),
    F32(ArrayViewD<'a, f32>),
    F64(ArrayViewD<'a, f64>),
}

impl<'a> ScalarArray<'a> {
    pub fn new<T: CategoricalKey>(view: ArrayViewD<'a, T>) -> Self {
        T::wrap_array(view)
    }

    pub fn kind(&self) -> ScalarKind {
        dispatch!(ScalarArray, self, a => kind_of(a))
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(ScalarArray, self, a => a.shape())
    }

    pub fn ndim(&self) -> usize { self.shape().len() }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        dispatch!(ScalarArray, self, a => a.len())
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<'a, T: CategoricalKey> From<ArrayViewD<'a, T>> for ScalarArray<'a> {
    fn from(view: ArrayViewD<'a, T>) -> Self { T::wrap_array(view) }
}

fn kind_of<T: CategoricalKey>(_: &ArrayViewD<'_, T>) -> ScalarKind { T::KIND }

/// A colormap whose key type is only known at run time.
#[derive(Clone, Debug, PartialEq)]
pub enum DynColormap {
    U8(Colormap<u8>),
    U16(Colormap<u16>),
    U32(Colormap<u32>),
    U64(Colormap<u64>),
    I8(Colormap<i8>),
    I16(Colormap<i16>),
    I32(Colormap<i32>),
    I64(Colormap<i64>),
    F32(Colormap<f32>),
    F64(Colormap<f64>),
}

impl DynColormap {
    /// Build a colormap keyed by the element type of `values`, row
    /// `i` of the `[n, 4]` array `colors` being the color of
    /// `values[i]`.
    pub fn from_arrays(values: &ScalarArray<'_>, colors: ArrayViewD<'_, u8>)
                       -> Result<Self> {
        dispatch!(ScalarArray, values, v => build_typed(v, colors))
    }

    pub fn kind(&self) -> ScalarKind {
        dispatch!(DynColormap, self, c => colormap_kind(c))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        dispatch!(DynColormap, self, c => c.len())
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Borrow the typed colormap, if it is keyed by `T`.
    pub fn downcast_ref<T: CategoricalKey>(&self) -> Option<&Colormap<T>> {
        T::unwrap_colormap(self)
    }
}

impl<T: CategoricalKey> From<Colormap<T>> for DynColormap {
    fn from(colormap: Colormap<T>) -> Self { T::wrap_colormap(colormap) }
}

fn colormap_kind<T: CategoricalKey>(_: &Colormap<T>) -> ScalarKind { T::KIND }

fn build_typed<T: CategoricalKey>(values: &ArrayViewD<'_, T>,
                                  colors: ArrayViewD<'_, u8>)
                                  -> Result<DynColormap> {
    Colormap::from_arrays(values.view(), colors).map(T::wrap_colormap)
}

/// Map a runtime-typed one-dimensional array with a runtime-typed
/// colormap.
///
/// Errors: [`Error::TypeMismatch`] if the element type of `data` is
/// not the key type of `colormap`, [`Error::InvalidShape`] if `data`
/// is not 1-D.
pub fn map_dyn(data: &ScalarArray<'_>, colormap: &DynColormap,
               options: &MapOptions) -> Result<Vec<RGBA8>> {
    dispatch!(ScalarArray, data, d => map_typed(d, colormap, options))
}

fn map_typed<T: CategoricalKey>(data: &ArrayViewD<'_, T>,
                                colormap: &DynColormap,
                                options: &MapOptions) -> Result<Vec<RGBA8>> {
    let colormap = T::unwrap_colormap(colormap).ok_or(
        Error::TypeMismatch { expected: colormap.kind(), actual: T::KIND })?;
    mapper::apply_view(data, colormap, options)
}

/// Runtime-typed form of [`map_discrete`](crate::map_discrete).
///
/// The kinds of `data` and `values` are compared first, then the
/// shapes, and only then is the colormap built.
pub fn map_discrete_dyn(data: &ScalarArray<'_>, values: &ScalarArray<'_>,
                        colors: ArrayViewD<'_, u8>, options: &MapOptions)
                        -> Result<Array2<u8>> {
    if data.kind() != values.kind() {
        return Err(Error::TypeMismatch { expected: values.kind(),
                                         actual: data.kind() })
    }
    error::ensure_1d("data", data.shape())?;
    let colormap = DynColormap::from_arrays(values, colors)?;
    map_dyn(data, &colormap, options).map(|c| mapper::to_rgba_array(&c))
}
