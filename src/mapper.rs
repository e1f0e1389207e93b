//! Element-wise application of a [`Colormap`].

use std::borrow::Cow;
use ndarray::{Array2, ArrayViewD};
use rgb::RGBA8;
use tracing::{debug, trace_span};
use crate::colormap::Colormap;
use crate::error::{self, Error, Result};
use crate::key::CategoricalKey;
use crate::options::MapOptions;

/// Number of elements handed to a worker at a time.
#[cfg(feature = "parallel")]
const CHUNK: usize = 1 << 14;

/// Map every element of `data` to its color, or to `fallback` when it
/// is not a key of `colormap`.
///
/// The result has the same length as `data` and `result[i]` is the
/// color of `data[i]`.  This always runs on the calling thread; see
/// [`apply_with`] for parallel mapping.
pub fn apply<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                                fallback: RGBA8) -> Vec<RGBA8> {
    data.iter().map(|&v| colormap.color_or(v, fallback)).collect()
}

/// Same as [`apply`] with the fallback color and scheduling given by
/// `options`.
///
/// Fails only if a dedicated thread pool was requested and could not
/// be created.
pub fn apply_with<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                                     options: &MapOptions)
                                     -> Result<Vec<RGBA8>> {
    let mut out = vec![options.fallback; data.len()];
    fill(data, colormap, options, &mut out)?;
    Ok(out)
}

/// Write the colors of `data` into the caller-owned buffer `out`.
///
/// Returns [`Error::ShapeMismatch`] if `out` and `data` differ in
/// length; `out` is then left untouched.
pub fn apply_into<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                                     options: &MapOptions,
                                     out: &mut [RGBA8]) -> Result<()> {
    if out.len() != data.len() {
        return Err(Error::ShapeMismatch {
            left: "data", left_len: data.len(),
            right: "out", right_len: out.len() })
    }
    fill(data, colormap, options, out)
}

/// Map a one-dimensional array view.  Non-contiguous views are copied
/// into a temporary buffer first.
pub(crate) fn apply_view<T: CategoricalKey>(data: &ArrayViewD<'_, T>,
                                            colormap: &Colormap<T>,
                                            options: &MapOptions)
                                            -> Result<Vec<RGBA8>> {
    error::ensure_1d("data", data.shape())?;
    apply_with(&contiguous(data), colormap, options)
}

/// Copy colors into a `[n, 4]` byte array, one RGBA row per color.
pub fn to_rgba_array(colors: &[RGBA8]) -> Array2<u8> {
    Array2::from_shape_fn((colors.len(), 4), |(i, j)| {
        let c = colors[i];
        [c.r, c.g, c.b, c.a][j]
    })
}

pub(crate) fn contiguous<'a, T: Copy>(view: &'a ArrayViewD<'_, T>) -> Cow<'a, [T]> {
    match view.as_slice() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(view.iter().copied().collect()),
    }
}

fn fill<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                           options: &MapOptions, out: &mut [RGBA8])
                           -> Result<()> {
    let _span = trace_span!("apply_colormap", kind = %T::KIND,
                            len = data.len()).entered();
    let misses = if options.runs_parallel(data.len()) {
        fill_parallel(data, colormap, options, out)?
    } else {
        fill_chunk(data, colormap, options.fallback, out)
    };
    debug!(len = data.len(), misses, mode = ?options.mode, "array mapped");
    Ok(())
}

/// Sequential kernel.  Returns the number of values that got the
/// fallback color.
#[inline]
fn fill_chunk<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                                 fallback: RGBA8, out: &mut [RGBA8]) -> usize {
    let mut misses = 0;
    for (o, &v) in out.iter_mut().zip(data) {
        *o = match colormap.get(v) {
            Some(c) => c,
            None => { misses += 1; fallback }
        };
    }
    misses
}

#[cfg(feature = "parallel")]
fn fill_parallel<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                                    options: &MapOptions, out: &mut [RGBA8])
                                    -> Result<usize> {
    use rayon::prelude::*;
    use crate::options::ProcessingMode;
    let fallback = options.fallback;
    let run = move |out: &mut [RGBA8]| -> usize {
        out.par_chunks_mut(CHUNK)
            .zip(data.par_chunks(CHUNK))
            .map(|(o, d)| fill_chunk(d, colormap, fallback, o))
            .sum()
    };
    match options.mode {
        ProcessingMode::ParallelWith(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::ThreadPool(e.to_string()))?;
            Ok(pool.install(|| run(out)))
        }
        _ => Ok(run(out)),
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_parallel<T: CategoricalKey>(data: &[T], colormap: &Colormap<T>,
                                    options: &MapOptions, out: &mut [RGBA8])
                                    -> Result<usize> {
    Ok(fill_chunk(data, colormap, options.fallback, out))
}
