//! Exact-match value → color tables.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use ndarray::ArrayViewD;
use rgb::RGBA8;
use tracing::{debug, trace_span};
use crate::error::{self, Error, Result};
use crate::key::CategoricalKey;

/// One row of a colormap definition: a key and its color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColormapEntry<T> {
    pub value: T,
    pub color: RGBA8,
}

impl<T> ColormapEntry<T> {
    pub const fn new(value: T, color: RGBA8) -> Self { Self { value, color } }
}

impl<T> From<(T, RGBA8)> for ColormapEntry<T> {
    fn from((value, color): (T, RGBA8)) -> Self { Self { value, color } }
}

/// A lookup table from categorical values to colors.
///
/// Inserting a key that is already present replaces its color, so
/// when a colormap is built from a list of entries, the *last* entry
/// for a given key wins.
///
/// # Example
///
/// ```
/// use rgb::RGBA8;
/// use categorical_colormap::Colormap;
/// let red = RGBA8::new(255, 0, 0, 255);
/// let blue = RGBA8::new(0, 0, 255, 255);
/// let cmap: Colormap<i32> = [(5, red), (5, blue)].into_iter().collect();
/// assert_eq!(cmap.get(5), Some(blue));
/// ```
#[derive(Clone, Debug)]
pub struct Colormap<T: CategoricalKey> {
    table: HashMap<T::Bits, RGBA8>,
}

impl<T: CategoricalKey> Default for Colormap<T> {
    fn default() -> Self { Self::new() }
}

impl<T: CategoricalKey> PartialEq for Colormap<T> {
    fn eq(&self, other: &Self) -> bool { self.table == other.table }
}

impl<T: CategoricalKey> Colormap<T> {
    /// Return an empty colormap.  Every value is then mapped to the
    /// fallback color.
    pub fn new() -> Self { Self { table: HashMap::new() } }

    pub fn with_capacity(n: usize) -> Self {
        Self { table: HashMap::with_capacity(n) }
    }

    /// Build a colormap from a one-dimensional array of entries.
    ///
    /// Returns [`Error::InvalidShape`] if `entries` is not 1-D.
    pub fn from_entries(entries: ArrayViewD<'_, ColormapEntry<T>>)
                        -> Result<Self> {
        error::ensure_1d("colormap", entries.shape())?;
        Ok(Self::build(entries.iter().copied()))
    }

    /// Build a colormap from parallel slices of keys and colors.
    ///
    /// Returns [`Error::ShapeMismatch`] if the slices differ in
    /// length.
    pub fn from_pairs(values: &[T], colors: &[RGBA8]) -> Result<Self> {
        if values.len() != colors.len() {
            return Err(Error::ShapeMismatch {
                left: "values", left_len: values.len(),
                right: "colors", right_len: colors.len() })
        }
        Ok(Self::build(values.iter().copied().zip(colors.iter().copied())
                       .map(ColormapEntry::from)))
    }

    /// Build a colormap from a one-dimensional array of keys and a
    /// `[n, 4]` array of RGBA bytes, row `i` being the color of
    /// `values[i]`.
    pub fn from_arrays(values: ArrayViewD<'_, T>,
                       colors: ArrayViewD<'_, u8>) -> Result<Self> {
        error::ensure_1d("values", values.shape())?;
        let colors = error::ensure_rgba_rows("colors", colors)?;
        if values.len() != colors.nrows() {
            return Err(Error::ShapeMismatch {
                left: "values", left_len: values.len(),
                right: "colors", right_len: colors.nrows() })
        }
        let colors = colors.rows().into_iter()
            .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]));
        Ok(Self::build(values.iter().copied().zip(colors)
                       .map(ColormapEntry::from)))
    }

    /// Single pass over `entries`; later entries overwrite earlier
    /// ones with the same key.
    pub(crate) fn build(entries: impl IntoIterator<Item = ColormapEntry<T>>)
                        -> Self {
        let _span = trace_span!("build_colormap", kind = %T::KIND).entered();
        let entries = entries.into_iter();
        let mut cmap = Self::with_capacity(entries.size_hint().0);
        let mut n = 0usize;
        let mut overwritten = 0usize;
        for ColormapEntry { value, color } in entries {
            n += 1;
            if cmap.insert(value, color).is_some() { overwritten += 1 }
        }
        debug!(entries = n, distinct = cmap.len(), overwritten,
               "colormap built");
        cmap
    }

    /// Set the color of `key`, returning the previous one, if any.
    pub fn insert(&mut self, key: T, color: RGBA8) -> Option<RGBA8> {
        match self.table.entry(key.to_bits()) {
            Entry::Occupied(mut e) => Some(e.insert(color)),
            Entry::Vacant(e) => { e.insert(color); None }
        }
    }

    /// Return the color of `key`, if present.
    #[inline]
    pub fn get(&self, key: T) -> Option<RGBA8> {
        self.table.get(&key.to_bits()).copied()
    }

    /// Return the color of `key`, or `fallback` if absent.
    #[inline]
    pub fn color_or(&self, key: T, fallback: RGBA8) -> RGBA8 {
        self.get(key).unwrap_or(fallback)
    }

    #[inline]
    pub fn contains(&self, key: T) -> bool {
        self.table.contains_key(&key.to_bits())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize { self.table.len() }

    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    /// Iterate over the (key, color) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (T, RGBA8)> + '_ {
        self.table.iter().map(|(&b, &c)| (T::from_bits(b), c))
    }
}

impl<T: CategoricalKey> FromIterator<ColormapEntry<T>> for Colormap<T> {
    fn from_iter<I: IntoIterator<Item = ColormapEntry<T>>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<T: CategoricalKey> FromIterator<(T, RGBA8)> for Colormap<T> {
    fn from_iter<I: IntoIterator<Item = (T, RGBA8)>>(iter: I) -> Self {
        Self::build(iter.into_iter().map(ColormapEntry::from))
    }
}

impl<T: CategoricalKey> Extend<ColormapEntry<T>> for Colormap<T> {
    fn extend<I: IntoIterator<Item = ColormapEntry<T>>>(&mut self, iter: I) {
        for ColormapEntry { value, color } in iter {
            self.insert(value, color);
        }
    }
}

impl<T: CategoricalKey> Extend<(T, RGBA8)> for Colormap<T> {
    fn extend<I: IntoIterator<Item = (T, RGBA8)>>(&mut self, iter: I) {
        for (value, color) in iter { self.insert(value, color); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2, IxDyn};

    const RED: RGBA8 = RGBA8 { r: 255, g: 0, b: 0, a: 255 };
    const GREEN: RGBA8 = RGBA8 { r: 0, g: 255, b: 0, a: 255 };
    const BLUE: RGBA8 = RGBA8 { r: 0, g: 0, b: 255, a: 255 };

    #[test]
    fn last_entry_wins() {
        let cmap: Colormap<u16> = [(5, RED), (7, GREEN), (5, BLUE)]
            .into_iter().collect();
        assert_eq!(cmap.len(), 2);
        assert_eq!(cmap.get(5), Some(BLUE));
        assert_eq!(cmap.get(7), Some(GREEN));
        assert_eq!(cmap.get(6), None);
        assert!(cmap.contains(7));
        assert!(!cmap.contains(8));
    }

    #[test]
    fn insert_returns_previous() {
        let mut cmap = Colormap::<i8>::new();
        assert!(cmap.is_empty());
        assert_eq!(cmap.insert(-1, RED), None);
        assert_eq!(cmap.insert(-1, GREEN), Some(RED));
        assert_eq!(cmap.color_or(-1, BLUE), GREEN);
        assert_eq!(cmap.color_or(1, BLUE), BLUE);
        cmap.extend([ColormapEntry::new(-1, BLUE)]);
        assert_eq!(cmap.get(-1), Some(BLUE));
    }

    #[test]
    fn entries_must_be_1d() {
        let entries = arr1(&[ColormapEntry::new(1u32, RED),
                             ColormapEntry::new(2, GREEN)]);
        let cmap = Colormap::from_entries(entries.view().into_dyn()).unwrap();
        assert_eq!(cmap.get(2), Some(GREEN));

        let entries = Array2::from_elem((2, 1), ColormapEntry::new(1u32, RED));
        match Colormap::from_entries(entries.view().into_dyn()) {
            Err(Error::InvalidShape { argument: "colormap", actual, .. }) =>
                assert_eq!(actual, vec![2, 1]),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn pairs() {
        let cmap = Colormap::from_pairs(&[1.5f32, 2.5], &[RED, GREEN]).unwrap();
        assert_eq!(cmap.get(2.5), Some(GREEN));
        assert_eq!(Colormap::from_pairs(&[1.5f32], &[RED, GREEN]),
                   Err(Error::ShapeMismatch { left: "values", left_len: 1,
                                              right: "colors", right_len: 2 }));
    }

    #[test]
    fn arrays() {
        let values = arr1(&[10i64, 20, 10]);
        let colors = arr2(&[[1u8, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);
        let cmap = Colormap::from_arrays(values.view().into_dyn(),
                                         colors.view().into_dyn()).unwrap();
        assert_eq!(cmap.len(), 2);
        assert_eq!(cmap.get(10), Some(RGBA8::new(9, 10, 11, 12)));
        assert_eq!(cmap.get(20), Some(RGBA8::new(5, 6, 7, 8)));

        let bad = arr2(&[[1u8, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert!(matches!(
            Colormap::from_arrays(values.view().into_dyn(), bad.view().into_dyn()),
            Err(Error::InvalidShape { argument: "colors", .. })));

        let short = arr2(&[[1u8, 2, 3, 4]]);
        assert!(matches!(
            Colormap::from_arrays(values.view().into_dyn(), short.view().into_dyn()),
            Err(Error::ShapeMismatch { left_len: 3, right_len: 1, .. })));

        let flat = ndarray::ArrayD::<i64>::zeros(IxDyn(&[3, 1]));
        assert!(matches!(
            Colormap::from_arrays(flat.view(), colors.view().into_dyn()),
            Err(Error::InvalidShape { argument: "values", .. })));
    }

    #[test]
    fn float_keys_by_bits() {
        let cmap: Colormap<f64> = [(0.0, RED), (f64::NAN, GREEN)]
            .into_iter().collect();
        assert_eq!(cmap.get(0.0), Some(RED));
        assert_eq!(cmap.get(-0.0), None);
        assert_eq!(cmap.get(f64::NAN), Some(GREEN));
        assert_eq!(cmap.get(0.1 + 0.2), None);
    }

    #[test]
    fn iter_roundtrips_keys() {
        let cmap: Colormap<f32> = [(-0.0, RED), (3.25, BLUE)].into_iter().collect();
        let mut pairs: Vec<_> = cmap.iter().map(|(k, c)| (k.to_bits(), c)).collect();
        pairs.sort_by_key(|p| p.0);
        assert_eq!(pairs, vec![(3.25f32.to_bits(), BLUE), ((-0.0f32).to_bits(), RED)]);
    }
}
