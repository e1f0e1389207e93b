//! Scalar kinds usable as colormap keys.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;
use lazy_static::lazy_static;
use ndarray::ArrayViewD;
use num_traits::{Num, NumCast};
use crate::colormap::Colormap;
use crate::dynamic::{DynColormap, ScalarArray};
use crate::error::Error;

/// The numeric kinds a colormap can be keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8, U16, U32, U64,
    I8, I16, I32, I64,
    F32, F64,
}

impl ScalarKind {
    /// All supported kinds.
    pub const ALL: [ScalarKind; 10] = {
        use ScalarKind::*;
        [U8, U16, U32, U64, I8, I16, I32, I64, F32, F64]
    };

    /// The numpy name of the kind (e.g. `"uint8"`).
    pub fn name(self) -> &'static str {
        use ScalarKind::*;
        match self {
            U8 => "uint8",  U16 => "uint16", U32 => "uint32", U64 => "uint64",
            I8 => "int8",   I16 => "int16",  I32 => "int32",  I64 => "int64",
            F32 => "float32", F64 => "float64",
        }
    }

    /// Width of a scalar of this kind, in bytes.
    pub fn size(self) -> usize {
        use ScalarKind::*;
        match self {
            U8 | I8 => 1,
            U16 | I16 => 2,
            U32 | I32 | F32 => 4,
            U64 | I64 | F64 => 8,
        }
    }

    pub fn is_float(self) -> bool { matches!(self, ScalarKind::F32 | ScalarKind::F64) }

    pub fn is_signed(self) -> bool {
        use ScalarKind::*;
        matches!(self, I8 | I16 | I32 | I64 | F32 | F64)
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    /// Numpy dtype names and type codes, without byte-order prefix.
    static ref DTYPES: HashMap<&'static str, ScalarKind> = {
        use ScalarKind::*;
        let mut m = HashMap::new();
        for k in ScalarKind::ALL { m.insert(k.name(), k); }
        for (code, k) in [("u1", U8), ("u2", U16), ("u4", U32), ("u8", U64),
                          ("i1", I8), ("i2", I16), ("i4", I32), ("i8", I64),
                          ("f4", F32), ("f8", F64),
                          ("B", U8), ("b", I8), ("H", U16), ("h", I16),
                          ("f", F32), ("d", F64),
                          ("single", F32), ("double", F64),
                          ("ubyte", U8), ("byte", I8),
                          ("ushort", U16), ("short", I16)] {
            m.insert(code, k);
        }
        m
    };
}

impl FromStr for ScalarKind {
    type Err = Error;

    /// Parse a numpy dtype string such as `"uint16"`, `"<i4"` or
    /// `"f8"`.  A big-endian prefix `>` is only accepted for
    /// single-byte kinds on little-endian hosts (and conversely).
    fn from_str(s: &str) -> Result<Self, Error> {
        let unknown = || Error::UnknownDtype(s.to_string());
        let (prefix, name) = match s.chars().next() {
            Some(c @ ('<' | '>' | '=' | '|')) => (Some(c), &s[1..]),
            _ => (None, s),
        };
        let kind = *DTYPES.get(name).ok_or_else(unknown)?;
        let foreign = if cfg!(target_endian = "little") { '>' } else { '<' };
        if prefix == Some(foreign) && kind.size() > 1 {
            return Err(unknown())
        }
        Ok(kind)
    }
}

/// A scalar type that can key a [`Colormap`].
///
/// Keys are compared through [`CategoricalKey::Bits`]: integers by
/// value and floats by their bit pattern.  This means that, for
/// floating point keys, `-0.0` and `0.0` are *different* categories
/// and that a `NaN` key only matches a `NaN` with the very same
/// payload.
pub trait CategoricalKey:
    Num + NumCast + Copy + Debug + Send + Sync + 'static
{
    /// Hashable representation used by the lookup table.
    type Bits: Copy + Eq + Hash + Debug + Send + Sync;

    /// Runtime tag of the type.
    const KIND: ScalarKind;

    fn to_bits(self) -> Self::Bits;

    fn from_bits(bits: Self::Bits) -> Self;

    /// Wrap a view into the runtime-typed array.
    fn wrap_array(view: ArrayViewD<'_, Self>) -> ScalarArray<'_>;

    /// Wrap a colormap into the runtime-typed colormap.
    fn wrap_colormap(colormap: Colormap<Self>) -> DynColormap;

    /// Return the colormap if it is keyed by `Self`.
    fn unwrap_colormap(colormap: &DynColormap) -> Option<&Colormap<Self>>;
}

macro_rules! impl_key {
    (int $t: ty, $kind: ident) => {
        impl_key!($t, $kind, $t, |x| x, |b| b);
    };
    (float $t: ty, $kind: ident, $bits: ty) => {
        impl_key!($t, $kind, $bits, |x| x.to_bits(), |b| <$t>::from_bits(b));
    };
    ($t: ty, $kind: ident, $bits: ty, |$x: ident| $to: expr, |$b: ident| $from: expr) => {
        impl CategoricalKey for $t {
            type Bits = $bits;
            const KIND: ScalarKind = ScalarKind::$kind;

            #[inline]
            fn to_bits(self) -> $bits { let $x = self; $to }

            #[inline]
            fn from_bits($b: $bits) -> Self { $from }

            fn wrap_array(view: ArrayViewD<'_, Self>) -> ScalarArray<'_> {
                ScalarArray::$kind(view)
            }

            fn wrap_colormap(colormap: Colormap<Self>) -> DynColormap {
                DynColormap::$kind(colormap)
            }

            fn unwrap_colormap(colormap: &DynColormap) -> Option<&Colormap<Self>> {
                match colormap {
                    DynColormap::$kind(c) => Some(c),
                    _ => None,
                }
            }
        }
    };
}

impl_key!(int u8, U8);
impl_key!(int u16, U16);
impl_key!(int u32, U32);
impl_key!(int u64, U64);
impl_key!(int i8, I8);
impl_key!(int i16, I16);
impl_key!(int i32, I32);
impl_key!(int i64, I64);
impl_key!(float f32, F32, u32);
impl_key!(float f64, F64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags() {
        assert_eq!(u8::KIND, ScalarKind::U8);
        assert_eq!(i64::KIND, ScalarKind::I64);
        assert_eq!(f32::KIND, ScalarKind::F32);
        for k in ScalarKind::ALL {
            assert_eq!(k.name().parse::<ScalarKind>(), Ok(k));
        }
        assert_eq!(ScalarKind::U16.size(), 2);
        assert!(ScalarKind::F64.is_float());
        assert!(!ScalarKind::I8.is_float());
        assert!(ScalarKind::I8.is_signed());
        assert!(!ScalarKind::U64.is_signed());
    }

    #[test]
    fn parse_dtype_codes() {
        assert_eq!("<i4".parse::<ScalarKind>(), Ok(ScalarKind::I32));
        assert_eq!("=f8".parse::<ScalarKind>(), Ok(ScalarKind::F64));
        assert_eq!("|u1".parse::<ScalarKind>(), Ok(ScalarKind::U8));
        assert_eq!("u8".parse::<ScalarKind>(), Ok(ScalarKind::U64));
        assert_eq!("B".parse::<ScalarKind>(), Ok(ScalarKind::U8));
        assert_eq!("double".parse::<ScalarKind>(), Ok(ScalarKind::F64));
        assert_eq!("complex64".parse::<ScalarKind>(),
                   Err(Error::UnknownDtype("complex64".into())));
        assert!("".parse::<ScalarKind>().is_err());
        assert!("<".parse::<ScalarKind>().is_err());
    }

    #[test]
    fn parse_byte_order() {
        assert_eq!(">u1".parse::<ScalarKind>(), Ok(ScalarKind::U8));
        if cfg!(target_endian = "little") {
            assert!(">i4".parse::<ScalarKind>().is_err());
        } else {
            assert!("<i4".parse::<ScalarKind>().is_err());
        }
    }

    #[test]
    fn float_bits() {
        assert_ne!(0.0f64.to_bits(), (-0.0f64).to_bits());
        assert_eq!(<f32 as CategoricalKey>::to_bits(f32::NAN),
                   <f32 as CategoricalKey>::to_bits(f32::NAN));
        assert_eq!(<f64 as CategoricalKey>::from_bits(1.5f64.to_bits()), 1.5);
        assert_eq!(<i16 as CategoricalKey>::to_bits(-3), -3);
    }
}
