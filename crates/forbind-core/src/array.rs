//! Array capabilities: describing native arrays and rebuilding them from
//! descriptors.
//!
//! Two independent capabilities make up the protocol:
//!
//! - [`ArrayDescribable`]: the type statically knows its element kind, rank
//!   and device-presence, so the Fortran side can build the descriptor from a
//!   Fortran array by itself.
//! - [`FromDescriptor`]: the type can be constructed from a descriptor.
//!
//! A parameter type with both is *wrappable*. A type with only the second is
//! still usable; the foreign caller fills in the descriptor by hand.
//!
//! References to fixed-size native arrays (`&[[f64; 4]; 3]`) have both. Their
//! reconstruction checks the element kind, the rank and every extent (after
//! reversing the descriptor's column-major order) before the data pointer is
//! touched.

use std::ffi::{c_int, c_void};

use crate::descriptor::{ArrayDescriptor, ArrayMeta, MAX_RANK};
use crate::error::BindError;
use crate::scalar::Arithmetic;

mod private {
    pub trait Sealed {}
}

/// A type that reports its array metadata at compile time.
pub trait ArrayDescribable {
    const META: ArrayMeta;
}

/// A type that can be constructed from an array descriptor.
pub trait FromDescriptor: Sized {
    /// Build a value viewing the data behind `descriptor`.
    ///
    /// # Safety
    ///
    /// `descriptor.data` must be null or point to a buffer matching the
    /// descriptor's kind and dimensions that stays valid, and unaliased by
    /// writers, for as long as the returned value is used.
    unsafe fn from_descriptor(descriptor: &ArrayDescriptor) -> Result<Self, BindError>;
}

/// Fixed-size native arrays of arithmetic elements, nested to any rank.
///
/// `SHAPE` lists the extents outermost first (Rust order), padded with zeros.
pub trait NativeArray: private::Sealed + Sized + 'static {
    type Element: Arithmetic;
    const RANK: usize;
    const SHAPE: [usize; MAX_RANK];
}

const fn prepend(extent: usize, inner: [usize; MAX_RANK]) -> [usize; MAX_RANK] {
    let mut shape = [0; MAX_RANK];
    shape[0] = extent;
    let mut i = 1;
    while i < MAX_RANK {
        shape[i] = inner[i - 1];
        i += 1;
    }
    shape
}

macro_rules! impl_native_array {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<const N: usize> private::Sealed for [$ty; N] {}

            impl<const N: usize> NativeArray for [$ty; N] {
                type Element = $ty;
                const RANK: usize = 1;
                const SHAPE: [usize; MAX_RANK] = prepend(N, [0; MAX_RANK]);
            }
        )*
    };
}

impl_native_array!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<A: NativeArray, const N: usize> private::Sealed for [A; N] {}

impl<A: NativeArray, const N: usize> NativeArray for [A; N] {
    type Element = A::Element;
    const RANK: usize = A::RANK + 1;
    const SHAPE: [usize; MAX_RANK] = prepend(N, A::SHAPE);
}

/// Check that every extent of `shape` fits a descriptor dimension.
const fn extents_fit(shape: [usize; MAX_RANK]) -> bool {
    let mut i = 0;
    while i < MAX_RANK {
        if shape[i] > c_int::MAX as usize {
            return false;
        }
        i += 1;
    }
    true
}

/// Metadata of a native array type.
///
/// Arrays nested deeper than [`MAX_RANK`], or with an extent above
/// `c_int::MAX`, fail to compile. Every extent of a native array therefore
/// converts losslessly to a descriptor dimension.
///
/// ```compile_fail,E0080
/// let _ = forbind_core::native_meta::<[u8; 3_000_000_000]>();
/// ```
pub const fn native_meta<A: NativeArray>() -> ArrayMeta {
    const {
        assert!(extents_fit(A::SHAPE), "array extent does not fit a descriptor dimension");
        ArrayMeta::new(<A::Element as Arithmetic>::SCALAR.element_kind(), A::RANK, false)
    }
}

/// Validate a descriptor against the static shape of `A`.
fn check_native_shape<A: NativeArray>(descriptor: &ArrayDescriptor) -> Result<(), BindError> {
    let meta = native_meta::<A>();
    if descriptor.kind != meta.kind.tag() {
        return Err(BindError::KindMismatch {
            expected: meta.kind.tag(),
            found: descriptor.kind,
        });
    }
    if descriptor.rank != meta.rank as c_int {
        return Err(BindError::RankMismatch {
            expected: meta.rank,
            found: descriptor.rank,
        });
    }
    for (dimension, &expected) in A::SHAPE[..meta.rank].iter().enumerate() {
        let found = descriptor.dims[meta.rank - 1 - dimension];
        if usize::try_from(found) != Ok(expected) {
            return Err(BindError::ExtentMismatch {
                dimension,
                // Lossless: `native_meta` bounds every extent by `c_int::MAX`.
                expected: expected as c_int,
                found,
            });
        }
    }
    if descriptor.data.is_null() {
        return Err(BindError::NullData);
    }
    Ok(())
}

impl<A: NativeArray> ArrayDescribable for &A {
    const META: ArrayMeta = native_meta::<A>();
}

impl<A: NativeArray> ArrayDescribable for &mut A {
    const META: ArrayMeta = native_meta::<A>();
}

impl<A: NativeArray> FromDescriptor for &A {
    unsafe fn from_descriptor(descriptor: &ArrayDescriptor) -> Result<Self, BindError> {
        check_native_shape::<A>(descriptor)?;
        Ok(unsafe { &*descriptor.data.cast::<A>() })
    }
}

impl<A: NativeArray> FromDescriptor for &mut A {
    unsafe fn from_descriptor(descriptor: &ArrayDescriptor) -> Result<Self, BindError> {
        check_native_shape::<A>(descriptor)?;
        Ok(unsafe { &mut *descriptor.data.cast::<A>() })
    }
}

impl FromDescriptor for ArrayDescriptor {
    unsafe fn from_descriptor(descriptor: &ArrayDescriptor) -> Result<Self, BindError> {
        Ok(*descriptor)
    }
}

impl ArrayDescriptor {
    /// Describe a native array.
    ///
    /// The dimensions are written in Fortran order, so `[[i32; 3]; 2]` yields
    /// `dims = [3, 2, ..]`. The descriptor borrows nothing; keep `array` alive
    /// and in place while the descriptor is used.
    pub fn describe<A: NativeArray>(array: &mut A) -> Self {
        let meta = native_meta::<A>();
        let mut dims: [c_int; MAX_RANK] = [0; MAX_RANK];
        for (slot, &extent) in dims[..meta.rank].iter_mut().rev().zip(&A::SHAPE[..meta.rank]) {
            // Lossless: `native_meta` bounds every extent by `c_int::MAX`.
            *slot = extent as c_int;
        }
        Self::from_meta(meta, &dims, (array as *mut A).cast::<c_void>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ElementKind;

    #[test]
    fn extents_must_fit_a_descriptor_dimension() {
        assert!(extents_fit(<[[u8; 4]; 3] as NativeArray>::SHAPE));
        assert!(extents_fit([c_int::MAX as usize, 0, 0, 0, 0, 0, 0]));
        assert!(!extents_fit([1, c_int::MAX as usize + 1, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn native_shapes() {
        assert_eq!(<[i32; 4] as NativeArray>::RANK, 1);
        assert_eq!(<[[[f64; 4]; 3]; 2] as NativeArray>::RANK, 3);
        assert_eq!(<[[[f64; 4]; 3]; 2] as NativeArray>::SHAPE, [2, 3, 4, 0, 0, 0, 0]);
        assert_eq!(
            native_meta::<[[u8; 2]; 2]>(),
            ArrayMeta::new(ElementKind::SignedChar, 2, false)
        );
    }

    #[test]
    fn describe_transposes() {
        let mut array = [[0i32; 3]; 2];
        let descriptor = ArrayDescriptor::describe(&mut array);
        assert_eq!(descriptor.kind, ElementKind::Int.tag());
        assert_eq!(descriptor.rank, 2);
        assert_eq!(descriptor.extents(), Ok(&[3, 2][..]));
        assert!(!descriptor.data.is_null());
    }

    #[test]
    fn reconstruct_native_reference() {
        let mut array = [[1i32, 2, 3], [4, 5, 6]];
        let descriptor = ArrayDescriptor::describe(&mut array);
        let view = unsafe { <&[[i32; 3]; 2]>::from_descriptor(&descriptor) }.unwrap();
        assert_eq!(view[1][2], 6);
    }

    #[test]
    fn kind_mismatch() {
        let mut array = [[0f32; 3]; 2];
        let descriptor = ArrayDescriptor::describe(&mut array);
        let err = unsafe { <&[[i32; 3]; 2]>::from_descriptor(&descriptor) }.unwrap_err();
        assert_eq!(
            err,
            BindError::KindMismatch {
                expected: ElementKind::Int.tag(),
                found: ElementKind::Float.tag()
            }
        );
    }

    #[test]
    fn rank_mismatch() {
        let mut array = [0i32; 6];
        let descriptor = ArrayDescriptor::describe(&mut array);
        let err = unsafe { <&[[i32; 3]; 2]>::from_descriptor(&descriptor) }.unwrap_err();
        assert_eq!(err, BindError::RankMismatch { expected: 2, found: 1 });
    }

    #[test]
    fn extent_mismatch_reports_native_dimension() {
        // A Fortran 2x3 array is the native [[_; 2]; 3].
        let mut array = [[0i32; 2]; 3];
        let descriptor = ArrayDescriptor::describe(&mut array);
        let err = unsafe { <&mut [[i32; 3]; 2]>::from_descriptor(&descriptor) }.unwrap_err();
        assert_eq!(
            err,
            BindError::ExtentMismatch {
                dimension: 0,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn null_data_is_rejected() {
        let mut array = [0i64; 3];
        let mut descriptor = ArrayDescriptor::describe(&mut array);
        descriptor.data = std::ptr::null_mut();
        let err = unsafe { <&[i64; 3]>::from_descriptor(&descriptor) }.unwrap_err();
        assert_eq!(err, BindError::NullData);
    }
}
