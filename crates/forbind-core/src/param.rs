//! Per-type implementations of the mapping rules.
//!
//! [`ForeignParam`] and [`ForeignReturn`] attach to each native type its
//! category, its foreign type, and the conversion across the boundary.
//! Arithmetic types, references and pointers to them, native array
//! references and the descriptor itself are covered here; class types get
//! their implementations from `#[derive(Opaque)]`, array views from
//! `#[derive(ArrayView)]`.

use std::ptr;

use crate::array::{ArrayDescribable, FromDescriptor, NativeArray};
use crate::descriptor::{ArrayDescriptor, ArrayMeta};
use crate::error::BindError;
use crate::handle::{self, Handle, Opaque, Taken};
use crate::mapping::{ForeignType, Position, TypeCategory};
use crate::scalar::{Arithmetic, Scalar};

// ============================================================================
// Traits
// ============================================================================

/// A type usable as a parameter of an exported function.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be passed across the foreign boundary",
    label = "no foreign parameter mapping",
    note = "parameters must be arithmetic, a reference or pointer to arithmetic, an array reference, an `ArrayView`, or an `Opaque` class"
)]
pub trait ForeignParam: Sized {
    /// The foreign-safe type the exported function receives.
    type Foreign: Copy;

    const CATEGORY: TypeCategory;

    /// The arithmetic type involved, for the arithmetic categories.
    const SCALAR: Option<Scalar> = None;

    /// Array metadata when the type is array-describable.
    const ARRAY: Option<ArrayMeta> = None;

    /// The resolved foreign type. Evaluating it for a category that cannot
    /// be a parameter fails to compile.
    const FOREIGN: ForeignType = ForeignType::expect(Self::CATEGORY, Position::Param, Self::SCALAR);

    /// Convert a foreign argument into the native value.
    ///
    /// # Safety
    ///
    /// Handles must be null or live and created from the expected type;
    /// pointers must be null or valid for the produced lifetime.
    unsafe fn from_foreign(foreign: Self::Foreign) -> Result<Self, BindError>;
}

/// A type usable as the return type of an exported function.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned across the foreign boundary",
    label = "no foreign return mapping",
    note = "return types must be `()`, arithmetic, or an `Opaque` class by value or by reference"
)]
pub trait ForeignReturn: Sized {
    /// The foreign-safe type the exported function returns.
    type Foreign: Copy;

    const CATEGORY: TypeCategory;

    const SCALAR: Option<Scalar> = None;

    /// The resolved foreign type. Evaluating it for a category that cannot
    /// be returned fails to compile.
    const FOREIGN: ForeignType = ForeignType::expect(Self::CATEGORY, Position::Return, Self::SCALAR);

    fn into_foreign(self) -> Self::Foreign;

    /// The value returned when the call fails: zero, `false`, or null.
    fn error_value() -> Self::Foreign;
}

// ============================================================================
// Void and Arithmetic
// ============================================================================

impl ForeignReturn for () {
    type Foreign = ();
    const CATEGORY: TypeCategory = TypeCategory::Void;

    fn into_foreign(self) {}

    fn error_value() {}
}

macro_rules! impl_arithmetic_params {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ForeignParam for $ty {
                type Foreign = $ty;
                const CATEGORY: TypeCategory = TypeCategory::Arithmetic;
                const SCALAR: Option<Scalar> = Some(<$ty as Arithmetic>::SCALAR);

                unsafe fn from_foreign(foreign: $ty) -> Result<Self, BindError> {
                    Ok(foreign)
                }
            }

            impl ForeignReturn for $ty {
                type Foreign = $ty;
                const CATEGORY: TypeCategory = TypeCategory::Arithmetic;
                const SCALAR: Option<Scalar> = Some(<$ty as Arithmetic>::SCALAR);

                fn into_foreign(self) -> $ty {
                    self
                }

                fn error_value() -> $ty {
                    <$ty>::default()
                }
            }

            impl<'a> ForeignParam for &'a $ty {
                type Foreign = *const $ty;
                const CATEGORY: TypeCategory = TypeCategory::ArithmeticReference;
                const SCALAR: Option<Scalar> = Some(<$ty as Arithmetic>::SCALAR);

                unsafe fn from_foreign(foreign: *const $ty) -> Result<Self, BindError> {
                    if foreign.is_null() {
                        return Err(BindError::NullPointer { type_name: stringify!($ty) });
                    }
                    Ok(unsafe { &*foreign })
                }
            }

            impl<'a> ForeignParam for &'a mut $ty {
                type Foreign = *mut $ty;
                const CATEGORY: TypeCategory = TypeCategory::ArithmeticReference;
                const SCALAR: Option<Scalar> = Some(<$ty as Arithmetic>::SCALAR);

                unsafe fn from_foreign(foreign: *mut $ty) -> Result<Self, BindError> {
                    if foreign.is_null() {
                        return Err(BindError::NullPointer { type_name: stringify!($ty) });
                    }
                    Ok(unsafe { &mut *foreign })
                }
            }

            impl ForeignParam for *const $ty {
                type Foreign = *const $ty;
                const CATEGORY: TypeCategory = TypeCategory::ArithmeticPointer;
                const SCALAR: Option<Scalar> = Some(<$ty as Arithmetic>::SCALAR);

                unsafe fn from_foreign(foreign: *const $ty) -> Result<Self, BindError> {
                    Ok(foreign)
                }
            }

            impl ForeignParam for *mut $ty {
                type Foreign = *mut $ty;
                const CATEGORY: TypeCategory = TypeCategory::ArithmeticPointer;
                const SCALAR: Option<Scalar> = Some(<$ty as Arithmetic>::SCALAR);

                unsafe fn from_foreign(foreign: *mut $ty) -> Result<Self, BindError> {
                    Ok(foreign)
                }
            }
        )*
    };
}

impl_arithmetic_params!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

// ============================================================================
// Arrays
// ============================================================================

/// Shared conversion for descriptor parameters: null check, then
/// [`FromDescriptor`].
///
/// # Safety
///
/// `descriptor` must be null or point to a valid descriptor; see
/// [`FromDescriptor::from_descriptor`].
pub unsafe fn descriptor_param<T: FromDescriptor>(
    descriptor: *mut ArrayDescriptor,
) -> Result<T, BindError> {
    if descriptor.is_null() {
        return Err(BindError::NullDescriptor);
    }
    unsafe { T::from_descriptor(&*descriptor) }
}

impl<'a, A: NativeArray> ForeignParam for &'a A {
    type Foreign = *mut ArrayDescriptor;
    const CATEGORY: TypeCategory = TypeCategory::Array;
    const ARRAY: Option<ArrayMeta> = Some(<&'a A as ArrayDescribable>::META);

    unsafe fn from_foreign(foreign: *mut ArrayDescriptor) -> Result<Self, BindError> {
        unsafe { descriptor_param(foreign) }
    }
}

impl<'a, A: NativeArray> ForeignParam for &'a mut A {
    type Foreign = *mut ArrayDescriptor;
    const CATEGORY: TypeCategory = TypeCategory::Array;
    const ARRAY: Option<ArrayMeta> = Some(<&'a mut A as ArrayDescribable>::META);

    unsafe fn from_foreign(foreign: *mut ArrayDescriptor) -> Result<Self, BindError> {
        unsafe { descriptor_param(foreign) }
    }
}

impl ForeignParam for ArrayDescriptor {
    type Foreign = *mut ArrayDescriptor;
    const CATEGORY: TypeCategory = TypeCategory::Array;

    unsafe fn from_foreign(foreign: *mut ArrayDescriptor) -> Result<Self, BindError> {
        unsafe { descriptor_param(foreign) }
    }
}

impl<'a> ForeignParam for &'a ArrayDescriptor {
    type Foreign = *mut ArrayDescriptor;
    const CATEGORY: TypeCategory = TypeCategory::Array;

    unsafe fn from_foreign(foreign: *mut ArrayDescriptor) -> Result<Self, BindError> {
        if foreign.is_null() {
            return Err(BindError::NullDescriptor);
        }
        Ok(unsafe { &*foreign })
    }
}

impl<'a> ForeignParam for &'a mut ArrayDescriptor {
    type Foreign = *mut ArrayDescriptor;
    const CATEGORY: TypeCategory = TypeCategory::Array;

    unsafe fn from_foreign(foreign: *mut ArrayDescriptor) -> Result<Self, BindError> {
        if foreign.is_null() {
            return Err(BindError::NullDescriptor);
        }
        Ok(unsafe { &mut *foreign })
    }
}

// ============================================================================
// Classes
// ============================================================================

impl<T: Opaque> ForeignParam for *const T {
    type Foreign = *mut Handle;
    const CATEGORY: TypeCategory = TypeCategory::ClassPointer;

    unsafe fn from_foreign(foreign: *mut Handle) -> Result<Self, BindError> {
        Ok(unsafe { handle::value_ptr::<T>(foreign) }.cast_const())
    }
}

impl<T: Opaque> ForeignParam for *mut T {
    type Foreign = *mut Handle;
    const CATEGORY: TypeCategory = TypeCategory::ClassPointer;

    unsafe fn from_foreign(foreign: *mut Handle) -> Result<Self, BindError> {
        Ok(unsafe { handle::value_ptr::<T>(foreign) })
    }
}

impl<T: Opaque + Default> ForeignParam for Taken<T> {
    type Foreign = *mut Handle;
    const CATEGORY: TypeCategory = TypeCategory::ClassReference;

    unsafe fn from_foreign(foreign: *mut Handle) -> Result<Self, BindError> {
        unsafe { handle::take::<T>(foreign) }.map(Taken)
    }
}

impl<'a, T: Opaque + Clone> ForeignReturn for &'a T {
    type Foreign = *mut Handle;
    const CATEGORY: TypeCategory = TypeCategory::ClassReference;

    fn into_foreign(self) -> *mut Handle {
        handle::into_handle(self.clone())
    }

    fn error_value() -> *mut Handle {
        ptr::null_mut()
    }
}

impl<'a, T: Opaque + Clone> ForeignReturn for &'a mut T {
    type Foreign = *mut Handle;
    const CATEGORY: TypeCategory = TypeCategory::ClassReference;

    fn into_foreign(self) -> *mut Handle {
        handle::into_handle(self.clone())
    }

    fn error_value() -> *mut Handle {
        ptr::null_mut()
    }
}
