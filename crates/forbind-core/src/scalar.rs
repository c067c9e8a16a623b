//! Arithmetic types that cross the foreign boundary unchanged.
//!
//! ## Supported Types
//!
//! | Rust   | C                    | Fortran                   |
//! |--------|----------------------|---------------------------|
//! | `bool` | `bool`               | `logical(c_bool)`         |
//! | `i8`   | `signed char`        | `integer(c_signed_char)`  |
//! | `i16`  | `short`              | `integer(c_short)`        |
//! | `i32`  | `int`                | `integer(c_int)`          |
//! | `i64`  | `long long`          | `integer(c_long_long)`    |
//! | `f32`  | `float`              | `real(c_float)`           |
//! | `f64`  | `double`             | `real(c_double)`          |
//!
//! Unsigned integers keep their own C name but use the Fortran kind (and the
//! array element kind) of the signed type with the same width.

use crate::descriptor::ElementKind;

mod private {
    pub trait Sealed {}
}

/// Scalar type tag for the arithmetic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Scalar {
    /// The C spelling of this type.
    pub const fn c_name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::I8 => "signed char",
            Scalar::I16 => "short",
            Scalar::I32 => "int",
            Scalar::I64 => "long long",
            Scalar::U8 => "unsigned char",
            Scalar::U16 => "unsigned short",
            Scalar::U32 => "unsigned int",
            Scalar::U64 => "unsigned long long",
            Scalar::F32 => "float",
            Scalar::F64 => "double",
        }
    }

    /// The array element kind with the same representation.
    pub const fn element_kind(self) -> ElementKind {
        match self {
            Scalar::Bool => ElementKind::Bool,
            Scalar::I8 | Scalar::U8 => ElementKind::SignedChar,
            Scalar::I16 | Scalar::U16 => ElementKind::Short,
            Scalar::I32 | Scalar::U32 => ElementKind::Int,
            Scalar::I64 | Scalar::U64 => ElementKind::LongLong,
            Scalar::F32 => ElementKind::Float,
            Scalar::F64 => ElementKind::Double,
        }
    }

    /// The Fortran type declaration, e.g. `integer(c_int)`.
    pub const fn fortran_type(self) -> &'static str {
        self.element_kind().fortran_type()
    }
}

/// Arithmetic types: passed by value, unchanged, in both directions.
///
/// This trait is sealed; the set of arithmetic types is closed.
pub trait Arithmetic: Copy + private::Sealed + 'static {
    /// The scalar tag for this type.
    const SCALAR: Scalar;
}

macro_rules! impl_arithmetic {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl Arithmetic for $ty {
                const SCALAR: Scalar = Scalar::$scalar;
            }
        )*
    };
}

impl_arithmetic!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);
