//! The type mapping decision table.
//!
//! Every type that can appear in an exported signature belongs to exactly one
//! [`TypeCategory`]. [`map`] decides, from the category and the [`Position`]
//! (parameter or return type), which foreign representation the type gets:
//!
//! | Category              | Parameter         | Return            |
//! |-----------------------|-------------------|-------------------|
//! | `Void`                | -                 | unchanged         |
//! | `Arithmetic`          | unchanged         | unchanged         |
//! | `Array`               | array descriptor  | -                 |
//! | `ClassValue`          | handle            | handle            |
//! | `ClassReference`      | handle            | handle            |
//! | `ClassPointer`        | handle            | -                 |
//! | `ArithmeticReference` | pointer           | -                 |
//! | `ArithmeticPointer`   | unchanged         | -                 |
//!
//! `-` is a [`MappingError`]. The rows are checked in this order, so a type
//! that is array-describable is never treated as a class.
//!
//! The [`ForeignParam`](crate::ForeignParam) and
//! [`ForeignReturn`](crate::ForeignReturn) traits evaluate the table in an
//! associated constant through [`ForeignType::expect`], which turns a
//! disallowed combination into a compile-time error.

use std::fmt;

use crate::error::MappingError;
use crate::scalar::Scalar;

/// Where a type appears in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Param,
    Return,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Param => f.write_str("parameter"),
            Position::Return => f.write_str("return type"),
        }
    }
}

/// The closed set of type categories the mapping rules distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// `()`.
    Void,
    /// `bool`, integers and floats.
    Arithmetic,
    /// Array-describable or array-convertible types.
    Array,
    /// A class type by value.
    ClassValue,
    /// A shared, exclusive, or moved reference to a class type.
    ClassReference,
    /// A raw pointer to a class type.
    ClassPointer,
    /// A reference to an arithmetic type.
    ArithmeticReference,
    /// A raw pointer to an arithmetic type.
    ArithmeticPointer,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCategory::Void => "void",
            TypeCategory::Arithmetic => "arithmetic",
            TypeCategory::Array => "array",
            TypeCategory::ClassValue => "class value",
            TypeCategory::ClassReference => "class reference",
            TypeCategory::ClassPointer => "class pointer",
            TypeCategory::ArithmeticReference => "reference to arithmetic",
            TypeCategory::ArithmeticPointer => "pointer to arithmetic",
        };
        f.write_str(name)
    }
}

/// Outcome of the mapping rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mapped {
    /// The type crosses the boundary as-is.
    Unchanged,
    /// The type crosses as a pointer to an array descriptor.
    Descriptor,
    /// The type crosses as an opaque handle pointer.
    Handle,
    /// The type crosses as a pointer to its arithmetic referent.
    Pointer,
}

/// Apply the mapping rules to a category in a position.
pub const fn map(category: TypeCategory, position: Position) -> Result<Mapped, MappingError> {
    let mapped = match (category, position) {
        (TypeCategory::Void, Position::Return) => Mapped::Unchanged,
        (TypeCategory::Arithmetic, _) => Mapped::Unchanged,
        (TypeCategory::Array, Position::Param) => Mapped::Descriptor,
        (TypeCategory::ClassValue, _) => Mapped::Handle,
        (TypeCategory::ClassReference, _) => Mapped::Handle,
        (TypeCategory::ClassPointer, Position::Param) => Mapped::Handle,
        (TypeCategory::ArithmeticReference, Position::Param) => Mapped::Pointer,
        (TypeCategory::ArithmeticPointer, Position::Param) => Mapped::Unchanged,
        _ => return Err(MappingError { category, position }),
    };
    Ok(mapped)
}

/// A fully resolved foreign type, as the emitters see it.
///
/// Pointer mutability is intentionally absent: the compiled signature keeps
/// `*const`, the emitted declarations do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignType {
    Void,
    Scalar(Scalar),
    Pointer(Scalar),
    Handle,
    Descriptor,
}

impl ForeignType {
    /// Resolve a category to a foreign type.
    ///
    /// `scalar` is the arithmetic type involved for the `Arithmetic*`
    /// categories and ignored otherwise.
    pub const fn resolve(
        category: TypeCategory,
        position: Position,
        scalar: Option<Scalar>,
    ) -> Result<ForeignType, MappingError> {
        let mapped = match map(category, position) {
            Ok(mapped) => mapped,
            Err(err) => return Err(err),
        };
        let resolved = match mapped {
            Mapped::Descriptor => ForeignType::Descriptor,
            Mapped::Handle => ForeignType::Handle,
            Mapped::Unchanged | Mapped::Pointer => match (category, scalar) {
                (TypeCategory::Void, _) => ForeignType::Void,
                (TypeCategory::Arithmetic, Some(scalar)) => ForeignType::Scalar(scalar),
                (_, Some(scalar)) => ForeignType::Pointer(scalar),
                (_, None) => return Err(MappingError { category, position }),
            },
        };
        Ok(resolved)
    }

    /// Like [`resolve`](Self::resolve), but panics on failure.
    ///
    /// Used in associated constants, where the panic surfaces as a compile
    /// error naming the offending implementation.
    pub const fn expect(category: TypeCategory, position: Position, scalar: Option<Scalar>) -> Self {
        match Self::resolve(category, position, scalar) {
            Ok(foreign) => foreign,
            Err(_) => panic!("type category has no foreign representation in this position"),
        }
    }

    /// The C spelling of this type, with const-ness stripped.
    pub fn c_name(&self) -> String {
        match self {
            ForeignType::Void => "void".to_string(),
            ForeignType::Scalar(scalar) => scalar.c_name().to_string(),
            ForeignType::Pointer(scalar) => format!("{}*", scalar.c_name()),
            ForeignType::Handle => "gen_handle*".to_string(),
            ForeignType::Descriptor => "gen_fortran_array_descriptor*".to_string(),
        }
    }

    /// Check if this is the void type.
    pub fn is_void(&self) -> bool {
        matches!(self, ForeignType::Void)
    }

    /// Check if this is an array descriptor.
    pub fn is_descriptor(&self) -> bool {
        matches!(self, ForeignType::Descriptor)
    }
}
