//! Emitted descriptions of mapped signatures.

use crate::descriptor::ArrayMeta;
use crate::mapping::ForeignType;
use crate::param::{ForeignParam, ForeignReturn};

/// One parameter of a mapped signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamSig {
    pub foreign: ForeignType,
    /// Set when the native type is array-describable; drives the Fortran
    /// adapter for wrapped exports.
    pub array: Option<ArrayMeta>,
}

impl ParamSig {
    /// The description of a parameter of native type `T`.
    pub const fn of<T: ForeignParam>() -> Self {
        Self {
            foreign: T::FOREIGN,
            array: T::ARRAY,
        }
    }

    /// A parameter with no array metadata.
    pub const fn plain(foreign: ForeignType) -> Self {
        Self {
            foreign,
            array: None,
        }
    }

    /// Check if the Fortran adapter builds this parameter's descriptor.
    pub fn is_wrappable(&self) -> bool {
        self.foreign.is_descriptor() && self.array.is_some()
    }
}

/// A mapped signature: parameter list plus result type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<ParamSig>,
    pub result: ForeignType,
}

impl Signature {
    pub fn new(params: Vec<ParamSig>, result: ForeignType) -> Self {
        Self { params, result }
    }

    /// Description of `R` as a return type.
    pub fn result_of<R: ForeignReturn>() -> ForeignType {
        R::FOREIGN
    }

    /// Void result: a Fortran `subroutine`.
    pub fn is_subroutine(&self) -> bool {
        self.result.is_void()
    }

    /// Check if any parameter is an array descriptor.
    pub fn has_descriptor(&self) -> bool {
        self.params.iter().any(|param| param.foreign.is_descriptor())
    }

    /// Check if any parameter gets a generated descriptor in the adapter.
    pub fn has_wrappable(&self) -> bool {
        self.params.iter().any(ParamSig::is_wrappable)
    }
}
