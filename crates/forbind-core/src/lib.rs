//! Core machinery for forbind.
//!
//! This crate contains everything the generated `extern "C"` functions need at
//! their call boundary, and the compile-time rules that decide what those
//! functions look like:
//!
//! - [`mapping`]: the decision table mapping a type category to its
//!   foreign-safe representation
//! - [`ForeignParam`] / [`ForeignReturn`]: per-type implementations of the
//!   mapping, with the conversion between native and foreign values
//! - [`handle`]: opaque handles owning natively allocated values
//! - [`ArrayDescriptor`], [`ArrayDescribable`], [`FromDescriptor`]: the array
//!   descriptor record and the capability traits around it
//! - [`wrap`]: turns a native callable into a callable with a foreign-safe
//!   signature
//! - [`boundary`]: error reporting for exported functions
//!
//! # Example
//!
//! ```
//! use forbind_core::{wrap, ForeignType, Scalar};
//!
//! fn add(a: i32, b: &mut i32) {
//!     *b += a;
//! }
//!
//! let wrapped = wrap(add);
//! let mut out = 1;
//! unsafe { wrapped.call((41, &mut out as *mut i32)) }.unwrap();
//! assert_eq!(out, 42);
//!
//! let signature = wrapped.signature();
//! assert_eq!(signature.params[1].foreign, ForeignType::Pointer(Scalar::I32));
//! assert!(signature.is_subroutine());
//! ```

pub mod array;
pub mod boundary;
pub mod descriptor;
pub mod error;
pub mod handle;
pub mod mapping;
pub mod param;
pub mod scalar;
pub mod signature;
pub mod wrap;

pub use array::{ArrayDescribable, FromDescriptor, NativeArray, native_meta};
pub use boundary::{clear_last_error, last_error};
pub use descriptor::{ArrayDescriptor, ArrayMeta, ElementKind, MAX_RANK};
pub use error::{BindError, MappingError};
pub use handle::{Handle, Opaque, Taken, into_handle};
pub use mapping::{ForeignType, Mapped, Position, TypeCategory};
pub use param::{ForeignParam, ForeignReturn, descriptor_param};
pub use scalar::{Arithmetic, Scalar};
pub use signature::{ParamSig, Signature};
pub use wrap::{ForeignArgs, NativeFn, Wrapped, signature_of, wrap, wrap_as};
