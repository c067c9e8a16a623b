//! Forbind
//!
//! Export native Rust functions to C and Fortran. Each exported function gets
//! an `extern "C"` shell whose parameters and return type are foreign-safe:
//! arithmetic values pass unchanged, references to arithmetic become
//! pointers, arrays travel as descriptors, and class types sit behind opaque
//! handles. A [`Generator`] then writes a C header and a Fortran module
//! declaring every export.
//!
//! # Example
//!
//! ```
//! use forbind::{EmitOptions, Generator, Opaque, export};
//!
//! #[derive(Default, Opaque)]
//! pub struct Counter {
//!     value: i32,
//! }
//!
//! #[export]
//! fn counter_new() -> Counter {
//!     Counter::default()
//! }
//!
//! #[export]
//! fn counter_add(counter: &mut Counter, by: i32) -> i32 {
//!     counter.value += by;
//!     counter.value
//! }
//!
//! # fn main() -> Result<(), forbind::GenerateError> {
//! let generator = Generator::collect(EmitOptions::default())?;
//! let header = generator.c_header();
//! assert!(header.contains("gen_handle* counter_new(void);"));
//! assert!(header.contains("int counter_add(gen_handle*, int);"));
//! assert!(header.contains("void gen_release(gen_handle*);"));
//! # Ok(())
//! # }
//! ```
//!
//! # Rejected signatures
//!
//! Types without a foreign mapping in their position fail to compile.
//! References to arithmetic are parameters only:
//!
//! ```compile_fail,E0277
//! #[forbind::export]
//! fn slot(values: &mut [i32; 4]) -> &mut i32 {
//!     &mut values[0]
//! }
//! # fn main() {}
//! ```
//!
//! So are raw pointers:
//!
//! ```compile_fail,E0277
//! #[forbind::export]
//! fn raw(value: *mut i32) -> *mut i32 {
//!     value
//! }
//! # fn main() {}
//! ```
//!
//! Arrays cannot be returned:
//!
//! ```compile_fail,E0277
//! #[forbind::export]
//! fn zeros() -> [f64; 3] {
//!     [0.0; 3]
//! }
//! # fn main() {}
//! ```
//!
//! Types with no mapping at all are rejected as parameters too:
//!
//! ```compile_fail,E0277
//! #[forbind::export]
//! fn greet(name: String) -> i32 {
//!     name.len() as i32
//! }
//! # fn main() {}
//! ```
//!
//! A callable must match its declared signature exactly:
//!
//! ```compile_fail,E0308
//! forbind::export_bindings! {
//!     fn add(i32) -> i32 = |a: i32, b: i32| a + b;
//! }
//! # fn main() {}
//! ```
//!
//! ```compile_fail,E0308
//! fn halve(value: f64) -> f64 {
//!     value / 2.0
//! }
//!
//! forbind::export_bindings! {
//!     fn halve_int(i32) -> i32 = halve;
//! }
//! # fn main() {}
//! ```

extern crate self as forbind;

mod generator;

pub use generator::{GenerateError, Generator};

pub use forbind_core::{
    ArrayDescribable, ArrayDescriptor, ArrayMeta, Arithmetic, BindError, ElementKind,
    ForeignArgs, ForeignParam, ForeignReturn, ForeignType, FromDescriptor, Handle, MAX_RANK,
    Mapped, MappingError, NativeArray, NativeFn, Opaque, ParamSig, Position, Scalar, Signature,
    Taken, TypeCategory, Wrapped, clear_last_error, descriptor_param, into_handle, last_error,
    native_meta, signature_of, wrap, wrap_as,
};
pub use forbind_core::{boundary, handle};

pub use forbind_registry::{
    EmitOptions, Entity, Export, ExportKind, Registry, RegistrationError, emit,
};

pub use forbind_macros::{ArrayView, Opaque, export, export_bindings};

#[doc(hidden)]
pub use inventory;
