//! Export registry and declaration emitters for forbind.
//!
//! Exported functions submit [`Export`] records at link time. A [`Registry`]
//! gathers them in one explicit pass, and the emitters in [`emit`] turn the
//! name-sorted registry into a C header and a Fortran module.
//!
//! # Example
//!
//! ```
//! use forbind_core::{signature_of, ArrayDescriptor};
//! use forbind_registry::{emit, EmitOptions, Entity, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .add(Entity::wrapped("scale", signature_of::<(&mut [[f64; 4]; 3], f64), ()>()))
//!     .unwrap();
//! registry
//!     .add(Entity::plain("raw", signature_of::<(ArrayDescriptor,), i32>()))
//!     .unwrap();
//!
//! let options = EmitOptions::default();
//! let header = emit::c_header(&registry, &options);
//! assert!(header.contains("int raw(gen_fortran_array_descriptor*);"));
//! assert!(header.contains("void scale(gen_fortran_array_descriptor*, double);"));
//!
//! let module = emit::fortran_module(&registry, "bindings", &options);
//! assert!(module.contains("real(c_double), dimension(:,:), target :: arg0"));
//! ```

pub mod emit;
mod error;
mod export;
mod options;
mod registry;

pub use error::RegistrationError;
pub use export::{Export, ExportKind};
pub use options::EmitOptions;
pub use registry::{Entity, Registry};

#[doc(hidden)]
pub use inventory;
