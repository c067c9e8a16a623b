//! Forbind Proc Macros
//!
//! This crate provides the procedural macros that turn native Rust functions
//! and types into foreign-callable exports.
//!
//! # Macros
//!
//! - `#[derive(Opaque)]` - Pass a type across the boundary behind a handle
//! - `#[derive(ArrayView)]` - Accept a type as an array descriptor parameter
//! - `#[export]` - Export a function with a C-compatible signature
//! - `export_bindings! { ... }` - Export existing callables under declared signatures
//!
//! # Example
//!
//! ```ignore
//! use forbind::{Opaque, export};
//!
//! #[derive(Default, Opaque)]
//! pub struct Counter {
//!     value: i32,
//! }
//!
//! #[export(name = "counter_bump")]
//! fn bump(counter: &mut Counter, by: i32) -> i32 {
//!     counter.value += by;
//!     counter.value
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_array_view;
mod derive_opaque;
mod export;

/// Derive the `Opaque` trait for a type.
///
/// Besides `Opaque`, this generates the handle conversions: `&T` and
/// `&mut T` parameters borrow the value behind a handle, and returning `T`
/// moves it into a new handle.
///
/// # Attributes
///
/// - `#[forbind(name = "...")]` - Override the name used in error messages
/// - `#[forbind(clone)]` - Also accept `T` by value, cloning it out of the handle
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Default, Opaque)]
/// #[forbind(clone)]
/// pub struct Stack {
///     items: Vec<i32>,
/// }
/// ```
#[proc_macro_derive(Opaque, attributes(forbind))]
pub fn derive_opaque(input: TokenStream) -> TokenStream {
    derive_opaque::derive_opaque_impl(input)
}

/// Derive a descriptor parameter mapping for an array view type.
///
/// The type must implement `FromDescriptor` itself. Declaring the element
/// type and rank also makes it array-describable, so exports taking it can
/// be wrapped.
///
/// # Attributes
///
/// - `#[forbind(element = T)]` - Arithmetic element type
/// - `#[forbind(rank = N)]` - Number of dimensions, 1 to 7
/// - `#[forbind(acc_present)]` - The data lives on the accelerator
///
/// # Example
///
/// ```ignore
/// #[derive(ArrayView)]
/// #[forbind(element = f64, rank = 2)]
/// pub struct Matrix<'a> {
///     data: &'a mut [f64],
///     rows: usize,
///     cols: usize,
/// }
/// ```
#[proc_macro_derive(ArrayView, attributes(forbind))]
pub fn derive_array_view(input: TokenStream) -> TokenStream {
    derive_array_view::derive_array_view_impl(input)
}

/// Export a function under a C-compatible signature.
///
/// The function stays callable from Rust. An `extern "C"` shell is emitted
/// alongside it and registered for header and module generation.
///
/// # Attributes
///
/// - `name = "..."` - Exported symbol name (default: the function name)
/// - `wrapped` - Generate a Fortran adapter that builds array descriptors
/// - `generic = "..."` - Join a Fortran generic interface
///
/// # Example
///
/// ```ignore
/// #[forbind::export(wrapped, generic = "scale")]
/// fn scale_f64(values: &mut [[f64; 4]; 3], factor: f64) {
///     values.iter_mut().flatten().for_each(|v| *v *= factor);
/// }
/// ```
#[proc_macro_attribute]
pub fn export(attr: TokenStream, item: TokenStream) -> TokenStream {
    export::export_attr_impl(attr, item)
}

/// Export callables under explicitly declared signatures.
///
/// Each entry declares the native parameter and return types and the
/// callable to wrap. The callable must accept exactly the declared types;
/// a mismatch fails to compile.
///
/// # Example
///
/// ```ignore
/// forbind::export_bindings! {
///     fn stack_new() -> Stack = Stack::default;
///     fn stack_push(&mut Stack, i32) = |s: &mut Stack, v: i32| s.push(v);
///     #[export(wrapped)]
///     fn stack_fill(&mut Stack, &[i32; 4]) = fill;
/// }
/// ```
#[proc_macro]
pub fn export_bindings(input: TokenStream) -> TokenStream {
    export::export_bindings_impl(input)
}
