//! Implementation of the `#[derive(Opaque)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use crate::attrs::OpaqueAttrs;

pub fn derive_opaque_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_opaque_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_opaque_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = OpaqueAttrs::from_attrs(&input.attrs)?;

    // Handles erase the type; one handle layout per type.
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Opaque types cannot be generic; wrap each instantiation in its own type",
        ));
    }

    let type_name = attrs.name.clone().unwrap_or_else(|| name.to_string());

    let by_value = attrs.clone.then(|| {
        quote! {
            impl ::forbind::ForeignParam for #name {
                type Foreign = *mut ::forbind::Handle;
                const CATEGORY: ::forbind::TypeCategory = ::forbind::TypeCategory::ClassValue;

                unsafe fn from_foreign(
                    foreign: *mut ::forbind::Handle,
                ) -> ::core::result::Result<Self, ::forbind::BindError> {
                    unsafe { ::forbind::handle::deref::<#name>(foreign) }
                        .map(::core::clone::Clone::clone)
                }
            }
        }
    });

    Ok(quote! {
        impl ::forbind::Opaque for #name {
            const NAME: &'static str = #type_name;
        }

        impl<'a> ::forbind::ForeignParam for &'a #name {
            type Foreign = *mut ::forbind::Handle;
            const CATEGORY: ::forbind::TypeCategory = ::forbind::TypeCategory::ClassReference;

            unsafe fn from_foreign(
                foreign: *mut ::forbind::Handle,
            ) -> ::core::result::Result<Self, ::forbind::BindError> {
                unsafe { ::forbind::handle::deref::<#name>(foreign) }
            }
        }

        impl<'a> ::forbind::ForeignParam for &'a mut #name {
            type Foreign = *mut ::forbind::Handle;
            const CATEGORY: ::forbind::TypeCategory = ::forbind::TypeCategory::ClassReference;

            unsafe fn from_foreign(
                foreign: *mut ::forbind::Handle,
            ) -> ::core::result::Result<Self, ::forbind::BindError> {
                unsafe { ::forbind::handle::deref_mut::<#name>(foreign) }
            }
        }

        impl ::forbind::ForeignReturn for #name {
            type Foreign = *mut ::forbind::Handle;
            const CATEGORY: ::forbind::TypeCategory = ::forbind::TypeCategory::ClassValue;

            fn into_foreign(self) -> *mut ::forbind::Handle {
                ::forbind::into_handle(self)
            }

            fn error_value() -> *mut ::forbind::Handle {
                ::core::ptr::null_mut()
            }
        }

        #by_value
    })
}
