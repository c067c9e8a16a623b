//! Implementation of the `#[derive(ArrayView)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input, parse_quote};

use crate::attrs::ArrayViewAttrs;

/// Highest rank a descriptor can carry.
const MAX_RANK: usize = 7;

pub fn derive_array_view_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_array_view_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_array_view_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = ArrayViewAttrs::from_attrs(&input.attrs)?;

    let mut generics = input.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote! { Self: ::forbind::FromDescriptor });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let describable = match (&attrs.element, &attrs.rank) {
        (Some(element), Some(rank)) => {
            let value: usize = rank.base10_parse()?;
            if !(1..=MAX_RANK).contains(&value) {
                return Err(syn::Error::new_spanned(
                    rank,
                    format!("array rank must be between 1 and {MAX_RANK}, got {value}"),
                ));
            }
            let acc_present = attrs.acc_present;
            let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
            Some(quote! {
                impl #impl_generics ::forbind::ArrayDescribable for #name #ty_generics #where_clause {
                    const META: ::forbind::ArrayMeta = ::forbind::ArrayMeta::new(
                        <#element as ::forbind::Arithmetic>::SCALAR.element_kind(),
                        #value,
                        #acc_present,
                    );
                }
            })
        }
        (None, None) if attrs.acc_present => {
            return Err(syn::Error::new_spanned(
                name,
                "`acc_present` requires `element` and `rank`",
            ));
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(syn::Error::new_spanned(name, "`element` requires `rank`"));
        }
        (None, Some(rank)) => {
            return Err(syn::Error::new_spanned(rank, "`rank` requires `element`"));
        }
    };

    let array_meta = if describable.is_some() {
        quote! { ::core::option::Option::Some(<Self as ::forbind::ArrayDescribable>::META) }
    } else {
        quote! { ::core::option::Option::None }
    };

    Ok(quote! {
        #describable

        impl #impl_generics ::forbind::ForeignParam for #name #ty_generics #where_clause {
            type Foreign = *mut ::forbind::ArrayDescriptor;
            const CATEGORY: ::forbind::TypeCategory = ::forbind::TypeCategory::Array;
            const ARRAY: ::core::option::Option<::forbind::ArrayMeta> = #array_meta;

            unsafe fn from_foreign(
                foreign: *mut ::forbind::ArrayDescriptor,
            ) -> ::core::result::Result<Self, ::forbind::BindError> {
                unsafe { ::forbind::descriptor_param::<Self>(foreign) }
            }
        }
    })
}
