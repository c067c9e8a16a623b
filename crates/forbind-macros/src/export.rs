//! Implementation of `#[export]` and `export_bindings!`.
//!
//! Both forms lower to the same three items: an `extern "C"` shell whose
//! parameters are the foreign types of the declared native types, a
//! signature function, and an inventory submission that hands both to the
//! registry.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Expr, FnArg, GenericParam, Ident, ItemFn, ReturnType, Token, Type, Visibility,
    parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    visit_mut::{self, VisitMut},
};

use crate::attrs::ExportAttrs;

pub fn export_attr_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = parse_macro_input!(attr as ExportAttrs);
    let input = parse_macro_input!(item as ItemFn);

    match export_attr_inner(attrs, &input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

pub fn export_bindings_impl(input: TokenStream) -> TokenStream {
    let bindings = parse_macro_input!(input as Bindings);

    let mut tokens = TokenStream2::new();
    for binding in bindings.0 {
        match binding.expand() {
            Ok(expanded) => tokens.extend(expanded),
            Err(err) => tokens.extend(err.to_compile_error()),
        }
    }
    tokens.into()
}

// ============================================================================
// Shared lowering
// ============================================================================

/// Replaces every lifetime, named or elided, with `'static`.
struct EraseLifetimes;

impl VisitMut for EraseLifetimes {
    fn visit_lifetime_mut(&mut self, lifetime: &mut syn::Lifetime) {
        *lifetime = syn::Lifetime::new("'static", lifetime.span());
    }

    fn visit_type_reference_mut(&mut self, reference: &mut syn::TypeReference) {
        if reference.lifetime.is_none() {
            reference.lifetime = Some(syn::Lifetime::new("'static", reference.and_token.span));
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }
}

fn erase_lifetimes(mut ty: Type) -> Type {
    EraseLifetimes.visit_type_mut(&mut ty);
    ty
}

fn return_type(output: &ReturnType) -> Type {
    match output {
        ReturnType::Default => syn::parse_quote! { () },
        ReturnType::Type(_, ty) => erase_lifetimes((**ty).clone()),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve the symbol name and check it and the generic interface name.
fn resolve_names(attrs: &ExportAttrs, ident: &Ident) -> syn::Result<String> {
    let name = match &attrs.name {
        Some(lit) => {
            let name = lit.value();
            if !is_identifier(&name) {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("export name `{name}` is not a valid C identifier"),
                ));
            }
            name
        }
        None => ident.to_string(),
    };

    if let Some(lit) = &attrs.generic {
        let generic = lit.value();
        if !is_identifier(&generic) {
            return Err(syn::Error::new(
                lit.span(),
                format!("generic name `{generic}` is not a valid Fortran identifier"),
            ));
        }
        if generic == name {
            return Err(syn::Error::new(
                lit.span(),
                format!("generic name `{generic}` clashes with the export name"),
            ));
        }
    }

    Ok(name)
}

/// One export, ready to lower.
struct Lowering<'a> {
    /// Rust identifier of the generated shell
    shell: Ident,
    /// Rust identifier the signature function is derived from
    ident: &'a Ident,
    name: String,
    params: Vec<Type>,
    ret: Type,
    attrs: &'a ExportAttrs,
    vis: &'a Visibility,
    docs: &'a [Attribute],
}

impl Lowering<'_> {
    fn expand(&self, callable: TokenStream2) -> TokenStream2 {
        let Self {
            shell,
            ident,
            name,
            params,
            ret,
            attrs,
            vis,
            docs,
        } = self;

        let signature_fn = format_ident!("__forbind_signature_{}", ident);
        let args: Vec<Ident> = (0..params.len()).map(|i| format_ident!("arg{}", i)).collect();
        let checked = params.len() + 1;

        let wrapped = attrs.wrapped.then(|| quote! { .wrapped() });
        let generic = attrs.generic.as_ref().map(|generic| quote! { .generic(#generic) });

        quote! {
            // Mapping violations fail here rather than at the first call.
            const _: [::forbind::ForeignType; #checked] = [
                #(<#params as ::forbind::ForeignParam>::FOREIGN,)*
                <#ret as ::forbind::ForeignReturn>::FOREIGN,
            ];

            #(#docs)*
            #[unsafe(export_name = #name)]
            #vis unsafe extern "C" fn #shell(
                #(#args: <#params as ::forbind::ForeignParam>::Foreign),*
            ) -> <#ret as ::forbind::ForeignReturn>::Foreign {
                let native: fn(#(#params),*) -> #ret = #callable;
                let result = unsafe {
                    ::forbind::wrap_as::<(#(#params,)*), #ret, _>(native).call((#(#args,)*))
                };
                ::forbind::boundary::complete::<#ret>(#name, result)
            }

            #[doc(hidden)]
            fn #signature_fn() -> ::forbind::Signature {
                ::forbind::signature_of::<(#(#params,)*), #ret>()
            }

            ::forbind::inventory::submit! {
                ::forbind::Export::new(#name, #signature_fn) #wrapped #generic
            }
        }
    }
}

// ============================================================================
// #[export]
// ============================================================================

fn export_attr_inner(attrs: ExportAttrs, input: &ItemFn) -> syn::Result<TokenStream2> {
    let sig = &input.sig;
    let fn_name = &sig.ident;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "exported functions cannot be async"));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            "exported functions must be safe; the generated shell is the unsafe entry point",
        ));
    }
    if let Some(abi) = &sig.abi {
        return Err(syn::Error::new_spanned(abi, "exported functions must use the Rust ABI"));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new_spanned(variadic, "exported functions cannot be variadic"));
    }
    for param in &sig.generics.params {
        if !matches!(param, GenericParam::Lifetime(_)) {
            return Err(syn::Error::new_spanned(
                param,
                "exported functions cannot be generic; export each instantiation separately",
            ));
        }
    }

    let mut params = Vec::new();
    for arg in &sig.inputs {
        match arg {
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "exported functions cannot take `self`",
                ));
            }
            FnArg::Typed(pat_type) => params.push(erase_lifetimes((*pat_type.ty).clone())),
        }
    }

    let name = resolve_names(&attrs, fn_name)?;

    let hidden: Vec<Attribute> = vec![syn::parse_quote! { #[doc(hidden)] }];
    let vis = Visibility::Inherited;
    let lowering = Lowering {
        shell: format_ident!("__forbind_export_{}", fn_name),
        ident: fn_name,
        name,
        params,
        ret: return_type(&sig.output),
        attrs: &attrs,
        vis: &vis,
        docs: &hidden,
    };
    let generated = lowering.expand(quote! { #fn_name });

    Ok(quote! {
        #input
        #generated
    })
}

// ============================================================================
// export_bindings!
// ============================================================================

/// `#[export(...)] pub fn name(T0, T1) -> R = callable;`
struct Binding {
    attrs: ExportAttrs,
    docs: Vec<Attribute>,
    vis: Visibility,
    ident: Ident,
    params: Vec<Type>,
    output: ReturnType,
    callable: Expr,
}

impl Parse for Binding {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let outer = input.call(Attribute::parse_outer)?;
        let (attrs, docs) = ExportAttrs::from_attrs(outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![fn]>()?;
        let ident: Ident = input.parse()?;

        let content;
        parenthesized!(content in input);
        let params = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;

        let output: ReturnType = input.parse()?;
        input.parse::<Token![=]>()?;
        let callable: Expr = input.parse()?;
        input.parse::<Token![;]>()?;

        Ok(Self {
            attrs,
            docs,
            vis,
            ident,
            params: params.into_iter().map(erase_lifetimes).collect(),
            output,
            callable,
        })
    }
}

impl Binding {
    fn expand(&self) -> syn::Result<TokenStream2> {
        let name = resolve_names(&self.attrs, &self.ident)?;

        let lowering = Lowering {
            shell: self.ident.clone(),
            ident: &self.ident,
            name,
            params: self.params.clone(),
            ret: return_type(&self.output),
            attrs: &self.attrs,
            vis: &self.vis,
            docs: &self.docs,
        };
        let callable = &self.callable;
        Ok(lowering.expand(quote! { #callable }))
    }
}

struct Bindings(Vec<Binding>);

impl Parse for Bindings {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut bindings = Vec::new();
        while !input.is_empty() {
            bindings.push(input.parse()?);
        }
        Ok(Self(bindings))
    }
}
