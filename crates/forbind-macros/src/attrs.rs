//! Attribute parsing utilities for forbind macros.

use syn::{
    Attribute, LitInt, LitStr, Type,
    meta::ParseNestedMeta,
    parse::{Parse, ParseStream},
};

/// Parsed `#[export(...)]` arguments.
#[derive(Default)]
pub struct ExportAttrs {
    /// Exported symbol name (default: the function name)
    pub name: Option<LitStr>,
    /// Emit a Fortran adapter that builds descriptors
    pub wrapped: bool,
    /// Fortran generic interface to join
    pub generic: Option<LitStr>,
}

impl ExportAttrs {
    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("wrapped") {
            self.wrapped = true;
        } else if meta.path.is_ident("generic") {
            self.generic = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error(format!(
                "unknown export attribute: {}",
                meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
            )));
        }
        Ok(())
    }

    /// Collect `#[export(...)]` attributes, returning the remaining ones.
    pub fn from_attrs(attrs: Vec<Attribute>) -> syn::Result<(Self, Vec<Attribute>)> {
        let mut result = Self::default();
        let mut rest = Vec::new();

        for attr in attrs {
            if attr.path().is_ident("export") {
                attr.parse_nested_meta(|meta| result.parse_meta(meta))?;
            } else {
                rest.push(attr);
            }
        }

        Ok((result, rest))
    }
}

impl Parse for ExportAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut result = Self::default();
        let parser = syn::meta::parser(|meta| result.parse_meta(meta));
        syn::parse::Parser::parse2(parser, input.parse()?)?;
        Ok(result)
    }
}

/// Parsed `#[forbind(...)]` attributes on an opaque type.
#[derive(Debug, Default)]
pub struct OpaqueAttrs {
    /// Name used in error messages (default: the type name)
    pub name: Option<String>,
    /// Also accept the type by value, cloning out of the handle
    pub clone: bool,
}

impl OpaqueAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("forbind") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("clone") {
                    result.clone = true;
                } else {
                    return Err(meta.error(format!(
                        "unknown forbind attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

/// Parsed `#[forbind(...)]` attributes on an array view type.
#[derive(Default)]
pub struct ArrayViewAttrs {
    /// Element type; with `rank`, makes the type describable
    pub element: Option<Type>,
    pub rank: Option<LitInt>,
    /// Data is present on the accelerator
    pub acc_present: bool,
}

impl ArrayViewAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("forbind") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("element") {
                    result.element = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("rank") {
                    result.rank = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("acc_present") {
                    result.acc_present = true;
                } else {
                    return Err(meta.error(format!(
                        "unknown forbind attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
