//! Link-time export records.
//!
//! Every exported function submits one [`Export`] through `inventory`. The
//! records are inert until [`Registry::collect`](crate::Registry::collect)
//! walks them.

use forbind_core::{ForeignType, ParamSig, Signature};

/// How an export appears in the Fortran module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Interface block only.
    Plain,
    /// Interface block bound as `<name>_impl`, plus an adapter named
    /// `<name>` that builds descriptors from Fortran arrays.
    Wrapped,
}

/// A registration record submitted by an exported function.
#[derive(Debug, Clone, Copy)]
pub struct Export {
    pub name: &'static str,
    pub kind: ExportKind,
    pub generic: Option<&'static str>,
    /// Builds the mapped signature. Deferred so records stay constant.
    pub signature: fn() -> Signature,
}

impl Export {
    pub const fn new(name: &'static str, signature: fn() -> Signature) -> Self {
        Self {
            name,
            kind: ExportKind::Plain,
            generic: None,
            signature,
        }
    }

    /// Mark the export as wrapped.
    pub const fn wrapped(mut self) -> Self {
        self.kind = ExportKind::Wrapped;
        self
    }

    /// Add the export to a Fortran generic interface.
    pub const fn generic(mut self, generic: &'static str) -> Self {
        self.generic = Some(generic);
        self
    }
}

inventory::collect!(Export);

fn release_signature() -> Signature {
    Signature::new(vec![ParamSig::plain(ForeignType::Handle)], ForeignType::Void)
}

inventory::submit! {
    Export::new("gen_release", release_signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let export = Export::new("scale", release_signature).wrapped().generic("scale_any");
        assert_eq!(export.kind, ExportKind::Wrapped);
        assert_eq!(export.generic, Some("scale_any"));
    }

    #[test]
    fn release_is_submitted() {
        let release = inventory::iter::<Export>
            .into_iter()
            .find(|export| export.name == "gen_release")
            .expect("gen_release is registered");
        assert_eq!((release.signature)(), release_signature());
    }
}
