//! Emitter configuration.

/// Options shared by all emitters.
///
/// # Example
///
/// ```
/// use forbind_registry::EmitOptions;
///
/// let options = EmitOptions::default()
///     .with_line_width(100)
///     .with_include("my_types.h");
/// assert_eq!(options.line_width, 100);
/// assert_eq!(options.descriptor_module, "gen_array_descriptor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Maximum Fortran line length before `&` continuation.
    pub line_width: usize,
    /// First-line comment of every artifact, without comment markers.
    pub banner: String,
    /// Declare the handle, descriptor and error-query types inline in the C
    /// header instead of expecting them from an include.
    pub inline_prelude: bool,
    /// Extra `#include` targets for the C header.
    pub includes: Vec<String>,
    /// Name of the Fortran module that defines the descriptor type.
    pub descriptor_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            line_width: 132,
            banner: "This file is generated!".to_string(),
            inline_prelude: true,
            includes: Vec::new(),
            descriptor_module: "gen_array_descriptor".to_string(),
        }
    }
}

impl EmitOptions {
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn with_inline_prelude(mut self, inline_prelude: bool) -> Self {
        self.inline_prelude = inline_prelude;
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.includes.push(include.into());
        self
    }

    pub fn with_descriptor_module(mut self, name: impl Into<String>) -> Self {
        self.descriptor_module = name.into();
        self
    }
}
