//! Artifact generation driver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use forbind_registry::{EmitOptions, Registry, RegistrationError, emit};
use thiserror::Error;

/// Errors raised while generating binding artifacts.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Renders the binding artifacts for one registry.
///
/// ```
/// use forbind::{EmitOptions, Entity, Generator, Registry, signature_of};
///
/// let mut registry = Registry::new();
/// registry.add(Entity::plain("norm", signature_of::<(&[f64; 3],), f64>())).unwrap();
///
/// let generator = Generator::new(registry, EmitOptions::default());
/// assert!(generator.c_header().contains("double norm(gen_fortran_array_descriptor*);"));
/// assert!(generator.fortran_module("vectors").contains("module vectors"));
/// ```
#[derive(Debug)]
pub struct Generator {
    registry: Registry,
    options: EmitOptions,
}

impl Generator {
    pub fn new(registry: Registry, options: EmitOptions) -> Self {
        Self { registry, options }
    }

    /// Run the registration pass over every export linked into the binary.
    pub fn collect(options: EmitOptions) -> Result<Self, GenerateError> {
        Ok(Self::new(Registry::collect()?, options))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn c_header(&self) -> String {
        emit::c_header(&self.registry, &self.options)
    }

    pub fn fortran_module(&self, module_name: &str) -> String {
        emit::fortran_module(&self.registry, module_name, &self.options)
    }

    /// The Fortran module declaring the descriptor record.
    pub fn descriptor_module(&self) -> String {
        emit::descriptor_module(&self.options)
    }

    pub fn write_c_header(&self, path: impl AsRef<Path>) -> Result<(), GenerateError> {
        write(path.as_ref(), &self.c_header())
    }

    pub fn write_fortran_module(
        &self,
        path: impl AsRef<Path>,
        module_name: &str,
    ) -> Result<(), GenerateError> {
        write(path.as_ref(), &self.fortran_module(module_name))
    }

    pub fn write_descriptor_module(&self, path: impl AsRef<Path>) -> Result<(), GenerateError> {
        write(path.as_ref(), &self.descriptor_module())
    }
}

fn write(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
