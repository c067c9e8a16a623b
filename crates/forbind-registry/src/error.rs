use thiserror::Error;

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// An entity with this name is already registered.
    #[error("duplicate registration: `{0}` is already registered")]
    Duplicate(String),

    /// The name is not a valid C and Fortran identifier.
    #[error("invalid export name `{0}`")]
    InvalidName(String),

    /// The generic interface name is not a valid Fortran identifier.
    #[error("invalid generic name `{0}`")]
    InvalidGeneric(String),

    /// A generic interface and an entity share a name.
    #[error("generic interface `{0}` clashes with an export of the same name")]
    GenericClash(String),
}
