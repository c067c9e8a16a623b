//! Error types for the foreign call boundary.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BindError     - recoverable failures while converting foreign arguments
//! MappingError  - a type category that cannot appear in a given position
//! ```
//!
//! Mapping errors are normally observed at compile time (the decision table is
//! evaluated in constants); the enum exists so the table itself stays a plain
//! `Result`-returning function that tests and tools can query.

use thiserror::Error;

use crate::mapping::{Position, TypeCategory};

// ============================================================================
// Call Boundary Errors
// ============================================================================

/// Errors raised while converting foreign arguments into native values.
///
/// Every variant is detected before any data behind a foreign pointer is
/// accessed, so a failed conversion leaves the caller's buffers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A handle was null where a live value was required.
    #[error("null handle passed for `{type_name}`")]
    NullHandle { type_name: &'static str },

    /// A pointer to an arithmetic value was null where a reference was required.
    #[error("null pointer passed for `{type_name}`")]
    NullPointer { type_name: &'static str },

    /// The descriptor pointer itself was null.
    #[error("null array descriptor")]
    NullDescriptor,

    /// The descriptor's data pointer was null.
    #[error("array descriptor has no data")]
    NullData,

    /// The descriptor's element kind differs from the native element type.
    #[error("element kinds do not match: descriptor kind ({found}) != native kind ({expected})")]
    KindMismatch { expected: i32, found: i32 },

    /// The descriptor's rank differs from the native rank.
    #[error("ranks do not match: descriptor rank ({found}) != native rank ({expected})")]
    RankMismatch { expected: usize, found: i32 },

    /// An extent differs after un-transposing the descriptor dimensions.
    #[error(
        "extents do not match in dimension {dimension}: descriptor extent ({found}) != native extent ({expected})"
    )]
    ExtentMismatch {
        dimension: usize,
        expected: i32,
        found: i32,
    },

    /// A consumer only accepts one rank and got another.
    #[error("only {expected}-dimensional arrays are supported, got rank {found}")]
    UnsupportedRank { expected: usize, found: i32 },

    /// The descriptor rank is outside `0..=MAX_RANK`.
    ///
    /// [`MAX_RANK`](crate::MAX_RANK) is 7, the Fortran 2003 rank limit.
    #[error("descriptor rank {0} is outside 0..=7")]
    InvalidRank(i32),

    /// A used dimension has a negative extent.
    #[error("extent {extent} of dimension {dimension} is negative")]
    InvalidExtent { dimension: usize, extent: i32 },

    /// The product of the extents does not fit in `usize`.
    #[error("element count of the descriptor overflows")]
    ElementCountOverflow,

    /// The descriptor carries an element kind tag with no known meaning.
    #[error("unknown element kind tag {0}")]
    UnknownKind(i32),

    /// Raised by user conversions that need their own message.
    #[error("{0}")]
    Custom(String),
}

impl BindError {
    /// Create a custom error with the given message.
    pub fn custom(message: impl Into<String>) -> Self {
        BindError::Custom(message.into())
    }
}

// ============================================================================
// Mapping Errors
// ============================================================================

/// A type category has no foreign representation in the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{category} cannot be used as a {position}")]
pub struct MappingError {
    pub category: TypeCategory,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_messages_name_the_mismatch() {
        let kind = BindError::KindMismatch { expected: 1, found: 6 };
        assert!(kind.to_string().starts_with("element kinds do not match"));

        let rank = BindError::RankMismatch { expected: 3, found: 2 };
        assert!(rank.to_string().starts_with("ranks do not match"));

        let extent = BindError::ExtentMismatch {
            dimension: 1,
            expected: 3,
            found: 4,
        };
        assert!(extent.to_string().starts_with("extents do not match"));
    }

    #[test]
    fn shape_error_messages() {
        let negative = BindError::InvalidExtent { dimension: 0, extent: -1 };
        assert_eq!(negative.to_string(), "extent -1 of dimension 0 is negative");
        assert_eq!(
            BindError::ElementCountOverflow.to_string(),
            "element count of the descriptor overflows"
        );
    }

    #[test]
    fn invalid_rank_mentions_limit() {
        assert_eq!(
            BindError::InvalidRank(9).to_string(),
            "descriptor rank 9 is outside 0..=7"
        );
    }

    #[test]
    fn mapping_error_display() {
        let err = MappingError {
            category: TypeCategory::ArithmeticPointer,
            position: Position::Return,
        };
        assert_eq!(
            err.to_string(),
            "pointer to arithmetic cannot be used as a return type"
        );
    }
}
