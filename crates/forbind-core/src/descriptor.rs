//! The array descriptor record.
//!
//! An [`ArrayDescriptor`] is the fixed-layout structure through which Fortran
//! arrays cross the boundary. It does not own the buffer behind `data`.
//!
//! Dimensions are stored in Fortran (column-major) order: the first entry of
//! `dims` is the extent that varies fastest in memory. A descriptor for the
//! native array `[[i32; 3]; 2]` therefore has `dims = [3, 2, 0, ..]`.

use std::ffi::{c_int, c_void};
use std::ptr;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::BindError;

/// Maximum array rank, the Fortran 2003 limit.
pub const MAX_RANK: usize = 7;

/// Element kind tag stored in [`ArrayDescriptor::kind`].
///
/// The discriminants are part of the foreign interface and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum ElementKind {
    Bool = 0,
    Int = 1,
    Short = 2,
    Long = 3,
    LongLong = 4,
    Float = 5,
    Double = 6,
    LongDouble = 7,
    SignedChar = 8,
}

impl ElementKind {
    /// All kinds, in tag order.
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Bool,
        ElementKind::Int,
        ElementKind::Short,
        ElementKind::Long,
        ElementKind::LongLong,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::LongDouble,
        ElementKind::SignedChar,
    ];

    /// The raw tag.
    pub const fn tag(self) -> c_int {
        self as c_int
    }

    /// The Fortran type declaration for an element of this kind.
    pub const fn fortran_type(self) -> &'static str {
        match self {
            ElementKind::Bool => "logical(c_bool)",
            ElementKind::Int => "integer(c_int)",
            ElementKind::Short => "integer(c_short)",
            ElementKind::Long => "integer(c_long)",
            ElementKind::LongLong => "integer(c_long_long)",
            ElementKind::Float => "real(c_float)",
            ElementKind::Double => "real(c_double)",
            ElementKind::LongDouble => "real(c_long_double)",
            ElementKind::SignedChar => "integer(c_signed_char)",
        }
    }

    /// The name of the C enumerator, as declared in the header prelude.
    pub const fn c_enumerator(self) -> &'static str {
        match self {
            ElementKind::Bool => "gen_fk_Bool",
            ElementKind::Int => "gen_fk_Int",
            ElementKind::Short => "gen_fk_Short",
            ElementKind::Long => "gen_fk_Long",
            ElementKind::LongLong => "gen_fk_LongLong",
            ElementKind::Float => "gen_fk_Float",
            ElementKind::Double => "gen_fk_Double",
            ElementKind::LongDouble => "gen_fk_LongDouble",
            ElementKind::SignedChar => "gen_fk_SignedChar",
        }
    }
}

/// Static description of an array type: what a describable type reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayMeta {
    pub kind: ElementKind,
    pub rank: usize,
    pub is_acc_present: bool,
}

impl ArrayMeta {
    /// Create array metadata.
    ///
    /// Panics if `rank` is 0 or above [`MAX_RANK`]; in constant context the
    /// panic is a compile error.
    pub const fn new(kind: ElementKind, rank: usize, is_acc_present: bool) -> Self {
        assert!(rank >= 1 && rank <= MAX_RANK, "array rank must be in 1..=7");
        Self {
            kind,
            rank,
            is_acc_present,
        }
    }

    /// The Fortran assumed-shape attribute, e.g. `dimension(:,:)` for rank 2.
    pub fn fortran_dimension(&self) -> String {
        let colons = vec![":"; self.rank];
        format!("dimension({})", colons.join(","))
    }
}

/// The descriptor record shared with foreign code.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ArrayDescriptor {
    pub kind: c_int,
    pub rank: c_int,
    pub dims: [c_int; MAX_RANK],
    pub is_acc_present: bool,
    pub data: *mut c_void,
}

impl Default for ArrayDescriptor {
    fn default() -> Self {
        Self {
            kind: 0,
            rank: 0,
            dims: [0; MAX_RANK],
            is_acc_present: false,
            data: ptr::null_mut(),
        }
    }
}

impl ArrayDescriptor {
    /// Build a descriptor from metadata, Fortran-order dimensions and a data
    /// pointer.
    ///
    /// Entries of `dims` beyond `meta.rank` are ignored and stored as zero.
    pub fn from_meta(meta: ArrayMeta, dims: &[c_int], data: *mut c_void) -> Self {
        let mut descriptor = Self {
            kind: meta.kind.tag(),
            rank: meta.rank as c_int,
            is_acc_present: meta.is_acc_present,
            data,
            ..Self::default()
        };
        for (slot, extent) in descriptor.dims.iter_mut().zip(dims).take(meta.rank) {
            *slot = *extent;
        }
        descriptor
    }

    /// Decode the element kind tag.
    pub fn element_kind(&self) -> Result<ElementKind, BindError> {
        ElementKind::try_from(self.kind).map_err(|_| BindError::UnknownKind(self.kind))
    }

    /// The rank, checked against `0..=MAX_RANK`.
    pub fn rank(&self) -> Result<usize, BindError> {
        match usize::try_from(self.rank) {
            Ok(rank) if rank <= MAX_RANK => Ok(rank),
            _ => Err(BindError::InvalidRank(self.rank)),
        }
    }

    /// The used dimensions, in Fortran order.
    pub fn extents(&self) -> Result<&[c_int], BindError> {
        let rank = self.rank()?;
        Ok(&self.dims[..rank])
    }

    /// Total number of elements.
    ///
    /// Negative extents and products that overflow `usize` are errors.
    pub fn element_count(&self) -> Result<usize, BindError> {
        self.extents()?
            .iter()
            .enumerate()
            .try_fold(1usize, |count, (dimension, &extent)| {
                let extent = usize::try_from(extent)
                    .map_err(|_| BindError::InvalidExtent { dimension, extent })?;
                count.checked_mul(extent).ok_or(BindError::ElementCountOverflow)
            })
    }

    /// Check that the descriptor has the expected rank, for consumers that
    /// only accept one.
    pub fn require_rank(&self, expected: usize) -> Result<(), BindError> {
        if self.rank()? == expected {
            Ok(())
        } else {
            Err(BindError::UnsupportedRank {
                expected,
                found: self.rank,
            })
        }
    }
}
