//! Tagged values and their handles.
//!
//! A value lives in the [`Heap`](crate::Heap) and is referred to by a
//! [`ValueId`]. The payload is a [`ValueData`]; its [`Kind`] is the tag
//! scripts see through the `type` word.

mod convert;
mod external;

pub use convert::{format_int, format_real, parse_int, parse_real};
pub use external::{HostFile, IntCell, Register, StringCell};

use std::sync::Arc;

use parking_lot::Mutex;

/// Value kind, in tag order.
///
/// The discriminants are the tags used when two values of different kinds
/// are compared, so the order is part of observable behavior.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Scalar = 0,
    Code = 1,
    Native = 2,
    ExtInt = 3,
    ExtReal = 4,
    ExtString = 5,
    Null = 6,
    File = 7,
    Array = 8,
}

impl Kind {
    /// Name reported by the `type` word.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Scalar => "SCALAR",
            Kind::Code => "CODE",
            Kind::Native => "BIN_CODE",
            Kind::ExtInt => "EXT_INT",
            Kind::ExtReal => "EXT_REAL",
            Kind::ExtString => "EXT_STRING",
            Kind::Null => "NULL",
            Kind::File => "FILE",
            Kind::Array => "ARRAY",
        }
    }

    /// Comparison tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Host-bound kinds read and write through to host memory.
    pub const fn is_external(self) -> bool {
        matches!(self, Kind::ExtInt | Kind::ExtReal | Kind::ExtString)
    }
}

/// Handle to a value in a [`Heap`](crate::Heap).
///
/// Handles are generational: once the collector reclaims a value, every
/// outstanding handle to it reads as Null instead of aliasing whatever
/// reuses the slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId {
    index: u32,
    generation: u32,
}

impl ValueId {
    /// The unique Null value. Immortal.
    pub const NULL: ValueId = ValueId {
        index: 0,
        generation: 0,
    };

    /// The canonical true value, a Scalar `"1"`. Immortal.
    pub const TRUE: ValueId = ValueId {
        index: 1,
        generation: 0,
    };

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        ValueId { index, generation }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }

    /// Null and true are shared by everything and never counted.
    #[inline]
    pub const fn is_immortal(self) -> bool {
        self.index < 2
    }
}

/// Index into the interpreter's native function registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeId(u32);

impl NativeId {
    pub const fn new(raw: u32) -> Self {
        NativeId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Value payload.
///
/// Scalars and code own a copy of their bytes. External variants share the
/// host cell they were bound to; they are never copied.
#[derive(Debug)]
pub enum ValueData {
    Scalar(Box<[u8]>),
    Code(Box<[u8]>),
    Native(NativeId),
    ExtInt(IntCell),
    ExtReal(Arc<Mutex<f64>>),
    ExtString(StringCell),
    Null,
    File(HostFile),
    Array(Vec<ValueId>),
}

impl ValueData {
    pub fn kind(&self) -> Kind {
        match self {
            ValueData::Scalar(_) => Kind::Scalar,
            ValueData::Code(_) => Kind::Code,
            ValueData::Native(_) => Kind::Native,
            ValueData::ExtInt(_) => Kind::ExtInt,
            ValueData::ExtReal(_) => Kind::ExtReal,
            ValueData::ExtString(_) => Kind::ExtString,
            ValueData::Null => Kind::Null,
            ValueData::File(_) => Kind::File,
            ValueData::Array(_) => Kind::Array,
        }
    }

    /// Textual form used wherever a word reads a value as a string.
    ///
    /// Scalars and code yield their bytes; every other kind yields a
    /// bracketed marker such as `[ARRAY]`.
    pub fn text(&self) -> &[u8] {
        match self {
            ValueData::Scalar(bytes) | ValueData::Code(bytes) => bytes,
            ValueData::Native(_) => b"[BIN_CODE]",
            ValueData::ExtInt(_) => b"[EXT_INT]",
            ValueData::ExtReal(_) => b"[EXT_REAL]",
            ValueData::ExtString(_) => b"[EXT_STRING]",
            ValueData::Null => b"[NULL]",
            ValueData::File(_) => b"[FILE]",
            ValueData::Array(_) => b"[ARRAY]",
        }
    }

    /// Identity of an opaque payload, for comparing two values of the
    /// same non-scalar kind.
    ///
    /// Shared host cells compare by cell address, so two values read from
    /// the same binding are the same handle.
    pub(crate) fn identity(&self, id: ValueId) -> usize {
        match self {
            ValueData::Native(native) => native.raw() as usize,
            ValueData::ExtInt(cell) => cell.identity(),
            ValueData::ExtReal(cell) => Arc::as_ptr(cell) as usize,
            ValueData::ExtString(cell) => cell.identity(),
            ValueData::File(file) => Arc::as_ptr(file) as usize,
            ValueData::Scalar(_) | ValueData::Code(_) | ValueData::Null | ValueData::Array(_) => {
                id.index()
            }
        }
    }
}
