//! Host bindings.
//!
//! A binding is created once, when the host exposes a variable, and is
//! shared from then on. Script reads synthesize a fresh scalar from the
//! cell; script writes convert and store into it.

use std::fs::File;
use std::sync::Arc;

use parking_lot::Mutex;

/// An open host file, shared between the binding and every value read
/// from it. `None` once the host has closed it.
pub type HostFile = Arc<Mutex<Option<File>>>;

/// Interpreter state exposed to scripts as integer variables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    StackSize,
    StackElems,
    ValAccount,
    SymAccount,
    Real,
    Bareword,
    Error,
}

impl Register {
    /// Registers scripts may assign to. Writes to the others are ignored.
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Register::StackSize | Register::Real | Register::Bareword | Register::Error
        )
    }
}

/// Storage behind an external integer.
#[derive(Clone, Debug)]
pub enum IntCell {
    Host(Arc<Mutex<i64>>),
    Register(Register),
}

impl IntCell {
    pub(crate) fn identity(&self) -> usize {
        match self {
            IntCell::Host(cell) => Arc::as_ptr(cell) as usize,
            IntCell::Register(register) => *register as usize,
        }
    }
}

/// Storage behind an external string.
#[derive(Clone, Debug)]
pub enum StringCell {
    /// Host buffer; writes are truncated to `max` bytes.
    Host { buf: Arc<Mutex<Vec<u8>>>, max: usize },
    /// The error info buffer.
    ErrorInfo,
    /// The interpreter version. Read-only.
    Version,
}

impl StringCell {
    pub(crate) fn identity(&self) -> usize {
        match self {
            StringCell::Host { buf, .. } => Arc::as_ptr(buf) as usize,
            StringCell::ErrorInfo => 1,
            StringCell::Version => 2,
        }
    }
}
