//! One interpreter's worth of state.
//!
//! [`Machine`] owns the heap, the stacks, the symbol table and the error
//! side channel, and implements the operations that need more than one of
//! them at once: binding values to names, reading host bindings and the
//! stack-level push/pop helpers natives are written against.

use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::value::{HostFile, IntCell, Register, StringCell};
use crate::{
    Diagnostics, ErrorKind, Heap, Kind, Stack, StackOverflow, SymbolId, SymbolTable, ValueData,
    ValueId,
};

/// Interpreter version, reported through `filp_version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What destroying a symbol does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SymbolRemoval {
    /// Bind the name to Null. The name stays defined.
    #[default]
    RebindNull,
    /// Unlink the symbol from the table.
    Remove,
}

/// Run-time switches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Arithmetic words work on reals instead of integers.
    pub real: bool,
    /// Unknown names are pushed as literals instead of failing.
    pub bareword: bool,
    /// Words that reach outside the interpreter are refused.
    pub isolated: bool,
}

/// Where a write to an external symbol goes.
enum Sink {
    Int(IntCell),
    Real(Arc<Mutex<f64>>),
    Str(StringCell),
    File(HostFile),
}

/// Heap, stacks, symbols and diagnostics of one interpreter.
#[derive(Debug)]
pub struct Machine {
    pub heap: Heap,
    pub stack: Stack,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
    pub flags: Flags,
    pub removal: SymbolRemoval,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Stack::default(), Flags::default(), SymbolRemoval::default())
    }
}

impl Machine {
    pub fn new(stack: Stack, flags: Flags, removal: SymbolRemoval) -> Self {
        Machine {
            heap: Heap::new(),
            stack,
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            flags,
            removal,
        }
    }

    // Stack helpers

    pub fn push(&mut self, v: ValueId) -> Result<(), StackOverflow> {
        self.stack.push(&mut self.heap, v)
    }

    pub fn push_scalar(&mut self, bytes: &[u8]) -> Result<(), StackOverflow> {
        let v = self.heap.scalar(bytes);
        self.push(v)
    }

    pub fn push_int(&mut self, n: i64) -> Result<(), StackOverflow> {
        let v = self.heap.int(n);
        self.push(v)
    }

    pub fn push_real(&mut self, r: f64) -> Result<(), StackOverflow> {
        let v = self.heap.real(r);
        self.push(v)
    }

    pub fn push_null(&mut self) -> Result<(), StackOverflow> {
        self.push(ValueId::NULL)
    }

    pub fn push_bool(&mut self, b: bool) -> Result<(), StackOverflow> {
        self.push(Heap::boolean(b))
    }

    pub fn push_code(&mut self, bytes: &[u8]) -> Result<(), StackOverflow> {
        let v = self.heap.code(bytes);
        self.push(v)
    }

    pub fn pop(&mut self) -> ValueId {
        self.stack.pop(&mut self.heap)
    }

    pub fn pop_int(&mut self) -> i64 {
        let v = self.pop();
        self.heap.to_int(v)
    }

    pub fn pop_real(&mut self) -> f64 {
        let v = self.pop();
        self.heap.to_real(v)
    }

    /// Pop values down to and including the first Null. Returned top
    /// first.
    pub fn pop_list(&mut self) -> SmallVec<[ValueId; 8]> {
        let mut list = SmallVec::new();
        while self.stack.depth() > 0 {
            let v = self.pop();
            if self.heap.kind(v) == Kind::Null {
                break;
            }
            list.push(v);
        }
        list
    }

    // Symbols

    pub fn find_symbol(&mut self, name: &[u8]) -> Option<SymbolId> {
        self.symbols.find(name)
    }

    /// Current value of a symbol.
    ///
    /// Host bindings are read at call time into a fresh value. Plain
    /// bindings, Arrays included, come back as the bound value itself;
    /// pushing an Array is what copies it.
    pub fn symbol_value(&mut self, id: SymbolId) -> ValueId {
        let Some(symbol) = self.symbols.get(id) else {
            return ValueId::NULL;
        };
        let bound = symbol.value();

        match self.heap.data(bound) {
            ValueData::ExtInt(cell) => {
                let n = match cell {
                    IntCell::Host(cell) => *cell.lock(),
                    IntCell::Register(register) => self.read_register(*register),
                };
                self.heap.int(n)
            }
            ValueData::ExtReal(cell) => {
                let r = *cell.lock();
                self.heap.real(r)
            }
            ValueData::ExtString(cell) => {
                let bytes = match cell {
                    StringCell::Host { buf, max } => {
                        let buf = buf.lock();
                        buf[..buf.len().min(*max)].to_vec()
                    }
                    StringCell::ErrorInfo => self.diagnostics.info().to_vec(),
                    StringCell::Version => VERSION.as_bytes().to_vec(),
                };
                self.heap.scalar(&bytes)
            }
            ValueData::File(file) if symbol.is_external() => {
                let file = Arc::clone(file);
                self.heap.alloc(ValueData::File(file))
            }
            _ => bound,
        }
    }

    fn read_register(&self, register: Register) -> i64 {
        let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        match register {
            Register::StackSize => count(self.stack.max_depth()),
            Register::StackElems => count(self.stack.depth()),
            Register::ValAccount => count(self.heap.account()),
            Register::SymAccount => count(self.symbols.len()),
            Register::Real => i64::from(self.flags.real),
            Register::Bareword => i64::from(self.flags.bareword),
            Register::Error => self.diagnostics.code(),
        }
    }

    /// Only called for registers that are writable.
    fn write_register(&mut self, register: Register, n: i64) {
        match register {
            Register::StackSize => {
                self.stack
                    .set_max_depth(usize::try_from(n.max(0)).unwrap_or(usize::MAX));
            }
            Register::Real => self.flags.real = n != 0,
            Register::Bareword => self.flags.bareword = n != 0,
            Register::Error => self.diagnostics.set_code(n),
            Register::StackElems | Register::ValAccount | Register::SymAccount => {
                debug_assert!(!register.is_writable());
            }
        }
    }

    /// Bind `v` to a symbol.
    ///
    /// A plain symbol drops its old value, holds the new one and takes on
    /// its kind. A host binding keeps its kind and stores a converted copy
    /// of `v` in host memory instead.
    pub fn set_symbol(&mut self, id: SymbolId, v: ValueId) -> Result<(), ErrorKind> {
        let Some(symbol) = self.symbols.get(id) else {
            return Ok(());
        };

        if !symbol.is_external() {
            let old = symbol.value();
            self.heap.retain(v);
            self.heap.release(old);
            let kind = self.heap.kind(v);
            if let Some(symbol) = self.symbols.get_mut(id) {
                symbol.rebind(v, kind);
            }
            return Ok(());
        }

        let sink = match self.heap.data(symbol.value()) {
            ValueData::ExtInt(cell) => Sink::Int(cell.clone()),
            ValueData::ExtReal(cell) => Sink::Real(Arc::clone(cell)),
            ValueData::ExtString(cell) => Sink::Str(cell.clone()),
            ValueData::File(file) => Sink::File(Arc::clone(file)),
            _ => return Ok(()),
        };

        match sink {
            Sink::Int(IntCell::Host(cell)) => *cell.lock() = self.heap.to_int(v),
            Sink::Int(IntCell::Register(register)) if register.is_writable() => {
                let n = self.heap.to_int(v);
                self.write_register(register, n);
            }
            Sink::Int(IntCell::Register(_)) => {}
            Sink::Real(cell) => *cell.lock() = self.heap.to_real(v),
            Sink::Str(StringCell::Host { buf, max }) => {
                let text = self.heap.text(v);
                let mut buf = buf.lock();
                buf.clear();
                buf.extend_from_slice(&text[..text.len().min(max)]);
            }
            Sink::Str(StringCell::ErrorInfo) => {
                let text = self.heap.text(v).to_vec();
                self.diagnostics.set_info(&text);
            }
            Sink::Str(StringCell::Version) => {}
            Sink::File(target) => {
                let ValueData::File(source) = self.heap.data(v) else {
                    return Err(ErrorKind::FileExpected);
                };
                if Arc::ptr_eq(source, &target) {
                    return Ok(());
                }
                let handle = match source.lock().as_ref().map(std::fs::File::try_clone) {
                    Some(Ok(file)) => Some(file),
                    Some(Err(error)) => {
                        tracing::debug!(%error, "cannot share file handle");
                        return Err(ErrorKind::InternalError);
                    }
                    None => None,
                };
                *target.lock() = handle;
            }
        }
        Ok(())
    }

    /// Bind `v` to `name`, creating the symbol if needed.
    pub fn define(&mut self, name: &[u8], v: ValueId) -> Result<SymbolId, ErrorKind> {
        let id = match self.symbols.find(name) {
            Some(id) => id,
            None => self.symbols.create(Kind::Scalar, name, false),
        };
        self.set_symbol(id, v)?;
        Ok(id)
    }

    /// Create a host binding holding `data`. Returns `None`, changing
    /// nothing, if the name is already taken.
    pub fn bind_external(&mut self, name: &[u8], data: ValueData) -> Option<SymbolId> {
        if self.symbols.find(name).is_some() {
            return None;
        }
        let kind = data.kind();
        let v = self.heap.alloc(data);
        self.heap.retain(v);
        let id = self.symbols.create(kind, name, true);
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.rebind(v, kind);
        }
        Some(id)
    }

    /// Destroy a symbol according to the configured [`SymbolRemoval`].
    pub fn destroy_symbol(&mut self, id: SymbolId) {
        match self.removal {
            SymbolRemoval::RebindNull => {
                if let Err(kind) = self.set_symbol(id, ValueId::NULL) {
                    tracing::debug!(%kind, "symbol kept its binding");
                }
            }
            SymbolRemoval::Remove => self.remove_symbol(id),
        }
    }

    /// Unlink a symbol from the table and drop its value.
    pub fn remove_symbol(&mut self, id: SymbolId) {
        if let Some(symbol) = self.symbols.remove(id) {
            self.heap.release(symbol.value());
        }
    }

    /// Push the value bound to `name`, or Null.
    pub fn push_symbol_value(&mut self, name: &[u8]) -> Result<(), StackOverflow> {
        let v = match self.symbols.find(name) {
            Some(id) => self.symbol_value(id),
            None => ValueId::NULL,
        };
        self.push(v)
    }

    /// Push a Null followed by every symbol name starting with `prefix`.
    /// Returns how many names were pushed.
    pub fn push_dict(&mut self, prefix: &[u8]) -> Result<usize, StackOverflow> {
        let names: Vec<Vec<u8>> = self
            .symbols
            .names_with_prefix(prefix)
            .into_iter()
            .map(<[u8]>::to_vec)
            .collect();
        self.push_null()?;
        for name in &names {
            self.push_scalar(name)?;
        }
        Ok(names.len())
    }

    // Diagnostics

    pub fn fail(&mut self, kind: ErrorKind) {
        tracing::debug!(%kind, "error raised");
        self.diagnostics.set(kind);
    }

    pub fn fail_with(&mut self, kind: ErrorKind, info: &[u8]) {
        tracing::debug!(%kind, info = %String::from_utf8_lossy(info), "error raised");
        self.diagnostics.set_with_info(kind, info);
    }

    /// Run the collector; see [`Heap::sweep`].
    pub fn sweep(&mut self, full: bool) -> usize {
        self.heap.sweep(full)
    }
}
