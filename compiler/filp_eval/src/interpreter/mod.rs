//! The embeddable interpreter.
//!
//! An [`Interpreter`] is one complete, independent filp instance: its own
//! heap, stacks, symbols and error state, plus the native functions the
//! host and the core library registered. Nothing is shared between
//! instances.

mod builder;
mod specials;

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use filp_core::{
    ErrorKind, HostFile, IntCell, Machine, NativeId, StackOverflow, StringCell, ValueData,
    ValueId,
};
use parking_lot::Mutex;

use crate::loader::SourceLoader;
use crate::{ErrorReport, Status};

pub use builder::InterpreterBuilder;

/// A host or library function callable from scripts.
///
/// Natives take their arguments from the stack and leave their results
/// there; the return value is the status the calling token produces.
pub type NativeFn = Rc<dyn Fn(&mut Interpreter) -> Status>;

/// One filp instance.
pub struct Interpreter {
    pub(crate) machine: Machine,
    natives: Vec<NativeFn>,
    loader: Box<dyn SourceLoader>,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("machine", &self.machine)
            .field("natives", &self.natives.len())
            .finish_non_exhaustive()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter with the default configuration and the core library
    /// loaded.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Bare instance: no natives, no special variables.
    fn with_machine(machine: Machine, loader: Box<dyn SourceLoader>) -> Self {
        Interpreter {
            machine,
            natives: Vec::new(),
            loader,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    // Registration

    /// Make `f` callable under `name`. Returns `false`, registering
    /// nothing, if the name is already bound.
    pub fn register_native<F>(&mut self, name: &str, f: F) -> bool
    where
        F: Fn(&mut Interpreter) -> Status + 'static,
    {
        if self.machine.find_symbol(name.as_bytes()).is_some() {
            tracing::debug!(name, "native not registered, name taken");
            return false;
        }
        let Ok(raw) = u32::try_from(self.natives.len()) else {
            return false;
        };
        self.natives.push(Rc::new(f));
        let v = self.machine.heap.native(NativeId::new(raw));
        self.machine.define(name.as_bytes(), v).is_ok()
    }

    /// Expose a host integer. Script reads see its current value and
    /// script writes store into it.
    pub fn bind_int(&mut self, name: &str, cell: Arc<Mutex<i64>>) -> bool {
        self.bind(name, ValueData::ExtInt(IntCell::Host(cell)))
    }

    pub fn bind_real(&mut self, name: &str, cell: Arc<Mutex<f64>>) -> bool {
        self.bind(name, ValueData::ExtReal(cell))
    }

    /// Expose a host byte buffer. Writes keep at most `max` bytes.
    pub fn bind_string(&mut self, name: &str, buf: Arc<Mutex<Vec<u8>>>, max: usize) -> bool {
        self.bind(name, ValueData::ExtString(StringCell::Host { buf, max }))
    }

    /// Expose a host file slot. Scripts can only assign File values to it.
    pub fn bind_file(&mut self, name: &str, file: HostFile) -> bool {
        self.bind(name, ValueData::File(file))
    }

    fn bind(&mut self, name: &str, data: ValueData) -> bool {
        let bound = self.machine.bind_external(name.as_bytes(), data).is_some();
        if !bound {
            tracing::debug!(name, "host binding refused, name taken");
        }
        bound
    }

    pub(crate) fn call_native(&mut self, native: NativeId) -> Status {
        match self.natives.get(native.raw() as usize).map(Rc::clone) {
            Some(f) => f(self),
            None => Status::Ok,
        }
    }

    // Stack

    pub fn push(&mut self, v: ValueId) -> Result<(), StackOverflow> {
        self.machine.push(v)
    }

    pub fn push_scalar(&mut self, bytes: impl AsRef<[u8]>) -> Result<(), StackOverflow> {
        self.machine.push_scalar(bytes.as_ref())
    }

    pub fn push_int(&mut self, n: i64) -> Result<(), StackOverflow> {
        self.machine.push_int(n)
    }

    pub fn push_real(&mut self, r: f64) -> Result<(), StackOverflow> {
        self.machine.push_real(r)
    }

    pub fn push_null(&mut self) -> Result<(), StackOverflow> {
        self.machine.push_null()
    }

    pub fn push_bool(&mut self, b: bool) -> Result<(), StackOverflow> {
        self.machine.push_bool(b)
    }

    pub fn push_code(&mut self, code: impl AsRef<[u8]>) -> Result<(), StackOverflow> {
        self.machine.push_code(code.as_ref())
    }

    /// Pop the top value; Null on an empty stack.
    pub fn pop(&mut self) -> ValueId {
        self.machine.pop()
    }

    /// Pop the top value as text.
    pub fn pop_bytes(&mut self) -> Vec<u8> {
        let v = self.machine.pop();
        self.machine.heap.text(v).to_vec()
    }

    pub fn pop_string(&mut self) -> String {
        String::from_utf8_lossy(&self.pop_bytes()).into_owned()
    }

    pub fn pop_int(&mut self) -> i64 {
        self.machine.pop_int()
    }

    pub fn pop_real(&mut self) -> f64 {
        self.machine.pop_real()
    }

    /// The `n`-th value from the top, 1 being the top.
    pub fn peek(&self, n: i64) -> ValueId {
        self.machine.stack.peek(n)
    }

    pub fn depth(&self) -> usize {
        self.machine.stack.depth()
    }

    /// Text of any value, e.g. one returned by [`Interpreter::peek`].
    pub fn text(&self, v: ValueId) -> &[u8] {
        self.machine.heap.text(v)
    }

    // Pushes made by words. Overflow is not an error kind; the value is
    // dropped.

    pub(crate) fn put(&mut self, v: ValueId) {
        if let Err(overflow) = self.machine.push(v) {
            tracing::debug!(%overflow, "value dropped");
        }
    }

    pub(crate) fn put_scalar(&mut self, bytes: &[u8]) {
        let v = self.machine.heap.scalar(bytes);
        self.put(v);
    }

    pub(crate) fn put_code(&mut self, bytes: &[u8]) {
        let v = self.machine.heap.code(bytes);
        self.put(v);
    }

    pub(crate) fn put_int(&mut self, n: i64) {
        let v = self.machine.heap.int(n);
        self.put(v);
    }

    pub(crate) fn put_bool(&mut self, b: bool) {
        self.put(filp_core::Heap::boolean(b));
    }

    pub(crate) fn put_null(&mut self) {
        self.put(ValueId::NULL);
    }

    // Execution

    /// Run source text. See [`Interpreter::execute_bytes`].
    pub fn execute(&mut self, code: &str) -> Status {
        self.execute_bytes(code.as_bytes())
    }

    /// Format, then run.
    ///
    /// ```text
    /// interp.execute_fmt(format_args!("/limit {} =", n));
    /// ```
    pub fn execute_fmt(&mut self, args: fmt::Arguments<'_>) -> Status {
        self.execute(&args.to_string())
    }

    /// Fetch a program through the configured loader and run it.
    ///
    /// A program that cannot be read fails with `FILE_NOT_FOUND` (or
    /// `PERMISSION_DENIED` if the loader was refused access), the name
    /// being the error info.
    pub fn load_exec(&mut self, name: &str) -> Status {
        match self.loader.load(name) {
            Ok(source) => self.execute_bytes(&source),
            Err(error) => {
                tracing::debug!(name, %error, "cannot load program");
                let kind = match error.kind() {
                    std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                    _ => ErrorKind::FileNotFound,
                };
                self.machine.fail_with(kind, name.as_bytes());
                Status::Error
            }
        }
    }

    // Diagnostics and housekeeping

    /// The pending error, cleared. This is what an interactive front end
    /// reports before its next prompt.
    pub fn take_error(&mut self) -> Option<ErrorReport> {
        let report = ErrorReport::capture(&self.machine.diagnostics);
        self.machine.diagnostics.clear();
        report
    }

    /// The pending error, left in place.
    pub fn last_error(&self) -> Option<ErrorReport> {
        ErrorReport::capture(&self.machine.diagnostics)
    }

    /// Run the collector. A full sweep visits every queued value once.
    /// Returns how many values were reclaimed.
    pub fn sweep(&mut self, full: bool) -> usize {
        self.machine.sweep(full)
    }

    /// Values allocated and not yet reclaimed.
    pub fn live_values(&self) -> usize {
        self.machine.heap.account()
    }

    pub fn symbol_count(&self) -> usize {
        self.machine.symbols.len()
    }

    /// Unlink `name` from the symbol table regardless of the configured
    /// removal mode. Returns whether it existed.
    pub fn remove_symbol(&mut self, name: &str) -> bool {
        match self.machine.find_symbol(name.as_bytes()) {
            Some(id) => {
                self.machine.remove_symbol(id);
                true
            }
            None => false,
        }
    }
}
