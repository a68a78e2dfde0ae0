//! `InterpreterBuilder` for creating configured interpreters.

use filp_core::{Flags, Machine, Stack, SymbolRemoval, DEFAULT_STACK_SIZE};

use super::{specials, Interpreter};
use crate::builtins;
use crate::loader::{FsLoader, SourceLoader};

/// Builder for [`Interpreter`].
///
/// Every setting is also reachable from scripts afterwards except the
/// loader and the removal mode: `filp_stack_size`, `filp_real` and
/// `filp_bareword` are read-write, and `safe` switches isolation on.
pub struct InterpreterBuilder {
    stack_size: usize,
    flags: Flags,
    removal: SymbolRemoval,
    loader: Option<Box<dyn SourceLoader>>,
    args: Vec<String>,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            stack_size: DEFAULT_STACK_SIZE,
            flags: Flags::default(),
            removal: SymbolRemoval::default(),
            loader: None,
            args: Vec::new(),
        }
    }

    /// Maximum number of values on the stack.
    #[must_use]
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = size;
        self
    }

    /// Arithmetic on reals instead of integers.
    #[must_use]
    pub fn real_mode(mut self, on: bool) -> Self {
        self.flags.real = on;
        self
    }

    /// Push unknown names as literals instead of failing.
    #[must_use]
    pub fn barewords(mut self, on: bool) -> Self {
        self.flags.bareword = on;
        self
    }

    /// Refuse `load` from the start.
    #[must_use]
    pub fn isolated(mut self, on: bool) -> Self {
        self.flags.isolated = on;
        self
    }

    /// What `unset` does to a symbol.
    #[must_use]
    pub fn symbol_removal(mut self, removal: SymbolRemoval) -> Self {
        self.removal = removal;
        self
    }

    /// Where `load` and [`Interpreter::load_exec`] read programs from.
    /// Defaults to the file system.
    #[must_use]
    pub fn loader(mut self, loader: Box<dyn SourceLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Contents of the `ARGV` array.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Create the interpreter with the core library and special variables
    /// in place.
    pub fn build(self) -> Interpreter {
        let machine = Machine::new(Stack::new(self.stack_size), self.flags, self.removal);
        let loader = self.loader.unwrap_or_else(|| Box::new(FsLoader));
        let mut interp = Interpreter::with_machine(machine, loader);

        builtins::register(&mut interp);
        specials::bind(&mut interp, &self.args);
        builtins::run_prelude(&mut interp);

        tracing::debug!(
            symbols = interp.symbol_count(),
            stack_size = self.stack_size,
            "interpreter ready"
        );
        interp
    }
}
