//! filp evaluation - tokenizer, executor and core word library.
//!
//! filp is a small stack-based language in reverse Polish notation meant
//! to be embedded in a host program. The host creates an [`Interpreter`],
//! binds its own natives and variables, and feeds it source text.
//!
//! ```text
//! let mut interp = Interpreter::new();
//! interp.execute("/x 3 = $x $x *");
//! assert_eq!(interp.pop_int(), 9);
//! ```
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=filp_eval=debug`: registration, loading and prelude events.
//! - `RUST_LOG=filp_eval=trace`: every dispatched token.
//! - `RUST_LOG=filp_core=debug`: full sweeps and symbol lifetimes.

mod builtins;
mod exec;
mod interpreter;
mod loader;
mod report;
mod status;

use std::sync::Once;

pub use filp_core::{ErrorKind, HostFile, Kind, StackOverflow, SymbolRemoval, ValueId};
pub use interpreter::{Interpreter, InterpreterBuilder, NativeFn};
pub use loader::{FsLoader, MemoryLoader, SourceLoader};
pub use report::ErrorReport;
pub use status::Status;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
