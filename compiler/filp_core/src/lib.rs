//! filp core - values, memory and machine state for the filp interpreter.
//!
//! Everything here is independent of source text: the executor in
//! `filp_eval` drives these structures one token at a time.
//!
//! # Architecture
//!
//! - [`Heap`]: the value store. Values are addressed by [`ValueId`] handles,
//!   carry an explicit reference count and are linked into a FIFO allocation
//!   queue that the incremental collector cycles through.
//! - Arrays and hashes are not separate stores but operations on `Heap`
//!   (see the `array` and `hash` modules). A hash is an array of sorted
//!   key/value buckets.
//! - [`SymbolTable`]: 67 bucket lists of name bindings with move-to-front
//!   lookup.
//! - [`Stack`]: the bounded execution stack plus its alternate stack.
//! - [`Machine`]: one interpreter instance's worth of the above, plus the
//!   error side channel and the run-time switches scripts can flip.
//!
//! Reclamation only ever happens in [`Heap::sweep`]; `retain` and `release`
//! just move counts. Arrays that contain themselves are never reclaimed.

mod array;
mod errors;
mod hash;
mod heap;
mod machine;
mod stack;
mod symbol;
mod value;

pub use errors::{Diagnostics, ErrorKind, INFO_CAPACITY};
pub use hash::{hash_bytes, HASH_BUCKETS};
pub use heap::Heap;
pub use machine::{Flags, Machine, SymbolRemoval, VERSION};
pub use stack::{Stack, StackOverflow, DEFAULT_STACK_SIZE};
pub use symbol::{Symbol, SymbolId, SymbolTable, SYMBOL_BUCKETS};
pub use value::{
    format_int, format_real, parse_int, parse_real, HostFile, IntCell, Kind, NativeId, Register,
    StringCell, ValueData, ValueId,
};
