//! Native stack growth for re-entrant execution.
//!
//! Every deferred block, user word and control-flow body re-enters the
//! executor, so a script like `/f { f } set f` recurses on the host stack
//! once per call. [`ensure_sufficient_stack`] grows the native stack on demand
//! instead of letting such scripts abort the embedding process.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a fresh segment when the red zone
//!   is reached.
//! - **WASM targets**: passthrough, the runtime manages its own stack.
//!
//! # Configuration
//!
//! - **Red zone**: 128KB. A single executor frame holds a token buffer and a
//!   block-capture buffer, so the margin is slightly wider than a plain
//!   recursive-descent parser would need.
//! - **Growth size**: 1MB per new segment.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the native stack first if less than the red zone remains.
///
/// ```text
/// fn execute_bytes(&mut self, code: &[u8]) -> Status {
///     ensure_sufficient_stack(|| self.run(code))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining native stack in bytes, when the platform can report it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM version - the runtime does not expose its stack pointer.
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests;
