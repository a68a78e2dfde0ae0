//! The execution stack and its alternate.
//!
//! Every stack slot holds one reference to its value. Arrays are duplicated
//! on the way in, so mutating the array in one slot never shows through
//! another.

use crate::{Heap, Kind, ValueId};

/// Default maximum depth.
pub const DEFAULT_STACK_SIZE: usize = 16384;

/// A push was refused because the stack is at its maximum depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("stack overflow: maximum depth of {max_depth} values reached")]
pub struct StackOverflow {
    pub max_depth: usize,
}

/// Bounded execution stack with a swappable alternate. The top is the end
/// of the active vector.
#[derive(Debug)]
pub struct Stack {
    active: Vec<ValueId>,
    alternate: Vec<ValueId>,
    max_depth: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_SIZE)
    }
}

impl Stack {
    pub fn new(max_depth: usize) -> Self {
        Stack {
            active: Vec::new(),
            alternate: Vec::new(),
            max_depth,
        }
    }

    /// Push `v`, duplicating it first if it is an Array.
    pub fn push(&mut self, heap: &mut Heap, v: ValueId) -> Result<(), StackOverflow> {
        if self.active.len() >= self.max_depth {
            return Err(StackOverflow {
                max_depth: self.max_depth,
            });
        }
        let v = heap.dup(v);
        heap.retain(v);
        self.active.push(v);
        Ok(())
    }

    /// Pop the top value, or Null when the stack is empty.
    ///
    /// The value stays in the heap until the next sweep reaches it, so the
    /// caller may use it freely in between.
    pub fn pop(&mut self, heap: &mut Heap) -> ValueId {
        match self.active.pop() {
            Some(v) => {
                heap.release(v);
                v
            }
            None => ValueId::NULL,
        }
    }

    /// The `n`-th value from the top (1 is the top), or Null.
    pub fn peek(&self, n: i64) -> ValueId {
        usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| self.active.len().checked_sub(n + 1))
            .map_or(ValueId::NULL, |pos| self.active[pos])
    }

    /// Move the `n`-th value to the top. Pushes Null when there is no
    /// such value.
    pub fn rotate(&mut self, heap: &mut Heap, n: i64) -> Result<(), StackOverflow> {
        if n == 1 {
            return Ok(());
        }
        let depth = self.active.len();
        let pos = usize::try_from(n)
            .ok()
            .filter(|&n| n >= 1 && n <= depth)
            .map(|n| depth - n);
        match pos {
            Some(pos) => {
                let v = self.active.remove(pos);
                self.active.push(v);
                Ok(())
            }
            None => self.push(heap, ValueId::NULL),
        }
    }

    /// Exchange the active and alternate stacks.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.active, &mut self.alternate);
    }

    pub fn depth(&self) -> usize {
        self.active.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the maximum depth. Values already above it stay; further
    /// pushes fail until the stack shrinks.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Number of values above the first Null from the top.
    pub fn list_size(&self, heap: &Heap) -> usize {
        self.active
            .iter()
            .rev()
            .take_while(|&&v| heap.kind(v) != Kind::Null)
            .count()
    }

    /// Active values, bottom first.
    pub fn values(&self) -> &[ValueId] {
        &self.active
    }
}

#[cfg(test)]
mod tests;
