//! Array operations.
//!
//! Arrays are ordinary values whose payload is a vector of element handles.
//! Subscripts are 1-based; `0` addresses the last element. An empty slot
//! holds [`ValueId::NULL`], so reading it yields Null without special cases.
//!
//! Every slot owns one reference to its element: `set` releases the old
//! occupant and retains the new one, and freeing the array releases them
//! all.

use std::cmp::Ordering;

use crate::{Heap, ValueData, ValueId};

/// Map a subscript onto a 0-based position, `0` meaning the last element.
fn position(i: i64, len: usize) -> Option<usize> {
    let pos = if i == 0 {
        len.checked_sub(1)?
    } else {
        usize::try_from(i).ok()?.checked_sub(1)?
    };
    (pos < len).then_some(pos)
}

impl Heap {
    /// New Array of `n` empty slots.
    pub fn dim(&mut self, n: usize) -> ValueId {
        self.alloc(ValueData::Array(vec![ValueId::NULL; n]))
    }

    /// New Array holding `elements`, each retained.
    pub fn array_from(&mut self, elements: &[ValueId]) -> ValueId {
        for &element in elements {
            self.retain(element);
        }
        self.alloc(ValueData::Array(elements.to_vec()))
    }

    pub fn is_array(&self, a: ValueId) -> bool {
        matches!(self.data(a), ValueData::Array(_))
    }

    /// Element handles of an Array, `None` for other kinds.
    pub fn elements(&self, a: ValueId) -> Option<&[ValueId]> {
        match self.data(a) {
            ValueData::Array(elements) => Some(elements),
            _ => None,
        }
    }

    fn elements_mut(&mut self, a: ValueId) -> Option<&mut Vec<ValueId>> {
        match self.data_mut(a)? {
            ValueData::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Number of slots; zero for non-arrays.
    pub fn array_size(&self, a: ValueId) -> usize {
        self.elements(a).map_or(0, <[ValueId]>::len)
    }

    /// Open `n` empty slots before subscript `offset`; `0` appends.
    ///
    /// Negative offsets and offsets past one-beyond-the-end are ignored.
    pub fn expand(&mut self, a: ValueId, offset: i64, n: usize) {
        let Some(elements) = self.elements_mut(a) else {
            return;
        };
        let len = elements.len();
        let pos = match offset {
            o if o < 0 => return,
            0 => len,
            o => match usize::try_from(o - 1) {
                Ok(pos) if pos <= len => pos,
                _ => return,
            },
        };
        elements.splice(pos..pos, std::iter::repeat(ValueId::NULL).take(n));
    }

    /// Remove `n` slots starting at subscript `offset`; `0` removes the
    /// last `n`. The count is clamped to what remains. Removed occupants
    /// are released.
    pub fn collapse(&mut self, a: ValueId, offset: i64, n: usize) {
        let Some(elements) = self.elements_mut(a) else {
            return;
        };
        let len = elements.len();
        let Ok(offset) = usize::try_from(offset) else {
            return;
        };
        if len == 0 || offset > len {
            return;
        }

        let range = if offset == 0 {
            len - n.min(len)..len
        } else {
            let start = offset - 1;
            start..start + n.min(len - start)
        };

        let removed: Vec<ValueId> = elements.drain(range).collect();
        for element in removed {
            self.release(element);
        }
    }

    /// Element at subscript `i`, Null when out of range or empty.
    pub fn array_get(&self, a: ValueId, i: i64) -> ValueId {
        self.elements(a)
            .and_then(|elements| position(i, elements.len()).map(|pos| elements[pos]))
            .unwrap_or(ValueId::NULL)
    }

    /// Store `v` at subscript `i`, returning the previous occupant.
    ///
    /// Out of range is a no-op returning `None`.
    pub fn array_set(&mut self, a: ValueId, i: i64, v: ValueId) -> Option<ValueId> {
        let elements = self.elements_mut(a)?;
        let pos = position(i, elements.len())?;
        let old = std::mem::replace(&mut elements[pos], v);
        self.retain(v);
        self.release(old);
        Some(old)
    }

    /// Insert `v` before subscript `i`; `0` appends.
    pub fn array_insert(&mut self, a: ValueId, i: i64, v: ValueId) {
        let before = self.array_size(a);
        self.expand(a, i, 1);
        if self.array_size(a) > before {
            self.array_set(a, i, v);
        }
    }

    /// Remove the element at subscript `i`, shrinking the array by one.
    pub fn array_delete(&mut self, a: ValueId, i: i64) {
        if self.array_set(a, i, ValueId::NULL).is_some() {
            self.collapse(a, i, 1);
        }
    }

    /// Copy of an Array sharing its elements, each retained once more.
    ///
    /// Non-arrays are returned unchanged.
    pub fn dup(&mut self, a: ValueId) -> ValueId {
        let Some(elements) = self.elements(a).map(<[ValueId]>::to_vec) else {
            return a;
        };
        for &element in &elements {
            self.retain(element);
        }
        self.alloc(ValueData::Array(elements))
    }

    /// Linear search for a Scalar equal to `key`, visiting every `inc`-th
    /// slot. Returns the 1-based subscript, or 0.
    pub fn seek(&self, a: ValueId, key: &[u8], inc: usize) -> usize {
        let Some(elements) = self.elements(a) else {
            return 0;
        };
        elements
            .iter()
            .enumerate()
            .step_by(inc.max(1))
            .find(|(_, &element)| self.compare_key(key, element) == Ordering::Equal)
            .map_or(0, |(pos, _)| pos + 1)
    }

    /// Binary search over an array sorted in groups of `inc`.
    ///
    /// Returns the positive subscript of the group leader equal to `key`,
    /// or the negated subscript at which a new group must be opened to keep
    /// the order.
    pub fn binary_seek(&self, a: ValueId, key: &[u8], inc: usize) -> i64 {
        let inc = i64::try_from(inc.max(1)).unwrap_or(1);
        let size = i64::try_from(self.array_size(a)).unwrap_or(i64::MAX);

        let mut bottom: i64 = 0;
        let mut top = (size - 1) / inc;

        while top >= bottom {
            let n = (bottom + top) / 2;
            let subscript = n * inc + 1;
            if subscript > size {
                break;
            }
            match self.compare_key(key, self.array_get(a, subscript)) {
                Ordering::Equal => return subscript,
                Ordering::Less => top = n - 1,
                Ordering::Greater => bottom = n + 1,
            }
        }

        -(bottom * inc + 1)
    }

    /// Sort groups of `inc` elements by their first element. A trailing
    /// partial group stays where it is.
    pub fn sort(&mut self, a: ValueId, inc: usize) {
        if inc == 0 {
            return;
        }
        let Some(elements) = self.elements_mut(a).map(std::mem::take) else {
            return;
        };

        let whole = elements.len() / inc * inc;
        let mut groups: Vec<&[ValueId]> = elements[..whole].chunks_exact(inc).collect();
        groups.sort_by(|x, y| self.compare(x[0], y[0]));

        let mut sorted: Vec<ValueId> = groups.concat();
        sorted.extend_from_slice(&elements[whole..]);

        if let Some(slot) = self.elements_mut(a) {
            *slot = sorted;
        }
    }
}
