//! The value store.
//!
//! Values live in a slot vector and are addressed by generational
//! [`ValueId`] handles. Every allocated value is appended to a FIFO
//! allocation queue; the collector (see `gc`) is the only code that ever
//! frees a slot, and it only does so for values whose count is zero when
//! they reach the head of that queue.
//!
//! Null and the canonical true value occupy the first two slots. They are
//! never queued and never counted.

mod gc;

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::value::{format_int, format_real, parse_int, parse_real, NativeId};
use crate::{Kind, ValueData, ValueId};

static NULL_DATA: ValueData = ValueData::Null;

#[derive(Debug)]
struct Cell {
    refs: u32,
    data: ValueData,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    cell: Option<Cell>,
}

/// Reference-counted value store with an allocation queue.
#[derive(Debug)]
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    queue: VecDeque<ValueId>,
    last_account: usize,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        let immortal = |data| Slot {
            generation: 0,
            cell: Some(Cell { refs: 1, data }),
        };
        Heap {
            slots: vec![
                immortal(ValueData::Null),
                immortal(ValueData::Scalar(Box::from(&b"1"[..]))),
            ],
            free: Vec::new(),
            queue: VecDeque::new(),
            last_account: 0,
        }
    }

    /// Store a new value with a count of zero and queue it.
    pub fn alloc(&mut self, data: ValueData) -> ValueId {
        let cell = Some(Cell { refs: 0, data });
        let id = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.cell = cell;
            ValueId::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                cell,
            });
            ValueId::new(index, 0)
        };
        self.queue.push_back(id);
        id
    }

    /// New Scalar holding a copy of `bytes`.
    pub fn scalar(&mut self, bytes: &[u8]) -> ValueId {
        self.alloc(ValueData::Scalar(Box::from(bytes)))
    }

    /// New Code holding a copy of `bytes`.
    pub fn code(&mut self, bytes: &[u8]) -> ValueId {
        self.alloc(ValueData::Code(Box::from(bytes)))
    }

    pub fn int(&mut self, value: i64) -> ValueId {
        self.scalar(format_int(value).as_bytes())
    }

    pub fn real(&mut self, value: f64) -> ValueId {
        self.scalar(format_real(value).as_bytes())
    }

    pub fn native(&mut self, native: NativeId) -> ValueId {
        self.alloc(ValueData::Native(native))
    }

    /// Canonical boolean: true is the Scalar `"1"`, false is Null.
    pub fn boolean(value: bool) -> ValueId {
        if value {
            ValueId::TRUE
        } else {
            ValueId::NULL
        }
    }

    fn cell(&self, id: ValueId) -> Option<&Cell> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.cell.as_ref())
    }

    fn cell_mut(&mut self, id: ValueId) -> Option<&mut Cell> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.cell.as_mut())
    }

    /// Whether `id` still refers to a stored value.
    pub fn is_live(&self, id: ValueId) -> bool {
        self.cell(id).is_some()
    }

    /// Payload of `id`. Reclaimed handles read as Null.
    pub fn data(&self, id: ValueId) -> &ValueData {
        self.cell(id).map_or(&NULL_DATA, |cell| &cell.data)
    }

    pub(crate) fn data_mut(&mut self, id: ValueId) -> Option<&mut ValueData> {
        if id.is_immortal() {
            return None;
        }
        self.cell_mut(id).map(|cell| &mut cell.data)
    }

    pub fn kind(&self, id: ValueId) -> Kind {
        self.data(id).kind()
    }

    /// Textual form of `id`; see [`ValueData::text`].
    pub fn text(&self, id: ValueId) -> &[u8] {
        self.data(id).text()
    }

    /// Bytes of a Scalar, `None` for every other kind.
    pub fn scalar_bytes(&self, id: ValueId) -> Option<&[u8]> {
        match self.data(id) {
            ValueData::Scalar(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Current count, or `None` for a reclaimed handle.
    pub fn refs(&self, id: ValueId) -> Option<u32> {
        self.cell(id).map(|cell| cell.refs)
    }

    /// Add one holder. Never reclaims.
    pub fn retain(&mut self, id: ValueId) {
        if id.is_immortal() {
            return;
        }
        if let Some(cell) = self.cell_mut(id) {
            cell.refs = cell.refs.saturating_add(1);
        }
    }

    /// Drop one holder. Never reclaims; the collector does that later.
    pub fn release(&mut self, id: ValueId) {
        if id.is_immortal() {
            return;
        }
        if let Some(cell) = self.cell_mut(id) {
            cell.refs = cell.refs.saturating_sub(1);
        }
    }

    /// Number of queued values, i.e. values not yet reclaimed.
    pub fn account(&self) -> usize {
        self.queue.len()
    }

    /// False only for Null and for a Scalar that is exactly `"0"`.
    pub fn is_true(&self, id: ValueId) -> bool {
        match self.data(id) {
            ValueData::Null => false,
            ValueData::Scalar(bytes) => &bytes[..] != b"0",
            _ => true,
        }
    }

    /// Integer value of a Scalar; every other kind is zero.
    pub fn to_int(&self, id: ValueId) -> i64 {
        self.scalar_bytes(id).map_or(0, parse_int)
    }

    /// Real value of a Scalar; every other kind is zero.
    pub fn to_real(&self, id: ValueId) -> f64 {
        self.scalar_bytes(id).map_or(0.0, parse_real)
    }

    /// Total order over values.
    ///
    /// Two Scalars compare as byte strings. Two values of the same opaque
    /// kind compare by identity. Anything else compares by kind tag, which
    /// is arbitrary but consistent; numeric ordering needs a conversion
    /// first.
    pub fn compare(&self, a: ValueId, b: ValueId) -> Ordering {
        let (da, db) = (self.data(a), self.data(b));
        match (da, db) {
            (ValueData::Scalar(x), ValueData::Scalar(y)) => x.cmp(y),
            _ if da.kind() == db.kind() => da.identity(a).cmp(&db.identity(b)),
            _ => da.kind().tag().cmp(&db.kind().tag()),
        }
    }

    /// [`Heap::compare`] of a Scalar holding `key` against `id`, without
    /// allocating the Scalar.
    pub fn compare_key(&self, key: &[u8], id: ValueId) -> Ordering {
        match self.data(id) {
            ValueData::Scalar(bytes) => key.cmp(bytes),
            other => Kind::Scalar.tag().cmp(&other.kind().tag()),
        }
    }
}
