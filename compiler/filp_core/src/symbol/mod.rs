//! The symbol table.
//!
//! A fixed number of buckets, each an ordered list of symbols. A successful
//! lookup moves the symbol to the front of its bucket so names used in a
//! loop are found on the first comparison next time.
//!
//! The table stores bindings only; reading and writing through them (array
//! duplication, host write-through) is done by [`Machine`](crate::Machine),
//! which also owns the heap.

use crate::hash::hash_bytes;
use crate::{Kind, ValueId};

/// Bucket count of the symbol table.
pub const SYMBOL_BUCKETS: usize = 67;

/// Handle to a symbol in a [`SymbolTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A name bound to a value.
#[derive(Debug)]
pub struct Symbol {
    name: Box<[u8]>,
    kind: Kind,
    external: bool,
    value: ValueId,
}

impl Symbol {
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Kind of the binding. Follows the bound value on assignment, except
    /// for host bindings, which keep their kind for life.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Bound to host memory at creation.
    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn value(&self) -> ValueId {
        self.value
    }

    pub(crate) fn rebind(&mut self, value: ValueId, kind: Kind) {
        self.value = value;
        self.kind = kind;
    }
}

/// Bucketed name table.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Option<Symbol>>,
    buckets: Vec<Vec<SymbolId>>,
    count: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: Vec::new(),
            buckets: vec![Vec::new(); SYMBOL_BUCKETS],
            count: 0,
        }
    }

    fn bucket_of(name: &[u8]) -> usize {
        hash_bytes(name, SYMBOL_BUCKETS)
    }

    /// Look `name` up, moving it to the front of its bucket.
    pub fn find(&mut self, name: &[u8]) -> Option<SymbolId> {
        if name.is_empty() {
            return None;
        }
        let symbols = &self.symbols;
        let bucket = &mut self.buckets[Self::bucket_of(name)];
        let pos = bucket.iter().position(|id| {
            symbols[id.index()]
                .as_ref()
                .is_some_and(|symbol| &symbol.name[..] == name)
        })?;
        let id = bucket.remove(pos);
        bucket.insert(0, id);
        Some(id)
    }

    /// Create a symbol bound to Null at the front of its bucket.
    ///
    /// Does not check for an existing symbol of the same name; the newer
    /// one shadows it.
    pub fn create(&mut self, kind: Kind, name: &[u8], external: bool) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.symbols.push(Some(Symbol {
            name: Box::from(name),
            kind,
            external,
            value: ValueId::NULL,
        }));
        self.buckets[Self::bucket_of(name)].insert(0, id);
        self.count += 1;
        tracing::debug!(name = %String::from_utf8_lossy(name), ?kind, "symbol created");
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Unlink a symbol from its bucket and hand it back.
    pub(crate) fn remove(&mut self, id: SymbolId) -> Option<Symbol> {
        let symbol = self.symbols.get_mut(id.index())?.take()?;
        self.buckets[Self::bucket_of(&symbol.name)].retain(|&other| other != id);
        self.count -= 1;
        tracing::debug!(name = %String::from_utf8_lossy(&symbol.name), "symbol removed");
        Some(symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Names starting with `prefix`, bucket by bucket, front to back.
    pub fn names_with_prefix(&self, prefix: &[u8]) -> Vec<&[u8]> {
        self.buckets
            .iter()
            .flatten()
            .filter_map(|id| self.get(*id))
            .map(Symbol::name)
            .filter(|name| name.starts_with(prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests;
