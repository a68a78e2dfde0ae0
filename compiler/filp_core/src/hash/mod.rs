//! Hashes.
//!
//! A hash is a convention over arrays: an Array of buckets, each bucket an
//! Array of alternating keys and values kept sorted by key. Lookups hash the
//! key to a bucket and binary-search it with a stride of two; a miss gives
//! the insertion point directly.

use crate::{Heap, ValueId};

/// Bucket count used by the `hash` word.
pub const HASH_BUCKETS: usize = 31;

/// String hash shared by hashes and the symbol table.
pub fn hash_bytes(bytes: &[u8], modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    bytes
        .iter()
        .fold(0usize, |c, &b| (128 * c + usize::from(b)) % modulus)
}

impl Heap {
    /// New hash with `buckets` empty buckets.
    pub fn new_hash(&mut self, buckets: usize) -> ValueId {
        let h = self.dim(buckets);
        for i in 1..=buckets {
            let bucket = self.dim(0);
            self.array_set(h, i64::try_from(i).unwrap_or(0), bucket);
        }
        h
    }

    /// Bucket that `key` hashes to, if the hash has one.
    fn bucket(&self, h: ValueId, key: &[u8]) -> Option<ValueId> {
        let buckets = self.array_size(h);
        if buckets == 0 {
            return None;
        }
        let subscript = i64::try_from(hash_bytes(key, buckets) + 1).ok()?;
        let bucket = self.array_get(h, subscript);
        self.is_array(bucket).then_some(bucket)
    }

    /// Value stored under `key`.
    pub fn hash_get(&self, h: ValueId, key: &[u8]) -> Option<ValueId> {
        let bucket = self.bucket(h, key)?;
        let e = self.binary_seek(bucket, key, 2);
        (e > 0).then(|| self.array_get(bucket, e + 1))
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn hash_set(&mut self, h: ValueId, key: &[u8], value: ValueId) -> Option<ValueId> {
        let bucket = self.bucket(h, key)?;
        let mut e = self.binary_seek(bucket, key, 2);
        let replaced = e > 0;
        if !replaced {
            e = -e;
            self.expand(bucket, e, 2);
            let k = self.scalar(key);
            self.array_set(bucket, e, k);
        }
        let old = self.array_set(bucket, e + 1, value);
        if replaced {
            old
        } else {
            None
        }
    }

    /// Remove `key`, returning whether it was present.
    pub fn hash_del(&mut self, h: ValueId, key: &[u8]) -> bool {
        let Some(bucket) = self.bucket(h, key) else {
            return false;
        };
        let e = self.binary_seek(bucket, key, 2);
        if e <= 0 {
            return false;
        }
        self.array_set(bucket, e, ValueId::NULL);
        self.array_set(bucket, e + 1, ValueId::NULL);
        self.collapse(bucket, e, 2);
        true
    }

    /// Number of key/value pairs.
    pub fn hash_size(&self, h: ValueId) -> usize {
        self.elements(h).map_or(0, |buckets| {
            buckets.iter().map(|&b| self.array_size(b)).sum::<usize>() / 2
        })
    }

    /// The `i`-th pair (1-based), counting bucket by bucket.
    ///
    /// Walks the buckets on every call.
    pub fn hash_pair(&self, h: ValueId, i: usize) -> Option<(ValueId, ValueId)> {
        let mut i = i.checked_mul(2)?;
        if i == 0 {
            return None;
        }
        for &bucket in self.elements(h)? {
            let size = self.array_size(bucket);
            if i > size {
                i -= size;
            } else {
                let value = i64::try_from(i).ok()?;
                return Some((
                    self.array_get(bucket, value - 1),
                    self.array_get(bucket, value),
                ));
            }
        }
        None
    }

    /// Every pair in bucket order, then position within the bucket.
    pub fn hash_pairs(&self, h: ValueId) -> Vec<(ValueId, ValueId)> {
        let Some(buckets) = self.elements(h) else {
            return Vec::new();
        };
        buckets
            .iter()
            .filter_map(|&bucket| self.elements(bucket))
            .flat_map(|pairs| pairs.chunks_exact(2).map(|pair| (pair[0], pair[1])))
            .collect()
    }
}
