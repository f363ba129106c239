//! A fixed-capacity, DJB2-hashed name table mapping state names to dense
//! state ids, used only during DFA construction and discarded afterward.
//!
//! This is deliberately not `std::collections::HashMap`: the bounded
//! bucket-per-row layout, the insertion-order bucket scan, and the hard
//! failure on overflow are the contract being reproduced (see
//! `examples/original_source/src/hash.c` and `src/hashtable.c`), not an
//! implementation detail free to swap out.

use crate::error::NameTableError;

/// `hash = 5381; hash = hash*33 + byte` over every byte of `key`.
fn djb2(key: &str) -> u64 {
    let mut hash: u64 = 5381;
    for &b in key.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(b as u64);
    }
    hash
}

/// One row's bucket: insertion-ordered pairs, scanned linearly.
#[derive(Debug, Default, Clone)]
struct Bucket {
    entries: Vec<(Box<str>, usize)>,
}

/// A bounded hash table from state name to state id.
///
/// `rows` is the row count the key's hash is reduced modulo (nominally a
/// few thousand, per the original's `HT_ROW_COUNT`); `bucket_cap` bounds
/// how many same-hash keys a single row may hold before insertion fails;
/// `key_budget` bounds the total number of distinct keys across the whole
/// table.
pub struct NameTable {
    rows: Vec<Bucket>,
    bucket_cap: usize,
    key_budget: usize,
    len: usize,
}

/// Defaults matching `HT_ROW_COUNT` / `HT_MAX_SAME_HASHES` from the
/// original implementation; `key_budget` is left generous since this
/// reimplementation doesn't preallocate a flat key pool.
pub const DEFAULT_ROWS: usize = 16_000;
pub const DEFAULT_BUCKET_CAP: usize = 15;
pub const DEFAULT_KEY_BUDGET: usize = 100_000;
pub const MAX_KEY_SIZE: usize = 30;

impl NameTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ROWS, DEFAULT_BUCKET_CAP, DEFAULT_KEY_BUDGET)
    }

    pub fn with_capacity(rows: usize, bucket_cap: usize, key_budget: usize) -> Self {
        NameTable {
            rows: (0..rows).map(|_| Bucket::default()).collect(),
            bucket_cap,
            key_budget,
            len: 0,
        }
    }

    fn row_for(&self, key: &str) -> usize {
        (djb2(key) % self.rows.len() as u64) as usize
    }

    /// Inserts `key -> value`, overwriting the value if `key` is already
    /// present. Fails if the key is too long, its bucket is full, or the
    /// table's global key budget is exhausted.
    pub fn insert(&mut self, key: &str, value: usize) -> Result<(), NameTableError> {
        if key.len() > MAX_KEY_SIZE {
            return Err(NameTableError::KeyTooLong(key.into(), MAX_KEY_SIZE));
        }
        let row = self.row_for(key);
        let bucket = &mut self.rows[row];
        if let Some(slot) = bucket.entries.iter_mut().find(|(k, _)| k.as_ref() == key) {
            slot.1 = value;
            return Ok(());
        }
        if bucket.entries.len() >= self.bucket_cap {
            return Err(NameTableError::BucketFull(key.into(), self.bucket_cap));
        }
        if self.len >= self.key_budget {
            return Err(NameTableError::KeyBudgetExhausted(self.key_budget));
        }
        bucket.entries.push((key.into(), value));
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        let row = self.row_for(key);
        self.rows[row]
            .entries
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resets every row's bucket, as if the table were newly created.
    pub fn clear(&mut self) {
        for bucket in &mut self.rows {
            bucket.entries.clear();
        }
        self.len = 0;
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut t = NameTable::new();
        t.insert("q0", 0).unwrap();
        t.insert("q1", 1).unwrap();
        assert_eq!(t.get("q0"), Some(0));
        assert_eq!(t.get("q1"), Some(1));
        assert_eq!(t.get("q2"), None);
    }

    #[test]
    fn reinsert_overwrites() {
        let mut t = NameTable::new();
        t.insert("q0", 0).unwrap();
        t.insert("q0", 7).unwrap();
        assert_eq!(t.get("q0"), Some(7));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn clear_empties_table() {
        let mut t = NameTable::new();
        t.insert("q0", 0).unwrap();
        t.clear();
        assert_eq!(t.len(), 0);
        assert_eq!(t.get("q0"), None);
    }

    #[test]
    fn bucket_overflow_is_fatal() {
        // One row forces every key into the same bucket.
        let mut t = NameTable::with_capacity(1, 2, 100);
        t.insert("a", 0).unwrap();
        t.insert("b", 1).unwrap();
        let err = t.insert("c", 2).unwrap_err();
        assert!(matches!(err, NameTableError::BucketFull(_, 2)));
    }

    #[test]
    fn key_too_long_is_rejected() {
        let mut t = NameTable::new();
        let long_key = "a".repeat(MAX_KEY_SIZE + 1);
        let err = t.insert(&long_key, 0).unwrap_err();
        assert!(matches!(err, NameTableError::KeyTooLong(_, _)));
    }

    #[test]
    fn djb2_matches_reference_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 5381u64.wrapping_mul(33).wrapping_add(b'a' as u64));
    }
}
