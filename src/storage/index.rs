// Code index
// Maps an identifying code (alpha2, alpha3 or numeric) to the positions of the
// rows that carry it, so point lookups don't need a full table scan.
// Row positions are kept in table order, so the first entry is always the
// same record a linear scan would have found first.

use seahash::SeaHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

/// HashMap keyed with SeaHash instead of the default SipHash
type SeaHashMap<K, V> = HashMap<K, V, BuildHasherDefault<SeaHasher>>;

/// Index over one code column
#[derive(Debug, Clone, Default)]
pub struct CodeIndex {
    /// Maps a code to the row positions that carry it
    entries: SeaHashMap<String, Vec<usize>>,
}

impl CodeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from (code, row position) pairs in table order
    pub fn build<'a>(codes: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        let mut index = Self::new();
        for (code, row_id) in codes {
            index.insert(code, row_id);
        }
        index
    }

    /// Record that `row_id` carries `code`
    pub fn insert(&mut self, code: &str, row_id: usize) {
        self.entries.entry(code.to_string()).or_default().push(row_id);
    }

    /// All row positions for a code, in table order
    pub fn lookup(&self, code: &str) -> &[usize] {
        self.entries.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first row position for a code
    pub fn first(&self, code: &str) -> Option<usize> {
        self.lookup(code).first().copied()
    }

    /// Number of distinct codes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
