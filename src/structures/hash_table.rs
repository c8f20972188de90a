//! Hash table with separate chaining
//!
//! Buckets are `Option<Vec<Entry>>`: a bucket is `None` until its first entry
//! arrives and goes back to `None` when its last entry leaves, so an empty
//! chain is never stored.

use crate::engine::errors::EngineError;
use std::fmt;

/// Bucket count of a fresh table
pub const DEFAULT_TABLE_SIZE: usize = 10;

/// Resize targets offered by the front-end
pub const RESIZE_PRESETS: [usize; 3] = [7, 10, 15];

pub const SAMPLE_ENTRIES: [(&str, &str); 7] = [
    ("apple", "fruit"),
    ("banana", "fruit"),
    ("carrot", "vegetable"),
    ("dog", "animal"),
    ("elephant", "animal"),
    ("frog", "amphibian"),
    ("guitar", "instrument"),
];

/// Sum of `code(c_i) * (i + 1)` modulo `size`.
///
/// Order-sensitive and deliberately simple. A `size` of zero hashes
/// everything to bucket 0; tables never have zero buckets.
pub fn hash(key: &str, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    key.chars()
        .enumerate()
        .fold(0usize, |acc, (i, c)| (acc + (c as usize) * (i + 1)) % size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// What a write did to its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Bucket was empty; a one-entry chain was created
    Created,
    /// Key already present; value overwritten
    Updated,
    /// Bucket already held other keys; entry appended
    Chained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    buckets: Vec<Option<Vec<Entry>>>,
    collisions: usize,
    highlighted: Option<usize>,
}

impl HashTable {
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidTableSize { size });
        }
        Ok(HashTable {
            buckets: vec![None; size],
            collisions: 0,
            highlighted: None,
        })
    }

    pub fn sample(size: usize) -> Result<Self, EngineError> {
        let mut table = HashTable::new(size)?;
        for (key, value) in SAMPLE_ENTRIES {
            let bucket = hash(key, size);
            table.write(bucket, key, value);
        }
        Ok(table)
    }

    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[Option<Vec<Entry>>] {
        &self.buckets
    }

    pub fn bucket(&self, index: usize) -> Option<&[Entry]> {
        self.buckets.get(index).and_then(|b| b.as_deref())
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn set_highlight(&mut self, bucket: Option<usize>) {
        self.highlighted = bucket;
    }

    /// Number of non-empty buckets
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }

    /// Total number of entries across all chains
    pub fn len(&self) -> usize {
        self.buckets.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    /// Occupied buckets over size; long chains do not raise it further
    pub fn load_factor(&self) -> f64 {
        self.occupied() as f64 / self.size() as f64
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.bucket(hash(key, self.size()))?
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// What writing `key` into `bucket` would do
    pub fn classify_write(&self, bucket: usize, key: &str) -> WriteKind {
        match self.bucket(bucket) {
            None => WriteKind::Created,
            Some(chain) if chain.iter().any(|e| e.key == key) => WriteKind::Updated,
            Some(_) => WriteKind::Chained,
        }
    }

    /// Insert or overwrite `key` in `bucket`, counting a collision on append
    pub fn write(&mut self, bucket: usize, key: &str, value: &str) -> WriteKind {
        let Some(slot) = self.buckets.get_mut(bucket) else {
            return WriteKind::Created;
        };
        let entry = Entry {
            key: key.to_string(),
            value: value.to_string(),
        };
        match slot {
            None => {
                *slot = Some(vec![entry]);
                WriteKind::Created
            }
            Some(chain) => {
                if let Some(existing) = chain.iter_mut().find(|e| e.key == key) {
                    existing.value = entry.value;
                    WriteKind::Updated
                } else {
                    chain.push(entry);
                    self.collisions += 1;
                    WriteKind::Chained
                }
            }
        }
    }

    /// Remove `key` from `bucket`, collapsing the bucket when it empties
    pub fn remove(&mut self, bucket: usize, key: &str) -> Option<Entry> {
        let slot = self.buckets.get_mut(bucket)?;
        let chain = slot.as_mut()?;
        let position = chain.iter().position(|e| e.key == key)?;
        let removed = chain.remove(position);
        if chain.is_empty() {
            *slot = None;
        }
        Some(removed)
    }

    /// Every entry in bucket order, chain order within a bucket
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.iter().flatten().flatten()
    }

    /// Discard the layout: `size` empty buckets, collision count zeroed
    pub fn rehash(&mut self, size: usize) {
        self.buckets = vec![None; size.max(1)];
        self.collisions = 0;
        self.highlighted = None;
    }

    /// Same size, no entries
    pub fn clear(&mut self) {
        let size = self.size();
        self.rehash(size);
    }
}

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            let marker = if self.highlighted == Some(i) { ">" } else { " " };
            write!(f, "{}[{:>2}]", marker, i)?;
            match bucket {
                None => writeln!(f, " (empty)")?,
                Some(chain) => {
                    for entry in chain {
                        write!(f, " -> {}: {}", entry.key, entry.value)?;
                    }
                    writeln!(f)?;
                }
            }
        }
        write!(
            f,
            "size {}, entries {}, collisions {}, load factor {:.2}",
            self.size(),
            self.len(),
            self.collisions,
            self.load_factor()
        )
    }
}
