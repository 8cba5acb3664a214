use std::{borrow::Borrow, fmt};

use thiserror::Error;

use super::Sentinel;

/// The number of entries a new `AssocArray` can hold before it first expands.
pub const DEFAULT_CAPACITY: usize = 16;

/// Error type for storing and looking up entries in an `AssocArray`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum AssocError {
    #[error("the key is the absent sentinel and cannot be stored")]
    InvalidKey,
    #[error("the key does not appear in the associative array")]
    KeyNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// An associative array that keeps its entries in a dense vector and finds
/// keys by linear scan.
///
/// Iteration follows storage order, which is insertion order until the first
/// removal. Removing an entry moves the last entry into the freed slot, so
/// after a removal the formerly-last entry takes the removed entry's position.
/// Updating the value of an existing key never moves it.
#[derive(Debug)]
pub struct AssocArray<K, V> {
    /// The live entries. There is at most one entry per distinct key and there
    /// are no holes.
    entries: Vec<Entry<K, V>>,
    /// How many entries fit before the next expansion. Always at least 1 and
    /// at least `entries.len()`.
    capacity: usize,
}

impl<K, V> AssocArray<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` entries. A capacity of
    /// zero is rounded up to one so that doubling always makes progress.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        AssocArray { entries: Vec::with_capacity(capacity), capacity }
    }

    /// Returns the number of key/value pairs.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a snapshot of the keys in storage order.
    pub fn keys(&self) -> Vec<&K> {
        self.entries.iter().map(|entry| &entry.key).collect()
    }

    /// Iterates over the key/value pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }

    // Doubles the capacity of the backing storage.
    fn expand(&mut self) {
        let new_capacity = self.capacity * 2;
        self.entries.reserve_exact(new_capacity - self.entries.len());
        self.capacity = new_capacity;
    }
}

impl<K: PartialEq, V> AssocArray<K, V> {
    /// Stores `value` under `key`. If the key is already present its value is
    /// replaced in place; otherwise the pair is appended, expanding the
    /// storage first if it is full. Fails only for the sentinel key.
    pub fn set(&mut self, key: K, value: V) -> Result<(), AssocError>
    where
        K: Sentinel,
    {
        if key.is_sentinel() {
            return Err(AssocError::InvalidKey);
        }
        self.upsert(key, value);
        Ok(())
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, AssocError>
    where
        K: Borrow<Q>,
        Q: PartialEq + Sentinel + ?Sized,
    {
        if key.is_sentinel() {
            return Err(AssocError::KeyNotFound);
        }
        let index = self.find(key).ok_or(AssocError::KeyNotFound)?;
        Ok(&self.entries[index].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, AssocError>
    where
        K: Borrow<Q>,
        Q: PartialEq + Sentinel + ?Sized,
    {
        if key.is_sentinel() {
            return Err(AssocError::KeyNotFound);
        }
        let index = self.find(key).ok_or(AssocError::KeyNotFound)?;
        Ok(&mut self.entries[index].value)
    }

    /// Returns whether `get` would succeed for `key`.
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + Sentinel + ?Sized,
    {
        self.get(key).is_ok()
    }

    /// Removes the pair stored under `key`, returning its value. Does nothing
    /// if the key is absent. The last entry is moved into the removed slot;
    /// see the type-level docs for what that means for iteration order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self.find(key)?;
        Some(self.entries.swap_remove(index).value)
    }

    // Returns the index of the entry whose key equals `key`.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries.iter().position(|entry| entry.key.borrow() == key)
    }

    // Same as `set`, for keys that are already known not to be the sentinel.
    fn upsert(&mut self, key: K, value: V) {
        match self.find(&key) {
            Some(index) => self.entries[index].value = value,
            None => {
                if self.entries.len() >= self.capacity {
                    self.expand();
                }
                self.entries.push(Entry { key, value });
            }
        }
    }
}

impl<K, V> Default for AssocArray<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies every entry into a fresh array of default capacity, in storage
/// order.
impl<K: PartialEq + Clone, V: Clone> Clone for AssocArray<K, V> {
    fn clone(&self) -> Self {
        let mut result = AssocArray::new();
        for entry in &self.entries {
            result.upsert(entry.key.clone(), entry.value.clone());
        }
        result
    }
}

/// Two arrays are equal when they hold the same key/value pairs, regardless of
/// storage order.
impl<K: PartialEq, V: PartialEq> PartialEq for AssocArray<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.entries.iter().all(|entry| {
                other.find(&entry.key).is_some_and(|index| other.entries[index].value == entry.value)
            })
    }
}

impl<K: Eq, V: Eq> Eq for AssocArray<K, V> {}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AssocArray<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", entry.key, entry.value)?;
        }
        f.write_str("}")
    }
}
