use core::hash::Hash;
use std::collections::HashMap;

/// A multi-map from key to the ordered group of values sharing that key.
///
/// Values keep their insertion order within a group. Looking up a key that
/// was never inserted yields an empty group rather than a miss.
#[derive(Debug, Clone)]
pub struct Lookup<K, V> {
    groups: HashMap<K, Vec<V>>,
    len: usize,
}

impl<K, V> Lookup<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            len: 0,
        }
    }

    /// Groups `values` by `key`, preserving their relative order.
    pub fn from_values<I, F>(values: I, key: F) -> Self
    where
        I: IntoIterator<Item = V>,
        F: Fn(&V) -> K,
    {
        values.into_iter().map(|v| (key(&v), v)).collect()
    }

    /// Appends `value` to the group of `key`.
    pub fn push(&mut self, key: K, value: V) {
        self.groups.entry(key).or_default().push(value);
        self.len += 1;
    }

    /// Returns the group for `key`, empty if there is none.
    pub fn get(&self, key: &K) -> &[V] {
        self.groups.get(key).map_or(&[][..], Vec::as_slice)
    }

    /// Returns `true` if at least one value was inserted under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.groups.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of values across all groups.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no value has been inserted.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K, V> Default for Lookup<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Lookup<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut lookup = Self::new();
        for (key, value) in iter {
            lookup.push(key, value);
        }
        lookup
    }
}
