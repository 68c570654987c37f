use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash, Hasher},
};

use super::set::{self, AssociativeSet};

/// A key/value pair whose identity is its key.
///
/// `Eq` and `Hash` ignore `value`, so two entries with the same key collide
/// in an [`AssociativeSet`] no matter what they map to.
#[derive(Clone)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: Hash, V> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

// Agrees with the Eq/Hash impls above, which only look at the key.
impl<K, V> Borrow<K> for Entry<K, V> {
    fn borrow(&self) -> &K {
        &self.key
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.key, self.value)
    }
}

/// A hash map, stored as an [`AssociativeSet`] of [`Entry`] values.
#[derive(Clone)]
pub struct AssociativeMap<K, V, S = RandomState> {
    entries: AssociativeSet<Entry<K, V>, S>,
}

impl<K, V> AssociativeMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: AssociativeSet::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AssociativeSet::with_capacity(capacity),
        }
    }
}

impl<K, V, S> AssociativeMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            entries: AssociativeSet::with_hasher(hash_builder),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys, in the same order as [`entries`](Self::entries).
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|entry| &entry.value)
    }

    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V, S> AssociativeMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.find(key).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.find_mut(key).map(|entry| &mut entry.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Map `key` to `value`, returning whatever `key` mapped to before.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.find_mut(&key) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.add(Entry::new(key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }
}

impl<K, V, S: Default> Default for AssociativeMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for AssociativeMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for AssociativeMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Later pairs overwrite earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

/// Iterator over `(key, value)` pairs of an [`AssociativeMap`].
pub struct Entries<'a, K, V> {
    inner: set::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_and_returns_previous() {
        let mut map = AssociativeMap::new();
        assert_eq!(map.put('a', 1), None);
        assert_eq!(map.put('a', 2), Some(1));
        assert_eq!(map.get(&'a'), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn absent_keys() {
        let mut map: AssociativeMap<char, u32> = AssociativeMap::new();
        assert_eq!(map.get(&'q'), None);
        assert_eq!(map.remove(&'q'), None);
        assert!(!map.contains(&'q'));
    }

    #[test]
    fn remove_returns_value() {
        let pairs = [("one", 1), ("two", 2)];
        let mut map: AssociativeMap<_, _> = pairs.into_iter().collect();
        assert_eq!(map.remove(&"one"), Some(1));
        assert!(!map.contains(&"one"));
        assert!(map.contains(&"two"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map = AssociativeMap::new();
        map.put(b'x', 0u64);
        for _ in 0..5 {
            *map.get_mut(&b'x').unwrap() += 1;
        }
        assert_eq!(map.get(&b'x'), Some(&5));
    }

    #[test]
    fn keys_and_entries_agree() {
        let map: AssociativeMap<u16, u16> = (0..200).map(|i| (i, i * 3)).collect();

        let keys: Vec<_> = map.keys().copied().collect();
        let entry_keys: Vec<_> = map.entries().map(|(k, _)| *k).collect();
        assert_eq!(keys, entry_keys);
        assert_eq!(keys.len(), 200);

        for (k, v) in map.entries() {
            assert_eq!(*v, k * 3);
        }
        let total: u32 = map.values().map(|&v| u32::from(v)).sum();
        assert_eq!(total, 3 * (0..200).sum::<u32>());
    }

    #[test]
    fn entry_identity_is_the_key() {
        assert_eq!(Entry::new(1, "a"), Entry::new(1, "b"));
        assert_ne!(Entry::new(1, "a"), Entry::new(2, "a"));
    }

    #[test]
    fn clear() {
        let mut map: AssociativeMap<u8, ()> = (0..30).map(|i| (i, ())).collect();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.keys().count(), 0);
    }
}
