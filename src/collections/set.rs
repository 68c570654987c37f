use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    iter::Flatten,
    slice,
};

/// Number of buckets in a freshly created set.
const DEFAULT_BUCKETS: usize = 16;

/// A hash set using separate chaining.
///
/// Elements are compared with `Eq` and placed with `Hash`, so a type whose
/// `Eq`/`Hash` only look at part of the value (see [`Entry`]) turns this into
/// a keyed container. Lookups accept any borrowed form of the element.
///
/// Iteration order is unspecified, and changes whenever the table grows.
///
/// [`Entry`]: super::Entry
#[derive(Clone)]
pub struct AssociativeSet<T, S = RandomState> {
    buckets: Vec<Vec<T>>,
    len: usize,
    hash_builder: S,
}

impl<T> AssociativeSet<T> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Create a set that holds `capacity` elements before it has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut set = Self::new();
        let wanted = buckets_for(capacity);
        if wanted > set.buckets.len() {
            set.buckets = empty_buckets(wanted);
        }
        set
    }
}

impl<T, S> AssociativeSet<T, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_BUCKETS),
            len: 0,
            hash_builder,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All elements, in the table's current order.
    pub fn elements(&self) -> Iter<'_, T> {
        Iter {
            inner: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.elements()
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }
}

impl<T, S> AssociativeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Return the stored element equal to `value`, if any.
    pub fn find<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(value);
        self.buckets[idx]
            .iter()
            .find(|elem| Borrow::<Q>::borrow(*elem) == value)
    }

    /// Mutable access to a stored element.
    ///
    /// The caller must not change anything that takes part in `Eq`/`Hash`.
    pub(crate) fn find_mut<Q>(&mut self, value: &Q) -> Option<&mut T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(value);
        self.buckets[idx]
            .iter_mut()
            .find(|elem| Borrow::<Q>::borrow(&**elem) == value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Insert `element`.
    ///
    /// If an equal element is already present the set is left untouched and
    /// `false` is returned.
    pub fn add(&mut self, element: T) -> bool {
        if self.contains(&element) {
            return false;
        }

        if (self.len + 1) * 4 > self.buckets.len() * 3 {
            self.grow();
        }

        let idx = self.bucket_index(&element);
        self.buckets[idx].push(element);
        self.len += 1;
        true
    }

    /// Remove and return the stored element equal to `value`.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(value);
        let bucket = &mut self.buckets[idx];
        let pos = bucket
            .iter()
            .position(|elem| Borrow::<Q>::borrow(elem) == value)?;
        self.len -= 1;
        Some(bucket.swap_remove(pos))
    }

    fn bucket_index<Q: Hash + ?Sized>(&self, value: &Q) -> usize {
        (self.hash_builder.hash_one(value) % self.buckets.len() as u64) as usize
    }

    /// Double the bucket count and rehash everything.
    fn grow(&mut self) {
        let new_count = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_count));
        for element in old.into_iter().flatten() {
            let idx = self.bucket_index(&element);
            self.buckets[idx].push(element);
        }
    }
}

fn empty_buckets<T>(count: usize) -> Vec<Vec<T>> {
    (0..count).map(|_| Vec::new()).collect()
}

/// Smallest power-of-two bucket count keeping `capacity` under a 3/4 load.
fn buckets_for(capacity: usize) -> usize {
    (capacity * 4 / 3 + 1)
        .next_power_of_two()
        .max(DEFAULT_BUCKETS)
}

impl<T, S: Default> Default for AssociativeSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for AssociativeSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> FromIterator<T> for AssociativeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for AssociativeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T, S> IntoIterator for &'a AssociativeSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

/// Borrowing iterator over an [`AssociativeSet`].
pub struct Iter<'a, T> {
    inner: Flatten<slice::Iter<'a, Vec<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        self.remaining -= 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
