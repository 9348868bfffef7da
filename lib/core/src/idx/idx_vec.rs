use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::slice;

use super::Idx;

pub struct IdxVec<K: Idx, V> {
    vec: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K: Idx, V> IdxVec<K, V> {
    pub const fn new() -> Self {
        Self {
            vec: Vec::new(),
            phantom: PhantomData,
        }
    }
}

impl<K: Idx, V> Default for IdxVec<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Idx, V> From<Vec<V>> for IdxVec<K, V> {
    fn from(vec: Vec<V>) -> Self {
        Self { vec, phantom: PhantomData }
    }
}

impl<K: Idx, V> Debug for IdxVec<K, V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.vec.iter()).finish()
    }
}

impl<K: Idx, V> IdxVec<K, V> {
    /// Grows the vector (with default values) so that `k` becomes a valid key.
    pub fn init(&mut self, k: &K)
    where
        V: Default,
    {
        self.init_by(k, Default::default)
    }

    pub fn init_by<F>(&mut self, k: &K, f: F)
    where
        F: FnMut() -> V,
    {
        let new_len = k.idx() + 1;
        if new_len > self.vec.len() {
            self.vec.resize_with(new_len, f);
        }
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn push(&mut self, v: V) {
        self.vec.push(v);
    }

    pub fn iter(&self) -> slice::Iter<V> {
        self.vec.iter()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (K, &V)>
    where
        K: From<usize>,
    {
        self.vec.iter().enumerate().map(|(i, v)| (K::from(i), v))
    }
}

// vec[key]
impl<K: Idx, V> Index<K> for IdxVec<K, V> {
    type Output = V;

    fn index(&self, k: K) -> &Self::Output {
        self.vec.index(k.idx())
    }
}

// vec[&key]
impl<K: Idx, V> Index<&K> for IdxVec<K, V> {
    type Output = V;

    fn index(&self, k: &K) -> &Self::Output {
        self.vec.index(k.idx())
    }
}

// vec[key] = (value)
impl<K: Idx, V> IndexMut<K> for IdxVec<K, V> {
    fn index_mut(&mut self, k: K) -> &mut Self::Output {
        self.vec.index_mut(k.idx())
    }
}

// vec[&key] = (value)
impl<K: Idx, V> IndexMut<&K> for IdxVec<K, V> {
    fn index_mut(&mut self, k: &K) -> &mut Self::Output {
        self.vec.index_mut(k.idx())
    }
}
