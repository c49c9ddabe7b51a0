use std::{borrow::Borrow, collections::HashMap, hash::Hash, sync::Arc};

use crate::graph::Entity;

/// An ordered collection of one kind of record with an id index on the side.
///
/// Insertion order is kept; when two records share a key the first one wins
/// the lookup.
#[derive(Debug)]
pub struct Table<T: Entity> {
    items: Vec<Arc<T>>,
    lookup: HashMap<T::Key, usize>,
}

impl<T: Entity> Table<T> {
    pub fn new(items: Vec<Arc<T>>) -> Self {
        let mut lookup: HashMap<T::Key, usize> = HashMap::with_capacity(items.len());
        items.iter().enumerate().for_each(|(i, item)| {
            lookup.entry(item.key()).or_insert(i);
        });
        Self { items, lookup }
    }

    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Arc<T>>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.lookup.get(key)?;
        Some(&self.items[*index])
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T: Entity> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            lookup: self.lookup.clone(),
        }
    }
}

impl<T: Entity> From<Vec<Arc<T>>> for Table<T> {
    fn from(value: Vec<Arc<T>>) -> Self {
        Self::new(value)
    }
}

impl<T: Entity> FromIterator<Arc<T>> for Table<T> {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Entity> FromIterator<T> for Table<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Arc::new).collect())
    }
}
