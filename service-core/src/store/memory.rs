//! In-process document collection used by the in-memory repositories.
//!
//! Keeps insertion order, which the MongoDB repositories reproduce with an
//! explicit sort.

use std::sync::{PoisonError, RwLock};

pub struct MemoryCollection<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Clone> MemoryCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: T) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }

    /// Inserts unless an existing item matches `conflicts`. Returns whether
    /// the item was stored.
    pub fn insert_unique(&self, item: T, conflicts: impl Fn(&T) -> bool) -> bool {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if items.iter().any(conflicts) {
            return false;
        }
        items.push(item);
        true
    }

    pub fn find_one(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool, offset: usize, limit: usize) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|item| predicate(item))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(predicate)
    }

    /// Removes the first matching item.
    pub fn remove(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let index = items.iter().position(predicate)?;
        Some(items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let store = MemoryCollection::new();
        for i in 0..5 {
            store.insert(i);
        }
        assert_eq!(store.find(|_| true, 0, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(store.find(|_| true, 3, 10), vec![3, 4]);
        assert_eq!(store.find(|v| v % 2 == 0, 0, 2), vec![0, 2]);
    }

    #[test]
    fn insert_unique_rejects_conflicts() {
        let store = MemoryCollection::new();
        assert!(store.insert_unique("a", |v| *v == "a"));
        assert!(!store.insert_unique("a", |v| *v == "a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let store = MemoryCollection::new();
        store.insert(1);
        store.insert(2);
        store.insert(1);
        assert_eq!(store.remove(|v| *v == 1), Some(1));
        assert_eq!(store.filter(|_| true), vec![2, 1]);
        assert_eq!(store.remove(|v| *v == 9), None);
    }
}
