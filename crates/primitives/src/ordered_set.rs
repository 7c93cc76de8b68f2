//! An insertion ordered set implementation.

use core::{hash::Hash, ops::Deref};
use std::collections::HashSet;

/// A set which remembers the order in which elements were first inserted. Removing an element and
/// inserting it again moves it to the back.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    data: Vec<T>,
    index: HashSet<T>,
}

impl<T: Clone + Eq + Hash> OrderedSet<T> {
    /// Returns a new empty set.
    pub fn new() -> Self {
        Self { data: Vec::new(), index: HashSet::new() }
    }

    /// Inserts the element at the back if it is absent. Returns false if it was already present,
    /// in which case its position is unchanged.
    pub fn insert(&mut self, elem: T) -> bool {
        if !self.index.insert(elem.clone()) {
            return false;
        }
        self.data.push(elem);
        true
    }

    /// Removes the element if present, returning whether it was.
    pub fn remove(&mut self, elem: &T) -> bool {
        if !self.index.remove(elem) {
            return false;
        }
        if let Some(position) = self.data.iter().position(|e| e == elem) {
            self.data.remove(position);
        }
        true
    }

    /// Returns true if the element is in the set.
    pub fn contains(&self, elem: &T) -> bool {
        self.index.contains(elem)
    }

    /// Consumes the set, returning the elements in order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone + Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for OrderedSet<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.data == *other
    }
}

impl<T> Deref for OrderedSet<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_keep_first_insertion_position() {
        let mut set: OrderedSet<_> = [1, 2, 3].into_iter().collect();

        assert!(!set.insert(1));
        assert_eq!(set, vec![1, 2, 3]);
    }

    #[test]
    fn test_should_move_reinserted_element_to_back() {
        let mut set: OrderedSet<_> = [1, 2, 3].into_iter().collect();

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(set.insert(1));

        assert_eq!(set, vec![2, 3, 1]);
        assert!(set.contains(&1));
    }
}
