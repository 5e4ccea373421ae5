#![forbid(unsafe_code)]

//! Explicit display order.
//!
//! [`OrderSequence`] is the single source of truth for the order in which a
//! panel flows its items. It is independent of the host's child collection,
//! which usually doubles as paint/z-order and is reshuffled by
//! bring-to-front during a drag.
//!
//! # Invariants
//!
//! 1. No handle appears twice.
//! 2. `append` adds at the tail; nothing else inserts.
//! 3. Every mutation on an absent handle is a no-op.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free sequence of item handles.
///
/// Serializes as a plain list. Deserializing drops repeated handles, keeping
/// the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<T>",
    into = "Vec<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de> + Copy + PartialEq"
    )
)]
pub struct OrderSequence<T> {
    entries: Vec<T>,
}

impl<T> Default for OrderSequence<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialEq> OrderSequence<T> {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.entries.get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, item: T) -> bool {
        self.entries.contains(&item)
    }

    /// Items in display order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Add `item` at the tail.
    ///
    /// Returns `false` and leaves the sequence untouched if the item is
    /// already present.
    pub fn append(&mut self, item: T) -> bool {
        if self.contains(item) {
            return false;
        }
        self.entries.push(item);
        true
    }

    /// Remove `item`, returning the index it occupied.
    pub fn remove(&mut self, item: T) -> Option<usize> {
        let index = self.index_of(item)?;
        self.entries.remove(index);
        Some(index)
    }

    /// Position of `item` in display order.
    #[must_use]
    pub fn index_of(&self, item: T) -> Option<usize> {
        self.entries.iter().position(|entry| *entry == item)
    }

    /// Swap `item` with its predecessor.
    ///
    /// Returns `true` if the item moved.
    pub fn move_up(&mut self, item: T) -> bool {
        match self.index_of(item) {
            Some(index) if index > 0 => {
                self.entries.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    /// Swap `item` with its successor.
    ///
    /// Returns `true` if the item moved.
    pub fn move_down(&mut self, item: T) -> bool {
        match self.index_of(item) {
            Some(index) if index + 1 < self.entries.len() => {
                self.entries.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Relocate `item` to `target` by adjacent swaps, one step at a time.
    ///
    /// Items between the old and new position keep their relative order.
    /// A target past the tail stops at the tail. Returns the final index, or
    /// `None` if the item is absent.
    pub fn move_to(&mut self, item: T, target: usize) -> Option<usize> {
        let mut index = self.index_of(item)?;
        let target = target.min(self.entries.len() - 1);
        while index > target {
            self.entries.swap(index - 1, index);
            index -= 1;
        }
        while index < target {
            self.entries.swap(index, index + 1);
            index += 1;
        }
        Some(index)
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for OrderSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut order = Self::new();
        for item in iter {
            order.append(item);
        }
        order
    }
}

impl<T: Copy + PartialEq> From<Vec<T>> for OrderSequence<T> {
    fn from(entries: Vec<T>) -> Self {
        entries.into_iter().collect()
    }
}

impl<T> From<OrderSequence<T>> for Vec<T> {
    fn from(order: OrderSequence<T>) -> Self {
        order.entries
    }
}

impl<T: Copy + PartialEq> Extend<T> for OrderSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}
