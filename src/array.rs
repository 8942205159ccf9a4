use crate::errors::AllocError;
use std::slice;

/// Number of slots a fresh array starts with.
pub const DEFAULT_CAPACITY: usize = 1;
/// Number of slots added or released whenever the array resizes.
pub const RESIZE_STEP: usize = 1;

/// An ordered, index-addressable sequence that grows and shrinks by a fixed step.
///
/// Storage is kept as tight as possible: an append that would overflow adds exactly
/// [RESIZE_STEP] slots, and a removal that leaves more than one step unused gives one
/// step back. Growth never aborts the process; running out of memory is reported
/// as an [AllocError].
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
    buffer: Vec<T>,
    // Logical capacity. The Vec is always reserved to at least this many slots.
    capacity: usize,
}

impl<T> DynamicArray<T> {
    pub fn new() -> Self {
        let mut buffer = Vec::new();
        // A failed initial reservation leaves the array usable, it just grows on first append
        let capacity = match buffer.try_reserve_exact(DEFAULT_CAPACITY) {
            Ok(()) => DEFAULT_CAPACITY,
            Err(_) => 0,
        };
        Self { buffer, capacity }
    }

    /// Creates an array with room for `capacity` elements before the first resize.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity)?;
        Ok(Self { buffer, capacity })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn append(&mut self, value: T) -> Result<(), AllocError> {
        if self.buffer.len() + 1 > self.capacity {
            let wanted = self.capacity + RESIZE_STEP;
            self.buffer.try_reserve_exact(wanted - self.buffer.len())?;
            self.capacity = wanted;
        }
        self.buffer.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.buffer.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buffer.get_mut(index)
    }

    /// Removes the element at `index`, shifting every later element one slot to the left.
    /// Returns `None` if the index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.buffer.len() {
            return None;
        }
        let removed = self.buffer.remove(index);

        if self.buffer.len() + RESIZE_STEP < self.capacity {
            self.capacity -= RESIZE_STEP;
            self.buffer.shrink_to(self.capacity);
        }
        Some(removed)
    }

    /// Hands every element, in order, to `release` and then frees the slot storage.
    pub fn destroy_with<F: FnMut(T)>(self, release: F) {
        self.buffer.into_iter().for_each(release);
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buffer.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.buffer.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.iter()
    }
}
