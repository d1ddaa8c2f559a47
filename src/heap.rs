/*
 * Max-Heap Module
 *
 * This module defines a generic max-priority queue keyed by an injected
 * scoring function. The point field uses it to always split the box holding
 * the most mass next, but nothing here knows about boxes.
 */

use crate::error::HeapError;

pub struct MaxHeap<T, F>
where
    F: Fn(&T) -> f32,
{
    items: Vec<T>,
    score: F,
}

impl<T, F> MaxHeap<T, F>
where
    F: Fn(&T) -> f32,
{
    pub fn new(score: F) -> Self {
        Self {
            items: Vec::new(),
            score,
        }
    }

    // Bottom-up O(n) heap construction from an arbitrary ordering.
    pub fn from_vec(items: Vec<T>, score: F) -> Self {
        let mut heap = Self { items, score };
        let n = heap.items.len();
        for i in (0..n / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // O(log n) insertion: append, then sift up while the parent scores lower.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        let mut i = self.items.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if (self.score)(&self.items[i]) <= (self.score)(&self.items[parent]) {
                return;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    /// Returns the maximum-score item without removing it.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.items.first().ok_or(HeapError::Empty)
    }

    /// Removes and returns the maximum-score item.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let max = self.items.pop().ok_or(HeapError::Empty)?;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(max)
    }

    // Consumes the heap, yielding the remaining items in arbitrary order.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // Index of the highest-scoring node among a node and its two children.
    fn max_of_node(&self, i: usize) -> usize {
        let mut best = i;
        for child in [2 * i + 1, 2 * i + 2] {
            if child < self.items.len()
                && (self.score)(&self.items[child]) > (self.score)(&self.items[best])
            {
                best = child;
            }
        }
        best
    }

    fn sift_down(&mut self, i: usize) {
        let j = self.max_of_node(i);
        if i == j {
            return;
        }
        self.items.swap(i, j);
        self.sift_down(j);
    }
}
