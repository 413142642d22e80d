//! Indexed minimum priority queue backed by a binary heap.
//!
//! Each entry is addressed by a dense integer index in `[0, capacity)`, which
//! lets Dijkstra's algorithm decrease the key of a vertex already in the
//! queue without searching for it.

use crate::error::{Error, Result};

/// A minimum-oriented indexed priority queue.
///
/// `pq` holds the heap (position -> index, 1-based), `qp` its inverse
/// (index -> position) and `keys` the priority of each index. The two position
/// tables are updated together on every exchange.
#[derive(Debug, Clone)]
pub struct IndexMinPQ<K> {
    n: usize,
    pq: Vec<usize>,
    qp: Vec<Option<usize>>,
    keys: Vec<Option<K>>,
}

impl<K: PartialOrd + Copy> IndexMinPQ<K> {
    /// Create an empty queue accepting indices in `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        IndexMinPQ {
            n: 0,
            pq: vec![0; capacity + 1],
            qp: vec![None; capacity],
            keys: vec![None; capacity],
        }
    }

    /// Maximum index + 1.
    pub fn capacity(&self) -> usize {
        self.qp.len()
    }

    /// Number of entries in the queue.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Check if index `i` currently has an entry.
    pub fn contains(&self, i: usize) -> bool {
        i < self.capacity() && self.qp[i].is_some()
    }

    /// Insert `key` at index `i`.
    pub fn insert(&mut self, i: usize, key: K) -> Result<()> {
        self.check_index(i)?;
        if self.contains(i) {
            return Err(Error::DuplicateIndex(i));
        }

        self.n += 1;
        self.pq[self.n] = i;
        self.qp[i] = Some(self.n);
        self.keys[i] = Some(key);
        self.swim(self.n);
        Ok(())
    }

    /// Index holding the minimum key.
    pub fn min_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(self.pq[1])
    }

    /// The minimum key.
    pub fn min_key(&self) -> Option<K> {
        self.min_index().and_then(|i| self.keys[i])
    }

    /// Key stored at index `i`, if present.
    pub fn key_of(&self, i: usize) -> Option<K> {
        self.keys.get(i).copied().flatten()
    }

    /// Remove the minimum entry and return its index.
    pub fn del_min(&mut self) -> Option<usize> {
        let min = self.min_index()?;

        self.exchange(1, self.n);
        self.n -= 1;
        self.sink(1);

        self.qp[min] = None;
        self.keys[min] = None;
        Some(min)
    }

    /// Remove the entry at index `i`.
    pub fn delete(&mut self, i: usize) -> Result<()> {
        self.check_index(i)?;
        let position = self.qp[i].ok_or(Error::MissingIndex(i))?;

        self.exchange(position, self.n);
        self.n -= 1;

        // The removed entry was not the last one, so the entry moved into its
        // slot may belong higher or lower in the heap.
        if position <= self.n {
            self.swim(position);
            self.sink(position);
        }

        self.qp[i] = None;
        self.keys[i] = None;
        Ok(())
    }

    /// Replace the key at index `i`, moving it up or down as needed.
    pub fn change_key(&mut self, i: usize, key: K) -> Result<()> {
        self.check_index(i)?;
        let position = self.qp[i].ok_or(Error::MissingIndex(i))?;

        self.keys[i] = Some(key);
        self.swim(position);
        if let Some(position) = self.qp[i] {
            self.sink(position);
        }
        Ok(())
    }

    /// Change the capacity to `capacity`.
    ///
    /// Growing keeps every entry. Shrinking drops entries whose index is no
    /// longer below `capacity` and rebuilds the heap from what remains.
    pub fn resize(&mut self, capacity: usize) {
        let retained: Vec<(usize, K)> = (1..=self.n)
            .map(|position| self.pq[position])
            .filter(|&i| i < capacity)
            .filter_map(|i| self.keys[i].map(|key| (i, key)))
            .collect();

        self.pq = vec![0; capacity + 1];
        self.qp = vec![None; capacity];
        self.keys = vec![None; capacity];
        self.n = retained.len();

        for (offset, (i, key)) in retained.into_iter().enumerate() {
            self.pq[offset + 1] = i;
            self.qp[i] = Some(offset + 1);
            self.keys[i] = Some(key);
        }

        for position in (1..=self.n / 2).rev() {
            self.sink(position);
        }
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.capacity() {
            return Err(Error::IndexOutOfRange {
                index: i,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.keys[self.pq[a]] > self.keys[self.pq[b]]
    }

    fn exchange(&mut self, a: usize, b: usize) {
        self.pq.swap(a, b);
        self.qp[self.pq[a]] = Some(a);
        self.qp[self.pq[b]] = Some(b);
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.greater(k / 2, k) {
            self.exchange(k / 2, k);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        while 2 * k <= self.n {
            let mut j = 2 * k;
            if j < self.n && self.greater(j, j + 1) {
                j += 1;
            }
            if !self.greater(k, j) {
                break;
            }
            self.exchange(k, j);
            k = j;
        }
    }
}
