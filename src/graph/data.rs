//! src/graph/data.rs
//!
//! Timestamped samples and the bounded history they live in.

use std::collections::VecDeque;
use std::time::Duration;

/// One reading of the control scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Time since the sampler's origin.
    pub t: Duration,
    pub v: f64,
    /// Append order, assigned by the buffer. Bootstrap samples use `u64::MAX`.
    pub seq: u64,
}

impl Sample {
    pub fn new(t: Duration, v: f64) -> Self {
        Self { t, v, seq: 0 }
    }
}

#[derive(Debug)]
pub struct RingBuffer {
    /// oldest at front
    samples: VecDeque<Sample>,
    capacity: usize,
    next_seq: u64,
}

impl RingBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_seq: 0,
        }
    }

    /// Append at the tail, evicting from the head until the capacity holds.
    ///
    /// Returns the samples that were evicted, oldest first.
    pub fn append(&mut self, mut sample: Sample) -> Vec<Sample> {
        if let Some(last) = self.samples.back() {
            // timestamps never run backwards
            sample.t = sample.t.max(last.t);
        }
        sample.seq = self.next_seq;
        self.next_seq += 1;
        self.samples.push_back(sample);
        self.evict_to_capacity()
    }

    /// Change the capacity, evicting from the head if the buffer is now too long.
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<Sample> {
        self.capacity = capacity.max(1);
        self.evict_to_capacity()
    }

    fn evict_to_capacity(&mut self) -> Vec<Sample> {
        let excess = self.samples.len().saturating_sub(self.capacity);
        self.samples.drain(..excess).collect()
    }

    /// Ordered copy of the buffer as it is right now.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Return `raw` if it is finite (remembering it), otherwise the last good value.
pub fn coerce_finite(raw: f64, last_good: &mut f64) -> f64 {
    if raw.is_finite() {
        *last_good = raw;
    }
    *last_good
}
