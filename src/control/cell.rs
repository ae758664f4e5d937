//! src/control/cell.rs
//!
//! Single-slot atomic holder for the gain value.
//!
//! The store writes it, the sampler and chart only read it. `f64` bits live in
//! an `AtomicU64` so a read never observes a half-written value and the
//! sampling path takes no lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Writable side, owned by the control store.
#[derive(Debug)]
pub struct GainCell {
    bits: Arc<AtomicU64>,
}

/// Read-only handle that always sees the latest committed value.
#[derive(Clone, Debug)]
pub struct GainReader {
    bits: Arc<AtomicU64>,
}

impl GainCell {
    pub fn new(value: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
        }
    }

    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn reader(&self) -> GainReader {
        GainReader {
            bits: Arc::clone(&self.bits),
        }
    }
}

impl GainReader {
    /// Raw latest value; may be non-finite.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn reader_sees_later_writes() {
        let cell = GainCell::new(1.2);
        let reader = cell.reader();
        assert_eq!(reader.get(), 1.2);
        cell.set(2.7);
        assert_eq!(reader.get(), 2.7);
        cell.set(f64::NAN);
        assert!(reader.get().is_nan());
    }

    #[test]
    fn reads_from_another_thread_are_whole_values() {
        let cell = GainCell::new(0.0);
        let reader = cell.reader();
        let handle = thread::spawn(move || {
            (0..10_000)
                .map(|_| reader.get())
                .all(|v| v == 0.0 || v == 1.5 || v == 3.0)
        });
        for i in 0..10_000 {
            cell.set(if i % 2 == 0 { 1.5 } else { 3.0 });
        }
        assert!(handle.join().unwrap());
    }
}
