//! Fixed-size ring buffer over the most recent observations of one field.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    buf: VecDeque<f64>,
}

impl RollingWindow {
    /// Storage grows with pushes; `capacity` only bounds it.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            buf: VecDeque::new(),
        }
    }

    /// Evicts the oldest observation once full.
    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.buf.len() == self.capacity
    }

    /// Mean over exactly `capacity` observations; `None` until the window is full.
    ///
    /// Summed oldest-first on every call: bit-identical to a fresh mean of the
    /// same observations.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.buf.iter().sum::<f64>() / self.capacity as f64)
    }
}
