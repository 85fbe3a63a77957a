//! Simulated asset paths.

use std::ops::{Index, IndexMut};

/// Asset levels on the points of a [`TimeGrid`](super::TimeGrid).
///
/// A path buffer is allocated once per simulation loop and overwritten for
/// every trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    values: Vec<f64>,
}

impl Path {
    /// Zero-filled path with `len` points.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Path holding the given values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the path has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Initial level.
    #[inline]
    pub fn front(&self) -> f64 {
        self.values[0]
    }

    /// Terminal level.
    #[inline]
    pub fn back(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// All levels.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable view of all levels.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl Index<usize> for Path {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl IndexMut<usize> for Path {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }
}
