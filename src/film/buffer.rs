// src/film/buffer.rs

//! Row-major 2D storage and the weighted pixel types the film accumulates into.

use crate::color::Rgba;

/// A color sum plus the total filter weight that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedPixel {
    pub col: Rgba,
    pub weight: f32,
}

impl WeightedPixel {
    pub fn add(&mut self, col: Rgba, weight: f32) {
        self.col += col * weight;
        self.weight += weight;
    }

    /// Weighted average, or transparent black when nothing was added.
    pub fn normalized(&self) -> Rgba {
        if self.weight > 0.0 {
            self.col / self.weight
        } else {
            Rgba::ZERO
        }
    }
}

/// Single-channel counterpart of [`WeightedPixel`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrayPixel {
    pub val: f32,
    pub weight: f32,
}

impl GrayPixel {
    pub fn add(&mut self, val: f32, weight: f32) {
        self.val += val * weight;
        self.weight += weight;
    }

    pub fn normalized(&self) -> f32 {
        if self.weight > 0.0 {
            self.val / self.weight
        } else {
            0.0
        }
    }
}

/// A `width × height` grid stored row by row.
///
/// Out-of-range coordinates are never a panic: reads return `None` and writes
/// report `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2D<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Clone + Default> Buffer2D<T> {
    /// Creates a buffer filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Buffer2D {
            data: vec![T::default(); width * height],
            width,
            height,
        }
    }

    /// Resets every cell to `T::default()`.
    pub fn clear(&mut self) {
        self.data.fill(T::default());
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }
}

impl<T> Buffer2D<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index(x, y).map(move |i| &mut self.data[i])
    }

    /// Cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
