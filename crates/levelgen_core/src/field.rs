//! Dense per-tile scalar fields.
//!
//! Difficulty and visibility analyses write into a [`ScalarField`]
//! kept separate from the tile grid, so fields can be recomputed
//! independently without mutating level state.

use serde::{Deserialize, Serialize};

/// Dense 2D array of per-tile scalar values in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl ScalarField {
    /// Create an all-zero field.
    #[must_use]
    pub fn zeros(width: u32, height: u32) -> Self {
        let count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            values: vec![0.0; count],
        }
    }

    /// Field width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Field height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn coords_to_index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Value at coordinates; `0.0` for out-of-bounds reads.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.coords_to_index(x, y)
            .map_or(0.0, |index| self.values[index])
    }

    /// Set the value at coordinates.
    /// Returns `false` if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: f32) -> bool {
        match self.coords_to_index(x, y) {
            Some(index) => {
                self.values[index] = value;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to the value at coordinates, ignoring out-of-bounds
    /// coordinates.
    pub fn add(&mut self, x: u32, y: u32, delta: f32) {
        if let Some(index) = self.coords_to_index(x, y) {
            self.values[index] += delta;
        }
    }

    /// Maximum value in the field.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0_f32, f32::max)
    }

    /// Divide every value by the field maximum, mapping the field into
    /// `[0, 1]`. An all-zero field stays all-zero.
    pub fn max_normalize(&mut self) {
        let max = self.max_value();
        if max > 0.0 {
            for value in &mut self.values {
                *value /= max;
            }
        }
    }

    /// Iterate over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_field() {
        let field = ScalarField::zeros(4, 3);
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 3);
        assert_eq!(field.max_value(), 0.0);
    }

    #[test]
    fn test_set_get_and_add() {
        let mut field = ScalarField::zeros(4, 4);
        assert!(field.set(1, 2, 0.5));
        field.add(1, 2, 0.25);
        assert!((field.get(1, 2) - 0.75).abs() < f32::EPSILON);

        // Out of bounds is silent for add, zero for get.
        field.add(9, 9, 1.0);
        assert_eq!(field.get(9, 9), 0.0);
        assert!(!field.set(4, 0, 1.0));
    }

    #[test]
    fn test_max_normalize() {
        let mut field = ScalarField::zeros(2, 2);
        field.set(0, 0, 2.0);
        field.set(1, 1, 4.0);
        field.max_normalize();

        assert!((field.get(0, 0) - 0.5).abs() < f32::EPSILON);
        assert!((field.get(1, 1) - 1.0).abs() < f32::EPSILON);
        assert!(field.values().all(|v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_normalize_all_zero_stays_zero() {
        let mut field = ScalarField::zeros(3, 3);
        field.max_normalize();
        assert!(field.values().all(|v| v == 0.0));
    }
}
