//! MeshConfig - construction parameters for an adaptive mesh.

use super::codec;
use crate::error::MeshError;
use crate::scalar::Scalar;

/// Refinement depth used when none is given explicitly.
pub const DEFAULT_MAXIMUM_REFINEMENT_LEVEL: i32 = 10;

/// Base grid shape, physical bounds and refinement depth of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshConfig<T: Scalar, const D: usize> {
  /// Number of level-0 cells along each axis.
  pub length: [u64; D],

  /// Physical lower corner of the level-0 grid.
  pub mins: [T; D],

  /// Physical upper corner of the level-0 grid.
  pub maxs: [T; D],

  /// Deepest refinement level a cell may reach.
  pub maximum_refinement_level: i32,
}

impl<T: Scalar, const D: usize> MeshConfig<T, D> {
  /// Config with the given base grid shape and unit bounds.
  pub fn new(length: [u64; D]) -> Self {
    Self {
      length,
      ..Self::default()
    }
  }

  pub fn with_length(mut self, length: [u64; D]) -> Self {
    self.length = length;
    self
  }

  pub fn with_bounds(mut self, mins: [T; D], maxs: [T; D]) -> Self {
    self.mins = mins;
    self.maxs = maxs;
    self
  }

  pub fn with_maximum_refinement_level(mut self, level: i32) -> Self {
    self.maximum_refinement_level = level;
    self
  }

  /// Check that the config describes an addressable mesh.
  ///
  /// Every axis must be non-empty, bounds must not be inverted and the
  /// cumulative cell count up to the maximum level must fit in a `u64`.
  pub fn validate(&self) -> Result<(), MeshError> {
    if let Some(axis) = self.length.iter().position(|&l| l == 0) {
      return Err(MeshError::ZeroLength { axis });
    }

    for axis in 0..D {
      if self.mins[axis] > self.maxs[axis] {
        return Err(MeshError::InvertedBounds { axis });
      }
    }

    if self.maximum_refinement_level < 0 {
      return Err(MeshError::RefinementLevelOutOfRange {
        level: self.maximum_refinement_level,
        maximum: codec::maximum_possible_refinement_level::<D>(&self.length),
      });
    }

    let limit = codec::maximum_possible_refinement_level::<D>(&self.length);
    if self.maximum_refinement_level > limit
      || codec::cumulative_cell_count::<D>(&self.length, self.maximum_refinement_level + 1).is_none()
    {
      return Err(MeshError::UnrepresentableLevel {
        level: self.maximum_refinement_level,
        limit,
      });
    }

    Ok(())
  }
}

impl<T: Scalar, const D: usize> Default for MeshConfig<T, D> {
  fn default() -> Self {
    Self {
      length: [1; D],
      mins: [T::ZERO; D],
      maxs: [T::ONE; D],
      maximum_refinement_level: DEFAULT_MAXIMUM_REFINEMENT_LEVEL,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
