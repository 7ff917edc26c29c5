//! Geometry mapping - physical coordinates of cells.
//!
//! `mins`/`maxs` describe the level-0 grid. Grid points sit at cell centers,
//! so the level-0 spacing divides the extent by `length - 1`:
//!
//! ```text
//! cell_length(L)   = (max - min) / max(1, length - 1) / 2^L
//! cell_center(i,L) = min + i * cell_length(L) + cell_length(L) / 2
//! ```

use super::{AdaptiveMesh, CellId, Indices, ERROR_CID};
use crate::scalar::Scalar;

impl<T: Scalar, const D: usize> AdaptiveMesh<T, D> {
  /// Physical lower corner.
  #[inline]
  pub fn mins(&self) -> [T; D] {
    self.mins
  }

  /// Physical upper corner.
  #[inline]
  pub fn maxs(&self) -> [T; D] {
    self.maxs
  }

  pub fn set_min(&mut self, mins: [T; D]) {
    self.mins = mins;
  }

  pub fn set_max(&mut self, maxs: [T; D]) {
    self.maxs = maxs;
  }

  /// Physical cell length per axis at level 0.
  ///
  /// A single-cell axis spans the whole extent (no division by zero).
  pub fn level_0_cell_length(&self) -> [T; D] {
    let mut cell_length = [T::ZERO; D];
    for axis in 0..D {
      let divisions = T::from_u64(self.length[axis].saturating_sub(1));
      let divisions = if divisions > T::ONE { divisions } else { T::ONE };
      cell_length[axis] = (self.maxs[axis] - self.mins[axis]) / divisions;
    }
    cell_length
  }

  /// Physical cell length per axis at `refinement_level`.
  pub fn cell_length(&self, refinement_level: i32) -> [T; D] {
    let mut cell_length = self.level_0_cell_length();
    for _ in 0..refinement_level.max(0) {
      for value in cell_length.iter_mut() {
        *value = *value / T::TWO;
      }
    }
    cell_length
  }

  /// Physical center of the cell at `indices` on `refinement_level`.
  ///
  /// All components are NaN if the level or any index is out of range.
  pub fn cell_center(&self, indices: &Indices<D>, refinement_level: i32) -> [T; D] {
    let error_value = [T::nan(); D];
    if refinement_level < 0 || refinement_level > self.maximum_refinement_level {
      return error_value;
    }

    let max_index = self.level_size(refinement_level);
    if indices.iter().zip(max_index.iter()).any(|(&i, &extent)| i >= extent) {
      return error_value;
    }

    let index_scaling_factor = T::from_u64(1u64 << refinement_level);
    let coordinate_scaling_factor = T::ONE / index_scaling_factor;
    let cell_offset_scaling_factor = coordinate_scaling_factor / T::TWO;
    let level_0_cell_length = self.level_0_cell_length();

    let mut center = [T::ZERO; D];
    for axis in 0..D {
      center[axis] = self.mins[axis]
        + T::from_u64(indices[axis]) * level_0_cell_length[axis] * coordinate_scaling_factor
        + level_0_cell_length[axis] * cell_offset_scaling_factor;
    }
    center
  }

  /// Physical center of the cell `cid`, NaN for invalid ids.
  pub fn cell_center_of(&self, cid: CellId) -> [T; D] {
    match self.try_indices(cid) {
      Ok((indices, refinement_level)) => self.cell_center(&indices, refinement_level),
      Err(_) => [T::nan(); D],
    }
  }

  /// Id of the cell on `refinement_level` whose extent contains `point`.
  ///
  /// Cell `i` spans `[min + i * len, min + (i + 1) * len)` per axis. Points
  /// outside the grid give [`ERROR_CID`].
  pub fn cell_at_point(&self, point: &[T; D], refinement_level: i32) -> CellId {
    if refinement_level < 0 || refinement_level > self.maximum_refinement_level {
      return ERROR_CID;
    }

    let cell_length = self.cell_length(refinement_level);
    let mut indices = [0u64; D];
    for axis in 0..D {
      let offset = (point[axis] - self.mins[axis]) / cell_length[axis];
      match offset.floor_to_u64() {
        Some(index) => indices[axis] = index,
        None => return ERROR_CID,
      }
    }

    self.cell_from_indices(&indices, refinement_level)
  }
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;
