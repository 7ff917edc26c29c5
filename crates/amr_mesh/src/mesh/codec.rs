//! Cell-ID codec - bijection between (indices, refinement level) and a flat
//! 64-bit cell id.
//!
//! Ids are unique across the whole tree. Level 0 takes the first
//! `N = length[0] * .. * length[D-1]` ids (numbering starts at 1), level 1 the
//! next `N * 2^D`, level `k` the next `N * 2^(D*k)`:
//!
//! ```text
//! | level 0: 1..=N | level 1: N+1..=N+N*2^D | level 2: ... |
//! ```
//!
//! Within a level, cells are numbered row-major with the x axis varying
//! fastest. Any id therefore encodes both its level and its position.
//!
//! All arithmetic is checked: a computation that would leave the `u64` range
//! surfaces as a sentinel, never as a wrapped id.

use super::{AdaptiveMesh, CellId, Indices, ERROR_CID, ERROR_INDEX};
use crate::error::MeshError;
use crate::scalar::Scalar;

/// `refinement_level` result for the error id or an id past `last_cid`.
pub const INVALID_CELL_LEVEL: i32 = -2;

/// `refinement_level` result when the tree is exhausted before the id is reached.
pub const EXHAUSTED_LEVEL: i32 = -1;

/// `value * 2^level`, or `None` on overflow or negative level.
#[inline]
pub(crate) fn scale_by_level(value: u64, level: i32) -> Option<u64> {
  let factor = 1u64.checked_shl(u32::try_from(level).ok()?)?;
  value.checked_mul(factor)
}

/// Number of level-0 cells.
#[inline]
pub(crate) fn base_cell_count<const D: usize>(length: &Indices<D>) -> Option<u64> {
  length.iter().try_fold(1u64, |acc, &l| acc.checked_mul(l))
}

/// Number of ids occupied by `level`: `N * 2^(D * level)`.
#[inline]
pub(crate) fn level_cell_count<const D: usize>(length: &Indices<D>, level: i32) -> Option<u64> {
  let shift = u32::try_from(level).ok()?.checked_mul(D as u32)?;
  let factor = 1u64.checked_shl(shift)?;
  base_cell_count(length)?.checked_mul(factor)
}

/// Number of ids occupied by all levels below `level`.
pub(crate) fn cumulative_cell_count<const D: usize>(length: &Indices<D>, level: i32) -> Option<u64> {
  (0..level).try_fold(0u64, |acc, l| acc.checked_add(level_cell_count(length, l)?))
}

/// Highest maximum refinement level whose cumulative id count still fits in
/// a `u64`. Evaluated in floating point; a sanity bound, not a validator.
pub(crate) fn maximum_possible_refinement_level<const D: usize>(length: &Indices<D>) -> i32 {
  let grid_length = length.iter().map(|&l| l as f64).product::<f64>();
  if grid_length < 1.0 {
    return 0;
  }

  let ratio = 2f64.powi(D as i32);
  let limit = u64::MAX as f64;
  let mut refinement_level = 0;
  let mut current_last = 0.0;
  while current_last <= limit {
    current_last += grid_length * ratio.powi(refinement_level);
    refinement_level += 1;
  }

  refinement_level - 2
}

impl<T: Scalar, const D: usize> AdaptiveMesh<T, D> {
  /// Total number of ids addressable up to the maximum refinement level.
  #[inline]
  pub fn last_cid(&self) -> CellId {
    self.last_cid
  }

  pub(crate) fn update_last_cid(&mut self) {
    self.last_cid = cumulative_cell_count(&self.length, self.maximum_refinement_level + 1)
      .unwrap_or(u64::MAX);
  }

  /// Deepest maximum refinement level this grid shape can address.
  pub fn maximum_possible_refinement_level(&self) -> i32 {
    maximum_possible_refinement_level(&self.length)
  }

  /// Grid shape at `level`: the base length scaled by `2^level` per axis.
  ///
  /// Negative levels give an empty shape; overflowing axes saturate.
  pub fn level_size(&self, level: i32) -> Indices<D> {
    let mut size = [0u64; D];
    if level < 0 {
      return size;
    }
    for (extent, &base) in size.iter_mut().zip(self.length.iter()) {
      *extent = scale_by_level(base, level).unwrap_or(u64::MAX);
    }
    size
  }

  fn encode(&self, indices: &Indices<D>, refinement_level: i32) -> Option<CellId> {
    if refinement_level < 0 || refinement_level > self.maximum_refinement_level {
      return None;
    }

    let size = self.level_size(refinement_level);
    if indices.iter().zip(size.iter()).any(|(&i, &extent)| i >= extent) {
      return None;
    }

    let mut offset = 0u64;
    let mut stride = 1u64;
    for axis in 0..D {
      offset = offset.checked_add(indices[axis].checked_mul(stride)?)?;
      stride = stride.checked_mul(size[axis])?;
    }

    cumulative_cell_count(&self.length, refinement_level)?
      .checked_add(offset)?
      .checked_add(1)
  }

  /// Encode a cell position at `refinement_level` into its id.
  ///
  /// Returns [`ERROR_CID`] if the level is negative or above the maximum, or
  /// if any index lies outside the grid at that level.
  ///
  /// Indices are bounded by [`level_size`](Self::level_size) of the requested
  /// level, not of the maximum level.
  pub fn cell_from_indices(&self, indices: &Indices<D>, refinement_level: i32) -> CellId {
    self.encode(indices, refinement_level).unwrap_or(ERROR_CID)
  }

  fn decode(&self, cid: CellId) -> Option<(Indices<D>, i32)> {
    let refinement_level = self.refinement_level(cid);
    if refinement_level < 0 {
      return None;
    }

    let mut remainder = cid
      .checked_sub(cumulative_cell_count(&self.length, refinement_level)?)?
      .checked_sub(1)?;
    let size = self.level_size(refinement_level);

    let mut indices = [0u64; D];
    for axis in 0..D {
      indices[axis] = remainder % size[axis];
      remainder /= size[axis];
    }

    Some((indices, refinement_level))
  }

  /// Decode an id into its position at its own refinement level.
  ///
  /// Returns `[ERROR_INDEX; D]` for the error id or an id past
  /// [`last_cid`](Self::last_cid).
  pub fn indices(&self, cid: CellId) -> Indices<D> {
    self
      .decode(cid)
      .map(|(indices, _)| indices)
      .unwrap_or([ERROR_INDEX; D])
  }

  /// Refinement level encoded in `cid`.
  ///
  /// Returns [`INVALID_CELL_LEVEL`] for the error id or an id past
  /// [`last_cid`](Self::last_cid), [`EXHAUSTED_LEVEL`] if the id would lie
  /// beyond the maximum refinement level.
  pub fn refinement_level(&self, cid: CellId) -> i32 {
    if cid == ERROR_CID || cid > self.last_cid {
      return INVALID_CELL_LEVEL;
    }

    let mut refinement_level = 0;
    let mut current_last = 0u64;
    while refinement_level <= self.maximum_refinement_level {
      let level_count = level_cell_count(&self.length, refinement_level).unwrap_or(u64::MAX);
      current_last = current_last.saturating_add(level_count);
      if cid <= current_last {
        break;
      }
      refinement_level += 1;
    }

    if refinement_level > self.maximum_refinement_level {
      return EXHAUSTED_LEVEL;
    }

    refinement_level
  }

  /// Checked [`cell_from_indices`](Self::cell_from_indices).
  pub fn try_cell_from_indices(
    &self,
    indices: &Indices<D>,
    refinement_level: i32,
  ) -> Result<CellId, MeshError> {
    if refinement_level < 0 || refinement_level > self.maximum_refinement_level {
      return Err(MeshError::RefinementLevelOutOfRange {
        level: refinement_level,
        maximum: self.maximum_refinement_level,
      });
    }

    let size = self.level_size(refinement_level);
    for axis in 0..D {
      if indices[axis] >= size[axis] {
        return Err(MeshError::IndexOutOfBounds {
          axis,
          index: indices[axis],
          extent: size[axis],
        });
      }
    }

    self
      .encode(indices, refinement_level)
      .ok_or(MeshError::UnrepresentableLevel {
        level: refinement_level,
        limit: self.maximum_possible_refinement_level(),
      })
  }

  /// Checked [`indices`](Self::indices), also returning the level.
  pub fn try_indices(&self, cid: CellId) -> Result<(Indices<D>, i32), MeshError> {
    self.decode(cid).ok_or(MeshError::InvalidCellId(cid))
  }

  /// Checked [`refinement_level`](Self::refinement_level).
  pub fn try_refinement_level(&self, cid: CellId) -> Result<i32, MeshError> {
    match self.refinement_level(cid) {
      INVALID_CELL_LEVEL => Err(MeshError::InvalidCellId(cid)),
      EXHAUSTED_LEVEL => Err(MeshError::RefinementLevelOutOfRange {
        level: self.maximum_refinement_level + 1,
        maximum: self.maximum_refinement_level,
      }),
      level => Ok(level),
    }
  }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;
