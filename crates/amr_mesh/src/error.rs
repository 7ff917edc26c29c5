//! Error type for the checked mesh API.
//!
//! The core codec reports failures through sentinel values
//! ([`ERROR_CID`](crate::ERROR_CID), [`ERROR_INDEX`](crate::ERROR_INDEX),
//! negative refinement levels). The `try_*` variants translate those into
//! [`MeshError`] for callers that prefer `?`.

use thiserror::Error;

use crate::mesh::CellId;

/// Failure of a checked mesh operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeshError {
  /// Cell id is the error sentinel or past the last addressable id.
  #[error("cell id {0} is not addressable by this mesh")]
  InvalidCellId(CellId),

  /// An index component lies outside the grid at the requested level.
  #[error("index {index} on axis {axis} is outside the level extent {extent}")]
  IndexOutOfBounds { axis: usize, index: u64, extent: u64 },

  /// Refinement level is negative or above the configured maximum.
  #[error("refinement level {level} is outside 0..={maximum}")]
  RefinementLevelOutOfRange { level: i32, maximum: i32 },

  /// Base grid has an empty axis.
  #[error("grid length on axis {axis} is zero")]
  ZeroLength { axis: usize },

  /// Physical bounds have `min > max` on an axis.
  #[error("bounds on axis {axis} are inverted (min > max)")]
  InvertedBounds { axis: usize },

  /// Cumulative cell count at this level would overflow 64-bit ids.
  #[error("refinement level {level} overflows 64-bit cell ids (limit {limit})")]
  UnrepresentableLevel { level: i32, limit: i32 },
}
