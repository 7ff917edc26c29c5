//! Summary statistics of a single mesh.

use crate::mesh::AdaptiveMesh;
use crate::scalar::Scalar;

/// Snapshot of how a mesh's cells are distributed over refinement levels.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshStats<T> {
  /// Stored cells per refinement level (index = level).
  pub cells_per_level: Vec<usize>,
  /// Stored cells with no stored child.
  pub leaf_cells: usize,
  /// Deepest level holding a stored cell, `None` if the mesh is empty.
  pub deepest_level: Option<i32>,
  /// Largest absolute stored value.
  pub max_value: T,
}

impl<T: Scalar> MeshStats<T> {
  /// Collect statistics from `mesh`.
  pub fn from_mesh<const D: usize>(mesh: &AdaptiveMesh<T, D>) -> Self {
    let levels = mesh.maximum_refinement_level().max(0) as usize + 1;
    let mut cells_per_level = vec![0usize; levels];
    let mut leaf_cells = 0;
    let mut deepest_level = None;

    for (cid, _) in mesh.iter() {
      let level = mesh.refinement_level(cid);
      if level < 0 {
        continue;
      }
      cells_per_level[level as usize] += 1;
      deepest_level = deepest_level.max(Some(level));
      if mesh.is_leaf(cid) {
        leaf_cells += 1;
      }
    }

    Self {
      cells_per_level,
      leaf_cells,
      deepest_level,
      max_value: mesh.max_value(),
    }
  }

  /// Total number of stored cells.
  pub fn total_cells(&self) -> usize {
    self.cells_per_level.iter().sum()
  }
}
