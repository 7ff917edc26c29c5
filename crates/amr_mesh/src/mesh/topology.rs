//! Topology navigation - parent, children and siblings computed from ids.
//!
//! Nothing here reads stored values except [`AdaptiveMesh::is_leaf`].

use smallvec::SmallVec;

use super::{AdaptiveMesh, CellId, Indices, ERROR_CID};
use crate::scalar::Scalar;

/// Child ids of one cell. Inline for up to three dimensions.
pub type Children = SmallVec<[CellId; 8]>;

/// Indices of the parent cell: every axis halved.
#[inline]
pub fn parent_indices<const D: usize>(indices: &Indices<D>) -> Indices<D> {
  indices.map(|i| i / 2)
}

/// Indices of the level-0 ancestor of a cell at `refinement_level`.
///
/// Divides by `2^refinement_level` in one step. Levels `<= 1` fall back to
/// [`parent_indices`], which agrees with the direct division at level 1.
#[inline]
pub fn level_0_parent_indices<const D: usize>(indices: &Indices<D>, refinement_level: i32) -> Indices<D> {
  if refinement_level <= 1 {
    return parent_indices(indices);
  }
  let shift = refinement_level.min(63) as u32;
  indices.map(|i| i >> shift)
}

impl<T: Scalar, const D: usize> AdaptiveMesh<T, D> {
  /// Id of the enclosing cell one level coarser.
  ///
  /// Level-0 cells are their own parent; invalid ids give [`ERROR_CID`].
  pub fn parent(&self, cid: CellId) -> CellId {
    let refinement_level = self.refinement_level(cid);
    if refinement_level < 0 {
      return ERROR_CID;
    }
    if refinement_level == 0 {
      return cid;
    }

    let indices = self.indices(cid);
    self.cell_from_indices(&parent_indices(&indices), refinement_level - 1)
  }

  /// Id of the level-0 cell containing `cid`.
  pub fn level_0_parent(&self, cid: CellId) -> CellId {
    let refinement_level = self.refinement_level(cid);
    if refinement_level < 0 {
      return ERROR_CID;
    }
    if refinement_level == 0 {
      return cid;
    }

    let indices = self.indices(cid);
    self.cell_from_indices(&level_0_parent_indices(&indices, refinement_level), 0)
  }

  /// The `2^D` cells one level finer inside `cid`.
  ///
  /// Ordered with the last axis outermost and x innermost. Empty for the
  /// error id, invalid ids and cells already at the maximum level.
  pub fn children(&self, cid: CellId) -> Children {
    let mut children = Children::new();
    if cid == ERROR_CID {
      return children;
    }

    let refinement_level = self.refinement_level(cid);
    if refinement_level < 0 || refinement_level >= self.maximum_refinement_level {
      return children;
    }

    let indices = self.indices(cid);
    children.reserve(1 << D);
    for octant in 0..(1usize << D) {
      let mut child = [0u64; D];
      for axis in 0..D {
        child[axis] = indices[axis] * 2 + ((octant >> axis) & 1) as u64;
      }
      children.push(self.cell_from_indices(&child, refinement_level + 1));
    }

    children
  }

  /// Children of the parent of `cid`, including `cid` itself.
  ///
  /// A level-0 cell is its own parent, so this yields its children.
  pub fn siblings(&self, cid: CellId) -> Children {
    self.children(self.parent(cid))
  }

  /// Whether no immediate child of `cid` is stored.
  ///
  /// Only one level is inspected: a cell whose grandchildren are stored but
  /// whose children are not still counts as a leaf. Trees built through
  /// refinement are connected, so this holds for them.
  pub fn is_leaf(&self, cid: CellId) -> bool {
    !self.children(cid).iter().any(|&child| self.exists(child))
  }

  /// Stored cells that are leaves, optionally in ascending id order.
  pub fn leaf_cells(&self, sorted: bool) -> Vec<CellId> {
    self
      .cells(sorted)
      .into_iter()
      .filter(|&cid| self.is_leaf(cid))
      .collect()
  }
}

#[cfg(test)]
#[path = "topology_test.rs"]
mod topology_test;
