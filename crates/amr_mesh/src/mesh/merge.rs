//! Merge operator - elementwise combination of two meshes with different
//! sparsity patterns.
//!
//! Cells of `rhs` are visited in ascending id order, so parents come before
//! their children. A cell missing from `self` gets its pre-merge value
//! reconstructed from the parents in both trees:
//!
//! ```text
//! inferred = combine(self[parent], -rhs[parent])   // undo the parent merge
//! self[cid] = combine(inferred, rhs[cid])
//! ```
//!
//! Undoing `combine` by feeding it the negated operand only works for
//! addition and subtraction. [`CombineOp`] restricts merges to those two;
//! [`AdaptiveMesh::apply_elementwise`] accepts any closure and leaves the
//! precondition to the caller.

use std::ops::{AddAssign, SubAssign};

use super::AdaptiveMesh;
use crate::scalar::Scalar;

/// Combine functions for which the merge is sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombineOp {
  /// `a + b`
  Add,
  /// `a - b`
  Sub,
}

impl CombineOp {
  #[inline]
  pub fn apply<T: Scalar>(self, a: T, b: T) -> T {
    match self {
      CombineOp::Add => a + b,
      CombineOp::Sub => a - b,
    }
  }
}

impl<T: Scalar, const D: usize> AdaptiveMesh<T, D> {
  /// Apply `combine(self_i, rhs_i)` to every cell stored in `rhs`.
  ///
  /// `combine` must be an additive group operation (`+` or `-`); anything
  /// else silently breaks the parent reconstruction. Both meshes must share
  /// the same grid shape and maximum level.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesh::apply_elementwise"))]
  pub fn apply_elementwise<F>(&mut self, rhs: &Self, combine: F) -> &mut Self
  where
    F: Fn(T, T) -> T,
  {
    debug_assert_eq!(self.length, rhs.length, "merged meshes must share the grid shape");
    debug_assert_eq!(
      self.maximum_refinement_level, rhs.maximum_refinement_level,
      "merged meshes must share the maximum refinement level"
    );

    for cid in rhs.cells(true) {
      let rhs_value = rhs.get(cid);

      if let Some(value) = self.data.get_mut(&cid) {
        *value = combine(*value, rhs_value);
        continue;
      }

      let value = match self.refinement_level(cid) {
        0 => combine(T::ZERO, rhs_value),
        level if level > 0 => {
          let parent = rhs.parent(cid);
          let rhs_parent = rhs.get(parent);
          let tree_parent = self.get(parent);
          let inferred = combine(tree_parent, -rhs_parent);
          combine(inferred, rhs_value)
        }
        // not addressable in this mesh
        _ => continue,
      };
      self.data.insert(cid, value);
    }

    self
  }

  /// Merge `rhs` into `self` with one of the sound combine functions.
  pub fn merge(&mut self, rhs: &Self, op: CombineOp) -> &mut Self {
    self.apply_elementwise(rhs, |a, b| op.apply(a, b))
  }
}

impl<T: Scalar, const D: usize> AddAssign<&AdaptiveMesh<T, D>> for AdaptiveMesh<T, D> {
  fn add_assign(&mut self, rhs: &AdaptiveMesh<T, D>) {
    self.merge(rhs, CombineOp::Add);
  }
}

impl<T: Scalar, const D: usize> SubAssign<&AdaptiveMesh<T, D>> for AdaptiveMesh<T, D> {
  fn sub_assign(&mut self, rhs: &AdaptiveMesh<T, D>) {
    self.merge(rhs, CombineOp::Sub);
  }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod merge_test;
