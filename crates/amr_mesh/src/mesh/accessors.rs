//! Tree-aware accessors built on the store and the codec.

use super::topology::parent_indices;
use super::{AdaptiveMesh, CellId};
use crate::scalar::Scalar;

impl<T: Scalar, const D: usize> AdaptiveMesh<T, D> {
  /// Ancestor ids of `cid` from its own level down to level 0.
  ///
  /// The first item is `cid` itself. Empty for invalid ids.
  pub fn ancestors(&self, cid: CellId) -> impl Iterator<Item = CellId> + '_ {
    let refinement_level = self.refinement_level(cid);
    let mut indices = self.indices(cid);
    (0..=refinement_level).rev().map(move |level| {
      let ancestor = self.cell_from_indices(&indices, level);
      indices = parent_indices(&indices);
      ancestor
    })
  }

  /// Value of `cid`, inherited from the nearest stored ancestor if absent.
  ///
  /// Zero when neither the cell nor any ancestor is stored.
  pub fn get_from_roots(&self, cid: CellId) -> T {
    self.value_and_level(cid).0
  }

  /// Like [`get_from_roots`](Self::get_from_roots), also reporting how many
  /// levels above `cid` the value was found (`0` = `cid` itself, `-1` =
  /// nothing stored).
  pub fn value_and_level(&self, cid: CellId) -> (T, i32) {
    for (steps_up, ancestor) in self.ancestors(cid).enumerate() {
      if let Some(&value) = self.data.get(&ancestor) {
        return (value, steps_up as i32);
      }
    }
    (T::ZERO, -1)
  }

  /// Add `value` to `cid` and a volume-scaled share to every ancestor.
  ///
  /// The ancestor `k` levels up receives `value / 2^(D*k)`, creating entries
  /// as needed. Accumulates across calls. Invalid ids are ignored.
  pub fn set_recursively(&mut self, cid: CellId, value: T) {
    let ratio = (0..D).fold(T::ONE, |acc, _| acc * T::TWO);
    let ancestors: Vec<CellId> = self.ancestors(cid).collect();

    let mut divisor = T::ONE;
    for ancestor in ancestors {
      *self.data.entry(ancestor).or_insert(T::ZERO) += value / divisor;
      divisor = divisor * ratio;
    }
  }

  /// Largest absolute stored value, zero for an empty mesh.
  ///
  /// Covers every stored cell, not only leaves.
  pub fn max_value(&self) -> T {
    self.data.values().fold(T::ZERO, |max, &value| {
      let value = value.abs();
      if value > max {
        value
      } else {
        max
      }
    })
  }

  /// Remove every cell whose value relative to [`max_value`](Self::max_value)
  /// is below `threshold`. Returns the number of removed cells.
  ///
  /// The comparison is signed: with a positive threshold, negative cells are
  /// always removed, even the one that sets the scale.
  ///
  /// A mesh whose values are all zero has no scale and is left untouched.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesh::clip_cells"))]
  pub fn clip_cells(&mut self, threshold: T) -> usize {
    let max_value = self.max_value();
    if max_value == T::ZERO {
      return 0;
    }

    // Phase 1: collect, the map is not touched while scanning
    let below_threshold: Vec<CellId> = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("find_below_threshold").entered();
      self
        .data
        .iter()
        .filter(|(_, value)| **value / max_value < threshold)
        .map(|(&cid, _)| cid)
        .collect()
    };

    // Phase 2: erase
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("erase_cells").entered();
      for cid in &below_threshold {
        self.data.remove(cid);
      }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(removed = below_threshold.len(), remaining = self.data.len(), "clipped cells");

    below_threshold.len()
  }
}

#[cfg(test)]
#[path = "accessors_test.rs"]
mod accessors_test;
