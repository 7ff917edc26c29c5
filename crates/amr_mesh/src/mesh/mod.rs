//! Sparse hierarchical adaptive mesh.
//!
//! The octree is implicit: no node objects or pointers exist. Every cell of
//! every refinement level has a unique 64-bit id (see [`codec`]), and the
//! mesh only stores a hash map from id to value. Parent/child/sibling
//! relationships are recomputed from the id on demand.
//!
//! # Refinement convention
//!
//! Level 0 = coarsest grid (`length` cells per axis), each level halves the
//! cell size per axis:
//!
//! ```text
//! cells per axis at level L = length * 2^L
//! cell length at level L    = level-0 cell length / 2^L
//! ```
//!
//! # Module Structure
//!
//! - [`codec`]: id <-> (indices, level) bijection
//! - store (this file): sparse id -> value map
//! - [`topology`]: parent, children, siblings, leaf test
//! - [`geometry`]: physical coordinates of cells
//! - [`accessors`]: ancestor-aware reads and writes, clipping
//! - [`merge`]: elementwise combination of two meshes
//! - [`config`]: construction parameters
//! - [`bounds`]: glam bounding boxes for `f64` 3D meshes

pub mod accessors;
pub mod bounds;
pub mod codec;
pub mod config;
pub mod geometry;
pub mod merge;
pub mod topology;

use std::collections::HashMap;

pub use bounds::DAabb3;
pub use codec::{EXHAUSTED_LEVEL, INVALID_CELL_LEVEL};
pub use config::{MeshConfig, DEFAULT_MAXIMUM_REFINEMENT_LEVEL};
pub use merge::CombineOp;

use crate::error::MeshError;
use crate::scalar::Scalar;

/// Flat cell identifier, unique across all refinement levels.
pub type CellId = u64;

/// Position of a cell within its own refinement level's grid.
pub type Indices<const D: usize> = [u64; D];

/// Reserved id signalling an invalid cell.
pub const ERROR_CID: CellId = 0;

/// Index component returned when decoding an invalid id.
pub const ERROR_INDEX: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// N-dimensional sparse adaptive mesh storing one `T` per cell.
///
/// A missing key means "no explicit value", not zero: ancestor-aware reads
/// ([`get_from_roots`](Self::get_from_roots)) fall back to the nearest stored
/// coarser cell.
///
/// The mesh has no internal synchronisation. Each instance is meant to be
/// owned by one worker at a time (see [`tasker`](crate::tasker)).
#[derive(Clone, Debug)]
pub struct AdaptiveMesh<T: Scalar, const D: usize> {
  data: HashMap<CellId, T>,
  length: Indices<D>,
  mins: [T; D],
  maxs: [T; D],
  maximum_refinement_level: i32,
  last_cid: CellId,
}

/// Three-dimensional mesh, the shape used by the velocity-space solvers.
pub type AdaptiveMesh3<T> = AdaptiveMesh<T, 3>;

impl<T: Scalar, const D: usize> AdaptiveMesh<T, D> {
  /// Create an empty mesh from `config`.
  ///
  /// Debug-asserts that the config validates; use [`try_new`](Self::try_new)
  /// for untrusted input.
  pub fn new(config: MeshConfig<T, D>) -> Self {
    debug_assert!(config.validate().is_ok(), "invalid mesh config: {config:?}");
    let mut mesh = Self {
      data: HashMap::new(),
      length: config.length,
      mins: config.mins,
      maxs: config.maxs,
      maximum_refinement_level: config.maximum_refinement_level.max(0),
      last_cid: 0,
    };
    mesh.update_last_cid();
    mesh
  }

  /// Create an empty mesh, rejecting configs that cannot be addressed.
  pub fn try_new(config: MeshConfig<T, D>) -> Result<Self, MeshError> {
    config.validate()?;
    Ok(Self::new(config))
  }

  /// Current construction parameters.
  pub fn config(&self) -> MeshConfig<T, D> {
    MeshConfig {
      length: self.length,
      mins: self.mins,
      maxs: self.maxs,
      maximum_refinement_level: self.maximum_refinement_level,
    }
  }

  /// Level-0 grid shape.
  #[inline]
  pub fn length(&self) -> Indices<D> {
    self.length
  }

  /// Change the level-0 grid shape. Stored ids are not remapped.
  pub fn resize(&mut self, length: Indices<D>) {
    self.length = length;
    self.update_last_cid();
  }

  #[inline]
  pub fn maximum_refinement_level(&self) -> i32 {
    self.maximum_refinement_level
  }

  /// Set the deepest refinement level.
  ///
  /// Returns `false` (and leaves the mesh untouched) for negative levels or
  /// levels whose ids would not fit in 64 bits.
  pub fn set_maximum_refinement_level(&mut self, refinement_level: i32) -> bool {
    if refinement_level < 0 || refinement_level > self.maximum_possible_refinement_level() {
      return false;
    }
    self.maximum_refinement_level = refinement_level;
    self.update_last_cid();
    true
  }

  // ---------------------------------------------------------------------------
  // Sparse store
  // ---------------------------------------------------------------------------

  /// Stored value of `cid`, or zero if absent.
  #[inline]
  pub fn get(&self, cid: CellId) -> T {
    self.data.get(&cid).copied().unwrap_or(T::ZERO)
  }

  /// Insert or overwrite the value of `cid`.
  ///
  /// The error id is never stored.
  #[inline]
  pub fn set(&mut self, cid: CellId, value: T) {
    if cid == ERROR_CID {
      return;
    }
    self.data.insert(cid, value);
  }

  /// Whether `cid` has an explicitly stored value.
  #[inline]
  pub fn exists(&self, cid: CellId) -> bool {
    self.data.contains_key(&cid)
  }

  /// Remove `cid`, returning its value if it was stored.
  #[inline]
  pub fn erase(&mut self, cid: CellId) -> Option<T> {
    self.data.remove(&cid)
  }

  /// Every stored id; ascending when `sorted` (which is also coarse-to-fine).
  pub fn cells(&self, sorted: bool) -> Vec<CellId> {
    let mut cells: Vec<CellId> = self.data.keys().copied().collect();
    if sorted {
      cells.sort_unstable();
    }
    cells
  }

  /// Number of stored cells.
  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Iterate over stored `(id, value)` pairs in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (CellId, T)> + '_ {
    self.data.iter().map(|(&cid, &value)| (cid, value))
  }

  /// Drop every stored value.
  pub fn clear(&mut self) {
    self.data.clear();
  }

  /// Value at `indices` on `refinement_level`, zero if absent or invalid.
  pub fn get_at(&self, indices: &Indices<D>, refinement_level: i32) -> T {
    self.get(self.cell_from_indices(indices, refinement_level))
  }

  /// Store `value` at `indices` on `refinement_level`.
  ///
  /// Returns the id written to, or [`ERROR_CID`] if the position is invalid.
  pub fn set_at(&mut self, indices: &Indices<D>, refinement_level: i32, value: T) -> CellId {
    let cid = self.cell_from_indices(indices, refinement_level);
    self.set(cid, value);
    cid
  }
}

impl<T: Scalar, const D: usize> Default for AdaptiveMesh<T, D> {
  fn default() -> Self {
    Self::new(MeshConfig::default())
  }
}
