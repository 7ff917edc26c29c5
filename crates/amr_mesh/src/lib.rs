//! amr_mesh - sparse hierarchical adaptive mesh for velocity-space solvers
//!
//! This crate provides an octree-like, hash-indexed, multi-resolution grid.
//! Every cell of every refinement level has a unique 64-bit id; the mesh
//! stores values only for the cells that were written and reconstructs the
//! tree structure (parents, children, siblings) from ids on demand.
//!
//! # Features
//!
//! - **Cell-ID codec**: `(indices, level) <-> u64` with level ranges laid out
//!   coarse to fine, so sorting ids sorts by level
//! - **Ancestor inheritance**: unset cells read the value of the nearest
//!   stored coarser cell
//! - **Conservative deposits**: `set_recursively` spreads a quantity over
//!   the whole ancestor chain with volume-ratio weights
//! - **Tree merge**: `+=` / `-=` between meshes of different sparsity
//! - **Parallel fan-out**: rayon helpers over one mesh per spatial cell
//!
//! # Example
//!
//! ```
//! use amr_mesh::{AdaptiveMesh, MeshConfig};
//!
//! let config = MeshConfig::new([2, 2, 2])
//!   .with_bounds([0.0; 3], [1.0; 3])
//!   .with_maximum_refinement_level(2);
//! let mut mesh = AdaptiveMesh::<f64, 3>::new(config);
//!
//! let root = mesh.cell_from_indices(&[0, 0, 0], 0);
//! mesh.set(root, 4.0);
//!
//! for child in mesh.children(root) {
//!   assert_eq!(mesh.get_from_roots(child), 4.0);
//! }
//! ```

pub mod error;
pub mod mesh;
pub mod metrics;
pub mod scalar;
pub mod stats;
pub mod tasker;

// Re-export commonly used items
pub use error::MeshError;
pub use mesh::{
  AdaptiveMesh, AdaptiveMesh3, CellId, CombineOp, DAabb3, Indices, MeshConfig, ERROR_CID,
  ERROR_INDEX, EXHAUSTED_LEVEL, INVALID_CELL_LEVEL,
};
pub use scalar::Scalar;
pub use stats::MeshStats;
pub use tasker::Tasker;
