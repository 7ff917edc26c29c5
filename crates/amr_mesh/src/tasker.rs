//! Parallel fan-out over many meshes using rayon.
//!
//! A simulation holds one mesh per spatial cell. Work on different meshes is
//! independent, so each mesh is handed to exactly one rayon task via
//! `par_iter_mut`; the borrow checker guarantees no two tasks see the same
//! mesh. The mesh itself never locks.
//!
//! # Usage
//!
//! ```ignore
//! let mut tasker = Tasker::new();
//!
//! // Solver step over every spatial cell
//! tasker.step(&mut meshes, |cell, mesh| solver.advance(cell, mesh));
//!
//! // Drop negligible cells everywhere
//! let removed = tasker.clip(&mut meshes, 1.0e-3);
//! ```

use rayon::prelude::*;
use web_time::Instant;

use crate::mesh::{AdaptiveMesh, CombineOp};
use crate::metrics::MeshMetrics;
use crate::scalar::Scalar;
use crate::stats::MeshStats;

/// Run `work(index, mesh)` on every mesh in parallel.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tasker::par_for_each"))]
pub fn par_for_each<T, const D: usize, F>(meshes: &mut [AdaptiveMesh<T, D>], work: F)
where
  T: Scalar,
  F: Fn(usize, &mut AdaptiveMesh<T, D>) + Sync + Send,
{
  meshes
    .par_iter_mut()
    .enumerate()
    .for_each(|(index, mesh)| work(index, mesh));
}

/// [`clip_cells`](AdaptiveMesh::clip_cells) on every mesh. Returns the total
/// number of removed cells.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tasker::par_clip"))]
pub fn par_clip<T: Scalar, const D: usize>(meshes: &mut [AdaptiveMesh<T, D>], threshold: T) -> usize {
  meshes
    .par_iter_mut()
    .map(|mesh| mesh.clip_cells(threshold))
    .sum()
}

/// Merge `sources[i]` into `targets[i]` for every index, in parallel.
///
/// Pairs beyond the shorter slice are left untouched.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tasker::par_merge"))]
pub fn par_merge<T: Scalar, const D: usize>(
  targets: &mut [AdaptiveMesh<T, D>],
  sources: &[AdaptiveMesh<T, D>],
  op: CombineOp,
) {
  targets
    .par_iter_mut()
    .zip(sources.par_iter())
    .for_each(|(target, source)| {
      target.merge(source, op);
    });
}

/// Statistics of every mesh, in slice order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tasker::par_stats"))]
pub fn par_stats<T: Scalar, const D: usize>(meshes: &[AdaptiveMesh<T, D>]) -> Vec<MeshStats<T>> {
  meshes.par_iter().map(|mesh| MeshStats::from_mesh(mesh)).collect()
}

/// Parallel driver that times each bulk operation into [`MeshMetrics`].
#[derive(Debug, Default)]
pub struct Tasker {
  pub metrics: MeshMetrics,
}

impl Tasker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of worker threads in rayon's pool.
  pub fn num_threads(&self) -> usize {
    rayon::current_num_threads()
  }

  /// Timed [`par_for_each`].
  pub fn step<T, const D: usize, F>(&mut self, meshes: &mut [AdaptiveMesh<T, D>], work: F)
  where
    T: Scalar,
    F: Fn(usize, &mut AdaptiveMesh<T, D>) + Sync + Send,
  {
    let start = Instant::now();
    par_for_each(meshes, work);
    self.metrics.record_step_timing(elapsed_us(start));
  }

  /// Timed [`par_clip`].
  pub fn clip<T: Scalar, const D: usize>(&mut self, meshes: &mut [AdaptiveMesh<T, D>], threshold: T) -> usize {
    let start = Instant::now();
    let removed = par_clip(meshes, threshold);
    self.metrics.record_clip(elapsed_us(start), removed);
    removed
  }

  /// Timed [`par_merge`].
  pub fn merge<T: Scalar, const D: usize>(
    &mut self,
    targets: &mut [AdaptiveMesh<T, D>],
    sources: &[AdaptiveMesh<T, D>],
    op: CombineOp,
  ) {
    let start = Instant::now();
    par_merge(targets, sources, op);
    self.metrics.record_merge_timing(elapsed_us(start));
  }

  /// Collect [`par_stats`] and fold them into the metrics snapshot.
  pub fn snapshot<T: Scalar, const D: usize>(&mut self, meshes: &[AdaptiveMesh<T, D>]) -> Vec<MeshStats<T>> {
    let stats = par_stats(meshes);
    self.metrics.update_from_stats(&stats);
    stats
  }
}

fn elapsed_us(start: Instant) -> u64 {
  start.elapsed().as_micros().min(u64::MAX as u128) as u64
}

#[cfg(test)]
#[path = "tasker_test.rs"]
mod tasker_test;
