//! Metrics collection for mesh workloads.
//!
//! Compiled in with the `metrics` feature and switchable at runtime through
//! [`COLLECT_METRICS`]. Without the feature every `record_*` call is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! let mut tasker = Tasker::new();
//! tasker.merge(&mut meshes, &sources, CombineOp::Add);
//! tasker.snapshot(&meshes);
//!
//! println!("{} cells, merge {:.1} us", tasker.metrics.total_cells(), tasker.metrics.avg_merge_timing_us());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::stats::MeshStats;

/// Runtime toggle, only consulted when the `metrics` feature is enabled.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Whether `record_*` calls currently store anything.
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Last `capacity` timings in microseconds, oldest first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
  timings: VecDeque<u64>,
  capacity: usize,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      timings: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Append a timing, dropping the oldest once full.
  pub fn push(&mut self, timing_us: u64) {
    if self.timings.len() >= self.capacity {
      self.timings.pop_front();
    }
    self.timings.push_back(timing_us);
  }

  pub fn len(&self) -> usize {
    self.timings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.timings.is_empty()
  }

  pub fn clear(&mut self) {
    self.timings.clear();
  }

  /// Mean of the stored timings, zero when empty.
  pub fn average(&self) -> f64 {
    if self.timings.is_empty() {
      return 0.0;
    }
    self.timings.iter().sum::<u64>() as f64 / self.timings.len() as f64
  }
}

impl Default for RollingWindow {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Level distribution and timings accumulated over solver steps.
#[derive(Debug, Clone, Default)]
pub struct MeshMetrics {
  /// Stored cells per refinement level, summed over the last snapshot.
  pub cells_per_level: Vec<usize>,
  /// Leaf cells in the last snapshot.
  pub leaf_cells: usize,

  pub merge_timings: RollingWindow,
  pub clip_timings: RollingWindow,
  /// Parallel `step` calls.
  pub step_timings: RollingWindow,

  /// Cells removed by clipping. Survives [`reset`](Self::reset).
  pub cells_clipped: u64,
  /// Merge passes recorded. Survives [`reset`](Self::reset).
  pub merges_performed: u64,
}

impl MeshMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear the snapshot and the timing windows.
  pub fn reset(&mut self) {
    self.cells_per_level.clear();
    self.leaf_cells = 0;
    self.merge_timings.clear();
    self.clip_timings.clear();
    self.step_timings.clear();
  }

  /// Replace the level snapshot with `stats` summed over all meshes.
  pub fn update_from_stats<'a, T: 'a>(&mut self, stats: impl IntoIterator<Item = &'a MeshStats<T>>) {
    if !is_enabled() {
      return;
    }

    self.cells_per_level.clear();
    self.leaf_cells = 0;
    for stat in stats {
      if self.cells_per_level.len() < stat.cells_per_level.len() {
        self.cells_per_level.resize(stat.cells_per_level.len(), 0);
      }
      for (total, &count) in self.cells_per_level.iter_mut().zip(&stat.cells_per_level) {
        *total += count;
      }
      self.leaf_cells += stat.leaf_cells;
    }
  }

  pub fn record_merge_timing(&mut self, timing_us: u64) {
    if is_enabled() {
      self.merge_timings.push(timing_us);
      self.merges_performed += 1;
    }
  }

  /// Record a clip pass and how many cells it removed.
  pub fn record_clip(&mut self, timing_us: u64, removed: usize) {
    if is_enabled() {
      self.clip_timings.push(timing_us);
      self.cells_clipped += removed as u64;
    }
  }

  pub fn record_step_timing(&mut self, timing_us: u64) {
    if is_enabled() {
      self.step_timings.push(timing_us);
    }
  }

  /// Stored cells in the last snapshot.
  pub fn total_cells(&self) -> usize {
    self.cells_per_level.iter().sum()
  }

  pub fn avg_merge_timing_us(&self) -> f64 {
    self.merge_timings.average()
  }

  pub fn avg_clip_timing_us(&self) -> f64 {
    self.clip_timings.average()
  }

  pub fn avg_step_timing_us(&self) -> f64 {
    self.step_timings.average()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// The window keeps the newest `capacity` timings.
  #[test]
  fn test_rolling_window_evicts_oldest() {
    let mut window = RollingWindow::new(3);
    assert!(window.is_empty());
    assert_eq!(window.average(), 0.0);

    for timing in [10, 20, 30] {
      window.push(timing);
    }
    assert_eq!(window.len(), 3);
    assert_eq!(window.average(), 20.0);

    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.average(), 30.0);
  }

  #[cfg(feature = "metrics")]
  #[test]
  fn test_update_from_stats_sums_meshes() {
    use crate::mesh::{AdaptiveMesh, MeshConfig};

    let config = MeshConfig::<f64, 3>::new([2, 2, 2]).with_maximum_refinement_level(1);
    let mut coarse = AdaptiveMesh::new(config);
    coarse.set(1, 1.0);
    let mut fine = AdaptiveMesh::new(config);
    fine.set(1, 1.0);
    for child in fine.children(1) {
      fine.set(child, 1.0);
    }

    let stats = [MeshStats::from_mesh(&coarse), MeshStats::from_mesh(&fine)];
    let mut metrics = MeshMetrics::new();
    metrics.update_from_stats(&stats);

    assert_eq!(metrics.cells_per_level, vec![2, 8]);
    assert_eq!(metrics.total_cells(), 10);
    assert_eq!(metrics.leaf_cells, 9);
  }

  #[cfg(feature = "metrics")]
  #[test]
  fn test_clip_and_merge_counters() {
    let mut metrics = MeshMetrics::new();

    metrics.record_clip(100, 5);
    metrics.record_clip(300, 2);
    metrics.record_merge_timing(1000);

    assert_eq!(metrics.cells_clipped, 7);
    assert_eq!(metrics.avg_clip_timing_us(), 200.0);
    assert_eq!(metrics.merges_performed, 1);

    metrics.reset();
    assert!(metrics.clip_timings.is_empty());
    assert_eq!(metrics.cells_clipped, 7, "cumulative counters survive reset");
  }

  #[cfg(not(feature = "metrics"))]
  #[test]
  fn test_recording_disabled_without_feature() {
    let mut metrics = MeshMetrics::new();
    metrics.record_clip(100, 5);
    metrics.record_step_timing(10);
    assert!(!is_enabled());
    assert_eq!(metrics.cells_clipped, 0);
    assert!(metrics.step_timings.is_empty());
  }
}
