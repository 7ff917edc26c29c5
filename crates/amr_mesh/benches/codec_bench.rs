//! Cell id codec benchmarks.
//!
//! Measures the hot index arithmetic every tree operation is built on:
//! - **encode**: indices + level -> id
//! - **decode**: id -> indices + level
//! - **topology**: parent / children / ancestor walk

use amr_mesh::{AdaptiveMesh, CellId, MeshConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 4096;

fn mesh(max_level: i32) -> AdaptiveMesh<f64, 3> {
  AdaptiveMesh::new(MeshConfig::new([4, 4, 4]).with_maximum_refinement_level(max_level))
}

/// Random valid ids spread over every level.
fn random_cells(mesh: &AdaptiveMesh<f64, 3>, seed: u64) -> Vec<CellId> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..SAMPLES).map(|_| rng.random_range(1..=mesh.last_cid())).collect()
}

// =============================================================================
// Codec
// =============================================================================

fn bench_encode(c: &mut Criterion) {
  let mut group = c.benchmark_group("codec_encode");
  group.throughput(Throughput::Elements(SAMPLES as u64));

  for max_level in [2, 6, 10] {
    let mesh = mesh(max_level);
    let positions: Vec<([u64; 3], i32)> = random_cells(&mesh, 7)
      .into_iter()
      .map(|cid| (mesh.indices(cid), mesh.refinement_level(cid)))
      .collect();

    group.bench_with_input(BenchmarkId::from_parameter(max_level), &positions, |b, positions| {
      b.iter(|| {
        for (indices, level) in positions {
          black_box(mesh.cell_from_indices(black_box(indices), *level));
        }
      })
    });
  }

  group.finish();
}

fn bench_decode(c: &mut Criterion) {
  let mut group = c.benchmark_group("codec_decode");
  group.throughput(Throughput::Elements(SAMPLES as u64));

  for max_level in [2, 6, 10] {
    let mesh = mesh(max_level);
    let cells = random_cells(&mesh, 11);

    group.bench_with_input(BenchmarkId::from_parameter(max_level), &cells, |b, cells| {
      b.iter(|| {
        for &cid in cells {
          black_box(mesh.indices(black_box(cid)));
          black_box(mesh.refinement_level(cid));
        }
      })
    });
  }

  group.finish();
}

// =============================================================================
// Topology
// =============================================================================

fn bench_topology(c: &mut Criterion) {
  let mut group = c.benchmark_group("topology");
  group.throughput(Throughput::Elements(SAMPLES as u64));

  let mesh = mesh(8);
  let cells = random_cells(&mesh, 13);

  group.bench_function("parent", |b| {
    b.iter(|| {
      for &cid in &cells {
        black_box(mesh.parent(black_box(cid)));
      }
    })
  });

  group.bench_function("children", |b| {
    b.iter(|| {
      for &cid in &cells {
        black_box(mesh.children(black_box(cid)));
      }
    })
  });

  group.bench_function("ancestors", |b| {
    b.iter(|| {
      for &cid in &cells {
        black_box(mesh.ancestors(black_box(cid)).count());
      }
    })
  });

  group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_topology);
criterion_main!(benches);
