use approx::assert_relative_eq;

use super::*;
use crate::mesh::MeshConfig;

fn mesh() -> AdaptiveMesh<f64, 3> {
  AdaptiveMesh::new(
    MeshConfig::new([5, 3, 1])
      .with_bounds([-2.0, 0.0, 10.0], [2.0, 1.0, 12.0])
      .with_maximum_refinement_level(3),
  )
}

// =========================================================================
// Cell lengths
// =========================================================================

/// Grid points sit at cell centers: extent / (length - 1), single cells span
/// the whole extent.
#[test]
fn test_level_0_cell_length() {
  let mesh = mesh();
  assert_eq!(mesh.level_0_cell_length(), [1.0, 0.5, 2.0]);
}

#[test]
fn test_cell_length_halves_per_level() {
  let mesh = mesh();
  assert_eq!(mesh.cell_length(0), [1.0, 0.5, 2.0]);
  assert_eq!(mesh.cell_length(1), [0.5, 0.25, 1.0]);
  assert_eq!(mesh.cell_length(3), [0.125, 0.0625, 0.25]);
}

#[test]
fn test_bounds_accessors() {
  let mut mesh = mesh();
  assert_eq!(mesh.mins(), [-2.0, 0.0, 10.0]);
  assert_eq!(mesh.maxs(), [2.0, 1.0, 12.0]);

  mesh.set_min([0.0; 3]);
  mesh.set_max([8.0; 3]);
  assert_eq!(mesh.level_0_cell_length(), [2.0, 4.0, 8.0]);
}

// =========================================================================
// Cell centers
// =========================================================================

#[test]
fn test_cell_center_level_0() {
  let mesh = mesh();
  assert_eq!(mesh.cell_center(&[0, 0, 0], 0), [-1.5, 0.25, 11.0]);
  assert_eq!(mesh.cell_center(&[4, 2, 0], 0), [2.5, 1.25, 11.0]);
}

#[test]
fn test_cell_center_refined() {
  let mesh = mesh();
  let center = mesh.cell_center(&[3, 1, 1], 2);
  assert_relative_eq!(center[0], -2.0 + 3.0 * 0.25 + 0.125);
  assert_relative_eq!(center[1], 0.0 + 1.0 * 0.125 + 0.0625);
  assert_relative_eq!(center[2], 10.0 + 1.0 * 0.5 + 0.25);
}

/// The center of a parent is the mean of its children's centers.
#[test]
fn test_parent_center_is_mean_of_children() {
  let mesh = mesh();
  let parent = mesh.cell_from_indices(&[2, 1, 0], 1);
  let children = mesh.children(parent);

  let mut mean = [0.0; 3];
  for &child in &children {
    let center = mesh.cell_center_of(child);
    for axis in 0..3 {
      mean[axis] += center[axis] / children.len() as f64;
    }
  }

  let parent_center = mesh.cell_center_of(parent);
  for axis in 0..3 {
    assert_relative_eq!(mean[axis], parent_center[axis], epsilon = 1e-12);
  }
}

#[test]
fn test_cell_center_invalid_is_nan() {
  let mesh = mesh();
  assert!(mesh.cell_center(&[0, 0, 0], -1).iter().all(|v| v.is_nan()));
  assert!(mesh.cell_center(&[0, 0, 0], 4).iter().all(|v| v.is_nan()));
  assert!(mesh.cell_center(&[5, 0, 0], 0).iter().all(|v| v.is_nan()));
  assert!(mesh.cell_center_of(ERROR_CID).iter().all(|v| v.is_nan()));
}

// =========================================================================
// Point lookup
// =========================================================================

#[test]
fn test_cell_at_point_inverts_center() {
  let mesh = mesh();
  for level in 0..=3 {
    let [nx, ny, nz] = mesh.level_size(level);
    for indices in [[0, 0, 0], [nx - 1, ny - 1, nz - 1], [nx / 2, ny / 3, nz - 1]] {
      let center = mesh.cell_center(&indices, level);
      assert_eq!(
        mesh.cell_at_point(&center, level),
        mesh.cell_from_indices(&indices, level),
        "level {level} indices {indices:?}"
      );
    }
  }
}

#[test]
fn test_cell_at_point_outside_grid() {
  let mesh = mesh();
  assert_eq!(mesh.cell_at_point(&[-2.5, 0.5, 11.0], 0), ERROR_CID, "below min");
  assert_eq!(mesh.cell_at_point(&[100.0, 0.5, 11.0], 0), ERROR_CID, "past last cell");
  assert_eq!(mesh.cell_at_point(&[0.0, f64::NAN, 11.0], 0), ERROR_CID, "NaN coordinate");
  assert_eq!(mesh.cell_at_point(&[0.0, 0.5, 11.0], 4), ERROR_CID, "level above maximum");
}
