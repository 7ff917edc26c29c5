//! Double-precision bounding boxes for three-dimensional `f64` meshes.
//!
//! The generic geometry works on `[T; D]` arrays; these helpers give the
//! common velocity-space case glam types for callers that already use them.

use glam::DVec3;

use super::{AdaptiveMesh, CellId, Indices};

/// Double-precision axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb3 {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (inclusive).
	pub max: DVec3,
}

impl DAabb3 {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Box of the given extent centered on `center`.
	pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
		let half = size * 0.5;
		Self::new(center - half, center + half)
	}

	/// Check if this AABB contains a point (boundary included).
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}

	/// Check if `other` lies entirely inside this AABB.
	#[inline]
	pub fn contains(&self, other: &DAabb3) -> bool {
		self.contains_point(other.min) && self.contains_point(other.max)
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}
}

impl AdaptiveMesh<f64, 3> {
	/// Physical bounds of the level-0 grid.
	pub fn bounding_box(&self) -> DAabb3 {
		DAabb3::new(DVec3::from_array(self.mins), DVec3::from_array(self.maxs))
	}

	/// [`cell_center`](Self::cell_center) as a `DVec3` (NaN when invalid).
	pub fn cell_center_vec(&self, indices: &Indices<3>, refinement_level: i32) -> DVec3 {
		DVec3::from_array(self.cell_center(indices, refinement_level))
	}

	/// Box covered by cell `cid`, `None` for invalid ids.
	pub fn cell_aabb(&self, cid: CellId) -> Option<DAabb3> {
		let (indices, refinement_level) = self.try_indices(cid).ok()?;
		let center = self.cell_center_vec(&indices, refinement_level);
		let size = DVec3::from_array(self.cell_length(refinement_level));
		Some(DAabb3::from_center_size(center, size))
	}

	/// Id of the cell on `refinement_level` containing `point`.
	pub fn cell_at_vec(&self, point: DVec3, refinement_level: i32) -> CellId {
		self.cell_at_point(&point.to_array(), refinement_level)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mesh::MeshConfig;

	fn unit_mesh() -> AdaptiveMesh<f64, 3> {
		AdaptiveMesh::new(
			MeshConfig::new([3, 3, 3])
				.with_bounds([0.0; 3], [2.0; 3])
				.with_maximum_refinement_level(3),
		)
	}

	#[test]
	fn test_from_center_size() {
		let aabb = DAabb3::from_center_size(DVec3::splat(1.0), DVec3::splat(2.0));
		assert_eq!(aabb.min, DVec3::ZERO);
		assert_eq!(aabb.max, DVec3::splat(2.0));
		assert_eq!(aabb.center(), DVec3::splat(1.0));
		assert_eq!(aabb.size(), DVec3::splat(2.0));
	}

	#[test]
	fn test_contains_point() {
		let aabb = DAabb3::new(DVec3::ZERO, DVec3::splat(10.0));

		// Inside
		assert!(aabb.contains_point(DVec3::splat(5.0)));

		// On boundary
		assert!(aabb.contains_point(DVec3::ZERO));
		assert!(aabb.contains_point(DVec3::splat(10.0)));

		// Outside
		assert!(!aabb.contains_point(DVec3::new(5.0, -1.0, 5.0)));
		assert!(!aabb.contains_point(DVec3::splat(11.0)));
	}

	#[test]
	fn test_mesh_bounding_box() {
		let mesh = unit_mesh();
		let aabb = mesh.bounding_box();
		assert_eq!(aabb.min, DVec3::ZERO);
		assert_eq!(aabb.max, DVec3::splat(2.0));
	}

	/// Children tile their parent: every child box lies inside the parent box.
	#[test]
	fn test_child_boxes_inside_parent_box() {
		let mesh = unit_mesh();
		let parent = mesh.cell_from_indices(&[1, 2, 0], 1);
		let parent_box = mesh.cell_aabb(parent).expect("valid parent");

		for child in mesh.children(parent) {
			let child_box = mesh.cell_aabb(child).expect("valid child");
			assert!(
				parent_box.contains(&child_box),
				"child {child} box {child_box:?} escapes parent {parent_box:?}"
			);
		}
	}

	#[test]
	fn test_cell_at_vec_inverts_center() {
		let mesh = unit_mesh();
		let cid = mesh.cell_from_indices(&[5, 0, 3], 2);
		let center = mesh.cell_center_vec(&[5, 0, 3], 2);
		assert_eq!(mesh.cell_at_vec(center, 2), cid);
	}

	#[test]
	fn test_invalid_cell_has_no_box() {
		let mesh = unit_mesh();
		assert!(mesh.cell_aabb(0).is_none());
		assert!(mesh.cell_aabb(mesh.last_cid() + 1).is_none());
	}
}
