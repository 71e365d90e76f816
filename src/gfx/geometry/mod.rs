//! # Geometry Data
//!
//! CPU-side triangle geometry carried by scene meshes, together with the
//! cached bounding volumes used for culling and pointer picking.
//!
//! Geometry is plain owned data: cloning a [`GeometryData`] yields a fully
//! independent copy, which is what piece decomposition relies on.

pub mod bounds;

pub use bounds::{Aabb, BoundingSphere};

/// Indexed triangle geometry
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v), possibly empty
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    /// Cached local-space bounding box, see [`GeometryData::compute_bounding_box`]
    pub bounding_box: Option<Aabb>,
    /// Cached local-space bounding sphere, see [`GeometryData::compute_bounding_sphere`]
    pub bounding_sphere: Option<BoundingSphere>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            indices: Vec::new(),
            bounding_box: None,
            bounding_sphere: None,
        }
    }

    /// Builds geometry from flat float buffers as produced by OBJ loaders.
    ///
    /// Normals are generated when `normals` is empty or does not match the
    /// position count.
    pub fn from_flat(positions: &[f32], normals: &[f32], tex_coords: &[f32], indices: Vec<u32>) -> Self {
        let positions: Vec<[f32; 3]> = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        let tex_coords: Vec<[f32; 2]> = tex_coords.chunks_exact(2).map(|t| [t[0], t[1]]).collect();

        let mut geometry = Self {
            positions,
            normals: Vec::new(),
            tex_coords,
            indices,
            bounding_box: None,
            bounding_sphere: None,
        };

        if !normals.is_empty() && normals.len() == geometry.positions.len() * 3 {
            geometry.normals = normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect();
        } else {
            geometry.compute_vertex_normals();
        }

        geometry
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Averages face normals into per-vertex normals
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![[0.0_f32; 3]; self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let (Some(v0), Some(v1), Some(v2)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for idx in [i0, i1, i2] {
                normals[idx][0] += face_normal[0];
                normals[idx][1] += face_normal[1];
                normals[idx][2] += face_normal[2];
            }
        }

        for n in &mut normals {
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if length > 0.0 {
                n[0] /= length;
                n[1] /= length;
                n[2] /= length;
            }
        }

        self.normals = normals;
    }

    /// Recomputes the cached bounding box from the current positions
    pub fn compute_bounding_box(&mut self) -> Option<Aabb> {
        self.bounding_box = Aabb::from_points(&self.positions);
        self.bounding_box
    }

    /// Recomputes the cached bounding sphere from the current positions
    pub fn compute_bounding_sphere(&mut self) -> Option<BoundingSphere> {
        self.bounding_sphere = BoundingSphere::from_points(&self.positions);
        self.bounding_sphere
    }

    /// Cached bounding box, computed on demand when missing
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounding_box
            .or_else(|| Aabb::from_points(&self.positions))
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn triangle() -> GeometryData {
        GeometryData::from_flat(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[],
            &[],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_missing_normals_are_generated() {
        let tri = triangle();
        assert_eq!(tri.vertex_count(), 3);
        assert_eq!(tri.triangle_count(), 1);
        for n in &tri.normals {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_supplied_normals_are_kept() {
        let geometry = GeometryData::from_flat(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            &[],
            vec![0, 1, 2],
        );
        assert_eq!(geometry.normals[0], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bounding_volumes_are_cached() {
        let mut tri = triangle();
        assert!(tri.bounding_box.is_none());

        let aabb = tri.compute_bounding_box().unwrap();
        let sphere = tri.compute_bounding_sphere().unwrap();

        assert_eq!(tri.bounding_box, Some(aabb));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 0.0));
        assert!(sphere.radius > 0.0);
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let mut geometry = triangle();
        geometry.indices = vec![0, 1, 7];
        geometry.compute_vertex_normals();
        assert_eq!(geometry.normals.len(), 3);
    }
}
