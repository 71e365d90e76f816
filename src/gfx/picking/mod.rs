//! # Object Picking System
//!
//! Pointer picking using ray-casting against world-space bounding boxes.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: Convert pointer coordinates to a world-space ray
//!    through the inverse view-projection matrix
//! 2. **Broad Phase**: Test the ray against each target's world AABB
//! 3. **Narrow Phase**: Ask each surviving target for the distance to its
//!    actual surface (ray/triangle for pieces); targets the ray misses drop out
//! 4. **Ordering**: Return every hit, nearest first, so event dispatch can
//!    walk them front to back
//!
//! ## Usage
//!
//! ```no_run
//! use roomview::gfx::picking::ObjectPicker;
//! # use cgmath::{Matrix4, SquareMatrix};
//! # let view_proj = Matrix4::identity();
//! # let pieces: Vec<roomview::isolate::Piece> = Vec::new();
//!
//! let mut picker = ObjectPicker::new();
//! if let Some(ray) = ObjectPicker::screen_to_ray((400.0, 300.0), (800.0, 600.0), &view_proj) {
//!     for hit in picker.pick_all(&ray, &pieces) {
//!         println!("hit {} at {}", hit.index, hit.distance);
//!     }
//! }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::geometry::Aabb;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore ray/triangle test. Both faces count as hits.
    ///
    /// Returns the distance along the ray, `None` on a miss, for a
    /// degenerate triangle, or when the triangle is behind the origin.
    pub fn intersect_triangle(&self, v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let h = self.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray parallel to the triangle plane
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t > EPSILON).then_some(t)
    }
}

impl Aabb {
    /// Slab test. Returns the distance to the entry point (or exit point when
    /// the origin is inside the box), `None` on a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t_near = t_min.x.min(t_max.x).max(t_min.y.min(t_max.y)).max(t_min.z.min(t_max.z));
        let t_far = t_min.x.max(t_max.x).min(t_min.y.max(t_max.y)).min(t_min.z.max(t_max.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

/// Anything with a world-space bounding box
pub trait Pickable {
    /// `None` for targets with no geometry; those are never hit
    fn world_bounds(&self) -> Option<Aabb>;

    /// Distance along `ray` to the target's surface, `None` on a miss
    ///
    /// Only called for targets whose bounds the ray already enters. The
    /// default treats the bounding box itself as the surface.
    fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        self.world_bounds()?.intersect_ray(ray)
    }
}

/// Result of a picking query
#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    /// Index of the target in the slice passed to the picker
    pub index: usize,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Ray picker with a per-target bounds cache
pub struct ObjectPicker {
    cached_aabbs: Vec<Option<Aabb>>,
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self {
            cached_aabbs: Vec::new(),
        }
    }

    /// Convert screen coordinates to a world-space ray
    ///
    /// Returns `None` for a zero-sized viewport or a singular matrix.
    pub fn screen_to_ray(
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        view_proj: &Matrix4<f32>,
    ) -> Option<Ray> {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        // Normalized device coordinates, Y up
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

        let inv_view_proj = view_proj.invert()?;

        let unproject = |z: f32| {
            let p = inv_view_proj * Vector4::new(ndc_x, ndc_y, z, 1.0);
            Vector3::new(p.x / p.w, p.y / p.w, p.z / p.w)
        };

        let near = unproject(-1.0);
        let far = unproject(1.0);
        let direction = far - near;
        if direction.magnitude2() == 0.0 {
            return None;
        }

        Some(Ray::new(near, direction))
    }

    /// Every target hit by the ray, nearest first
    ///
    /// Cached boxes reject most targets cheaply; the rest are ordered by
    /// [`Pickable::ray_distance`], so a large target enclosing smaller ones
    /// only wins where its own surface is nearer.
    pub fn pick_all<T: Pickable>(&mut self, ray: &Ray, targets: &[T]) -> Vec<PickResult> {
        if self.cached_aabbs.len() != targets.len() {
            self.cached_aabbs = targets.iter().map(Pickable::world_bounds).collect();
        }

        let mut hits: Vec<PickResult> = self
            .cached_aabbs
            .iter()
            .zip(targets)
            .enumerate()
            .filter_map(|(index, (aabb, target))| {
                aabb.as_ref()?.intersect_ray(ray)?;
                let distance = target.ray_distance(ray)?;
                Some(PickResult {
                    index,
                    distance,
                    intersection_point: ray.point_at(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest hit only
    pub fn pick_nearest<T: Pickable>(&mut self, ray: &Ray, targets: &[T]) -> Option<PickResult> {
        self.pick_all(ray, targets).into_iter().next()
    }

    /// Invalidate cached bounds (call when targets change)
    pub fn invalidate_cache(&mut self) {
        self.cached_aabbs.clear();
    }
}

impl Default for ObjectPicker {
    fn default() -> Self {
        Self::new()
    }
}
