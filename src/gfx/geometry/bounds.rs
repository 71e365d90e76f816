//! Bounding volumes for geometry and picking

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut min = Vector3::from(*first);
        let mut max = min;

        for p in rest {
            min.x = min.x.min(p[0]);
            min.y = min.y.min(p[1]);
            min.z = min.z.min(p[2]);
            max.x = max.x.max(p[0]);
            max.y = max.y.max(p[1]);
            max.z = max.z.max(p[2]);
        }

        Some(Self::new(min, max))
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Box enclosing all eight transformed corners
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            [self.min.x, self.min.y, self.min.z],
            [self.max.x, self.min.y, self.min.z],
            [self.min.x, self.max.y, self.min.z],
            [self.min.x, self.min.y, self.max.z],
            [self.max.x, self.max.y, self.min.z],
            [self.max.x, self.min.y, self.max.z],
            [self.min.x, self.max.y, self.max.z],
            [self.max.x, self.max.y, self.max.z],
        ];

        let transformed: Vec<[f32; 3]> = corners
            .iter()
            .map(|c| {
                let p = matrix * Vector4::new(c[0], c[1], c[2], 1.0);
                [p.x / p.w, p.y / p.w, p.z / p.w]
            })
            .collect();

        // Eight corners are always present
        Self::from_points(&transformed).unwrap_or(*self)
    }
}

/// Sphere enclosing a piece of geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere centred on the box centre, radius reaching the farthest point
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let center = Aabb::from_points(points)?.center();
        let radius = points
            .iter()
            .map(|p| (Vector3::from(*p) - center).magnitude())
            .fold(0.0_f32, f32::max);

        Some(Self { center, radius })
    }
}
