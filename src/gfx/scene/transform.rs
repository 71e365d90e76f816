//! Translation / rotation / scale transforms
//!
//! Nodes store their local transform as separate TRS components. World-space
//! placement is obtained by multiplying local matrices from the root down and
//! decomposing the result back into TRS with [`Transform::from_matrix`].

use cgmath::{InnerSpace, Matrix3, Matrix4, One, Quaternion, SquareMatrix, Vector3};

/// A decomposed affine transform (no shear)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Builder pattern: set rotation
    pub fn with_rotation(mut self, rotation: Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: set non-uniform scale
    pub fn with_scale_xyz(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Matrix form, applied as T * R * S
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.translation);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }

    /// Decomposes an affine matrix into translation, rotation and scale.
    ///
    /// A negative determinant is folded into the X scale. Degenerate (zero)
    /// scale axes produce an identity rotation.
    pub fn from_matrix(matrix: &Matrix4<f32>) -> Self {
        let translation = matrix.w.truncate();

        let col_x = matrix.x.truncate();
        let col_y = matrix.y.truncate();
        let col_z = matrix.z.truncate();

        let mut scale = Vector3::new(col_x.magnitude(), col_y.magnitude(), col_z.magnitude());
        if matrix.determinant() < 0.0 {
            scale.x = -scale.x;
        }

        let degenerate = [scale.x, scale.y, scale.z]
            .iter()
            .any(|s| s.abs() <= f32::EPSILON);

        let rotation = if degenerate {
            Quaternion::one()
        } else {
            let basis = Matrix3::from_cols(col_x / scale.x, col_y / scale.y, col_z / scale.z);
            Quaternion::from(basis).normalize()
        };

        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Returns `self * child`, i.e. the child's transform expressed in the
    /// space this transform maps into.
    pub fn then(&self, child: &Transform) -> Transform {
        Transform::from_matrix(&(self.to_matrix() * child.to_matrix()))
    }

    /// Component-wise comparison; `q` and `-q` count as the same rotation.
    pub fn approx_eq(&self, other: &Transform, epsilon: f32) -> bool {
        let close = |a: Vector3<f32>, b: Vector3<f32>| (a - b).magnitude() <= epsilon;
        let same_rotation = self.rotation.dot(other.rotation).abs() >= 1.0 - epsilon;
        close(self.translation, other.translation) && close(self.scale, other.scale) && same_rotation
    }
}
