//! Math utilities and types
//!
//! Provides fundamental math types for scene composition and collision.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Rotation3,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Extension trait for Mat4 with the helpers the scene graph composes with
pub trait MatrixExt {
    /// Rotation of `radians` around `axis`
    ///
    /// Returns identity for a zero angle or an axis too short to normalize.
    fn axis_angle(axis: &Vec3, radians: f32) -> Mat4;

    /// Translation matrix
    fn translate(translation: &Vec3) -> Mat4;

    /// Non-uniform scale matrix
    fn nonuniform_scale(scale: &Vec3) -> Mat4;

    /// Largest decomposed axis scale factor (column length of the upper 3x3)
    fn max_axis_scale(&self) -> f32;

    /// Inverse-transpose of the upper 3x3, identity when it is singular
    fn normal_matrix(&self) -> Mat3;

    /// Map a point through this matrix (w = 1)
    fn transform_point3(&self, point: &Vec3) -> Vec3;
}

impl MatrixExt for Mat4 {
    fn axis_angle(axis: &Vec3, radians: f32) -> Mat4 {
        if radians == 0.0 {
            return Mat4::identity();
        }
        match Unit::try_new(*axis, f32::EPSILON) {
            Some(axis) => Rotation3::from_axis_angle(&axis, radians).to_homogeneous(),
            None => Mat4::identity(),
        }
    }

    fn translate(translation: &Vec3) -> Mat4 {
        Mat4::new_translation(translation)
    }

    fn nonuniform_scale(scale: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(scale)
    }

    fn max_axis_scale(&self) -> f32 {
        let upper = self.fixed_view::<3, 3>(0, 0);
        let sx = upper.column(0).magnitude();
        let sy = upper.column(1).magnitude();
        let sz = upper.column(2).magnitude();
        sx.max(sy).max(sz)
    }

    fn normal_matrix(&self) -> Mat3 {
        let upper: Mat3 = self.fixed_view::<3, 3>(0, 0).into_owned();
        upper
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }

    fn transform_point3(&self, point: &Vec3) -> Vec3 {
        self.transform_point(&Point3::from(*point)).coords
    }
}
