//! Screen-space to world-space ray conversion for shooting
//!
//! A crosshair shot always goes through the center of the screen, which is
//! `(0, 0)` in Normalized Device Coordinates.

use crate::foundation::math::{utils::deg_to_rad, Mat4, Point3, Vec3, Vec4};

/// World-space direction through the screen center
///
/// Unprojects the far-plane NDC point at the center into eye space, turns it
/// into a forward direction and maps it into world space with the inverse
/// view. Returns `None` when either matrix is singular.
pub fn screen_center_ray(view: &Mat4, projection: &Mat4) -> Option<Vec3> {
    let ndc = Vec4::new(0.0, 0.0, 1.0, 1.0);
    let inverse_projection = projection.try_inverse()?;
    let inverse_view = view.try_inverse()?;

    let mut eye = inverse_projection * ndc;
    eye.z = -1.0;
    eye.w = 0.0;

    let world = inverse_view * eye;
    world.xyz().try_normalize(f32::EPSILON)
}

/// Unit forward vector of a camera with the given yaw and pitch in degrees
///
/// Yaw is measured from +X towards +Z, so a yaw of -90 looks down -Z.
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (deg_to_rad(yaw), deg_to_rad(pitch));
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

/// Right-handed view matrix for a camera at `position` looking along `forward`
pub fn look_at_view(position: &Vec3, forward: &Vec3) -> Mat4 {
    let eye = Point3::from(*position);
    Mat4::look_at_rh(&eye, &(eye + *forward), &Vec3::y())
}
