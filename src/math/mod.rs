//! Math utilities module
//!
//! Provides convenient re-exports from glam and the joint transform type.

mod transform;

pub use transform::Transform;

// Re-export commonly used glam types
pub use glam::{Mat4, Quat, Vec3, Vec4};

/// Views a matrix palette as raw bytes for upload to a skinning buffer.
pub fn matrix_palette_bytes(palette: &[Mat4]) -> &[u8] {
    bytemuck::cast_slice(palette)
}

/// Shortest rotation taking unit vector `from` onto unit vector `to`.
///
/// Unlike `Quat::from_rotation_arc` this keeps arcs of a few microradians,
/// which the IK solvers need to close the last part of the gap.
pub fn rotation_arc(from: Vec3, to: Vec3) -> Quat {
    let dot = from.dot(to);
    if dot < -1.0 + 1e-6 {
        return Quat::from_axis_angle(from.any_orthonormal_vector(), std::f32::consts::PI);
    }
    let axis = from.cross(to);
    Quat::from_xyzw(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
}
