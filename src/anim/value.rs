use glam::{Quat, Vec3};
use std::ops::{Add, Mul};

/// A value a keyframe track can produce from `N` raw float components.
///
/// `cast` is the semantic conversion used for keyframe values; `from_raw`
/// reinterprets the components untouched and is used for tangents, whose
/// magnitude must survive.
pub trait TrackValue<const N: usize>:
    Copy + Default + Add<Output = Self> + Mul<f32, Output = Self>
{
    fn cast(raw: &[f32; N]) -> Self;

    fn from_raw(raw: &[f32; N]) -> Self;

    fn components(self) -> [f32; N];

    fn interpolate(a: Self, b: Self, t: f32) -> Self;

    /// Returns `b`, flipped if needed so it lies in the same hemisphere as `a`.
    fn neighborhood(_a: Self, b: Self) -> Self {
        b
    }

    fn adjust_hermite_result(self) -> Self {
        self
    }
}

impl TrackValue<1> for f32 {
    fn cast(raw: &[f32; 1]) -> Self {
        raw[0]
    }

    fn from_raw(raw: &[f32; 1]) -> Self {
        raw[0]
    }

    fn components(self) -> [f32; 1] {
        [self]
    }

    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl TrackValue<3> for Vec3 {
    fn cast(raw: &[f32; 3]) -> Self {
        Vec3::from_array(*raw)
    }

    fn from_raw(raw: &[f32; 3]) -> Self {
        Vec3::from_array(*raw)
    }

    fn components(self) -> [f32; 3] {
        self.to_array()
    }

    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

impl TrackValue<4> for Quat {
    fn cast(raw: &[f32; 4]) -> Self {
        normalize_or_identity(Quat::from_array(*raw))
    }

    fn from_raw(raw: &[f32; 4]) -> Self {
        Quat::from_array(*raw)
    }

    fn components(self) -> [f32; 4] {
        self.to_array()
    }

    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        let b = Self::neighborhood(a, b);
        normalize_or_identity(a + (b - a) * t)
    }

    fn neighborhood(a: Self, b: Self) -> Self {
        if a.dot(b) < 0.0 {
            -b
        } else {
            b
        }
    }

    fn adjust_hermite_result(self) -> Self {
        normalize_or_identity(self)
    }
}

fn normalize_or_identity(q: Quat) -> Quat {
    if q.length_squared() < f32::EPSILON {
        Quat::IDENTITY
    } else {
        q.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternion_cast_normalizes_but_raw_does_not() {
        let raw = [0.0, 0.0, 0.0, 2.0];

        assert_eq!(<Quat as TrackValue<4>>::cast(&raw), Quat::IDENTITY);
        assert_eq!(<Quat as TrackValue<4>>::from_raw(&raw).w, 2.0);
    }

    #[test]
    fn quaternion_neighborhood_flips_opposite_hemisphere() {
        let a = Quat::IDENTITY;
        let b = Quat::from_xyzw(0.0, 0.0, 0.0, -1.0);

        assert_eq!(<Quat as TrackValue<4>>::neighborhood(a, b), Quat::IDENTITY);
    }

    #[test]
    fn quaternion_interpolation_takes_short_path() {
        let a = Quat::from_rotation_z(0.1);
        let b = -Quat::from_rotation_z(0.3);

        let mid = <Quat as TrackValue<4>>::interpolate(a, b, 0.5);

        assert!(mid.abs_diff_eq(Quat::from_rotation_z(0.2), 1e-3));
    }
}
