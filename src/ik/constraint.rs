use glam::{Quat, Vec3};
use std::fmt::Debug;

/// Limits the direction of a bone relative to the bone before it.
///
/// `direction` is the desired bone direction and `reference` the direction
/// of the parent bone, both in world space. The result is a unit vector, or
/// zero when no valid direction exists.
pub trait Constraint: Send + Sync + Debug {
    fn apply(&self, direction: Vec3, reference: Vec3) -> Vec3;
    fn clone_box(&self) -> Box<dyn Constraint>;
}

impl Clone for Box<dyn Constraint> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Keeps a bone inside a cone around its parent bone.
#[derive(Debug, Clone, Copy)]
pub struct BallSocketConstraint {
    pub max_angle: f32,
}

impl BallSocketConstraint {
    pub fn new(max_angle_degrees: f32) -> Self {
        Self {
            max_angle: max_angle_degrees.to_radians(),
        }
    }

    pub fn from_radians(max_angle: f32) -> Self {
        Self { max_angle }
    }
}

impl Constraint for BallSocketConstraint {
    fn apply(&self, direction: Vec3, reference: Vec3) -> Vec3 {
        let dir = direction.normalize_or_zero();
        let ref_dir = reference.normalize_or_zero();

        if dir.length_squared() < 0.0001 || ref_dir.length_squared() < 0.0001 {
            return dir;
        }

        if dir.angle_between(ref_dir) <= self.max_angle {
            return dir;
        }

        let axis = ref_dir.cross(dir);
        if axis.length_squared() < 0.0001 {
            // Pointing straight back: any axis works, pick one perpendicular to the parent.
            let axis = ref_dir.any_orthonormal_vector();
            Quat::from_axis_angle(axis, self.max_angle) * ref_dir
        } else {
            Quat::from_axis_angle(axis.normalize(), self.max_angle) * ref_dir
        }
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }
}

/// Restricts a bone to the plane perpendicular to a world-space hinge axis.
#[derive(Debug, Clone, Copy)]
pub struct HingeConstraint {
    pub axis: Vec3,
}

impl HingeConstraint {
    pub fn new(axis: Vec3) -> Self {
        Self {
            axis: axis.normalize_or_zero(),
        }
    }
}

impl Constraint for HingeConstraint {
    fn apply(&self, direction: Vec3, reference: Vec3) -> Vec3 {
        if self.axis.length_squared() < 0.0001 {
            return direction.normalize_or_zero();
        }

        let projected = direction - self.axis * direction.dot(self.axis);
        if projected.length_squared() > 1e-8 {
            return projected.normalize();
        }

        (reference - self.axis * reference.dot(self.axis)).normalize_or_zero()
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }
}
