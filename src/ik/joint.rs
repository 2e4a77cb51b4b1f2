use super::constraint::Constraint;
use crate::math::Transform;
use glam::Vec3;

/// One link of an IK chain: a transform local to the previous link.
///
/// The constraint limits the bone leaving this joint relative to the bone
/// entering it, so it has no effect on the first joint of a chain.
#[derive(Debug, Clone)]
pub struct Joint {
    pub local: Transform,
    pub constraint: Option<Box<dyn Constraint>>,
}

impl Joint {
    pub fn new(local: Transform) -> Self {
        Self {
            local,
            constraint: None,
        }
    }

    pub fn with_constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.constraint = Some(Box::new(constraint));
        self
    }

    pub fn set_constraint<C: Constraint + 'static>(&mut self, constraint: C) {
        self.constraint = Some(Box::new(constraint));
    }

    pub fn clear_constraint(&mut self) {
        self.constraint = None;
    }

    pub fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }

    /// Unit direction for the outgoing bone; falls back to the unconstrained
    /// direction when the constraint yields none.
    pub fn apply_constraint(&self, direction: Vec3, reference: Vec3) -> Vec3 {
        let free = direction.normalize_or_zero();
        match &self.constraint {
            Some(c) => {
                let limited = c.apply(direction, reference);
                if limited.length_squared() > 0.0001 {
                    limited
                } else {
                    free
                }
            }
            None => free,
        }
    }
}

impl From<Transform> for Joint {
    fn from(local: Transform) -> Self {
        Self::new(local)
    }
}
