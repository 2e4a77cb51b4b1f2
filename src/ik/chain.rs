use super::constraint::Constraint;
use super::joint::Joint;
use crate::math::{rotation_arc, Transform};
use glam::{Quat, Vec3};

/// An unbranched joint chain; joint `i + 1` is the child of joint `i`.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    pub(crate) joints: Vec<Joint>,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    pub fn from_transforms(locals: impl IntoIterator<Item = Transform>) -> Self {
        Self {
            joints: locals.into_iter().map(Joint::new).collect(),
        }
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Resizes the chain; new joints are unconstrained identity links.
    pub fn resize(&mut self, joint_count: usize) {
        self.joints.resize_with(joint_count, || Joint::new(Transform::IDENTITY));
    }

    pub fn local_transform(&self, joint: usize) -> Transform {
        self.joints[joint].local
    }

    pub fn set_local_transform(&mut self, joint: usize, local: Transform) {
        self.joints[joint].local = local;
    }

    pub fn local_transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        self.joints.iter().map(|j| j.local)
    }

    pub fn global_transform(&self, joint: usize) -> Transform {
        self.joints[..joint]
            .iter()
            .rev()
            .fold(self.joints[joint].local, |acc, parent| {
                Transform::combine(&parent.local, &acc)
            })
    }

    pub fn global_positions(&self) -> Vec<Vec3> {
        let mut positions = Vec::with_capacity(self.joints.len());
        let mut parent = Transform::IDENTITY;
        for joint in &self.joints {
            positions.push(parent.transform_point(joint.local.position));
            parent = Transform::combine(&parent, &joint.local);
        }
        positions
    }

    /// World-space distance from each joint to its predecessor; 0 for the root.
    pub fn bone_lengths(&self) -> Vec<f32> {
        let positions = self.global_positions();
        let mut lengths = Vec::with_capacity(positions.len());
        if !positions.is_empty() {
            lengths.push(0.0);
        }
        lengths.extend(positions.windows(2).map(|w| (w[1] - w[0]).length()));
        lengths
    }

    pub fn total_length(&self) -> f32 {
        self.bone_lengths().iter().sum()
    }

    pub fn end_effector(&self) -> Option<Vec3> {
        self.joints
            .len()
            .checked_sub(1)
            .map(|last| self.global_transform(last).position)
    }

    pub fn base(&self) -> Option<Vec3> {
        self.joints.first().map(|j| j.local.position)
    }

    /// Applies a world-space rotation to `joint`, stored as a local delta.
    pub(crate) fn rotate_joint_world(&mut self, joint: usize, delta: Quat) {
        let world = self.global_transform(joint).rotation;
        let world_rotated = delta * world;
        let local_delta = world.inverse() * world_rotated;
        let local = &mut self.joints[joint].local;
        local.rotation = (local.rotation * local_delta).normalize();
    }

    /// Re-aims the bone leaving `joint` so it satisfies the joint's constraint.
    pub(crate) fn enforce_constraint(&mut self, joint: usize) {
        if joint == 0 || joint + 1 >= self.joints.len() || !self.joints[joint].is_constrained() {
            return;
        }

        let parent = self.global_transform(joint - 1).position;
        let current = self.global_transform(joint).position;
        let child = self.global_transform(joint + 1).position;

        let direction = child - current;
        if direction.length_squared() < 1e-10 {
            return;
        }
        let direction = direction.normalize();
        let limited = self.joints[joint].apply_constraint(direction, current - parent);

        if direction.dot(limited) < 1.0 - 1e-6 {
            self.rotate_joint_world(joint, rotation_arc(direction, limited));
        }
    }
}

pub struct ChainBuilder {
    joints: Vec<Joint>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn add_link(mut self, local: Transform) -> Self {
        self.joints.push(Joint::new(local));
        self
    }

    /// Adds a link offset from the previous joint by `offset`, with no rotation.
    pub fn add_offset(self, offset: Vec3) -> Self {
        self.add_link(Transform::from_position(offset))
    }

    pub fn add_link_with_constraint<C: Constraint + 'static>(
        mut self,
        local: Transform,
        constraint: C,
    ) -> Self {
        self.joints.push(Joint::new(local).with_constraint(constraint));
        self
    }

    pub fn build(self) -> Chain {
        Chain {
            joints: self.joints,
        }
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
