//! Line-list builders for visualising poses, IK chains and targets.
//!
//! Nothing here talks to a GPU; `DebugLines::as_bytes` is ready to copy into
//! a vertex buffer laid out as `LineVertex`.

use crate::anim::Pose;
use crate::ik::Chain;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

pub const BONE_COLOR: [f32; 4] = [0.6, 0.6, 0.7, 1.0];
pub const ROOT_COLOR: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
pub const EFFECTOR_COLOR: [f32; 4] = [0.8, 0.8, 0.2, 1.0];
pub const TARGET_COLOR: [f32; 4] = [1.0, 0.2, 0.2, 1.0];

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Accumulates line segments as vertex pairs.
#[derive(Debug, Clone, Default)]
pub struct DebugLines {
    vertices: Vec<LineVertex>,
}

impl DebugLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: [f32; 4]) {
        self.vertices.push(LineVertex::new(start, color));
        self.vertices.push(LineVertex::new(end, color));
    }

    /// One line from every parented joint to its parent, in global space.
    pub fn add_pose(&mut self, pose: &Pose, color: [f32; 4]) {
        for joint in 0..pose.len() {
            if let Some(parent) = pose.parent(joint) {
                let start = pose.global_transform(parent).position;
                let end = pose.global_transform(joint).position;
                self.add_line(start, end, color);
            }
        }
    }

    /// Bones of an IK chain, with short markers on the root and end effector.
    pub fn add_chain(&mut self, chain: &Chain) {
        let positions = chain.global_positions();
        for pair in positions.windows(2) {
            self.add_line(pair[0], pair[1], BONE_COLOR);
        }

        if let (Some(&root), Some(&effector)) = (positions.first(), positions.last()) {
            self.add_cross(root, 0.08, ROOT_COLOR);
            if positions.len() > 1 {
                self.add_cross(effector, 0.08, EFFECTOR_COLOR);
            }
        }
    }

    pub fn add_target(&mut self, target: Vec3, size: f32) {
        self.add_cross(target, size, TARGET_COLOR);
    }

    fn add_cross(&mut self, center: Vec3, size: f32, color: [f32; 4]) {
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            self.add_line(center - axis * size, center + axis * size, color);
        }
    }
}
