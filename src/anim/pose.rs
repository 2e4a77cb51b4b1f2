use crate::error::{Error, Result};
use crate::math::Transform;
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Local joint transforms plus the parent index of every joint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    joints: Vec<Transform>,
    parents: Vec<Option<usize>>,
}

impl Pose {
    pub fn new(joint_count: usize) -> Self {
        let mut pose = Self::default();
        pose.set_joint_count(joint_count);
        pose
    }

    /// Builds a pose from local transforms and parent indices.
    ///
    /// `parents` is padded with roots or truncated to match `joints`.
    pub fn from_parts(joints: Vec<Transform>, mut parents: Vec<Option<usize>>) -> Self {
        parents.resize(joints.len(), None);
        Self { joints, parents }
    }

    /// Resizes the pose; new joints are identity roots.
    pub fn set_joint_count(&mut self, joint_count: usize) {
        self.joints.resize(joint_count, Transform::IDENTITY);
        self.parents.resize(joint_count, None);
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn local_transform(&self, joint: usize) -> Transform {
        self.joints[joint]
    }

    pub fn set_local_transform(&mut self, joint: usize, transform: Transform) {
        self.joints[joint] = transform;
    }

    pub fn local_transforms(&self) -> &[Transform] {
        &self.joints
    }

    pub fn parent(&self, joint: usize) -> Option<usize> {
        self.parents[joint]
    }

    pub fn set_parent(&mut self, joint: usize, parent: Option<usize>) {
        self.parents[joint] = parent;
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// World transform of `joint`, composed up the parent chain.
    ///
    /// Parent data is trusted; a cyclic chain stops after `len()` hops.
    pub fn global_transform(&self, joint: usize) -> Transform {
        let mut result = self.joints[joint];
        let mut parent = self.parents[joint];
        let mut hops = 0;

        while let Some(p) = parent {
            if hops == self.joints.len() {
                break;
            }
            result = Transform::combine(&self.joints[p], &result);
            parent = self.parents[p];
            hops += 1;
        }

        result
    }

    /// Fills `out` with one world matrix per joint.
    pub fn matrix_palette(&self, out: &mut Vec<Mat4>) {
        out.clear();
        out.extend((0..self.len()).map(|i| self.global_transform(i).to_matrix()));
    }

    /// Whether `joint` is `root` or one of its descendants.
    pub fn is_in_hierarchy(&self, root: usize, joint: usize) -> bool {
        if joint == root {
            return true;
        }

        let mut parent = self.parents[joint];
        let mut hops = 0;
        while let Some(p) = parent {
            if p == root {
                return true;
            }
            if hops == self.parents.len() {
                break;
            }
            parent = self.parents[p];
            hops += 1;
        }
        false
    }

    /// Blends the local transforms of `a` and `b` into `out`.
    ///
    /// With a `root`, only that joint and its descendants are written. Joints
    /// missing from any of the three poses are skipped.
    pub fn blend(out: &mut Pose, a: &Pose, b: &Pose, t: f32, root: Option<usize>) {
        let count = out.len().min(a.len()).min(b.len());
        for joint in 0..count {
            if let Some(root) = root {
                if !out.is_in_hierarchy(root, joint) {
                    continue;
                }
            }
            let blended = a.joints[joint].lerp(&b.joints[joint], t);
            out.joints[joint] = blended;
        }
    }

    /// Checks that every parent index is in range and acyclic.
    pub fn validate(&self) -> Result<()> {
        let count = self.parents.len();
        for (joint, parent) in self.parents.iter().enumerate() {
            if let Some(parent) = *parent {
                if parent >= count {
                    return Err(Error::ParentOutOfRange { joint, parent });
                }
            }
        }

        for joint in 0..count {
            let mut current = self.parents[joint];
            let mut hops = 0;
            while let Some(p) = current {
                if p == joint || hops >= count {
                    return Err(Error::ParentCycle { joint });
                }
                current = self.parents[p];
                hops += 1;
            }
        }

        Ok(())
    }

    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.parents == other.parents
            && self
                .joints
                .iter()
                .zip(&other.joints)
                .all(|(a, b)| a.abs_diff_eq(b, max_abs_diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn arm() -> Pose {
        let mut pose = Pose::new(3);
        pose.set_local_transform(
            0,
            Transform::new(
                Vec3::new(1.0, 0.0, 0.0),
                Quat::from_rotation_z(0.5),
                Vec3::ONE,
            ),
        );
        pose.set_local_transform(
            1,
            Transform::new(
                Vec3::new(0.0, 2.0, 0.0),
                Quat::from_rotation_x(0.3),
                Vec3::splat(2.0),
            ),
        );
        pose.set_local_transform(2, Transform::from_position(Vec3::new(0.0, 1.0, 1.0)));
        pose.set_parent(1, Some(0));
        pose.set_parent(2, Some(1));
        pose
    }

    #[test]
    fn new_joints_are_identity_roots() {
        let pose = Pose::new(2);

        assert_eq!(pose.len(), 2);
        assert_eq!(pose.local_transform(1), Transform::IDENTITY);
        assert_eq!(pose.parent(1), None);
    }

    #[test]
    fn global_transform_composes_parent_chain() {
        let pose = arm();
        let root = pose.local_transform(0);
        let mid = pose.local_transform(1);
        let leaf = pose.local_transform(2);

        let expected = Transform::combine(&Transform::combine(&root, &mid), &leaf);

        assert!(pose.global_transform(2).abs_diff_eq(&expected, 1e-5));
        assert_eq!(pose.global_transform(0), root);
    }

    #[test]
    fn matrix_palette_matches_global_transforms() {
        let pose = arm();
        let mut palette = vec![Mat4::ZERO; 7];

        pose.matrix_palette(&mut palette);

        assert_eq!(palette.len(), 3);
        for (i, matrix) in palette.iter().enumerate() {
            assert!(matrix.abs_diff_eq(pose.global_transform(i).to_matrix(), 1e-6));
        }
    }

    #[test]
    fn cyclic_parents_terminate_and_fail_validation() {
        let mut pose = Pose::new(2);
        pose.set_parent(0, Some(1));
        pose.set_parent(1, Some(0));

        let _ = pose.global_transform(0);

        assert_eq!(pose.validate(), Err(Error::ParentCycle { joint: 0 }));
    }

    #[test]
    fn validation_rejects_out_of_range_parent() {
        let mut pose = Pose::new(2);
        pose.set_parent(1, Some(5));

        assert_eq!(
            pose.validate(),
            Err(Error::ParentOutOfRange { joint: 1, parent: 5 })
        );
        assert_eq!(arm().validate(), Ok(()));
    }

    #[test]
    fn equality_requires_matching_parents_and_joints() {
        let a = arm();
        let mut b = arm();
        assert_eq!(a, b);

        b.set_parent(2, Some(0));
        assert_ne!(a, b);

        let mut c = arm();
        c.set_local_transform(1, Transform::IDENTITY);
        assert_ne!(a, c);
        assert_ne!(a, Pose::new(2));
    }

    #[test]
    fn blend_respects_root_subtree() {
        let a = arm();
        let mut b = arm();
        for joint in 0..3 {
            b.set_local_transform(joint, Transform::from_position(Vec3::splat(4.0)));
        }
        let mut out = a.clone();

        Pose::blend(&mut out, &a, &b, 1.0, Some(1));

        assert_eq!(out.local_transform(0), a.local_transform(0));
        assert!(out.local_transform(1).position.abs_diff_eq(Vec3::splat(4.0), 1e-6));
        assert!(out.local_transform(2).position.abs_diff_eq(Vec3::splat(4.0), 1e-6));
        assert!(out.is_in_hierarchy(0, 2));
        assert!(!out.is_in_hierarchy(2, 0));
    }

    #[test]
    fn blend_skips_joints_missing_from_inputs() {
        let a = arm();
        let mut b = Pose::new(2);
        b.set_local_transform(0, Transform::from_position(Vec3::splat(4.0)));
        let mut out = arm();

        Pose::blend(&mut out, &a, &b, 1.0, None);

        assert!(out.local_transform(0).position.abs_diff_eq(Vec3::splat(4.0), 1e-6));
        assert_eq!(out.local_transform(2), a.local_transform(2));
    }

    #[test]
    fn from_parts_matches_parents_to_joints() {
        let padded = Pose::from_parts(vec![Transform::IDENTITY; 3], vec![None, Some(0)]);
        assert_eq!(padded.len(), 3);
        assert_eq!(padded.parent(1), Some(0));
        assert_eq!(padded.parent(2), None);

        let truncated = Pose::from_parts(vec![Transform::IDENTITY], vec![None, Some(0)]);
        assert_eq!(truncated.len(), 1);
        assert_eq!(truncated.validate(), Ok(()));
    }
}
