//! Rest pose, bind pose and joint names shared by every animated instance

use super::pose::Pose;
use crate::error::{Error, Result};
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// The fixed rig: rest pose, bind pose, inverse bind matrices and joint names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkeletonData", into = "SkeletonData")]
pub struct Skeleton {
    rest_pose: Pose,
    bind_pose: Pose,
    inverse_bind_pose: Vec<Mat4>,
    joint_names: Vec<String>,
}

impl Skeleton {
    pub fn new(rest_pose: Pose, bind_pose: Pose, joint_names: Vec<String>) -> Result<Self> {
        let mut skeleton = Self::default();
        skeleton.set(rest_pose, bind_pose, joint_names)?;
        Ok(skeleton)
    }

    /// Replaces the rig and recomputes the inverse bind matrices.
    ///
    /// On error the skeleton is left untouched.
    pub fn set(
        &mut self,
        rest_pose: Pose,
        bind_pose: Pose,
        joint_names: Vec<String>,
    ) -> Result<()> {
        if rest_pose.len() != bind_pose.len() || bind_pose.len() != joint_names.len() {
            return Err(Error::JointCountMismatch {
                rest: rest_pose.len(),
                bind: bind_pose.len(),
                names: joint_names.len(),
            });
        }
        rest_pose.validate()?;
        bind_pose.validate()?;

        self.rest_pose = rest_pose;
        self.bind_pose = bind_pose;
        self.joint_names = joint_names;
        self.update_inverse_bind_pose();

        log::debug!("Skeleton set with {} joints", self.joint_names.len());
        Ok(())
    }

    fn update_inverse_bind_pose(&mut self) {
        self.inverse_bind_pose = (0..self.bind_pose.len())
            .map(|i| self.bind_pose.global_transform(i).to_matrix().inverse())
            .collect();
    }

    pub fn rest_pose(&self) -> &Pose {
        &self.rest_pose
    }

    pub fn bind_pose(&self) -> &Pose {
        &self.bind_pose
    }

    pub fn inverse_bind_pose(&self) -> &[Mat4] {
        &self.inverse_bind_pose
    }

    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    pub fn joint_name(&self, joint: usize) -> Option<&str> {
        self.joint_names.get(joint).map(String::as_str)
    }

    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.joint_names.iter().position(|n| n == name)
    }

    pub fn joint_count(&self) -> usize {
        self.joint_names.len()
    }

    /// Fills `out` with `global(pose, i) * inverse_bind(i)` for GPU skinning.
    pub fn skin_matrices(&self, pose: &Pose, out: &mut Vec<Mat4>) {
        pose.matrix_palette(out);
        for (matrix, inverse_bind) in out.iter_mut().zip(&self.inverse_bind_pose) {
            *matrix *= *inverse_bind;
        }
    }
}

/// Serialized form; the inverse bind matrices are derived on load.
#[derive(Serialize, Deserialize)]
struct SkeletonData {
    rest_pose: Pose,
    bind_pose: Pose,
    joint_names: Vec<String>,
}

impl TryFrom<SkeletonData> for Skeleton {
    type Error = Error;

    fn try_from(data: SkeletonData) -> Result<Self> {
        Skeleton::new(data.rest_pose, data.bind_pose, data.joint_names)
    }
}

impl From<Skeleton> for SkeletonData {
    fn from(skeleton: Skeleton) -> Self {
        Self {
            rest_pose: skeleton.rest_pose,
            bind_pose: skeleton.bind_pose,
            joint_names: skeleton.joint_names,
        }
    }
}
