use super::fast_track::{optimize_track, FastQuaternionTrack, FastVectorTrack};
use super::track::{KeyframeTrack, QuaternionTrack, VectorTrack};
use crate::math::Transform;
use glam::{Quat, Vec3};

/// Position, rotation and scale tracks animating a single joint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformTrack<V = VectorTrack, Q = QuaternionTrack> {
    joint: usize,
    pub position: V,
    pub rotation: Q,
    pub scale: V,
}

pub type FastTransformTrack = TransformTrack<FastVectorTrack, FastQuaternionTrack>;

impl TransformTrack {
    pub fn new(joint: usize) -> Self {
        Self::for_joint(joint)
    }
}

impl<V, Q> TransformTrack<V, Q>
where
    V: KeyframeTrack<Value = Vec3>,
    Q: KeyframeTrack<Value = Quat>,
{
    pub(crate) fn for_joint(joint: usize) -> Self {
        Self {
            joint,
            position: V::default(),
            rotation: Q::default(),
            scale: V::default(),
        }
    }

    pub fn joint(&self) -> usize {
        self.joint
    }

    pub fn set_joint(&mut self, joint: usize) {
        self.joint = joint;
    }

    fn spans(&self) -> impl Iterator<Item = (f32, f32)> {
        [self.position.span(), self.rotation.span(), self.scale.span()]
            .into_iter()
            .flatten()
    }

    /// Earliest start over the sub-tracks that can be sampled.
    pub fn start_time(&self) -> f32 {
        self.spans().map(|(start, _)| start).reduce(f32::min).unwrap_or(0.0)
    }

    /// Latest end over the sub-tracks that can be sampled.
    pub fn end_time(&self) -> f32 {
        self.spans().map(|(_, end)| end).reduce(f32::max).unwrap_or(0.0)
    }

    pub fn is_valid(&self) -> bool {
        self.spans().next().is_some()
    }

    /// Overwrites the components of `base` this track animates.
    pub fn sample(&self, base: &Transform, time: f32, looping: bool) -> Transform {
        let mut result = *base;
        if self.position.len() > 1 {
            result.position = self.position.sample(time, looping);
        }
        if self.rotation.len() > 1 {
            result.rotation = self.rotation.sample(time, looping);
        }
        if self.scale.len() > 1 {
            result.scale = self.scale.sample(time, looping);
        }
        result
    }
}

pub fn optimize_transform_track(track: &TransformTrack) -> FastTransformTrack {
    FastTransformTrack {
        joint: track.joint,
        position: optimize_track(&track.position),
        rotation: optimize_track(&track.rotation),
        scale: optimize_track(&track.scale),
    }
}
