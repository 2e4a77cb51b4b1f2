use super::fast_track::{FastQuaternionTrack, FastVectorTrack};
use super::pose::Pose;
use super::track::{wrap_time, KeyframeTrack, QuaternionTrack, VectorTrack};
use super::transform_track::{optimize_transform_track, TransformTrack};
use glam::{Quat, Vec3};

/// A named set of joint tracks sampled together into a [`Pose`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip<V = VectorTrack, Q = QuaternionTrack> {
    name: String,
    tracks: Vec<TransformTrack<V, Q>>,
    start_time: f32,
    end_time: f32,
    looping: bool,
}

pub type FastAnimationClip = AnimationClip<FastVectorTrack, FastQuaternionTrack>;

impl AnimationClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self::empty(name.into())
    }

    pub fn builder(name: impl Into<String>) -> ClipBuilder {
        ClipBuilder::new(name)
    }
}

impl<V, Q> AnimationClip<V, Q>
where
    V: KeyframeTrack<Value = Vec3>,
    Q: KeyframeTrack<Value = Quat>,
{
    fn empty(name: String) -> Self {
        Self {
            name,
            tracks: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            looping: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    pub fn tracks(&self) -> &[TransformTrack<V, Q>] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Joint targeted by the track stored at `index`.
    pub fn joint_at(&self, index: usize) -> Option<usize> {
        self.tracks.get(index).map(TransformTrack::joint)
    }

    pub fn track(&self, joint: usize) -> Option<&TransformTrack<V, Q>> {
        self.tracks.iter().find(|t| t.joint() == joint)
    }

    /// Track for `joint`, appended if the clip has none yet.
    ///
    /// Call [`Self::recalculate_duration`] once all tracks are filled in.
    pub fn track_mut(&mut self, joint: usize) -> &mut TransformTrack<V, Q> {
        let index = match self.tracks.iter().position(|t| t.joint() == joint) {
            Some(index) => index,
            None => {
                self.tracks.push(TransformTrack::for_joint(joint));
                self.tracks.len() - 1
            }
        };
        &mut self.tracks[index]
    }

    pub fn recalculate_duration(&mut self) {
        let valid = || self.tracks.iter().filter(|t| t.is_valid());
        let start = valid().map(|t| t.start_time()).reduce(f32::min);
        let end = valid().map(|t| t.end_time()).reduce(f32::max);

        self.start_time = start.unwrap_or(0.0);
        self.end_time = end.unwrap_or(0.0);
    }

    /// Wraps (looping) or clamps `time` into the clip's range.
    pub fn adjust_time_to_fit_range(&self, time: f32) -> f32 {
        if self.looping {
            let duration = self.duration();
            if duration <= 0.0 {
                return 0.0;
            }
            wrap_time(time, self.start_time, duration)
        } else {
            time.clamp(self.start_time, self.end_time)
        }
    }

    /// Writes the animated components of every joint into `pose`.
    ///
    /// Returns the playback time after wrapping or clamping.
    pub fn sample(&self, pose: &mut Pose, time: f32) -> f32 {
        if self.duration() == 0.0 {
            return 0.0;
        }

        let time = self.adjust_time_to_fit_range(time);
        for track in &self.tracks {
            let joint = track.joint();
            if joint >= pose.len() {
                log::warn!(
                    "Clip '{}' animates joint {} but the pose has {} joints",
                    self.name,
                    joint,
                    pose.len()
                );
                continue;
            }
            let local = pose.local_transform(joint);
            let animated = track.sample(&local, time, self.looping);
            pose.set_local_transform(joint, animated);
        }

        time
    }
}

/// Builds a clip and computes its duration once all tracks are in.
pub struct ClipBuilder {
    clip: AnimationClip,
}

impl ClipBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            clip: AnimationClip::new(name),
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.clip.looping = looping;
        self
    }

    /// Adds a track, replacing any earlier track for the same joint.
    pub fn track(mut self, track: TransformTrack) -> Self {
        let joint = track.joint();
        *self.clip.track_mut(joint) = track;
        self
    }

    pub fn build(mut self) -> AnimationClip {
        self.clip.recalculate_duration();
        self.clip
    }
}

/// Rebuilds every track of `clip` with frame lookup tables.
pub fn optimize_clip(clip: &AnimationClip) -> FastAnimationClip {
    let mut fast = FastAnimationClip::empty(clip.name.clone());
    fast.looping = clip.looping;
    fast.tracks = clip.tracks.iter().map(optimize_transform_track).collect();
    fast.recalculate_duration();

    log::debug!(
        "Optimized clip '{}' ({} tracks, {:.3}s)",
        fast.name,
        fast.tracks.len(),
        fast.duration()
    );
    fast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Interpolation, KeyFrame, Track};
    use crate::math::Transform;

    fn vector_track(keys: &[(f32, Vec3)]) -> VectorTrack {
        Track::from_frames(
            Interpolation::Linear,
            keys.iter().map(|&(t, v)| KeyFrame::from_value(t, v)).collect(),
        )
    }

    fn two_track_clip() -> AnimationClip {
        let mut first = TransformTrack::new(0);
        first.position = vector_track(&[(0.0, Vec3::ZERO), (1.0, Vec3::X)]);
        let mut second = TransformTrack::new(1);
        second.scale = vector_track(&[(0.5, Vec3::ONE), (2.0, Vec3::splat(2.0))]);

        AnimationClip::builder("walk")
            .track(first)
            .track(second)
            .looping(false)
            .build()
    }

    #[test]
    fn duration_spans_all_valid_tracks() {
        let clip = two_track_clip();

        assert_eq!(clip.start_time(), 0.0);
        assert_eq!(clip.end_time(), 2.0);
        assert_eq!(clip.duration(), 2.0);
        assert_eq!(clip.joint_at(1), Some(1));
    }

    #[test]
    fn builder_replaces_track_for_same_joint() {
        let mut first = TransformTrack::new(2);
        first.position = vector_track(&[(0.0, Vec3::ZERO), (1.0, Vec3::X)]);
        let mut second = TransformTrack::new(2);
        second.position = vector_track(&[(0.0, Vec3::ZERO), (3.0, Vec3::Y)]);

        let clip = AnimationClip::builder("reach")
            .track(first)
            .track(second)
            .build();

        assert_eq!(clip.len(), 1);
        assert_eq!(clip.joint_at(0), Some(2));
        assert_eq!(clip.end_time(), 3.0);
    }

    #[test]
    fn track_mut_finds_or_creates() {
        let mut clip = AnimationClip::new("idle");

        clip.track_mut(3).position = vector_track(&[(0.0, Vec3::ZERO), (1.0, Vec3::Y)]);
        clip.track_mut(3).scale = vector_track(&[(0.0, Vec3::ONE), (1.0, Vec3::ONE)]);
        clip.track_mut(1);

        assert_eq!(clip.len(), 2);
        assert_eq!(clip.joint_at(0), Some(3));
        assert!(clip.track(3).unwrap().scale.len() == 2);
        assert!(clip.track(7).is_none());
    }

    #[test]
    fn zero_duration_clip_leaves_pose_alone() {
        let clip = AnimationClip::new("empty");
        let mut pose = Pose::new(1);
        pose.set_local_transform(0, Transform::from_position(Vec3::Z));

        assert_eq!(clip.sample(&mut pose, 0.7), 0.0);
        assert_eq!(pose.local_transform(0).position, Vec3::Z);
    }

    #[test]
    fn sample_clamps_and_preserves_rest_components() {
        let clip = two_track_clip();
        let mut pose = Pose::new(2);
        pose.set_local_transform(1, Transform::from_position(Vec3::new(0.0, 5.0, 0.0)));

        let time = clip.sample(&mut pose, 3.0);

        assert_eq!(time, 2.0);
        assert!(pose.local_transform(0).position.abs_diff_eq(Vec3::X, 1e-6));
        assert!(pose.local_transform(1).scale.abs_diff_eq(Vec3::splat(2.0), 1e-6));
        assert_eq!(pose.local_transform(1).position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn looping_sample_returns_wrapped_time() {
        let mut clip = two_track_clip();
        clip.set_looping(true);
        let mut pose = Pose::new(2);

        let time = clip.sample(&mut pose, 2.5);

        assert!((time - 0.5).abs() < 1e-6);
        assert!((clip.adjust_time_to_fit_range(-0.5) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn tracks_outside_the_pose_are_skipped() {
        let clip = two_track_clip();
        let mut pose = Pose::new(1);

        clip.sample(&mut pose, 0.5);

        assert!(pose.local_transform(0).position.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn optimized_clip_keeps_metadata() {
        let clip = two_track_clip();

        let fast = optimize_clip(&clip);

        assert_eq!(fast.name(), "walk");
        assert!(!fast.looping());
        assert_eq!(fast.len(), 2);
        assert_eq!(fast.duration(), clip.duration());
    }
}
