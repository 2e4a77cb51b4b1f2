//! Skeletal animation module
//!
//! Keyframe tracks, clips that sample them into poses, and the skeleton
//! that holds the bind and rest poses.

pub mod clip;
pub mod fast_track;
pub mod frame;
pub mod interpolation;
pub mod pose;
pub mod skeleton;
pub mod track;
pub mod transform_track;
pub mod value;

pub use clip::{optimize_clip, AnimationClip, ClipBuilder, FastAnimationClip};
pub use fast_track::{
    optimize_track, FastQuaternionTrack, FastScalarTrack, FastTrack, FastVectorTrack,
    SAMPLES_PER_SECOND,
};
pub use frame::{KeyFrame, QuaternionFrame, ScalarFrame, VectorFrame};
pub use interpolation::Interpolation;
pub use pose::Pose;
pub use skeleton::Skeleton;
pub use track::{KeyframeTrack, QuaternionTrack, ScalarTrack, Track, VectorTrack};
pub use transform_track::{optimize_transform_track, FastTransformTrack, TransformTrack};
pub use value::TrackValue;
