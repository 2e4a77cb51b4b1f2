//! # anim-ik
//!
//! Skeletal animation sampling and inverse kinematics on top of glam.
//!
//! ## Features
//! - Keyframe tracks with constant, linear and cubic Hermite interpolation
//! - Lookup-table accelerated tracks for fast per-frame sampling
//! - Animation clips sampled into hierarchical poses, matrix palettes for skinning
//! - Skeletons with rest/bind poses and inverse bind matrices
//! - CCD and FABRIK solvers with optional joint constraints
//! - Debug line lists for poses and IK chains
//!
//! ## Example
//! ```rust,ignore
//! use anim_ik::ik::{Chain, FabrikSolver};
//! use glam::Vec3;
//!
//! let chain = Chain::builder()
//!     .add_offset(Vec3::ZERO)
//!     .add_offset(Vec3::Y)
//!     .add_offset(Vec3::Y)
//!     .build();
//!
//! let mut solver = FabrikSolver::new(chain);
//! let result = solver.solve(Vec3::new(1.0, 1.5, 0.0));
//! println!("Converged: {}, iterations: {}", result.converged, result.iterations);
//! ```

pub mod anim;
pub mod debug;
pub mod error;
pub mod ik;
pub mod math;

pub use anim::{
    optimize_clip, AnimationClip, ClipBuilder, FastAnimationClip, FastTrack, Interpolation,
    KeyFrame, KeyframeTrack, Pose, Skeleton, Track, TransformTrack,
};
pub use debug::{DebugLines, LineVertex};
pub use error::{Error, Result};
pub use ik::{
    BallSocketConstraint, CcdSolver, Chain, ChainBuilder, Constraint, FabrikSolver,
    HingeConstraint, IkSolver, Joint, SolveResult, SolverConfig,
};
pub use math::Transform;
