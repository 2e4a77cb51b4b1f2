//! Error types for animation and IK setup

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("IK chain has no joints")]
    EmptyChain,

    #[error("IK solve did not converge after {iterations} iterations (distance {distance})")]
    NotConverged { iterations: u32, distance: f32 },

    #[error("joint count mismatch: rest pose {rest}, bind pose {bind}, names {names}")]
    JointCountMismatch {
        rest: usize,
        bind: usize,
        names: usize,
    },

    #[error("joint {joint} references parent {parent} which is out of range")]
    ParentOutOfRange { joint: usize, parent: usize },

    #[error("parent chain of joint {joint} contains a cycle")]
    ParentCycle { joint: usize },

    #[error("unknown interpolation mode: {0}")]
    UnknownInterpolation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
