use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a track blends between neighbouring keyframes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    /// Step function: holds the value of the current keyframe.
    Constant,
    #[default]
    Linear,
    /// Cubic Hermite spline using the keyframe tangents.
    Cubic,
}

impl FromStr for Interpolation {
    type Err = Error;

    /// Parses glTF sampler interpolation names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STEP" => Ok(Self::Constant),
            "LINEAR" => Ok(Self::Linear),
            "CUBICSPLINE" => Ok(Self::Cubic),
            other => Err(Error::UnknownInterpolation(other.to_string())),
        }
    }
}
