use super::chain::Chain;
use crate::error::{Error, Result};
use crate::math::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Iteration budget and convergence distance shared by the IK solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub num_steps: u32,
    pub threshold: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_steps: 15,
            threshold: 0.00001,
        }
    }
}

impl SolverConfig {
    pub fn new(num_steps: u32, threshold: f32) -> Self {
        Self {
            num_steps,
            threshold,
        }
    }

    pub fn with_num_steps(mut self, num_steps: u32) -> Self {
        self.num_steps = num_steps;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub converged: bool,
    pub iterations: u32,
    pub final_distance: f32,
}

impl SolveResult {
    pub(crate) fn empty_chain() -> Self {
        Self {
            converged: false,
            iterations: 0,
            final_distance: 0.0,
        }
    }

    pub(crate) fn measure(target: Vec3, effector: Vec3, threshold: f32, iterations: u32) -> Self {
        let distance_sq = (target - effector).length_squared();
        Self {
            converged: distance_sq < threshold * threshold,
            iterations,
            final_distance: distance_sq.sqrt(),
        }
    }

    /// Converts a best-effort result into a strict one.
    pub fn check(self) -> Result<Self> {
        if self.converged {
            Ok(self)
        } else if self.iterations == 0 && self.final_distance == 0.0 {
            Err(Error::EmptyChain)
        } else {
            Err(Error::NotConverged {
                iterations: self.iterations,
                distance: self.final_distance,
            })
        }
    }
}

/// Moves the end of a [`Chain`] toward a target position.
pub trait IkSolver {
    fn chain(&self) -> &Chain;

    fn chain_mut(&mut self) -> &mut Chain;

    fn config(&self) -> SolverConfig;

    fn solve(&mut self, target: Vec3) -> SolveResult;

    fn global_transform(&self, joint: usize) -> Transform {
        self.chain().global_transform(joint)
    }
}

/// Unit vector along `v`, or +Y when `v` is too short to have a direction.
pub(crate) fn direction_or_up(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > 0.0001 {
        v / len
    } else {
        Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = SolverConfig::default();

        assert_eq!(config.num_steps, 15);
        assert_eq!(config.threshold, 1e-5);
    }

    #[test]
    fn check_maps_failures_to_errors() {
        assert_eq!(SolveResult::empty_chain().check(), Err(Error::EmptyChain));

        let missed = SolveResult::measure(Vec3::X, Vec3::ZERO, 0.1, 15);
        assert_eq!(
            missed.check(),
            Err(Error::NotConverged {
                iterations: 15,
                distance: 1.0
            })
        );

        let hit = SolveResult::measure(Vec3::X, Vec3::X, 0.1, 3);
        assert_eq!(hit.check(), Ok(hit));
    }
}
