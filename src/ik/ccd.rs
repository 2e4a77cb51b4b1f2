use super::chain::Chain;
use super::solver::{IkSolver, SolveResult, SolverConfig};
use crate::math::{rotation_arc, Transform};
use glam::Vec3;

/// Cyclic Coordinate Descent solver.
///
/// Rotates one joint at a time, from the joint nearest the end effector
/// back to the root, so that the effector swings onto the line from the
/// joint to the target.
#[derive(Debug, Clone, Default)]
pub struct CcdSolver {
    chain: Chain,
    config: SolverConfig,
}

impl CcdSolver {
    pub fn new(chain: Chain) -> Self {
        Self::with_config(chain, SolverConfig::default())
    }

    pub fn with_config(chain: Chain, config: SolverConfig) -> Self {
        Self { chain, config }
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    pub fn num_steps(&self) -> u32 {
        self.config.num_steps
    }

    pub fn threshold(&self) -> f32 {
        self.config.threshold
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut Chain {
        &mut self.chain
    }

    pub fn into_chain(self) -> Chain {
        self.chain
    }

    pub fn global_transform(&self, joint: usize) -> Transform {
        self.chain.global_transform(joint)
    }

    /// Runs up to `num_steps` sweeps toward `target`.
    ///
    /// Returns early as soon as the effector is within `threshold` of the
    /// target, including in the middle of a sweep.
    pub fn solve(&mut self, target: Vec3) -> SolveResult {
        let Some(last) = self.chain.joint_count().checked_sub(1) else {
            return SolveResult::empty_chain();
        };
        let threshold = self.config.threshold;
        let threshold_sq = threshold * threshold;

        for step in 0..self.config.num_steps {
            if self.distance_sq(last, target) < threshold_sq {
                return self.finish(target, step);
            }

            for joint in (0..last).rev() {
                let effector = self.chain.global_transform(last).position;
                let position = self.chain.global_transform(joint).position;

                let to_effector = effector - position;
                let to_goal = target - position;

                if to_goal.length_squared() > threshold && to_effector.length_squared() > 1e-12 {
                    let delta = rotation_arc(to_effector.normalize(), to_goal.normalize());
                    self.chain.rotate_joint_world(joint, delta);
                    self.chain.enforce_constraint(joint);
                }

                if self.distance_sq(last, target) < threshold_sq {
                    return self.finish(target, step + 1);
                }
            }

            log::trace!(
                "ccd step {}: distance {}",
                step,
                self.distance_sq(last, target).sqrt()
            );
        }

        self.finish(target, self.config.num_steps)
    }

    fn distance_sq(&self, last: usize, target: Vec3) -> f32 {
        (target - self.chain.global_transform(last).position).length_squared()
    }

    fn finish(&self, target: Vec3, iterations: u32) -> SolveResult {
        let effector = self.chain.end_effector().unwrap_or(target);
        let result = SolveResult::measure(target, effector, self.config.threshold, iterations);
        log::debug!(
            "ccd solve: converged={} iterations={} distance={}",
            result.converged,
            result.iterations,
            result.final_distance
        );
        result
    }
}

impl IkSolver for CcdSolver {
    fn chain(&self) -> &Chain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut Chain {
        &mut self.chain
    }

    fn config(&self) -> SolverConfig {
        self.config
    }

    fn solve(&mut self, target: Vec3) -> SolveResult {
        CcdSolver::solve(self, target)
    }
}
