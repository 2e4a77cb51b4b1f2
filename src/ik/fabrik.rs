use super::chain::Chain;
use super::solver::{direction_or_up, IkSolver, SolveResult, SolverConfig};
use crate::math::{rotation_arc, Transform};
use glam::Vec3;

/// Forward And Backward Reaching IK.
///
/// Works on world-space joint positions with rigid segment lengths, then
/// converts the solved positions back into local rotations on the chain.
#[derive(Debug, Clone, Default)]
pub struct FabrikSolver {
    chain: Chain,
    config: SolverConfig,
    world_chain: Vec<Vec3>,
    lengths: Vec<f32>,
}

impl FabrikSolver {
    pub fn new(chain: Chain) -> Self {
        Self::with_config(chain, SolverConfig::default())
    }

    pub fn with_config(chain: Chain, config: SolverConfig) -> Self {
        Self {
            chain,
            config,
            world_chain: Vec::new(),
            lengths: Vec::new(),
        }
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

    /// Segment lengths recorded by the last solve; `distances()[0]` is 0.
    pub fn distances(&self) -> &[f32] {
        &self.lengths
    }

    /// Joint positions from the last solve.
    pub fn world_positions(&self) -> &[Vec3] {
        &self.world_chain
    }

    pub fn solve(&mut self, target: Vec3) -> SolveResult {
        if self.chain.is_empty() {
            return SolveResult::empty_chain();
        }

        self.chain_to_world();
        let base = self.world_chain[0];
        let threshold_sq = self.config.threshold * self.config.threshold;

        let reach: f32 = self.lengths.iter().sum();
        if (target - base).length() > reach {
            self.stretch_towards(target);
            self.world_to_chain();
            return self.finish(target, 1);
        }

        for step in 0..self.config.num_steps {
            if (target - self.effector()).length_squared() < threshold_sq {
                self.world_to_chain();
                return self.finish(target, step);
            }

            self.iterate_backward(target);
            self.iterate_forward(base);

            log::trace!(
                "fabrik step {}: distance {}",
                step,
                (target - self.effector()).length()
            );
        }

        self.world_to_chain();
        self.finish(target, self.config.num_steps)
    }

    fn effector(&self) -> Vec3 {
        self.world_chain.last().copied().unwrap_or(Vec3::ZERO)
    }

    fn finish(&self, target: Vec3, iterations: u32) -> SolveResult {
        let result =
            SolveResult::measure(target, self.effector(), self.config.threshold, iterations);
        log::debug!(
            "fabrik solve: converged={} iterations={} distance={}",
            result.converged,
            result.iterations,
            result.final_distance
        );
        result
    }

    fn chain_to_world(&mut self) {
        self.world_chain = self.chain.global_positions();
        self.lengths.clear();
        self.lengths.push(0.0);
        self.lengths.extend(self.world_chain.windows(2).map(|w| (w[1] - w[0]).length()));
    }

    fn iterate_backward(&mut self, goal: Vec3) {
        let last = self.world_chain.len() - 1;
        self.world_chain[last] = goal;

        for i in (0..last).rev() {
            let next = self.world_chain[i + 1];
            let direction = direction_or_up(self.world_chain[i] - next);
            self.world_chain[i] = next + direction * self.lengths[i + 1];
        }
    }

    fn iterate_forward(&mut self, base: Vec3) {
        self.world_chain[0] = base;

        for i in 1..self.world_chain.len() {
            let prev = self.world_chain[i - 1];
            let mut direction = direction_or_up(self.world_chain[i] - prev);

            if i >= 2 {
                let incoming = prev - self.world_chain[i - 2];
                direction = self.chain.joints[i - 1].apply_constraint(direction, incoming);
            }

            self.world_chain[i] = prev + direction * self.lengths[i];
        }
    }

    fn stretch_towards(&mut self, target: Vec3) {
        let base = self.world_chain[0];
        let direction = (target - base).normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }

        for i in 1..self.world_chain.len() {
            self.world_chain[i] = self.world_chain[i - 1] + direction * self.lengths[i];
        }
    }

    /// Rotates each joint so the segment to its child points along the solved
    /// segment. Parents are fixed first, so every joint sees its final position.
    fn world_to_chain(&mut self) {
        for i in 0..self.chain.joint_count().saturating_sub(1) {
            let world = self.chain.global_transform(i);
            let next = self.chain.global_transform(i + 1).position;
            let inverse = world.rotation.inverse();

            let to_next = inverse * (next - world.position);
            let to_desired = inverse * (self.world_chain[i + 1] - world.position);

            if to_next.length_squared() < 1e-12 || to_desired.length_squared() < 1e-12 {
                continue;
            }

            let delta = rotation_arc(to_next.normalize(), to_desired.normalize());
            let local = &mut self.chain.joints[i].local;
            local.rotation = (local.rotation * delta).normalize();
        }
    }
}

impl IkSolver for FabrikSolver {
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
        FabrikSolver::solve(self, target)
    }
}
