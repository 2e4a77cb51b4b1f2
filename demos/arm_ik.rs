use anim_ik::debug::DebugLines;
use anim_ik::ik::{BallSocketConstraint, CcdSolver, Chain, FabrikSolver, IkSolver, SolverConfig};
use anim_ik::math::Transform;
use glam::Vec3;

fn build_arm() -> Chain {
    Chain::builder()
        .add_offset(Vec3::ZERO)
        .add_link_with_constraint(
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            BallSocketConstraint::new(60.0),
        )
        .add_link_with_constraint(
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            BallSocketConstraint::new(60.0),
        )
        .add_offset(Vec3::new(0.0, 1.0, 0.0))
        .build()
}

fn run(name: &str, solver: &mut dyn IkSolver, targets: &[Vec3]) {
    let mut lines = DebugLines::new();

    for &target in targets {
        let result = solver.solve(target);
        let effector = solver.chain().end_effector().unwrap_or(Vec3::ZERO);

        log::info!(
            "{}: target {:.2?} -> effector {:.3?} (converged: {}, iterations: {}, distance: {:.5})",
            name,
            target,
            effector,
            result.converged,
            result.iterations,
            result.final_distance
        );

        if let Err(e) = result.check() {
            log::warn!("{}: {}", name, e);
        }

        lines.clear();
        lines.add_chain(solver.chain());
        lines.add_target(target, 0.12);
    }

    log::info!(
        "{}: last frame has {} debug lines ({} bytes)",
        name,
        lines.line_count(),
        lines.as_bytes().len()
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let targets = [
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(1.5, 1.0, 0.5),
        Vec3::new(-1.0, 1.5, 1.0),
        Vec3::new(0.0, 6.0, 0.0),
    ];
    let config = SolverConfig::default().with_num_steps(30);

    let mut ccd = CcdSolver::with_config(build_arm(), config);
    run("CCD", &mut ccd, &targets);

    let mut fabrik = FabrikSolver::with_config(build_arm(), config);
    run("FABRIK", &mut fabrik, &targets);
}
