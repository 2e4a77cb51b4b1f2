//! Inverse Kinematics module
//!
//! Unbranched joint chains stored as local transforms, plus the CCD and
//! FABRIK solvers that drive their end effector toward a target.

pub mod ccd;
pub mod chain;
pub mod constraint;
pub mod fabrik;
pub mod joint;
pub mod solver;

pub use ccd::CcdSolver;
pub use chain::{Chain, ChainBuilder};
pub use constraint::{BallSocketConstraint, Constraint, HingeConstraint};
pub use fabrik::FabrikSolver;
pub use joint::Joint;
pub use solver::{IkSolver, SolveResult, SolverConfig};
