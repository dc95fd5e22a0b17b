mod policy;
pub mod ucb;

pub use policy::{ArmStats, BatchUpdateElement, Policy, PolicyStats, PolicyType};
pub use ucb::Ucb;
