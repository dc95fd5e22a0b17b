//! Upper confidence bound (UCB1) arm selection for multi-armed bandits.
//!
//! [`Ucb`] keeps per-arm pull counts and mean rewards behind a reader/writer
//! lock, so a single estimator can be shared by many callers running the
//! select, observe, update loop:
//!
//! ```
//! use ucb_bandit::Ucb;
//!
//! let policy = Ucb::new(3)?;
//! let arm_id = policy.select_arm(0.0);
//! policy.update(arm_id, 1.0)?;
//! assert_eq!(policy.counts().iter().sum::<u64>(), 1);
//! # Ok::<(), ucb_bandit::errors::PolicyError>(())
//! ```
pub mod config;
pub mod errors;
pub mod policies;

pub use crate::config::BanditConfig;
pub use crate::errors::PolicyError;
pub use crate::policies::{ArmStats, BatchUpdateElement, Policy, PolicyStats, PolicyType, Ucb};
