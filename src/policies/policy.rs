use super::ucb::Ucb;

use crate::errors::PolicyError;

use serde::{Deserialize, Serialize};

pub type BatchUpdateElement = (usize, f64);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicyStats {
    pub arms: Vec<ArmStats>,
}

impl PolicyStats {
    pub fn total_pulls(&self) -> u64 {
        self.arms.iter().map(|arm| arm.pulls).sum()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum PolicyType {
    Ucb { arms: usize },
}

impl PolicyType {
    pub fn into_inner(self) -> Result<Box<dyn Policy + Send + Sync>, PolicyError> {
        match self {
            PolicyType::Ucb { arms } => Ok(Box::new(Ucb::new(arms)?)),
        }
    }
}

/// Shared contract of arm selection strategies.
///
/// Implementations synchronize internally, so every method takes `&self` and a
/// policy can be shared between threads behind an `Arc`.
pub trait Policy {
    fn policy_type(&self) -> PolicyType;
    /// Discards all statistics and starts over with `n_arms` unplayed arms.
    fn init(&self, n_arms: usize) -> Result<(), PolicyError>;
    /// Picks the next arm to play. `signal` is an exploration input that some
    /// strategies consume and others ignore.
    fn select_arm(&self, signal: f64) -> usize;
    fn update(&self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;
    fn update_batch(&self, updates: &[BatchUpdateElement]) -> Result<(), PolicyError>;
    fn counts(&self) -> Vec<u64>;
    fn rewards(&self) -> Vec<f64>;
    fn stats(&self) -> PolicyStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_type_from_json() {
        let policy_type: PolicyType = serde_json::from_str(r#"{"Ucb": {"arms": 3}}"#).unwrap();
        assert_eq!(policy_type, PolicyType::Ucb { arms: 3 });

        let policy = policy_type.into_inner().unwrap();
        assert_eq!(policy.policy_type(), PolicyType::Ucb { arms: 3 });
        assert_eq!(policy.counts(), vec![0, 0, 0]);
    }

    #[test]
    fn policy_type_without_arms() {
        let result = PolicyType::Ucb { arms: 0 }.into_inner();
        assert_eq!(result.err(), Some(PolicyError::InvalidArmCount(0)));
    }

    #[test]
    fn boxed_policy_loop() {
        let policy = PolicyType::Ucb { arms: 2 }.into_inner().unwrap();

        for _ in 0..10 {
            let arm_id = policy.select_arm(0.0);
            policy.update(arm_id, 1.0).unwrap();
        }
        assert_eq!(policy.stats().total_pulls(), 10);
    }

    #[test]
    fn stats_serialization() {
        let stats = PolicyStats {
            arms: vec![
                ArmStats {
                    pulls: 2,
                    mean_reward: 0.5,
                },
                ArmStats {
                    pulls: 0,
                    mean_reward: 0.0,
                },
            ],
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "arms": [
                    {"pulls": 2, "mean_reward": 0.5},
                    {"pulls": 0, "mean_reward": 0.0},
                ]
            })
        );
    }
}
