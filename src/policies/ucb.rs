use super::policy::{ArmStats, BatchUpdateElement, Policy, PolicyStats, PolicyType};

use crate::config::BanditConfig;
use crate::errors::PolicyError;

use parking_lot::RwLock;
use tracing::{debug, info, trace};

#[derive(Clone, Debug, Default, PartialEq)]
struct UcbArm {
    count: u64,
    reward: f64,
}

impl UcbArm {
    fn new(count: u64, reward: f64) -> Self {
        Self { count, reward }
    }

    // only defined once the arm has been played
    fn score(&self, ln_total: f64) -> f64 {
        debug_assert!(self.count > 0, "scoring an unplayed arm");
        let bonus = ((2.0 * ln_total) / (self.count as f64)).sqrt();
        bonus + self.reward
    }

    fn update(&mut self, reward: f64) {
        // pinned at the maximum rather than wrapping on seeded counts
        self.count = self.count.saturating_add(1);
        let n = self.count as f64;
        self.reward = (self.reward * (n - 1.0) + reward) / n;
    }

    fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.count,
            mean_reward: self.reward,
        }
    }
}

fn check_update(n_arms: usize, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
    if arm_id >= n_arms {
        return Err(PolicyError::IndexOutOfRange { arm_id, n_arms });
    }
    if reward.is_nan() || reward < 0.0 {
        return Err(PolicyError::InvalidReward(reward));
    }
    Ok(())
}

/// UCB1 scores of every arm, `None` while some arm has never been played.
fn ucb_scores(arms: &[UcbArm]) -> Option<Vec<f64>> {
    if arms.iter().any(|arm| arm.count == 0) {
        return None;
    }
    let total_count = arms
        .iter()
        .map(|arm| arm.count)
        .fold(0u64, u64::saturating_add);
    let ln_total = (total_count as f64).ln();

    Some(arms.iter().map(|arm| arm.score(ln_total)).collect())
}

/// Index of the maximum value, the last one winning ties.
fn last_max_index(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |best, (i, &value)| {
            if value >= values[best] {
                i
            } else {
                best
            }
        })
}

/// UCB1 estimator over a fixed set of arms.
///
/// Statistics live behind a single reader/writer lock: `select_arm` and the
/// accessors share it, `init` and `update` take it exclusively. Selecting an
/// arm and reporting its reward are two separate critical sections, so other
/// callers may interleave between them.
#[derive(Debug)]
pub struct Ucb {
    arms: RwLock<Vec<UcbArm>>,
}

impl Ucb {
    pub fn new(n_arms: usize) -> Result<Self, PolicyError> {
        if n_arms == 0 {
            return Err(PolicyError::InvalidArmCount(n_arms));
        }
        info!(n_arms, "Created UCB policy");

        Ok(Self {
            arms: RwLock::new(vec![UcbArm::default(); n_arms]),
        })
    }

    /// Seeds the estimator with existing per-arm pull counts and mean rewards.
    ///
    /// Contents are taken as given. Fails with `InvalidLength` when the two
    /// vectors differ in length and with `InvalidArmCount(0)` when both are empty.
    pub fn from_parts(counts: Vec<u64>, rewards: Vec<f64>) -> Result<Self, PolicyError> {
        if counts.len() != rewards.len() {
            return Err(PolicyError::InvalidLength {
                counts: counts.len(),
                rewards: rewards.len(),
            });
        }
        if counts.is_empty() {
            return Err(PolicyError::InvalidArmCount(0));
        }
        info!(n_arms = counts.len(), "Restored UCB policy");

        let arms = counts
            .into_iter()
            .zip(rewards)
            .map(|(count, reward)| UcbArm::new(count, reward))
            .collect();

        Ok(Self {
            arms: RwLock::new(arms),
        })
    }

    pub fn from_config(config: &BanditConfig) -> Result<Self, PolicyError> {
        Self::new(config.arms)
    }

    pub fn init(&self, n_arms: usize) -> Result<(), PolicyError> {
        if n_arms == 0 {
            return Err(PolicyError::InvalidArmCount(n_arms));
        }

        let mut arms = self.arms.write();
        *arms = vec![UcbArm::default(); n_arms];
        info!(n_arms, "Reset UCB policy");

        Ok(())
    }

    pub fn n_arms(&self) -> usize {
        self.arms.read().len()
    }

    /// Picks every unplayed arm first, in index order, then the arm with the
    /// highest upper confidence bound. `_signal` is not used by UCB1.
    pub fn select_arm(&self, _signal: f64) -> usize {
        let arms = self.arms.read();

        if let Some(arm_id) = arms.iter().position(|arm| arm.count == 0) {
            trace!(arm_id, cold_start = true, "Selected arm");
            return arm_id;
        }

        let arm_id = ucb_scores(&arms)
            .map(|scores| last_max_index(&scores))
            .unwrap_or_default();
        trace!(arm_id, cold_start = false, "Selected arm");

        arm_id
    }

    pub fn update(&self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        let mut arms = self.arms.write();
        check_update(arms.len(), arm_id, reward)?;

        let arm = &mut arms[arm_id];
        arm.update(reward);
        debug!(arm_id, reward, pulls = arm.count, mean_reward = arm.reward, "Updated arm");

        Ok(())
    }

    /// Applies all updates under one write lock, or none of them if any is invalid.
    pub fn update_batch(&self, updates: &[BatchUpdateElement]) -> Result<(), PolicyError> {
        let mut arms = self.arms.write();
        let n_arms = arms.len();
        updates
            .iter()
            .try_for_each(|&(arm_id, reward)| check_update(n_arms, arm_id, reward))?;

        updates
            .iter()
            .for_each(|&(arm_id, reward)| arms[arm_id].update(reward));
        debug!(updates = updates.len(), "Applied batch update");

        Ok(())
    }

    pub fn counts(&self) -> Vec<u64> {
        self.arms.read().iter().map(|arm| arm.count).collect()
    }

    pub fn rewards(&self) -> Vec<f64> {
        self.arms.read().iter().map(|arm| arm.reward).collect()
    }

    pub fn scores(&self) -> Option<Vec<f64>> {
        ucb_scores(&self.arms.read())
    }

    pub fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.read().iter().map(UcbArm::stats).collect(),
        }
    }
}

impl Policy for Ucb {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Ucb {
            arms: self.n_arms(),
        }
    }

    fn init(&self, n_arms: usize) -> Result<(), PolicyError> {
        Ucb::init(self, n_arms)
    }

    fn select_arm(&self, signal: f64) -> usize {
        Ucb::select_arm(self, signal)
    }

    fn update(&self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        Ucb::update(self, arm_id, reward)
    }

    fn update_batch(&self, updates: &[BatchUpdateElement]) -> Result<(), PolicyError> {
        Ucb::update_batch(self, updates)
    }

    fn counts(&self) -> Vec<u64> {
        Ucb::counts(self)
    }

    fn rewards(&self) -> Vec<f64> {
        Ucb::rewards(self)
    }

    fn stats(&self) -> PolicyStats {
        Ucb::stats(self)
    }
}
