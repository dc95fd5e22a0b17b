use thiserror::Error;

pub use config::ConfigError;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Invalid number of arms {0}, at least one arm is required")]
    InvalidArmCount(usize),
    #[error("Got {counts} counts but {rewards} rewards")]
    InvalidLength { counts: usize, rewards: usize },
    #[error("Arm {arm_id} out of range for {n_arms} arms")]
    IndexOutOfRange { arm_id: usize, n_arms: usize },
    #[error("Invalid reward {0}, rewards must be non-negative")]
    InvalidReward(f64),
}
