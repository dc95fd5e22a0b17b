use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BanditConfig {
    pub arms: usize,
}

impl BanditConfig {
    /// Reads an optional `bandit.{toml,json,yaml,...}` file, overridden by `BANDIT_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(
            Config::builder()
                .add_source(File::with_name("bandit").required(false))
                .add_source(Environment::with_prefix("BANDIT")),
        )
    }

    pub fn from_sources(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn from_file_source() {
        let builder =
            Config::builder().add_source(File::from_str(r#"{"arms": 4}"#, FileFormat::Json));
        let config = BanditConfig::from_sources(builder).unwrap();
        assert_eq!(config, BanditConfig { arms: 4 });
    }

    #[test]
    fn overrides_take_precedence() {
        let builder = Config::builder()
            .add_source(File::from_str("arms = 2", FileFormat::Toml))
            .set_override("arms", 7)
            .unwrap();
        let config = BanditConfig::from_sources(builder).unwrap();
        assert_eq!(config.arms, 7);
    }

    #[test]
    fn missing_arms() {
        assert!(BanditConfig::from_sources(Config::builder()).is_err());
    }
}
