//! Layered configuration for the Quotedeck binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `QUOTEDECK__GENERATOR__DAYS=90`.
pub const ENV_PREFIX: &str = "QUOTEDECK";

/// Root configuration object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    /// Base-price overrides keyed by symbol.
    #[serde(default)]
    pub seeds: HashMap<String, Decimal>,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_days")]
    pub days: usize,
    /// Fixed random seed; unset means a fresh series on every run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            rsi_period: default_rsi_period(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// Also write daily-rolling log files at this path.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

fn default_days() -> usize {
    180
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_rsi_period() -> usize {
    14
}

fn default_log_level() -> String {
    "info".into()
}

/// Builder for loading [`AppConfig`] from a directory of TOML files plus the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
    env: Option<String>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            env: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Layers `{dir}/{env}.toml` on top of `{dir}/default.toml`.
    pub fn with_env(mut self, env: Option<&str>) -> Self {
        self.env = env.map(str::to_string);
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<AppConfig> {
        let mut builder = Config::builder()
            .add_source(File::from(self.dir.join("default.toml")).required(false));
        if let Some(env) = &self.env {
            builder = builder
                .add_source(File::from(self.dir.join(format!("{env}.toml"))).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .with_context(|| format!("failed to read configuration from {}", self.dir.display()))?;
        config
            .try_deserialize()
            .context("failed to parse configuration")
    }
}

/// Loads configuration from `./config` for the given environment name.
pub fn load_config(env: Option<&str>) -> Result<AppConfig> {
    ConfigLoader::new("config").with_env(env).load()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let cfg = ConfigLoader::new(dir.path())
            .with_env_prefix("QDTEST_EMPTY")
            .load()
            .unwrap();
        assert_eq!(cfg.generator.days, 180);
        assert_eq!(cfg.generator.seed, None);
        assert_eq!(cfg.indicators, IndicatorConfig::default());
        assert_eq!(cfg.log.level, "info");
        assert!(cfg.seeds.is_empty());
    }

    #[test]
    fn environment_file_overrides_default_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[generator]\ndays = 120\nseed = 7\n\n[seeds]\n\"2330\" = 980.5\nNVDA = 145\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("demo.toml"),
            "[generator]\ndays = 30\n\n[indicators]\nrsi_period = 9\n\n[log]\njson = true\n",
        )
        .unwrap();

        let cfg = ConfigLoader::new(dir.path())
            .with_env(Some("demo"))
            .with_env_prefix("QDTEST_FILES")
            .load()
            .unwrap();
        assert_eq!(cfg.generator.days, 30);
        assert_eq!(cfg.generator.seed, Some(7));
        assert_eq!(cfg.indicators.rsi_period, 9);
        assert_eq!(cfg.indicators.macd_slow, 26);
        assert!(cfg.log.json);
        assert_eq!(cfg.seeds.get("2330"), Some(&dec!(980.5)));
        // Keys are case-folded by the loader.
        let nvda = cfg
            .seeds
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case("nvda"))
            .map(|(_, price)| *price);
        assert_eq!(nvda, Some(dec!(145)));
    }

    #[test]
    fn environment_variables_win() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[generator]\ndays = 120\n").unwrap();
        std::env::set_var("QDTEST_ENV__GENERATOR__DAYS", "45");
        let cfg = ConfigLoader::new(dir.path())
            .with_env_prefix("QDTEST_ENV")
            .load()
            .unwrap();
        std::env::remove_var("QDTEST_ENV__GENERATOR__DAYS");
        assert_eq!(cfg.generator.days, 45);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[generator]\ndays = \"many\"\n").unwrap();
        let err = ConfigLoader::new(dir.path())
            .with_env_prefix("QDTEST_BAD")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse configuration"));
    }
}
