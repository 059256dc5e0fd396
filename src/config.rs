use crate::shape::DEFAULT_STEPS;
use crate::types::DonutMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub merge: MergeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { port: 3000 }
    }
}

/// Defaults applied when a request omits `steps` or `mode`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MergeConfig {
    pub steps: u32,
    pub mode: DonutMode,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            steps: DEFAULT_STEPS,
            mode: DonutMode::default(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [merge]
            steps = 32
            mode = "per-sensor-donut"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.merge.steps, 32);
        assert_eq!(config.merge.mode, DonutMode::PerSensorDonut);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.merge.steps, 64);
        assert_eq!(config.merge.mode, DonutMode::AggregateThenSubtract);
    }
}
