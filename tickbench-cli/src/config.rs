//! Configuration loading from tick.toml
//!
//! Run configuration can be specified in a `tick.toml` file discovered by
//! walking up from the current directory. CLI flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tickbench_stats::DeviationFilter;

/// Tickbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TickConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Per-point time budget in seconds
    #[serde(default = "default_max_time")]
    pub max_time: f64,
    /// Outlier rejection: "none", "sigma" or "mad"
    #[serde(default)]
    pub deviation_filter: DeviationFilter,
    /// Ticks subtracted from reported aggregates to cancel the timestamp
    /// read's own cost. Omit to use the platform default.
    #[serde(default)]
    pub fixed_overhead: Option<i64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_time: default_max_time(),
            deviation_filter: DeviationFilter::default(),
            fixed_overhead: None,
        }
    }
}

fn default_max_time() -> f64 {
    0.5
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the console table (default true)
    #[serde(default = "default_console")]
    pub console: bool,
    /// CSV output path (omit to disable)
    #[serde(default)]
    pub csv: Option<String>,
    /// SVG chart output path (omit to disable)
    #[serde(default)]
    pub svg: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: default_console(),
            csv: None,
            svg: None,
        }
    }
}

fn default_console() -> bool {
    true
}

impl TickConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("tick.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TickConfig::default();
        assert!((config.runner.max_time - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.runner.deviation_filter, DeviationFilter::Mad);
        assert!(config.runner.fixed_overhead.is_none());
        assert!(config.output.console);
        assert!(config.output.csv.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            max_time = 2.0
            deviation_filter = "sigma"

            [output]
            csv = "results.csv"
        "#;

        let config: TickConfig = toml::from_str(toml_str).unwrap();
        assert!((config.runner.max_time - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.runner.deviation_filter, DeviationFilter::Sigma);
        assert_eq!(config.output.csv.as_deref(), Some("results.csv"));
        // Defaults should still apply
        assert!(config.output.console);
        assert!(config.output.svg.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: TickConfig = toml::from_str("[runner]\nfixed_overhead = 52\n").unwrap();
        assert_eq!(config.runner.fixed_overhead, Some(52));
        assert!((config.runner.max_time - 0.5).abs() < f64::EPSILON);
    }
}
