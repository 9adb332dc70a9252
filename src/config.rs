use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure for codexr
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI display configuration
    #[serde(default)]
    pub ui: UIConfig,

    /// Simulated backend configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Enable colorful output
    #[serde(default = "default_colorful")]
    pub colorful: bool,

    /// Show the raw JSON record under the rendered answer
    #[serde(default = "default_show_raw")]
    pub show_raw: bool,

    /// Output format ("terminal", "json", "plain")
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Cosmetic "Thinking..." delay in milliseconds. Carries no scheduling
    /// contract; zero disables the spinner pause entirely.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
}

// Default value functions
fn default_colorful() -> bool {
    true
}
fn default_show_raw() -> bool {
    false
}
fn default_output_format() -> String {
    "terminal".to_string()
}
fn default_thinking_delay_ms() -> u64 {
    600
}

impl Default for UIConfig {
    fn default() -> Self {
        UIConfig {
            colorful: default_colorful(),
            show_raw: default_show_raw(),
            output_format: default_output_format(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            thinking_delay_ms: default_thinking_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ui: UIConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))
    }

    /// Load configuration from command line argument or default locations
    pub fn load(config_path: &Option<String>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::from_file(path);
        }

        // Try loading from default locations
        let default_paths = vec!["codexr.toml", ".codexr.toml", "~/.config/codexr/config.toml"];

        for path in default_paths {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                match Self::from_file(expanded_path.as_ref()) {
                    Ok(config) => return Ok(config),
                    Err(e) => eprintln!("Warning: Failed to load config from {}: {}", path, e),
                }
            }
        }

        // Return default config if no file found
        Ok(Self::default())
    }

    /// Save configuration to a file
    #[allow(dead_code)]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Merge with command-line arguments (CLI args take precedence)
    pub fn merge_with_args(&mut self, headless: bool, raw: bool) {
        if headless {
            self.ui.colorful = false;
        }
        if raw {
            self.ui.show_raw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.ui.colorful);
        assert!(!config.ui.show_raw);
        assert_eq!(config.ui.output_format, "terminal");
        assert_eq!(config.simulation.thinking_delay_ms, 600);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            output_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.output_format, "json");
        assert!(config.ui.colorful);
        assert_eq!(config.simulation.thinking_delay_ms, 600);
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let mut config = Config::default();
        config.merge_with_args(true, true);
        assert!(!config.ui.colorful);
        assert!(config.ui.show_raw);
    }
}
