// Configuration module for reading Snake.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    pub debug: DebugConfig,
}

/// Values returned by GET / and POST /start
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Move policy knobs
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PolicyConfig {
    /// Seeds the random fallback with `rng_seed + turn` when set
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Hardcoded fallback, kept in sync with Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "tailchaser".to_string(),
                color: "#ff00ff".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            policy: PolicyConfig { rng_seed: None },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_toml_can_be_parsed() {
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_snake_toml_matches_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        let hardcoded = Config::default_hardcoded();

        assert_eq!(file_config.appearance.color, hardcoded.appearance.color);
        assert_eq!(file_config.appearance.apiversion, hardcoded.appearance.apiversion);
        assert_eq!(file_config.policy.rng_seed, hardcoded.policy.rng_seed);
        assert_eq!(file_config.debug.enabled, hardcoded.debug.enabled);
        assert_eq!(file_config.debug.log_file_path, hardcoded.debug.log_file_path);
    }

    #[test]
    fn test_policy_section_is_optional() {
        let config = Config::from_toml_str(
            r##"
            [appearance]
            apiversion = "1"
            author = "someone"
            color = "#123456"
            head = "default"
            tail = "default"

            [debug]
            enabled = true
            log_file_path = "out.jsonl"
            "##,
        )
        .unwrap();

        assert_eq!(config.policy.rng_seed, None);
        assert_eq!(config.appearance.color, "#123456");
        assert!(config.debug.enabled);
    }

    #[test]
    fn test_rng_seed_is_read() {
        let mut toml = String::from(
            "[appearance]\napiversion = \"1\"\nauthor = \"a\"\ncolor = \"#000000\"\nhead = \"h\"\ntail = \"t\"\n",
        );
        toml.push_str("[policy]\nrng_seed = 42\n[debug]\nenabled = false\nlog_file_path = \"x\"\n");
        let config = Config::from_toml_str(&toml).unwrap();
        assert_eq!(config.policy.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        assert!(Config::from_file("nonexistent.toml").is_err());
        assert!(Config::from_toml_str("[appearance]\ncolor = 5").is_err());
    }
}
