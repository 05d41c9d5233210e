//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.nodesummary.toml` files.

use crate::analysis::DEFAULT_TOP_N;
use crate::runs::{TagMode, TagRule, DEFAULT_SUFFIX};
use crate::scanner::Category;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".nodesummary.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Run file settings.
    #[serde(default)]
    pub runs: RunsConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Number of nodes kept per robustness/specificity table.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Run discovery and tagging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunsConfig {
    /// File name ending that marks a run file.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Suffix removed from a file name to form its run tag.
    #[serde(default = "default_suffix")]
    pub tag_suffix: String,

    /// How the suffix is removed.
    #[serde(default)]
    pub tag_mode: TagMode,
}

impl Default for RunsConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            tag_suffix: default_suffix(),
            tag_mode: TagMode::default(),
        }
    }
}

fn default_pattern() -> String {
    "nodes.tsv".to_string()
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

/// Output file names, relative to the results directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Membership table of the forest category.
    #[serde(default = "default_membership_file")]
    pub membership_file: String,

    /// Suffix of robustness tables, prefixed with the category directory.
    #[serde(default = "default_robustness_suffix")]
    pub robustness_suffix: String,

    /// Suffix of specificity tables, prefixed with the category directory.
    #[serde(default = "default_specificity_suffix")]
    pub specificity_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            membership_file: default_membership_file(),
            robustness_suffix: default_robustness_suffix(),
            specificity_suffix: default_specificity_suffix(),
        }
    }
}

fn default_membership_file() -> String {
    "param_sweep_membership.tsv".to_string()
}

fn default_robustness_suffix() -> String {
    "robustness_attributes.tsv".to_string()
}

fn default_specificity_suffix() -> String {
    "specificity_attributes.tsv".to_string()
}

impl OutputConfig {
    /// `<category dir>.<robustness suffix>`
    pub fn robustness_file(&self, category: Category) -> String {
        format!("{}.{}", category.dir_name(), self.robustness_suffix)
    }

    /// `<category dir>.<specificity suffix>`
    pub fn specificity_file(&self, category: Category) -> String {
        format!("{}.{}", category.dir_name(), self.specificity_suffix)
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly. Log verbosity is a CLI-only setting.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(top_n) = args.top_n {
            self.general.top_n = top_n;
        }

        if let Some(mode) = args.tag_mode {
            self.runs.tag_mode = mode;
        }
    }

    /// The tag rule described by the `[runs]` section.
    pub fn tag_rule(&self) -> TagRule {
        TagRule {
            suffix: self.runs.tag_suffix.clone(),
            mode: self.runs.tag_mode,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.top_n, 1000);
        assert_eq!(config.runs.pattern, "nodes.tsv");
        assert_eq!(config.runs.tag_mode, TagMode::Suffix);
        assert_eq!(config.output.membership_file, "param_sweep_membership.tsv");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
top_n = 250

[runs]
tag_mode = "char-trim"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.top_n, 250);
        assert_eq!(config.runs.tag_mode, TagMode::CharTrim);
        assert_eq!(config.runs.tag_suffix, ".nodes.tsv");
    }

    #[test]
    fn test_generated_config_has_no_logging_keys() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.contains("verbose"));

        // Files written by earlier versions still load.
        let config: Config = toml::from_str("[general]\ntop_n = 5\nverbose = true\n").unwrap();
        assert_eq!(config.general.top_n, 5);
    }

    #[test]
    fn test_merge_with_args_overrides_explicit_values() {
        let mut config = Config::default();
        let args = crate::cli::Args {
            results_dir: None,
            top_n: Some(42),
            config: None,
            tag_mode: Some(TagMode::CharTrim),
            verbose: true,
            quiet: false,
            dry_run: false,
            init_config: false,
        };

        config.merge_with_args(&args);
        assert_eq!(config.general.top_n, 42);
        assert_eq!(config.tag_rule().mode, TagMode::CharTrim);
    }

    #[test]
    fn test_output_file_names() {
        let output = OutputConfig::default();
        assert_eq!(
            output.robustness_file(Category::RobustNetwork),
            "robust_network.robustness_attributes.tsv"
        );
        assert_eq!(
            output.specificity_file(Category::AugmentedForest),
            "augmented_forest.specificity_attributes.tsv"
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[runs]"));
        assert!(toml_str.contains("[output]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.general.top_n, 1000);
    }
}
