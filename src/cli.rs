//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::runs::TagMode;
use clap::Parser;
use std::path::PathBuf;

/// nodesummary - summarize node attributes across network-extraction runs
///
/// Reads `*nodes.tsv` run tables from the `forest`, `robust_network` and
/// `augmented_forest` sub-directories of a results directory and writes
/// membership and robustness/specificity tables next to them.
///
/// Examples:
///   nodesummary ./results
///   nodesummary ./results --top-n 500
///   nodesummary ./results --dry-run
///   nodesummary --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Results directory holding the run category sub-directories
    #[arg(value_name = "DIR", required_unless_present = "init_config")]
    pub results_dir: Option<PathBuf>,

    /// Number of nodes kept in each robustness/specificity table
    ///
    /// Defaults to the config file value, or 1000.
    #[arg(short = 'n', long, value_name = "COUNT", env = "NODESUMMARY_TOP_N")]
    pub top_n: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .nodesummary.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How run tags are derived from file names
    #[arg(long, value_name = "MODE")]
    pub tag_mode: Option<TagMode>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// List the run files of each category without aggregating
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .nodesummary.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match self.results_dir {
            None => return Err("A results directory is required".to_string()),
            Some(ref dir) if !dir.exists() => {
                return Err(format!(
                    "Results directory does not exist: {}",
                    dir.display()
                ));
            }
            Some(ref dir) if !dir.is_dir() => {
                return Err(format!(
                    "Results path is not a directory: {}",
                    dir.display()
                ));
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_args(dir: PathBuf) -> Args {
        Args {
            results_dir: Some(dir),
            top_n: None,
            config: None,
            tag_mode: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "nodesummary",
            "results",
            "--top-n",
            "50",
            "--tag-mode",
            "char-trim",
        ]);
        assert_eq!(args.results_dir, Some(PathBuf::from("results")));
        assert_eq!(args.top_n, Some(50));
        assert_eq!(args.tag_mode, Some(TagMode::CharTrim));
    }

    #[test]
    fn test_validation_missing_dir() {
        let args = make_args(PathBuf::from("/nonexistent/results"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let dir = TempDir::new().unwrap();
        let mut args = make_args(dir.path().to_path_buf());
        assert!(args.validate().is_ok());

        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(PathBuf::from("."));
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
