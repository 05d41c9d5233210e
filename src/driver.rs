//! Category-level orchestration: discover, aggregate, write.

use crate::analysis::{aggregate_multi_run, build_membership};
use crate::config::Config;
use crate::report::{save_aggregate, save_membership};
use crate::runs::RunSet;
use crate::scanner::{Category, CategoryFiles, RunScanner, Schema};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Aggregate every non-empty category under `root`.
///
/// Returns the paths of the tables written, in the order they were written.
pub fn summarize_results(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let scanner = RunScanner::new(root.to_path_buf(), config.runs.pattern.clone());
    let mut written = Vec::new();

    for CategoryFiles { category, paths } in scanner.scan_all() {
        if paths.is_empty() {
            debug!("Skipping {}: no run files", category.dir_name());
            continue;
        }

        println!("{} {} paths found.", paths.len(), category);
        written.extend(summarize_category(root, category, &paths, config)?);
    }

    info!("Wrote {} tables under {}", written.len(), root.display());
    Ok(written)
}

fn summarize_category(
    root: &Path,
    category: Category,
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<PathBuf>> {
    let runs = RunSet::new(paths, &config.tag_rule());

    match category.schema() {
        Schema::SingleRun => {
            let table = build_membership(&runs)
                .with_context(|| format!("Failed to aggregate {} runs", category.dir_name()))?;
            let path = root.join(&config.output.membership_file);
            save_membership(&table, &path)?;
            Ok(vec![path])
        }
        Schema::MultiRun => {
            let summary = aggregate_multi_run(&runs, config.general.top_n)
                .with_context(|| format!("Failed to aggregate {} runs", category.dir_name()))?;

            let robustness = root.join(config.output.robustness_file(category));
            let specificity = root.join(config.output.specificity_file(category));
            save_aggregate(&summary.robustness, &robustness)?;
            save_aggregate(&summary.specificity, &specificity)?;
            Ok(vec![robustness, specificity])
        }
    }
}

/// Print the run files of every category without reading them.
pub fn list_runs(root: &Path, config: &Config) -> Vec<CategoryFiles> {
    let scanner = RunScanner::new(root.to_path_buf(), config.runs.pattern.clone());
    let rule = config.tag_rule();
    let categories = scanner.scan_all();

    for CategoryFiles { category, paths } in &categories {
        if paths.is_empty() {
            println!("   {}: no run files", category.dir_name());
            continue;
        }

        println!("   {}: {} run files", category.dir_name(), paths.len());
        let runs = RunSet::new(paths, &rule);
        for file in runs.files() {
            println!("     📄 {} -> {}", file.path.display(), file.tag);
        }
    }

    categories
}
