//! Discovery of run files under a results directory.
//!
//! Each run category lives in its own sub-directory and contributes the
//! files whose name ends with the configured pattern.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Which aggregator a category feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Membership only.
    SingleRun,
    /// Robustness and specificity.
    MultiRun,
}

/// A group of run files produced by one kind of upstream procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Parameter-sweep forests.
    Forest,
    /// Randomized robust networks.
    RobustNetwork,
    /// Forests augmented with robust-network statistics.
    AugmentedForest,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Forest,
        Category::RobustNetwork,
        Category::AugmentedForest,
    ];

    /// Sub-directory holding the category's run files.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Forest => "forest",
            Category::RobustNetwork => "robust_network",
            Category::AugmentedForest => "augmented_forest",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Category::Forest => Schema::SingleRun,
            Category::RobustNetwork | Category::AugmentedForest => Schema::MultiRun,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Forest => write!(f, "forest"),
            Category::RobustNetwork => write!(f, "robust"),
            Category::AugmentedForest => write!(f, "augmented"),
        }
    }
}

/// Run files found for one category.
#[derive(Debug, Clone)]
pub struct CategoryFiles {
    pub category: Category,
    pub paths: Vec<PathBuf>,
}

/// Finds run files under a results directory.
pub struct RunScanner {
    root: PathBuf,
    pattern: String,
}

impl RunScanner {
    pub fn new(root: PathBuf, pattern: impl Into<String>) -> Self {
        Self {
            root,
            pattern: pattern.into(),
        }
    }

    /// Files of one category, sorted by file name.
    ///
    /// A missing sub-directory yields an empty list.
    pub fn scan(&self, category: Category) -> Vec<PathBuf> {
        let dir = self.root.join(category.dir_name());
        if !dir.is_dir() {
            debug!("No {} directory at {}", category.dir_name(), dir.display());
            return Vec::new();
        }

        WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Cannot read entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.matches(entry.path()))
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Every category, in driver order, including empty ones.
    pub fn scan_all(&self) -> Vec<CategoryFiles> {
        Category::ALL
            .iter()
            .map(|&category| CategoryFiles {
                category,
                paths: self.scan(category),
            })
            .collect()
    }

    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| name.ends_with(&self.pattern))
            .unwrap_or(false)
    }
}
