//! Run files and run tags.
//!
//! A run is identified by a tag derived from its file name. The
//! ordered list of run files handed to an aggregator is a [`RunSet`].

pub mod reader;

pub use reader::{load_multi_runs, load_single_runs, RunTable};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default file name suffix removed to form a run tag.
pub const DEFAULT_SUFFIX: &str = ".nodes.tsv";

/// How the suffix is removed from a file name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TagMode {
    /// Remove the literal suffix once (default)
    #[default]
    Suffix,
    /// Strip trailing characters that occur anywhere in the suffix (legacy)
    CharTrim,
}

/// Rule for turning a file name into a run tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub suffix: String,
    pub mode: TagMode,
}

impl Default for TagRule {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            mode: TagMode::Suffix,
        }
    }
}

impl TagRule {
    /// Derive a tag from a bare file name.
    pub fn apply(&self, file_name: &str) -> RunTag {
        let tag = match self.mode {
            TagMode::Suffix => file_name.strip_suffix(self.suffix.as_str()).unwrap_or(file_name),
            TagMode::CharTrim => file_name.trim_end_matches(|c: char| self.suffix.contains(c)),
        };
        RunTag(tag.to_string())
    }
}

/// Identifier of one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunTag(String);

impl RunTag {
    #[allow(dead_code)] // Constructor for tables built in memory
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Derive the tag for a file path from its base name.
    pub fn from_path(path: &Path, rule: &TagRule) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        rule.apply(&name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input file and the output column it contributes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFile {
    pub path: PathBuf,
    pub tag: RunTag,
    /// Index into [`RunSet::columns`].
    pub column: usize,
}

/// Ordered run files for one aggregation call.
///
/// Columns are the distinct tags in first-appearance order. A file whose
/// tag repeats an earlier one shares that earlier column.
#[derive(Debug, Clone, Default)]
pub struct RunSet {
    files: Vec<RunFile>,
    columns: Vec<RunTag>,
}

impl RunSet {
    pub fn new<P: AsRef<Path>>(paths: &[P], rule: &TagRule) -> Self {
        let mut files = Vec::with_capacity(paths.len());
        let mut columns: Vec<RunTag> = Vec::new();
        let mut index: HashMap<RunTag, usize> = HashMap::new();

        for path in paths {
            let path = path.as_ref();
            let tag = RunTag::from_path(path, rule);

            let column = match index.get(&tag) {
                Some(&column) => {
                    warn!(
                        "Run tag '{}' from {} collides with an earlier file; merging into one column",
                        tag,
                        path.display()
                    );
                    column
                }
                None => {
                    let column = columns.len();
                    columns.push(tag.clone());
                    index.insert(tag.clone(), column);
                    column
                }
            };

            files.push(RunFile {
                path: path.to_path_buf(),
                tag,
                column,
            });
        }

        Self { files, columns }
    }

    pub fn files(&self) -> &[RunFile] {
        &self.files
    }

    pub fn columns(&self) -> &[RunTag] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_mode_removes_literal_suffix_once() {
        let rule = TagRule::default();
        assert_eq!(rule.apply("run_5.nodes.tsv").as_str(), "run_5");
        assert_eq!(rule.apply("forest.nodes.tsv").as_str(), "forest");
        assert_eq!(rule.apply("a.nodes.tsv.nodes.tsv").as_str(), "a.nodes.tsv");
        assert_eq!(rule.apply("other.tsv").as_str(), "other.tsv");
    }

    #[test]
    fn test_char_trim_mode_over_strips() {
        let rule = TagRule {
            mode: TagMode::CharTrim,
            ..TagRule::default()
        };
        assert_eq!(rule.apply("run_5.nodes.tsv").as_str(), "run_5");
        assert_eq!(rule.apply("forest.nodes.tsv").as_str(), "for");
    }

    #[test]
    fn test_tag_from_path_uses_base_name() {
        let tag = RunTag::from_path(Path::new("/data/forest/w_2.nodes.tsv"), &TagRule::default());
        assert_eq!(tag.as_str(), "w_2");
    }

    #[test]
    fn test_run_set_columns_follow_file_order() {
        let set = RunSet::new(&["b.nodes.tsv", "a.nodes.tsv"], &TagRule::default());
        let cols: Vec<&str> = set.columns().iter().map(RunTag::as_str).collect();
        assert_eq!(cols, vec!["b", "a"]);
        assert_eq!(set.files()[1].column, 1);
    }

    #[test]
    fn test_run_set_collision_shares_column() {
        let set = RunSet::new(
            &["x/a.nodes.tsv", "y/b.nodes.tsv", "z/a.nodes.tsv"],
            &TagRule::default(),
        );
        assert_eq!(set.len(), 3);
        assert_eq!(set.columns().len(), 2);
        assert_eq!(set.files()[2].column, 0);
    }
}
