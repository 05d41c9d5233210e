//! Data models for node summaries.
//!
//! This module contains the records read from per-run node tables and
//! the consolidated tables produced by the aggregators.

use crate::runs::RunTag;
use std::collections::HashMap;
use std::fmt;

/// One row of a per-run node table, shared by both schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Node identifier (the `protein` column).
    pub node_id: String,
    /// Node degree in the extracted network.
    pub degree: u64,
    /// Prize carried through verbatim.
    pub prize: String,
    /// Categorical node type label.
    pub node_type: String,
}

/// A parsed row that carries the static node fields.
pub trait NodeRow {
    fn node(&self) -> &NodeRecord;
}

impl NodeRow for NodeRecord {
    fn node(&self) -> &NodeRecord {
        self
    }
}

/// One row of a multi-run node table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    /// Static fields of the row.
    pub node: NodeRecord,
    /// Robustness score, `None` when the field was empty or NA.
    pub robustness: Option<f64>,
    /// Specificity score, `None` when the field was empty or NA.
    pub specificity: Option<f64>,
}

impl ScoredRecord {
    /// Returns the value of the given statistic for this row.
    pub fn statistic(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Robustness => self.robustness,
            Statistic::Specificity => self.specificity,
        }
    }
}

impl NodeRow for ScoredRecord {
    fn node(&self) -> &NodeRecord {
        &self.node
    }
}

/// Per-run statistic aggregated by the multi-run pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Stability of inclusion across runs.
    Robustness,
    /// Uniqueness of contribution to a run.
    Specificity,
}

impl Statistic {
    /// Both statistics, in output order.
    pub const ALL: [Statistic; 2] = [Statistic::Robustness, Statistic::Specificity];

    /// Column name in the multi-run input schema.
    pub fn column_name(&self) -> &'static str {
        match self {
            Statistic::Robustness => "robustness",
            Statistic::Specificity => "specificity",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Static attributes of a node, taken from its first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttributes {
    /// Prize, verbatim.
    pub prize: String,
    /// Node type label.
    pub node_type: String,
    /// `log2(degree)`; `-inf` for degree 0.
    pub log_degree: f64,
}

impl From<&NodeRecord> for NodeAttributes {
    fn from(record: &NodeRecord) -> Self {
        Self {
            prize: record.prize.clone(),
            node_type: record.node_type.clone(),
            log_degree: (record.degree as f64).log2(),
        }
    }
}

/// Accumulates static attributes with insert-if-absent semantics.
#[derive(Debug, Default)]
pub struct StaticAttributesBuilder {
    order: Vec<String>,
    entries: HashMap<String, NodeAttributes>,
}

impl StaticAttributesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record attributes for a node unless it already has some.
    ///
    /// Returns `true` if the node was newly inserted.
    pub fn insert_if_absent(&mut self, record: &NodeRecord) -> bool {
        if self.entries.contains_key(&record.node_id) {
            return false;
        }
        self.order.push(record.node_id.clone());
        self.entries
            .insert(record.node_id.clone(), NodeAttributes::from(record));
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn finish(self) -> StaticAttributes {
        StaticAttributes {
            order: self.order,
            entries: self.entries,
        }
    }
}

/// Immutable `node_id -> NodeAttributes` map in first-discovery order.
#[derive(Debug, Clone, Default)]
pub struct StaticAttributes {
    order: Vec<String>,
    entries: HashMap<String, NodeAttributes>,
}

impl StaticAttributes {
    pub fn get(&self, node_id: &str) -> Option<&NodeAttributes> {
        self.entries.get(node_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate nodes in the order they were first discovered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeAttributes)> {
        self.order
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|attrs| (id.as_str(), attrs)))
    }
}

/// One node's statistic values, one per run column.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub node_id: String,
    pub values: Vec<f64>,
}

impl WideRow {
    /// Row-sum across all run columns.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Outer join of one statistic across runs, gaps filled with 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    /// Statistic the values belong to.
    pub statistic: Statistic,
    /// Run tag columns, in file order.
    pub columns: Vec<RunTag>,
    /// Rows, ordered by node identifier.
    pub rows: Vec<WideRow>,
}

/// A consolidated row with static attributes attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub node_id: String,
    pub values: Vec<f64>,
    /// `None` if no static attributes were recorded for the node.
    pub attributes: Option<NodeAttributes>,
}

/// Output of the multi-run aggregator for one statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable {
    pub statistic: Statistic,
    pub columns: Vec<RunTag>,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    #[allow(dead_code)] // Lookup helper
    pub fn row(&self, node_id: &str) -> Option<&AggregateRow> {
        self.rows.iter().find(|r| r.node_id == node_id)
    }
}

/// Both consolidated tables of one multi-run aggregation.
#[derive(Debug, Clone)]
pub struct MultiRunSummary {
    pub robustness: AggregateTable,
    pub specificity: AggregateTable,
}

/// One node of the membership table.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipRow {
    pub node_id: String,
    pub attributes: NodeAttributes,
    /// Presence indicator per run column.
    pub present: Vec<bool>,
}

/// Output of the single-run aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipTable {
    /// Run tag columns, in file order.
    pub columns: Vec<RunTag>,
    /// Rows in first-discovery order.
    pub rows: Vec<MembershipRow>,
}

impl MembershipTable {
    #[allow(dead_code)] // Lookup helper
    pub fn row(&self, node_id: &str) -> Option<&MembershipRow> {
        self.rows.iter().find(|r| r.node_id == node_id)
    }
}
