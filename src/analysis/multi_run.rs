//! Robustness/specificity aggregation across runs.
//!
//! Each statistic is projected per run to `(node_id, value)`, outer-joined
//! on `node_id` across runs, gap-filled with 0, truncated to the top N
//! nodes by row-sum and finally left-joined with the static attributes.

use crate::error::Result;
use crate::models::{
    AggregateRow, AggregateTable, MultiRunSummary, ScoredRecord, StaticAttributes, Statistic,
    WideRow, WideTable,
};
use crate::runs::{load_multi_runs, RunSet, RunTable, RunTag};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{extract_static_attributes, truncate_top_n};

/// Read a run set with the multi-run schema and build both summaries.
pub fn aggregate_multi_run(runs: &RunSet, top_n: usize) -> Result<MultiRunSummary> {
    let tables = load_multi_runs(runs)?;
    let summary = summarize_tables(runs.columns(), &tables, top_n);
    info!(
        "Multi-run: {} runs, {} robustness rows, {} specificity rows (top_n = {})",
        runs.len(),
        summary.robustness.rows.len(),
        summary.specificity.rows.len(),
        top_n
    );
    Ok(summary)
}

/// Aggregate already loaded run tables.
pub fn summarize_tables(
    columns: &[RunTag],
    tables: &[RunTable<ScoredRecord>],
    top_n: usize,
) -> MultiRunSummary {
    let attributes = extract_static_attributes(tables);

    let [robustness, specificity] = Statistic::ALL.map(|statistic| {
        let mut wide = build_wide_table(columns, tables, statistic);
        truncate_top_n(&mut wide, top_n);
        attach_attributes(wide, &attributes)
    });

    MultiRunSummary {
        robustness,
        specificity,
    }
}

/// Outer-join one statistic across runs on `node_id`, filling gaps with 0.
///
/// Rows come out ordered by node identifier. When two runs share a column,
/// or a node repeats within a run, the first non-missing value is kept.
pub fn build_wide_table(
    columns: &[RunTag],
    tables: &[RunTable<ScoredRecord>],
    statistic: Statistic,
) -> WideTable {
    let mut joined: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();

    for table in tables {
        for record in &table.records {
            let slot = &mut joined
                .entry(record.node.node_id.as_str())
                .or_insert_with(|| vec![None; columns.len()])[table.file.column];
            if slot.is_none() {
                *slot = record.statistic(statistic);
            }
        }
        debug!(
            "{}: joined {} ({} nodes so far)",
            statistic,
            table.file.tag,
            joined.len()
        );
    }

    let rows = joined
        .into_iter()
        .map(|(node_id, values)| WideRow {
            node_id: node_id.to_string(),
            values: values.into_iter().map(|v| v.unwrap_or(0.0)).collect(),
        })
        .collect();

    WideTable {
        statistic,
        columns: columns.to_vec(),
        rows,
    }
}

/// Left-join a wide table with the static attributes.
pub fn attach_attributes(wide: WideTable, attributes: &StaticAttributes) -> AggregateTable {
    let rows = wide
        .rows
        .into_iter()
        .map(|row| AggregateRow {
            attributes: attributes.get(&row.node_id).cloned(),
            node_id: row.node_id,
            values: row.values,
        })
        .collect();

    AggregateTable {
        statistic: wide.statistic,
        columns: wide.columns,
        rows,
    }
}
