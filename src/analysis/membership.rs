//! Single-run membership aggregation.

use crate::error::Result;
use crate::models::{MembershipRow, MembershipTable, NodeRecord};
use crate::runs::{load_single_runs, RunSet, RunTable};
use std::collections::HashMap;
use tracing::info;

use super::extract_static_attributes;

/// Read a run set with the single-run schema and build its membership table.
pub fn build_membership(runs: &RunSet) -> Result<MembershipTable> {
    let tables = load_single_runs(runs)?;
    let table = membership_from_tables(runs, &tables);
    info!(
        "Membership: {} nodes across {} runs",
        table.rows.len(),
        table.columns.len()
    );
    Ok(table)
}

/// One row per observed node, with a presence flag per run column.
pub fn membership_from_tables(runs: &RunSet, tables: &[RunTable<NodeRecord>]) -> MembershipTable {
    let columns = runs.columns().to_vec();
    let attributes = extract_static_attributes(tables);

    let mut present: HashMap<&str, Vec<bool>> = HashMap::with_capacity(attributes.len());
    for table in tables {
        for record in &table.records {
            present
                .entry(record.node_id.as_str())
                .or_insert_with(|| vec![false; columns.len()])[table.file.column] = true;
        }
    }

    let rows = attributes
        .iter()
        .map(|(node_id, attrs)| MembershipRow {
            node_id: node_id.to_string(),
            attributes: attrs.clone(),
            present: present
                .get(node_id)
                .cloned()
                .unwrap_or_else(|| vec![false; columns.len()]),
        })
        .collect();

    MembershipTable { columns, rows }
}
