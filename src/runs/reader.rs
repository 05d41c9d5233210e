//! Per-run node table parsing.
//!
//! Expected columns (tab-separated, one header line):
//!
//! single-run: `protein  degree  <unused>  prize  node_type`
//! multi-run:  `protein  degree  <unused>  prize  robustness  specificity  node_type`

use super::{RunFile, RunSet};
use crate::error::{AggregateError, Result};
use crate::models::{NodeRecord, ScoredRecord};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

const SINGLE_RUN_FIELDS: usize = 5;
const MULTI_RUN_FIELDS: usize = 7;

/// Markers read as a missing statistic.
const NA_VALUES: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Records of one run, tagged with the output column they feed.
#[derive(Debug, Clone)]
pub struct RunTable<R> {
    pub file: RunFile,
    pub records: Vec<R>,
}

/// Parse a single-run node table.
pub fn read_single_run(path: &Path) -> Result<Vec<NodeRecord>> {
    read_rows(path, SINGLE_RUN_FIELDS, |fields, line| {
        node_record(path, line, fields[0], fields[1], fields[3], fields[4])
    })
}

/// Parse a multi-run node table.
pub fn read_multi_run(path: &Path) -> Result<Vec<ScoredRecord>> {
    read_rows(path, MULTI_RUN_FIELDS, |fields, line| {
        Ok(ScoredRecord {
            node: node_record(path, line, fields[0], fields[1], fields[3], fields[6])?,
            robustness: parse_statistic(path, line, "robustness", fields[4])?,
            specificity: parse_statistic(path, line, "specificity", fields[5])?,
        })
    })
}

/// Load every file of a run set with the single-run schema, in order.
pub fn load_single_runs(runs: &RunSet) -> Result<Vec<RunTable<NodeRecord>>> {
    load_runs(runs, read_single_run)
}

/// Load every file of a run set with the multi-run schema, in order.
pub fn load_multi_runs(runs: &RunSet) -> Result<Vec<RunTable<ScoredRecord>>> {
    load_runs(runs, read_multi_run)
}

fn load_runs<R>(
    runs: &RunSet,
    read: impl Fn(&Path) -> Result<Vec<R>>,
) -> Result<Vec<RunTable<R>>> {
    runs.files()
        .iter()
        .map(|file| {
            let records = read(&file.path)?;
            debug!("Read {} nodes from {}", records.len(), file.path.display());
            Ok(RunTable {
                file: file.clone(),
                records,
            })
        })
        .collect()
}

fn read_rows<R>(
    path: &Path,
    expected: usize,
    mut parse: impl FnMut(&[&str], u64) -> Result<R>,
) -> Result<Vec<R>> {
    let file = File::open(path).map_err(|source| AggregateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows_from(BufReader::new(file), path, expected, &mut parse)
}

fn read_rows_from<R, T: Read>(
    input: T,
    path: &Path,
    expected: usize,
    parse: &mut impl FnMut(&[&str], u64) -> Result<R>,
) -> Result<Vec<R>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| AggregateError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields = split_fields(&record);

        if fields.len() != expected {
            return Err(AggregateError::MalformedRow {
                path: path.to_path_buf(),
                line,
                expected,
                found: fields.len(),
            });
        }

        rows.push(parse(&fields, line)?);
    }

    Ok(rows)
}

/// Fields of a record with trailing whitespace removed from the line end.
fn split_fields(record: &StringRecord) -> Vec<&str> {
    let mut fields: Vec<&str> = record.iter().collect();
    while let Some(last) = fields.pop() {
        let trimmed = last.trim_end();
        if trimmed.is_empty() && !fields.is_empty() {
            continue;
        }
        fields.push(trimmed);
        break;
    }
    fields
}

fn node_record(
    path: &Path,
    line: u64,
    node_id: &str,
    degree: &str,
    prize: &str,
    node_type: &str,
) -> Result<NodeRecord> {
    let degree = parse_degree(path, line, degree)?;
    if degree == 0 {
        warn!(
            "Node '{}' at {}:{} has degree 0; log_degree is undefined",
            node_id,
            path.display(),
            line
        );
    }

    Ok(NodeRecord {
        node_id: node_id.to_string(),
        degree,
        prize: prize.to_string(),
        node_type: node_type.to_string(),
    })
}

/// Read a degree written as an integer or a float; floats are truncated.
fn parse_degree(path: &Path, line: u64, raw: &str) -> Result<u64> {
    let invalid = || AggregateError::NumericConversion {
        path: path.to_path_buf(),
        line,
        field: "degree",
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    let value = value.trunc();
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value as u64)
}

fn parse_statistic(
    path: &Path,
    line: u64,
    field: &'static str,
    raw: &str,
) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() || NA_VALUES.contains(&raw) {
        return Ok(None);
    }

    let value: f64 = raw.parse().map_err(|_| AggregateError::NumericConversion {
        path: path.to_path_buf(),
        line,
        field,
        value: raw.to_string(),
    })?;
    Ok(if value.is_nan() { None } else { Some(value) })
}
