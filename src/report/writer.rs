//! Tab-separated output tables.
//!
//! Membership:  `gene  prize  type  log_degree  <tag_1> ... <tag_k>`
//! Aggregate:   `protein  <tag_1> ... <tag_k>  prize  type  log_degree`

use crate::error::{AggregateError, Result};
use crate::models::{AggregateTable, MembershipTable};
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write a membership table.
pub fn write_membership<W: Write>(table: &MembershipTable, out: W) -> csv::Result<()> {
    let mut writer = tsv_writer(out);

    let mut header = vec!["gene", "prize", "type", "log_degree"];
    header.extend(table.columns.iter().map(|t| t.as_str()));
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![
            row.node_id.clone(),
            row.attributes.prize.clone(),
            row.attributes.node_type.clone(),
            format_float(row.attributes.log_degree),
        ];
        record.extend(
            row.present
                .iter()
                .map(|&p| String::from(if p { "1" } else { "0" })),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write one robustness or specificity table.
pub fn write_aggregate<W: Write>(table: &AggregateTable, out: W) -> csv::Result<()> {
    let mut writer = tsv_writer(out);

    let mut header = vec!["protein"];
    header.extend(table.columns.iter().map(|t| t.as_str()));
    header.extend(["prize", "type", "log_degree"]);
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.values.len() + 4);
        record.push(row.node_id.clone());
        record.extend(row.values.iter().map(|&v| format_float(v)));
        match &row.attributes {
            Some(attrs) => {
                record.push(attrs.prize.clone());
                record.push(attrs.node_type.clone());
                record.push(format_float(attrs.log_degree));
            }
            None => record.extend(std::iter::repeat(String::new()).take(3)),
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a membership table to `path`, replacing any existing file.
pub fn save_membership(table: &MembershipTable, path: &Path) -> Result<()> {
    let file = create(path)?;
    write_membership(table, file).map_err(|source| csv_error(path, source))?;
    info!("Wrote {} membership rows to {}", table.rows.len(), path.display());
    Ok(())
}

/// Save an aggregate table to `path`, replacing any existing file.
pub fn save_aggregate(table: &AggregateTable, path: &Path) -> Result<()> {
    let file = create(path)?;
    write_aggregate(table, file).map_err(|source| csv_error(path, source))?;
    info!(
        "Wrote {} {} rows to {}",
        table.rows.len(),
        table.statistic,
        path.display()
    );
    Ok(())
}

/// Format a float the way the tables expect: integral values keep one
/// decimal (`2.0`), magnitudes from `1e16` up or below `1e-4` use exponent
/// form (`1e+20`, `1.5e-05`), everything else the shortest round-trip form.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if value != 0.0 && (value.abs() >= 1e16 || value.abs() < 1e-4) {
        format_exponent(value)
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// `{:e}` output with a signed exponent of at least two digits.
fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

fn tsv_writer<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| AggregateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_error(path: &Path, source: csv::Error) -> AggregateError {
    AggregateError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateRow, MembershipRow, NodeAttributes, Statistic};
    use crate::runs::RunTag;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn attrs(prize: &str, node_type: &str, log_degree: f64) -> NodeAttributes {
        NodeAttributes {
            prize: prize.to_string(),
            node_type: node_type.to_string(),
            log_degree,
        }
    }

    fn sample_aggregate() -> AggregateTable {
        AggregateTable {
            statistic: Statistic::Robustness,
            columns: vec![RunTag::new("A"), RunTag::new("B")],
            rows: vec![
                AggregateRow {
                    node_id: "X".to_string(),
                    values: vec![0.5, 0.3],
                    attributes: Some(attrs("1.0", "T", 2.0)),
                },
                AggregateRow {
                    node_id: "Y".to_string(),
                    values: vec![0.0, 0.7],
                    attributes: Some(attrs("0.5", "U", 1.0)),
                },
            ],
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.7), "0.7");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_format_float_exponent_range() {
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(-2.5e17), "-2.5e+17");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(1.5e-5), "1.5e-05");
        assert_eq!(format_float(1e-100), "1e-100");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn test_write_aggregate() {
        let mut out = Vec::new();
        write_aggregate(&sample_aggregate(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "protein\tA\tB\tprize\ttype\tlog_degree\n\
             X\t0.5\t0.3\t1.0\tT\t2.0\n\
             Y\t0.0\t0.7\t0.5\tU\t1.0\n"
        );
    }

    #[test]
    fn test_write_aggregate_missing_attributes() {
        let mut table = sample_aggregate();
        table.rows[1].attributes = None;

        let mut out = Vec::new();
        write_aggregate(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Y\t0.0\t0.7\t\t\t\n"));
    }

    #[test]
    fn test_write_membership() {
        let table = MembershipTable {
            columns: vec![RunTag::new("w1"), RunTag::new("w2")],
            rows: vec![MembershipRow {
                node_id: "X".to_string(),
                attributes: attrs("1.0", "T", 2.0),
                present: vec![true, false],
            }],
        };

        let mut out = Vec::new();
        write_membership(&table, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "gene\tprize\ttype\tlog_degree\tw1\tw2\nX\t1.0\tT\t2.0\t1\t0\n"
        );
    }

    #[test]
    fn test_save_aggregate_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robust_network.robustness_attributes.tsv");

        save_aggregate(&sample_aggregate(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("protein\tA\tB"));
    }
}
