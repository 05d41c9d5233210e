//! Top-N truncation of wide tables by row-sum.

use crate::models::WideTable;
use tracing::debug;

/// Default number of nodes kept per aggregate table.
pub const DEFAULT_TOP_N: usize = 1000;

/// Keep only rows whose row-sum is strictly greater than the
/// `(top_n + 1)`-th largest row-sum.
///
/// Tables with at most `top_n` rows are left untouched. Rows tied with the
/// cutoff value are all dropped, so fewer than `top_n` rows may remain.
/// Returns the cutoff when truncation was applied.
pub fn truncate_top_n(table: &mut WideTable, top_n: usize) -> Option<f64> {
    if table.rows.len() <= top_n {
        return None;
    }

    let mut totals: Vec<f64> = table.rows.iter().map(|row| row.total()).collect();
    let (_, cutoff, _) = totals.select_nth_unstable_by(top_n, |a, b| b.total_cmp(a));
    let cutoff = *cutoff;

    let before = table.rows.len();
    table.rows.retain(|row| row.total() > cutoff);
    debug!(
        "{}: cutoff {} kept {} of {} rows",
        table.statistic,
        cutoff,
        table.rows.len(),
        before
    );

    Some(cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Statistic, WideRow};
    use crate::runs::RunTag;

    fn table(totals: &[f64]) -> WideTable {
        WideTable {
            statistic: Statistic::Robustness,
            columns: vec![RunTag::new("a")],
            rows: totals
                .iter()
                .enumerate()
                .map(|(i, &v)| WideRow {
                    node_id: format!("n{i:04}"),
                    values: vec![v],
                })
                .collect(),
        }
    }

    #[test]
    fn test_no_truncation_at_or_below_limit() {
        let mut t = table(&[0.1, 0.2, 0.3]);
        assert_eq!(truncate_top_n(&mut t, 3), None);
        assert_eq!(t.rows.len(), 3);
    }

    #[test]
    fn test_strictly_greater_than_cutoff() {
        let mut t = table(&[0.4, 0.1, 0.3, 0.2, 0.5]);
        assert_eq!(truncate_top_n(&mut t, 2), Some(0.3));

        let kept: Vec<f64> = t.rows.iter().map(|r| r.total()).collect();
        assert_eq!(kept, vec![0.4, 0.5]);
    }

    #[test]
    fn test_ties_at_boundary_drop_together() {
        let mut t = table(&[0.9, 0.5, 0.5, 0.5, 0.1]);
        assert_eq!(truncate_top_n(&mut t, 2), Some(0.5));
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].total(), 0.9);
    }

    #[test]
    fn test_zero_limit_drops_everything() {
        let mut t = table(&[0.3, 0.2]);
        truncate_top_n(&mut t, 0);
        assert!(t.rows.is_empty());
    }

    #[test]
    fn test_large_table_separation() {
        let totals: Vec<f64> = (0..1500).map(|i| ((i * 7919) % 1500) as f64 / 10.0).collect();
        let mut t = table(&totals);
        let before = t.clone();

        truncate_top_n(&mut t, 1000);
        assert!(t.rows.len() <= 1000);

        let kept_min = t
            .rows
            .iter()
            .map(|r| r.total())
            .fold(f64::INFINITY, f64::min);
        let dropped_max = before
            .rows
            .iter()
            .filter(|r| !t.rows.iter().any(|k| k.node_id == r.node_id))
            .map(|r| r.total())
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(kept_min > dropped_max);
    }
}
