//! Static attribute extraction.

use crate::models::{NodeRow, StaticAttributes, StaticAttributesBuilder};
use crate::runs::RunTable;
use tracing::debug;

/// Build the static attribute map from runs in file order.
///
/// A node's prize, type and `log2(degree)` come from the first run that
/// lists it; later occurrences are ignored.
pub fn extract_static_attributes<R: NodeRow>(tables: &[RunTable<R>]) -> StaticAttributes {
    let mut builder = StaticAttributesBuilder::new();

    for table in tables {
        let before = builder.len();
        for record in &table.records {
            builder.insert_if_absent(record.node());
        }
        debug!(
            "{}: {} new nodes ({} total)",
            table.file.tag,
            builder.len() - before,
            builder.len()
        );
    }

    builder.finish()
}
