//! Aggregation of per-run node tables.
//!
//! Both pipelines share the static attribute pass; the multi-run path adds
//! the outer-join reduction and top-N truncation.

pub mod attributes;
pub mod membership;
pub mod multi_run;
pub mod ranking;

pub use attributes::extract_static_attributes;
pub use membership::build_membership;
pub use multi_run::aggregate_multi_run;
pub use ranking::{truncate_top_n, DEFAULT_TOP_N};
