//! Writing consolidated tables.

pub mod writer;

pub use writer::{save_aggregate, save_membership};
