//! The scan pipeline: matching, taint collection, assembly, filtering.

mod assemble;
mod filter;
mod line_index;
mod matcher;
mod taint;

pub use assemble::{assemble, stable_id};
pub use filter::{apply_rule_filters, filter_by_severity};
pub use line_index::LineIndex;
pub use matcher::{scan_text, MATCH_CAP};
pub use taint::collect_tainted_variables;
