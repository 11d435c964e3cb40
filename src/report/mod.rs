//! Report module - Plain-text exploration report

mod text;

pub use text::{banner, format_table, group_thousands, ReportWriter, RULE_WIDTH, SECTION_HEADERS};
