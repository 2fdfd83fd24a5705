//! Output writers for evaluation runs: the wide per-record results
//! CSV, the per-variant summary CSV, the classifier rules JSON, the
//! map-marker JS bundle and the final text report.

mod markers;
mod results;
mod rules;
mod summary;
mod text;

pub use markers::write_markers_js;
pub use results::write_results_csv;
pub use rules::write_rules_json;
pub use summary::write_summary_csv;
pub use text::{render_text_report, write_text_report};
