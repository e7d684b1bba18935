//! Shared output formatting utilities for all response types.

use crate::console::Timings;
use crate::error::SearchError;
use crate::output::OutputFormat;
use serde::Serialize;

/// Render any serializable response inside the JSON envelope
pub fn render_json_response<T: Serialize>(
    data: &T,
    performance: Option<Timings>,
    format: OutputFormat,
) -> Result<String, SearchError> {
    use crate::output::json_response_with_performance;

    let payload = json_response_with_performance(data, performance);
    let rendered = if matches!(format, OutputFormat::Pretty) {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }?;
    Ok(rendered)
}

/// Format the "total: N" header for human-readable output
pub fn format_total_header(total: u64) -> String {
    format!("total: {}", total)
}

/// Format stage timings for stderr
pub fn format_timings(timings: &Timings) -> String {
    format!(
        "Performance metrics:\n  Backend: {}ms\n  Aggregation: {}ms\n  File lookup: {}ms",
        timings.backend_ms, timings.aggregation_ms, timings.lookup_ms
    )
}

/// Check if format is JSON (either Json or Pretty)
pub fn is_json_format(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Json | OutputFormat::Pretty)
}
