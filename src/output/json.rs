//! JSON output renderer.
//!
//! Outputs `{"users": [...], "error": ..., "summary": {...}}` format.

use serde::Serialize;

use crate::dashboard::DashboardView;
use crate::models::Summary;
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    view: &'a DashboardView<'a>,
    summary: Summary,
}

impl OutputRenderer for JsonRenderer {
    fn render(&self, view: &DashboardView<'_>) -> String {
        let report = JsonReport {
            view,
            summary: Summary::from_records(view.users),
        };
        let mut rendered =
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string());
        rendered.push('\n');
        rendered
    }
}
