//! Output renderers: terminal table and JSON.

pub mod json;
pub mod terminal;

use crate::dashboard::DashboardView;

/// Trait for rendering the dashboard list to an output format.
pub trait OutputRenderer {
    /// Render the view to a string.
    fn render(&self, view: &DashboardView<'_>) -> String;
}
