//! Terminal renderer: a bordered table of users.
//!
//! When the list is empty the table body carries the last error message
//! instead of rows.

use colored::Colorize;

use crate::dashboard::DashboardView;
use crate::models::{Summary, UserRecord};
use crate::output::OutputRenderer;

const HEADERS: [&str; 5] = ["ID", "Name", "Username", "Email", "Company Name"];

/// Terminal table renderer.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, view: &DashboardView<'_>) -> String {
        let rows: Vec<[String; 5]> = view.users.iter().map(row).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for r in &rows {
            for (width, cell) in widths.iter_mut().zip(r.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        let rule = separator(&widths);
        output.push_str(&format!("{}\n", rule.dimmed()));
        output.push_str(&format!("  {}\n", line(&HEADERS.map(String::from), &widths).bold()));
        output.push_str(&format!("{}\n", rule.dimmed()));

        if rows.is_empty() {
            match view.error {
                Some(err) => output.push_str(&format!("  {} {}\n", "✖".red().bold(), err.red())),
                None => output.push_str(&format!("  {}\n", "No users.".dimmed())),
            }
        } else {
            for (user, r) in view.users.iter().zip(&rows) {
                let marker = if view.editing == Some(user.id) {
                    "✎".yellow().bold().to_string()
                } else {
                    " ".to_string()
                };
                output.push_str(&format!("{marker} {}\n", line(r, &widths)));
            }
        }
        output.push_str(&format!("{}\n", rule.dimmed()));

        if !rows.is_empty() {
            if let Some(err) = view.error {
                output.push_str(&format!(" {} {}\n", "⚠".yellow().bold(), err.yellow()));
            }
        }

        let summary = Summary::from_records(view.users);
        output.push_str(&format!(
            " {} {}, {} {}\n",
            summary.total.to_string().bold(),
            if summary.total == 1 { "user" } else { "users" },
            summary.companies.to_string().bold(),
            if summary.companies == 1 { "company" } else { "companies" },
        ));

        output
    }
}

fn row(user: &UserRecord) -> [String; 5] {
    [
        user.id.to_string(),
        user.name.clone(),
        user.username.clone(),
        user.email.clone(),
        user.company.name.clone(),
    ]
}

fn line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join(" │ ")
}

fn separator(widths: &[usize; 5]) -> String {
    let inner: usize = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    "─".repeat(inner + 2)
}
