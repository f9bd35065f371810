//! CLI command definitions, argument parsing, and the interactive shell.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;
pub mod shell;

/// Banner with ANSI styling for clap help output.
pub const BANNER_STYLED: &str =
    "\x1b[1muserdash\x1b[0m \x1b[2m· User Management Dashboard for REST user directories.\x1b[0m";

/// Print the session banner to stderr.
pub fn print_banner(base_url: &str) {
    use colored::Colorize;
    use std::io::Write;
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "  {} {}",
        "userdash".bold(),
        format!("· User Management Dashboard · {base_url}").dimmed(),
    );
    let _ = writeln!(handle);
    let _ = handle.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_banner_does_not_panic() {
        print_banner("https://jsonplaceholder.typicode.com");
    }

    #[test]
    fn banner_styled_is_non_empty() {
        assert!(BANNER_STYLED.contains("userdash"));
    }
}
