//! Clap argument types.

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use userdash::dashboard::DashboardView;
use userdash::models::FormField;

/// Terminal dashboard for a remote user directory.
#[derive(Parser, Debug)]
#[command(
    name = "userdash",
    version = userdash::constants::VERSION,
    about = super::BANNER_STYLED,
)]
pub struct Cli {
    /// Base URL of the directory API (`/users` is appended).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding the persisted state file.
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Keep state in memory only; nothing is written to disk.
    #[arg(long, global = true, default_value_t = false)]
    pub no_persist: bool,

    /// Log progress to stderr (`-v` info, `-vv` debug). `RUST_LOG` wins when set.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Fetch and print the user list.
    List(ListArgs),

    /// Create a user. Fields not given are taken from the saved form draft.
    Add(AddArgs),

    /// Update an existing user. Omitted fields keep their current value.
    Edit(EditArgs),

    /// Delete a user by id.
    Delete {
        /// Id of the user to delete.
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Interactive dashboard session.
    Shell,

    /// Inspect or reset the persisted state.
    State {
        #[command(subcommand)]
        action: StateAction,
    },

    /// Print version and build information.
    Version,
}

/// Arguments for the `list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Form fields given on the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Username.
    #[arg(long)]
    pub username: Option<String>,

    /// E-mail address.
    #[arg(long)]
    pub email: Option<String>,

    /// Company name.
    #[arg(long)]
    pub company: Option<String>,
}

impl FieldArgs {
    /// Fields that were given, paired with their form field.
    pub fn provided(&self) -> Vec<(FormField, &str)> {
        [
            (FormField::Name, self.name.as_deref()),
            (FormField::Username, self.username.as_deref()),
            (FormField::Email, self.email.as_deref()),
            (FormField::CompanyName, self.company.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Arguments for the `add` subcommand.
#[derive(Parser, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for the `edit` subcommand.
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Id of the user to edit.
    #[arg(allow_negative_numbers = true)]
    pub id: i64,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// State management subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum StateAction {
    /// Print every persisted key.
    Show,
    /// Remove the persisted state.
    Clear,
    /// Print the state file path.
    Path,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Render the view using the renderer for this format.
    pub fn render(&self, view: &DashboardView<'_>) -> String {
        use userdash::output::OutputRenderer;
        match self {
            OutputFormat::Terminal => userdash::output::terminal::TerminalRenderer.render(view),
            OutputFormat::Json => userdash::output::json::JsonRenderer.render(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_defaults_to_terminal() {
        let cli = Cli::try_parse_from(["userdash", "list"]).unwrap();
        match cli.command {
            Command::List(args) => assert_eq!(args.format, OutputFormat::Terminal),
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn parse_list_json() {
        let cli = Cli::try_parse_from(["userdash", "list", "--format", "json"]).unwrap();
        match cli.command {
            Command::List(args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn parse_add_fields() {
        let cli = Cli::try_parse_from([
            "userdash", "add", "--name", "Ada", "--username", "ada", "--email", "ada@x.io",
            "--company", "Engines",
        ])
        .unwrap();
        match cli.command {
            Command::Add(args) => {
                let provided = args.fields.provided();
                assert_eq!(provided.len(), 4);
                assert_eq!(provided[3], (FormField::CompanyName, "Engines"));
            }
            _ => panic!("expected Add command"),
        }
    }

    #[test]
    fn parse_edit_with_partial_fields() {
        let cli =
            Cli::try_parse_from(["userdash", "edit", "2", "--email", "a@b.co"]).unwrap();
        match cli.command {
            Command::Edit(args) => {
                assert_eq!(args.id, 2);
                assert_eq!(args.fields.provided(), vec![(FormField::Email, "a@b.co")]);
            }
            _ => panic!("expected Edit command"),
        }
    }

    #[test]
    fn parse_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["userdash", "delete", "abc"]).is_err());
        let cli = Cli::try_parse_from(["userdash", "delete", "7"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { id: 7 }));
        let cli = Cli::try_parse_from(["userdash", "delete", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { id: -3 }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdash", "shell", "--base-url", "http://localhost:3000", "--no-persist", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:3000"));
        assert!(cli.no_persist);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Shell));
    }

    #[test]
    fn parse_state_actions() {
        let cli = Cli::try_parse_from(["userdash", "state", "path"]).unwrap();
        assert!(matches!(cli.command, Command::State { action: StateAction::Path }));
    }

    #[test]
    fn output_format_render_empty() {
        let view = DashboardView {
            users: &[],
            editing: None,
            error: None,
        };
        assert!(!OutputFormat::Terminal.render(&view).is_empty());
        let parsed: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.render(&view)).unwrap();
        assert!(parsed["users"].is_array());
    }
}
