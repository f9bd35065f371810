//! Interactive dashboard session.
//!
//! Reads one command per line until `quit` or end of input. Each command
//! awaits its network call before the next line is read. Errors are printed
//! and never end the session.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use userdash::dashboard::{Dashboard, DashboardError, SubmitOutcome};
use userdash::models::FormField;

use super::args::OutputFormat;

const HELP: &str = "\
Commands:
  list                  show the user table
  reload                fetch the list from the directory again
  form                  show the form and edit mode
  set <field> <value>   set name, username, email or company
  submit                create a user, or update the one being edited
  edit <id>             load a user into the form and enter edit mode
  cancel                clear the form and leave edit mode
  delete <id>           delete a user
  help                  show this help
  quit                  end the session";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Reload,
    Form,
    Set { field: FormField, value: String },
    Submit,
    Edit(i64),
    Cancel,
    Delete(i64),
    Help,
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "list" | "ls" => Ok(ShellCommand::List),
        "reload" => Ok(ShellCommand::Reload),
        "form" => Ok(ShellCommand::Form),
        "submit" => Ok(ShellCommand::Submit),
        "cancel" => Ok(ShellCommand::Cancel),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        "edit" => parse_id(rest).map(ShellCommand::Edit),
        "delete" | "rm" => parse_id(rest).map(ShellCommand::Delete),
        "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = name.parse::<FormField>().map_err(|_| {
                format!("unknown field '{name}'. Fields: name, username, email, company")
            })?;
            Ok(ShellCommand::Set {
                field,
                value: unquote(value).to_string(),
            })
        }
        other => Err(format!("unknown command '{other}'. Type 'help' for a list.")),
    }
}

fn parse_id(raw: &str) -> Result<i64, String> {
    if raw.is_empty() {
        return Err("a user id is required".to_string());
    }
    raw.parse::<i64>()
        .map_err(|_| format!("invalid user id '{raw}'"))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Run the session: load, then process commands.
///
/// `dash` should come from [`Dashboard::resume`] so the saved draft is in
/// the form before the first load mirrors it.
pub async fn run<R, W>(dash: &mut Dashboard, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(e) = dash.load().await {
        report_error(out, &e)?;
    }
    write!(out, "{}", OutputFormat::Terminal.render(&dash.view()))?;
    if *dash.form() != Default::default() {
        writeln!(out, "  {}", "Restored form draft:".dimmed())?;
        print_form(dash, out)?;
    }

    let mut lines = input.lines();
    loop {
        write_prompt(dash, out)?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "  {} {}", "✖".red().bold(), msg.red())?;
                continue;
            }
        };
        if !execute(dash, command, out).await? {
            break;
        }
    }
    Ok(())
}

/// Apply one command. Returns `false` when the session should end.
async fn execute<W: Write>(dash: &mut Dashboard, command: ShellCommand, out: &mut W) -> Result<bool> {
    match command {
        ShellCommand::Empty => {}
        ShellCommand::List => write!(out, "{}", OutputFormat::Terminal.render(&dash.view()))?,
        ShellCommand::Reload => match dash.load().await {
            Ok(count) => {
                writeln!(out, "  {} Loaded {count} user(s).", "✔".green().bold())?;
                write!(out, "{}", OutputFormat::Terminal.render(&dash.view()))?;
            }
            Err(e) => report_error(out, &e)?,
        },
        ShellCommand::Form => print_form(dash, out)?,
        ShellCommand::Set { field, value } => dash.set_field(field, value),
        ShellCommand::Submit => match dash.submit().await {
            Ok(SubmitOutcome::Created(user)) => {
                writeln!(out, "  {} Created user #{} ({}).", "✔".green().bold(), user.id, user.username)?;
            }
            Ok(SubmitOutcome::Updated(user)) => {
                writeln!(out, "  {} Updated user #{}.", "✔".green().bold(), user.id)?;
            }
            Err(e) => report_error(out, &e)?,
        },
        ShellCommand::Edit(id) => match dash.begin_edit(id) {
            Ok(user) => {
                let msg = format!("Editing user #{} ({}).", user.id, user.username);
                writeln!(out, "  {} {msg}", "✎".yellow().bold())?;
                print_form(dash, out)?;
            }
            Err(e) => report_error(out, &e)?,
        },
        ShellCommand::Cancel => {
            dash.cancel_edit();
            writeln!(out, "  {}", "Form cleared.".dimmed())?;
        }
        ShellCommand::Delete(id) => match dash.delete(id).await {
            Ok(()) => writeln!(out, "  {} Deleted user #{id}.", "✔".green().bold())?,
            Err(e) => report_error(out, &e)?,
        },
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn write_prompt<W: Write>(dash: &Dashboard, out: &mut W) -> Result<()> {
    match dash.editing() {
        Some(user) => write!(out, "{} ", format!("userdash [edit #{}]>", user.id).yellow())?,
        None => write!(out, "{} ", "userdash>".cyan())?,
    }
    out.flush()?;
    Ok(())
}

fn print_form<W: Write>(dash: &Dashboard, out: &mut W) -> Result<()> {
    let form = dash.form();
    for field in [FormField::Name, FormField::Username, FormField::Email, FormField::CompanyName] {
        let label = format!("{:<13}", format!("{}:", field.label()));
        writeln!(out, "    {} {}", label.cyan(), form.get(field))?;
    }
    let mode = if dash.is_editing() { "Update" } else { "Submit" };
    writeln!(out, "    {} {}", format!("{:<13}", "mode:").cyan(), mode)?;
    Ok(())
}

fn report_error<W: Write>(out: &mut W, error: &DashboardError) -> Result<()> {
    writeln!(out, "  {} {}", "✖".red().bold(), error.to_string().red())?;
    Ok(())
}
