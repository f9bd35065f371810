//! userdash: terminal dashboard for a remote user directory.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use userdash::api::HttpDirectory;
use userdash::config::Config;
use userdash::constants;
use userdash::dashboard::{Dashboard, SubmitOutcome};
use userdash::env::Env;
use userdash::store::{FileStore, MemoryStore, StateMirror, StateStore};

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt};

use cli::args::{AddArgs, Cli, Command, EditArgs, ListArgs, OutputFormat, StateAction};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;

    match cli.command {
        Command::List(args) => run_list(&config, args).await,
        Command::Add(args) => run_add(&config, args).await,
        Command::Edit(args) => run_edit(&config, args).await,
        Command::Delete { id } => run_delete(&config, id).await,
        Command::Shell => run_shell(&config).await,
        Command::State { action } => run_state(&config, action),
        Command::Version => run_version(),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("userdash={default_level}")));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load layered config, then apply CLI flags on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir().ok();
    let mut config =
        Config::load(cwd.as_deref(), &Env::real()).context("failed to load configuration")?;

    if let Some(ref url) = cli.base_url {
        config.api.base_url = url.clone();
    }
    if let Some(ref dir) = cli.state_dir {
        config.storage.dir = Some(dir.clone());
    }
    if cli.no_persist {
        config.storage.enabled = false;
    }
    Ok(config)
}

/// Pick the state store: the on-disk file, or memory when persistence is off.
fn open_store(config: &Config) -> Box<dyn StateStore> {
    match config.state_dir() {
        Some(dir) if config.storage.enabled => Box::new(FileStore::new(dir)),
        _ => Box::new(MemoryStore::new()),
    }
}

fn build_dashboard(config: &Config) -> Result<Dashboard> {
    let api = HttpDirectory::new(&config.api.base_url, config.api.timeout())
        .context("failed to create directory client")?;
    let mirror = StateMirror::new(open_store(config));
    Ok(Dashboard::resume(Arc::new(api), mirror))
}

/// Fetch and print the user list.
async fn run_list(config: &Config, args: ListArgs) -> Result<()> {
    let mut dash = build_dashboard(config)?;
    let loaded = dash.load().await;
    print!("{}", args.format.render(&dash.view()));
    loaded.context("failed to load users")?;
    Ok(())
}

/// Create one user from flags. Fields not given come from the saved draft.
async fn run_add(config: &Config, args: AddArgs) -> Result<()> {
    let mut dash = build_dashboard(config)?;
    dash.load().await.context("failed to load users")?;

    for (field, value) in args.fields.provided() {
        dash.set_field(field, value);
    }
    let outcome = dash.submit().await.context("failed to create user")?;
    print_outcome(&outcome);
    Ok(())
}

/// Update one user, keeping fields not given on the command line.
async fn run_edit(config: &Config, args: EditArgs) -> Result<()> {
    let mut dash = build_dashboard(config)?;
    dash.load().await.context("failed to load users")?;

    dash.begin_edit(args.id)
        .with_context(|| format!("cannot edit user {}", args.id))?;
    for (field, value) in args.fields.provided() {
        dash.set_field(field, value);
    }
    let outcome = dash
        .submit()
        .await
        .with_context(|| format!("failed to update user {}", args.id))?;
    print_outcome(&outcome);
    Ok(())
}

/// Delete one user by id.
async fn run_delete(config: &Config, id: i64) -> Result<()> {
    let mut dash = build_dashboard(config)?;
    dash.load().await.context("failed to load users")?;

    if !dash.records().iter().any(|r| r.id == id) {
        tracing::warn!(id, "user is not in the loaded list; deleting remotely anyway");
    }
    dash.delete(id)
        .await
        .with_context(|| format!("failed to delete user {id}"))?;
    println!("  {} Deleted user #{id}.", "✔".green().bold());
    Ok(())
}

/// Interactive session on stdin/stdout.
async fn run_shell(config: &Config) -> Result<()> {
    let mut dash = build_dashboard(config)?;
    cli::print_banner(&config.api.base_url);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    cli::shell::run(&mut dash, stdin, &mut stdout).await
}

/// Manage the persisted state.
fn run_state(config: &Config, action: StateAction) -> Result<()> {
    let mut store = open_store(config);

    match action {
        StateAction::Show => {
            let entries = store.entries().context("failed to read state")?;
            if entries.is_empty() {
                println!("No persisted state.");
                return Ok(());
            }
            let mirror = StateMirror::new(store);
            for (key, value) in &entries {
                let label = format!("{:<12}", format!("{key}:")).cyan();
                if key == constants::KEY_USER_DATA {
                    match mirror.stored_records() {
                        Some(records) => println!("  {label} {} record(s)", records.len()),
                        None => println!("  {label} {}", "unreadable".red()),
                    }
                } else {
                    println!("  {label} {value}");
                }
            }
        }
        StateAction::Clear => {
            let stats = store.clear().context("failed to clear state")?;
            println!(
                "Cleared {} persisted key(s) ({}).",
                stats.entries,
                stats.human_size(),
            );
        }
        StateAction::Path => match store.location() {
            Some(p) => println!("{}", p.display()),
            None => bail!("persistence is disabled or no state directory could be determined"),
        },
    }

    Ok(())
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Created(user) => println!(
            "  {} Created user #{} ({}).",
            "✔".green().bold(),
            user.id,
            user.username
        ),
        SubmitOutcome::Updated(user) => {
            println!("  {} Updated user #{}.", "✔".green().bold(), user.id)
        }
    }
    print!(
        "{}",
        OutputFormat::Terminal.render(&userdash::dashboard::DashboardView {
            users: std::slice::from_ref(outcome.record()),
            editing: None,
            error: None,
        })
    );
}
