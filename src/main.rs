use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod extract;
mod ingest;
mod validate;

use commands::field::{self, Outcome};
use config::{Config, MissingFieldPolicy};
use extract::Field;

/// Print a styled status line
fn print_status(label: &str, value: &str, icon: &str) {
    println!(
        "  {} {} {}",
        icon,
        format!("{}:", label).dimmed(),
        value.cyan()
    );
}

#[derive(Parser)]
#[command(name = "book-meta")]
#[command(about = "Extract metadata fields (Author, Full Title, ...) from Markdown book notes")]
#[command(version)]
struct Cli {
    /// What to print when the document has no line for the field
    #[arg(long, global = true, value_enum)]
    missing: Option<MissingFieldPolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Author of a book note
    Author {
        /// Markdown file to read
        path: Option<String>,
    },
    /// Print the Full Title of a book note
    Title {
        /// Markdown file to read
        path: Option<String>,
    },
    /// Print the value of any `Label: value` field
    Field {
        /// Field label, matched case-sensitively
        label: String,
        /// Markdown file to read
        path: Option<String>,
    },
    /// List every `- Label: value` line in a book note
    Fields {
        /// Markdown file to read
        path: Option<String>,
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Configure settings (missing-field policy, log level)
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    // stdout carries the extracted values; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Print the outcome and exit with its code when it failed
fn finish(outcome: Outcome) -> Result<()> {
    tracing::debug!(code = outcome.exit_code, first = ?outcome.first_line(), "command finished");
    outcome.emit();
    if !outcome.is_success() {
        std::process::exit(outcome.exit_code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => {
            init_logging(&config);
            config
        }
        Err(e) => {
            let config = Config::default();
            init_logging(&config);
            tracing::warn!("using default settings: {:#}", e);
            config
        }
    };

    let policy = cli
        .missing
        .unwrap_or_else(|| config.missing_field_policy());

    match cli.command {
        Some(Commands::Author { path }) => finish(field::get_author(path.as_deref(), policy))?,
        Some(Commands::Title { path }) => finish(field::get_title(path.as_deref(), policy))?,
        Some(Commands::Field { label, path }) => finish(field::get_field(
            Field::from_label(&label),
            path.as_deref(),
            policy,
        ))?,
        Some(Commands::Fields { path, json }) => finish(field::list_fields(path.as_deref(), json)?)?,
        Some(Commands::Config) => commands::config::run()?,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            // No subcommand - show interactive menu
            run_interactive(policy)?;
        }
    }

    Ok(())
}

fn run_interactive(policy: MissingFieldPolicy) -> Result<()> {
    use inquire::{Select, Text};

    println!("\n{}", "📖 Book Meta".cyan().bold());
    println!(
        "  {} {}\n",
        "Version:".dimmed(),
        env!("CARGO_PKG_VERSION").cyan()
    );

    println!("{}", "─".repeat(50).dimmed());
    let policy_name = match policy {
        MissingFieldPolicy::Empty => "empty line",
        MissingFieldPolicy::Error => "error",
    };
    print_status("Missing fields", policy_name, "🔎");
    println!("{}\n", "─".repeat(50).dimmed());

    let options = vec![
        "✍️   Get the Author",
        "📕  Get the Full Title",
        "🏷️   Get another field",
        "📋  List all fields",
        "⚙️   Configure settings",
        "🚪  Exit",
    ];

    let selection = Select::new("What would you like to do?", options)
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt()?;

    println!(); // Add spacing

    let wanted = match selection {
        s if s.contains("Author") => Field::Author,
        s if s.contains("Full Title") => Field::FullTitle,
        s if s.contains("another field") => {
            let label = Text::new("Field label:")
                .with_help_message("Case-sensitive, e.g. Category")
                .prompt()?;
            Field::from_label(&label)
        }
        s if s.contains("List all") => {
            let path = Text::new("Book note path:").prompt()?;
            return finish(field::list_fields(Some(path.trim()), false)?);
        }
        s if s.contains("Configure") => return commands::config::run(),
        s if s.contains("Exit") => return Ok(()),
        _ => unreachable!(),
    };

    let path = Text::new("Book note path:")
        .with_help_message("Markdown file with a `- Label: value` metadata block")
        .prompt()?;

    finish(field::get_field(wanted, Some(path.trim()), policy))
}
