use anyhow::Result;
use colored::Colorize;
use inquire::{Select, Text};

use crate::config::{Config, MISSING_FIELD_ENV, MissingFieldPolicy};

pub fn run() -> Result<()> {
    println!();
    println!("{}", "Book Meta Settings".bold().cyan());
    println!("{}", "─".repeat(40).dimmed());

    let mut config = Config::load()?;

    let options = vec![
        "🔎  Missing fields     │ Empty line or error",
        "📜  Log level          │ Diagnostics on stderr",
        "📋  View Settings      │ See current configuration",
        "←   Back",
    ];

    loop {
        let selection =
            Select::new("What would you like to configure?", options.clone()).prompt();

        let selection = match selection {
            Ok(s) => s,
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match selection {
            s if s.contains("Missing fields") => {
                if let Err(e) = select_policy(&mut config)
                    && !is_cancelled(&e)
                {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            s if s.contains("Log level") => {
                if let Err(e) = set_log_level(&mut config)
                    && !is_cancelled(&e)
                {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            s if s.contains("View Settings") => view_config(&config),
            s if s.contains("Back") => break,
            _ => {}
        }

        println!();
    }

    Ok(())
}

/// Esc or Ctrl-C inside a prompt backs out quietly
fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<inquire::InquireError>(),
        Some(inquire::InquireError::OperationCanceled)
            | Some(inquire::InquireError::OperationInterrupted)
    )
}

fn select_policy(config: &mut Config) -> Result<()> {
    let options = vec![
        "empty - print an empty line and exit 0",
        "error - print \"Field not found\" and exit 3",
    ];

    let selection = Select::new("When a field is missing:", options).prompt()?;
    let policy = if selection.starts_with("error") {
        MissingFieldPolicy::Error
    } else {
        MissingFieldPolicy::Empty
    };

    config.missing_field = Some(policy);
    config.save()?;

    println!("{} Missing-field policy set to {:?}", "✓".green(), policy);

    Ok(())
}

fn set_log_level(config: &mut Config) -> Result<()> {
    let level = Text::new("Log filter:")
        .with_default(config.log_filter())
        .with_help_message("e.g. warn, info, book_meta=debug (RUST_LOG takes precedence)")
        .prompt()?;

    if level.trim().is_empty() {
        println!("{}", "Cancelled.".dimmed());
        return Ok(());
    }

    config.log_level = Some(level.trim().to_string());
    config.save()?;

    println!("{} Log level set to {}", "✓".green(), level.trim().yellow());

    Ok(())
}

fn view_config(config: &Config) {
    println!("\n{}", "Current Configuration:".bold());
    println!("{}", "─".repeat(30).dimmed());

    let policy = match config.missing_field_policy() {
        MissingFieldPolicy::Empty => "empty".green().to_string(),
        MissingFieldPolicy::Error => "error".yellow().to_string(),
    };
    let source = if std::env::var(MISSING_FIELD_ENV).is_ok() {
        format!(" (via {})", MISSING_FIELD_ENV)
    } else {
        String::new()
    };

    println!("  Missing fields: {}{}", policy, source.dimmed());
    println!("  Log level: {}", config.log_filter());

    if let Ok(path) = Config::config_path() {
        println!("  Config file: {}", path.display().to_string().dimmed());
    }
}
