use clap::Parser;
use owo_colors::{OwoColorize, Style};
use sched_core::db;
use sched_core::error::{CoreError, RuleError};
use sched_core::repository::SqliteRepository;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);

    let result = match cli.command {
        cli::Commands::NextDate(command) => match commands::next_date::next_date(&command) {
            Ok(next) => {
                println!("{next}");
                Ok(())
            }
            Err(e) if command.json => {
                println!("{}", commands::next_date::error_json(&e));
                std::process::exit(1);
            }
            Err(e) => Err(e),
        },
        cli::Commands::Task(command) => run_with_repository(command, &config).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_with_repository(command: cli::TaskCommands, config: &config::Config) -> anyhow::Result<()> {
    tracing::debug!(dbfile = %config.dbfile, "opening task database");
    let db_pool = db::establish_connection(&config.dbfile).await?;
    let repository = SqliteRepository::new(db_pool);

    match command {
        cli::TaskCommands::Add(command) => commands::add::add_task(&repository, command).await,
        cli::TaskCommands::List(command) => commands::list::list_tasks(&repository, command, config).await,
        cli::TaskCommands::Show(command) => commands::show::show_task(&repository, command).await,
        cli::TaskCommands::Edit(command) => commands::edit::edit_task(&repository, command).await,
        cli::TaskCommands::Done(command) => commands::done::done_task(&repository, command).await,
        cli::TaskCommands::Delete(command) => commands::delete::delete_task(&repository, command).await,
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!("{} Task with ID '{}' not found.", "Error:".style(error_style), id.yellow());
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Rule(rule_error) => print_rule_error(rule_error),
            other => {
                eprintln!("{} {}", "Error:".style(error_style), other);
                if let Some(source) = std::error::Error::source(other) {
                    eprintln!("  Caused by: {}", source);
                }
            }
        }
    } else if let Some(rule_error) = err.downcast_ref::<RuleError>() {
        print_rule_error(rule_error);
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}

fn print_rule_error(err: &RuleError) {
    eprintln!("{} {}", "Error:".red().bold(), err);
}
