pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "glint",
    about = "Glint operator CLI",
    long_about = "Operate Glint migrations, config inspection, readiness checks, and the failed-submission queue.",
    after_help = "Examples:\n  glint doctor --json\n  glint queue list\n  glint queue retry"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Inspect effective configuration values")]
    Config,
    #[command(about = "Validate config and run database connectivity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Operate the failed-submission queue")]
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },
}

#[derive(Debug, Subcommand)]
enum QueueCommand {
    #[command(about = "List submissions whose delivery failed")]
    List,
    #[command(about = "Re-attempt delivery for every queued submission, in order")]
    Retry,
    #[command(about = "Discard every queued submission (irreversible)")]
    Clear,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Queue { command } => match command {
            QueueCommand::List => commands::queue::list(),
            QueueCommand::Retry => commands::queue::retry(),
            QueueCommand::Clear => commands::queue::clear(),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
