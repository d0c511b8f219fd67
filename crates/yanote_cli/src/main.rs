//! Operator CLI.
//!
//! # Responsibility
//! - Provision and remove the accounts that own notes.
//! - Keep a tiny `ping` probe to verify `yanote_core` wiring.
//!
//! # Invariants
//! - Removing an account never removes its notes; they lose their author.

use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use yanote_core::db::open_db;
use yanote_core::{init_console_logging, SqliteUserRepository, UserService};

/// YaNote account administration.
#[derive(Parser, Debug)]
#[command(name = "yanote")]
#[command(about = "YaNote account administration", version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "YANOTE_DB", value_name = "PATH", default_value = "yanote.sqlite3")]
    db: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core linkage information
    Ping,
    /// Create an account
    AddUser { username: String },
    /// Delete an account; its notes are kept without an author
    RemoveUser { username: String },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_console_logging(if cli.verbose { "debug" } else { "warn" })?;

    println!("{}", run(cli)?);
    Ok(())
}

fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    match cli.command {
        Command::Ping => Ok(format!(
            "yanote_core ping={} version={}",
            yanote_core::ping(),
            yanote_core::core_version()
        )),
        Command::AddUser { username } => {
            let conn = open_db(&cli.db)?;
            let user = UserService::new(SqliteUserRepository::try_new(&conn)?)
                .create_user(&username)?;
            info!("event=user_add module=cli status=ok user_id={}", user.id);
            Ok(format!("created user `{}` ({})", user.username, user.id))
        }
        Command::RemoveUser { username } => {
            let conn = open_db(&cli.db)?;
            let user = UserService::new(SqliteUserRepository::try_new(&conn)?)
                .delete_user(&username)?;
            info!("event=user_remove module=cli status=ok user_id={}", user.id);
            Ok(format!("removed user `{}` ({})", user.username, user.id))
        }
    }
}
