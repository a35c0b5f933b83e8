//! Command-line surface of the `trivia` binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};

const DEFAULT_DB_URL: &str = "sqlite://trivia.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "trivia", version, about = "Trivia questions API server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Load the sample categories and questions into an empty database.
    Seed(DbArgs),
}

#[derive(Debug, Args)]
pub struct DbArgs {
    /// SQLite database URL or file path.
    #[arg(long = "db", env = "TRIVIA_DB_URL", default_value = DEFAULT_DB_URL)]
    pub db_url: String,
}

impl DbArgs {
    /// The database URL in the `sqlite://<absolute path>` form sqlx expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is blank.
    pub fn normalized_url(&self) -> Result<String> {
        if self.db_url.trim().is_empty() {
            bail!("invalid --db value: {:?}", self.db_url);
        }
        Ok(normalize_sqlite_url(&self.db_url))
    }
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Address to listen on.
    #[arg(long, env = "TRIVIA_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Seed sample data before serving if the database is empty.
    #[arg(long)]
    pub seed: bool,
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directories so sqlx can open it.
///
/// # Errors
///
/// Returns an error if the URL has no file path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}
