#![forbid(unsafe_code)]

mod cli;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use api::AppState;
use services::QuestionService;
use storage::Storage;
use storage::seed::seed_sample_data;

use crate::cli::{Cli, Command, DbArgs, ServeArgs, prepare_sqlite_file};

async fn open_storage(db: &DbArgs) -> Result<Storage> {
    let db_url = db.normalized_url()?;
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url)
        .await
        .with_context(|| format!("failed to open {db_url}"))?;
    tracing::debug!(%db_url, "storage ready");
    Ok(storage)
}

async fn seed(storage: &Storage) -> Result<()> {
    let report = seed_sample_data(storage)
        .await
        .context("failed to seed sample data")?;
    if report.is_empty() {
        tracing::info!("database already has categories, nothing seeded");
    }
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let storage = open_storage(&args.db).await?;
    if args.seed {
        seed(&storage).await?;
    }

    let service = QuestionService::new(storage.questions.clone(), storage.categories.clone());
    let state = AppState::new(Arc::new(service));
    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    api::serve(listener, state, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        return;
    }
    tracing::info!("shutdown requested");
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Seed(db) => {
            let storage = open_storage(&db).await?;
            seed(&storage).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::from(2);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(2)
        }
    }
}
