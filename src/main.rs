//! Word Guess - HTTP word-guessing game server.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use word_guess::{Cli, GameRepository, GameService, WordList, game_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Word Guess server");

    if let Some(parent) = std::path::Path::new(&cli.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let repository = GameRepository::new(cli.db_path.clone())?;
    repository.ensure_schema()?;

    let service = GameService::new(repository, WordList::new(cli.words));
    let app = game_router(service);

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    info!(host = %cli.host, port = cli.port, "Server ready at http://{}:{}/", cli.host, cli.port);
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app).await?;

    Ok(())
}
