//! Command-line interface for word_guess.

use clap::Parser;

/// Word Guess - word-guessing game server with an HTTP API
#[derive(Parser, Debug)]
#[command(name = "word_guess")]
#[command(about = "HTTP word-guessing game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Path to the database file (created if it doesn't exist)
    #[arg(long, default_value = "word_guess.db")]
    pub db_path: String,

    /// Path to the word list file, one word per line
    #[arg(long, default_value = "words.txt")]
    pub words: std::path::PathBuf,
}
