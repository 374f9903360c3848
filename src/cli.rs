use std::path::PathBuf;

use clap::Parser;

/// sentiq — sentiment analysis of free-text feedback via a chat-completion API
#[derive(Parser, Debug, Clone)]
#[command(name = "sentiq", version, about)]
pub struct Cli {
    /// Comments to analyze: a JSON array of strings, a CSV with a 'comment'
    /// column, or plain text with one comment per line. Use '-' for stdin.
    pub input: String,

    /// Input format (json, csv, text); inferred from the file extension when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// Write results as CSV to this path
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Number of themes to extract
    #[arg(long, conflicts_with = "no_themes")]
    pub themes: Option<usize>,

    /// Skip theme extraction entirely
    #[arg(long)]
    pub no_themes: bool,

    /// Model identifier sent with every request
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the chat-completion API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key
    #[arg(long)]
    pub api_key_env: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to config file
    #[arg(long)]
    pub config: Option<String>,
}
