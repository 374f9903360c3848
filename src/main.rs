use clap::Parser;
use tracing::{info, warn};

use sentiq::analysis::{self, Analyzer};
use sentiq::cli::Cli;
use sentiq::client::{HttpChatClient, resolve_api_key};
use sentiq::config::Config;
use sentiq::error::Result;
use sentiq::input::{self, InputFormat};
use sentiq::report;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    // Input errors halt here, before any credential lookup or network call.
    let source = input::read_source(&cli.input)?;
    let format = config
        .format
        .as_deref()
        .and_then(InputFormat::from_name)
        .unwrap_or_else(|| InputFormat::detect(&cli.input));
    let comments = input::load_comments(&source, format)?;
    info!(count = comments.len(), "loaded comments");

    let api_key = resolve_api_key(&config.api_key_env)?;
    let client = HttpChatClient::new(config, api_key);
    let mut analyzer = Analyzer::new(client, config.cache_capacity);

    let records = analyzer.classify(&comments)?;

    println!("{}", report::render_table(&records));
    println!("Sentiment distribution:");
    print!("{}", report::render_distribution(&analysis::distribution(&records)));

    if let Some(path) = &config.output {
        let file = std::fs::File::create(path)?;
        report::write_csv(&records, file)?;
        info!(path = %path.display(), "results CSV written");
    }

    // A theme failure degrades; the sentiment results above stay usable.
    if !config.skip_themes {
        match analyzer.extract_themes(&comments, config.theme_count) {
            Ok(themes) => {
                println!("\nTop themes:");
                print!("{}", report::render_themes(&themes));
            }
            Err(e) => {
                warn!(error = %e, "theme extraction failed");
                println!("\nThemes unavailable: {e}");
            }
        }
    }

    Ok(())
}
