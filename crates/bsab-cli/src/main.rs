//! bsab - terminal chat front-end for the Building Safety Act Bot

mod commands;
mod config;
mod ui;

use clap::Parser;

use bsab_api::{FileAttachment, Gateway};
use bsab_chat::ChatSession;

/// bsab - ask questions about building safety regulations
#[derive(Parser, Debug)]
#[command(name = "bsab")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL (default: http://localhost:5001/api)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Run in non-interactive mode with a single question
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Upload a file to the bot's knowledge base and exit
    #[arg(long)]
    embed: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Skip the greeting message
    #[arg(long)]
    no_greeting: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("bsab=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    // Resolve base URL: CLI flag > env var > config file > default
    let base_url = config::resolve_base_url(
        args.base_url,
        std::env::var(bsab_api::BASE_URL_ENV_VAR).ok(),
        &cfg,
    );

    let gateway = Gateway::new(base_url);
    tracing::debug!(base_url = %gateway.base_url(), "resolved backend");

    // One-shot knowledge-base upload
    if let Some(ref path) = args.embed {
        let file = FileAttachment::from_path(path)?;
        let name = file.name.clone();
        let chunks = gateway.embed_reference_file(file).await?;
        println!("✅ Uploaded \"{}\" → {} chunks created.", name, chunks);
        return Ok(());
    }

    if !gateway.health().await {
        eprintln!(
            "Warning: backend at {} is not responding; sends will fail until it is up.",
            gateway.base_url()
        );
    }

    let mut session = if args.no_greeting {
        ChatSession::without_greeting(gateway)
    } else {
        match cfg.greeting {
            Some(ref greeting) if greeting.is_empty() => ChatSession::without_greeting(gateway),
            Some(ref greeting) => ChatSession::with_greeting(gateway, greeting.clone()),
            None => ChatSession::new(gateway),
        }
    };

    // Non-interactive mode
    if let Some(ref question) = args.command {
        println!("> {}", question);
        session.set_text(question.clone());
        ui::send_and_print(&mut session).await?;
        return Ok(());
    }

    // Interactive mode (simple stdin/stdout)
    ui::run_interactive(&mut session).await
}
