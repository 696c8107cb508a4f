//! Nutrilog
//!
//! Terminal client for the daily nutrition API: pick or create a profile,
//! enter what you ate per calendar day, and read the server's BMR, calorie
//! targets and feedback for that day.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutrilog_client::api::HttpNutritionApi;
use nutrilog_client::cli::{self, Args, Flow};
use nutrilog_client::config::ClientConfig;
use nutrilog_client::confirm::{AlwaysConfirm, OverwriteConfirm, PromptConfirm};
use nutrilog_client::storage::{FileStore, LocalStore, MemoryStore};
use nutrilog_client::Orchestrator;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let mut config = ClientConfig::load()?;
    args.apply(&mut config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api.base_url,
        "Starting Nutrilog"
    );

    let api = HttpNutritionApi::new(&config.api)?;
    let store: Arc<dyn LocalStore> = if args.memory_store {
        Arc::new(MemoryStore::new())
    } else {
        let path = config.storage.resolved_path();
        debug!(path = %path.display(), "Using file store");
        Arc::new(FileStore::new(path))
    };
    let confirm: Box<dyn OverwriteConfirm> = if args.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(PromptConfirm)
    };

    let mut orchestrator = Orchestrator::new(api, store, confirm, config.banner.dismiss_after());
    orchestrator.activate().await;

    let greeting = cli::execute(&mut orchestrator, cli::Command::Show).await;
    if let Flow::Continue(text) = greeting {
        println!("{}\n", text);
    }
    println!("Type `help` for commands.");

    while let Some(line) = read_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match cli::parse_line(line) {
            Ok(command) => command,
            Err(err) => {
                // Covers `help` too
                println!("{}", err);
                continue;
            }
        };

        match cli::execute(&mut orchestrator, command).await {
            Flow::Continue(text) => println!("{}\n", text),
            Flow::Quit => break,
        }
    }

    info!("Nutrilog stopped");
    Ok(())
}

/// Prompt and read one line; `None` at end of input
async fn read_line() -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    })
    .await??;
    Ok(line)
}

/// Initialize tracing/logging
///
/// Logs go to stderr so they do not interleave with the prompt on stdout.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if ClientConfig::is_production() {
            "nutrilog_client=info,nutrilog=info".into()
        } else {
            "nutrilog_client=debug,nutrilog=debug,reqwest=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if ClientConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}
