use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use urban_assistant::HttpAssistantClient;
use urban_cli::{
    command::{Command, HELP},
    config::Config,
    render,
};
use urban_overlays::{AssetSource, DirAssetSource, HttpAssetSource};
use urban_state::{EventLoop, MapCoordinator, ViewSnapshot};
use urban_types::MessageId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Urban Intellect");
    tracing::info!("Assistant endpoint: {}", config.assistant.base_url);

    let client = Arc::new(HttpAssistantClient::new(config.assistant_config())?);
    let coordinator =
        MapCoordinator::new(client, config.session.clone()).with_points(config.points.clone());

    let mut event_loop = EventLoop::new(coordinator);
    if let Some(assets) = asset_source(&config)? {
        event_loop = event_loop.with_assets(assets);
    }
    let handle = event_loop.spawn();

    let printer = tokio::spawn(print_new_messages(handle.subscribe()));

    println!("Urban Intellect. Type a question, or :help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    'repl: while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Events(events)) => {
                for event in events {
                    if handle.send(event).await.is_err() {
                        tracing::error!("Coordinator stopped unexpectedly");
                        break 'repl;
                    }
                }
            }
            Ok(Command::Show) => print!("{}", render::render(&handle.snapshot())),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Err(e) => println!("{}", e),
        }
        std::io::stdout().flush()?;
    }

    printer.abort();
    handle
        .shutdown()
        .await
        .map_err(|e| anyhow::anyhow!("Coordinator task failed: {}", e))?;

    tracing::info!("Goodbye");
    Ok(())
}

fn asset_source(config: &Config) -> anyhow::Result<Option<Arc<dyn AssetSource>>> {
    if let Some(dir) = &config.assets.dir {
        tracing::info!("Loading assets from {}", dir.display());
        let source: Arc<dyn AssetSource> = Arc::new(DirAssetSource::new(dir.clone()));
        return Ok(Some(source));
    }
    if let Some(base_url) = &config.assets.base_url {
        tracing::info!("Loading assets from {}", base_url);
        let source: Arc<dyn AssetSource> = Arc::new(HttpAssetSource::new(base_url.clone())?);
        return Ok(Some(source));
    }
    tracing::warn!("No asset source configured; prompts and overlays are unavailable");
    Ok(None)
}

/// Print transcript entries as they arrive.
async fn print_new_messages(mut snapshots: watch::Receiver<ViewSnapshot>) {
    let mut last_seen: MessageId = 0;
    let mut connected = false;

    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();

        if snapshot.connected != connected {
            connected = snapshot.connected;
            println!(
                "[assistant {}]",
                if connected { "connected" } else { "offline" }
            );
        }

        let mut out = String::new();
        last_seen = render::render_new_messages(&mut out, &snapshot.messages, last_seen);
        if !out.is_empty() {
            print!("{}", out);
            let _ = std::io::stdout().flush();
        }
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout belongs to the REPL
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
