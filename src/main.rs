use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_quest::{
    notify::LogNotifier, ClientMessage, Config, GameSession, ServerMessage, ThemeCatalog,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the message stream, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_quest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Word Quest...");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let catalog = match &config.themes_path {
        Some(path) => match ThemeCatalog::load(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Failed to load themes from {}: {}. Using built-in themes.", path, e);
                ThemeCatalog::embedded()
            }
        },
        None => ThemeCatalog::embedded(),
    };

    let session = GameSession::new(
        catalog,
        config.session_config(),
        Box::new(StdRng::from_os_rng()),
        Box::new(LogNotifier),
    )?;

    let (in_tx, in_rx) = mpsc::channel::<ClientMessage>(100);
    let (out_tx, mut out_rx) = mpsc::channel::<ServerMessage>(100);

    // Write server messages to stdout, one JSON document per line
    let mut send_task = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(msg) = out_rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(mut json) => {
                    json.push('\n');
                    if stdout.write_all(json.as_bytes()).await.is_err() {
                        break;
                    }
                    if stdout.flush().await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Parse client messages from stdin
    let error_tx = out_tx.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ClientMessage>(&line) {
                Ok(msg) => {
                    if in_tx.send(msg).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to parse message: {}", e);
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = error_tx.send(error_msg).await;
                }
            }
        }
        tracing::info!("Input closed");
    });

    let session_task = tokio::spawn(word_quest::session::run(
        session,
        in_rx,
        out_tx,
        config.tick_interval(),
    ));

    // Wait for either side of the bridge to finish
    let mut output_closed = false;
    tokio::select! {
        _ = (&mut send_task) => {
            output_closed = true;
            recv_task.abort();
        }
        _ = (&mut recv_task) => {}
    }

    session_task.await??;
    if !output_closed {
        // Flush whatever the session produced before it saw the input close
        send_task.await.ok();
    }

    tracing::info!("Word Quest stopped");

    Ok(())
}
