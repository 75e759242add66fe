#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Error;
use anyhow::Result;
use domain::models::BackendName;
use domain::models::Event;
use domain::services::clipboard::ClipboardService;
use domain::services::ConversationController;
use domain::services::VoiceService;
use infrastructure::backends::BackendManager;
use infrastructure::voice::unavailable::Unavailable;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::application::cli;
use crate::application::repl::Repl;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! JnanaMitra has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    if env::var("RUST_BACKTRACE").is_err() {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{err:?}");
    }

    process::exit(1);
}

async fn run() -> Result<()> {
    let backend_name = BackendName::parse(Config::get(ConfigKey::Backend)).ok_or_else(|| {
        return anyhow!(
            "Unknown backend '{}'",
            Config::get(ConfigKey::Backend)
        );
    })?;
    let backend = BackendManager::get(backend_name)?;

    // An unreachable service only warns. Every message still gets an answer,
    // either the reply or the failure.
    if let Err(err) = backend.health_check().await {
        tracing::warn!(backend = %backend_name, error = ?err, "Backend health check failed");
        eprintln!(
            "{}",
            Paint::yellow(format!("Warning: {err}. Messages will fail until it is reachable."))
        );
    }

    let typing_delay = Config::get_millis(ConfigKey::TypingDelay)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let controller = Arc::new(ConversationController::new(
        backend,
        event_tx.clone(),
        typing_delay,
    ));

    if let Err(clipboard_err) = ClipboardService::healthcheck() {
        tracing::warn!(err = ?clipboard_err, "Clipboard service is unable to start")
    } else {
        tokio::spawn(async move {
            if let Err(err) = ClipboardService::start().await {
                tracing::error!(error = ?err, "Clipboard service stopped");
            }
        });
    }

    let voice = VoiceService::new(Box::<Unavailable>::default());
    return Repl::new(controller, voice, event_tx).start(event_rx).await;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("jnanamitra")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => (),
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    if let Err(err) = run().await {
        handle_error(err);
    }

    process::exit(0);
}
