//! Daydream CLI entry point.
//!
//! Binary name: `daydream`
//!
//! Parses CLI arguments, sets up logging, then runs one interactive story
//! until input ends, the model stream fails, or the user interrupts.

mod cli;

use clap::Parser;
use console::style;
use tokio_util::sync::CancellationToken;

use daydream_core::story::StoryError;
use daydream_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::Cli;
use cli::story::run_story;

/// Exit status after Ctrl+C or SIGTERM.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_filter(), cli.otel) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        on_signal.cancel();
    });

    let result = run_story(cli, cancel).await;
    let code = exit_status(&result);

    if let Err(err) = &result {
        report(err);
    }

    shutdown_tracing();
    // Exit directly: a stdin read still parked on the blocking pool would
    // otherwise hold up runtime shutdown.
    std::process::exit(i32::from(code));
}

fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) if is_cancelled(err) => EXIT_INTERRUPTED,
        Err(_) => 1,
    }
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<StoryError>(), Some(StoryError::Cancelled))
}

/// Print the fatal error to stderr and log it.
fn report(err: &anyhow::Error) {
    if is_cancelled(err) {
        tracing::info!("story interrupted");
        eprintln!();
        return;
    }

    let message = format!("{err:#}");
    tracing::error!(error = %message, "story ended");
    eprintln!("\n{} {err:#}", style("error:").red().bold());
}

/// Wait for Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
