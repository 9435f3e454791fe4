//! statewright CLI and REST API entry point.
//!
//! Binary name: `swright`
//!
//! Parses CLI arguments, sets up tracing, then either validates a definition
//! file offline or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;
use statewright_infra::config::{load_server_config, resolve_config_path};
use statewright_observe::tracing_setup::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `validate` is a one-shot command; keep its output free of info logs.
    let directives = match (&cli.command, cli.verbose) {
        (Commands::Validate { .. }, 0) if !cli.quiet => "warn",
        _ => cli.log_directives(),
    };
    init_tracing(directives, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host, config } => {
            let config_path = resolve_config_path(config.as_deref());
            let mut server_config = load_server_config(&config_path).await;
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            let addr = server_config.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, config = %config_path.display(), "workflow engine listening");

            if !cli.quiet {
                println!();
                println!(
                    "  {} statewright API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
                println!();
            }

            let router = http::router::build_router(AppState::in_memory());

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Validate { file } => {
            let valid = cli::validate::validate_file(&file, cli.json).await?;
            if !valid {
                anyhow::bail!("{} failed validation", file.display());
            }
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
