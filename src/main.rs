use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};

use httpmq_rs::{BrokerServer, ServerConfig};

#[derive(Parser)]
#[command(name = "httpmq", about = "Minimal HTTP message broker with long-polling consumers")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8888", env = "HTTPMQ_BIND")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let server = Arc::new(BrokerServer::new(ServerConfig::default().bind(cli.bind)));
    let registry = Arc::clone(server.registry());

    // SIGHUP flushes every topic; Ctrl+C / SIGINT shuts down.
    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to register SIGHUP handler");
            std::process::exit(1);
        }
    };

    let mut broker = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.run().await })
    };

    tracing::info!("httpmq started, press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = sighup.recv() => {
                tracing::info!("SIGHUP received, flushing all topics");
                registry.flush_all().await;
                tracing::info!("done");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down...");
                break;
            }
            result = &mut broker => {
                match result {
                    Ok(Ok(())) => tracing::info!("server stopped"),
                    Ok(Err(e)) => tracing::error!(error = %e, "server error"),
                    Err(e) => tracing::error!(error = %e, "server task failed"),
                }
                std::process::exit(1);
            }
        }
    }
}
