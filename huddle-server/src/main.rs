use anyhow::Result;
use clap::Parser;
use huddle_server::{ClientRegistry, Hub, gateway};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huddle-server")]
#[command(about = "Real-time chat and call-signaling relay hub")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let (hub_cmd_tx, hub_cmd_rx) = mpsc::channel(256);
    let registry = ClientRegistry::new(hub_cmd_tx);
    let hub = Hub::new(hub_cmd_rx, Arc::new(registry.clone()));
    tokio::spawn(hub.run());

    let app = gateway::router(registry);

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on port {}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
