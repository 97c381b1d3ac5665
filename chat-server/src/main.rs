use chat_server::{AppState, Config, app, init_logging};
use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_logging();

    let relay = config.relay()?;
    if let Err(e) = relay.completion().check_config() {
        warn!(error = %e, backend = ?config.backend, "chat requests will fail until this is fixed");
    }

    let addr: SocketAddr = config.addr.parse()?;
    info!(%addr, backend = ?config.backend, history = config.history_len, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(AppState::new(relay))).await?;
    Ok(())
}
