use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use voiceline::{logstore, AppState, Config, RealtimeTokenIssuer, SessionManager};

#[derive(Parser, Debug)]
#[command(name = "voiceline", about = "Voice-assistant session backend")]
struct Args {
    /// Configuration file path, without extension (`config` crate style)
    #[arg(long, default_value = "config/voiceline")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Voiceline v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Session limit {}s, rate {}/min, storage backend '{}'",
        cfg.call.max_duration_secs, cfg.call.cost_per_minute, cfg.storage.backend
    );

    let issuer = Arc::new(RealtimeTokenIssuer::from_config(&cfg.upstream)?);
    let store = logstore::from_config(&cfg.storage)?;
    let manager = SessionManager::new(issuer, store, cfg.call.clone());

    let router = voiceline::create_router(AppState { manager });

    let addr: SocketAddr =
        format!("{}:{}", cfg.service.http.bind, cfg.service.http.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
