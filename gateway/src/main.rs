use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finals_data::ReferenceData;

mod callbacks;
mod config;
mod context;
mod routes;

use config::GatewayConfig;
use context::AppContext;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "worldcup_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;

    // Reference tables are loaded once; any error here is fatal
    let data = match ReferenceData::load(config.countries_path(), config.finals_path()) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Startup aborted: {}", e);
            return Err(e).with_context(|| {
                format!("failed to load reference data from {}", config.data_dir.display())
            });
        }
    };

    let ctx = AppContext::new(data);
    tracing::info!(
        "   Aggregate map built for {} winners",
        ctx.data.win_counts().len()
    );

    let app = routes::router(AppState::new(ctx));

    let addr = config.socket_addr();
    tracing::info!("⚽ World Cup dashboard starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
