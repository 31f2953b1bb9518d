use anyhow::Result;
use tracing_subscriber::EnvFilter;

use enviro_gateway::config::GatewayConfig;
use enviro_gateway::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env();
    web::run(config).await
}
