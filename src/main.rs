use hotel_relay::{logger, server, Config};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    info!("🏨 Hotel Relay - availability lookup");

    let config = Config::from_env();
    server::run(config).await
}
