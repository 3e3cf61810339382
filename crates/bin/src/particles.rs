//! Particles - headless bouncing particle simulation.

use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "particles.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Particles v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = sim::Config::load(&path)?;
    info!("Loaded configuration from {}", path);
    info!("  World: {}x{}", config.world.width, config.world.height);
    info!("  Particles: {} (radius {})", config.particles.count, config.particles.radius);
    info!(
        "  Index: capacity {}, max depth {}, refresh {:?}",
        config.index.capacity, config.index.max_depth, config.index.refresh
    );

    sim::run(config).await?;

    Ok(())
}
