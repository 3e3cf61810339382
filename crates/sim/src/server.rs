//! Fixed-rate frame loop.

use crate::config::Config;
use crate::world::Simulation;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Run the simulation until `sim.frames` frames have elapsed or Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let mut sim = Simulation::new(&config)?;

    let tick_interval_ms = config.sim.tick_interval_ms.max(1);
    let tick = Duration::from_millis(tick_interval_ms);
    let mut ticker = interval_at(Instant::now() + tick, tick);
    // Skip missed ticks so a slow frame does not trigger a burst of catch-up frames.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last = Instant::now();
    let mut step_time_avg = 0.0f64;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted after {} frames", sim.frame());
                break;
            }
            scheduled = ticker.tick() => {
                let dt = scheduled.saturating_duration_since(last).as_secs_f32();
                last = scheduled;

                let step_start = std::time::Instant::now();
                let stats = sim.step(dt)?;
                let step_ms = step_start.elapsed().as_secs_f64() * 1000.0;
                step_time_avg = step_time_avg * 0.5 + step_ms * 0.5;

                let budget = tick_interval_ms as f64 * 0.9;
                if step_ms > budget {
                    warn!(
                        "Slow frame #{}: {:.3}ms (budget: {:.1}ms) - {} particles, {} cells",
                        stats.frame, step_ms, budget, stats.indexed, stats.cells
                    );
                }

                let every = config.sim.stats_every;
                if every > 0 && stats.frame % every == 0 {
                    info!(
                        "Frame {}: {} indexed, {} cells (depth {}), {} candidates, {} contacts, {:.3}ms avg",
                        stats.frame,
                        stats.indexed,
                        stats.cells,
                        stats.depth,
                        stats.candidates,
                        stats.contacts,
                        step_time_avg
                    );
                }

                if config.sim.frames != 0 && stats.frame >= config.sim.frames {
                    info!("Finished {} frames", stats.frame);
                    break;
                }
            }
        }
    }

    Ok(())
}
