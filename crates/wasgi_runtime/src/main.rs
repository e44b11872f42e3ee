//! WASGI Runtime
//!
//! Stand-in embedder: loads a guest script against an in-memory scene and
//! drives its update hook at a fixed tick rate.

use anyhow::{Context, Result};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wasgi_core::scene::SceneStore;
use wasgi_core::time::{SimulationClock, DEFAULT_TICK_RATE_HZ};
use wasgi_script::ScriptHost;
use wasgi_services::{HostConfig, TracingSink};

#[derive(Parser, Debug)]
#[command(name = "wasgi")]
#[command(about = "Run a scene script's update hook at a fixed tick rate")]
struct Cli {
    /// Guest JavaScript source file
    script: PathBuf,

    /// Number of ticks to run
    #[arg(long, default_value = "60")]
    ticks: u64,

    /// Tick rate in Hz
    #[arg(long, default_value_t = DEFAULT_TICK_RATE_HZ)]
    rate: u32,

    /// Host config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sleep between ticks to match wall-clock time
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    info!("WASGI v{}", wasgi_core::VERSION);

    let config = match &cli.config {
        Some(path) => HostConfig::from_path(path)?,
        None => HostConfig::default(),
    };

    let scene = Rc::new(RefCell::new(SceneStore::new()));
    let host = ScriptHost::new(config, Rc::new(TracingSink), scene.clone())
        .context("failed to start script host")?;
    host.evaluate_file(&cli.script)
        .with_context(|| format!("failed to load {}", cli.script.display()))?;

    let mut clock = SimulationClock::new(cli.rate);
    for _ in 0..cli.ticks {
        let dt = clock.advance_tick();
        // A failing tick is already logged; keep the simulation running.
        if let Err(err) = host.tick(dt) {
            warn!(tick = clock.tick_count(), "{err}");
        }
        if cli.realtime {
            std::thread::sleep(clock.tick_duration());
        }
    }

    let stats = host.stats();
    info!(
        ticks = stats.ticks,
        hook_calls = stats.hook_calls,
        failures = stats.failures,
        simulated = ?clock.total_time(),
        "simulation finished"
    );
    for (id, light) in scene.borrow().iter() {
        info!(
            %id,
            name = light.name.as_deref().unwrap_or("-"),
            kind = light.kind.as_str(),
            color = ?light.color,
            intensity = light.intensity,
            "light"
        );
    }

    Ok(())
}
