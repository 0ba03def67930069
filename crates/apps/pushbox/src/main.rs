use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pushbox::{load_config, PushboxConfig, Simulation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pushbox")]
#[command(about = "Push a box around with a scripted hand", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Simulated seconds (overrides simulation.duration)
    #[arg(long)]
    seconds: Option<f32>,

    /// Frame rate of the input cadence (overrides simulation.frame_rate)
    #[arg(long)]
    frame_rate: Option<f32>,

    /// Start with lock-to-box mode on
    #[arg(long)]
    lock: bool,

    /// Drive the hand from a gamepad (needs the `gilrs` feature)
    #[arg(long)]
    gamepad: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pushbox={log_level},pushbox_physics={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PushboxConfig::default(),
    };
    if let Some(seconds) = args.seconds {
        config.simulation.duration = seconds;
    }
    if let Some(frame_rate) = args.frame_rate {
        config.simulation.frame_rate = frame_rate;
    }

    tracing::info!("pushbox v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(push = ?config.push, "push configuration");

    let mut sim = Simulation::new(&config)?;
    if args.gamepad {
        sim = sim.with_live_source(devices::create_manipulator_source());
    }
    if args.lock {
        sim.toggle_lock();
    }

    let summary = sim.run(config.simulation.duration, config.simulation.frame_rate);

    tracing::info!(
        frames = summary.frames,
        physics_steps = summary.physics_steps,
        pushes_applied = summary.pushes_applied,
        pushes_held = summary.pushes_held,
        lock = summary.lock.as_str(),
        "done"
    );
    println!(
        "Final position: ({:.3}, {:.3}, {:.3})",
        summary.final_position.x, summary.final_position.y, summary.final_position.z
    );

    Ok(())
}
