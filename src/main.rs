// src/main.rs

// Declare modules
pub mod config;
pub mod display;
pub mod input;
pub mod keys;
pub mod math;
pub mod orchestrator;
pub mod ppm;
pub mod renderer;
pub mod transform;

use crate::{
    config::CONFIG,
    display::{DisplayDriver, DriverConfig, X11DisplayDriver},
    input::InputMapper,
    orchestrator::{AppOrchestrator, OrchestratorStatus},
    renderer::Renderer,
    transform::TransformState,
};

use anyhow::{bail, Context};
use log::info;

/// Main entry point for the `ppmview` application.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "ppmview".to_string());
    let input_path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => bail!("usage: {} <image.ppm>", program),
    };

    info!("starting ppmview");

    let image = ppm::decode_file(&input_path)
        .with_context(|| format!("failed to load '{}'", input_path))?;
    info!(
        "loaded {}x{} image from '{}'",
        image.width(),
        image.height(),
        input_path
    );

    // --- Display driver ---
    let driver_config = DriverConfig {
        width_px: CONFIG.appearance.window_width_px,
        height_px: CONFIG.appearance.window_height_px,
        title: CONFIG.appearance.title.clone(),
    };
    let mut driver =
        X11DisplayDriver::new(&driver_config).context("failed to initialize display")?;

    // --- Core components ---
    let mut transform = TransformState::new();
    let mapper = InputMapper::from_config(&CONFIG.keybindings);
    let renderer = Renderer::new(image, CONFIG.appearance.background);

    let mut orchestrator = AppOrchestrator::new(&mut driver, &mut transform, mapper, renderer)
        .context("failed to initialize orchestrator")?;

    // --- Main event loop ---
    info!("entering main event loop");
    loop {
        match orchestrator.process_event_cycle()? {
            OrchestratorStatus::Running => {
                std::thread::sleep(std::time::Duration::from_millis(
                    CONFIG.performance.min_draw_latency_ms as u64,
                ));
            }
            OrchestratorStatus::Shutdown => {
                info!("shutdown requested; exiting main loop");
                break;
            }
        }
    }

    info!("ppmview exited successfully");
    Ok(())
}
