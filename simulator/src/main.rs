//! Grow monitor simulator for desktop platforms.
//!
//! Runs the real control loop from `grow-common` against simulated soil,
//! sensors and pumps. The panel is shown in an SDL window (keys A, B, X and Y
//! are the board buttons), or rendered off-screen with `--headless`.
//!
//! Log output is controlled with `RUST_LOG` (default `info`).

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod button;
mod buzzer;
mod display;
mod error;
mod plant;
mod settings;
mod timing;

use std::fmt;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::Parser;
use embedded_graphics_simulator::SimulatorEvent;
use grow_common::config::CHANNEL_COUNT;
use grow_common::{App, Channel, Controller, DisplaySink};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::button::{Debouncer, button_for};
use crate::buzzer::LogBuzzer;
use crate::display::{HeadlessDisplay, WindowDisplay};
use crate::error::SimulatorError;
use crate::plant::{START_FREQUENCIES, SimPump, SimSensor, Soil};
use crate::settings::Settings;
use crate::timing::TICK_INTERVAL;

type SimController = Controller<SimSensor, SimPump, LogBuzzer>;

/// Command line options.
#[derive(Debug, Parser)]
#[command(version, about = "Desktop simulator for the grow monitor")]
struct Args {
    /// Settings document (TOML). Defaults are used when it does not exist.
    #[arg(default_value = "settings.toml")]
    settings: PathBuf,

    /// Window scale factor.
    #[arg(long, default_value_t = 4)]
    scale: u32,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks (headless runs default to 600).
    #[arg(long)]
    ticks: Option<u64>,

    /// Simulate a disconnected sensor on a channel (repeatable).
    #[arg(long, value_name = "CHANNEL")]
    unplug: Vec<u8>,

    /// Save the last frame of a headless run as PNG.
    #[arg(long, value_name = "PATH", requires = "headless")]
    screenshot: Option<PathBuf>,
}

fn main() -> Result<(), SimulatorError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = Settings::load(&args.settings)?;
    let mut controller = build_controller(&settings, &args.unplug)?;
    log_summary(&controller);

    if args.headless {
        let mut display = HeadlessDisplay::new();
        run_headless(&mut controller, &mut display, args.ticks.unwrap_or(600))?;
        if let Some(path) = &args.screenshot {
            display.save_png(path, args.scale)?;
            info!(path = %path.display(), "Saved screenshot");
        }
    } else {
        run_window(&mut controller, &mut WindowDisplay::new(args.scale), args.ticks)?;
    }

    Ok(())
}

/// Wire the simulated plants into channels and apply the settings.
fn build_controller(
    settings: &Settings,
    unplug: &[u8],
) -> Result<SimController, SimulatorError> {
    if let Some(&id) = unplug.iter().find(|&&id| id == 0 || usize::from(id) > CHANNEL_COUNT) {
        return Err(SimulatorError::UnknownChannel(id));
    }

    let mut channels = heapless::Vec::new();
    for (idx, frequency) in START_FREQUENCIES.into_iter().enumerate().take(CHANNEL_COUNT) {
        let id = idx as u8 + 1;
        let soil = Soil::shared(frequency);
        let mut sensor = SimSensor::new(soil.clone());
        if unplug.contains(&id) {
            sensor.unplug();
        }
        channels.push(Channel::new(id, sensor, SimPump::new(id, soil))).ok();
    }

    let mut app = App::new(channels);
    for id in 1..=CHANNEL_COUNT as u8 {
        app.apply_config(id, settings.channel(id));
    }

    Ok(Controller::new(app, settings.general, LogBuzzer::default()))
}

fn log_summary(controller: &SimController) {
    info!("Channels:");
    for channel in controller.app().channels() {
        info!("\n{channel}");
    }
    let general = controller.general();
    info!(
        "Settings:\nAlarm Enabled: {}\nAlarm Interval: {:.2}s",
        general.alarm_enable, general.alarm_interval
    );
}

fn run_window(
    controller: &mut SimController,
    display: &mut WindowDisplay,
    ticks: Option<u64>,
) -> Result<(), SimulatorError> {
    let started = Instant::now();
    let mut debouncer = Debouncer::new();
    let mut tick = 0u64;

    loop {
        let tick_start = Instant::now();

        for event in display.events() {
            match event {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if let Some(button) = button_for(keycode)
                        && debouncer.accept(button, Instant::now())
                    {
                        controller.press(button);
                    }
                }
                _ => {}
            }
        }

        tick_once(controller, display, started)?;

        tick += 1;
        if ticks.is_some_and(|limit| tick >= limit) {
            return Ok(());
        }
        pace(tick_start);
    }
}

fn run_headless(
    controller: &mut SimController,
    display: &mut HeadlessDisplay,
    ticks: u64,
) -> Result<(), SimulatorError> {
    let started = Instant::now();
    for _ in 0..ticks {
        let tick_start = Instant::now();
        tick_once(controller, display, started)?;
        pace(tick_start);
    }
    let frames = display.frames();
    info!(
        frames,
        beeps = controller.buzzer().beeps(),
        "Headless run finished"
    );
    Ok(())
}

fn tick_once<D>(
    controller: &mut SimController,
    display: &mut D,
    started: Instant,
) -> Result<(), SimulatorError>
where
    D: DisplaySink,
    D::Error: fmt::Debug,
{
    controller
        .tick(started.elapsed(), display)
        .map_err(|e| SimulatorError::Display(format!("{e:?}")))
}

/// Sleep out the rest of the tick.
fn pace(tick_start: Instant) {
    if let Some(remaining) = TICK_INTERVAL.checked_sub(tick_start.elapsed()) {
        thread::sleep(remaining);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
