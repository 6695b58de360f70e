//! Headless demo driver for the wave surface.
//!
//! Runs the simulation under a schedule-runner app for a fixed duration,
//! raising splashes on the reference cadence and logging energy statistics.

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use bevy_app::ScheduleRunnerPlugin;
use bevy_log::{info, LogPlugin};
use clap::Parser;

use wavefield::{load_params, WavePlugin, WavePreset, WaveSurface};

/// Ticks per second of the demo loop.
const TICKS_PER_SECOND: f64 = 60.0;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of grid rows.
    #[arg(long, default_value_t = 201)]
    rows: usize,

    /// Number of grid columns.
    #[arg(long, default_value_t = 201)]
    cols: usize,

    /// Named parameter preset: reference, pond, choppy or syrup.
    #[arg(short, long, default_value = "reference")]
    preset: String,

    /// RON file with wave parameters; overrides the preset and grid size.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the splash RNG; omit for entropy seeding.
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many seconds to run before exiting.
    #[arg(short, long, default_value_t = 10.0)]
    duration: f32,

    /// Seconds between energy reports.
    #[arg(long, default_value_t = 1.0)]
    report_interval: f32,
}

fn parse_preset(name: &str) -> Option<WavePreset> {
    match name.to_ascii_lowercase().as_str() {
        "reference" => Some(WavePreset::Reference),
        "pond" => Some(WavePreset::Pond),
        "choppy" => Some(WavePreset::Choppy),
        "syrup" => Some(WavePreset::Syrup),
        _ => None,
    }
}

/// Tracks the demo deadline and report cadence.
#[derive(Resource)]
struct DemoClock {
    duration: f32,
    report_interval: f32,
    next_report: f32,
}

fn main() {
    let args = Args::parse();

    if args.duration <= 0.0 || args.report_interval <= 0.0 {
        eprintln!("Error: duration and report-interval must be positive.");
        std::process::exit(1);
    }

    let params = match &args.config {
        Some(path) => match load_params(path) {
            Ok(params) => params,
            Err(err) => {
                eprintln!("Failed to load wave config {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => match parse_preset(&args.preset) {
            Some(preset) => preset.to_params(args.rows, args.cols),
            None => {
                eprintln!(
                    "Unknown preset '{}'. Known presets: reference, pond, choppy, syrup.",
                    args.preset
                );
                std::process::exit(1);
            }
        },
    };

    if let Err(err) = params.validate() {
        eprintln!("Invalid wave parameters: {err}");
        std::process::exit(1);
    }

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / TICKS_PER_SECOND,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(WavePlugin {
            params,
            seed: args.seed,
            auto_splash: true,
        })
        .insert_resource(DemoClock {
            duration: args.duration,
            report_interval: args.report_interval,
            next_report: 0.0,
        })
        .add_systems(Startup, report_setup)
        .add_systems(Update, report_progress)
        .run();
}

fn report_setup(surface: Res<WaveSurface>) {
    let params = surface.sim.params();
    info!(
        "Simulating a {}x{} surface (dx={}, dt={}, speed={}, damping={})",
        params.rows,
        params.cols,
        params.spatial_step,
        params.time_step,
        params.speed,
        params.damping
    );
}

fn report_progress(
    time: Res<Time>,
    surface: Res<WaveSurface>,
    mut clock: ResMut<DemoClock>,
    mut exit: EventWriter<AppExit>,
) {
    let elapsed = time.elapsed_secs();

    if elapsed >= clock.next_report {
        clock.next_report += clock.report_interval;
        info!(
            "t={elapsed:.2}s steps={} energy={:.4}",
            surface.sim.steps_taken(),
            surface.sim.energy()
        );
    }

    if elapsed >= clock.duration {
        info!(
            "Done after {elapsed:.2}s: {} physics steps",
            surface.sim.steps_taken()
        );
        exit.write(AppExit::Success);
    }
}
