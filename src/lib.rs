//! CPU wave simulation for animated water surfaces.
//!
//! An explicit finite-difference solver advancing a height field over a
//! fixed rectangular grid, double-buffered between the previous and current
//! solution. Random "raindrop" impulses keep the surface alive, and
//! consumers read back positions, normals and tangents to upload into a
//! GPU-visible vertex buffer.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                WaveParams (config)                 │
//! │  grid size, speed, damping, time step, cell size   │
//! │  + derived recurrence coefficients k1, k2, k3      │
//! └─────────────────────────┬──────────────────────────┘
//!                           │
//!                           ▼
//!         ┌──────────────────────────────────┐
//!         │     WaveSimulation (solver)      │
//!         │  HeightField double buffer       │◄── Disturber (splashes)
//!         │  fixed-step accumulator          │
//!         │  normals / tangents              │
//!         └────────────────┬─────────────────┘
//!                          │
//!          ┌───────────────┴───────────────┐
//!          ▼                               ▼
//!   ┌──────────────┐               ┌───────────────┐
//!   │   surface    │               │    plugin     │
//!   │ vertex fill  │               │ WaveSurface   │
//!   │ point sample │               │ FixedUpdate   │
//!   └──────────────┘               └───────────────┘
//! ```
//!
//! The solver is single-threaded and synchronous: one owner mutates the grid
//! from its tick, and readers see the completed current buffer in the same
//! thread. Physics advances in fixed `time_step` increments no matter how
//! often the caller ticks, decoupling simulation stability from frame rate.

pub mod config;
pub mod disturb;
pub mod grid;
pub mod plugin;
pub mod solver;
pub mod surface;

pub use config::{
    load_params, save_params, ParamError, WaveCoefficients, WaveParams, WavePreset, MIN_GRID_DIM,
};
pub use disturb::{Disturber, SplashTimer, DEFAULT_SPLASH_INTERVAL, SPLASH_MARGIN};
pub use grid::HeightField;
pub use plugin::{WavePlugin, WaveSurface};
pub use solver::WaveSimulation;
pub use surface::{WaterSample, WaterVertex};
