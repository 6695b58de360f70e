//! Bevy plugin wiring the wave surface into an app.
//!
//! The simulation advances from `FixedUpdate` so its cadence stays stable
//! regardless of render frame rate; the solver's own accumulator then breaks
//! the fixed delta into physics steps.

use bevy::prelude::*;
use bevy_log::debug;

use crate::config::WaveParams;
use crate::disturb::{Disturber, SplashTimer};
use crate::solver::WaveSimulation;

/// The live wave surface: simulation plus splash machinery.
#[derive(Resource)]
pub struct WaveSurface {
    /// The running simulation.
    pub sim: WaveSimulation,
    /// Random splash source.
    pub disturber: Disturber,
    /// Splash cadence gate.
    pub splash_timer: SplashTimer,
    /// Whether splashes fire automatically as time passes.
    pub auto_splash: bool,
}

impl WaveSurface {
    /// Build a surface from parameters, with an optional RNG seed for
    /// reproducible splash sequences.
    pub fn new(params: WaveParams, seed: Option<u64>) -> Self {
        let disturber = match seed {
            Some(seed) => Disturber::seeded(seed),
            None => Disturber::new(),
        };

        Self {
            sim: WaveSimulation::new(params),
            disturber,
            splash_timer: SplashTimer::default(),
            auto_splash: true,
        }
    }

    /// Feed one tick of elapsed time: raise a splash if one is due, then
    /// advance the simulation.
    pub fn tick(&mut self, delta_seconds: f32) {
        if self.auto_splash && self.splash_timer.tick(delta_seconds) {
            let (i, j, magnitude) = self.disturber.splash(&mut self.sim);
            debug!("auto splash at ({i}, {j}), magnitude {magnitude:.3}");
        }
        self.sim.advance(delta_seconds);
    }
}

/// Plugin that adds a wave surface to the app.
///
/// Inserts a [`WaveSurface`] resource and ticks it every `FixedUpdate`.
pub struct WavePlugin {
    /// Physics parameters for the surface.
    pub params: WaveParams,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Whether the quarter-second splash cadence runs automatically.
    pub auto_splash: bool,
}

impl Default for WavePlugin {
    fn default() -> Self {
        Self {
            params: WaveParams::default(),
            seed: None,
            auto_splash: true,
        }
    }
}

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        let mut surface = WaveSurface::new(self.params, self.seed);
        surface.auto_splash = self.auto_splash;

        app.insert_resource(surface)
            .add_systems(FixedUpdate, tick_wave_surface);
    }
}

/// System that drives the surface from the fixed-update clock.
fn tick_wave_surface(mut surface: ResMut<WaveSurface>, time: Res<Time<Fixed>>) {
    surface.tick(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_inserts_surface_resource() {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            WavePlugin {
                params: WaveParams::new(21, 21),
                seed: Some(9),
                auto_splash: false,
            },
        ));
        app.update();

        let surface = app.world().resource::<WaveSurface>();
        assert_eq!(surface.sim.rows(), 21);
        assert!(!surface.auto_splash);
    }

    #[test]
    fn test_tick_without_auto_splash_keeps_surface_flat() {
        let mut surface = WaveSurface::new(WaveParams::new(21, 21), Some(1));
        surface.auto_splash = false;

        for _ in 0..100 {
            surface.tick(0.016);
        }

        assert!(surface.sim.heights().iter().all(|cell| cell.y == 0.0));
        assert!(surface.sim.steps_taken() > 0);
    }

    #[test]
    fn test_tick_with_auto_splash_disturbs_surface() {
        let mut surface = WaveSurface::new(WaveParams::new(21, 21), Some(1));

        // Cross the quarter-second splash threshold.
        for _ in 0..20 {
            surface.tick(0.016);
        }

        assert!(surface.sim.energy() > 0.0);
    }
}
