//! Random splash injection.
//!
//! The disturber owns its own RNG instance so splash sequences are
//! reproducible with a fixed seed; nothing here reaches for global random
//! state. Cadence is the caller's decision: [`SplashTimer`] provides the
//! reference quarter-second gate, but the disturber itself has no clock.

use crate::solver::WaveSimulation;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The reference demo raises a splash every quarter of simulated second.
pub const DEFAULT_SPLASH_INTERVAL: f32 = 0.25;

/// How far splash targets stay from the grid edge, in cells.
///
/// Comfortably clear of the frozen boundary rather than the minimal margin
/// the stamp itself needs.
pub const SPLASH_MARGIN: usize = 5;

/// Injects random raindrop impulses into a wave simulation.
#[derive(Debug, Clone)]
pub struct Disturber {
    rng: StdRng,
}

impl Disturber {
    /// A disturber seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A disturber with a fixed seed, for reproducible splash sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Drop one random splash on the surface.
    ///
    /// The target cell is uniform in `[SPLASH_MARGIN, rows - SPLASH_MARGIN)`
    /// by `[SPLASH_MARGIN, cols - SPLASH_MARGIN)` and the magnitude uniform
    /// in `[1.0, 2.0)`. Returns the chosen cell and magnitude.
    ///
    /// # Panics
    ///
    /// Panics if the grid is too small to keep the margin on both sides
    /// (fewer than `2 * SPLASH_MARGIN + 1` cells in either dimension).
    pub fn splash(&mut self, sim: &mut WaveSimulation) -> (usize, usize, f32) {
        let rows = sim.rows();
        let cols = sim.cols();
        assert!(
            rows > 2 * SPLASH_MARGIN && cols > 2 * SPLASH_MARGIN,
            "grid {rows}x{cols} is too small for a {SPLASH_MARGIN}-cell splash margin"
        );

        let i = self.rng.gen_range(SPLASH_MARGIN..rows - SPLASH_MARGIN);
        let j = self.rng.gen_range(SPLASH_MARGIN..cols - SPLASH_MARGIN);
        let magnitude = self.rng.gen_range(1.0..2.0);

        sim.disturb_at(i, j, magnitude);
        debug!("splash at ({i}, {j}) with magnitude {magnitude:.3}");

        (i, j, magnitude)
    }
}

impl Default for Disturber {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-interval gate for splash cadence.
///
/// Fires at most once per tick and keeps the surplus, so a long frame drains
/// its backlog one splash per tick instead of bursting.
#[derive(Debug, Clone)]
pub struct SplashTimer {
    interval: f32,
    elapsed: f32,
}

impl SplashTimer {
    /// A timer firing every `interval` seconds.
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// The configured firing interval.
    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Accumulate elapsed time; returns `true` when the interval is due.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        self.elapsed += delta_seconds;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}

impl Default for SplashTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SPLASH_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveParams;

    #[test]
    fn test_splash_changes_exactly_five_cells() {
        let mut sim = WaveSimulation::new(WaveParams::new(31, 31));
        let mut disturber = Disturber::seeded(7);

        let before = sim.heights().to_vec();
        let (i, j, magnitude) = disturber.splash(&mut sim);

        let cols = sim.cols();
        let changed: Vec<usize> = sim
            .heights()
            .iter()
            .zip(&before)
            .enumerate()
            .filter(|(_, (after, before))| after.y != before.y)
            .map(|(idx, _)| idx)
            .collect();

        assert_eq!(changed.len(), 5);
        let center = i * cols + j;
        assert!(changed.contains(&center));
        assert!(changed.contains(&(center + 1)));
        assert!(changed.contains(&(center - 1)));
        assert!(changed.contains(&(center + cols)));
        assert!(changed.contains(&(center - cols)));

        // Full magnitude at the center, exactly half at each neighbor.
        let center_delta = sim.heights()[center].y;
        assert_eq!(center_delta, magnitude);
        for &idx in changed.iter().filter(|&&idx| idx != center) {
            let delta = sim.heights()[idx].y;
            assert!(delta > 0.0);
            assert_eq!(center_delta, delta * 2.0);
        }
    }

    #[test]
    fn test_splash_respects_margin() {
        let mut sim = WaveSimulation::new(WaveParams::new(17, 13));
        let mut disturber = Disturber::seeded(42);

        for _ in 0..500 {
            let (i, j, magnitude) = disturber.splash(&mut sim);
            assert!((SPLASH_MARGIN..17 - SPLASH_MARGIN).contains(&i));
            assert!((SPLASH_MARGIN..13 - SPLASH_MARGIN).contains(&j));
            assert!((1.0..2.0).contains(&magnitude));
        }
    }

    #[test]
    fn test_minimal_grid_pins_splash_to_center() {
        // With an 11-cell dimension the margin leaves a single valid row.
        let mut sim = WaveSimulation::new(WaveParams::new(11, 11));
        let mut disturber = Disturber::seeded(0);

        for _ in 0..10 {
            let (i, j, _) = disturber.splash(&mut sim);
            assert_eq!((i, j), (5, 5));
        }
    }

    #[test]
    fn test_seeded_disturbers_agree() {
        let mut sim_a = WaveSimulation::new(WaveParams::new(41, 41));
        let mut sim_b = WaveSimulation::new(WaveParams::new(41, 41));
        let mut disturber_a = Disturber::seeded(1234);
        let mut disturber_b = Disturber::seeded(1234);

        for _ in 0..20 {
            assert_eq!(disturber_a.splash(&mut sim_a), disturber_b.splash(&mut sim_b));
        }
        assert_eq!(sim_a.heights(), sim_b.heights());
    }

    #[test]
    #[should_panic(expected = "too small")]
    fn test_splash_rejects_tiny_grid() {
        let mut sim = WaveSimulation::new(WaveParams::new(8, 8));
        Disturber::seeded(0).splash(&mut sim);
    }

    #[test]
    fn test_splash_timer_cadence() {
        let mut timer = SplashTimer::default();

        assert!(!timer.tick(0.1));
        assert!(!timer.tick(0.1));
        assert!(timer.tick(0.1));

        // Carry-over: 0.05 s already banked after firing.
        assert!(timer.tick(0.2));
        assert!(!timer.tick(0.1));
    }

    #[test]
    fn test_splash_timer_drains_backlog_one_per_tick() {
        let mut timer = SplashTimer::new(0.25);

        // A one-second stall owes four splashes, released one per tick.
        assert!(timer.tick(1.0));
        assert!(timer.tick(0.0));
        assert!(timer.tick(0.0));
        assert!(timer.tick(0.0));
        assert!(!timer.tick(0.0));
    }
}
