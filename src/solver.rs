//! Fixed-step finite-difference stepper for the wave surface.
//!
//! The solver advances the height field with the standard explicit
//! discretization of the damped 2D wave equation. Callers feed it raw frame
//! deltas; the internal accumulator only releases a physics step once a full
//! `time_step` has elapsed, so the simulation cadence is independent of the
//! caller's frame rate.

use crate::config::{WaveCoefficients, WaveParams};
use crate::grid::HeightField;
use bevy::math::Vec3;
use log::trace;

/// A running wave simulation: grid state, coefficients, and per-cell surface
/// normals/tangents for lit rendering.
#[derive(Debug, Clone)]
pub struct WaveSimulation {
    params: WaveParams,
    coeffs: WaveCoefficients,
    grid: HeightField,
    normals: Vec<Vec3>,
    tangents: Vec<Vec3>,
    accumulated: f32,
    steps: u64,
}

impl WaveSimulation {
    /// Build a simulation at rest.
    ///
    /// # Panics
    ///
    /// Panics if `params` fails [`WaveParams::validate`].
    pub fn new(params: WaveParams) -> Self {
        let grid = HeightField::new(&params);
        let cell_count = grid.cell_count();

        Self {
            params,
            coeffs: params.coefficients(),
            grid,
            normals: vec![Vec3::Y; cell_count],
            tangents: vec![Vec3::X; cell_count],
            accumulated: 0.0,
            steps: 0,
        }
    }

    /// The parameters this simulation was built with.
    #[inline]
    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// The precomputed recurrence coefficients.
    #[inline]
    pub fn coefficients(&self) -> WaveCoefficients {
        self.coeffs
    }

    /// The underlying height field.
    #[inline]
    pub fn grid(&self) -> &HeightField {
        &self.grid
    }

    /// Number of grid rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of grid columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Distance between adjacent grid cells.
    #[inline]
    pub fn spatial_step(&self) -> f32 {
        self.grid.spatial_step()
    }

    /// Current solution: one `Vec3` per cell, `y` is the height.
    #[inline]
    pub fn heights(&self) -> &[Vec3] {
        self.grid.current()
    }

    /// Per-cell surface normals, refreshed after every physics step.
    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Per-cell tangents along +x, refreshed after every physics step.
    #[inline]
    pub fn tangents(&self) -> &[Vec3] {
        &self.tangents
    }

    /// Number of physics steps taken so far.
    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Feed elapsed frame time into the accumulator and run at most one
    /// physics step. Returns `true` when a step was performed.
    ///
    /// Below the fixed `time_step` threshold this mutates nothing. On a step
    /// the accumulator resets to zero, discarding any surplus; the reference
    /// cadence loses remainder time instead of carrying it forward.
    pub fn advance(&mut self, delta_seconds: f32) -> bool {
        self.accumulated += delta_seconds;
        if self.accumulated < self.params.time_step {
            return false;
        }

        self.step();
        self.accumulated = 0.0;
        true
    }

    /// Add a plus-shaped impulse at cell `(i, j)`: the full `magnitude` at
    /// the center and half of it at the four direct neighbors. Only the
    /// current buffer is touched.
    ///
    /// # Panics
    ///
    /// Panics if the stamp would reach the frozen boundary, i.e. unless
    /// `1 <= i < rows - 1` and `1 <= j < cols - 1`.
    pub fn disturb_at(&mut self, i: usize, j: usize, magnitude: f32) {
        let rows = self.rows();
        let cols = self.cols();
        assert!(
            (1..rows - 1).contains(&i) && (1..cols - 1).contains(&j),
            "splash target ({i}, {j}) is outside the interior of a {rows}x{cols} grid"
        );

        let half = 0.5 * magnitude;
        let idx = i * cols + j;
        let current = self.grid.current_mut();

        current[idx].y += magnitude;
        current[idx + 1].y += half;
        current[idx - 1].y += half;
        current[idx + cols].y += half;
        current[idx - cols].y += half;
    }

    /// Sum of squared heights over the whole grid. With damping enabled and
    /// no further disturbance this settles toward zero.
    pub fn energy(&self) -> f64 {
        self.grid
            .current()
            .iter()
            .map(|cell| f64::from(cell.y) * f64::from(cell.y))
            .sum()
    }

    /// Run one physics step: update interior cells in place, swap buffers,
    /// refresh normals.
    fn step(&mut self) {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let WaveCoefficients { k1, k2, k3 } = self.coeffs;

        let (previous, current) = self.grid.update_buffers();

        // Interior cells only; the boundary stays frozen. Writing into
        // `previous` in place is safe because each cell's old value is never
        // read again after its own update.
        for i in 1..rows - 1 {
            for j in 1..cols - 1 {
                let idx = i * cols + j;
                previous[idx].y = k1 * previous[idx].y
                    + k2 * current[idx].y
                    + k3 * (current[idx + cols].y
                        + current[idx - cols].y
                        + current[idx + 1].y
                        + current[idx - 1].y);
            }
        }

        // The buffer just written holds the newest solution.
        self.grid.swap_buffers();
        self.steps += 1;
        trace!("wave step {} complete", self.steps);

        self.refresh_surface_frames();
    }

    /// Recompute interior normals and tangents from the new current heights
    /// with central differences. Boundary cells keep their last values.
    fn refresh_surface_frames(&mut self) {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let two_dx = 2.0 * self.grid.spatial_step();
        let current = self.grid.current();

        for i in 1..rows - 1 {
            for j in 1..cols - 1 {
                let idx = i * cols + j;
                let left = current[idx - 1].y;
                let right = current[idx + 1].y;
                let top = current[idx - cols].y;
                let bottom = current[idx + cols].y;

                self.normals[idx] =
                    Vec3::new(left - right, two_dx, bottom - top).normalize_or(Vec3::Y);
                self.tangents[idx] =
                    Vec3::new(two_dx, right - left, 0.0).normalize_or(Vec3::X);
            }
        }
    }
}
