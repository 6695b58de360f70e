//! Double-buffered height field over a fixed rectangular grid.
//!
//! Cells are stored as a flat row-major array of `Vec3`, where `x`/`z` are
//! the invariant ground-plane coordinates set at construction and `y` is the
//! simulated height. Two buffers exist at all times; the stepper writes the
//! next state into `previous` and then the buffer roles swap, so no cell is
//! ever copied.

use crate::config::WaveParams;
use bevy::math::Vec3;

/// Two height buffers over a `rows x cols` grid.
#[derive(Debug, Clone)]
pub struct HeightField {
    rows: usize,
    cols: usize,
    spatial_step: f32,
    previous: Vec<Vec3>,
    current: Vec<Vec3>,
}

impl HeightField {
    /// Allocate both buffers and fill in the invariant ground coordinates.
    ///
    /// Cell `(i, j)` sits at `x = -half_width + j * dx`,
    /// `z = half_depth - i * dx`, with zero initial height.
    ///
    /// # Panics
    ///
    /// Panics if `params` fails [`WaveParams::validate`].
    pub fn new(params: &WaveParams) -> Self {
        if let Err(err) = params.validate() {
            panic!("invalid wave parameters: {err}");
        }

        let dx = params.spatial_step;
        let half_width = params.half_width();
        let half_depth = params.half_depth();

        let mut cells = Vec::with_capacity(params.cell_count());
        for i in 0..params.rows {
            let z = half_depth - i as f32 * dx;
            for j in 0..params.cols {
                let x = -half_width + j as f32 * dx;
                cells.push(Vec3::new(x, 0.0, z));
            }
        }

        Self {
            rows: params.rows,
            cols: params.cols,
            spatial_step: dx,
            previous: cells.clone(),
            current: cells,
        }
    }

    /// Number of grid rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance between adjacent cells.
    #[inline]
    pub fn spatial_step(&self) -> f32 {
        self.spatial_step
    }

    /// Total number of cells per buffer.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Half the grid extent along x.
    #[inline]
    pub fn half_width(&self) -> f32 {
        (self.cols - 1) as f32 * self.spatial_step * 0.5
    }

    /// Half the grid extent along z.
    #[inline]
    pub fn half_depth(&self) -> f32 {
        (self.rows - 1) as f32 * self.spatial_step * 0.5
    }

    /// Flat index of cell `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Full position (ground coordinates + height) of cell `(i, j)`.
    #[inline]
    pub fn position(&self, i: usize, j: usize) -> Vec3 {
        self.current[self.index(i, j)]
    }

    /// Current height of cell `(i, j)`.
    #[inline]
    pub fn height(&self, i: usize, j: usize) -> f32 {
        self.current[self.index(i, j)].y
    }

    /// The current solution buffer.
    #[inline]
    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    /// The previous solution buffer.
    #[inline]
    pub fn previous(&self) -> &[Vec3] {
        &self.previous
    }

    /// Mutable access to the current buffer, for the disturber.
    #[inline]
    pub(crate) fn current_mut(&mut self) -> &mut [Vec3] {
        &mut self.current
    }

    /// The stepper's view of one update: writable `previous` plus readable
    /// `current`.
    #[inline]
    pub(crate) fn update_buffers(&mut self) -> (&mut [Vec3], &[Vec3]) {
        (&mut self.previous, &self.current)
    }

    /// Exchange the two buffer handles. The buffer just written becomes the
    /// new current solution; no cell data moves.
    #[inline]
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
    }

    /// Triangle-list indices meshing the grid, two CCW triangles per quad.
    ///
    /// The topology is static: consumers build this once and re-upload only
    /// vertex data as the simulation advances.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let m = self.rows as u32;
        let n = self.cols as u32;
        let mut indices = Vec::with_capacity(((m - 1) * (n - 1) * 6) as usize);

        for i in 0..m - 1 {
            for j in 0..n - 1 {
                indices.push(i * n + j);
                indices.push(i * n + j + 1);
                indices.push((i + 1) * n + j);

                indices.push((i + 1) * n + j);
                indices.push(i * n + j + 1);
                indices.push((i + 1) * n + j + 1);
            }
        }

        indices
    }
}
