//! Read access for rendering and physics consumers.
//!
//! Renderers copy the per-cell vertex data into a GPU-visible buffer each
//! frame; gameplay code samples the surface at arbitrary world positions for
//! floating objects. Queries outside the grid clamp to the boundary.

use crate::solver::WaveSimulation;
use bevy::math::Vec3;

/// One grid cell's worth of vertex data, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterVertex {
    /// Ground coordinates plus simulated height.
    pub position: Vec3,
    /// Surface normal.
    pub normal: Vec3,
    /// Tangent along +x.
    pub tangent: Vec3,
}

/// Result of a surface query at a single world-space point.
#[derive(Debug, Clone, Copy)]
pub struct WaterSample {
    /// World-space position on the surface.
    pub position: Vec3,
    /// Interpolated surface normal.
    pub normal: Vec3,
    /// Surface height (y coordinate).
    pub height: f32,
}

impl WaveSimulation {
    /// Fill `out` with one vertex per grid cell, row-major, matching the
    /// topology from [`HeightField::triangle_indices`].
    ///
    /// [`HeightField::triangle_indices`]: crate::grid::HeightField::triangle_indices
    pub fn fill_vertices(&self, out: &mut Vec<WaterVertex>) {
        let heights = self.heights();
        let normals = self.normals();
        let tangents = self.tangents();

        out.clear();
        out.reserve(heights.len());
        for idx in 0..heights.len() {
            out.push(WaterVertex {
                position: heights[idx],
                normal: normals[idx],
                tangent: tangents[idx],
            });
        }
    }

    /// Fractional grid coordinates of a world-space point, clamped to the
    /// grid, plus the base cell and interpolation weights.
    fn bilinear_cell(&self, x: f32, z: f32) -> (usize, usize, f32, f32) {
        let grid = self.grid();
        let dx = grid.spatial_step();
        let rows = grid.rows();
        let cols = grid.cols();

        let fj = ((x + grid.half_width()) / dx).clamp(0.0, (cols - 1) as f32);
        let fi = ((grid.half_depth() - z) / dx).clamp(0.0, (rows - 1) as f32);

        let i0 = (fi as usize).min(rows - 2);
        let j0 = (fj as usize).min(cols - 2);

        (i0, j0, fi - i0 as f32, fj - j0 as f32)
    }

    /// Surface height at a world-space point, bilinearly interpolated.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        let (i0, j0, ti, tj) = self.bilinear_cell(x, z);
        let grid = self.grid();

        let h00 = grid.height(i0, j0);
        let h01 = grid.height(i0, j0 + 1);
        let h10 = grid.height(i0 + 1, j0);
        let h11 = grid.height(i0 + 1, j0 + 1);

        let top = h00 + (h01 - h00) * tj;
        let bottom = h10 + (h11 - h10) * tj;
        top + (bottom - top) * ti
    }

    /// Full surface query at a world-space point.
    pub fn sample(&self, x: f32, z: f32) -> WaterSample {
        let (i0, j0, ti, tj) = self.bilinear_cell(x, z);
        let grid = self.grid();
        let normals = self.normals();

        let n00 = normals[grid.index(i0, j0)];
        let n01 = normals[grid.index(i0, j0 + 1)];
        let n10 = normals[grid.index(i0 + 1, j0)];
        let n11 = normals[grid.index(i0 + 1, j0 + 1)];

        let top = n00.lerp(n01, tj);
        let bottom = n10.lerp(n11, tj);
        let normal = top.lerp(bottom, ti).normalize_or(Vec3::Y);

        let height = self.sample_height(x, z);

        WaterSample {
            position: Vec3::new(x, height, z),
            normal,
            height,
        }
    }

    /// Whether a world-space point sits below the surface.
    #[inline]
    pub fn is_underwater(&self, point: Vec3) -> bool {
        point.y < self.sample_height(point.x, point.z)
    }

    /// How far below the surface a point is. Positive when underwater,
    /// negative above.
    #[inline]
    pub fn depth_at(&self, point: Vec3) -> f32 {
        self.sample_height(point.x, point.z) - point.y
    }
}
