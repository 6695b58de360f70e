//! Wave simulation parameters and derived recurrence coefficients.
//!
//! All physics inputs are fixed at construction time: the solver never
//! re-reads them mid-run, and the three recurrence coefficients are computed
//! once from the four physical values. Parameters are serializable so a
//! surface setup can be stored in a RON file and reloaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Smallest grid dimension the solver accepts.
///
/// The disturber stamps a plus shape and keeps clear of the frozen boundary,
/// which requires a margin of at least 2 cells on every side.
pub const MIN_GRID_DIM: usize = 5;

/// A parameter set that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// Grid smaller than [`MIN_GRID_DIM`] in either dimension.
    GridTooSmall { rows: usize, cols: usize },
    /// Zero or negative simulation time step.
    NonPositiveTimeStep,
    /// Zero or negative distance between adjacent grid cells.
    NonPositiveSpatialStep,
    /// Zero or negative propagation speed.
    NonPositiveSpeed,
    /// Damping must be zero or positive to stay dissipative.
    NegativeDamping,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::GridTooSmall { rows, cols } => write!(
                f,
                "grid is {rows}x{cols}, but both dimensions must be at least {MIN_GRID_DIM}"
            ),
            ParamError::NonPositiveTimeStep => write!(f, "time_step must be positive"),
            ParamError::NonPositiveSpatialStep => write!(f, "spatial_step must be positive"),
            ParamError::NonPositiveSpeed => write!(f, "speed must be positive"),
            ParamError::NegativeDamping => write!(f, "damping must not be negative"),
        }
    }
}

impl std::error::Error for ParamError {}

/// Physical parameters of a wave surface.
///
/// The grid is `rows x cols` cells spaced `spatial_step` apart on the ground
/// plane. `speed` and `damping` control propagation and dissipation, and the
/// solver advances in fixed `time_step` increments regardless of how often
/// the caller ticks it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    /// Number of grid rows (the z direction).
    pub rows: usize,
    /// Number of grid columns (the x direction).
    pub cols: usize,
    /// Wave propagation speed in world units per second.
    pub speed: f32,
    /// Damping coefficient; higher values kill ripples faster.
    pub damping: f32,
    /// Fixed physics time step in seconds.
    pub time_step: f32,
    /// Distance between adjacent grid cells in world units.
    pub spatial_step: f32,
}

impl Default for WaveParams {
    /// The reference surface: a 201x201 grid, 0.75 units between cells,
    /// stepping at 0.03 s.
    fn default() -> Self {
        Self {
            rows: 201,
            cols: 201,
            speed: 3.25,
            damping: 0.4,
            time_step: 0.03,
            spatial_step: 0.75,
        }
    }
}

impl WaveParams {
    /// Create reference parameters on a custom grid size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Check that the parameter set describes a well-formed simulation.
    ///
    /// Invalid parameters are a programming error; the grid constructor
    /// panics on them rather than threading a `Result` through every step.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.rows < MIN_GRID_DIM || self.cols < MIN_GRID_DIM {
            return Err(ParamError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.time_step <= 0.0 {
            return Err(ParamError::NonPositiveTimeStep);
        }
        if self.spatial_step <= 0.0 {
            return Err(ParamError::NonPositiveSpatialStep);
        }
        if self.speed <= 0.0 {
            return Err(ParamError::NonPositiveSpeed);
        }
        if self.damping < 0.0 {
            return Err(ParamError::NegativeDamping);
        }
        Ok(())
    }

    /// Compute the three recurrence coefficients used by every physics step.
    pub fn coefficients(&self) -> WaveCoefficients {
        let dt = self.time_step;
        let dx = self.spatial_step;

        let d = self.damping * dt + 2.0;
        let e = (self.speed * dt / dx) * (self.speed * dt / dx);

        WaveCoefficients {
            k1: (self.damping * dt - 2.0) / d,
            k2: (4.0 - 8.0 * e) / d,
            k3: (2.0 * e) / d,
        }
    }

    /// Total number of grid cells.
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

    /// Parse parameters from a RON string. Does not validate.
    pub fn from_ron(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let params: WaveParams = ron::de::from_str(contents)?;
        Ok(params)
    }

    /// Serialize parameters to a pretty RON string.
    pub fn to_ron(&self) -> Result<String, Box<dyn std::error::Error>> {
        let pretty_config = ron::ser::PrettyConfig::new().with_depth_limit(2);
        let serialized = ron::ser::to_string_pretty(self, pretty_config)?;
        Ok(serialized)
    }
}

/// Precomputed recurrence coefficients of the finite-difference update.
///
/// For every interior cell the stepper evaluates
/// `h_new = k1 * h_prev + k2 * h + k3 * (sum of the 4 neighbor heights)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveCoefficients {
    /// Weight of the cell's height two steps back.
    pub k1: f32,
    /// Weight of the cell's current height.
    pub k2: f32,
    /// Weight of each of the four direct neighbors.
    pub k3: f32,
}

/// Preset parameter bundles for common surface looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WavePreset {
    /// The reference demo surface.
    #[default]
    Reference,
    /// Slow, heavily damped ripples.
    Pond,
    /// Fast waves that keep sloshing for a while.
    Choppy,
    /// Almost immediate dissipation, as if through a thick fluid.
    Syrup,
}

impl WavePreset {
    /// Build parameters for this preset on the given grid size.
    pub fn to_params(self, rows: usize, cols: usize) -> WaveParams {
        let mut params = WaveParams::new(rows, cols);

        match self {
            WavePreset::Reference => {}
            WavePreset::Pond => {
                params.speed = 2.0;
                params.damping = 0.8;
                params.spatial_step = 0.5;
            }
            WavePreset::Choppy => {
                params.speed = 4.5;
                params.damping = 0.2;
                params.time_step = 0.025;
                params.spatial_step = 0.6;
            }
            WavePreset::Syrup => {
                params.speed = 1.5;
                params.damping = 2.5;
            }
        }

        params
    }
}

/// Load and validate wave parameters from a RON file.
pub fn load_params(path: &Path) -> Result<WaveParams, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let params = WaveParams::from_ron(&contents)?;
    params.validate()?;
    Ok(params)
}

/// Save wave parameters to a RON file.
pub fn save_params(params: &WaveParams, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let serialized = params.to_ron()?;
    fs::write(path, serialized)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert_eq!(WaveParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_reference_coefficients() {
        let coeffs = WaveParams::default().coefficients();

        // Hand-computed from speed=3.25, damping=0.4, dt=0.03, dx=0.75.
        let d = 0.4f32 * 0.03 + 2.0;
        let e = (3.25f32 * 0.03 / 0.75) * (3.25f32 * 0.03 / 0.75);
        assert!((coeffs.k1 - (0.4 * 0.03 - 2.0) / d).abs() < 1e-6);
        assert!((coeffs.k2 - (4.0 - 8.0 * e) / d).abs() < 1e-6);
        assert!((coeffs.k3 - 2.0 * e / d).abs() < 1e-6);
    }

    #[test]
    fn test_validation_rejects_small_grids() {
        assert_eq!(
            WaveParams::new(4, 32).validate(),
            Err(ParamError::GridTooSmall { rows: 4, cols: 32 })
        );
        assert_eq!(
            WaveParams::new(32, 3).validate(),
            Err(ParamError::GridTooSmall { rows: 32, cols: 3 })
        );
    }

    #[test]
    fn test_validation_rejects_bad_physics() {
        let base = WaveParams::default();

        let params = WaveParams { time_step: 0.0, ..base };
        assert_eq!(params.validate(), Err(ParamError::NonPositiveTimeStep));

        let params = WaveParams { spatial_step: -1.0, ..base };
        assert_eq!(params.validate(), Err(ParamError::NonPositiveSpatialStep));

        let params = WaveParams { speed: 0.0, ..base };
        assert_eq!(params.validate(), Err(ParamError::NonPositiveSpeed));

        let params = WaveParams { damping: -0.1, ..base };
        assert_eq!(params.validate(), Err(ParamError::NegativeDamping));
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [
            WavePreset::Reference,
            WavePreset::Pond,
            WavePreset::Choppy,
            WavePreset::Syrup,
        ] {
            assert_eq!(preset.to_params(64, 64).validate(), Ok(()));
        }
    }

    #[test]
    fn test_preset_grid_size_passthrough() {
        let params = WavePreset::Pond.to_params(33, 65);
        assert_eq!(params.rows, 33);
        assert_eq!(params.cols, 65);
    }

    #[test]
    fn test_ron_round_trip() {
        let params = WavePreset::Choppy.to_params(81, 101);
        let serialized = params.to_ron().expect("serialization should succeed");
        let restored = WaveParams::from_ron(&serialized).expect("parse should succeed");
        assert_eq!(restored, params);
    }

    #[test]
    fn test_half_extents() {
        let params = WaveParams::default();
        // (201 - 1) * 0.75 / 2
        assert!((params.half_width() - 75.0).abs() < f32::EPSILON);
        assert!((params.half_depth() - 75.0).abs() < f32::EPSILON);
    }
}
