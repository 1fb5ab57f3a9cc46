/// Gameplay tuning for the playfield and its environment.
///
/// The playfield uses screen coordinates: +X to the right, +Y down.

#[derive(Debug, Clone, Copy)]
pub struct ArenaTuning {
    /// Playfield width in pixels.
    pub width: f32,

    /// Playfield height in pixels.
    pub height: f32,

    /// Number of terrain height samples spread across the width.
    pub terrain_samples: usize,

    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,

    /// Largest wind magnitude (horizontal acceleration, px/s^2) drawn per turn.
    pub max_wind: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
            terrain_samples: 620,
            gravity: 420.0,
            max_wind: 55.0,
        }
    }
}
