// Domain-level errors. Gameplay itself never fails; only setup can.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("playfield {width}x{height} is smaller than {min}x{min}")]
    PlayfieldTooSmall { width: f32, height: f32, min: f32 },
    #[error("terrain needs at least 2 samples, got {0}")]
    TooFewTerrainSamples(usize),
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("projectile integration needs at least one sub-step")]
    NoSubSteps,
    #[error("frame delta ceiling must be positive, got {0}")]
    NonPositiveFrameCeiling(f32),
}
