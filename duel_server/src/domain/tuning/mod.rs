// Gameplay tuning, kept apart from runtime/server configuration.

pub mod arena;
pub mod character;
pub mod projectile;
pub mod turn;

pub use arena::ArenaTuning;
pub use character::CharacterTuning;
pub use projectile::ProjectileTuning;
pub use turn::TurnTuning;

use crate::domain::errors::SetupError;

/// Smallest playfield edge the duel can be laid out on.
pub const MIN_FIELD_EDGE: f32 = 320.0;

/// Every gameplay knob for a single duel session.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuelTuning {
    pub arena: ArenaTuning,
    pub character: CharacterTuning,
    pub projectile: ProjectileTuning,
    pub turn: TurnTuning,
}

impl DuelTuning {
    /// Rejects tunings a duel cannot be built from.
    pub fn validate(&self) -> Result<(), SetupError> {
        let arena = &self.arena;
        if !(arena.width >= MIN_FIELD_EDGE && arena.height >= MIN_FIELD_EDGE) {
            return Err(SetupError::PlayfieldTooSmall {
                width: arena.width,
                height: arena.height,
                min: MIN_FIELD_EDGE,
            });
        }
        if arena.terrain_samples < 2 {
            return Err(SetupError::TooFewTerrainSamples(arena.terrain_samples));
        }
        if !(arena.gravity > 0.0) {
            return Err(SetupError::NonPositiveGravity(arena.gravity));
        }
        if self.projectile.sub_steps == 0 {
            return Err(SetupError::NoSubSteps);
        }
        if !(self.turn.max_dt > 0.0) {
            return Err(SetupError::NonPositiveFrameCeiling(self.turn.max_dt));
        }
        Ok(())
    }
}
