// Domain layer: core duel types and rules.

pub mod command;
pub mod duel;
pub mod errors;
pub mod events;
pub mod state;
pub mod systems;
pub mod terrain;
pub mod tuning;
pub mod weapons;

pub use command::Command;
pub use duel::{Duel, MAX_ANGLE, MAX_POWER, MIN_ANGLE, MIN_POWER};
pub use errors::SetupError;
pub use events::DuelEvent;
pub use state::{CharacterId, DuelSnapshot, DuelState, Phase, PhaseKind};
pub use terrain::Terrain;
pub use tuning::DuelTuning;
pub use weapons::{Weapon, WeaponSlot};
