// Use-case level inputs/outputs for the duel loop.

use crate::domain::DuelSnapshot;

pub use crate::domain::Command;

/// One published frame of a running duel.
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    pub tick: u64,
    pub snapshot: DuelSnapshot,
}
