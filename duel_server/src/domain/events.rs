// Notable things that happened during a duel step, drained by the session loop.

use crate::domain::state::{CharacterId, DamageEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum DuelEvent {
    Restarted,
    ShotFired {
        shooter: CharacterId,
        weapon: &'static str,
        angle: f32,
        power: f32,
        /// Launch speed in px/s.
        speed: f32,
    },
    Detonated {
        x: f32,
        y: f32,
        age: f32,
        bounces: u32,
        hits: Vec<DamageEvent>,
    },
    Missed {
        age: f32,
        bounces: u32,
    },
    CharacterFellOut {
        character: CharacterId,
    },
    TurnStarted {
        active: CharacterId,
        wind: f32,
        /// The settle ceiling ran out before everyone landed.
        forced: bool,
    },
    GameOver {
        winner: Option<CharacterId>,
    },
}
