// Wire protocol DTOs and conversions for the duel WebSocket.

use crate::domain::state::{CharacterSnapshot, ExplosionFx, ProjectileSnapshot};
use crate::domain::{CharacterId, PhaseKind, SetupError};
use crate::use_cases::{Command, FrameUpdate};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Snapshot of the duel for a given tick.
    Frame(FrameDto),
    // Setup failed; the page shows this instead of a playfield.
    Fallback(FallbackDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    AdjustAngle(DeltaPayload),
    AdjustPower(DeltaPayload),
    SelectWeapon(SlotPayload),
    BeginCharge,
    Fire,
    Restart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeltaPayload {
    pub delta: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotPayload {
    pub slot: u8,
}

impl From<ClientMessage> for Command {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::AdjustAngle(p) => Command::AdjustAngle(p.delta),
            ClientMessage::AdjustPower(p) => Command::AdjustPower(p.delta),
            ClientMessage::SelectWeapon(p) => Command::SelectWeapon(p.slot),
            ClientMessage::BeginCharge => Command::BeginCharge,
            ClientMessage::Fire => Command::Fire,
            ClientMessage::Restart => Command::Restart,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FallbackDto {
    pub title: String,
    pub message: String,
}

impl From<&SetupError> for FallbackDto {
    fn from(err: &SetupError) -> Self {
        Self {
            title: "The duel could not start".to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDto {
    Aim,
    Projectile,
    Post,
    GameOver,
}

impl From<PhaseKind> for PhaseDto {
    fn from(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Aim => PhaseDto::Aim,
            PhaseKind::Projectile => PhaseDto::Projectile,
            PhaseKind::Post => PhaseDto::Post,
            PhaseKind::GameOver => PhaseDto::GameOver,
        }
    }
}

/// Snapshot of the duel sent to the client on each tick.
#[derive(Debug, Clone, Serialize)]
pub struct FrameDto {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub clock: f32,
    /// Normalized heights; the client maps them onto the ground band itself.
    pub terrain: Vec<f32>,
    pub characters: Vec<CharacterDto>,
    pub active_id: CharacterId,
    pub wind: f32,
    pub weapon_slot: u8,
    pub weapon_name: &'static str,
    pub angle: f32,
    pub power: f32,
    pub charging: bool,
    pub input_locked: bool,
    pub projectile: Option<ProjectileDto>,
    pub explosion: Option<ExplosionDto>,
    pub phase: PhaseDto,
    /// Set only in game over; `null` there means a draw.
    pub winner: Option<CharacterId>,
}

impl From<&FrameUpdate> for FrameDto {
    fn from(update: &FrameUpdate) -> Self {
        let snap = &update.snapshot;
        Self {
            tick: update.tick,
            width: snap.width,
            height: snap.height,
            clock: snap.clock,
            terrain: snap.terrain.clone(),
            characters: snap.characters.iter().map(CharacterDto::from).collect(),
            active_id: snap.active_id,
            wind: snap.wind,
            weapon_slot: snap.weapon_slot,
            weapon_name: snap.weapon_name,
            angle: snap.angle,
            power: snap.power,
            charging: snap.charging,
            input_locked: snap.input_locked,
            projectile: snap.projectile.as_ref().map(ProjectileDto::from),
            explosion: snap.explosion.as_ref().map(ExplosionDto::from),
            phase: snap.phase.into(),
            winner: snap.winner,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterDto {
    pub id: CharacterId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub hp: i32,
    pub alive: bool,
    pub falling: bool,
}

impl From<&CharacterSnapshot> for CharacterDto {
    fn from(c: &CharacterSnapshot) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            x: c.x,
            y: c.y,
            radius: c.radius,
            hp: c.hp,
            alive: c.alive,
            falling: c.falling,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileDto {
    pub owner_id: CharacterId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub bounces: u32,
    pub fuse_remaining: Option<f32>,
}

impl From<&ProjectileSnapshot> for ProjectileDto {
    fn from(p: &ProjectileSnapshot) -> Self {
        Self {
            owner_id: p.owner_id,
            x: p.x,
            y: p.y,
            vx: p.vx,
            vy: p.vy,
            radius: p.radius,
            bounces: p.bounces,
            fuse_remaining: p.fuse_remaining,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionDto {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub started: f32,
    pub duration: f32,
}

impl From<&ExplosionFx> for ExplosionDto {
    fn from(fx: &ExplosionFx) -> Self {
        Self {
            x: fx.x,
            y: fx.y,
            radius: fx.radius,
            started: fx.started,
            duration: fx.duration,
        }
    }
}
