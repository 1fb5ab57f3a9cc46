// Domain-level simulation entities and read-only snapshot types.

use crate::domain::terrain::Terrain;
use crate::domain::weapons::{Weapon, WeaponSlot};

pub type CharacterId = u32;

/// Hit points of a fresh character; hp never leaves [0, MAX_HP].
pub const MAX_HP: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Horizontal position as a fraction of the playfield width. Fixed for the match.
    pub x_fraction: f32,
    /// Vertical centre in pixels (+Y down).
    pub y: f32,
    pub radius: f32,
    pub facing: Facing,

    // Settling state.
    pub vy: f32,
    pub falling: bool,

    hp: i32,
}

impl Character {
    pub fn new(id: CharacterId, x_fraction: f32, radius: f32, facing: Facing) -> Self {
        Self {
            id,
            name: format!("Player {id}"),
            x_fraction,
            y: 0.0,
            radius,
            facing,
            vy: 0.0,
            falling: false,
            hp: MAX_HP,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtracts `amount` from hp, keeping hp inside [0, MAX_HP].
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount).clamp(0, MAX_HP);
    }

    pub fn eliminate(&mut self) {
        self.hp = 0;
        self.falling = false;
        self.vy = 0.0;
    }

    pub fn center_x(&self, field_width: f32) -> f32 {
        self.x_fraction * field_width
    }
}

/// A shell in flight. Carries its own weapon so re-selecting mid-flight has no effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub age: f32,
    pub bounces: u32,
    pub owner: CharacterId,
    pub weapon: Weapon,
}

impl Projectile {
    /// Seconds until the fuse fires, for fused weapons.
    pub fn fuse_remaining(&self) -> Option<f32> {
        self.weapon
            .has_fuse()
            .then(|| (self.weapon.fuse - self.age).max(0.0))
    }
}

/// One character's share of a detonation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    pub character: CharacterId,
    pub amount: i32,
}

/// Rendering-only blast marker; has no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionFx {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Simulation clock value at detonation.
    pub started: f32,
    pub duration: f32,
}

impl ExplosionFx {
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.started > self.duration
    }
}

/// Turn phase. The projectile lives inside its phase, so it exists exactly while in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Aim { charging: bool },
    Projectile(Projectile),
    Post { elapsed: f32 },
    GameOver { winner: Option<CharacterId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Aim,
    Projectile,
    Post,
    GameOver,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Aim { .. } => PhaseKind::Aim,
            Phase::Projectile(_) => PhaseKind::Projectile,
            Phase::Post { .. } => PhaseKind::Post,
            Phase::GameOver { .. } => PhaseKind::GameOver,
        }
    }
}

/// Whole-match state owned by a single duel.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelState {
    pub terrain: Terrain,
    pub characters: [Character; 2],
    /// Index into `characters` of the player whose turn it is.
    pub active: usize,
    pub angle: f32,
    pub power: f32,
    pub weapon: WeaponSlot,
    pub wind: f32,
    pub phase: Phase,
    pub explosion: Option<ExplosionFx>,
    /// Seconds of simulated time since the match started.
    pub clock: f32,
}

impl DuelState {
    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.phase {
            Phase::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// `None` while the match runs and also after a draw; check the phase to tell them apart.
    pub fn winner(&self) -> Option<CharacterId> {
        match self.phase {
            Phase::GameOver { winner } => winner,
            _ => None,
        }
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.phase, Phase::Aim { charging: true })
    }

    /// Aim commands are accepted only while aiming.
    pub fn input_locked(&self) -> bool {
        !matches!(self.phase, Phase::Aim { .. })
    }

    pub fn active_character(&self) -> &Character {
        &self.characters[self.active]
    }

    /// True once no living character is still falling.
    pub fn is_settled(&self) -> bool {
        self.characters
            .iter()
            .filter(|c| c.is_alive())
            .all(|c| !c.falling)
    }

    pub fn alive_count(&self) -> usize {
        self.characters.iter().filter(|c| c.is_alive()).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub hp: i32,
    pub alive: bool,
    pub falling: bool,
}

impl CharacterSnapshot {
    pub fn of(character: &Character, field_width: f32) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            x: character.center_x(field_width),
            y: character.y,
            radius: character.radius,
            hp: character.hp(),
            alive: character.is_alive(),
            falling: character.falling,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub owner_id: CharacterId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub age: f32,
    pub bounces: u32,
    pub fuse_remaining: Option<f32>,
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            owner_id: p.owner,
            x: p.x,
            y: p.y,
            vx: p.vx,
            vy: p.vy,
            radius: p.radius,
            age: p.age,
            bounces: p.bounces,
            fuse_remaining: p.fuse_remaining(),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelSnapshot {
    pub width: f32,
    pub height: f32,
    pub clock: f32,
    pub terrain: Vec<f32>,
    pub characters: Vec<CharacterSnapshot>,
    pub active_id: CharacterId,
    pub wind: f32,
    pub weapon_slot: u8,
    pub weapon_name: &'static str,
    pub angle: f32,
    pub power: f32,
    pub charging: bool,
    pub input_locked: bool,
    pub projectile: Option<ProjectileSnapshot>,
    pub explosion: Option<ExplosionFx>,
    pub phase: PhaseKind,
    pub winner: Option<CharacterId>,
}

impl From<&DuelState> for DuelSnapshot {
    fn from(state: &DuelState) -> Self {
        let width = state.terrain.width();
        Self {
            width,
            height: state.terrain.height(),
            clock: state.clock,
            terrain: state.terrain.samples().to_vec(),
            characters: state
                .characters
                .iter()
                .map(|c| CharacterSnapshot::of(c, width))
                .collect(),
            active_id: state.active_character().id,
            wind: state.wind,
            weapon_slot: state.weapon.number(),
            weapon_name: state.weapon.weapon().name,
            angle: state.angle,
            power: state.power,
            charging: state.is_charging(),
            input_locked: state.input_locked(),
            projectile: state.projectile().map(ProjectileSnapshot::from),
            explosion: state.explosion,
            phase: state.phase.kind(),
            winner: state.winner(),
        }
    }
}
