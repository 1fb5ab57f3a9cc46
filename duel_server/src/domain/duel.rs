// Turn state machine for one two-player duel.
//
// A duel owns its terrain, both characters and the current phase. The session
// loop feeds it commands and frame deltas, then reads snapshots and events back.

use crate::domain::command::Command;
use crate::domain::errors::SetupError;
use crate::domain::events::DuelEvent;
use crate::domain::state::{
    Character, CharacterId, DuelSnapshot, DuelState, Facing, Phase, PhaseKind, Projectile,
};
use crate::domain::systems::explosion::{self, Blast};
use crate::domain::systems::projectiles::{self, FlightConfig, FlightOutcome};
use crate::domain::systems::settling::{self, SettlingConfig};
use crate::domain::terrain::Terrain;
use crate::domain::tuning::DuelTuning;
use crate::domain::weapons::WeaponSlot;
use rand::Rng;
use rand::rngs::StdRng;

pub const MIN_ANGLE: f32 = 10.0;
pub const MAX_ANGLE: f32 = 80.0;
pub const MIN_POWER: f32 = 10.0;
pub const MAX_POWER: f32 = 100.0;

pub struct Duel<R = StdRng> {
    tuning: DuelTuning,
    rng: R,
    state: DuelState,
    events: Vec<DuelEvent>,
}

impl<R: Rng> Duel<R> {
    /// Validates the tuning and deals the first match.
    pub fn new(tuning: DuelTuning, mut rng: R) -> Result<Self, SetupError> {
        tuning.validate()?;
        let state = fresh_state(&tuning, &mut rng);
        Ok(Self {
            tuning,
            rng,
            state,
            events: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &DuelTuning {
        &self.tuning
    }

    pub fn state(&self) -> &DuelState {
        &self.state
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        DuelSnapshot::from(&self.state)
    }

    /// Drains events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<DuelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Applies one command. Returns false when the current phase ignores it.
    pub fn apply(&mut self, command: Command) -> bool {
        if command == Command::Restart {
            self.restart();
            return true;
        }
        if self.state.phase.kind() == PhaseKind::GameOver {
            return false;
        }

        match command {
            Command::AdjustAngle(delta) => self.adjust_angle(delta),
            Command::AdjustPower(delta) => self.adjust_power(delta),
            Command::SelectWeapon(slot) => self.select_weapon(slot),
            Command::BeginCharge => self.begin_charge(),
            Command::Fire => self.fire(),
            Command::Restart => false,
        }
    }

    /// Advances the simulation by one frame. `dt` is clamped to the frame ceiling.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.tuning.turn.max_dt)
        } else {
            0.0
        };
        self.state.clock += dt;

        match self.state.phase.kind() {
            PhaseKind::Aim => {
                if self.state.is_charging() {
                    let charged = self.state.power + self.tuning.turn.charge_rate * dt;
                    self.state.power = charged.clamp(MIN_POWER, MAX_POWER);
                }
                self.settle(dt);
            }
            PhaseKind::Projectile => {
                self.advance_shot(dt);
                self.settle(dt);
            }
            PhaseKind::Post => self.advance_post(dt),
            PhaseKind::GameOver => self.settle(dt),
        }

        let clock = self.state.clock;
        if self.state.explosion.is_some_and(|fx| fx.is_expired(clock)) {
            self.state.explosion = None;
        }
    }

    fn restart(&mut self) {
        self.state = fresh_state(&self.tuning, &mut self.rng);
        self.events.push(DuelEvent::Restarted);
    }

    fn adjust_angle(&mut self, delta: f32) -> bool {
        if self.state.input_locked() || !delta.is_finite() {
            return false;
        }
        self.state.angle = (self.state.angle + delta).clamp(MIN_ANGLE, MAX_ANGLE);
        true
    }

    fn adjust_power(&mut self, delta: f32) -> bool {
        if self.state.input_locked() || !delta.is_finite() {
            return false;
        }
        self.state.power = (self.state.power + delta).clamp(MIN_POWER, MAX_POWER);
        true
    }

    // Allowed in flight too; the shell already carries its own weapon.
    fn select_weapon(&mut self, slot: u8) -> bool {
        match WeaponSlot::new(slot) {
            Some(slot) => {
                self.state.weapon = slot;
                true
            }
            None => false,
        }
    }

    fn begin_charge(&mut self) -> bool {
        match self.state.phase {
            Phase::Aim { charging: false } => {
                self.state.phase = Phase::Aim { charging: true };
                self.state.power = MIN_POWER;
                true
            }
            _ => false,
        }
    }

    fn fire(&mut self) -> bool {
        if self.state.input_locked() || !self.state.active_character().is_alive() {
            return false;
        }

        let projectile = self.launch();
        self.events.push(DuelEvent::ShotFired {
            shooter: projectile.owner,
            weapon: projectile.weapon.key,
            angle: self.state.angle,
            power: self.state.power,
            speed: self.tuning.projectile.launch_speed(self.state.power),
        });
        self.state.phase = Phase::Projectile(projectile);
        true
    }

    /// Builds the shell just outside the shooter's body, aimed along the facing direction.
    fn launch(&self) -> Projectile {
        let shooter = self.state.active_character();
        let weapon = *self.state.weapon.weapon();
        let dir = shooter.facing.sign();

        let degrees = match shooter.facing {
            Facing::Right => self.state.angle,
            Facing::Left => 180.0 - self.state.angle,
        };
        let radians = degrees.to_radians();
        let speed = self.tuning.projectile.launch_speed(self.state.power);

        let clearance =
            shooter.radius + weapon.projectile_radius + self.tuning.projectile.launch_clearance;
        Projectile {
            x: shooter.center_x(self.state.terrain.width()) + dir * clearance,
            y: shooter.y - shooter.radius * 0.25,
            vx: radians.cos() * speed,
            vy: -radians.sin() * speed,
            radius: weapon.projectile_radius,
            age: 0.0,
            bounces: 0,
            owner: shooter.id,
            weapon,
        }
    }

    fn advance_shot(&mut self, dt: f32) {
        let cfg = self.flight_config();
        let Phase::Projectile(projectile) = &mut self.state.phase else {
            return;
        };

        let outcome = projectiles::advance_projectile(
            projectile,
            &self.state.characters,
            &self.state.terrain,
            dt,
            cfg,
        );
        let shell = *projectile;

        match outcome {
            FlightOutcome::InFlight => {}
            FlightOutcome::Detonated { x, y } => self.resolve_detonation(&shell, x, y),
            FlightOutcome::Missed => {
                self.events.push(DuelEvent::Missed {
                    age: shell.age,
                    bounces: shell.bounces,
                });
                self.state.phase = Phase::Post { elapsed: 0.0 };
            }
        }
    }

    fn resolve_detonation(&mut self, shell: &Projectile, x: f32, y: f32) {
        let blast = Blast {
            x,
            y,
            radius: shell.weapon.blast_radius,
            max_damage: shell.weapon.max_damage,
            carves_crater: true,
        };
        let detonation = explosion::detonate(
            &mut self.state.terrain,
            &mut self.state.characters,
            blast,
            self.state.clock,
            self.tuning.turn.explosion_fx_duration,
        );

        self.state.explosion = Some(detonation.fx);
        self.events.push(DuelEvent::Detonated {
            x,
            y,
            age: shell.age,
            bounces: shell.bounces,
            hits: detonation.hits,
        });

        if !self.check_game_over() {
            self.state.phase = Phase::Post { elapsed: 0.0 };
        }
    }

    fn advance_post(&mut self, dt: f32) {
        let Phase::Post { elapsed } = &mut self.state.phase else {
            return;
        };
        *elapsed += dt;
        let elapsed = *elapsed;

        self.settle(dt);
        if self.check_game_over() {
            return;
        }

        let turn = &self.tuning.turn;
        let settled = self.state.is_settled();
        if elapsed > turn.settle_delay && settled {
            self.begin_turn(false);
        } else if elapsed > turn.settle_ceiling {
            self.begin_turn(true);
        }
    }

    /// Hands the turn to the other character with fresh aim and wind.
    fn begin_turn(&mut self, forced: bool) {
        let turn = self.tuning.turn;
        self.state.active = 1 - self.state.active;
        self.state.angle = turn.default_angle;
        self.state.power = turn.default_power;
        self.state.wind = draw_wind(&mut self.rng, self.tuning.arena.max_wind);
        self.state.phase = Phase::Aim { charging: false };

        self.events.push(DuelEvent::TurnStarted {
            active: self.state.active_character().id,
            wind: self.state.wind,
            forced,
        });
    }

    /// Ends the match once at most one character is left standing.
    fn check_game_over(&mut self) -> bool {
        if self.state.alive_count() > 1 {
            return false;
        }

        let winner = self
            .state
            .characters
            .iter()
            .find(|c| c.is_alive())
            .map(|c| c.id);
        self.state.phase = Phase::GameOver { winner };
        self.events.push(DuelEvent::GameOver { winner });
        true
    }

    fn settle(&mut self, dt: f32) {
        let character = &self.tuning.character;
        let cfg = SettlingConfig {
            gravity: self.tuning.arena.gravity,
            rest_gap: character.rest_gap,
            fall_threshold: character.fall_threshold,
            fall_out_margin: character.fall_out_margin,
        };

        let fell_out =
            settling::settle_characters(&mut self.state.characters, &self.state.terrain, dt, cfg);
        self.events.extend(
            fell_out
                .into_iter()
                .map(|character| DuelEvent::CharacterFellOut { character }),
        );
    }

    fn flight_config(&self) -> FlightConfig {
        let p = &self.tuning.projectile;
        FlightConfig {
            gravity: self.tuning.arena.gravity,
            wind: self.state.wind,
            sub_steps: p.sub_steps,
            side_margin: p.side_margin,
            bottom_margin: p.bottom_margin,
            top_margin: p.top_margin,
            normal_probe: p.normal_probe,
            bounce_friction: p.bounce_friction,
            bounce_restitution: p.bounce_restitution,
        }
    }
}

fn fresh_state<R: Rng + ?Sized>(tuning: &DuelTuning, rng: &mut R) -> DuelState {
    let arena = &tuning.arena;
    let terrain = Terrain::generate(arena.terrain_samples, arena.width, arena.height, rng);
    let characters = [
        spawn_character(1, Facing::Right, 0, &terrain, tuning),
        spawn_character(2, Facing::Left, 1, &terrain, tuning),
    ];

    DuelState {
        terrain,
        characters,
        active: 0,
        angle: tuning.turn.default_angle,
        power: tuning.turn.default_power,
        weapon: WeaponSlot::FIRST,
        wind: draw_wind(rng, arena.max_wind),
        phase: Phase::Aim { charging: false },
        explosion: None,
        clock: 0.0,
    }
}

fn spawn_character(
    id: CharacterId,
    facing: Facing,
    slot: usize,
    terrain: &Terrain,
    tuning: &DuelTuning,
) -> Character {
    let mut c = Character::new(
        id,
        tuning.character.spawn_fractions[slot],
        tuning.character.radius,
        facing,
    );
    c.y = settling::resting_y(&c, terrain, tuning.character.rest_gap);
    c
}

fn draw_wind<R: Rng + ?Sized>(rng: &mut R, max_wind: f32) -> f32 {
    if max_wind > 0.0 {
        rng.gen_range(-max_wind..=max_wind)
    } else {
        0.0
    }
}
