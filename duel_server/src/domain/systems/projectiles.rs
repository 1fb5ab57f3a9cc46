use crate::domain::state::{Character, Projectile};
use crate::domain::terrain::Terrain;

#[derive(Debug, Clone, Copy)]
pub struct FlightConfig {
    pub gravity: f32,
    pub wind: f32,
    pub sub_steps: u32,
    pub side_margin: f32,
    pub bottom_margin: f32,
    pub top_margin: f32,
    pub normal_probe: f32,
    pub bounce_friction: f32,
    pub bounce_restitution: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightOutcome {
    InFlight,
    Detonated { x: f32, y: f32 },
    Missed,
}

/// Advances a shell by `dt`, split into `cfg.sub_steps` equal sub-steps.
///
/// Each sub-step checks, in order: fuse, character contact, playfield bounds,
/// terrain contact. The first terminal event ends the step.
pub fn advance_projectile(
    p: &mut Projectile,
    characters: &[Character],
    terrain: &Terrain,
    dt: f32,
    cfg: FlightConfig,
) -> FlightOutcome {
    let steps = cfg.sub_steps.max(1);
    let h = dt / steps as f32;

    for _ in 0..steps {
        p.age += h;
        if p.weapon.has_fuse() && p.age >= p.weapon.fuse {
            return FlightOutcome::Detonated { x: p.x, y: p.y };
        }

        p.vx += cfg.wind * h;
        p.vy += cfg.gravity * h;
        p.x += p.vx * h;
        p.y += p.vy * h;

        if touches_character(p, characters, terrain.width()) {
            return FlightOutcome::Detonated { x: p.x, y: p.y };
        }

        if out_of_bounds(p, terrain, &cfg) {
            return FlightOutcome::Missed;
        }

        let ground = terrain.height_at(p.x);
        if p.y + p.radius >= ground {
            if p.bounces < p.weapon.bounces {
                bounce(p, terrain, ground, &cfg);
            } else {
                return FlightOutcome::Detonated {
                    x: p.x,
                    y: ground - 1.0,
                };
            }
        }
    }

    FlightOutcome::InFlight
}

// Any living character counts, the shooter included.
fn touches_character(p: &Projectile, characters: &[Character], field_width: f32) -> bool {
    characters.iter().filter(|c| c.is_alive()).any(|c| {
        let dx = p.x - c.center_x(field_width);
        let dy = p.y - c.y;
        let reach = c.radius + p.radius;
        dx * dx + dy * dy <= reach * reach
    })
}

fn out_of_bounds(p: &Projectile, terrain: &Terrain, cfg: &FlightConfig) -> bool {
    p.x < -cfg.side_margin
        || p.x > terrain.width() + cfg.side_margin
        || p.y > terrain.height() + cfg.bottom_margin
        || p.y < -cfg.top_margin
}

/// Reflects velocity about the local surface normal, damps it, and lifts the shell clear.
fn bounce(p: &mut Projectile, terrain: &Terrain, ground: f32, cfg: &FlightConfig) {
    let left = terrain.height_at(p.x - cfg.normal_probe);
    let right = terrain.height_at(p.x + cfg.normal_probe);

    let tx = 2.0 * cfg.normal_probe;
    let ty = right - left;
    let len = (tx * tx + ty * ty).sqrt();
    let (nx, ny) = if len > f32::EPSILON {
        (-ty / len, tx / len)
    } else {
        (0.0, 1.0)
    };

    let dot = p.vx * nx + p.vy * ny;
    p.vx = (p.vx - 2.0 * dot * nx) * cfg.bounce_friction;
    p.vy = (p.vy - 2.0 * dot * ny) * cfg.bounce_restitution;
    p.y = ground - p.radius - 1.0;
    p.bounces += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::Facing;
    use crate::domain::weapons::{BAZOOKA, GRENADE, Weapon};

    const CFG: FlightConfig = FlightConfig {
        gravity: 420.0,
        wind: 0.0,
        sub_steps: 4,
        side_margin: 80.0,
        bottom_margin: 120.0,
        top_margin: 160.0,
        normal_probe: 6.0,
        bounce_friction: 0.62,
        bounce_restitution: 0.55,
    };

    fn flat() -> Terrain {
        // Ground line at y = 0.84 * 540.
        Terrain::from_samples(vec![0.0; 64], 960.0, 540.0)
    }

    fn shell(weapon: Weapon, x: f32, y: f32, vx: f32, vy: f32) -> Projectile {
        Projectile {
            x,
            y,
            vx,
            vy,
            radius: weapon.projectile_radius,
            age: 0.0,
            bounces: 0,
            owner: 1,
            weapon,
        }
    }

    #[test]
    fn direct_weapon_detonates_at_the_surface_on_contact() {
        let terrain = flat();
        let ground = terrain.height_at(300.0);
        let mut p = shell(BAZOOKA, 300.0, ground - 10.0, 0.0, 400.0);

        let mut outcome = FlightOutcome::InFlight;
        for _ in 0..10 {
            outcome = advance_projectile(&mut p, &[], &terrain, 0.016, CFG);
            if outcome != FlightOutcome::InFlight {
                break;
            }
        }

        assert_eq!(
            outcome,
            FlightOutcome::Detonated {
                x: 300.0,
                y: ground - 1.0
            }
        );
    }

    #[test]
    fn grenade_bounces_off_flat_ground() {
        let terrain = flat();
        let ground = terrain.height_at(300.0);
        let mut p = shell(GRENADE, 300.0, ground - 5.0, 50.0, 300.0);

        let outcome = advance_projectile(&mut p, &[], &terrain, 0.016, CFG);

        assert_eq!(outcome, FlightOutcome::InFlight);
        assert_eq!(p.bounces, 1);
        assert!(p.vy < 0.0, "shell should head back up, vy = {}", p.vy);
        assert!(p.vx > 0.0 && p.vx < 50.0);
        assert!(p.y + p.radius < ground);
    }

    #[test]
    fn grenade_glances_downhill_off_a_slope() {
        // Ground climbs from left to right, so the surface faces up and to the left.
        let ramp = (0..64).map(|i| i as f32 / 63.0).collect();
        let terrain = Terrain::from_samples(ramp, 960.0, 540.0);
        let ground = terrain.height_at(480.0);
        let mut p = shell(GRENADE, 480.0, ground - 5.0, 0.0, 300.0);

        let outcome = advance_projectile(&mut p, &[], &terrain, 0.016, CFG);

        assert_eq!(outcome, FlightOutcome::InFlight);
        assert_eq!(p.bounces, 1);
        assert!(p.vy < 0.0, "shell should head back up, vy = {}", p.vy);
        assert!(p.vx < -50.0, "slope should kick the shell left, vx = {}", p.vx);
    }

    #[test]
    fn grenade_detonates_on_contact_once_bounces_are_spent() {
        let terrain = flat();
        let ground = terrain.height_at(300.0);
        let mut p = shell(GRENADE, 300.0, ground - 5.0, 0.0, 300.0);
        p.bounces = GRENADE.bounces;

        let outcome = advance_projectile(&mut p, &[], &terrain, 0.016, CFG);

        assert!(matches!(outcome, FlightOutcome::Detonated { .. }));
    }

    #[test]
    fn fuse_fires_mid_air() {
        let terrain = flat();
        // Straight up, fast enough to stay airborne past the fuse.
        let mut p = shell(GRENADE, 480.0, 400.0, 0.0, -600.0);

        let dt = 1.0 / 60.0;
        let mut outcome = FlightOutcome::InFlight;
        for _ in 0..400 {
            outcome = advance_projectile(&mut p, &[], &terrain, dt, CFG);
            if outcome != FlightOutcome::InFlight {
                break;
            }
        }

        assert!(matches!(outcome, FlightOutcome::Detonated { .. }));
        assert_eq!(p.bounces, 0);
        assert!(p.age >= GRENADE.fuse);
        assert!(p.age < GRENADE.fuse + dt / 4.0 + 1e-4);
    }

    #[test]
    fn overlapping_a_character_detonates_at_the_shell() {
        let terrain = flat();
        let mut target = Character::new(2, 0.5, 12.0, Facing::Left);
        target.y = 200.0;
        let mut p = shell(BAZOOKA, 470.0, 200.0, 200.0, 0.0);

        let outcome = advance_projectile(&mut p, &[target], &terrain, 0.016, CFG);

        match outcome {
            FlightOutcome::Detonated { x, y } => {
                assert!((x - 480.0).abs() <= 16.0);
                assert!((y - 200.0).abs() <= 16.0);
            }
            other => panic!("expected detonation, got {other:?}"),
        }
    }

    #[test]
    fn dead_characters_do_not_stop_shells() {
        let terrain = flat();
        let mut target = Character::new(2, 0.5, 12.0, Facing::Left);
        target.y = 200.0;
        target.eliminate();
        let mut p = shell(BAZOOKA, 470.0, 200.0, 200.0, 0.0);

        let outcome = advance_projectile(&mut p, &[target], &terrain, 0.016, CFG);

        assert_eq!(outcome, FlightOutcome::InFlight);
    }

    #[test]
    fn leaving_the_playfield_is_a_miss() {
        let terrain = flat();
        let mut p = shell(BAZOOKA, -70.0, 100.0, -2000.0, 0.0);

        let outcome = advance_projectile(&mut p, &[], &terrain, 0.016, CFG);

        assert_eq!(outcome, FlightOutcome::Missed);
    }

    #[test]
    fn wind_pushes_the_shell_sideways() {
        let terrain = flat();
        let mut calm = shell(BAZOOKA, 480.0, 100.0, 0.0, 0.0);
        let mut windy = calm;
        let cfg = FlightConfig { wind: 55.0, ..CFG };

        advance_projectile(&mut calm, &[], &terrain, 0.033, CFG);
        advance_projectile(&mut windy, &[], &terrain, 0.033, cfg);

        assert_eq!(calm.x, 480.0);
        assert!(windy.x > 480.0);
        assert_eq!(calm.y, windy.y);
    }
}
