use crate::domain::state::{Character, DamageEvent, ExplosionFx};
use crate::domain::terrain::Terrain;

#[derive(Debug, Clone, Copy)]
pub struct Blast {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_damage: i32,
    pub carves_crater: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detonation {
    pub hits: Vec<DamageEvent>,
    pub fx: ExplosionFx,
}

/// Linear falloff: full damage at the epicentre, zero at the blast edge, rounded.
pub fn falloff_damage(distance: f32, radius: f32, max_damage: i32) -> i32 {
    if !(radius > 0.0) || max_damage <= 0 {
        return 0;
    }
    let t = (distance / radius).clamp(0.0, 1.0);
    ((max_damage as f32 * (1.0 - t)).round() as i32).clamp(0, max_damage)
}

/// Resolves one blast: crater, damage, then knocks every survivor loose.
pub fn detonate(
    terrain: &mut Terrain,
    characters: &mut [Character],
    blast: Blast,
    now: f32,
    fx_duration: f32,
) -> Detonation {
    if blast.carves_crater {
        terrain.crater(blast.x, blast.y, blast.radius);
    }

    let width = terrain.width();
    let mut hits = Vec::new();
    for c in characters.iter_mut().filter(|c| c.is_alive()) {
        let dx = c.center_x(width) - blast.x;
        let dy = c.y - blast.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > blast.radius + c.radius {
            continue;
        }

        let amount = falloff_damage(distance, blast.radius, blast.max_damage);
        if amount > 0 {
            c.take_damage(amount);
            hits.push(DamageEvent {
                character: c.id,
                amount,
            });
        }
    }

    // The ground may have moved under anyone still standing.
    for c in characters.iter_mut().filter(|c| c.is_alive()) {
        c.falling = true;
    }

    Detonation {
        hits,
        fx: ExplosionFx {
            x: blast.x,
            y: blast.y,
            radius: blast.radius,
            started: now,
            duration: fx_duration,
        },
    }
}
