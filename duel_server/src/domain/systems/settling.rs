use crate::domain::state::{Character, CharacterId};
use crate::domain::terrain::Terrain;

#[derive(Debug, Clone, Copy)]
pub struct SettlingConfig {
    pub gravity: f32,
    pub rest_gap: f32,
    pub fall_threshold: f32,
    pub fall_out_margin: f32,
}

/// Centre Y at which `character` rests on the current ground.
pub fn resting_y(character: &Character, terrain: &Terrain, rest_gap: f32) -> f32 {
    terrain.height_at(character.center_x(terrain.width())) - character.radius - rest_gap
}

/// Drops characters onto the terrain and pins them there.
///
/// Returns the ids of characters eliminated for leaving the playfield this tick.
pub fn settle_characters(
    characters: &mut [Character],
    terrain: &Terrain,
    dt: f32,
    cfg: SettlingConfig,
) -> Vec<CharacterId> {
    let fall_out_y = terrain.height() + cfg.fall_out_margin;
    let mut fell_out = Vec::new();

    for c in characters.iter_mut() {
        if !c.is_alive() {
            continue;
        }
        if c.y > fall_out_y {
            c.eliminate();
            fell_out.push(c.id);
            continue;
        }

        let rest = resting_y(c, terrain, cfg.rest_gap);
        if c.y < rest - cfg.fall_threshold {
            c.falling = true;
        }

        if c.falling {
            c.vy += cfg.gravity * dt;
            c.y += c.vy * dt;
            if c.y >= rest {
                c.y = rest;
                c.vy = 0.0;
                c.falling = false;
            }
        } else {
            // Grounded characters follow the surface exactly.
            c.y = rest;
            c.vy = 0.0;
        }
    }

    fell_out
}
