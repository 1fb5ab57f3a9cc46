// Per-tick simulation systems. Each one works on plain state slices.

pub mod explosion;
pub mod projectiles;
pub mod settling;
