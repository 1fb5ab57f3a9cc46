/// Gameplay tuning for aiming and turn pacing.

#[derive(Debug, Clone, Copy)]
pub struct TurnTuning {
    /// Aim angle in degrees at the start of every turn.
    pub default_angle: f32,

    /// Aim power at the start of every turn.
    pub default_power: f32,

    /// Power gained per second while the fire input is held.
    pub charge_rate: f32,

    /// Minimum time spent in the post-shot phase before the turn can pass.
    pub settle_delay: f32,

    /// Post-shot time after which the turn passes even if characters still fall.
    pub settle_ceiling: f32,

    /// Largest frame delta the simulation accepts, in seconds.
    pub max_dt: f32,

    /// Lifetime of the explosion visual on the simulation clock.
    pub explosion_fx_duration: f32,
}

impl Default for TurnTuning {
    fn default() -> Self {
        Self {
            default_angle: 45.0,
            default_power: 62.0,
            charge_rate: 45.0,
            settle_delay: 0.25,
            settle_ceiling: 2.25,
            max_dt: 0.033,
            explosion_fx_duration: 0.36,
        }
    }
}
