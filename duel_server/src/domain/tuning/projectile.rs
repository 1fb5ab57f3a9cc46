/// Gameplay tuning for shells in flight.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Integration sub-steps per tick (limits tunneling through thin terrain).
    pub sub_steps: u32,

    /// Launch speed at zero power, in pixels per second.
    pub base_speed: f32,

    /// Extra launch speed gained between power 0 and power 100.
    pub speed_span: f32,

    /// Extra clearance between shooter body and shell at launch.
    pub launch_clearance: f32,

    /// Horizontal distance past either side wall before a shell counts as a miss.
    pub side_margin: f32,

    /// Distance below the playfield before a shell counts as a miss.
    pub bottom_margin: f32,

    /// Distance above the playfield before a shell counts as a miss.
    pub top_margin: f32,

    /// Horizontal offset used to sample terrain slope when bouncing.
    pub normal_probe: f32,

    /// Damping applied to horizontal velocity after a bounce.
    pub bounce_friction: f32,

    /// Damping applied to vertical velocity after a bounce.
    pub bounce_restitution: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            sub_steps: 4,
            base_speed: 120.0,
            speed_span: 520.0,
            launch_clearance: 2.0,
            side_margin: 80.0,
            bottom_margin: 120.0,
            top_margin: 160.0,
            normal_probe: 6.0,
            bounce_friction: 0.62,
            bounce_restitution: 0.55,
        }
    }
}

impl ProjectileTuning {
    /// Launch speed in px/s for an aim power in [10, 100].
    pub fn launch_speed(&self, power: f32) -> f32 {
        self.base_speed + (power / 100.0) * self.speed_span
    }
}
