/// Gameplay tuning for the two combatants.

#[derive(Debug, Clone, Copy)]
pub struct CharacterTuning {
    /// Body radius in pixels (used for hit checks and resting height).
    pub radius: f32,

    /// Horizontal spawn positions as fractions of the playfield width.
    pub spawn_fractions: [f32; 2],

    /// Gap between the body and the ground when resting.
    pub rest_gap: f32,

    /// How far above its resting height a character must be to start falling.
    pub fall_threshold: f32,

    /// Distance below the playfield bottom at which a character is eliminated.
    pub fall_out_margin: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            radius: 12.0,
            spawn_fractions: [0.18, 0.82],
            rest_gap: 1.0,
            fall_threshold: 0.5,
            fall_out_margin: 80.0,
        }
    }
}
