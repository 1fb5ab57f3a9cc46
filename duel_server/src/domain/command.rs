// Player intents accepted by a duel.

/// One discrete input. Deltas are in degrees (angle) and power points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    AdjustAngle(f32),
    AdjustPower(f32),
    SelectWeapon(u8),
    BeginCharge,
    Fire,
    Restart,
}
