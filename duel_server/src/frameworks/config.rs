use crate::domain::DuelTuning;
use std::{env, str::FromStr, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub const SERVICE_NAME: &str = "duel-server";

pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);

pub fn http_port() -> u16 {
    parse_or(env::var("DUEL_SERVER_PORT").ok(), 8080)
}

pub fn service_version() -> String {
    env::var("SERVICE_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string())
}

/// Pins every session to one RNG seed when set.
pub fn fixed_seed() -> Option<u64> {
    env::var("DUEL_SEED").ok().and_then(|v| v.trim().parse().ok())
}

/// Default gameplay tuning with the playfield size taken from the environment.
pub fn duel_tuning() -> DuelTuning {
    let mut tuning = DuelTuning::default();
    tuning.arena.width = parse_or(env::var("DUEL_FIELD_WIDTH").ok(), tuning.arena.width);
    tuning.arena.height = parse_or(env::var("DUEL_FIELD_HEIGHT").ok(), tuning.arena.height);
    tuning
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
