use super::types::{Command, FrameUpdate};
use crate::domain::{Duel, DuelEvent};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Notify, mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Drives one duel: drains queued commands, steps the simulation with the
/// measured frame delta, logs what happened and publishes a snapshot per tick.
pub async fn duel_task<R: Rng + Send + 'static>(
    mut duel: Duel<R>,
    mut command_rx: mpsc::Receiver<Command>,
    frame_tx: watch::Sender<FrameUpdate>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut tick: u64 = 0;
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                // Exit cleanly when the session is dropped.
                break;
            }
            _ = interval.tick() => {}
        }

        let mut commands_closed = false;
        loop {
            match command_rx.try_recv() {
                Ok(command) => {
                    if !duel.apply(command) {
                        debug!(?command, phase = ?duel.state().phase.kind(), "command ignored");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    commands_closed = true;
                    break;
                }
            }
        }

        // The duel clamps the delta itself, so a stalled task never teleports shells.
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        duel.step(dt);

        for event in duel.take_events() {
            log_event(tick, &event);
        }

        tick += 1;
        frame_tx.send_replace(FrameUpdate {
            tick,
            snapshot: duel.snapshot(),
        });

        if commands_closed {
            info!(tick, "command channel closed; duel task exiting");
            break;
        }
    }
}

fn log_event(tick: u64, event: &DuelEvent) {
    match event {
        DuelEvent::Restarted => debug!(tick, "duel restarted"),
        DuelEvent::ShotFired {
            shooter,
            weapon,
            angle,
            power,
            speed,
        } => info!(tick, shooter, weapon, angle, power, speed, "shot fired"),
        DuelEvent::Detonated {
            x,
            y,
            age,
            bounces,
            hits,
        } => {
            info!(tick, x, y, age, bounces, hit_count = hits.len(), "shell detonated");
            for hit in hits {
                info!(
                    tick,
                    character_id = hit.character,
                    damage = hit.amount,
                    "character hit"
                );
            }
        }
        DuelEvent::Missed { age, bounces } => debug!(tick, age, bounces, "shell left the field"),
        DuelEvent::CharacterFellOut { character } => {
            info!(tick, character_id = character, "character fell out of the field");
        }
        DuelEvent::TurnStarted {
            active,
            wind,
            forced,
        } => {
            if *forced {
                warn!(tick, active, wind, "settle ceiling reached; forcing turn change");
            } else {
                info!(tick, active, wind, "turn started");
            }
        }
        DuelEvent::GameOver { winner } => match winner {
            Some(winner) => info!(tick, winner, "match won"),
            None => info!(tick, "match drawn"),
        },
    }
}
