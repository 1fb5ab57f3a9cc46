// Session orchestration: one duel world per connected client.

use crate::domain::{Duel, DuelTuning, SetupError};
use crate::use_cases::game::duel_task;
use crate::use_cases::{Command, FrameUpdate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc, watch};
use tracing::info;

/// Shared configuration for spawning duel sessions.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Capacity for inbound player commands.
    pub command_channel_capacity: usize,
    /// Tick interval of the duel loop.
    pub tick_interval: Duration,
    /// Gameplay tuning applied to every new duel.
    pub tuning: DuelTuning,
    /// Seed every session with this value instead of a random one.
    pub fixed_seed: Option<u64>,
}

/// Channels into and out of one running duel. Dropping the session stops its task.
#[derive(Debug)]
pub struct DuelSession {
    /// Seed the duel RNG was built from; log it to replay a match.
    pub seed: u64,
    /// Sender for commands into the duel task.
    pub command_tx: mpsc::Sender<Command>,
    /// Latest published frame.
    frame_tx: watch::Sender<FrameUpdate>,
    shutdown: Arc<Notify>,
}

impl DuelSession {
    /// Builds a duel from `settings` and spawns its loop.
    pub fn start(settings: &SessionSettings, seed: u64) -> Result<Self, SetupError> {
        let duel = Duel::new(settings.tuning, StdRng::seed_from_u64(seed))?;

        // Channel wiring for the duel loop.
        let (command_tx, command_rx) = mpsc::channel::<Command>(settings.command_channel_capacity);
        let (frame_tx, _frame_rx) = watch::channel(FrameUpdate {
            tick: 0,
            snapshot: duel.snapshot(),
        });
        let shutdown = Arc::new(Notify::new());

        tokio::spawn(duel_task(
            duel,
            command_rx,
            frame_tx.clone(),
            settings.tick_interval,
            shutdown.clone(),
        ));
        info!(seed, "duel session started");

        Ok(Self {
            seed,
            command_tx,
            frame_tx,
            shutdown,
        })
    }

    /// Receiver that always holds the newest frame; slow readers skip stale ones.
    pub fn frames(&self) -> watch::Receiver<FrameUpdate> {
        self.frame_tx.subscribe()
    }
}

impl Drop for DuelSession {
    fn drop(&mut self) {
        // notify_one stores a permit, so the task sees it even mid-tick.
        self.shutdown.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            command_channel_capacity: 8,
            tick_interval: Duration::from_millis(5),
            tuning: DuelTuning::default(),
            fixed_seed: None,
        }
    }

    #[tokio::test]
    async fn same_seed_deals_the_same_terrain() {
        let a = DuelSession::start(&settings(), 42).unwrap();
        let b = DuelSession::start(&settings(), 42).unwrap();

        let terrain_a = a.frames().borrow().snapshot.terrain.clone();
        let terrain_b = b.frames().borrow().snapshot.terrain.clone();

        assert_eq!(terrain_a, terrain_b);
    }

    #[tokio::test]
    async fn invalid_tuning_is_reported_before_spawning() {
        let mut settings = settings();
        settings.tuning.arena.width = 10.0;

        let err = DuelSession::start(&settings, 1).unwrap_err();

        assert!(matches!(err, SetupError::PlayfieldTooSmall { .. }));
    }

    #[tokio::test]
    async fn dropping_the_session_stops_its_frames() {
        let session = DuelSession::start(&settings(), 3).unwrap();
        let mut frames = session.frames();

        drop(session);

        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while frames.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
