// Use cases layer: application workflows for the duel server.

pub mod game;
pub mod session;
pub mod types;

pub use session::{DuelSession, SessionSettings};
pub use types::{Command, FrameUpdate};
