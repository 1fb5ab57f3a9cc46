// Network adapter for the per-connection duel WebSocket.

pub mod client;

pub use client::ws_handler;
