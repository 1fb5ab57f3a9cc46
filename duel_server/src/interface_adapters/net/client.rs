use crate::interface_adapters::protocol::{ClientMessage, FallbackDto, FrameDto, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::{conn_id, session_seed};
use crate::use_cases::{Command, DuelSession, FrameUpdate, SessionSettings};

use axum::{
    Error,
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, watch};
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    CommandsClosed,
    FramesClosed,
}

#[derive(Debug)]
enum DecodeError {
    Malformed(serde_json::Error),
    NonFinite,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let settings = state.session_settings.clone();
    ws.on_upgrade(move |socket| {
        // Separate connection id for correlating logs across the session lifetime.
        let conn_id = conn_id();
        let span = info_span!("conn", conn_id, seed = tracing::field::Empty);
        handle_socket(socket, settings).instrument(span)
    })
}

async fn handle_socket(mut socket: WebSocket, settings: SessionSettings) {
    let seed = session_seed(settings.fixed_seed);
    tracing::Span::current().record("seed", seed);

    // Every connection owns exactly one duel; dropping `session` ends it.
    // Startup already validates the configured tuning, so the error arm only
    // fires for settings built outside `run_with_config`.
    let session = match DuelSession::start(&settings, seed) {
        Ok(session) => session,
        Err(err) => {
            warn!(error = %err, "duel setup failed; sending fallback");
            let notice = ServerMessage::Fallback(FallbackDto::from(&err));
            if let Err(e) = send_message(&mut socket, &notice).await {
                debug!(error = ?e, "failed to send fallback notice");
            }
            let _ = send_close_with_reason(&mut socket, close_code::ERROR, "setup failed").await;
            return;
        }
    };
    info!("client connected");

    let mut ctx = ConnCtx::new(session.command_tx.clone(), session.frames());
    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }

    info!(
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        bytes_in = ctx.bytes_in,
        bytes_out = ctx.bytes_out,
        invalid_messages = ctx.invalid_messages,
        dropped_commands = ctx.dropped_commands,
        "client disconnected"
    );
}

struct ConnCtx {
    command_tx: mpsc::Sender<Command>,
    frames: watch::Receiver<FrameUpdate>,

    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,

    invalid_messages: u64,
    dropped_commands: u64,

    last_invalid_log: Instant,
    last_full_log: Instant,

    close_frame: Option<CloseFrame>,
}

impl ConnCtx {
    fn new(command_tx: mpsc::Sender<Command>, frames: watch::Receiver<FrameUpdate>) -> Self {
        let now = Instant::now() - LOG_THROTTLE;
        Self {
            command_tx,
            frames,
            msgs_in: 0,
            msgs_out: 0,
            bytes_in: 0,
            bytes_out: 0,
            invalid_messages: 0,
            dropped_commands: 0,
            last_invalid_log: now,
            last_full_log: now,
            close_frame: None,
        }
    }
}

enum LoopControl {
    Continue,
    Disconnect,
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

async fn send_close_with_reason(
    socket: &mut WebSocket,
    code: u16,
    reason: &'static str,
) -> Result<(), NetError> {
    socket
        .send(Message::Close(Some(CloseFrame {
            code,
            reason: reason.into(),
        })))
        .await
        .map_err(NetError::Ws)
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

/// Parses one text frame into a duel command, rejecting non-finite deltas.
fn decode_command(text: &str) -> Result<Command, DecodeError> {
    let msg = serde_json::from_str::<ClientMessage>(text).map_err(DecodeError::Malformed)?;
    let command = Command::from(msg);
    match command {
        Command::AdjustAngle(delta) | Command::AdjustPower(delta) if !delta.is_finite() => {
            Err(DecodeError::NonFinite)
        }
        _ => Ok(command),
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    // The first frame goes out immediately, before the next tick.
    ctx.frames.mark_changed();
    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect: bool = tokio::select! {
            // Incoming Message from Client
            incoming = socket.recv() => {
                match handle_incoming_ws(incoming, ctx) {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            // Outgoing Frame
            changed = ctx.frames.changed() => {
                match changed {
                    Ok(()) => match forward_frame(socket, ctx).await {
                        LoopControl::Continue => false,
                        LoopControl::Disconnect => true,
                    },
                    Err(_) => {
                        fatal = Some(NetError::FramesClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = ctx.close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            break;
        }
    }

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    ctx: &mut ConnCtx,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                ctx.msgs_in += 1;
                ctx.bytes_in += text.len() as u64;

                let command = match decode_command(&text) {
                    Ok(command) => command,
                    Err(err) => {
                        // Bad input is dropped; the connection stays open.
                        ctx.invalid_messages += 1;
                        if should_log(&mut ctx.last_invalid_log) {
                            warn!(
                                bytes = text.len(),
                                error = ?err,
                                count = ctx.invalid_messages,
                                "dropping invalid client message"
                            );
                        }
                        return Ok(LoopControl::Continue);
                    }
                };

                match ctx.command_tx.try_send(command) {
                    Ok(()) => Ok(LoopControl::Continue),
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        ctx.dropped_commands += 1;
                        if should_log(&mut ctx.last_full_log) {
                            warn!("command channel full; dropping command");
                        }
                        Ok(LoopControl::Continue)
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => Err(NetError::CommandsClosed),
                }
            }
            Message::Binary(_) => {
                ctx.close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                Ok(LoopControl::Disconnect)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!("websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

async fn forward_frame(socket: &mut WebSocket, ctx: &mut ConnCtx) -> LoopControl {
    // Serialize from the latest frame only; the watch guard is released before sending.
    let msg = ServerMessage::Frame(FrameDto::from(&*ctx.frames.borrow_and_update()));
    match send_message(socket, &msg).await {
        Ok(bytes) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += bytes as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            debug!(error = ?err, "failed to send frame");
            LoopControl::Disconnect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_commands_decode() {
        let command = decode_command(r#"{"type":"AdjustAngle","data":{"delta":2}}"#).unwrap();
        assert_eq!(command, Command::AdjustAngle(2.0));

        let command = decode_command(r#"{"type":"Fire"}"#).unwrap();
        assert_eq!(command, Command::Fire);
    }

    #[test]
    fn overflowing_deltas_are_rejected_as_non_finite() {
        let err = decode_command(r#"{"type":"AdjustPower","data":{"delta":1e300}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NonFinite));
    }

    #[test]
    fn garbage_is_reported_as_malformed() {
        let err = decode_command("not json").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));

        let err = decode_command(r#"{"type":"Dance"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
