use std::time::Duration;

use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};

#[derive(Deserialize)]
struct ConnectQuery {
    username: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(ws_upgrade));
}

/// Push-only channel: clients subscribe with their username and receive
/// `message received` / `message updated` envelopes. No client commands are
/// accepted besides ping.
async fn ws_upgrade(
    request: HttpRequest,
    payload: web::Payload,
    query: web::Query<ConnectQuery>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let username = query.into_inner().username;
    if username.trim().is_empty() {
        return Err(AppError::BadRequest("username is required".to_string()));
    }

    let (response, session, stream) = actix_ws::handle(&request, payload)
        .map_err(|_| AppError::BadRequest("invalid websocket upgrade".to_string()))?;

    let hub = state.hub.clone();
    let outbound_rx = hub.register(&username);
    actix_web::rt::spawn(async move {
        let _ = ws_loop(session, stream, outbound_rx).await;
        hub.prune_user(&username);
    });

    Ok(response)
}

async fn ws_loop(
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
) -> AppResult<()> {
    let heartbeat_interval = Duration::from_secs(30);
    let heartbeat_timeout = Duration::from_secs(90);
    let mut heartbeat = tokio::time::interval(heartbeat_interval);
    let mut last_seen = tokio::time::Instant::now();

    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                if last_seen.elapsed() > heartbeat_timeout {
                    let _ = session.close(None).await;
                    break;
                }
                if session.ping(b"ping").await.is_err() {
                    break;
                }
            }
            maybe_message = stream.next() => {
                let Some(Ok(message)) = maybe_message else {
                    break;
                };

                match message {
                    actix_ws::Message::Ping(bytes) => {
                        last_seen = tokio::time::Instant::now();
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    actix_ws::Message::Pong(_) => {
                        last_seen = tokio::time::Instant::now();
                    }
                    actix_ws::Message::Text(_) | actix_ws::Message::Binary(_) => {
                        last_seen = tokio::time::Instant::now();
                        let payload =
                            json!({ "event": "error", "data": { "code": "UNSUPPORTED_TYPE" } });
                        if session.text(payload.to_string()).await.is_err() {
                            break;
                        }
                    }
                    actix_ws::Message::Close(reason) => {
                        let _ = session.close(reason).await;
                        break;
                    }
                    _ => {}
                }
            }
            maybe_outbound = outbound_rx.recv() => {
                let Some(payload) = maybe_outbound else {
                    break;
                };
                if session.text(payload).await.is_err() {
                    break;
                }
            }
        }
    }

    Ok(())
}
