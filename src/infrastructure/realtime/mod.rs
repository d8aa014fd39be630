mod hub;

pub use hub::ChatHub;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Message;
use crate::error::AppResult;

/// Push event fanned out to connected clients after a write commits.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    MessageReceived(Message),
    MessageUpdated(Message),
}

impl ChatEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChatEvent::MessageReceived(_) => "message received",
            ChatEvent::MessageUpdated(_) => "message updated",
        }
    }

    pub fn message(&self) -> &Message {
        match self {
            ChatEvent::MessageReceived(message) | ChatEvent::MessageUpdated(message) => message,
        }
    }

    pub fn to_payload(&self) -> String {
        json!({ "event": self.name(), "data": self.message() }).to_string()
    }
}

#[async_trait]
pub trait RealtimeEmitter: Send + Sync {
    /// Best-effort delivery: no acknowledgment, no retry, no persistence of
    /// missed events.
    async fn emit(&self, event: ChatEvent) -> AppResult<()>;
}

/// Emitter backed by the in-process connection hub. Events reach the two
/// participants of the message; everyone else is not an interested listener.
pub struct HubRealtimeEmitter {
    hub: ChatHub,
}

impl HubRealtimeEmitter {
    pub fn new(hub: ChatHub) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl RealtimeEmitter for HubRealtimeEmitter {
    async fn emit(&self, event: ChatEvent) -> AppResult<()> {
        let message = event.message();
        let recipients = [
            message.sender_username.clone(),
            message.receiver_username.clone(),
        ];
        self.hub.broadcast_to_users(&recipients, &event.to_payload());
        Ok(())
    }
}
