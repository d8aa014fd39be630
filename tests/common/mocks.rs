#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chat_service::domain::{
    Conversation, ConversationSummary, Message, NewMessage, OfferUpdate,
};
use chat_service::error::{AppError, AppResult};
use chat_service::infrastructure::queue::{NotificationPublisher, OfferNotification};
use chat_service::infrastructure::realtime::{ChatEvent, RealtimeEmitter};
use chat_service::infrastructure::repositories::{ConversationRepository, MessageRepository};
use chrono::{DateTime, Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

fn unavailable(service: &str) -> AppError {
    AppError::ServiceUnavailable {
        service: service.to_string(),
        message: format!("{service} is down"),
    }
}

#[derive(Default)]
pub struct MockConversationRepo {
    pub conversations: Mutex<Vec<Conversation>>,
}

#[async_trait]
impl ConversationRepository for MockConversationRepo {
    async fn create(
        &self,
        conversation_id: &str,
        sender: &str,
        receiver: &str,
    ) -> AppResult<Conversation> {
        let conversation = Conversation {
            id: Uuid::new_v4(),
            conversation_id: conversation_id.to_string(),
            sender_username: sender.to_string(),
            receiver_username: receiver.to_string(),
            created_at: Utc::now(),
        };
        self.conversations
            .lock()
            .expect("conversations mutex poisoned")
            .push(conversation.clone());
        Ok(conversation)
    }

    async fn find_by_pair(&self, sender: &str, receiver: &str) -> AppResult<Vec<Conversation>> {
        Ok(self
            .conversations
            .lock()
            .expect("conversations mutex poisoned")
            .iter()
            .filter(|c| {
                (c.sender_username == sender && c.receiver_username == receiver)
                    || (c.sender_username == receiver && c.receiver_username == sender)
            })
            .cloned()
            .collect())
    }
}

/// In-memory message store. Assigned timestamps are strictly increasing so
/// ordering assertions are deterministic.
pub struct MockMessageRepo {
    pub messages: Mutex<Vec<Message>>,
    pub fail_create: AtomicBool,
    base: DateTime<Utc>,
    counter: Mutex<i64>,
}

impl Default for MockMessageRepo {
    fn default() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
            base: Utc::now(),
            counter: Mutex::new(0),
        }
    }
}

impl MockMessageRepo {
    fn next_created_at(&self) -> DateTime<Utc> {
        let mut counter = self.counter.lock().expect("counter mutex poisoned");
        *counter += 1;
        self.base + Duration::seconds(*counter)
    }

    pub fn message(&self, id: Uuid) -> Option<Message> {
        self.messages
            .lock()
            .expect("messages mutex poisoned")
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepo {
    async fn create(&self, message: &NewMessage) -> AppResult<Message> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(unavailable("database"));
        }

        let created = Message {
            id: Uuid::new_v4(),
            conversation_id: message.conversation_id.clone(),
            sender_username: message.sender_username.clone(),
            sender_picture: message.sender_picture.clone(),
            receiver_username: message.receiver_username.clone(),
            receiver_picture: message.receiver_picture.clone(),
            body: message.body.clone(),
            file: message.file.clone(),
            gig_id: message.gig_id.clone(),
            seller_id: message.seller_id.clone(),
            buyer_id: message.buyer_id.clone(),
            has_offer: message.has_offer,
            offer: message.offer.clone().map(Json),
            is_read: false,
            created_at: self.next_created_at(),
        };
        self.messages
            .lock()
            .expect("messages mutex poisoned")
            .push(created.clone());
        Ok(created)
    }

    async fn find_by_pair(&self, sender: &str, receiver: &str) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .expect("messages mutex poisoned")
            .iter()
            .filter(|m| {
                (m.sender_username == sender && m.receiver_username == receiver)
                    || (m.sender_username == receiver && m.receiver_username == sender)
            })
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn find_by_conversation(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .expect("messages mutex poisoned")
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        Ok(self.message(message_id))
    }

    async fn latest_per_conversation(
        &self,
        username: &str,
    ) -> AppResult<Vec<ConversationSummary>> {
        let messages = self.messages.lock().expect("messages mutex poisoned");
        let mut latest: HashMap<String, Message> = HashMap::new();
        for message in messages
            .iter()
            .filter(|m| m.sender_username == username || m.receiver_username == username)
        {
            match latest.get(&message.conversation_id) {
                Some(current) if current.created_at >= message.created_at => {}
                _ => {
                    latest.insert(message.conversation_id.clone(), message.clone());
                }
            }
        }

        Ok(latest
            .into_values()
            .map(|m| ConversationSummary {
                id: m.id,
                conversation_id: m.conversation_id,
                seller_id: m.seller_id,
                buyer_id: m.buyer_id,
                receiver_username: m.receiver_username,
                receiver_picture: m.receiver_picture,
                sender_username: m.sender_username,
                sender_picture: m.sender_picture,
                body: m.body,
                file: m.file,
                gig_id: m.gig_id,
                is_read: m.is_read,
                has_offer: m.has_offer,
                created_at: m.created_at,
            })
            .collect())
    }

    async fn set_offer_flag(
        &self,
        message_id: Uuid,
        update: OfferUpdate,
    ) -> AppResult<Option<Message>> {
        let mut messages = self.messages.lock().expect("messages mutex poisoned");
        let Some(message) = messages.iter_mut().find(|m| m.id == message_id) else {
            return Ok(None);
        };
        if let Some(offer) = message.offer.as_mut() {
            match update {
                OfferUpdate::Accepted => offer.0.accepted = true,
                OfferUpdate::Cancelled => offer.0.cancelled = true,
            }
        }
        Ok(Some(message.clone()))
    }

    async fn mark_read(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        let mut messages = self.messages.lock().expect("messages mutex poisoned");
        let Some(message) = messages.iter_mut().find(|m| m.id == message_id) else {
            return Ok(None);
        };
        message.is_read = true;
        Ok(Some(message.clone()))
    }

    async fn mark_direction_read(&self, sender: &str, receiver: &str) -> AppResult<u64> {
        let mut messages = self.messages.lock().expect("messages mutex poisoned");
        let mut updated = 0;
        for message in messages.iter_mut().filter(|m| {
            m.sender_username == sender && m.receiver_username == receiver && !m.is_read
        }) {
            message.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[derive(Default)]
pub struct MockNotificationPublisher {
    pub published: Mutex<Vec<OfferNotification>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl NotificationPublisher for MockNotificationPublisher {
    async fn publish_offer(&self, notification: &OfferNotification) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(unavailable("notification-queue"));
        }
        self.published
            .lock()
            .expect("published mutex poisoned")
            .push(notification.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRealtimeEmitter {
    pub events: Mutex<Vec<ChatEvent>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl RealtimeEmitter for MockRealtimeEmitter {
    async fn emit(&self, event: ChatEvent) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(unavailable("realtime"));
        }
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(event);
        Ok(())
    }
}
