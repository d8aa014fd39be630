use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{CreateConversationRequest, CreateMessageRequest};
use crate::domain::{
    Conversation, ConversationSummary, Message, NewMessage, OfferUpdate,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::queue::{NotificationPublisher, OfferNotification};
use crate::infrastructure::realtime::{ChatEvent, RealtimeEmitter};
use crate::infrastructure::repositories::{ConversationRepository, MessageRepository};

/// Stateless orchestrator over the two stores and the two fan-out channels.
/// Every operation is persist-first: fan-out is attempted only after the
/// store write commits, and a fan-out failure never unwinds the write.
#[derive(Clone)]
pub struct MessageService {
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    notifications: Arc<dyn NotificationPublisher>,
    realtime: Arc<dyn RealtimeEmitter>,
}

impl MessageService {
    pub fn new(
        conversation_repo: Arc<dyn ConversationRepository>,
        message_repo: Arc<dyn MessageRepository>,
        notifications: Arc<dyn NotificationPublisher>,
        realtime: Arc<dyn RealtimeEmitter>,
    ) -> Self {
        Self {
            conversation_repo,
            message_repo,
            notifications,
            realtime,
        }
    }

    pub async fn create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> AppResult<Conversation> {
        request.validate()?;
        self.conversation_repo
            .create(
                &request.conversation_id,
                &request.sender_username,
                &request.receiver_username,
            )
            .await
    }

    pub async fn get_conversation(
        &self,
        sender: &str,
        receiver: &str,
    ) -> AppResult<Vec<Conversation>> {
        self.conversation_repo.find_by_pair(sender, receiver).await
    }

    pub async fn add_message(&self, request: CreateMessageRequest) -> AppResult<Message> {
        request.validate()?;
        if request.has_offer != request.offer.is_some() {
            return Err(AppError::validation_error(
                "an offer must be present exactly when has_offer is set",
            ));
        }

        let new_message = NewMessage {
            conversation_id: request.conversation_id,
            sender_username: request.sender_username,
            sender_picture: request.sender_picture,
            receiver_username: request.receiver_username,
            receiver_picture: request.receiver_picture,
            body: request.body,
            file: request.file,
            gig_id: request.gig_id,
            seller_id: request.seller_id,
            buyer_id: request.buyer_id,
            has_offer: request.has_offer,
            offer: request.offer.map(Into::into),
        };

        let message = self.message_repo.create(&new_message).await?;

        if message.has_offer {
            if let Some(offer) = message.offer.as_deref() {
                let notification = OfferNotification {
                    sender: message.sender_username.clone(),
                    amount: offer.price.to_string(),
                    buyer_username: message.receiver_username.to_lowercase(),
                    seller_username: message.sender_username.to_lowercase(),
                    title: offer.gig_title.clone(),
                    description: offer.description.clone(),
                    delivery_days: offer.delivery_in_days.to_string(),
                    template: "offer".to_string(),
                };
                if let Err(error) = self.notifications.publish_offer(&notification).await {
                    warn!(
                        message_id = %message.id,
                        error = %error,
                        "offer notification dispatch failed"
                    );
                }
            }
        }

        self.emit(ChatEvent::MessageReceived(message.clone())).await;
        Ok(message)
    }

    pub async fn get_user_conversation_list(
        &self,
        username: &str,
    ) -> AppResult<Vec<ConversationSummary>> {
        self.message_repo.latest_per_conversation(username).await
    }

    pub async fn get_messages(&self, sender: &str, receiver: &str) -> AppResult<Vec<Message>> {
        self.message_repo.find_by_pair(sender, receiver).await
    }

    pub async fn get_user_messages(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        self.message_repo.find_by_conversation(conversation_id).await
    }

    /// Store mutation only; this operation deliberately emits no event.
    pub async fn update_offer(
        &self,
        message_id: Uuid,
        update: OfferUpdate,
    ) -> AppResult<Message> {
        self.message_repo
            .set_offer_flag(message_id, update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("message {message_id} not found")))
    }

    pub async fn mark_message_as_read(&self, message_id: Uuid) -> AppResult<Message> {
        let message = self
            .message_repo
            .mark_read(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("message {message_id} not found")))?;

        self.emit(ChatEvent::MessageUpdated(message.clone())).await;
        Ok(message)
    }

    /// Marks every unread `sender → receiver` message read (the reverse
    /// direction is untouched), then returns the addressed message and
    /// pushes it as the single update event.
    pub async fn mark_many_messages_as_read(
        &self,
        receiver: &str,
        sender: &str,
        message_id: Uuid,
    ) -> AppResult<Message> {
        self.message_repo
            .mark_direction_read(sender, receiver)
            .await?;

        let message = self
            .message_repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("message {message_id} not found")))?;

        self.emit(ChatEvent::MessageUpdated(message.clone())).await;
        Ok(message)
    }

    async fn emit(&self, event: ChatEvent) {
        if let Err(error) = self.realtime.emit(event).await {
            warn!(error = %error, "realtime emit failed");
        }
    }
}
