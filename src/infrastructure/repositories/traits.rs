use crate::domain::{Conversation, ConversationSummary, Message, NewMessage, OfferUpdate};
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Inserts unconditionally; duplicate records for the same pair are
    /// allowed (no existence check on the creation path).
    async fn create(
        &self,
        conversation_id: &str,
        sender: &str,
        receiver: &str,
    ) -> AppResult<Conversation>;

    /// Pair lookup is symmetric: (A,B) and (B,A) address the same thread.
    async fn find_by_pair(&self, sender: &str, receiver: &str) -> AppResult<Vec<Conversation>>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &NewMessage) -> AppResult<Message>;

    /// All messages between the unordered pair, oldest first.
    async fn find_by_pair(&self, sender: &str, receiver: &str) -> AppResult<Vec<Message>>;

    /// All messages of one conversation, oldest first.
    async fn find_by_conversation(&self, conversation_id: &str) -> AppResult<Vec<Message>>;

    async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>>;

    /// One summary per conversation the user participates in, each the
    /// message with the greatest `created_at` in its group. Order across
    /// groups is unspecified.
    async fn latest_per_conversation(&self, username: &str)
        -> AppResult<Vec<ConversationSummary>>;

    /// Sets exactly `offer.<flag> = true` on the addressed message, leaving
    /// every sibling field untouched. `None` when no message matches.
    async fn set_offer_flag(
        &self,
        message_id: Uuid,
        update: OfferUpdate,
    ) -> AppResult<Option<Message>>;

    /// `None` when no message matches.
    async fn mark_read(&self, message_id: Uuid) -> AppResult<Option<Message>>;

    /// Marks every unread message sent by `sender` to `receiver` as read;
    /// the reverse direction is untouched. Returns the number of rows
    /// updated.
    async fn mark_direction_read(&self, sender: &str, receiver: &str) -> AppResult<u64>;
}
