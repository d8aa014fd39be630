use super::traits::MessageRepository;
use crate::domain::{ConversationSummary, Message, NewMessage, OfferUpdate};
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const MESSAGE_COLUMNS: &str = "id, conversation_id, sender_username, sender_picture, \
     receiver_username, receiver_picture, body, file, gig_id, seller_id, buyer_id, \
     has_offer, offer, is_read, created_at";

pub struct MessageRepositoryImpl {
    pool: PgPool,
}

impl MessageRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for MessageRepositoryImpl {
    async fn create(&self, message: &NewMessage) -> AppResult<Message> {
        let created = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (conversation_id, sender_username, sender_picture,
                receiver_username, receiver_picture, body, file, gig_id, seller_id,
                buyer_id, has_offer, offer)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(&message.conversation_id)
        .bind(&message.sender_username)
        .bind(&message.sender_picture)
        .bind(&message.receiver_username)
        .bind(&message.receiver_picture)
        .bind(&message.body)
        .bind(&message.file)
        .bind(&message.gig_id)
        .bind(&message.seller_id)
        .bind(&message.buyer_id)
        .bind(message.has_offer)
        .bind(message.offer.clone().map(Json))
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_pair(&self, sender: &str, receiver: &str) -> AppResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE (sender_username = $1 AND receiver_username = $2)
               OR (sender_username = $2 AND receiver_username = $1)
            ORDER BY created_at ASC
            "#
        ))
        .bind(sender)
        .bind(receiver)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn find_by_conversation(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    async fn latest_per_conversation(
        &self,
        username: &str,
    ) -> AppResult<Vec<ConversationSummary>> {
        // DISTINCT ON keeps the first row per conversation under the inner
        // sort, i.e. the one with the greatest created_at; equal timestamps
        // fall back to scan order, which is the stable store order callers
        // get from the history queries.
        let summaries = sqlx::query_as::<_, ConversationSummary>(
            r#"
            SELECT DISTINCT ON (conversation_id)
                id, conversation_id, seller_id, buyer_id, receiver_username,
                receiver_picture, sender_username, sender_picture, body, file,
                gig_id, is_read, has_offer, created_at
            FROM messages
            WHERE sender_username = $1 OR receiver_username = $1
            ORDER BY conversation_id, created_at DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }

    async fn set_offer_flag(
        &self,
        message_id: Uuid,
        update: OfferUpdate,
    ) -> AppResult<Option<Message>> {
        // jsonb_set touches exactly the addressed flag; a NULL offer stays
        // NULL, so messages without an offer are returned unchanged.
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            UPDATE messages
            SET offer = jsonb_set(offer, $2, 'true'::jsonb)
            WHERE id = $1
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(message_id)
        .bind(vec![update.field()])
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    async fn mark_read(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE id = $1
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    async fn mark_direction_read(&self, sender: &str, receiver: &str) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE sender_username = $1 AND receiver_username = $2 AND is_read = FALSE
            "#,
        )
        .bind(sender)
        .bind(receiver)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
