use super::traits::ConversationRepository;
use crate::domain::Conversation;
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct ConversationRepositoryImpl {
    pool: PgPool,
}

impl ConversationRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for ConversationRepositoryImpl {
    async fn create(
        &self,
        conversation_id: &str,
        sender: &str,
        receiver: &str,
    ) -> AppResult<Conversation> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (conversation_id, sender_username, receiver_username)
            VALUES ($1, $2, $3)
            RETURNING id, conversation_id, sender_username, receiver_username, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(sender)
        .bind(receiver)
        .fetch_one(&self.pool)
        .await?;
        Ok(conversation)
    }

    async fn find_by_pair(&self, sender: &str, receiver: &str) -> AppResult<Vec<Conversation>> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, conversation_id, sender_username, receiver_username, created_at
            FROM conversations
            WHERE (sender_username = $1 AND receiver_username = $2)
               OR (sender_username = $2 AND receiver_username = $1)
            "#,
        )
        .bind(sender)
        .bind(receiver)
        .fetch_all(&self.pool)
        .await?;
        Ok(conversations)
    }
}
