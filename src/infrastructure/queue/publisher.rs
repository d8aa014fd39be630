use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::QueueConfig;
use crate::error::{AppError, AppResult};

/// Wire payload consumed by the notification service's offer email template.
/// Key casing and the stringified numeric fields are part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferNotification {
    pub sender: String,
    pub amount: String,
    pub buyer_username: String,
    pub seller_username: String,
    pub title: String,
    pub description: String,
    pub delivery_days: String,
    pub template: String,
}

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish_offer(&self, notification: &OfferNotification) -> AppResult<()>;
}

/// Publishes offer notifications onto a Redis stream. The stream key is the
/// exchange name the notification service already consumes, and the routing
/// key travels as an entry field next to the JSON payload.
pub struct RedisNotificationPublisher {
    client: redis::Client,
    exchange: String,
    routing_key: String,
}

impl RedisNotificationPublisher {
    pub fn new(client: redis::Client, config: &QueueConfig) -> Self {
        Self {
            client,
            exchange: config.exchange.clone(),
            routing_key: config.routing_key.clone(),
        }
    }
}

#[async_trait]
impl NotificationPublisher for RedisNotificationPublisher {
    async fn publish_offer(&self, notification: &OfferNotification) -> AppResult<()> {
        let payload = serde_json::to_string(notification)
            .map_err(|error| AppError::InternalError(error.into()))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _entry_id: String = conn
            .xadd(
                &self.exchange,
                "*",
                &[
                    ("routing_key", self.routing_key.as_str()),
                    ("payload", payload.as_str()),
                ],
            )
            .await?;

        info!(
            exchange = %self.exchange,
            routing_key = %self.routing_key,
            "Order email sent to notification service."
        );
        Ok(())
    }
}
