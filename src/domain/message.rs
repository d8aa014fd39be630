use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Marker that two usernames have an ongoing thread. `conversation_id` is
/// caller-supplied and deliberately carries no uniqueness constraint; the
/// surrogate `id` is store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    pub id: Uuid,
    pub conversation_id: String,
    pub sender_username: String,
    pub receiver_username: String,
    pub created_at: DateTime<Utc>,
}

/// Priced proposal embedded in a message. `accepted` and `cancelled` are
/// independent flags with no mutual-exclusion guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub price: Decimal,
    pub gig_title: String,
    pub description: String,
    pub delivery_in_days: i32,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: String,
    pub sender_username: String,
    pub sender_picture: String,
    pub receiver_username: String,
    pub receiver_picture: String,
    pub body: Option<String>,
    pub file: Option<String>,
    pub gig_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub has_offer: bool,
    pub offer: Option<Json<Offer>>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields of a message as handed to the store; `id` and `created_at` are
/// assigned on insert.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_id: String,
    pub sender_username: String,
    pub sender_picture: String,
    pub receiver_username: String,
    pub receiver_picture: String,
    pub body: Option<String>,
    pub file: Option<String>,
    pub gig_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub has_offer: bool,
    pub offer: Option<Offer>,
}

/// Projection returned by the latest-message-per-conversation aggregation.
/// Field set is fixed by the gateway contract; note the offer sub-entity is
/// not part of it, only the `has_offer` flag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub conversation_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub receiver_username: String,
    pub receiver_picture: String,
    pub sender_username: String,
    pub sender_picture: String,
    pub body: Option<String>,
    pub file: Option<String>,
    pub gig_id: String,
    pub is_read: bool,
    pub has_offer: bool,
    pub created_at: DateTime<Utc>,
}

/// Which offer flag an update targets. Exactly one flag is written per
/// update; the sibling flag is never read or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferUpdate {
    Accepted,
    Cancelled,
}

impl OfferUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            OfferUpdate::Accepted => "accepted",
            OfferUpdate::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OfferUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for OfferUpdate {
    type Err = super::DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "accepted" => Ok(OfferUpdate::Accepted),
            "cancelled" => Ok(OfferUpdate::Cancelled),
            other => Err(super::DomainError::ValidationError(format!(
                "unknown offer update type: {other}"
            ))),
        }
    }
}
