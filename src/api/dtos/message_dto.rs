use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Offer;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateConversationRequest {
    #[validate(length(min = 1, message = "conversation_id is required"))]
    pub conversation_id: String,
    #[validate(length(min = 1, message = "sender_username is required"))]
    pub sender_username: String,
    #[validate(length(min = 1, message = "receiver_username is required"))]
    pub receiver_username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, message = "conversation_id is required"))]
    pub conversation_id: String,
    #[validate(length(min = 1, message = "sender_username is required"))]
    pub sender_username: String,
    #[serde(default)]
    pub sender_picture: String,
    #[validate(length(min = 1, message = "receiver_username is required"))]
    pub receiver_username: String,
    #[serde(default)]
    pub receiver_picture: String,
    #[validate(length(max = 5000))]
    pub body: Option<String>,
    pub file: Option<String>,
    #[serde(default)]
    pub gig_id: String,
    #[serde(default)]
    pub seller_id: String,
    #[serde(default)]
    pub buyer_id: String,
    #[serde(default)]
    pub has_offer: bool,
    #[validate(nested)]
    pub offer: Option<OfferPayload>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OfferPayload {
    pub price: Decimal,
    #[validate(length(min = 1, message = "gig_title is required"))]
    pub gig_title: String,
    pub description: String,
    #[validate(range(min = 1, message = "delivery_in_days must be positive"))]
    pub delivery_in_days: i32,
}

impl From<OfferPayload> for Offer {
    fn from(payload: OfferPayload) -> Self {
        Offer {
            price: payload.price,
            gig_title: payload.gig_title,
            description: payload.description,
            delivery_in_days: payload.delivery_in_days,
            accepted: false,
            cancelled: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOfferRequest {
    pub message_id: Uuid,
    #[serde(rename = "type")]
    pub update_type: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub message_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MarkManyReadRequest {
    pub sender_username: String,
    pub receiver_username: String,
    pub message_id: Uuid,
}
