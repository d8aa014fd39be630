#![allow(dead_code)]

use chat_service::api::dtos::{CreateMessageRequest, OfferPayload};
use rust_decimal::Decimal;

pub fn message_request(
    conversation_id: &str,
    sender: &str,
    receiver: &str,
) -> CreateMessageRequest {
    CreateMessageRequest {
        conversation_id: conversation_id.to_string(),
        sender_username: sender.to_string(),
        sender_picture: format!("{sender}.png"),
        receiver_username: receiver.to_string(),
        receiver_picture: format!("{receiver}.png"),
        body: Some("hello".to_string()),
        file: None,
        gig_id: "gig-1".to_string(),
        seller_id: "seller-1".to_string(),
        buyer_id: "buyer-1".to_string(),
        has_offer: false,
        offer: None,
    }
}

pub fn offer_request(
    conversation_id: &str,
    sender: &str,
    receiver: &str,
) -> CreateMessageRequest {
    let mut request = message_request(conversation_id, sender, receiver);
    request.has_offer = true;
    request.offer = Some(logo_offer());
    request
}

pub fn logo_offer() -> OfferPayload {
    OfferPayload {
        price: Decimal::from(100),
        gig_title: "Logo".to_string(),
        description: "Minimal logo design".to_string(),
        delivery_in_days: 3,
    }
}
