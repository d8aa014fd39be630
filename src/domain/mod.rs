pub mod errors;
pub mod message;

pub use errors::DomainError;
pub use message::{
    Conversation, ConversationSummary, Message, NewMessage, Offer, OfferUpdate,
};
