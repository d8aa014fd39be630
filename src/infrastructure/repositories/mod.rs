mod conversation_repository;
mod message_repository;
mod traits;

pub use conversation_repository::ConversationRepositoryImpl;
pub use message_repository::MessageRepositoryImpl;
pub use traits::{ConversationRepository, MessageRepository};
