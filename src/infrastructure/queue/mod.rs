mod publisher;

pub use publisher::{NotificationPublisher, OfferNotification, RedisNotificationPublisher};
