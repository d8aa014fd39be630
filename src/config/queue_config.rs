use serde::Deserialize;

/// Destination for offer notifications. The exchange name doubles as the
/// stream key and the routing key travels as an entry field, so downstream
/// consumers keep the names they already bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueConfig {
    pub url: String,
    #[serde(default = "crate::config::defaults::default_queue_exchange")]
    pub exchange: String,
    #[serde(default = "crate::config::defaults::default_queue_routing_key")]
    pub routing_key: String,
}
