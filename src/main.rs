use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chat_service::api::routes::{self, AppState};
use chat_service::application::MessageService;
use chat_service::config::AppConfig;
use chat_service::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use chat_service::infrastructure::queue::RedisNotificationPublisher;
use chat_service::infrastructure::realtime::{ChatHub, HubRealtimeEmitter};
use chat_service::infrastructure::repositories::{
    ConversationRepositoryImpl, MessageRepositoryImpl,
};
use chat_service::security::{cors_middleware, security_headers};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("failed to load application configuration");

    let registry = tracing_subscriber::registry().with(EnvFilter::new(config.logging.level.clone()));
    if config.logging.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }

    let pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");

    run_migrations(&pool)
        .await
        .expect("database migrations failed");

    let redis_client =
        redis::Client::open(config.queue.url.clone()).expect("invalid redis queue url");

    let conversation_repo = Arc::new(ConversationRepositoryImpl::new(pool.clone()));
    let message_repo = Arc::new(MessageRepositoryImpl::new(pool.clone()));
    let notifications = Arc::new(RedisNotificationPublisher::new(
        redis_client,
        &config.queue,
    ));

    let hub = ChatHub::default();
    let realtime = Arc::new(HubRealtimeEmitter::new(hub.clone()));

    let state = AppState {
        message_service: Arc::new(MessageService::new(
            conversation_repo,
            message_repo,
            notifications,
            realtime,
        )),
        hub,
        db_pool: pool.clone(),
    };

    let bind_host = config.host.clone();
    let bind_port = config.port;
    let security_config = config.security.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap_fn(move |req, srv| {
                let request_id = Uuid::new_v4().to_string();
                let path = req.path().to_string();
                let method = req.method().to_string();
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    match fut.await {
                        Ok(mut response) => {
                            response.headers_mut().insert(
                                actix_web::http::header::HeaderName::from_static("x-request-id"),
                                actix_web::http::header::HeaderValue::from_str(&request_id)
                                    .unwrap_or_else(|_| {
                                        actix_web::http::header::HeaderValue::from_static(
                                            "invalid-request-id",
                                        )
                                    }),
                            );

                            let status = response.status().as_u16();
                            let latency_ms = start.elapsed().as_millis() as u64;

                            info!(
                                request_id = %request_id,
                                method = %method,
                                path = %path,
                                status = status,
                                latency_ms = latency_ms,
                                "request completed"
                            );

                            Ok(response)
                        }
                        Err(error) => Err(error),
                    }
                }
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
