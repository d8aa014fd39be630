use std::sync::Arc;

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::application::MessageService;
use crate::error::{AppError, AppResult};
use crate::infrastructure::realtime::ChatHub;

pub mod messages;
pub mod ws;

#[derive(Clone)]
pub struct AppState {
    pub message_service: Arc<MessageService>,
    pub hub: ChatHub,
    pub db_pool: PgPool,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/message").configure(messages::configure))
        .configure(ws::configure)
        .route("/health", web::get().to(health))
        .route("/ready", web::get().to(ready));
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check passed")
    ),
    tag = "health"
)]
async fn health() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Readiness check passed"),
        (status = 503, description = "Service not ready"),
    ),
    tag = "health"
)]
async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .map_err(|e| AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: format!("Service not ready: {e}"),
        })?;
    Ok(HttpResponse::Ok().body("ready"))
}
