use actix_web::{web, HttpResponse};

use crate::api::dtos::{
    CreateConversationRequest, CreateMessageRequest, MarkManyReadRequest, MarkReadRequest,
    UpdateOfferRequest,
};
use crate::api::routes::AppState;
use crate::domain::OfferUpdate;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments before the bare {sender}/{receiver} pair so the
    // history route cannot shadow them.
    cfg.route("/conversation", web::post().to(create_conversation))
        .route(
            "/conversation/{sender}/{receiver}",
            web::get().to(get_conversation),
        )
        .route(
            "/conversations/{username}",
            web::get().to(get_conversation_list),
        )
        .route(
            "/userconversation/{conversation_id}",
            web::get().to(get_messages_by_conversation),
        )
        .route("/offer", web::put().to(update_offer))
        .route("/mark-as-read", web::put().to(mark_message_as_read))
        .route(
            "/mark-multiple-as-read",
            web::put().to(mark_many_messages_as_read),
        )
        .route("/{sender}/{receiver}", web::get().to(get_messages))
        .route("", web::post().to(add_message));
}

async fn create_conversation(
    state: web::Data<AppState>,
    payload: web::Json<CreateConversationRequest>,
) -> AppResult<HttpResponse> {
    let conversation = state
        .message_service
        .create_conversation(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(conversation))
}

async fn add_message(
    state: web::Data<AppState>,
    payload: web::Json<CreateMessageRequest>,
) -> AppResult<HttpResponse> {
    let message = state
        .message_service
        .add_message(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(message))
}

async fn get_conversation(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (sender, receiver) = path.into_inner();
    let conversations = state
        .message_service
        .get_conversation(&sender, &receiver)
        .await?;
    Ok(HttpResponse::Ok().json(conversations))
}

async fn get_conversation_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let summaries = state
        .message_service
        .get_user_conversation_list(&username)
        .await?;
    Ok(HttpResponse::Ok().json(summaries))
}

async fn get_messages(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (sender, receiver) = path.into_inner();
    let messages = state
        .message_service
        .get_messages(&sender, &receiver)
        .await?;
    Ok(HttpResponse::Ok().json(messages))
}

async fn get_messages_by_conversation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let conversation_id = path.into_inner();
    let messages = state
        .message_service
        .get_user_messages(&conversation_id)
        .await?;
    Ok(HttpResponse::Ok().json(messages))
}

async fn update_offer(
    state: web::Data<AppState>,
    payload: web::Json<UpdateOfferRequest>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();
    let update: OfferUpdate = request.update_type.parse()?;
    let message = state
        .message_service
        .update_offer(request.message_id, update)
        .await?;
    Ok(HttpResponse::Ok().json(message))
}

async fn mark_message_as_read(
    state: web::Data<AppState>,
    payload: web::Json<MarkReadRequest>,
) -> AppResult<HttpResponse> {
    let message = state
        .message_service
        .mark_message_as_read(payload.message_id)
        .await?;
    Ok(HttpResponse::Ok().json(message))
}

async fn mark_many_messages_as_read(
    state: web::Data<AppState>,
    payload: web::Json<MarkManyReadRequest>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();
    let message = state
        .message_service
        .mark_many_messages_as_read(
            &request.receiver_username,
            &request.sender_username,
            request.message_id,
        )
        .await?;
    Ok(HttpResponse::Ok().json(message))
}
