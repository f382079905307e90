use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::contact::ContactRequest,
    error::AppResult,
    models::ContactMessage,
    response::ApiResponse,
    services::contact_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_contact))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message received", body = ApiResponse<ContactMessage>),
        (status = 400, description = "Missing required fields")
    ),
    tag = "Contact"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    let resp = contact_service::submit(&state, payload).await?;
    Ok(Json(resp))
}
