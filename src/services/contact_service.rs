use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::contact::ContactRequest,
    entity::contact_messages::ActiveModel as ContactActive,
    error::{AppError, AppResult},
    models::ContactMessage,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn submit(state: &AppState, payload: ContactRequest) -> AppResult<ApiResponse<ContactMessage>> {
    let required = [
        &payload.name,
        &payload.email,
        &payload.subject,
        &payload.message,
    ];
    if required.iter().any(|v| v.trim().is_empty()) {
        return Err(AppError::Validation("Please fill in all required fields".into()));
    }

    let message = ContactActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        phone: Set(payload.phone.trim().to_string()),
        subject: Set(payload.subject.trim().to_string()),
        message: Set(payload.message),
        is_read: Set(false),
        is_replied: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(message_id = %message.id, "contact message received");
    if let Err(err) = log_audit(
        &state.orm,
        None,
        None,
        "contact_submit",
        Some("contact_messages"),
        Some(serde_json::json!({ "message_id": message.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Thank you for your message! We will get back to you soon.",
        message.into(),
        Some(Meta::empty()),
    ))
}
