use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, OrderWithItems},
    error::AppResult,
    middleware::{auth::AuthUser, session::SessionKey},
    models::OrderTracking,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/track/{order_number}", get(track_order))
        .route("/{order_number}/confirmation", get(order_confirmation))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed from the session cart", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Empty cart, missing fields or invalid delivery zone")
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: SessionKey,
    user: Option<AuthUser>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::place_order(&state, &session, user.as_ref(), payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{order_number}/confirmation",
    params(("order_number" = String, Path, description = "Order number, e.g. SH48213907")),
    responses(
        (status = 200, description = "Order placed by this session", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Unknown order or placed by another session")
    ),
    tag = "Orders"
)]
pub async fn order_confirmation(
    State(state): State<AppState>,
    session: SessionKey,
    Path(order_number): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::confirmation(&state, &session, &order_number).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/track/{order_number}",
    params(("order_number" = String, Path, description = "Order number")),
    responses(
        (status = 200, description = "Order status", body = ApiResponse<OrderTracking>),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn track_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<ApiResponse<OrderTracking>>> {
    let resp = order_service::track(&state, &order_number).await?;
    Ok(Json(resp))
}
