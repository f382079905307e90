use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::wishlist::WishlistCount,
    error::AppResult,
    middleware::session::SessionKey,
    models::{Wishlist, WishlistToggle},
    response::ApiResponse,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist))
        .route("/count", get(wishlist_count))
        .route("/toggle/{product_id}", post(toggle_wishlist))
        .route("/{product_id}", delete(remove_from_wishlist))
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Wishlist products", body = ApiResponse<Wishlist>)
    ),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    session: SessionKey,
) -> AppResult<Json<ApiResponse<Wishlist>>> {
    let resp = wishlist_service::list_wishlist(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/wishlist/count",
    responses(
        (status = 200, description = "Number of wishlist products", body = ApiResponse<WishlistCount>)
    ),
    tag = "Wishlist"
)]
pub async fn wishlist_count(
    State(state): State<AppState>,
    session: SessionKey,
) -> AppResult<Json<ApiResponse<WishlistCount>>> {
    let resp = wishlist_service::wishlist_count(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/toggle/{product_id}",
    params(("product_id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Added or removed", body = ApiResponse<WishlistToggle>),
        (status = 404, description = "Product not found")
    ),
    tag = "Wishlist"
)]
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    session: SessionKey,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<WishlistToggle>>> {
    let resp = wishlist_service::toggle(&state, &session, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    params(("product_id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Removed if present", body = ApiResponse<WishlistCount>)
    ),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    session: SessionKey,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<WishlistCount>>> {
    let resp = wishlist_service::remove(&state, &session, product_id).await?;
    Ok(Json(resp))
}
