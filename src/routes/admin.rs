use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        contact::{ContactMessageList, UpdateContactRequest},
        currency::UpsertCurrencyRequest,
        delivery::{CreateZoneRequest, UpdateZoneRequest},
        orders::{OrderList, OrderWithItems, UpdateOrderRequest},
        products::{CreateProductRequest, ReviewList, UpdateProductRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{ContactMessage, Currency, DeliveryZone, Product, ProductReview},
    response::ApiResponse,
    routes::params::{OrderListQuery, Pagination},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/{id}", patch(update_product).delete(delete_product))
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}", get(get_order_admin).patch(update_order))
        .route("/reviews/pending", get(list_pending_reviews))
        .route("/reviews/{id}/approve", post(approve_review))
        .route("/delivery-zones", post(create_zone))
        .route("/delivery-zones/{id}", patch(update_zone))
        .route("/currencies", put(upsert_currency))
        .route("/contact-messages", get(list_contact_messages))
        .route("/contact-messages/{id}", patch(update_contact_message))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Invalid price, sale price or stock"),
        (status = 409, description = "Slug already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::create_product(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "List all orders", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = admin_service::get_order_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Statuses or notes updated", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = admin_service::update_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/reviews/pending",
    params(Pagination),
    responses(
        (status = 200, description = "Reviews awaiting moderation", body = ApiResponse<ReviewList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pending_reviews(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = admin_service::list_pending_reviews(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/reviews/{id}/approve",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review approved", body = ApiResponse<ProductReview>),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductReview>>> {
    let resp = admin_service::approve_review(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/delivery-zones",
    request_body = CreateZoneRequest,
    responses(
        (status = 200, description = "Zone created", body = ApiResponse<DeliveryZone>),
        (status = 400, description = "Negative fee or bad estimate")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_zone(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateZoneRequest>,
) -> AppResult<Json<ApiResponse<DeliveryZone>>> {
    let resp = admin_service::create_zone(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/delivery-zones/{id}",
    params(("id" = Uuid, Path, description = "Delivery zone id")),
    request_body = UpdateZoneRequest,
    responses(
        (status = 200, description = "Zone updated", body = ApiResponse<DeliveryZone>),
        (status = 404, description = "Zone not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_zone(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateZoneRequest>,
) -> AppResult<Json<ApiResponse<DeliveryZone>>> {
    let resp = admin_service::update_zone(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/currencies",
    request_body = UpsertCurrencyRequest,
    responses(
        (status = 200, description = "Currency created or updated", body = ApiResponse<Currency>),
        (status = 400, description = "Bad code or non-positive rate")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upsert_currency(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpsertCurrencyRequest>,
) -> AppResult<Json<ApiResponse<Currency>>> {
    let resp = admin_service::upsert_currency(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/contact-messages",
    params(Pagination),
    responses(
        (status = 200, description = "Contact messages, newest first", body = ApiResponse<ContactMessageList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_contact_messages(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ContactMessageList>>> {
    let resp = admin_service::list_contact_messages(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/contact-messages/{id}",
    params(("id" = Uuid, Path, description = "Contact message id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Flags updated", body = ApiResponse<ContactMessage>),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_contact_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactRequest>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    let resp = admin_service::update_contact_message(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
