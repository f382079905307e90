use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::delivery::{FeeQuery, FeeQuote, SelectZoneRequest, ZoneList},
    error::AppResult,
    middleware::session::SessionKey,
    models::DeliveryQuote,
    response::ApiResponse,
    services::delivery_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/zones", get(list_zones))
        .route("/zones/{zone_id}/fee", get(zone_fee))
        .route("/select", post(select_zone))
}

#[utoipa::path(
    get,
    path = "/api/delivery/zones",
    responses(
        (status = 200, description = "Active delivery zones", body = ApiResponse<ZoneList>)
    ),
    tag = "Delivery"
)]
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ZoneList>>> {
    let resp = delivery_service::list_zones(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/delivery/select",
    request_body = SelectZoneRequest,
    responses(
        (status = 200, description = "Zone stored; quote for the current cart", body = ApiResponse<DeliveryQuote>),
        (status = 404, description = "Unknown or inactive zone")
    ),
    tag = "Delivery"
)]
pub async fn select_zone(
    State(state): State<AppState>,
    session: SessionKey,
    Json(payload): Json<SelectZoneRequest>,
) -> AppResult<Json<ApiResponse<DeliveryQuote>>> {
    let resp = delivery_service::select_zone(&state, &session, payload.zone_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/delivery/zones/{zone_id}/fee",
    params(
        ("zone_id" = Uuid, Path, description = "Delivery zone id"),
        ("subtotal" = String, Query, description = "Order subtotal in the base currency"),
        ("weight_kg" = Option<String>, Query, description = "Parcel weight, default 0")
    ),
    responses(
        (status = 200, description = "Delivery fee", body = ApiResponse<FeeQuote>),
        (status = 404, description = "Unknown or inactive zone")
    ),
    tag = "Delivery"
)]
pub async fn zone_fee(
    State(state): State<AppState>,
    Path(zone_id): Path<Uuid>,
    Query(query): Query<FeeQuery>,
) -> AppResult<Json<ApiResponse<FeeQuote>>> {
    let resp = delivery_service::quote_fee(&state, zone_id, query).await?;
    Ok(Json(resp))
}
