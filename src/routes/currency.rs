use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::currency::{ConvertQuery, CurrencyList, PriceDisplay, SelectCurrencyRequest},
    error::AppResult,
    middleware::session::SessionKey,
    models::Currency,
    response::ApiResponse,
    services::currency_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_currencies))
        .route("/current", get(current_currency))
        .route("/select", post(select_currency))
        .route("/convert", get(convert_price))
}

#[utoipa::path(
    get,
    path = "/api/currencies",
    responses(
        (status = 200, description = "Active currencies by code", body = ApiResponse<CurrencyList>)
    ),
    tag = "Currency"
)]
pub async fn list_currencies(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CurrencyList>>> {
    let resp = currency_service::list_active(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/currencies/current",
    responses(
        (status = 200, description = "Display currency of this session", body = ApiResponse<Currency>)
    ),
    tag = "Currency"
)]
pub async fn current_currency(
    State(state): State<AppState>,
    session: SessionKey,
) -> AppResult<Json<ApiResponse<Currency>>> {
    let resp = currency_service::current(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/currencies/select",
    request_body = SelectCurrencyRequest,
    responses(
        (status = 200, description = "Display currency changed", body = ApiResponse<Currency>),
        (status = 404, description = "Unknown or inactive currency")
    ),
    tag = "Currency"
)]
pub async fn select_currency(
    State(state): State<AppState>,
    session: SessionKey,
    Json(payload): Json<SelectCurrencyRequest>,
) -> AppResult<Json<ApiResponse<Currency>>> {
    let resp = currency_service::select(&state, &session, &payload.code).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/currencies/convert",
    params(("amount" = String, Query, description = "Amount in the base currency")),
    responses(
        (status = 200, description = "Amount in the session currency", body = ApiResponse<PriceDisplay>)
    ),
    tag = "Currency"
)]
pub async fn convert_price(
    State(state): State<AppState>,
    session: SessionKey,
    Query(query): Query<ConvertQuery>,
) -> AppResult<Json<ApiResponse<PriceDisplay>>> {
    let resp = currency_service::convert(&state, &session, query).await?;
    Ok(Json(resp))
}
