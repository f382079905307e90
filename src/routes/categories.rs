use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::products::CategoryPage,
    error::AppResult,
    models::Category,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{slug}", get(get_category))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Active categories", body = ApiResponse<Vec<Category>>)
    ),
    tag = "Products"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let resp = product_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(("slug" = String, Path, description = "Category slug"), ProductQuery),
    responses(
        (status = 200, description = "Category with its available products", body = ApiResponse<CategoryPage>),
        (status = 404, description = "Category not found")
    ),
    tag = "Products"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    let resp = product_service::category_detail(&state, &slug, query).await?;
    Ok(Json(resp))
}
