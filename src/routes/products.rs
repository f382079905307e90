use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::products::{
        CustomizationOptions, HomePage, ProductDetail, ProductList, ReviewRequest, SearchResults,
    },
    error::AppResult,
    models::ProductReview,
    response::ApiResponse,
    routes::params::{ProductQuery, SearchQuery},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{slug}", get(get_product))
        .route("/{slug}/reviews", post(submit_review))
        .route("/{slug}/customization", get(customization_options))
}

#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Categories and featured, new and bestselling products", body = ApiResponse<HomePage>)
    ),
    tag = "Products"
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HomePage>>> {
    let resp = product_service::home(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Available products, 12 per page", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product with related items and approved reviews", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::product_detail(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{slug}/reviews",
    params(("slug" = String, Path, description = "Product slug")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review stored for moderation", body = ApiResponse<ProductReview>),
        (status = 400, description = "Missing fields or rating out of range"),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<ProductReview>>> {
    let resp = product_service::submit_review(&state, &slug, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{slug}/customization",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Journal customization options", body = ApiResponse<CustomizationOptions>),
        (status = 404, description = "Product not customizable")
    ),
    tag = "Products"
)]
pub async fn customization_options(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<CustomizationOptions>>> {
    let resp = product_service::customization_options(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Products matching the query", body = ApiResponse<SearchResults>)
    ),
    tag = "Products"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let resp = product_service::search(&state, query).await?;
    Ok(Json(resp))
}
