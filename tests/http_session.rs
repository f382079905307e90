mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::{create_category, create_product, setup_state};
use stationery_shop_api::routes::create_app;
use tower::ServiceExt;

fn session_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("sessionid="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

#[tokio::test]
async fn first_visit_receives_a_session_cookie() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let app = create_app(state);

    let response = app
        .oneshot(Request::builder().uri("/api/cart").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(raw.contains("sessionid="));
    assert!(raw.contains("HttpOnly"));
    Ok(())
}

#[tokio::test]
async fn cart_follows_the_cookie_across_requests() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let category = create_category(&state, "Notebooks").await?;
    let notebook = create_product(&state, &category, "Kraft Notebook", "5.00", None).await?;
    let app = create_app(state);

    let add = Request::builder()
        .method("POST")
        .uri("/api/cart")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "product_id": notebook.id, "quantity": 2 }).to_string(),
        ))?;
    let response = app.clone().oneshot(add).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("session cookie");

    let count = Request::builder()
        .uri("/api/cart/count")
        .header(header::COOKIE, cookie.as_str())
        .body(Body::empty())?;
    let response = app.clone().oneshot(count).await?;
    assert_eq!(response.status(), StatusCode::OK);
    // An existing valid cookie is not reissued.
    assert!(session_cookie(&response).is_none());
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["data"]["total_items"], 2);

    // A different visitor starts with an empty cart.
    let response = app
        .oneshot(Request::builder().uri("/api/cart/count").body(Body::empty())?)
        .await?;
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["data"]["total_items"], 0);
    Ok(())
}

#[tokio::test]
async fn errors_use_the_response_envelope() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let app = create_app(state);

    let checkout = Request::builder()
        .method("POST")
        .uri("/api/orders/checkout")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))?;
    let response = app.clone().oneshot(checkout).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["message"], "Your cart is empty");

    let admin = Request::builder()
        .uri("/api/admin/orders")
        .body(Body::empty())?;
    let response = app.clone().oneshot(admin).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(Request::builder().uri("/nowhere").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
