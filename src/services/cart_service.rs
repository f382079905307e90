use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::cart::{AddToCartRequest, CartCount},
    entity::{
        cart_items::{ActiveModel as CartItemActive, Column as CartItemCol, Entity as CartItems, Model as CartItemModel},
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts, Model as CartModel},
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::session::SessionKey,
    models::{Cart, CartItem, DeliveryQuote, ProductSummary},
    response::{ApiResponse, Meta},
    services::{delivery_service, session_service},
    state::AppState,
};

/// A cart row together with its live product.
pub type CartLine = (CartItemModel, ProductModel);

/// Returns the session's cart, creating an empty one on first use.
pub async fn resolve_cart<C: ConnectionTrait>(conn: &C, key: &SessionKey) -> AppResult<CartModel> {
    let existing = Carts::find()
        .filter(CartCol::SessionKey.eq(key.as_str()))
        .one(conn)
        .await?;
    if let Some(cart) = existing {
        return Ok(cart);
    }

    let now = Utc::now();
    let created = CartActive {
        id: Set(Uuid::new_v4()),
        session_key: Set(key.0.clone()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(conn)
    .await;

    match created {
        Ok(cart) => Ok(cart),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Carts::find()
            .filter(CartCol::SessionKey.eq(key.as_str()))
            .one(conn)
            .await?
            .ok_or(AppError::NotFound("Cart")),
        Err(err) => Err(err.into()),
    }
}

pub async fn cart_lines<C: ConnectionTrait>(conn: &C, cart_id: Uuid) -> AppResult<Vec<CartLine>> {
    let rows = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart_id))
        .find_also_related(Products)
        .order_by_asc(CartItemCol::AddedAt)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, product)| product.map(|p| (item, p)))
        .collect())
}

/// `(total_items, subtotal)` with every line priced at the product's
/// current price.
pub fn totals(lines: &[CartLine]) -> (i64, Decimal) {
    lines.iter().fold((0, Decimal::ZERO), |(count, subtotal), (item, product)| {
        (
            count + i64::from(item.quantity),
            subtotal + product.current_price() * Decimal::from(item.quantity),
        )
    })
}

/// Subtotal of the session's cart, for delivery quotes.
pub async fn session_subtotal<C: ConnectionTrait>(conn: &C, key: &SessionKey) -> AppResult<Decimal> {
    let cart = resolve_cart(conn, key).await?;
    let lines = cart_lines(conn, cart.id).await?;
    Ok(totals(&lines).1)
}

/// Canonical form of a customization payload. Null and empty objects mean
/// "no customization".
pub fn normalize_customization(customization: Option<Value>) -> Option<Value> {
    match customization {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        Some(value) => Some(value),
    }
}

/// Key used by the line uniqueness index: compact JSON with sorted object
/// keys, empty when there is no customization.
pub fn customization_key(customization: &Option<Value>) -> String {
    match customization {
        Some(value) => sort_keys(value).to_string(),
        None => String::new(),
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

async fn build_cart<C: ConnectionTrait>(
    conn: &C,
    key: &SessionKey,
    cart: &CartModel,
) -> AppResult<Cart> {
    let lines = cart_lines(conn, cart.id).await?;
    let (total_items, subtotal) = totals(&lines);

    let session = session_service::load(conn, key).await?;
    let delivery = match session.delivery_zone_id {
        Some(zone_id) => delivery_service::find_active_zone(conn, zone_id)
            .await?
            .map(|zone| DeliveryQuote::for_subtotal(&zone, subtotal)),
        None => None,
    };
    let total = delivery.as_ref().map(|d| d.total).unwrap_or(subtotal);

    let items = lines
        .into_iter()
        .map(|(item, product)| {
            let unit_price = product.current_price();
            CartItem {
                id: item.id,
                product: ProductSummary::from(&product),
                quantity: item.quantity,
                customization: item.customization,
                unit_price,
                total_price: unit_price * Decimal::from(item.quantity),
            }
        })
        .collect();

    Ok(Cart {
        id: cart.id,
        items,
        total_items,
        subtotal,
        delivery,
        total,
    })
}

pub async fn view_cart(state: &AppState, session: &SessionKey) -> AppResult<ApiResponse<Cart>> {
    let cart = resolve_cart(&state.orm, session).await?;
    let data = build_cart(&state.orm, session, &cart).await?;
    Ok(ApiResponse::success("Cart", data, Some(Meta::empty())))
}

pub async fn cart_count(state: &AppState, session: &SessionKey) -> AppResult<ApiResponse<CartCount>> {
    let cart = resolve_cart(&state.orm, session).await?;
    let lines = cart_lines(&state.orm, cart.id).await?;
    let (total_items, _) = totals(&lines);
    Ok(ApiResponse::success(
        "Cart count",
        CartCount { total_items },
        Some(Meta::empty()),
    ))
}

async fn find_line<C: ConnectionTrait>(
    conn: &C,
    cart_id: Uuid,
    product_id: Uuid,
    key: &str,
) -> AppResult<Option<CartItemModel>> {
    Ok(CartItems::find()
        .filter(CartItemCol::CartId.eq(cart_id))
        .filter(CartItemCol::ProductId.eq(product_id))
        .filter(CartItemCol::CustomizationKey.eq(key))
        .one(conn)
        .await?)
}

async fn increase_quantity<C: ConnectionTrait>(
    conn: &C,
    line: CartItemModel,
    quantity: i32,
) -> AppResult<CartItemModel> {
    let new_quantity = line.quantity.saturating_add(quantity);
    let mut active: CartItemActive = line.into();
    active.quantity = Set(new_quantity);
    Ok(active.update(conn).await?)
}

/// Adds `quantity` of a product. The same product with the same
/// customization merges into one line.
pub async fn add_item(
    state: &AppState,
    session: &SessionKey,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<Cart>> {
    if payload.quantity < 1 {
        return Err(AppError::Validation("Quantity must be at least 1".into()));
    }

    let product = Products::find_by_id(payload.product_id)
        .filter(ProdCol::IsAvailable.eq(true))
        .one(&state.orm)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product")),
    };

    let cart = resolve_cart(&state.orm, session).await?;
    let customization = normalize_customization(payload.customization);
    let key = customization_key(&customization);

    let line = match find_line(&state.orm, cart.id, product.id, &key).await? {
        Some(line) => {
            tracing::debug!(cart_id = %cart.id, product_id = %product.id, "cart item merged");
            increase_quantity(&state.orm, line, payload.quantity).await?
        }
        None => {
            let inserted = CartItemActive {
                id: Set(Uuid::new_v4()),
                cart_id: Set(cart.id),
                product_id: Set(product.id),
                quantity: Set(payload.quantity),
                customization: Set(customization),
                customization_key: Set(key.clone()),
                added_at: Set(Utc::now().into()),
            }
            .insert(&state.orm)
            .await;

            match inserted {
                Ok(line) => line,
                Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    // A concurrent add created the line first.
                    let line = find_line(&state.orm, cart.id, product.id, &key)
                        .await?
                        .ok_or(AppError::NotFound("Cart item"))?;
                    increase_quantity(&state.orm, line, payload.quantity).await?
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    if let Err(err) = log_audit(
        &state.orm,
        None,
        Some(session.as_str()),
        "cart_add",
        Some("cart_items"),
        Some(serde_json::json!({
            "product_id": product.id,
            "added": payload.quantity,
            "quantity": line.quantity,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let data = build_cart(&state.orm, session, &cart).await?;
    Ok(ApiResponse::success(
        format!("{} added to cart", product.name),
        data,
        Some(Meta::empty()),
    ))
}

async fn owned_line(state: &AppState, cart_id: Uuid, item_id: Uuid) -> AppResult<CartItemModel> {
    let line = CartItems::find_by_id(item_id)
        .filter(CartItemCol::CartId.eq(cart_id))
        .one(&state.orm)
        .await?;
    match line {
        Some(line) => Ok(line),
        None => Err(AppError::NotFound("Cart item")),
    }
}

/// Sets an absolute quantity; zero or less removes the line.
pub async fn update_item(
    state: &AppState,
    session: &SessionKey,
    item_id: Uuid,
    quantity: i32,
) -> AppResult<ApiResponse<Cart>> {
    let cart = resolve_cart(&state.orm, session).await?;
    let line = owned_line(state, cart.id, item_id).await?;

    let message = if quantity <= 0 {
        CartItems::delete_by_id(line.id).exec(&state.orm).await?;
        "Item removed from cart"
    } else {
        let mut active: CartItemActive = line.into();
        active.quantity = Set(quantity);
        active.update(&state.orm).await?;
        "Cart updated"
    };

    if let Err(err) = log_audit(
        &state.orm,
        None,
        Some(session.as_str()),
        "cart_update",
        Some("cart_items"),
        Some(serde_json::json!({ "item_id": item_id, "quantity": quantity })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let data = build_cart(&state.orm, session, &cart).await?;
    Ok(ApiResponse::success(message, data, Some(Meta::empty())))
}

pub async fn remove_item(
    state: &AppState,
    session: &SessionKey,
    item_id: Uuid,
) -> AppResult<ApiResponse<Cart>> {
    let cart = resolve_cart(&state.orm, session).await?;
    let result = CartItems::delete_many()
        .filter(CartItemCol::Id.eq(item_id))
        .filter(CartItemCol::CartId.eq(cart.id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Cart item"));
    }

    if let Err(err) = log_audit(
        &state.orm,
        None,
        Some(session.as_str()),
        "cart_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "item_id": item_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let data = build_cart(&state.orm, session, &cart).await?;
    Ok(ApiResponse::success(
        "Item removed from cart",
        data,
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customization_key_is_order_independent() {
        let a = normalize_customization(Some(json!({ "cover_text": "Ada", "page_type": "dotted" })));
        let b = normalize_customization(Some(json!({ "page_type": "dotted", "cover_text": "Ada" })));
        assert_eq!(customization_key(&a), customization_key(&b));
        assert_eq!(
            customization_key(&a),
            r#"{"cover_text":"Ada","page_type":"dotted"}"#
        );
    }

    #[test]
    fn empty_customizations_collapse_to_none() {
        assert_eq!(normalize_customization(None), None);
        assert_eq!(normalize_customization(Some(Value::Null)), None);
        assert_eq!(normalize_customization(Some(json!({}))), None);
        assert_eq!(customization_key(&None), "");
    }
}
