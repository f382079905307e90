use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{CheckoutRequest, OrderWithItems},
    entity::{
        cart_items::{Column as CartItemCol, Entity as CartItems},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::{auth::AuthUser, session::SessionKey},
    models::{Order, OrderItem, OrderStatus, OrderTracking, PaymentStatus},
    pricing,
    response::{ApiResponse, Meta},
    services::{cart_service, currency_service, delivery_service, session_service},
    state::AppState,
};

const ORDER_NUMBER_ATTEMPTS: usize = 10;

/// `SH` followed by eight random digits.
pub fn generate_order_number() -> String {
    format!("SH{:08}", Uuid::new_v4().as_u128() % 100_000_000)
}

/// Draws candidates from `generate` until one is unused, giving up with
/// `Conflict` after a bounded number of attempts.
pub async fn allocate_order_number<C, F>(conn: &C, mut generate: F) -> AppResult<String>
where
    C: ConnectionTrait,
    F: FnMut() -> String,
{
    for _ in 0..ORDER_NUMBER_ATTEMPTS {
        let candidate = generate();
        let taken = Orders::find()
            .filter(OrderCol::OrderNumber.eq(candidate.as_str()))
            .count(conn)
            .await?
            > 0;
        if !taken {
            return Ok(candidate);
        }
        tracing::warn!(order_number = %candidate, "order number collision");
    }
    Err(AppError::Conflict("Could not allocate an order number".into()))
}

/// Order numbers are matched upper-case with surrounding whitespace ignored.
fn normalize_order_number(order_number: &str) -> String {
    order_number.trim().to_uppercase()
}

/// Names of required checkout fields that are blank.
fn missing_fields(payload: &CheckoutRequest, zone_id: Option<Uuid>) -> Vec<&'static str> {
    let required = [
        ("first_name", &payload.first_name),
        ("last_name", &payload.last_name),
        ("email", &payload.email),
        ("phone", &payload.phone),
        ("address", &payload.address),
        ("city", &payload.city),
    ];
    let mut missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if zone_id.is_none() {
        missing.push("delivery_zone");
    }
    missing
}

pub async fn load_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    Ok(OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::ProductName)
        .all(conn)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect())
}

/// Turns the session's cart into an order.
///
/// Order, line snapshots, cart clearing and the session's zone reset commit
/// together or not at all.
pub async fn place_order(
    state: &AppState,
    session: &SessionKey,
    user: Option<&AuthUser>,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let cart = cart_service::resolve_cart(&state.orm, session).await?;
    if cart_service::cart_lines(&state.orm, cart.id).await?.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let session_row = session_service::load(&state.orm, session).await?;
    let zone_id = payload.delivery_zone_id.or(session_row.delivery_zone_id);

    let missing = missing_fields(&payload, zone_id);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )));
    }
    if !payload.email.contains('@') {
        return Err(AppError::Validation("Please enter a valid email address".into()));
    }

    let zone = match zone_id {
        Some(id) => delivery_service::find_active_zone(&state.orm, id).await?,
        None => None,
    };
    let zone = match zone {
        Some(z) => z,
        None => return Err(AppError::InvalidZone),
    };

    let (currency_code, exchange_rate) =
        currency_service::order_currency(&state.orm, &state.config, &session_row).await?;

    let txn = state.orm.begin().await?;

    // Priced from the cart as it stands inside the transaction.
    let lines = cart_service::cart_lines(&txn, cart.id).await?;
    if lines.is_empty() {
        return Err(AppError::EmptyCart);
    }
    let (_, subtotal) = cart_service::totals(&lines);
    let delivery_fee = pricing::delivery_fee(&zone, subtotal, Decimal::ZERO);
    let total = subtotal + delivery_fee;

    let order_number = allocate_order_number(&txn, generate_order_number).await?;
    let now = Utc::now();
    let country = payload
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(state.config.default_country.as_str())
        .to_string();

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number),
        session_key: Set(session.0.clone()),
        user_id: Set(user.map(|u| u.user_id)),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        phone: Set(payload.phone.trim().to_string()),
        address: Set(payload.address.trim().to_string()),
        city: Set(payload.city.trim().to_string()),
        state: Set(payload.state.trim().to_string()),
        postal_code: Set(payload.postal_code.trim().to_string()),
        country: Set(country),
        delivery_zone_id: Set(Some(zone.id)),
        delivery_fee: Set(delivery_fee),
        subtotal: Set(subtotal),
        total: Set(total),
        currency_code: Set(currency_code),
        exchange_rate: Set(exchange_rate),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
        customer_notes: Set(payload.customer_notes),
        admin_notes: Set(String::new()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (line, product) in &lines {
        let unit_price = product.current_price();
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(Some(product.id)),
            product_name: Set(product.name.clone()),
            quantity: Set(line.quantity),
            unit_price: Set(unit_price),
            total_price: Set(unit_price * Decimal::from(line.quantity)),
            customization: Set(line.customization.clone()),
        }
        .insert(&txn)
        .await?;
        items.push(OrderItem::from(item));
    }

    CartItems::delete_many()
        .filter(CartItemCol::CartId.eq(cart.id))
        .exec(&txn)
        .await?;
    session_service::set_delivery_zone(&txn, session, None).await?;

    txn.commit().await?;

    tracing::info!(
        order_number = %order.order_number,
        items = items.len(),
        total = %order.total,
        "order placed"
    );

    if let Err(err) = log_audit(
        &state.orm,
        user.map(|u| u.user_id),
        Some(session.as_str()),
        "order_place",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order.id,
            "order_number": order.order_number,
            "total": order.total,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        format!("Order {} placed successfully", order.order_number),
        OrderWithItems {
            order: Order::public(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Order confirmation, visible only to the session that placed the order.
pub async fn confirmation(
    state: &AppState,
    session: &SessionKey,
    order_number: &str,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(OrderCol::OrderNumber.eq(normalize_order_number(order_number)))
        .filter(OrderCol::SessionKey.eq(session.as_str()))
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "Order confirmation",
        OrderWithItems {
            order: Order::public(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn track(state: &AppState, order_number: &str) -> AppResult<ApiResponse<OrderTracking>> {
    let order = Orders::find()
        .filter(OrderCol::OrderNumber.eq(normalize_order_number(order_number)))
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    Ok(ApiResponse::success(
        "Order status",
        OrderTracking::from(order),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_numbers_are_sh_plus_eight_digits() {
        for _ in 0..50 {
            let number = generate_order_number();
            assert_eq!(number.len(), 10);
            assert!(number.starts_with("SH"));
            assert!(number[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn order_numbers_normalize_case_and_whitespace() {
        assert_eq!(normalize_order_number("  sh00012345 "), "SH00012345");
        assert_eq!(normalize_order_number("SH00012345"), "SH00012345");
    }

    #[test]
    fn missing_fields_lists_blanks_and_zone() {
        let payload = CheckoutRequest {
            first_name: "Wanjiru".into(),
            last_name: " ".into(),
            email: "w@example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            missing_fields(&payload, None),
            vec!["last_name", "phone", "address", "city", "delivery_zone"]
        );
    }
}
