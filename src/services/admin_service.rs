use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        contact::{ContactMessageList, UpdateContactRequest},
        currency::UpsertCurrencyRequest,
        delivery::{CreateZoneRequest, UpdateZoneRequest},
        orders::{OrderList, OrderWithItems, UpdateOrderRequest},
        products::{CreateProductRequest, ReviewList, UpdateProductRequest},
    },
    entity::{
        categories::Entity as Categories,
        contact_messages::{ActiveModel as ContactActive, Column as ContactCol, Entity as ContactMessages},
        currencies::{ActiveModel as CurrencyActive, Column as CurrencyCol, Entity as Currencies},
        delivery_zones::{ActiveModel as ZoneActive, Entity as DeliveryZones},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        product_reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as ProductReviews},
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{
        ContactMessage, Currency, DeliveryZone, Order, OrderStatus, PaymentStatus, Product,
        ProductReview,
    },
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, Pagination, SortOrder},
    services::{order_service, product_service::slugify},
    state::AppState,
};

async fn audit(state: &AppState, user: &AuthUser, action: &str, resource: &str, metadata: serde_json::Value) {
    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        None,
        action,
        Some(resource),
        Some(metadata),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
}

fn validate_prices(price: Decimal, sale_price: Option<Decimal>) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }
    if let Some(sale) = sale_price {
        if sale < Decimal::ZERO || sale >= price {
            return Err(AppError::Validation(
                "Sale price must be lower than the regular price".into(),
            ));
        }
    }
    Ok(())
}

async fn ensure_unique_slug(state: &AppState, slug: &str, except: Option<Uuid>) -> AppResult<()> {
    let mut finder = Products::find().filter(ProdCol::Slug.eq(slug));
    if let Some(id) = except {
        finder = finder.filter(ProdCol::Id.ne(id));
    }
    if finder.count(&state.orm).await? > 0 {
        return Err(AppError::Conflict(format!("Product slug '{slug}' is already in use")));
    }
    Ok(())
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Product name is required".into()));
    }
    validate_prices(payload.price, payload.sale_price)?;
    if payload.stock < 0 {
        return Err(AppError::Validation("Stock cannot be negative".into()));
    }
    if Categories::find_by_id(payload.category_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound("Category"));
    }

    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slugify(slug),
        None => slugify(&name),
    };
    if slug.is_empty() {
        return Err(AppError::Validation("Product slug cannot be empty".into()));
    }
    ensure_unique_slug(state, &slug, None).await?;

    let now = Utc::now();
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        category_id: Set(payload.category_id),
        meta_title: Set(name.clone()),
        meta_description: Set(payload.short_description.clone()),
        name: Set(name),
        slug: Set(slug),
        description: Set(payload.description),
        short_description: Set(payload.short_description),
        price: Set(payload.price),
        sale_price: Set(payload.sale_price),
        cover_type: Set(payload.cover_type),
        size: Set(payload.size),
        pages: Set(payload.pages),
        paper_type: Set(payload.paper_type),
        color: Set(payload.color),
        stock: Set(payload.stock),
        is_available: Set(true),
        is_featured: Set(payload.is_featured),
        is_new: Set(payload.is_new),
        is_bestseller: Set(payload.is_bestseller),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    audit(state, user, "product_create", "products", serde_json::json!({ "product_id": product.id })).await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product")),
    };

    let price = payload.price.unwrap_or(existing.price);
    let sale_price = if payload.clear_sale_price {
        None
    } else {
        payload.sale_price.or(existing.sale_price)
    };
    validate_prices(price, sale_price)?;
    if payload.stock.is_some_and(|s| s < 0) {
        return Err(AppError::Validation("Stock cannot be negative".into()));
    }
    if let Some(category_id) = payload.category_id {
        if Categories::find_by_id(category_id).one(&state.orm).await?.is_none() {
            return Err(AppError::NotFound("Category"));
        }
    }

    let mut active: ProductActive = existing.into();
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(name) = payload.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(short_description) = payload.short_description {
        active.short_description = Set(short_description);
    }
    active.price = Set(price);
    active.sale_price = Set(sale_price);
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }
    if let Some(v) = payload.is_available {
        active.is_available = Set(v);
    }
    if let Some(v) = payload.is_featured {
        active.is_featured = Set(v);
    }
    if let Some(v) = payload.is_new {
        active.is_new = Set(v);
    }
    if let Some(v) = payload.is_bestseller {
        active.is_bestseller = Set(v);
    }
    active.updated_at = Set(Utc::now().into());
    let product = active.update(&state.orm).await?;

    audit(state, user, "product_update", "products", serde_json::json!({ "product_id": product.id })).await;

    Ok(ApiResponse::success(
        "Product updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Deleting a product keeps order history; the item snapshots lose only
/// their product reference.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Product"));
    }

    audit(state, user, "product_delete", "products", serde_json::json!({ "product_id": id })).await;

    Ok(ApiResponse::success(
        "Product deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        let status = validate_order_status(status)?;
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::admin)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    let items = order_service::load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "Order",
        OrderWithItems {
            order: Order::admin(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Only the statuses and admin notes of a placed order are editable.
pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let status = payload.status.as_deref().map(validate_order_status).transpose()?;
    let payment_status = payload
        .payment_status
        .as_deref()
        .map(validate_payment_status)
        .transpose()?;

    let order = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    let mut active: OrderActive = order.into();
    if let Some(status) = status {
        active.status = Set(status.as_str().to_string());
    }
    if let Some(payment_status) = payment_status {
        active.payment_status = Set(payment_status.as_str().to_string());
    }
    if let Some(notes) = payload.admin_notes {
        active.admin_notes = Set(notes);
    }
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(
        order_number = %order.order_number,
        status = %order.status,
        payment_status = %order.payment_status,
        "order updated"
    );
    audit(
        state,
        user,
        "order_update",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "status": order.status,
            "payment_status": order.payment_status,
        }),
    )
    .await;

    let items = order_service::load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "Order updated",
        OrderWithItems {
            order: Order::admin(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_pending_reviews(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReviewList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();
    let finder = ProductReviews::find()
        .filter(ReviewCol::IsApproved.eq(false))
        .order_by_asc(ReviewCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ProductReview::from)
        .collect();

    Ok(ApiResponse::success(
        "Pending reviews",
        ReviewList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn approve_review(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ProductReview>> {
    ensure_admin(user)?;
    let review = match ProductReviews::find_by_id(id).one(&state.orm).await? {
        Some(r) => r,
        None => return Err(AppError::NotFound("Review")),
    };

    let mut active: ReviewActive = review.into();
    active.is_approved = Set(true);
    let review = active.update(&state.orm).await?;

    audit(state, user, "review_approve", "product_reviews", serde_json::json!({ "review_id": review.id })).await;

    Ok(ApiResponse::success(
        "Review approved",
        review.into(),
        Some(Meta::empty()),
    ))
}

fn validate_zone(
    base_fee: Decimal,
    per_kg_fee: Decimal,
    min_order_free_delivery: Option<Decimal>,
    days_min: i32,
    days_max: i32,
) -> AppResult<()> {
    if base_fee < Decimal::ZERO || per_kg_fee < Decimal::ZERO {
        return Err(AppError::Validation("Delivery fees cannot be negative".into()));
    }
    if min_order_free_delivery.is_some_and(|t| t < Decimal::ZERO) {
        return Err(AppError::Validation(
            "Free delivery threshold cannot be negative".into(),
        ));
    }
    if days_min < 0 || days_max < days_min {
        return Err(AppError::Validation("Invalid delivery estimate".into()));
    }
    Ok(())
}

pub async fn create_zone(
    state: &AppState,
    user: &AuthUser,
    payload: CreateZoneRequest,
) -> AppResult<ApiResponse<DeliveryZone>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Zone name is required".into()));
    }
    validate_zone(
        payload.base_fee,
        payload.per_kg_fee,
        payload.min_order_free_delivery,
        payload.estimated_days_min,
        payload.estimated_days_max,
    )?;

    let zone = ZoneActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(payload.description),
        base_fee: Set(payload.base_fee),
        per_kg_fee: Set(payload.per_kg_fee),
        min_order_free_delivery: Set(payload.min_order_free_delivery),
        estimated_days_min: Set(payload.estimated_days_min),
        estimated_days_max: Set(payload.estimated_days_max),
        is_active: Set(true),
        display_order: Set(payload.display_order),
    }
    .insert(&state.orm)
    .await?;

    audit(state, user, "zone_create", "delivery_zones", serde_json::json!({ "zone_id": zone.id })).await;

    Ok(ApiResponse::success(
        "Delivery zone created",
        zone.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_zone(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateZoneRequest,
) -> AppResult<ApiResponse<DeliveryZone>> {
    ensure_admin(user)?;
    let zone = match DeliveryZones::find_by_id(id).one(&state.orm).await? {
        Some(z) => z,
        None => return Err(AppError::NotFound("Delivery zone")),
    };

    let base_fee = payload.base_fee.unwrap_or(zone.base_fee);
    let per_kg_fee = payload.per_kg_fee.unwrap_or(zone.per_kg_fee);
    let threshold = if payload.clear_free_delivery {
        None
    } else {
        payload.min_order_free_delivery.or(zone.min_order_free_delivery)
    };
    let days_min = payload.estimated_days_min.unwrap_or(zone.estimated_days_min);
    let days_max = payload.estimated_days_max.unwrap_or(zone.estimated_days_max);
    validate_zone(base_fee, per_kg_fee, threshold, days_min, days_max)?;

    let mut active: ZoneActive = zone.into();
    if let Some(name) = payload.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    active.base_fee = Set(base_fee);
    active.per_kg_fee = Set(per_kg_fee);
    active.min_order_free_delivery = Set(threshold);
    active.estimated_days_min = Set(days_min);
    active.estimated_days_max = Set(days_max);
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }
    let zone = active.update(&state.orm).await?;

    audit(state, user, "zone_update", "delivery_zones", serde_json::json!({ "zone_id": zone.id })).await;

    Ok(ApiResponse::success(
        "Delivery zone updated",
        zone.into(),
        Some(Meta::empty()),
    ))
}

/// Creates the currency or replaces its name, symbol, rate and status.
pub async fn upsert_currency(
    state: &AppState,
    user: &AuthUser,
    payload: UpsertCurrencyRequest,
) -> AppResult<ApiResponse<Currency>> {
    ensure_admin(user)?;
    let code = payload.code.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::Validation(
            "Currency code must be three letters".into(),
        ));
    }
    if payload.exchange_rate <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Exchange rate must be greater than 0".into(),
        ));
    }

    let existing = Currencies::find()
        .filter(CurrencyCol::Code.eq(code.as_str()))
        .one(&state.orm)
        .await?;

    let currency = match existing {
        Some(currency) => {
            let mut active: CurrencyActive = currency.into();
            active.name = Set(payload.name);
            active.symbol = Set(payload.symbol);
            active.exchange_rate = Set(payload.exchange_rate);
            active.is_active = Set(payload.is_active);
            active.update(&state.orm).await?
        }
        None => {
            CurrencyActive {
                id: Set(Uuid::new_v4()),
                code: Set(code),
                name: Set(payload.name),
                symbol: Set(payload.symbol),
                exchange_rate: Set(payload.exchange_rate),
                is_active: Set(payload.is_active),
            }
            .insert(&state.orm)
            .await?
        }
    };

    audit(
        state,
        user,
        "currency_upsert",
        "currencies",
        serde_json::json!({ "code": currency.code, "exchange_rate": currency.exchange_rate }),
    )
    .await;

    Ok(ApiResponse::success(
        "Currency saved",
        currency.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_contact_messages(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ContactMessageList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();
    let finder = ContactMessages::find().order_by_desc(ContactCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ContactMessage::from)
        .collect();

    Ok(ApiResponse::success(
        "Contact messages",
        ContactMessageList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn update_contact_message(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateContactRequest,
) -> AppResult<ApiResponse<ContactMessage>> {
    ensure_admin(user)?;
    let message = match ContactMessages::find_by_id(id).one(&state.orm).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound("Contact message")),
    };

    let mut active: ContactActive = message.into();
    if let Some(is_read) = payload.is_read {
        active.is_read = Set(is_read);
    }
    if let Some(is_replied) = payload.is_replied {
        active.is_replied = Set(is_replied);
    }
    let message = active.update(&state.orm).await?;

    audit(state, user, "contact_update", "contact_messages", serde_json::json!({ "message_id": message.id })).await;

    Ok(ApiResponse::success(
        "Contact message updated",
        message.into(),
        Some(Meta::empty()),
    ))
}

fn validate_order_status(status: &str) -> Result<OrderStatus, AppError> {
    OrderStatus::parse(status).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid order status. Allowed: {}",
            OrderStatus::ALL.map(|s| s.as_str()).join(", ")
        ))
    })
}

fn validate_payment_status(status: &str) -> Result<PaymentStatus, AppError> {
    PaymentStatus::parse(status).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid payment status. Allowed: {}",
            PaymentStatus::ALL.map(|s| s.as_str()).join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_price_must_undercut_price() {
        let price = Decimal::new(2000, 2);
        assert!(validate_prices(price, None).is_ok());
        assert!(validate_prices(price, Some(Decimal::new(1500, 2))).is_ok());
        assert!(validate_prices(price, Some(price)).is_err());
        assert!(validate_prices(Decimal::NEGATIVE_ONE, None).is_err());
    }

    #[test]
    fn statuses_are_checked_against_the_enumerations() {
        assert_eq!(validate_order_status("shipped").ok(), Some(OrderStatus::Shipped));
        assert!(validate_order_status("paid").is_err());
        assert_eq!(validate_payment_status("refunded").ok(), Some(PaymentStatus::Refunded));
        assert!(validate_payment_status("unpaid").is_err());
    }
}
