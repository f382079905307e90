use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::delivery::{FeeQuery, FeeQuote, ZoneList},
    entity::delivery_zones::{Column as ZoneCol, Entity as DeliveryZones, Model as ZoneModel},
    error::{AppError, AppResult},
    middleware::session::SessionKey,
    models::{DeliveryQuote, DeliveryZone},
    pricing,
    response::{ApiResponse, Meta},
    services::{cart_service, session_service},
    state::AppState,
};

pub async fn find_active_zone<C: ConnectionTrait>(
    conn: &C,
    zone_id: Uuid,
) -> AppResult<Option<ZoneModel>> {
    Ok(DeliveryZones::find_by_id(zone_id)
        .filter(ZoneCol::IsActive.eq(true))
        .one(conn)
        .await?)
}

pub async fn list_zones(state: &AppState) -> AppResult<ApiResponse<ZoneList>> {
    let items: Vec<DeliveryZone> = DeliveryZones::find()
        .filter(ZoneCol::IsActive.eq(true))
        .order_by_asc(ZoneCol::DisplayOrder)
        .order_by_asc(ZoneCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(DeliveryZone::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Delivery zones",
        ZoneList { items },
        Some(Meta::list(total)),
    ))
}

/// Stores the zone on the session and quotes delivery for the current cart.
pub async fn select_zone(
    state: &AppState,
    session: &SessionKey,
    zone_id: Uuid,
) -> AppResult<ApiResponse<DeliveryQuote>> {
    let zone = match find_active_zone(&state.orm, zone_id).await? {
        Some(z) => z,
        None => return Err(AppError::NotFound("Delivery zone")),
    };

    session_service::set_delivery_zone(&state.orm, session, Some(zone.id)).await?;
    let subtotal = cart_service::session_subtotal(&state.orm, session).await?;
    let quote = DeliveryQuote::for_subtotal(&zone, subtotal);

    if let Err(err) = log_audit(
        &state.orm,
        None,
        Some(session.as_str()),
        "delivery_zone_select",
        Some("sessions"),
        Some(serde_json::json!({ "zone_id": zone.id, "delivery_fee": quote.delivery_fee })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        format!("Delivery zone set to {}", zone.name),
        quote,
        Some(Meta::empty()),
    ))
}

/// Fee for an arbitrary subtotal and weight, without touching the session.
pub async fn quote_fee(
    state: &AppState,
    zone_id: Uuid,
    query: FeeQuery,
) -> AppResult<ApiResponse<FeeQuote>> {
    if query.subtotal < Decimal::ZERO {
        return Err(AppError::Validation("Subtotal cannot be negative".into()));
    }
    let weight_kg = query.weight_kg.unwrap_or(Decimal::ZERO);
    if weight_kg < Decimal::ZERO {
        return Err(AppError::Validation("Weight cannot be negative".into()));
    }

    let zone = match find_active_zone(&state.orm, zone_id).await? {
        Some(z) => z,
        None => return Err(AppError::NotFound("Delivery zone")),
    };

    let delivery_fee = pricing::delivery_fee(&zone, query.subtotal, weight_kg);
    Ok(ApiResponse::success(
        "Delivery fee",
        FeeQuote {
            zone_id: zone.id,
            subtotal: query.subtotal,
            weight_kg,
            delivery_fee,
            total: query.subtotal + delivery_fee,
        },
        Some(Meta::empty()),
    ))
}
