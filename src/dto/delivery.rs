use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::DeliveryZone;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectZoneRequest {
    pub zone_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeeQuery {
    pub subtotal: Decimal,
    pub weight_kg: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeQuote {
    pub zone_id: Uuid,
    pub subtotal: Decimal,
    pub weight_kg: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ZoneList {
    #[schema(value_type = Vec<DeliveryZone>)]
    pub items: Vec<DeliveryZone>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateZoneRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_fee: Decimal,
    #[serde(default)]
    pub per_kg_fee: Decimal,
    pub min_order_free_delivery: Option<Decimal>,
    pub estimated_days_min: i32,
    pub estimated_days_max: i32,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateZoneRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_fee: Option<Decimal>,
    pub per_kg_fee: Option<Decimal>,
    pub min_order_free_delivery: Option<Decimal>,
    /// Removes the free-delivery threshold; wins over `min_order_free_delivery`.
    #[serde(default)]
    pub clear_free_delivery: bool,
    pub estimated_days_min: Option<i32>,
    pub estimated_days_max: Option<i32>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}
