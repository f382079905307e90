use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderItem};

/// Customer details submitted at checkout. Blank required fields are
/// reported together rather than rejected by the JSON extractor.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CheckoutRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: Option<String>,
    /// Falls back to the zone selected in the session.
    pub delivery_zone_id: Option<Uuid>,
    pub customer_notes: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    /// One of pending, confirmed, processing, shipped, delivered, cancelled.
    pub status: Option<String>,
    /// One of pending, paid, failed, refunded.
    pub payment_status: Option<String>,
    pub admin_notes: Option<String>,
}
