use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{
        categories, contact_messages, currencies, delivery_zones, journal_customizations,
        order_items, orders, product_reviews, products, users,
    },
    pricing,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon_class: String,
    pub display_order: i32,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            icon_class: model.icon_class,
            display_order: model.display_order,
        }
    }
}

/// Catalog product with its derived pricing fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub current_price: Decimal,
    pub discount_percentage: i64,
    pub stock: i32,
    pub in_stock: bool,
    pub is_available: bool,
    pub cover_type: Option<String>,
    pub size: Option<String>,
    pub pages: Option<i32>,
    pub paper_type: Option<String>,
    pub color: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub meta_title: String,
    pub meta_description: String,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            current_price: model.current_price(),
            discount_percentage: pricing::discount_percentage(model.price, model.sale_price),
            in_stock: pricing::in_stock(model.stock, model.is_available),
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            short_description: model.short_description,
            price: model.price,
            sale_price: model.sale_price,
            stock: model.stock,
            is_available: model.is_available,
            cover_type: model.cover_type,
            size: model.size,
            pages: model.pages,
            paper_type: model.paper_type,
            color: model.color,
            is_featured: model.is_featured,
            is_new: model.is_new,
            is_bestseller: model.is_bestseller,
            meta_title: model.meta_title,
            meta_description: model.meta_description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl products::Model {
    pub fn current_price(&self) -> Decimal {
        pricing::current_price(self.price, self.sale_price)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub current_price: Decimal,
    pub in_stock: bool,
}

impl From<&products::Model> for ProductSummary {
    fn from(model: &products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            slug: model.slug.clone(),
            price: model.price,
            current_price: model.current_price(),
            in_stock: pricing::in_stock(model.stock, model.is_available),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductReview {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub rating: i32,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<product_reviews::Model> for ProductReview {
    fn from(model: product_reviews::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            name: model.name,
            rating: model.rating,
            comment: model.comment,
            is_approved: model.is_approved,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub exchange_rate: Decimal,
    pub is_active: bool,
}

impl From<currencies::Model> for Currency {
    fn from(model: currencies::Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            symbol: model.symbol,
            exchange_rate: model.exchange_rate,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryZone {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub base_fee: Decimal,
    pub per_kg_fee: Decimal,
    pub min_order_free_delivery: Option<Decimal>,
    pub estimated_days_min: i32,
    pub estimated_days_max: i32,
    pub estimated_days: String,
    pub is_active: bool,
    pub display_order: i32,
}

impl From<delivery_zones::Model> for DeliveryZone {
    fn from(model: delivery_zones::Model) -> Self {
        Self {
            estimated_days: pricing::estimated_days(&model),
            id: model.id,
            name: model.name,
            description: model.description,
            base_fee: model.base_fee,
            per_kg_fee: model.per_kg_fee,
            min_order_free_delivery: model.min_order_free_delivery,
            estimated_days_min: model.estimated_days_min,
            estimated_days_max: model.estimated_days_max,
            is_active: model.is_active,
            display_order: model.display_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryQuote {
    pub zone_id: Uuid,
    pub zone_name: String,
    pub delivery_fee: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub estimated_days: String,
    pub free_delivery_threshold: Option<Decimal>,
}

impl DeliveryQuote {
    pub fn for_subtotal(zone: &delivery_zones::Model, subtotal: Decimal) -> Self {
        let delivery_fee = pricing::delivery_fee(zone, subtotal, Decimal::ZERO);
        Self {
            zone_id: zone.id,
            zone_name: zone.name.clone(),
            delivery_fee,
            subtotal,
            total: subtotal + delivery_fee,
            estimated_days: pricing::estimated_days(zone),
            free_delivery_threshold: zone.min_order_free_delivery,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub product: ProductSummary,
    pub quantity: i32,
    #[schema(value_type = Option<Object>)]
    pub customization: Option<Value>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub subtotal: Decimal,
    /// Present when the session has selected an active delivery zone.
    pub delivery: Option<DeliveryQuote>,
    pub total: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Wishlist {
    pub items: Vec<Product>,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WishlistAction {
    Added,
    Removed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistToggle {
    pub product_id: Uuid,
    pub action: WishlistAction,
    pub wishlist_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub delivery_zone_id: Option<Uuid>,
    pub delivery_fee: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub currency_code: String,
    pub exchange_rate: Decimal,
    pub status: String,
    pub payment_status: String,
    pub customer_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Customer-facing view; admin notes are withheld.
    pub fn public(model: orders::Model) -> Self {
        let mut order = Self::admin(model);
        order.admin_notes = None;
        order
    }

    pub fn admin(model: orders::Model) -> Self {
        Self {
            full_name: format!("{} {}", model.first_name, model.last_name),
            id: model.id,
            order_number: model.order_number,
            user_id: model.user_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            country: model.country,
            delivery_zone_id: model.delivery_zone_id,
            delivery_fee: model.delivery_fee,
            subtotal: model.subtotal,
            total: model.total,
            currency_code: model.currency_code,
            exchange_rate: model.exchange_rate,
            status: model.status,
            payment_status: model.payment_status,
            customer_notes: model.customer_notes,
            admin_notes: Some(model.admin_notes),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[schema(value_type = Option<Object>)]
    pub customization: Option<Value>,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            product_name: model.product_name,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total_price: model.total_price,
            customization: model.customization,
        }
    }
}

/// Status-only view for anonymous order tracking.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderTracking {
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub total: Decimal,
    pub currency_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for OrderTracking {
    fn from(model: orders::Model) -> Self {
        Self {
            order_number: model.order_number,
            status: model.status,
            payment_status: model.payment_status,
            total: model.total,
            currency_code: model.currency_code,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub is_replied: bool,
    pub created_at: DateTime<Utc>,
}

impl From<contact_messages::Model> for ContactMessage {
    fn from(model: contact_messages::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            subject: model.subject,
            message: model.message,
            is_read: model.is_read,
            is_replied: model.is_replied,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JournalCustomization {
    pub id: Uuid,
    pub name: String,
    pub cover_text: String,
    pub cover_material: String,
    pub cover_color: String,
    pub page_type: String,
    pub page_count: i32,
    pub additional_price: Decimal,
}

impl From<journal_customizations::Model> for JournalCustomization {
    fn from(model: journal_customizations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            cover_text: model.cover_text,
            cover_material: model.cover_material,
            cover_color: model.cover_color,
            page_type: model.page_type,
            page_count: model.page_count,
            additional_price: model.additional_price,
        }
    }
}
