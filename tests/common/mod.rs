#![allow(dead_code)]

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, Set};
use stationery_shop_api::{
    config::AppConfig,
    db::run_migrations,
    entity::{categories, currencies, delivery_zones, products, users},
    middleware::{auth::AuthUser, session::SessionKey},
    state::AppState,
};
use uuid::Uuid;

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal")
}

/// Fresh in-memory database with the full schema.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = Database::connect("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, AppConfig::for_database("sqlite::memory:")))
}

pub fn new_session() -> SessionKey {
    SessionKey::generate()
}

pub async fn create_category(state: &AppState, name: &str) -> anyhow::Result<categories::Model> {
    let now = Utc::now();
    Ok(categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        slug: Set(name.to_lowercase().replace(' ', "-")),
        description: Set(format!("{name} for every desk")),
        icon_class: Set("fa-book".to_string()),
        is_active: Set(true),
        display_order: Set(0),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?)
}

pub async fn create_product(
    state: &AppState,
    category: &categories::Model,
    name: &str,
    price: &str,
    sale_price: Option<&str>,
) -> anyhow::Result<products::Model> {
    let now = Utc::now();
    Ok(products::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category.id),
        name: Set(name.to_string()),
        slug: Set(name.to_lowercase().replace(' ', "-")),
        description: Set(format!("{name} with acid-free paper")),
        short_description: Set(String::new()),
        price: Set(dec(price)),
        sale_price: Set(sale_price.map(dec)),
        cover_type: Set(Some("hardcover".to_string())),
        size: Set(Some("a5".to_string())),
        pages: Set(Some(200)),
        paper_type: Set(None),
        color: Set(None),
        stock: Set(25),
        is_available: Set(true),
        is_featured: Set(false),
        is_new: Set(false),
        is_bestseller: Set(false),
        meta_title: Set(String::new()),
        meta_description: Set(String::new()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?)
}

pub async fn create_zone(
    state: &AppState,
    name: &str,
    base_fee: &str,
    free_from: Option<&str>,
    is_active: bool,
) -> anyhow::Result<delivery_zones::Model> {
    Ok(delivery_zones::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(String::new()),
        base_fee: Set(dec(base_fee)),
        per_kg_fee: Set(Decimal::ZERO),
        min_order_free_delivery: Set(free_from.map(dec)),
        estimated_days_min: Set(1),
        estimated_days_max: Set(3),
        is_active: Set(is_active),
        display_order: Set(0),
    }
    .insert(&state.orm)
    .await?)
}

pub async fn create_currency(
    state: &AppState,
    code: &str,
    symbol: &str,
    rate: &str,
) -> anyhow::Result<currencies::Model> {
    Ok(currencies::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        name: Set(code.to_string()),
        symbol: Set(symbol.to_string()),
        exchange_rate: Set(dec(rate)),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?)
}

/// Inserts an account directly and returns it as an authenticated caller.
pub async fn create_user(state: &AppState, email: &str, role: &str) -> anyhow::Result<AuthUser> {
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        first_name: Set("Test".to_string()),
        last_name: Set("User".to_string()),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}
