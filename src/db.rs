use anyhow::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
    sea_query::{Index, IndexCreateStatement},
};

use crate::entity::{
    AuditLogs, CartItems, Carts, Categories, ContactMessages, Currencies, CustomizableProducts,
    DeliveryZones, JournalCustomizations, OrderItems, Orders, ProductReviews, Products, Sessions,
    Users, WishlistItems, Wishlists, cart_items, orders, wishlist_items,
};

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Creates every table from the entity definitions, then the composite indexes
/// the entities cannot express. Safe to run repeatedly.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(conn.get_database_backend());

    // Referenced tables first so Postgres can resolve the foreign keys.
    create_table(conn, &schema, Users).await?;
    create_table(conn, &schema, Categories).await?;
    create_table(conn, &schema, Currencies).await?;
    create_table(conn, &schema, DeliveryZones).await?;
    create_table(conn, &schema, Sessions).await?;
    create_table(conn, &schema, Products).await?;
    create_table(conn, &schema, ProductReviews).await?;
    create_table(conn, &schema, CustomizableProducts).await?;
    create_table(conn, &schema, JournalCustomizations).await?;
    create_table(conn, &schema, Carts).await?;
    create_table(conn, &schema, CartItems).await?;
    create_table(conn, &schema, Wishlists).await?;
    create_table(conn, &schema, WishlistItems).await?;
    create_table(conn, &schema, Orders).await?;
    create_table(conn, &schema, OrderItems).await?;
    create_table(conn, &schema, ContactMessages).await?;
    create_table(conn, &schema, AuditLogs).await?;

    let backend = conn.get_database_backend();
    for index in indexes() {
        conn.execute(backend.build(&index)).await?;
    }

    tracing::info!("database schema is up to date");
    Ok(())
}

async fn create_table<E: EntityTrait>(
    conn: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    conn.execute(conn.get_database_backend().build(&stmt))
        .await?;
    Ok(())
}

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("uq_cart_items_line")
            .table(CartItems)
            .col(cart_items::Column::CartId)
            .col(cart_items::Column::ProductId)
            .col(cart_items::Column::CustomizationKey)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("uq_wishlist_items_product")
            .table(WishlistItems)
            .col(wishlist_items::Column::WishlistId)
            .col(wishlist_items::Column::ProductId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_orders_email")
            .table(Orders)
            .col(orders::Column::Email)
            .if_not_exists()
            .to_owned(),
    ]
}
