mod common;

use common::{create_category, create_product, create_user, create_zone, dec, new_session, setup_state};
use stationery_shop_api::{
    dto::{
        cart::AddToCartRequest,
        contact::{ContactRequest, UpdateContactRequest},
        currency::UpsertCurrencyRequest,
        delivery::CreateZoneRequest,
        orders::{CheckoutRequest, UpdateOrderRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    error::AppError,
    routes::params::{OrderListQuery, Pagination},
    services::{admin_service, cart_service, contact_service, order_service},
};

fn new_product(category_id: uuid::Uuid, name: &str, price: &str, sale: Option<&str>) -> CreateProductRequest {
    CreateProductRequest {
        category_id,
        name: name.to_string(),
        slug: None,
        description: String::new(),
        short_description: String::new(),
        price: dec(price),
        sale_price: sale.map(dec),
        stock: 10,
        cover_type: None,
        size: None,
        pages: None,
        paper_type: None,
        color: None,
        is_featured: false,
        is_new: true,
        is_bestseller: false,
    }
}

#[tokio::test]
async fn only_admins_reach_admin_operations() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let customer = create_user(&state, "customer@example.com", "user").await?;
    let category = create_category(&state, "Books").await?;

    let result =
        admin_service::create_product(&state, &customer, new_product(category.id, "Atlas", "10", None)).await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    let result = admin_service::list_all_orders(&state, &customer, OrderListQuery::default()).await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    let result = admin_service::list_contact_messages(&state, &customer, Pagination::default()).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn product_management_validates_prices_and_slugs() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, "admin@example.com", "admin").await?;
    let category = create_category(&state, "Journals").await?;

    let created = admin_service::create_product(
        &state,
        &admin,
        new_product(category.id, "Linen Bullet Journal", "24.00", Some("18.00")),
    )
    .await?
    .data
    .expect("product");
    assert_eq!(created.slug, "linen-bullet-journal");
    assert_eq!(created.current_price, dec("18.00"));

    let duplicate = admin_service::create_product(
        &state,
        &admin,
        new_product(category.id, "Linen Bullet Journal", "20.00", None),
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let bad_sale = admin_service::create_product(
        &state,
        &admin,
        new_product(category.id, "Cheap Journal", "10.00", Some("12.00")),
    )
    .await;
    assert!(matches!(bad_sale, Err(AppError::Validation(_))));

    let updated = admin_service::update_product(
        &state,
        &admin,
        created.id,
        UpdateProductRequest {
            clear_sale_price: true,
            stock: Some(3),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(updated.sale_price, None);
    assert_eq!(updated.current_price, dec("24.00"));
    assert_eq!(updated.stock, 3);

    admin_service::delete_product(&state, &admin, created.id).await?;
    let gone = admin_service::delete_product(&state, &admin, created.id).await;
    assert!(matches!(gone, Err(AppError::NotFound("Product"))));
    Ok(())
}

#[tokio::test]
async fn order_statuses_are_validated() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, "admin@example.com", "admin").await?;
    let category = create_category(&state, "Notebooks").await?;
    let notebook = create_product(&state, &category, "Grid Notebook", "6.00", None).await?;
    let zone = create_zone(&state, "Rest of Kenya", "800.00", None, true).await?;
    let session = new_session();
    cart_service::add_item(
        &state,
        &session,
        AddToCartRequest {
            product_id: notebook.id,
            quantity: 4,
            customization: None,
        },
    )
    .await?;
    let placed = order_service::place_order(
        &state,
        &session,
        None,
        CheckoutRequest {
            first_name: "Otieno".into(),
            last_name: "Odhiambo".into(),
            email: "otieno@example.com".into(),
            phone: "0711111111".into(),
            address: "Oginga Odinga Street".into(),
            city: "Kisumu".into(),
            delivery_zone_id: Some(zone.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("order");
    let order_id = placed.order.id;

    let invalid = admin_service::update_order(
        &state,
        &admin,
        order_id,
        UpdateOrderRequest {
            status: Some("teleported".into()),
            payment_status: None,
            admin_notes: None,
        },
    )
    .await;
    assert!(matches!(invalid, Err(AppError::Validation(_))));

    let updated = admin_service::update_order(
        &state,
        &admin,
        order_id,
        UpdateOrderRequest {
            status: Some("shipped".into()),
            payment_status: Some("paid".into()),
            admin_notes: Some("Sent with courier".into()),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(updated.order.status, "shipped");
    assert_eq!(updated.order.payment_status, "paid");
    assert_eq!(updated.order.admin_notes.as_deref(), Some("Sent with courier"));
    // Totals never change after placement.
    assert_eq!(updated.order.total, dec("824.00"));

    let shipped = admin_service::list_all_orders(
        &state,
        &admin,
        OrderListQuery {
            status: Some("shipped".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("orders");
    assert_eq!(shipped.items.len(), 1);

    // The customer-facing confirmation never exposes admin notes.
    let public = order_service::confirmation(&state, &session, &placed.order.order_number)
        .await?
        .data
        .expect("confirmation");
    assert!(public.order.admin_notes.is_none());
    Ok(())
}

#[tokio::test]
async fn zones_currencies_and_contact_messages() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, "admin@example.com", "admin").await?;

    let bad_zone = admin_service::create_zone(
        &state,
        &admin,
        CreateZoneRequest {
            name: "Backwards".into(),
            description: String::new(),
            base_fee: dec("100"),
            per_kg_fee: dec("0"),
            min_order_free_delivery: None,
            estimated_days_min: 5,
            estimated_days_max: 2,
            display_order: 0,
        },
    )
    .await;
    assert!(matches!(bad_zone, Err(AppError::Validation(_))));

    let zone = admin_service::create_zone(
        &state,
        &admin,
        CreateZoneRequest {
            name: "Coast".into(),
            description: "Mombasa and Malindi".into(),
            base_fee: dec("650"),
            per_kg_fee: dec("50"),
            min_order_free_delivery: Some(dec("15000")),
            estimated_days_min: 3,
            estimated_days_max: 5,
            display_order: 6,
        },
    )
    .await?
    .data
    .expect("zone");
    assert_eq!(zone.estimated_days, "3-5");

    let bad_rate = admin_service::upsert_currency(
        &state,
        &admin,
        UpsertCurrencyRequest {
            code: "KES".into(),
            name: "Kenyan Shilling".into(),
            symbol: "KSh".into(),
            exchange_rate: dec("0"),
            is_active: true,
        },
    )
    .await;
    assert!(matches!(bad_rate, Err(AppError::Validation(_))));

    for rate in ["150", "160"] {
        admin_service::upsert_currency(
            &state,
            &admin,
            UpsertCurrencyRequest {
                code: "kes".into(),
                name: "Kenyan Shilling".into(),
                symbol: "KSh".into(),
                exchange_rate: dec(rate),
                is_active: true,
            },
        )
        .await?;
    }
    let listed = stationery_shop_api::services::currency_service::list_active(&state)
        .await?
        .data
        .expect("currencies");
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].code, "KES");
    assert_eq!(listed.items[0].exchange_rate, dec("160"));

    let incomplete = contact_service::submit(
        &state,
        ContactRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            subject: String::new(),
            message: "Hello".into(),
        },
    )
    .await;
    assert!(matches!(incomplete, Err(AppError::Validation(_))));

    let sent = contact_service::submit(
        &state,
        ContactRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            subject: "Bulk order".into(),
            message: "Do you print logos on covers?".into(),
        },
    )
    .await?
    .data
    .expect("message");
    assert!(!sent.is_read);

    let updated = admin_service::update_contact_message(
        &state,
        &admin,
        sent.id,
        UpdateContactRequest {
            is_read: Some(true),
            is_replied: None,
        },
    )
    .await?
    .data
    .expect("message");
    assert!(updated.is_read);
    assert!(!updated.is_replied);
    Ok(())
}
