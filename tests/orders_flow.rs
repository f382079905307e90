mod common;

use common::{create_category, create_currency, create_product, create_user, create_zone, dec, new_session, setup_state};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use stationery_shop_api::{
    dto::{cart::AddToCartRequest, orders::CheckoutRequest},
    entity::{OrderItems, Orders, Sessions},
    error::AppError,
    middleware::session::SessionKey,
    services::{cart_service, currency_service, delivery_service, order_service},
    state::AppState,
};
use uuid::Uuid;

fn checkout(zone_id: Option<Uuid>) -> CheckoutRequest {
    CheckoutRequest {
        first_name: "Amina".into(),
        last_name: "Otieno".into(),
        email: "amina@example.com".into(),
        phone: "+254700000000".into(),
        address: "12 Moi Avenue".into(),
        city: "Nairobi".into(),
        delivery_zone_id: zone_id,
        ..Default::default()
    }
}

async fn fill_cart(state: &AppState, session: &SessionKey) -> anyhow::Result<()> {
    let category = create_category(state, "Journals").await?;
    let first = create_product(state, &category, "Dotted Journal", "20.00", None).await?;
    let second = create_product(state, &category, "Lined Journal", "12.50", None).await?;
    for (product_id, quantity) in [(first.id, 2), (second.id, 3)] {
        cart_service::add_item(
            state,
            session,
            AddToCartRequest {
                product_id,
                quantity,
                customization: None,
            },
        )
        .await?;
    }
    Ok(())
}

#[tokio::test]
async fn checkout_snapshots_cart_and_clears_it() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let zone = create_zone(&state, "Nairobi Metro", "300.00", None, true).await?;

    let placed = order_service::place_order(&state, &session, None, checkout(Some(zone.id)))
        .await?
        .data
        .expect("order");

    let order = &placed.order;
    assert_eq!(order.subtotal, dec("77.50"));
    assert_eq!(order.delivery_fee, dec("300.00"));
    assert_eq!(order.total, dec("377.50"));
    assert_eq!(order.status, "pending");
    assert_eq!(order.payment_status, "pending");
    assert_eq!(order.country, "Kenya");
    assert_eq!(order.currency_code, "USD");
    assert!(order.order_number.starts_with("SH"));
    assert!(order.admin_notes.is_none());

    assert_eq!(placed.items.len(), 2);
    let mut snapshot: Vec<_> = placed
        .items
        .iter()
        .map(|item| (item.product_name.as_str(), item.quantity, item.unit_price))
        .collect();
    snapshot.sort();
    assert_eq!(
        snapshot,
        [
            ("Dotted Journal", 2, dec("20.00")),
            ("Lined Journal", 3, dec("12.50")),
        ]
    );
    let line_total = placed
        .items
        .iter()
        .fold(dec("0"), |sum, item| sum + item.total_price);
    assert_eq!(line_total, order.subtotal);
    for item in &placed.items {
        assert_eq!(item.total_price, item.unit_price * rust_decimal::Decimal::from(item.quantity));
    }

    let cart = cart_service::view_cart(&state, &session).await?.data.expect("cart");
    assert!(cart.items.is_empty());

    let stored = Sessions::find_by_id(session.0.clone())
        .one(&state.orm)
        .await?
        .expect("session row");
    assert!(stored.delivery_zone_id.is_none());
    Ok(())
}

#[tokio::test]
async fn checkout_uses_session_zone_and_links_user() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let zone = create_zone(&state, "Nairobi CBD", "200.00", Some("50.00"), true).await?;
    delivery_service::select_zone(&state, &session, zone.id).await?;
    let user = create_user(&state, "amina@example.com", "user").await?;

    let placed = order_service::place_order(&state, &session, Some(&user), checkout(None))
        .await?
        .data
        .expect("order");
    assert_eq!(placed.order.delivery_zone_id, Some(zone.id));
    // Above the free-delivery threshold.
    assert_eq!(placed.order.delivery_fee, dec("0"));
    assert_eq!(placed.order.total, placed.order.subtotal);
    assert_eq!(placed.order.user_id, Some(user.user_id));
    Ok(())
}

#[tokio::test]
async fn checkout_records_display_currency() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let zone = create_zone(&state, "Major Towns", "600.00", None, true).await?;
    create_currency(&state, "KES", "KSh", "150").await?;
    currency_service::select(&state, &session, "kes").await?;

    let placed = order_service::place_order(&state, &session, None, checkout(Some(zone.id)))
        .await?
        .data
        .expect("order");
    assert_eq!(placed.order.currency_code, "KES");
    assert_eq!(placed.order.exchange_rate, dec("150"));
    // Stored amounts stay in the base currency.
    assert_eq!(placed.order.subtotal, dec("77.50"));
    Ok(())
}

#[tokio::test]
async fn empty_cart_is_rejected_without_side_effects() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    let zone = create_zone(&state, "Nairobi Metro", "300.00", None, true).await?;

    let result = order_service::place_order(&state, &session, None, checkout(Some(zone.id))).await;
    assert!(matches!(result, Err(AppError::EmptyCart)));
    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_reported_and_cart_is_kept() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;

    let mut payload = checkout(None);
    payload.phone = "  ".into();
    let result = order_service::place_order(&state, &session, None, payload).await;
    match result {
        Err(AppError::Validation(message)) => {
            assert!(message.contains("phone"));
            assert!(message.contains("delivery_zone"));
        }
        _ => panic!("expected a validation error"),
    }

    let cart = cart_service::view_cart(&state, &session).await?.data.expect("cart");
    assert_eq!(cart.items.len(), 2);
    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn inactive_or_unknown_zone_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let closed = create_zone(&state, "Closed Zone", "100.00", None, false).await?;

    let result = order_service::place_order(&state, &session, None, checkout(Some(closed.id))).await;
    assert!(matches!(result, Err(AppError::InvalidZone)));

    let result =
        order_service::place_order(&state, &session, None, checkout(Some(Uuid::new_v4()))).await;
    assert!(matches!(result, Err(AppError::InvalidZone)));

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn confirmation_is_private_to_the_placing_session() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let zone = create_zone(&state, "Nairobi Metro", "300.00", None, true).await?;

    let placed = order_service::place_order(&state, &session, None, checkout(Some(zone.id)))
        .await?
        .data
        .expect("order");
    let number = placed.order.order_number.clone();

    let own = order_service::confirmation(&state, &session, &number)
        .await?
        .data
        .expect("confirmation");
    assert_eq!(own.items.len(), 2);

    let shouted = order_service::confirmation(&state, &session, &format!(" {} ", number.to_lowercase()))
        .await?
        .data
        .expect("confirmation");
    assert_eq!(shouted.order.order_number, number);

    let result = order_service::confirmation(&state, &new_session(), &number).await;
    assert!(matches!(result, Err(AppError::NotFound("Order"))));

    // Tracking only needs the number.
    let tracking = order_service::track(&state, &number.to_lowercase())
        .await?
        .data
        .expect("tracking");
    assert_eq!(tracking.status, "pending");
    assert_eq!(tracking.total, dec("377.50"));
    Ok(())
}

#[tokio::test]
async fn prices_are_frozen_after_placement() -> anyhow::Result<()> {
    use sea_orm::{ActiveModelTrait, Set};
    use stationery_shop_api::entity::products;

    let state = setup_state().await?;
    let session = new_session();
    let category = create_category(&state, "Books").await?;
    let book = create_product(&state, &category, "Vintage Book", "30.00", None).await?;
    cart_service::add_item(
        &state,
        &session,
        AddToCartRequest {
            product_id: book.id,
            quantity: 1,
            customization: None,
        },
    )
    .await?;
    let zone = create_zone(&state, "Nairobi Metro", "300.00", None, true).await?;
    let placed = order_service::place_order(&state, &session, None, checkout(Some(zone.id)))
        .await?
        .data
        .expect("order");

    let mut active: products::ActiveModel = book.into();
    active.price = Set(dec("99.00"));
    active.update(&state.orm).await?;

    let again = order_service::confirmation(&state, &session, &placed.order.order_number)
        .await?
        .data
        .expect("confirmation");
    assert_eq!(again.items[0].unit_price, dec("30.00"));
    assert_eq!(again.order.subtotal, dec("30.00"));
    Ok(())
}

#[tokio::test]
async fn failed_item_snapshot_rolls_back_the_whole_order() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let zone = create_zone(&state, "Nairobi Metro", "300.00", None, true).await?;
    delivery_service::select_zone(&state, &session, zone.id).await?;

    // Item inserts fail after the order row is written inside the transaction.
    state.orm.execute_unprepared("DROP TABLE order_items").await?;

    let result = order_service::place_order(&state, &session, None, checkout(None)).await;
    assert!(matches!(result, Err(AppError::OrmError(_))));

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    let cart = cart_service::view_cart(&state, &session).await?.data.expect("cart");
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_items, 5);
    let stored = Sessions::find_by_id(session.0.clone())
        .one(&state.orm)
        .await?
        .expect("session row");
    assert_eq!(stored.delivery_zone_id, Some(zone.id));
    Ok(())
}

#[tokio::test]
async fn exhausted_order_numbers_are_a_conflict() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let session = new_session();
    fill_cart(&state, &session).await?;
    let zone = create_zone(&state, "Nairobi Metro", "300.00", None, true).await?;
    let placed = order_service::place_order(&state, &session, None, checkout(Some(zone.id)))
        .await?
        .data
        .expect("order");
    let taken = placed.order.order_number;

    let mut attempts = 0;
    let result = order_service::allocate_order_number(&state.orm, || {
        attempts += 1;
        taken.clone()
    })
    .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(attempts, 10);

    // A free candidate after a collision is accepted.
    let mut candidates = vec!["SH00000001".to_string(), taken.clone()];
    let allocated =
        order_service::allocate_order_number(&state.orm, || candidates.pop().unwrap_or_default())
            .await?;
    assert_eq!(allocated, "SH00000001");
    Ok(())
}
