mod common;

use common::{create_currency, dec, new_session, setup_state};
use sea_orm::EntityTrait;
use stationery_shop_api::{
    dto::currency::ConvertQuery, entity::Sessions, error::AppError, services::currency_service,
};

#[tokio::test]
async fn new_session_falls_back_to_base_and_remembers_it() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_currency(&state, "USD", "$", "1").await?;
    create_currency(&state, "KES", "KSh", "150").await?;
    let session = new_session();

    let current = currency_service::current(&state, &session)
        .await?
        .data
        .expect("currency");
    assert_eq!(current.code, "USD");

    let stored = Sessions::find_by_id(session.0.clone())
        .one(&state.orm)
        .await?
        .expect("session row");
    assert_eq!(stored.currency_code.as_deref(), Some("USD"));
    Ok(())
}

#[tokio::test]
async fn without_base_the_first_active_currency_is_used() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_currency(&state, "KES", "KSh", "150").await?;
    create_currency(&state, "EUR", "€", "0.5").await?;

    let current = currency_service::current(&state, &new_session())
        .await?
        .data
        .expect("currency");
    assert_eq!(current.code, "EUR");
    Ok(())
}

#[tokio::test]
async fn empty_table_yields_synthetic_base() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let current = currency_service::current(&state, &new_session())
        .await?
        .data
        .expect("currency");
    assert_eq!(current.code, "USD");
    assert_eq!(current.exchange_rate, dec("1"));
    Ok(())
}

#[tokio::test]
async fn selected_currency_drives_conversion() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_currency(&state, "USD", "$", "1").await?;
    create_currency(&state, "KES", "KSh", "150").await?;
    let session = new_session();

    let selected = currency_service::select(&state, &session, "KES").await?;
    assert_eq!(selected.message, "Currency changed to KES");

    let display = currency_service::convert(&state, &session, ConvertQuery { amount: dec("10.00") })
        .await?
        .data
        .expect("display");
    assert_eq!(display.currency_code, "KES");
    assert_eq!(display.converted, dec("1500.00"));
    assert_eq!(display.formatted, "KSh1,500.00");

    let result = currency_service::select(&state, &session, "XYZ").await;
    assert!(matches!(result, Err(AppError::NotFound("Currency"))));

    // The failed selection left the previous choice alone.
    let current = currency_service::current(&state, &session)
        .await?
        .data
        .expect("currency");
    assert_eq!(current.code, "KES");

    let listed = currency_service::list_active(&state).await?.data.expect("list");
    assert_eq!(listed.items.len(), 2);
    Ok(())
}
