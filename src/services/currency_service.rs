use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    audit::log_audit,
    config::AppConfig,
    dto::currency::{ConvertQuery, CurrencyList, PriceDisplay},
    entity::{
        currencies::{Column as CurrencyCol, Entity as Currencies, Model as CurrencyModel},
        sessions::Model as SessionModel,
    },
    error::{AppError, AppResult},
    middleware::session::SessionKey,
    models::Currency,
    pricing,
    response::{ApiResponse, Meta},
    services::session_service,
    state::AppState,
};

async fn find_active<C: ConnectionTrait>(conn: &C, code: &str) -> AppResult<Option<CurrencyModel>> {
    Ok(Currencies::find()
        .filter(CurrencyCol::Code.eq(code.to_uppercase()))
        .filter(CurrencyCol::IsActive.eq(true))
        .one(conn)
        .await?)
}

/// Exchange rate of an active currency.
pub async fn rate<C: ConnectionTrait>(conn: &C, code: &str) -> AppResult<Decimal> {
    match find_active(conn, code).await? {
        Some(currency) => Ok(currency.exchange_rate),
        None => Err(AppError::NotFound("Currency")),
    }
}

fn synthetic_base(config: &AppConfig) -> Currency {
    Currency {
        code: config.base_currency.clone(),
        name: config.base_currency.clone(),
        symbol: config.base_currency.clone(),
        exchange_rate: Decimal::ONE,
        is_active: true,
    }
}

/// Display currency for a session: its own choice, then the base currency,
/// then the first active one. A fallback is written back to the session.
pub async fn resolve_current<C: ConnectionTrait>(
    conn: &C,
    config: &AppConfig,
    key: &SessionKey,
) -> AppResult<Currency> {
    let session = session_service::load(conn, key).await?;

    if let Some(code) = session.currency_code.as_deref() {
        if let Some(currency) = find_active(conn, code).await? {
            return Ok(currency.into());
        }
    }

    let fallback = match find_active(conn, &config.base_currency).await? {
        Some(currency) => Some(currency),
        None => {
            Currencies::find()
                .filter(CurrencyCol::IsActive.eq(true))
                .order_by_asc(CurrencyCol::Code)
                .one(conn)
                .await?
        }
    };

    match fallback {
        Some(currency) => {
            if session.currency_code.as_deref() != Some(currency.code.as_str()) {
                session_service::set_currency(conn, key, Some(currency.code.clone())).await?;
            }
            Ok(currency.into())
        }
        None => Ok(synthetic_base(config)),
    }
}

/// Currency code and rate recorded on a new order. Unknown codes fall back
/// to the base currency at rate 1.
pub async fn order_currency<C: ConnectionTrait>(
    conn: &C,
    config: &AppConfig,
    session: &SessionModel,
) -> AppResult<(String, Decimal)> {
    if let Some(code) = session.currency_code.as_deref() {
        let found = Currencies::find()
            .filter(CurrencyCol::Code.eq(code))
            .one(conn)
            .await?;
        if let Some(currency) = found {
            return Ok((currency.code, currency.exchange_rate));
        }
    }
    Ok((config.base_currency.clone(), Decimal::ONE))
}

pub async fn list_active(state: &AppState) -> AppResult<ApiResponse<CurrencyList>> {
    let items: Vec<Currency> = Currencies::find()
        .filter(CurrencyCol::IsActive.eq(true))
        .order_by_asc(CurrencyCol::Code)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Currency::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Currencies",
        CurrencyList { items },
        Some(Meta::list(total)),
    ))
}

pub async fn current(state: &AppState, session: &SessionKey) -> AppResult<ApiResponse<Currency>> {
    let currency = resolve_current(&state.orm, &state.config, session).await?;
    Ok(ApiResponse::success("Current currency", currency, Some(Meta::empty())))
}

pub async fn select(
    state: &AppState,
    session: &SessionKey,
    code: &str,
) -> AppResult<ApiResponse<Currency>> {
    let currency = match find_active(&state.orm, code.trim()).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound("Currency")),
    };

    session_service::set_currency(&state.orm, session, Some(currency.code.clone())).await?;
    tracing::debug!(session_key = %session.0, code = %currency.code, "currency selected");

    if let Err(err) = log_audit(
        &state.orm,
        None,
        Some(session.as_str()),
        "currency_select",
        Some("sessions"),
        Some(serde_json::json!({ "code": currency.code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        format!("Currency changed to {}", currency.code),
        currency.into(),
        Some(Meta::empty()),
    ))
}

/// Renders a base-currency amount in the session's display currency.
pub async fn convert(
    state: &AppState,
    session: &SessionKey,
    query: ConvertQuery,
) -> AppResult<ApiResponse<PriceDisplay>> {
    let currency = resolve_current(&state.orm, &state.config, session).await?;
    let data = PriceDisplay {
        amount: query.amount,
        converted: pricing::convert(query.amount, currency.exchange_rate),
        formatted: pricing::format_price(query.amount, currency.exchange_rate, &currency.symbol),
        currency_code: currency.code,
    };
    Ok(ApiResponse::success("Converted", data, Some(Meta::empty())))
}
