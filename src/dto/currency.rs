use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Currency;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectCurrencyRequest {
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CurrencyList {
    #[schema(value_type = Vec<Currency>)]
    pub items: Vec<Currency>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConvertQuery {
    pub amount: Decimal,
}

/// A base-currency amount rendered in the session's display currency.
#[derive(Debug, Serialize, ToSchema)]
pub struct PriceDisplay {
    pub amount: Decimal,
    pub currency_code: String,
    pub converted: Decimal,
    pub formatted: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertCurrencyRequest {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub exchange_rate: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
