//! Money rules shared by the catalog, cart and checkout: derived product
//! prices, zone delivery fees and display-currency conversion.
//!
//! Every amount here is in the base currency unless a function says otherwise.
//! Conversion results are for display and are never written back.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::entity::delivery_zones;

/// Sale price when it is a real discount, otherwise the list price.
pub fn current_price(price: Decimal, sale_price: Option<Decimal>) -> Decimal {
    match sale_price {
        Some(sale) if sale > Decimal::ZERO && sale < price => sale,
        _ => price,
    }
}

/// Whole-number percentage off the list price, rounding halves away from zero.
pub fn discount_percentage(price: Decimal, sale_price: Option<Decimal>) -> i64 {
    let current = current_price(price, sale_price);
    if price.is_zero() || current >= price {
        return 0;
    }
    ((price - current) * Decimal::ONE_HUNDRED / price)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

pub fn in_stock(stock: i32, is_available: bool) -> bool {
    stock > 0 && is_available
}

/// Fee for shipping an order of `order_subtotal` to `zone`.
///
/// Orders at or above the zone's free-delivery threshold ship free whatever
/// their weight; otherwise the flat fee plus the per-kilogram charge applies.
pub fn delivery_fee(
    zone: &delivery_zones::Model,
    order_subtotal: Decimal,
    weight_kg: Decimal,
) -> Decimal {
    match zone.min_order_free_delivery {
        Some(threshold) if order_subtotal >= threshold => Decimal::ZERO,
        _ => zone.base_fee + weight_kg * zone.per_kg_fee,
    }
}

/// `"min-max"` delivery estimate in days.
pub fn estimated_days(zone: &delivery_zones::Model) -> String {
    format!("{}-{}", zone.estimated_days_min, zone.estimated_days_max)
}

/// Base amount expressed in a display currency, rounded to cents
/// (half-to-even).
pub fn convert(amount: Decimal, exchange_rate: Decimal) -> Decimal {
    (amount * exchange_rate).round_dp(2)
}

/// `symbol` followed by the converted amount with thousands separators,
/// e.g. `KSh1,535.00`.
pub fn format_price(amount: Decimal, exchange_rate: Decimal, symbol: &str) -> String {
    format!("{symbol}{}", group_thousands(convert(amount, exchange_rate)))
}

fn group_thousands(amount: Decimal) -> String {
    let text = format!("{:.2}", amount.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    fn zone(base_fee: &str, per_kg_fee: &str, free_from: Option<&str>) -> delivery_zones::Model {
        delivery_zones::Model {
            id: Uuid::new_v4(),
            name: "Nairobi Metro".into(),
            description: String::new(),
            base_fee: dec(base_fee),
            per_kg_fee: dec(per_kg_fee),
            min_order_free_delivery: free_from.map(dec),
            estimated_days_min: 1,
            estimated_days_max: 3,
            is_active: true,
            display_order: 0,
        }
    }

    #[test]
    fn current_price_prefers_a_real_discount() {
        assert_eq!(current_price(dec("20.00"), None), dec("20.00"));
        assert_eq!(current_price(dec("20.00"), Some(dec("15.00"))), dec("15.00"));
        // Not a discount, so the list price stands.
        assert_eq!(current_price(dec("20.00"), Some(dec("25.00"))), dec("20.00"));
        assert_eq!(current_price(dec("20.00"), Some(dec("20.00"))), dec("20.00"));
        assert_eq!(current_price(dec("20.00"), Some(Decimal::ZERO)), dec("20.00"));
    }

    #[test]
    fn current_price_never_exceeds_list_price() {
        let price = dec("12.50");
        for sale in ["0.01", "5", "12.49", "12.50", "12.51", "99"] {
            assert!(current_price(price, Some(dec(sale))) <= price);
        }
    }

    #[test]
    fn discount_percentage_rounds_to_whole_percent() {
        assert_eq!(discount_percentage(dec("20.00"), Some(dec("15.00"))), 25);
        // 1/3 off
        assert_eq!(discount_percentage(dec("30.00"), Some(dec("20.00"))), 33);
        // 12.5% rounds away from zero
        assert_eq!(discount_percentage(dec("8.00"), Some(dec("7.00"))), 13);
        assert_eq!(discount_percentage(dec("8.00"), None), 0);
        assert_eq!(discount_percentage(Decimal::ZERO, Some(dec("1"))), 0);
    }

    #[test]
    fn in_stock_requires_stock_and_availability() {
        assert!(in_stock(3, true));
        assert!(!in_stock(0, true));
        assert!(!in_stock(3, false));
    }

    #[test]
    fn delivery_is_free_at_or_above_threshold_regardless_of_weight() {
        let zone = zone("600.00", "50.00", Some("15000.00"));
        assert_eq!(delivery_fee(&zone, dec("15000.00"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(delivery_fee(&zone, dec("20000.00"), dec("12.5")), Decimal::ZERO);
    }

    #[test]
    fn delivery_below_threshold_charges_flat_plus_weight() {
        let zone = zone("600.00", "50.00", Some("15000.00"));
        assert_eq!(delivery_fee(&zone, dec("14999.99"), Decimal::ZERO), dec("600.00"));
        assert_eq!(delivery_fee(&zone, dec("100.00"), dec("2.5")), dec("725.00"));
    }

    #[test]
    fn delivery_without_threshold_always_charges() {
        let zone = zone("300.00", "0", None);
        assert_eq!(delivery_fee(&zone, dec("1000000"), Decimal::ZERO), dec("300.00"));
        assert_eq!(estimated_days(&zone), "1-3");
    }

    #[test]
    fn convert_rounds_to_cents() {
        assert_eq!(convert(dec("10.00"), dec("153.5")), dec("1535.00"));
        assert_eq!(convert(dec("19.99"), dec("0.92")), dec("18.39"));
        assert_eq!(convert(dec("1.00"), Decimal::ONE), dec("1.00"));
    }

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price(dec("10"), dec("153.5"), "KSh"), "KSh1,535.00");
        assert_eq!(format_price(dec("9.5"), Decimal::ONE, "$"), "$9.50");
        assert_eq!(format_price(dec("1234567.891"), Decimal::ONE, "€"), "€1,234,567.89");
        assert_eq!(format_price(Decimal::ZERO, Decimal::ONE, "£"), "£0.00");
    }
}
