//! Cálculo de precios de reservas
//!
//! Funciones puras: días de alquiler, precio base, extras y descuento.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::PricingConfig;
use crate::models::reservation::AddOn;
use crate::utils::errors::{AppError, AppResult};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Desglose de precio de una reserva
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub rental_days: i64,
    pub base_price: Decimal,
    pub add_on_price: Decimal,
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub total_price: Decimal,
}

/// Días de alquiler: techo de la duración en días, mínimo 1
pub fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<i64> {
    if end <= start {
        return Err(AppError::InvalidDateRange(format!(
            "end date {} must be after start date {}",
            end.to_rfc3339(),
            start.to_rfc3339()
        )));
    }

    let millis = (end - start).num_milliseconds().abs();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    Ok(days.max(1))
}

/// Suma de tarifas diarias de los extras seleccionados
pub fn add_on_daily_rate(add_ons: &BTreeSet<AddOn>) -> Decimal {
    add_ons.iter().map(AddOn::daily_rate).sum()
}

fn price_overflow() -> AppError {
    AppError::BadRequest("price exceeds the supported range".to_string())
}

/// Calcular el desglose completo
///
/// El descuento se aplica sobre el subtotal (base + extras), así que el
/// total nunca es negativo mientras el porcentaje esté entre 0 y 100.
pub fn quote(
    price_per_day: Decimal,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    add_ons: &BTreeSet<AddOn>,
    discount_percent: Decimal,
) -> AppResult<PriceQuote> {
    if price_per_day < Decimal::ZERO {
        return Err(AppError::BadRequest("price per day cannot be negative".to_string()));
    }
    let discount_percent = discount_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    let days = rental_days(start, end)?;
    let day_count = Decimal::from(days);

    let base_price = price_per_day.checked_mul(day_count).ok_or_else(price_overflow)?;
    let add_on_price = add_on_daily_rate(add_ons)
        .checked_mul(day_count)
        .ok_or_else(price_overflow)?;
    let subtotal = base_price.checked_add(add_on_price).ok_or_else(price_overflow)?;
    let discount_amount = subtotal
        .checked_mul(discount_percent)
        .ok_or_else(price_overflow)?
        / Decimal::ONE_HUNDRED;
    let discount_amount = discount_amount.round_dp(2);
    let total_price = (subtotal - discount_amount).max(Decimal::ZERO);

    Ok(PriceQuote {
        rental_days: days,
        base_price,
        add_on_price,
        subtotal,
        discount_percent,
        discount_amount,
        total_price,
    })
}

/// Resultado de evaluar un código de descuento
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountResolution {
    /// No se envió código
    None,
    Applied { code: String, percent: Decimal },
    /// Código desconocido: no bloquea la reserva, sólo se informa
    Rejected(String),
}

impl DiscountResolution {
    pub fn percent(&self) -> Decimal {
        match self {
            DiscountResolution::Applied { percent, .. } => *percent,
            _ => Decimal::ZERO,
        }
    }

    pub fn applied_code(&self) -> Option<String> {
        match self {
            DiscountResolution::Applied { code, .. } => Some(code.clone()),
            _ => None,
        }
    }
}

/// Política de un único código con porcentaje plano
#[derive(Debug, Clone)]
pub struct DiscountPolicy {
    code: String,
    percent: Decimal,
}

impl DiscountPolicy {
    pub fn new(code: impl Into<String>, percent: Decimal) -> Self {
        Self {
            code: code.into(),
            percent,
        }
    }

    pub fn resolve(&self, code: Option<&str>) -> DiscountResolution {
        match code.map(str::trim).filter(|c| !c.is_empty()) {
            None => DiscountResolution::None,
            Some(c) if c.eq_ignore_ascii_case(&self.code) => DiscountResolution::Applied {
                code: self.code.clone(),
                percent: self.percent,
            },
            Some(c) => DiscountResolution::Rejected(c.to_string()),
        }
    }
}

impl From<&PricingConfig> for DiscountPolicy {
    fn from(config: &PricingConfig) -> Self {
        Self::new(config.discount_code.clone(), config.discount_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn hundred() -> Decimal {
        Decimal::new(100, 0)
    }

    #[test]
    fn test_three_day_rental_base_price() {
        let q = quote(hundred(), day(1), day(4), &BTreeSet::new(), Decimal::ZERO).unwrap();
        assert_eq!(q.rental_days, 3);
        assert_eq!(q.base_price, Decimal::new(300, 0));
        assert_eq!(q.total_price, Decimal::new(300, 0));
    }

    #[test]
    fn test_insurance_add_on_is_charged_per_day() {
        let add_ons = BTreeSet::from([AddOn::Insurance]);
        let q = quote(hundred(), day(1), day(4), &add_ons, Decimal::ZERO).unwrap();
        assert_eq!(q.add_on_price, Decimal::new(75, 0));
        assert_eq!(q.total_price, Decimal::new(375, 0));
    }

    #[test]
    fn test_ten_percent_discount_applies_to_subtotal() {
        let add_ons = BTreeSet::from([AddOn::Insurance]);
        let q = quote(hundred(), day(1), day(4), &add_ons, Decimal::TEN).unwrap();
        assert_eq!(q.subtotal, Decimal::new(375, 0));
        assert_eq!(q.discount_amount, Decimal::new(375, 1));
        assert_eq!(q.total_price, Decimal::new(3375, 1));
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let start = day(1);
        let end = start + chrono::Duration::hours(25);
        assert_eq!(rental_days(start, end).unwrap(), 2);

        let end = start + chrono::Duration::hours(3);
        assert_eq!(rental_days(start, end).unwrap(), 1);
    }

    #[test]
    fn test_end_not_after_start_is_invalid() {
        assert!(matches!(
            rental_days(day(4), day(4)),
            Err(AppError::InvalidDateRange(_))
        ));
        assert!(matches!(
            quote(hundred(), day(5), day(4), &BTreeSet::new(), Decimal::ZERO),
            Err(AppError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn test_all_add_ons_sum() {
        let all: BTreeSet<AddOn> = AddOn::ALL.into_iter().collect();
        assert_eq!(add_on_daily_rate(&all), Decimal::new(80, 0));
    }

    #[test]
    fn test_total_never_negative_and_at_least_base_without_discount() {
        let all: BTreeSet<AddOn> = AddOn::ALL.into_iter().collect();
        for percent in [0i64, 10, 50, 100, 250] {
            let q = quote(Decimal::new(45, 0), day(1), day(9), &all, Decimal::new(percent, 0)).unwrap();
            assert!(q.rental_days >= 1);
            assert!(q.total_price >= Decimal::ZERO);
            if percent == 0 {
                assert!(q.total_price >= q.base_price);
            }
        }
    }

    #[test]
    fn test_huge_price_is_rejected_instead_of_overflowing() {
        let none = BTreeSet::new();
        let insurance = BTreeSet::from([AddOn::Insurance]);

        for (add_ons, days_end, percent) in [
            (&none, day(3), Decimal::ZERO),
            (&insurance, day(2), Decimal::ZERO),
            (&none, day(2), Decimal::TEN),
        ] {
            let result = quote(Decimal::MAX, day(1), days_end, add_ons, percent);
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }

        // Un solo día sin extras ni descuento sigue cabiendo
        let q = quote(Decimal::MAX, day(1), day(2), &none, Decimal::ZERO).unwrap();
        assert_eq!(q.total_price, Decimal::MAX);
    }

    #[test]
    fn test_discount_policy_resolution() {
        let policy = DiscountPolicy::new("CARFLOW10", Decimal::TEN);

        assert_eq!(policy.resolve(None), DiscountResolution::None);
        assert_eq!(policy.resolve(Some("  ")), DiscountResolution::None);
        assert_eq!(
            policy.resolve(Some(" carflow10 ")),
            DiscountResolution::Applied {
                code: "CARFLOW10".to_string(),
                percent: Decimal::TEN
            }
        );
        let rejected = policy.resolve(Some("FREE100"));
        assert_eq!(rejected, DiscountResolution::Rejected("FREE100".to_string()));
        assert_eq!(rejected.percent(), Decimal::ZERO);
    }
}
