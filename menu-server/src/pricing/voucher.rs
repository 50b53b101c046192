//! Voucher discount resolution
//!
//! Percentage math runs in `Decimal` and is rounded half-away-from-zero
//! back to whole currency units; the result is clamped so a discount is
//! never negative and never exceeds the subtotal.

use super::engine::PricingError;
use rust_decimal::prelude::*;
use shared::models::{Voucher, VoucherKind};

/// Convert f64 voucher values to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to a whole currency unit, half away from zero
#[inline]
fn to_amount(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Resolve the discount amount a voucher grants on a subtotal.
///
/// An inactive voucher grants 0 (the caller decides whether that is an
/// error). A subtotal under the voucher minimum is rejected rather than
/// silently granting nothing.
pub fn resolve(voucher: &Voucher, sub_total: i64) -> Result<i64, PricingError> {
    if !voucher.is_active {
        return Ok(0);
    }
    if sub_total < voucher.min_order_value {
        return Err(PricingError::VoucherMinimumNotMet {
            code: voucher.code.clone(),
            minimum: voucher.min_order_value,
        });
    }

    let discount = match voucher.kind {
        VoucherKind::Percentage => {
            let raw = Decimal::from(sub_total) * to_decimal(voucher.value) / Decimal::ONE_HUNDRED;
            let amount = to_amount(raw);
            match voucher.max_discount {
                Some(cap) if amount > cap => cap,
                _ => amount,
            }
        }
        VoucherKind::Fixed => to_amount(to_decimal(voucher.value)),
    };

    Ok(discount.clamp(0, sub_total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::util::now_millis;

    fn make_voucher(kind: VoucherKind, value: f64) -> Voucher {
        Voucher {
            id: 1,
            code: "TEST".to_string(),
            description: None,
            kind,
            value,
            min_order_value: 0,
            max_discount: None,
            is_active: true,
            created_at: now_millis(),
            updated_at: now_millis(),
        }
    }

    #[test]
    fn test_percentage_discount() {
        let voucher = make_voucher(VoucherKind::Percentage, 10.0);
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 3_000);
    }

    #[test]
    fn test_percentage_capped() {
        let mut voucher = make_voucher(VoucherKind::Percentage, 50.0);
        voucher.max_discount = Some(10_000);
        // Raw discount 15000, capped to 10000
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 10_000);
    }

    #[test]
    fn test_percentage_under_cap_unaffected() {
        let mut voucher = make_voucher(VoucherKind::Percentage, 10.0);
        voucher.max_discount = Some(10_000);
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 3_000);
    }

    #[test]
    fn test_percentage_rounds_half_away_from_zero() {
        // 12.5% of 30002 = 3750.25 -> 3750; 12.5% of 30004 = 3750.5 -> 3751
        let voucher = make_voucher(VoucherKind::Percentage, 12.5);
        assert_eq!(resolve(&voucher, 30_002).unwrap(), 3_750);
        assert_eq!(resolve(&voucher, 30_004).unwrap(), 3_751);
    }

    #[test]
    fn test_fixed_discount() {
        let voucher = make_voucher(VoucherKind::Fixed, 5_000.0);
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 5_000);
    }

    #[test]
    fn test_fixed_clamped_to_subtotal() {
        let voucher = make_voucher(VoucherKind::Fixed, 50_000.0);
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 30_000);
    }

    #[test]
    fn test_negative_value_clamped_to_zero() {
        let voucher = make_voucher(VoucherKind::Fixed, -5_000.0);
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 0);
    }

    #[test]
    fn test_inactive_grants_nothing() {
        let mut voucher = make_voucher(VoucherKind::Percentage, 50.0);
        voucher.is_active = false;
        assert_eq!(resolve(&voucher, 30_000).unwrap(), 0);
    }

    #[test]
    fn test_minimum_not_met_is_an_error() {
        let mut voucher = make_voucher(VoucherKind::Percentage, 10.0);
        voucher.min_order_value = 50_000;
        let err = resolve(&voucher, 30_000).unwrap_err();
        match err {
            PricingError::VoucherMinimumNotMet { minimum, .. } => assert_eq!(minimum, 50_000),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_minimum_exactly_met() {
        let mut voucher = make_voucher(VoucherKind::Percentage, 10.0);
        voucher.min_order_value = 50_000;
        assert_eq!(resolve(&voucher, 50_000).unwrap(), 5_000);
    }
}
