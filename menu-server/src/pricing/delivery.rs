//! Delivery fee schedule
//!
//! A pure function of the chosen method and the order subtotal. Amounts
//! are whole units of the local currency and are absolute thresholds, not
//! to be rescaled.

use shared::models::DeliveryMethod;

/// Flat fee for fast delivery
pub const FAST_FEE: i64 = 25_000;
/// Flat fee for standard delivery below the free-shipping threshold
pub const STANDARD_FEE: i64 = 15_000;
/// Standard delivery is free from this subtotal upwards
pub const FREE_STANDARD_THRESHOLD: i64 = 50_000;

/// Compute the delivery fee for a method and subtotal
pub fn fee(method: DeliveryMethod, sub_total: i64) -> i64 {
    match method {
        DeliveryMethod::Fast => FAST_FEE,
        DeliveryMethod::Standard if sub_total >= FREE_STANDARD_THRESHOLD => 0,
        DeliveryMethod::Standard => STANDARD_FEE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_below_threshold() {
        assert_eq!(fee(DeliveryMethod::Standard, 0), STANDARD_FEE);
        assert_eq!(fee(DeliveryMethod::Standard, 49_999), STANDARD_FEE);
    }

    #[test]
    fn test_standard_at_and_above_threshold() {
        assert_eq!(fee(DeliveryMethod::Standard, 50_000), 0);
        assert_eq!(fee(DeliveryMethod::Standard, 120_000), 0);
    }

    #[test]
    fn test_fast_is_flat_regardless_of_subtotal() {
        assert_eq!(fee(DeliveryMethod::Fast, 0), FAST_FEE);
        assert_eq!(fee(DeliveryMethod::Fast, 49_999), FAST_FEE);
        assert_eq!(fee(DeliveryMethod::Fast, 1_000_000), FAST_FEE);
    }
}
