//! Fixed-point money.
//!
//! Amounts are `rust_decimal::Decimal`, so `0.1 + 0.2` is exactly `0.3` and repeated
//! recomputation of a total can never drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A monetary amount in the shop's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Whole units, e.g. `Money::whole(300)` for NT$300.
    pub fn whole(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// `self * quantity`, or `None` if the product does not fit in a `Decimal`.
    pub fn times(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money)
    }

    /// `self / quantity` when the division is exact, so that multiplying back gives
    /// `self` again.
    pub fn split_exact(self, quantity: u32) -> Option<Money> {
        if quantity == 0 {
            return None;
        }
        let unit = self.0.checked_div(Decimal::from(quantity))?;
        (unit.checked_mul(Decimal::from(quantity))? == self.0).then_some(Money(unit))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Display for Money {
    /// Trailing zeros are dropped: `600.00` prints as `600`, `29.90` as `29.9`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_sum_is_exact() {
        let total = [dec!(0.1), dec!(0.2), dec!(0.3)]
            .into_iter()
            .map(Money::new)
            .try_fold(Money::ZERO, Money::checked_add);
        assert_eq!(total, Some(Money::new(dec!(0.6))));
        assert_eq!(Money::new(Decimal::MAX).checked_add(Money::whole(1)), None);
    }

    #[test]
    fn test_times_and_overflow() {
        assert_eq!(Money::whole(300).times(2), Some(Money::whole(600)));
        assert_eq!(Money::new(dec!(29.99)).times(0), Some(Money::ZERO));
        assert_eq!(Money::new(Decimal::MAX).times(2), None);
    }

    #[test]
    fn test_split_exact() {
        assert_eq!(Money::whole(600).split_exact(2), Some(Money::whole(300)));
        assert_eq!(Money::new(dec!(59.98)).split_exact(2), Some(Money::new(dec!(29.99))));
        assert_eq!(Money::whole(100).split_exact(3), None);
        assert_eq!(Money::whole(100).split_exact(0), None);
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(Money::new(dec!(600.00)).to_string(), "600");
        assert_eq!(Money::new(dec!(29.90)).to_string(), "29.9");
        assert!(!Money::ZERO.is_negative());
        assert!(Money::new(dec!(-1)).is_negative());
    }

    #[test]
    fn test_json_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("29.99").unwrap();
        let from_string: Money = serde_json::from_str("\"29.99\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, Money::new(dec!(29.99)));
    }
}
