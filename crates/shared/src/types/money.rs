//! Money amounts with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Balances are plain `Decimal`s (they may be negative down to the special
//! limit); amounts moved by a transaction are `Amount`s, which are always > 0.
//!
//! Every stored money column is `NUMERIC(19, 2)`, so values are limited to
//! two decimal places and `±MAX_MONEY`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Decimal places kept for money.
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude a money column can hold: `99999999999999999.99`.
pub const MAX_MONEY: Decimal = Decimal::from_parts(0x89E7_FFFF, 0x8AC7_2304, 0, false, MONEY_SCALE);

/// Error returned for a value that is not valid money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Amount was zero or negative.
    #[error("Amount must be greater than zero, got {0}")]
    NotPositive(Decimal),

    /// More than two decimal places.
    #[error("Value {0} has more than 2 decimal places")]
    TooManyDecimals(Decimal),

    /// Outside `±MAX_MONEY`, or the arithmetic overflowed.
    #[error("Value exceeds the supported range of ±99999999999999999.99")]
    OutOfRange,
}

/// Checks that `value` fits a money column.
///
/// # Errors
///
/// Returns `TooManyDecimals` or `OutOfRange`.
pub fn check_money(value: Decimal) -> Result<Decimal, AmountError> {
    if value.abs() > MAX_MONEY {
        return Err(AmountError::OutOfRange);
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(AmountError::TooManyDecimals(value));
    }
    Ok(value)
}

/// Adds two money values, failing instead of overflowing.
///
/// # Errors
///
/// Returns `OutOfRange` if the sum leaves `±MAX_MONEY`.
pub fn money_add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, AmountError> {
    lhs.checked_add(rhs)
        .ok_or(AmountError::OutOfRange)
        .and_then(check_money)
}

/// Subtracts two money values, failing instead of overflowing.
///
/// # Errors
///
/// Returns `OutOfRange` if the difference leaves `±MAX_MONEY`.
pub fn money_sub(lhs: Decimal, rhs: Decimal) -> Result<Decimal, AmountError> {
    lhs.checked_sub(rhs)
        .ok_or(AmountError::OutOfRange)
        .and_then(check_money)
}

/// A strictly positive monetary amount.
///
/// Serialized as a JSON number; deserialization applies the same rules as
/// [`Amount::new`] whether the value arrives as a number or a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount.
    ///
    /// # Errors
    ///
    /// Returns `AmountError::NotPositive` if `value <= 0`, and
    /// `TooManyDecimals` or `OutOfRange` if it does not fit a money column.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }
        check_money(value).map(Self)
    }

    /// Returns the inner decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_new() {
        let amount = Amount::new(dec!(200.50)).unwrap();
        assert_eq!(amount.value(), dec!(200.50));
        assert_eq!(Decimal::from(amount), dec!(200.50));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-0.01))]
    #[case(dec!(-100))]
    fn test_amount_rejects_non_positive(#[case] value: Decimal) {
        assert_eq!(Amount::new(value), Err(AmountError::NotPositive(value)));
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let amount = Amount::new(dec!(200)).unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "200.0");
    }

    #[test]
    fn test_amount_deserialize() {
        let amount: Amount = serde_json::from_str("300.25").unwrap();
        assert_eq!(amount.value(), dec!(300.25));

        assert!(serde_json::from_str::<Amount>("0").is_err());
        assert!(serde_json::from_str::<Amount>("-5").is_err());
    }

    #[test]
    fn test_max_money_matches_column() {
        assert_eq!(MAX_MONEY, dec!(99999999999999999.99));
        assert!(Amount::new(MAX_MONEY).is_ok());
    }

    #[rstest]
    #[case::third_decimal(dec!(0.001))]
    #[case::sub_cent(dec!(10.125))]
    #[case::many_places(dec!(1.23456789))]
    fn test_amount_rejects_sub_cent_precision(#[case] value: Decimal) {
        assert_eq!(Amount::new(value), Err(AmountError::TooManyDecimals(value)));
    }

    #[rstest]
    #[case::whole(dec!(10))]
    #[case::cents(dec!(10.25))]
    #[case::trailing_zeros(dec!(10.500))]
    fn test_amount_accepts_cent_precision(#[case] value: Decimal) {
        assert!(Amount::new(value).is_ok());
    }

    #[rstest]
    #[case::one_cent_over(dec!(100000000000000000.00))]
    #[case::decimal_max(Decimal::MAX)]
    fn test_amount_rejects_out_of_range(#[case] value: Decimal) {
        assert_eq!(Amount::new(value), Err(AmountError::OutOfRange));
    }

    #[rstest]
    #[case::number("1000000000000000000")]
    #[case::string("\"1000000000000000000\"")]
    #[case::decimal_max_string("\"79228162514264337593543950335\"")]
    fn test_amount_deserialize_rejects_huge_values(#[case] json: &str) {
        assert!(serde_json::from_str::<Amount>(json).is_err());
    }

    #[test]
    fn test_huge_number_and_string_fail_the_same_way() {
        let number = serde_json::from_str::<Amount>("1000000000000000000").unwrap_err();
        let string = serde_json::from_str::<Amount>("\"1000000000000000000\"").unwrap_err();

        assert!(number.to_string().contains("supported range"));
        assert!(string.to_string().contains("supported range"));
    }

    #[test]
    fn test_money_arithmetic_is_checked() {
        assert_eq!(money_add(dec!(1200.50), dec!(300)), Ok(dec!(1500.50)));
        assert_eq!(money_sub(dec!(800), dec!(1000)), Ok(dec!(-200)));
        assert_eq!(money_add(MAX_MONEY, dec!(0.01)), Err(AmountError::OutOfRange));
        assert_eq!(money_sub(-MAX_MONEY, dec!(0.01)), Err(AmountError::OutOfRange));
        assert_eq!(money_add(Decimal::MAX, dec!(1)), Err(AmountError::OutOfRange));
    }

    #[rstest]
    #[case(dec!(-99999999999999999.99))]
    #[case(dec!(0))]
    #[case(dec!(-0.5))]
    fn test_check_money_accepts_column_values(#[case] value: Decimal) {
        assert_eq!(check_money(value), Ok(value));
    }
}
