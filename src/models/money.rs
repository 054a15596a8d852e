//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (paise, cents) as `i64` so that
//! totals and differences are exact. On disk an amount is a plain JSON
//! number such as `-100.0` or `50000.5`.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Default currency symbol used by `Display`
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Largest magnitude an amount may hold (10 trillion units)
///
/// Small enough that every amount to the paisa survives the JSON number on disk.
pub const MAX_MINOR: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount stored as minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// assert_eq!(amount.major(), 10);
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole units
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Create a Money amount from a floating-point value, rounding to the nearest minor unit
    ///
    /// Returns `None` for NaN, infinities and values too large to represent.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let minor = (value * 100.0).round();
        if minor.abs() > MAX_MINOR as f64 {
            return None;
        }
        Some(Self(minor as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The amount as a floating-point number of whole units
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "$10", "1,500.25".
    /// A third decimal digit rounds the amount half-up.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let s = s
            .strip_prefix(DEFAULT_CURRENCY_SYMBOL)
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim_start();
        let s: String = s.chars().filter(|c| *c != ',').collect();

        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::OutOfRange)?
        };

        let digits: Vec<i64> = fraction
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect();
        let mut minor = digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).copied().unwrap_or(0) >= 5 {
            minor += 1;
        }

        let total = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(minor))
            .filter(|total| *total <= MAX_MINOR)
            .ok_or(MoneyParseError::OutOfRange)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol and thousands grouping, e.g. `-₹1,500.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.major().unsigned_abs()),
            self.minor_part()
        )
    }

    /// Format rounded to whole units with grouping, e.g. `₹1,501`
    pub fn format_whole(&self, symbol: &str) -> String {
        let rounded = self.0.unsigned_abs().saturating_add(50) / 100;
        let sign = if self.is_negative() && rounded != 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, group_thousands(rounded))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a numeric amount")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Money::from_f64(v).ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                v.checked_mul(100)
                    .filter(|minor| minor.abs() <= MAX_MINOR)
                    .map(Money::from_minor)
                    .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .filter(|minor| *minor <= MAX_MINOR)
                    .map(Money::from_minor)
                    .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
            MoneyParseError::OutOfRange => write!(f, "Amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(1050);
        assert_eq!(m.minor(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_minor(150050).to_string(), "₹1,500.50");
        assert_eq!(Money::from_minor(0).to_string(), "₹0.00");
        assert_eq!(Money::from_minor(-1050).to_string(), "-₹10.50");
        assert_eq!(Money::from_major(1_234_567).to_string(), "₹1,234,567.00");
        assert_eq!(Money::from_minor(5).format_with_symbol("$"), "$0.05");
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(Money::from_minor(150050).format_whole("₹"), "₹1,501");
        assert_eq!(Money::from_minor(-99_949).format_whole("₹"), "-₹999");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((-a).minor(), -1000);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let near_max = Money::from_minor(5_000_000_000_000_000_000);
        assert_eq!((near_max + near_max).minor(), i64::MAX);
        assert_eq!((-near_max - near_max).minor(), i64::MIN);

        let mut total = near_max;
        total += near_max;
        total += near_max;
        assert_eq!(total.minor(), i64::MAX);

        let total: Money = vec![near_max; 3].into_iter().sum();
        assert_eq!(total.minor(), i64::MAX);
        assert_eq!(Money::from_minor(i64::MIN).abs().minor(), i64::MAX);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("$10").unwrap().minor(), 1000);
        assert_eq!(Money::parse("-10.50").unwrap().minor(), -1050);
        assert_eq!(Money::parse("10.5").unwrap().minor(), 1050);
        assert_eq!(Money::parse("1,500.25").unwrap().minor(), 150025);
        assert_eq!(Money::parse(".75").unwrap().minor(), 75);
        assert_eq!(Money::parse("1500.0").unwrap().minor(), 150000);
        assert_eq!(Money::parse("0.005").unwrap().minor(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12a").is_err());
        assert!(Money::parse(".").is_err());
        assert_eq!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_range_matches_stored_range() {
        let largest = Money::parse("10000000000000").unwrap();
        assert_eq!(largest.minor(), MAX_MINOR);
        assert_eq!(Money::from_f64(largest.to_f64()), Some(largest));

        let cents = Money::parse("9999999999999.99").unwrap();
        let json = serde_json::to_string(&cents).unwrap();
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), cents);

        assert_eq!(
            Money::parse("10000000000000.01"),
            Err(MoneyParseError::OutOfRange)
        );
        assert_eq!(
            Money::parse("-100000000000000"),
            Err(MoneyParseError::OutOfRange)
        );
        assert!(serde_json::from_str::<Money>("100000000000000").is_err());
        assert!(serde_json::from_str::<Money>("-100000000000000").is_err());
        assert!(serde_json::from_str::<Money>("10000000000000").is_ok());
    }

    #[test]
    fn test_from_f64_rounds() {
        assert_eq!(Money::from_f64(0.1).unwrap().minor(), 10);
        assert_eq!(Money::from_f64(-100.0).unwrap().minor(), -10000);
        assert_eq!(Money::from_f64(19.999).unwrap().minor(), 2000);
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_minor(100),
            Money::from_minor(200),
            Money::from_minor(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.minor(), 600);
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.minor(), 600);
    }

    #[test]
    fn test_serialization_as_number() {
        let m = Money::from_minor(-10000);
        assert_eq!(serde_json::to_string(&m).unwrap(), "-100.0");

        let m: Money = serde_json::from_str("50000.5").unwrap();
        assert_eq!(m.minor(), 5000050);

        let m: Money = serde_json::from_str("250").unwrap();
        assert_eq!(m.minor(), 25000);

        assert!(serde_json::from_str::<Money>("\"12\"").is_err());
    }
}
