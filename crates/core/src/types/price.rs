//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole US dollars, but line totals and subtotals go
//! through `Decimal` so they never pick up floating point drift.
//!
//! Prices serialize as JSON numbers (`20`, or `10.5` for fractional
//! amounts). Deserialization also accepts decimal strings.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A price in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole-dollar amount.
    #[must_use]
    pub fn whole_dollars(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self * quantity
    }
}

impl fmt::Display for Price {
    /// Whole amounts render without cents (`$42`), others with two places (`$42.50`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract().is_zero() {
            write!(f, "${}", self.0.trunc())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_u64()
        {
            return serializer.serialize_u64(whole);
        }
        let amount = self
            .0
            .to_f64()
            .ok_or_else(|| <S::Error as serde::ser::Error>::custom("price out of range"))?;
        serializer.serialize_f64(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a dollar amount as a number or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price(Decimal::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Decimal::try_from(v).map(Price).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.trim().parse::<Decimal>().map(Price).map_err(E::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_dollars() {
        assert_eq!(Price::whole_dollars(20).to_string(), "$20");
        assert_eq!(Price::whole_dollars(519).to_string(), "$519");
    }

    #[test]
    fn test_display_fractional() {
        assert_eq!(Price::new(Decimal::new(1050, 2)).to_string(), "$10.50");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Price::whole_dollars(20)).unwrap(), "20");
        assert_eq!(
            serde_json::to_string(&Price::new(Decimal::new(1050, 2))).unwrap(),
            "10.5"
        );
    }

    #[test]
    fn test_deserializes_number_or_string() {
        let whole: Price = serde_json::from_str("137").unwrap();
        assert_eq!(whole, Price::whole_dollars(137));
        let quoted: Price = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(quoted, Price::whole_dollars(42));
        let cents: Price = serde_json::from_str("10.5").unwrap();
        assert_eq!(cents.to_string(), "$10.50");
        assert!(serde_json::from_str::<Price>("\"ten\"").is_err());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::whole_dollars(20).times(2), Price::whole_dollars(35)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::whole_dollars(75));
    }
}
