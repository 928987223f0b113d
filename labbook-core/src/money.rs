//! Money amounts in minor units plus the numeric casts around them.

use num_traits::cast::cast;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Minor units (cents) per whole currency unit.
pub const MINOR_PER_MAJOR: i64 = 100;
/// Denominator for rates expressed in basis points.
pub const BASIS_POINTS: i64 = 10_000;

/// A currency amount held as integer minor units.
///
/// On the wire an amount is a plain JSON number in whole units, which is what
/// the booking endpoint and the catalog asset both use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Build an amount from whole currency units, saturating on overflow.
    #[must_use]
    pub const fn from_major(units: i64) -> Self {
        Self(units.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Convert a whole-unit float (as typed in JSON) to minor units.
    /// Returns `None` for NaN and infinities.
    #[must_use]
    pub fn from_major_f64(units: f64) -> Option<Self> {
        if !units.is_finite() {
            return None;
        }
        Some(Self(round_f64_to_i64(units * 100.0)))
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whole units as a float, the shape the backend receives.
    #[must_use]
    pub fn to_major_f64(self) -> f64 {
        i64_to_f64(self.0) / 100.0
    }

    /// Apply a rate in basis points (500 = 5%), rounding half away from zero
    /// to the nearest minor unit. Whole-unit amounts at whole-percent rates
    /// never round.
    #[must_use]
    pub fn apply_rate_bps(self, rate_bps: u32) -> Self {
        let scaled = i128::from(self.0) * i128::from(rate_bps);
        let denom = i128::from(BASIS_POINTS);
        let half = denom / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / denom
        } else {
            (scaled - half) / denom
        };
        Self(i64::try_from(rounded).unwrap_or(if scaled >= 0 { i64::MAX } else { i64::MIN }))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_PER_MAJOR == 0 {
            serializer.serialize_i64(self.0 / MINOR_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.to_major_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        Self::from_major_f64(units)
            .ok_or_else(|| serde::de::Error::custom("amount must be a finite number"))
    }
}

/// Round a f64 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(if clamped > 0.0 { i64::MAX } else { 0 })
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}
