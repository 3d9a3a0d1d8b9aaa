//! Semantic unit types for spray-run quantities
//!
//! Newtype wrappers keep flight speed, swath width, pump flow and tank volume
//! from being swapped by accident when they are passed around as bare `f64`.
//!
//! # Design Philosophy
//! - All quantities use f64 so the acre figures match the calculator to 4-5 decimals
//! - Constructors do not validate; range checks belong to [`crate::SprayParameters::validate`]
//! - Total ordering via `Ord` (NaN sorts above every value)
//! - Serde serializes each unit as its bare number
//!
//! # Usage
//! ```
//! use spray_coverage_core::core_types::units::{Liters, LitersPerMinute, Seconds};
//!
//! let flow = LitersPerMinute::new(3.0);
//! let tank = Liters::new(10.0);
//! let time: Seconds = tank / flow;
//! assert!((*time - 200.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul, Sub};

/// Square metres in one international acre.
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.86;

/// Seconds in one minute, used for L/min to L/s conversion.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Shared trait impls for an f64 newtype: total ordering, `Deref`, raw
/// conversions, scalar multiplication and a suffixed `Display`.
macro_rules! unit_newtype {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl $name {
            /// Wrap a raw value.
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                $name(value)
            }

            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $suffix),
                    None => write!(f, "{} {}", self.0, $suffix),
                }
            }
        }
    };
}

// ============================================================================
// KINEMATIC / GEOMETRIC TYPES
// ============================================================================

/// Ground speed of the aircraft along a spray pass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);
unit_newtype!(MetersPerSecond, "m/s");

/// Length, used for effective swath width
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);
unit_newtype!(Meters, "m");

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SquareMeters(f64);
unit_newtype!(SquareMeters, "m²");

/// Area swept per second (speed x swath)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SquareMetersPerSecond(f64);
unit_newtype!(SquareMetersPerSecond, "m²/s");

/// Area in acres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Acres(f64);
unit_newtype!(Acres, "acres");

impl Acres {
    /// No area
    pub const ZERO: Acres = Acres(0.0);
}

impl SquareMeters {
    /// Convert to acres using the given square-metres-per-acre factor.
    ///
    /// A non-positive factor yields zero rather than an infinite area.
    #[inline]
    #[must_use]
    pub fn to_acres(self, square_meters_per_acre: f64) -> Acres {
        if square_meters_per_acre > 0.0 {
            Acres(self.0 / square_meters_per_acre)
        } else {
            Acres::ZERO
        }
    }
}

// MetersPerSecond * Meters = SquareMetersPerSecond (swept area rate)
impl Mul<Meters> for MetersPerSecond {
    type Output = SquareMetersPerSecond;
    fn mul(self, rhs: Meters) -> SquareMetersPerSecond {
        SquareMetersPerSecond(self.0 * rhs.0)
    }
}

// SquareMetersPerSecond * Seconds = SquareMeters
impl Mul<Seconds> for SquareMetersPerSecond {
    type Output = SquareMeters;
    fn mul(self, rhs: Seconds) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Sub for Acres {
    type Output = Acres;
    fn sub(self, rhs: Acres) -> Acres {
        Acres(self.0 - rhs.0)
    }
}

impl Add for Acres {
    type Output = Acres;
    fn add(self, rhs: Acres) -> Acres {
        Acres(self.0 + rhs.0)
    }
}

// ============================================================================
// LIQUID TYPES
// ============================================================================

/// Tank volume in litres (kg for granular product)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Liters(f64);
unit_newtype!(Liters, "L");

/// Pump discharge in litres per minute
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct LitersPerMinute(f64);
unit_newtype!(LitersPerMinute, "L/min");

/// Pump discharge in litres per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct LitersPerSecond(f64);
unit_newtype!(LitersPerSecond, "L/s");

/// Application rate in litres per square metre
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct LitersPerSquareMeter(f64);
unit_newtype!(LitersPerSquareMeter, "L/m²");

/// Application rate in litres per acre
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct LitersPerAcre(f64);
unit_newtype!(LitersPerAcre, "L/acre");

impl LitersPerMinute {
    /// Convert to litres per second
    #[inline]
    #[must_use]
    pub fn per_second(self) -> LitersPerSecond {
        LitersPerSecond(self.0 / SECONDS_PER_MINUTE)
    }
}

// Liters / LitersPerMinute = Seconds (time to empty the tank)
impl Div<LitersPerMinute> for Liters {
    type Output = Seconds;
    fn div(self, rhs: LitersPerMinute) -> Seconds {
        Seconds(self.0 / rhs.0 * SECONDS_PER_MINUTE)
    }
}

// Liters / LitersPerSecond = Seconds
impl Div<LitersPerSecond> for Liters {
    type Output = Seconds;
    fn div(self, rhs: LitersPerSecond) -> Seconds {
        Seconds(self.0 / rhs.0)
    }
}

// ============================================================================
// TIME
// ============================================================================

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f64);
unit_newtype!(Seconds, "s");

// ============================================================================
// DIMENSIONLESS
// ============================================================================

/// Dimensionless ratio, nominally within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f64);

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Fraction {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fraction {
    /// Zero fraction
    pub const ZERO: Fraction = Fraction(0.0);

    /// Full/complete (1.0)
    pub const ONE: Fraction = Fraction(1.0);

    /// Create a fraction, clamping into [0, 1]. NaN maps to zero.
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Fraction::ZERO
        } else {
            Fraction(value.clamp(0.0, 1.0))
        }
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The complementary fraction `1 - self`
    #[inline]
    #[must_use]
    pub fn complement(self) -> Fraction {
        Fraction(1.0 - self.0)
    }

    /// Convert to percentage (0-100)
    #[inline]
    #[must_use]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl Mul for Fraction {
    type Output = Fraction;
    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction(self.0 * rhs.0)
    }
}

// Acres * Fraction = Acres (area retained after a loss)
impl Mul<Fraction> for Acres {
    type Output = Acres;
    fn mul(self, rhs: Fraction) -> Acres {
        Acres(self.0 * rhs.0)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_per_second() {
        let flow = LitersPerMinute::new(3.13);
        assert!((*flow.per_second() - 0.052166666).abs() < 1e-8);
    }

    #[test]
    fn test_tank_emptying_time() {
        let t = Liters::new(10.0) / LitersPerMinute::new(3.0);
        assert!((*t - 200.0).abs() < 1e-9);

        let t2 = Liters::new(10.0) / LitersPerMinute::new(3.0).per_second();
        assert!((*t2 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_swept_area_to_acres() {
        let rate = MetersPerSecond::new(5.0) * Meters::new(5.5);
        assert_eq!(rate, 27.5);

        let area = rate * Seconds::new(SQUARE_METERS_PER_ACRE / 27.5);
        assert!((*area.to_acres(SQUARE_METERS_PER_ACRE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_acres_guards_zero_factor() {
        assert_eq!(SquareMeters::new(100.0).to_acres(0.0), Acres::ZERO);
    }

    #[test]
    fn test_fraction_clamped() {
        assert_eq!(Fraction::clamped(1.5), Fraction::ONE);
        assert_eq!(Fraction::clamped(-0.2), Fraction::ZERO);
        assert_eq!(Fraction::clamped(f64::NAN), Fraction::ZERO);
        assert_eq!(*Fraction::clamped(0.25).complement(), 0.75);
    }

    #[test]
    fn test_ordering_is_total() {
        let mut v = vec![Acres::new(2.0), Acres::new(f64::NAN), Acres::new(1.0)];
        v.sort();
        assert_eq!(v[0], Acres::new(1.0));
        assert_eq!(v[1], Acres::new(2.0));
        assert!(v[2].is_nan());
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.3}", Acres::new(1.302631)), "1.303 acres");
        assert_eq!(format!("{}", Fraction::clamped(0.18)), "0.1800");
    }
}
