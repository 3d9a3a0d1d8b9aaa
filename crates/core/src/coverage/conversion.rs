//! Square-metre to acre conversion factor
//!
//! Calculator variants in the field disagree on the factor: most use the
//! precise 4046.86 m²/acre, a few round it to 4047. The rounded figure is kept
//! selectable so old results can be reproduced, but it is never substituted
//! silently.

use crate::core_types::units::{Acres, SquareMeters, SQUARE_METERS_PER_ACRE};
use serde::{Deserialize, Serialize};

/// Conversion factor used when turning swept square metres into acres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaConversion {
    /// Square metres per acre
    pub square_meters_per_acre: f64,
}

impl AreaConversion {
    /// Precise international acre (4046.86 m²)
    pub const CANONICAL: AreaConversion = AreaConversion {
        square_meters_per_acre: SQUARE_METERS_PER_ACRE,
    };

    /// Rounded 4047 m²/acre used by some calculator variants
    pub const LEGACY_APPROXIMATE: AreaConversion = AreaConversion {
        square_meters_per_acre: 4047.0,
    };

    /// Any other factor
    #[must_use]
    pub const fn custom(square_meters_per_acre: f64) -> Self {
        Self {
            square_meters_per_acre,
        }
    }

    /// Whether this is the rounded 4047 approximation
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.square_meters_per_acre == Self::LEGACY_APPROXIMATE.square_meters_per_acre
    }

    /// Convert an area
    #[must_use]
    pub fn to_acres(&self, area: SquareMeters) -> Acres {
        area.to_acres(self.square_meters_per_acre)
    }
}

impl Default for AreaConversion {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_canonical() {
        assert_eq!(AreaConversion::default(), AreaConversion::CANONICAL);
        assert!(!AreaConversion::default().is_legacy());
        assert!(AreaConversion::LEGACY_APPROXIMATE.is_legacy());
        assert!(AreaConversion::custom(4047.0).is_legacy());
    }

    #[test]
    fn test_one_acre() {
        let acres = AreaConversion::CANONICAL.to_acres(SquareMeters::new(4046.86));
        assert!((*acres - 1.0).abs() < 1e-12);
    }
}
