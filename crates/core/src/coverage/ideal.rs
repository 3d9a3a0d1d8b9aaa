//! Ideal (turn-free) area from one tank
//!
//! Two derivations appear in the calculators and both are kept:
//!
//! 1. **Application rate**: litres per square metre from flow and swept area
//!    rate, scaled to litres per acre, then `tank / litres_per_acre`.
//! 2. **Spray time**: time to empty the tank, times swept area rate.
//!
//! They are algebraically identical and agree to floating-point rounding for
//! the same conversion factor.
//!
//! Zero swath rate or zero flow produce an ideal area of zero instead of a
//! division by zero; dragging a slider through zero is normal input.

use super::conversion::AreaConversion;
use super::SprayParameters;
use crate::core_types::units::{
    Acres, LitersPerAcre, LitersPerSecond, LitersPerSquareMeter, Seconds, SquareMetersPerSecond,
};
use serde::{Deserialize, Serialize};

/// Which derivation of the ideal area to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdealAreaMethod {
    /// tank / (flow / area rate x m²-per-acre)
    #[default]
    ApplicationRate,
    /// area rate x tank emptying time / m²-per-acre
    SprayTime,
}

/// Intermediate quantities behind an ideal-area figure
///
/// Guarded quantities are zero when their denominator is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IdealAreaBreakdown {
    /// speed x swath width
    pub area_rate: SquareMetersPerSecond,
    /// Pump discharge in L/s
    pub flow_per_second: LitersPerSecond,
    /// Volume deposited per square metre
    pub application_rate: LitersPerSquareMeter,
    /// Volume deposited per acre
    pub liters_per_acre: LitersPerAcre,
    /// Time to empty the tank at the pump rate
    pub spray_time: Seconds,
    /// Area covered by one tank with no turns
    pub ideal_area: Acres,
}

/// Compute the ideal area with all intermediate quantities.
pub fn ideal_area_breakdown(
    params: &SprayParameters,
    conversion: &AreaConversion,
    method: IdealAreaMethod,
) -> IdealAreaBreakdown {
    let area_rate = params.speed * params.spray_width;
    let flow_per_second = params.flow_rate.per_second();

    let sprayable = *area_rate > 0.0 && *params.flow_rate > 0.0;

    let application_rate = if sprayable {
        LitersPerSquareMeter::new(*flow_per_second / *area_rate)
    } else {
        LitersPerSquareMeter::default()
    };
    let liters_per_acre =
        LitersPerAcre::new(*application_rate * conversion.square_meters_per_acre);

    let spray_time = if *params.flow_rate > 0.0 {
        params.tank_capacity / params.flow_rate
    } else {
        Seconds::default()
    };

    let ideal_area = if !sprayable || *params.tank_capacity <= 0.0 {
        Acres::ZERO
    } else {
        match method {
            IdealAreaMethod::ApplicationRate if *liters_per_acre > 0.0 => {
                Acres::new(*params.tank_capacity / *liters_per_acre)
            }
            IdealAreaMethod::ApplicationRate => Acres::ZERO,
            IdealAreaMethod::SprayTime => conversion.to_acres(area_rate * spray_time),
        }
    };

    IdealAreaBreakdown {
        area_rate,
        flow_per_second,
        application_rate,
        liters_per_acre,
        spray_time,
        ideal_area,
    }
}

/// Area coverable by one full tank ignoring turns.
pub fn ideal_area(
    params: &SprayParameters,
    conversion: &AreaConversion,
    method: IdealAreaMethod,
) -> Acres {
    ideal_area_breakdown(params, conversion, method).ideal_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> SprayParameters {
        SprayParameters::default()
            .with_speed(5.0)
            .with_spray_width(5.5)
            .with_flow_rate(3.13)
            .with_tank_capacity(10.0)
    }

    #[test]
    fn test_application_rate_chain() {
        let b = ideal_area_breakdown(
            &scenario(),
            &AreaConversion::LEGACY_APPROXIMATE,
            IdealAreaMethod::ApplicationRate,
        );

        assert_relative_eq!(*b.area_rate, 27.5);
        assert_relative_eq!(*b.flow_per_second, 0.05217, epsilon = 1e-5);
        assert_relative_eq!(*b.application_rate, 0.0018969, epsilon = 1e-7);
        assert_relative_eq!(*b.liters_per_acre, 7.677, epsilon = 1e-3);
        assert_relative_eq!(*b.ideal_area, 1.303, epsilon = 1e-3);
    }

    #[test]
    fn test_methods_agree() {
        let conv = AreaConversion::CANONICAL;
        let a = ideal_area(&scenario(), &conv, IdealAreaMethod::ApplicationRate);
        let b = ideal_area(&scenario(), &conv, IdealAreaMethod::SprayTime);
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
        assert_relative_eq!(*b, 1.302631, epsilon = 1e-6);
    }

    #[test]
    fn test_spray_time() {
        let b = ideal_area_breakdown(
            &scenario().with_flow_rate(3.0),
            &AreaConversion::CANONICAL,
            IdealAreaMethod::SprayTime,
        );
        assert_relative_eq!(*b.spray_time, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_guards() {
        for method in [IdealAreaMethod::ApplicationRate, IdealAreaMethod::SprayTime] {
            let conv = AreaConversion::CANONICAL;
            for params in [
                scenario().with_speed(0.0),
                scenario().with_spray_width(0.0),
                scenario().with_flow_rate(0.0),
                scenario().with_tank_capacity(0.0),
            ] {
                let b = ideal_area_breakdown(&params, &conv, method);
                assert_eq!(b.ideal_area, Acres::ZERO, "{method:?} {params:?}");
                assert!(b.application_rate.is_finite());
                assert!(b.liters_per_acre.is_finite());
                assert!(b.spray_time.is_finite());
            }
        }
    }

    #[test]
    fn test_legacy_constant_is_slightly_smaller() {
        let canonical = ideal_area(
            &scenario(),
            &AreaConversion::CANONICAL,
            IdealAreaMethod::ApplicationRate,
        );
        let legacy = ideal_area(
            &scenario(),
            &AreaConversion::LEGACY_APPROXIMATE,
            IdealAreaMethod::ApplicationRate,
        );
        assert!(legacy < canonical);
        assert_relative_eq!(*canonical / *legacy, 4047.0 / 4046.86, max_relative = 1e-12);
    }
}
