//! Spray coverage model
//!
//! Maps one set of spray-run parameters to the area a full tank covers with
//! no turns (ideal) and after turn losses (real).
//!
//! ```text
//! SprayParameters -> ideal area -> loss model -> CoverageResult
//! ```
//!
//! Every evaluation is a pure function of its inputs. Degenerate inputs
//! (zero speed, zero swath, zero flow) give zero area rather than NaN.

pub mod conversion;
pub mod ideal;
pub mod loss_model;
pub mod sweep;

pub use conversion::AreaConversion;
pub use ideal::{ideal_area, ideal_area_breakdown, IdealAreaBreakdown, IdealAreaMethod};
pub use loss_model::{parse_model_param, LossModel, LossModelKind, TurnEfficiency};
pub use sweep::{compare_models, sweep_turns, SweepPoint};

use crate::core_types::units::{
    Acres, Fraction, Liters, LitersPerMinute, Meters, MetersPerSecond,
};
use crate::error::SprayInputError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Inputs for one coverage evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprayParameters {
    /// Ground speed along a pass
    pub speed: MetersPerSecond,
    /// Effective swath width
    pub spray_width: Meters,
    /// Pump discharge (L/min, or kg/min for granules)
    pub flow_rate: LitersPerMinute,
    /// Tank capacity (L or kg)
    pub tank_capacity: Liters,
    /// Number of headland turns made while emptying the tank
    pub turn_count: u32,
    /// Turn-loss model and its calibration
    pub loss_model: LossModel,
}

/// Advisory range for one input, matching the calculator's slider bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRange {
    /// Parameter name
    pub field: &'static str,
    /// Inclusive bounds
    pub range: RangeInclusive<f64>,
}

impl Default for SprayParameters {
    /// Calculator defaults: 5 m/s, 5.5 m swath, 3.33 L/min, 10 L tank, 12 turns,
    /// eta = 0.9868.
    fn default() -> Self {
        Self {
            speed: MetersPerSecond::new(5.0),
            spray_width: Meters::new(5.5),
            flow_rate: LitersPerMinute::new(3.33),
            tank_capacity: Liters::new(10.0),
            turn_count: 12,
            loss_model: LossModel::default(),
        }
    }
}

impl SprayParameters {
    /// Slider ranges of the calculator. Values outside are still evaluated.
    pub const RANGES: [(&'static str, f64, f64); 5] = [
        ("speed", 0.5, 15.0),
        ("spray_width", 1.0, 10.0),
        ("flow_rate", 0.5, 10.0),
        ("tank_capacity", 1.0, 50.0),
        ("turn_count", 0.0, 50.0),
    ];

    /// Slider range for the per-turn efficiency `eta`
    pub const ETA_RANGE: (f64, f64) = (0.9, 1.0);

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = MetersPerSecond::new(speed);
        self
    }

    pub fn with_spray_width(mut self, width: f64) -> Self {
        self.spray_width = Meters::new(width);
        self
    }

    pub fn with_flow_rate(mut self, flow: f64) -> Self {
        self.flow_rate = LitersPerMinute::new(flow);
        self
    }

    pub fn with_tank_capacity(mut self, tank: f64) -> Self {
        self.tank_capacity = Liters::new(tank);
        self
    }

    pub fn with_turn_count(mut self, turns: u32) -> Self {
        self.turn_count = turns;
        self
    }

    pub fn with_loss_model(mut self, model: LossModel) -> Self {
        self.loss_model = model;
        self
    }

    /// Reject inputs no physical spray run can have.
    ///
    /// Zero is accepted for every quantity; it evaluates to zero area.
    ///
    /// # Errors
    /// Returns the first negative or non-finite quantity, or the first loss-model
    /// constant out of range.
    pub fn validate(&self) -> Result<(), SprayInputError> {
        SprayInputError::check_quantity("speed", *self.speed)?;
        SprayInputError::check_quantity("spray_width", *self.spray_width)?;
        SprayInputError::check_quantity("flow_rate", *self.flow_rate)?;
        SprayInputError::check_quantity("tank_capacity", *self.tank_capacity)?;
        self.loss_model.validate()
    }

    /// Inputs lying outside the calculator's slider ranges
    pub fn out_of_range_fields(&self) -> Vec<InputRange> {
        let values = [
            *self.speed,
            *self.spray_width,
            *self.flow_rate,
            *self.tank_capacity,
            f64::from(self.turn_count),
        ];

        let mut out: Vec<InputRange> = Self::RANGES
            .iter()
            .zip(values)
            .filter(|&(&(_, lo, hi), v)| !(lo..=hi).contains(&v))
            .map(|(&(field, lo, hi), _)| InputRange {
                field,
                range: lo..=hi,
            })
            .collect();

        if let LossModel::PerTurnExponential { eta } = self.loss_model {
            let (lo, hi) = Self::ETA_RANGE;
            if !(lo..=hi).contains(&eta) {
                out.push(InputRange {
                    field: "eta",
                    range: lo..=hi,
                });
            }
        }
        out
    }
}

/// Evaluation settings that are not part of the physical inputs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Square metres per acre
    pub conversion: AreaConversion,
    /// Ideal-area derivation
    pub ideal_method: IdealAreaMethod,
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Area one tank covers ignoring turns
    pub ideal_area_acres: Acres,
    /// Area after turn losses
    pub real_area_acres: Acres,
    /// Share of the ideal area lost to turns
    pub loss_fraction: Fraction,
    /// Model that produced the loss
    pub model: LossModelKind,
    /// Turns evaluated
    pub turn_count: u32,
    /// Intermediate ideal-area quantities
    pub breakdown: IdealAreaBreakdown,
    /// Model diagnostics
    pub efficiency: TurnEfficiency,
}

impl CoverageResult {
    /// Loss as a percentage of the ideal area
    #[must_use]
    pub fn loss_percent(&self) -> f64 {
        self.loss_fraction.as_percent()
    }

    /// Acres not covered because of turns
    #[must_use]
    pub fn lost_area_acres(&self) -> Acres {
        self.ideal_area_acres - self.real_area_acres
    }
}

/// Evaluate with the precise acre conversion and the application-rate derivation.
pub fn evaluate(params: &SprayParameters) -> CoverageResult {
    evaluate_with(params, &EvaluationConfig::default())
}

/// Evaluate with explicit settings.
pub fn evaluate_with(params: &SprayParameters, config: &EvaluationConfig) -> CoverageResult {
    warn_if_legacy(&config.conversion);
    compute(params, config)
}

fn warn_if_legacy(conversion: &AreaConversion) {
    if conversion.is_legacy() {
        warn!(
            "Using 4047 m²/acre approximation; areas are {:.4}% below the 4046.86 figure",
            (1.0 - AreaConversion::CANONICAL.square_meters_per_acre / 4047.0) * 100.0
        );
    }
}

/// Evaluation without the legacy-conversion warning, for batch callers that
/// warn once up front.
pub(crate) fn compute(params: &SprayParameters, config: &EvaluationConfig) -> CoverageResult {
    let breakdown = ideal_area_breakdown(params, &config.conversion, config.ideal_method);
    let efficiency = params.loss_model.efficiency(params);
    let real_area = breakdown.ideal_area * efficiency.retained;

    let result = CoverageResult {
        ideal_area_acres: breakdown.ideal_area,
        real_area_acres: real_area,
        loss_fraction: efficiency.loss(),
        model: params.loss_model.kind(),
        turn_count: params.turn_count,
        breakdown,
        efficiency,
    };

    debug!(
        model = %result.model,
        turns = params.turn_count,
        ideal = *result.ideal_area_acres,
        real = *result.real_area_acres,
        "Evaluated spray coverage"
    );
    result
}

/// Validate then evaluate.
///
/// # Errors
/// Returns the validation error from [`SprayParameters::validate`].
pub fn try_evaluate(
    params: &SprayParameters,
    config: &EvaluationConfig,
) -> Result<CoverageResult, SprayInputError> {
    params.validate()?;
    Ok(evaluate_with(params, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_evaluation() {
        let result = evaluate(&SprayParameters::default());

        // 5 m/s x 5.5 m, 3.33 L/min, 10 L
        assert_relative_eq!(*result.ideal_area_acres, 1.224395, epsilon = 1e-6);
        assert_relative_eq!(
            *result.real_area_acres,
            *result.ideal_area_acres * 0.9868_f64.powi(12),
            max_relative = 1e-12
        );
        assert_eq!(result.model, LossModelKind::PerTurnExponential);
        assert_eq!(result.turn_count, 12);
    }

    #[test]
    fn test_real_never_exceeds_ideal() {
        for kind in LossModelKind::ALL {
            for turns in [0, 1, 12, 50, 500] {
                let p = SprayParameters::default()
                    .with_turn_count(turns)
                    .with_loss_model(LossModel::default_for(kind));
                let r = evaluate(&p);
                assert!(r.real_area_acres <= r.ideal_area_acres, "{kind} {turns}");
                assert!(r.lost_area_acres() >= 0.0);
            }
        }
    }

    #[test]
    fn test_loss_fraction_defined_with_zero_ideal() {
        let p = SprayParameters::default().with_speed(0.0);
        let r = evaluate(&p);
        assert_eq!(r.ideal_area_acres, Acres::ZERO);
        assert_eq!(r.real_area_acres, Acres::ZERO);
        assert_relative_eq!(*r.loss_fraction, 1.0 - 0.9868_f64.powi(12));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let p = SprayParameters::default().with_flow_rate(-1.0);
        assert_eq!(
            p.validate(),
            Err(SprayInputError::Negative {
                field: "flow_rate",
                value: -1.0
            })
        );
        assert!(try_evaluate(&p, &EvaluationConfig::default()).is_err());
        assert!(SprayParameters::default().with_speed(0.0).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fields() {
        assert!(SprayParameters::default().out_of_range_fields().is_empty());

        let p = SprayParameters::default()
            .with_speed(20.0)
            .with_turn_count(60)
            .with_loss_model(LossModel::PerTurnExponential { eta: 0.5 });
        let fields: Vec<_> = p.out_of_range_fields().iter().map(|r| r.field).collect();
        assert_eq!(fields, vec!["speed", "turn_count", "eta"]);
    }

    #[test]
    fn test_legacy_conversion_config() {
        let p = SprayParameters::default();
        let legacy = evaluate_with(
            &p,
            &EvaluationConfig {
                conversion: AreaConversion::LEGACY_APPROXIMATE,
                ..EvaluationConfig::default()
            },
        );
        let canonical = evaluate(&p);
        assert!(legacy.ideal_area_acres < canonical.ideal_area_acres);
        assert_eq!(legacy.loss_fraction, canonical.loss_fraction);
    }
}
