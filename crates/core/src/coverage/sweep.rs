//! Batch evaluations: turn-count sweeps and side-by-side model comparison
//!
//! Each point is an independent evaluation, so sweeps run on rayon's pool.

use super::{
    compute, warn_if_legacy, CoverageResult, EvaluationConfig, LossModel, LossModelKind,
    SprayParameters,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

/// One row of a turn-count sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Turns evaluated
    pub turn_count: u32,
    /// Evaluation at that turn count
    pub result: CoverageResult,
}

/// Evaluate `params` at every turn count in `turns`, in ascending order.
///
/// The `turn_count` already in `params` is ignored.
pub fn sweep_turns(
    params: &SprayParameters,
    config: &EvaluationConfig,
    turns: RangeInclusive<u32>,
) -> Vec<SweepPoint> {
    warn_if_legacy(&config.conversion);
    debug!(start = turns.start(), end = turns.end(), "Sweeping turn counts");

    turns
        .into_par_iter()
        .map(|turn_count| SweepPoint {
            turn_count,
            result: compute(&params.with_turn_count(turn_count), config),
        })
        .collect()
}

/// Evaluate the same inputs under all four loss models.
///
/// The model already in `params` keeps its calibration; the other three use
/// their defaults. Results follow [`LossModelKind::ALL`] order.
pub fn compare_models(params: &SprayParameters, config: &EvaluationConfig) -> Vec<CoverageResult> {
    warn_if_legacy(&config.conversion);

    LossModelKind::ALL
        .par_iter()
        .map(|&kind| {
            let model = if params.loss_model.kind() == kind {
                params.loss_model
            } else {
                LossModel::default_for(kind)
            };
            compute(&params.with_loss_model(model), config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::Seconds;

    #[test]
    fn test_sweep_is_ordered_and_monotonic() {
        let params = SprayParameters::default();
        let points = sweep_turns(&params, &EvaluationConfig::default(), 0..=50);

        assert_eq!(points.len(), 51);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.turn_count as usize, i);
            assert_eq!(p.result.turn_count, p.turn_count);
        }
        assert_eq!(
            points[0].result.real_area_acres,
            points[0].result.ideal_area_acres
        );
        for pair in points.windows(2) {
            assert!(pair[1].result.real_area_acres <= pair[0].result.real_area_acres);
        }
    }

    #[test]
    fn test_sweep_empty_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let points = sweep_turns(
            &SprayParameters::default(),
            &EvaluationConfig::default(),
            5..=4,
        );
        assert!(points.is_empty());
    }

    #[test]
    fn test_compare_keeps_explicit_calibration() {
        let params = SprayParameters::default().with_loss_model(LossModel::TimeFractionLoss {
            turn_duration: Seconds::new(10.0),
        });
        let results = compare_models(&params, &EvaluationConfig::default());

        let kinds: Vec<_> = results.iter().map(|r| r.model).collect();
        assert_eq!(kinds, LossModelKind::ALL.to_vec());

        let time = &results[2];
        let expected_f = 10.0 * 12.0 / (10.0 / (3.33 / 60.0));
        assert!((*time.efficiency.time_fraction.unwrap() - expected_f).abs() < 1e-12);

        // Exponential uses the default eta
        assert!((*results[0].efficiency.retained - 0.9868_f64.powi(12)).abs() < 1e-12);
    }
}
