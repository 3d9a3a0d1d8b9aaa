//! Turn-loss models
//!
//! Every pass ends in a turn during which the aircraft either sprays nothing
//! useful or sprays at reduced effectiveness. Four calibrations of that loss
//! are in use:
//!
//! | Model | Retained fraction |
//! |---|---|
//! | Per-turn exponential | `eta^N` |
//! | Linear percent per turn | `(1 - p/100)^N` |
//! | Time fraction | `1 - min(1, turn_duration x N / spray_time)` |
//! | Speed/width efficiency | `max(0, 1 - ks N/speed) x max(0, 1 - kw N/width)` |
//!
//! The retained fraction is always clamped to [0, 1], so a real area can never
//! exceed the ideal area. With zero turns every model retains exactly 1.

use super::SprayParameters;
use crate::core_types::units::{Acres, Fraction, Seconds};
use crate::error::SprayInputError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-turn retained efficiency used by the calculator by default
pub const DEFAULT_ETA: f64 = 0.9868;

/// Percent lost per turn, equivalent to [`DEFAULT_ETA`]
pub const DEFAULT_PERCENT_PER_TURN: f64 = 1.32;

/// Seconds spent per headland turn
pub const DEFAULT_TURN_DURATION: f64 = 3.0;

/// Speed-axis calibration constant (per turn, m/s)
pub const DEFAULT_KS: f64 = 0.01;

/// Width-axis calibration constant (per turn, m)
pub const DEFAULT_KW: f64 = 0.005;

/// Names of the four turn-loss models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LossModelKind {
    /// `eta^N`
    PerTurnExponential,
    /// `(1 - p/100)^N`
    LinearPercentPerTurn,
    /// Turn time as a share of total spray time
    TimeFractionLoss,
    /// Independent speed and width penalties
    SpeedWidthEfficiency,
}

impl LossModelKind {
    /// All models in presentation order
    pub const ALL: [LossModelKind; 4] = [
        LossModelKind::PerTurnExponential,
        LossModelKind::LinearPercentPerTurn,
        LossModelKind::TimeFractionLoss,
        LossModelKind::SpeedWidthEfficiency,
    ];

    /// Kebab-case name, matching the serde representation
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PerTurnExponential => "per-turn-exponential",
            Self::LinearPercentPerTurn => "linear-percent-per-turn",
            Self::TimeFractionLoss => "time-fraction-loss",
            Self::SpeedWidthEfficiency => "speed-width-efficiency",
        }
    }

    /// Formula shown alongside results
    #[must_use]
    pub fn formula(self) -> &'static str {
        match self {
            Self::PerTurnExponential => "Real = Ideal x eta^N",
            Self::LinearPercentPerTurn => "Real = Ideal x (1 - p/100)^N",
            Self::TimeFractionLoss => "Real = Ideal x (1 - min(1, t_turn x N / T_spray))",
            Self::SpeedWidthEfficiency => {
                "Real = Ideal x max(0, 1 - ks N/v) x max(0, 1 - kw N/w)"
            }
        }
    }
}

impl fmt::Display for LossModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A turn-loss model with its calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum LossModel {
    /// Fixed fraction `eta` of coverage retained per turn
    PerTurnExponential {
        /// Retained efficiency per turn, 0 < eta <= 1
        eta: f64,
    },
    /// Fixed percentage lost per turn
    LinearPercentPerTurn {
        /// Percent lost per turn, 0..=100
        percent: f64,
    },
    /// Turn time eats into the tank's spray time
    TimeFractionLoss {
        /// Time spent per turn
        turn_duration: Seconds,
    },
    /// Empirical two-factor fit against speed and swath width
    SpeedWidthEfficiency {
        /// Speed-axis constant, >= 0
        ks: f64,
        /// Width-axis constant, >= 0
        kw: f64,
    },
}

impl Default for LossModel {
    fn default() -> Self {
        Self::default_for(LossModelKind::PerTurnExponential)
    }
}

/// Outcome of a loss model for one parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnEfficiency {
    /// Share of the ideal area actually covered
    pub retained: Fraction,
    /// Share of spray time spent turning (time-fraction model only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time_fraction: Option<Fraction>,
    /// Speed-axis factor (speed/width model only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub speed_factor: Option<Fraction>,
    /// Width-axis factor (speed/width model only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width_factor: Option<Fraction>,
}

impl TurnEfficiency {
    fn with_retained(retained: Fraction) -> Self {
        Self {
            retained,
            time_fraction: None,
            speed_factor: None,
            width_factor: None,
        }
    }

    /// Share of the ideal area lost to turning
    #[must_use]
    pub fn loss(&self) -> Fraction {
        self.retained.complement()
    }
}

impl LossModel {
    /// The model with its default calibration
    #[must_use]
    pub fn default_for(kind: LossModelKind) -> Self {
        match kind {
            LossModelKind::PerTurnExponential => Self::PerTurnExponential { eta: DEFAULT_ETA },
            LossModelKind::LinearPercentPerTurn => Self::LinearPercentPerTurn {
                percent: DEFAULT_PERCENT_PER_TURN,
            },
            LossModelKind::TimeFractionLoss => Self::TimeFractionLoss {
                turn_duration: Seconds::new(DEFAULT_TURN_DURATION),
            },
            LossModelKind::SpeedWidthEfficiency => Self::SpeedWidthEfficiency {
                ks: DEFAULT_KS,
                kw: DEFAULT_KW,
            },
        }
    }

    /// Which model this is
    #[must_use]
    pub fn kind(&self) -> LossModelKind {
        match self {
            Self::PerTurnExponential { .. } => LossModelKind::PerTurnExponential,
            Self::LinearPercentPerTurn { .. } => LossModelKind::LinearPercentPerTurn,
            Self::TimeFractionLoss { .. } => LossModelKind::TimeFractionLoss,
            Self::SpeedWidthEfficiency { .. } => LossModelKind::SpeedWidthEfficiency,
        }
    }

    /// Build a model from `key=value` overrides on top of its defaults.
    ///
    /// Accepted keys: `eta` (exponential), `percent`/`p` (linear),
    /// `turn_duration`/`duration` (time fraction), `ks`/`kw` (speed/width).
    ///
    /// # Errors
    /// Returns [`SprayInputError::UnknownModelParameter`] for a key the model
    /// does not take. Values are not range-checked here; see [`Self::validate`].
    pub fn from_kind_params(
        kind: LossModelKind,
        overrides: &[(String, f64)],
    ) -> Result<Self, SprayInputError> {
        let mut model = Self::default_for(kind);
        for (key, value) in overrides {
            let value = *value;
            match (&mut model, key.as_str()) {
                (Self::PerTurnExponential { eta }, "eta") => *eta = value,
                (Self::LinearPercentPerTurn { percent }, "percent" | "p") => *percent = value,
                (Self::TimeFractionLoss { turn_duration }, "turn_duration" | "duration") => {
                    *turn_duration = Seconds::new(value);
                }
                (Self::SpeedWidthEfficiency { ks, .. }, "ks") => *ks = value,
                (Self::SpeedWidthEfficiency { kw, .. }, "kw") => *kw = value,
                _ => {
                    return Err(SprayInputError::UnknownModelParameter {
                        model: kind,
                        key: key.clone(),
                    });
                }
            }
        }
        Ok(model)
    }

    /// Check the calibration constants are in range.
    ///
    /// # Errors
    /// Returns [`SprayInputError::ModelParameter`] naming the first constant
    /// out of range.
    pub fn validate(&self) -> Result<(), SprayInputError> {
        let kind = self.kind();
        let reject = |name: &'static str, value: f64, expected: &'static str| {
            Err(SprayInputError::ModelParameter {
                model: kind,
                name,
                value,
                expected,
            })
        };

        match *self {
            Self::PerTurnExponential { eta } => {
                if !(eta > 0.0 && eta <= 1.0) {
                    return reject("eta", eta, "0 < eta <= 1");
                }
            }
            Self::LinearPercentPerTurn { percent } => {
                if !(0.0..=100.0).contains(&percent) {
                    return reject("percent", percent, "0 <= percent <= 100");
                }
            }
            Self::TimeFractionLoss { turn_duration } => {
                if !(turn_duration.is_finite() && *turn_duration >= 0.0) {
                    return reject("turn_duration", *turn_duration, "finite, >= 0 s");
                }
            }
            Self::SpeedWidthEfficiency { ks, kw } => {
                if !(ks.is_finite() && ks >= 0.0) {
                    return reject("ks", ks, "finite, >= 0");
                }
                if !(kw.is_finite() && kw >= 0.0) {
                    return reject("kw", kw, "finite, >= 0");
                }
            }
        }
        Ok(())
    }

    /// Fraction of the ideal area retained after `params.turn_count` turns.
    pub fn efficiency(&self, params: &SprayParameters) -> TurnEfficiency {
        let turns = params.turn_count;

        if turns == 0 {
            return self.lossless();
        }

        match *self {
            Self::PerTurnExponential { eta } => {
                TurnEfficiency::with_retained(compounded_efficiency(eta, turns))
            }
            Self::LinearPercentPerTurn { percent } => {
                TurnEfficiency::with_retained(compounded_efficiency(1.0 - percent / 100.0, turns))
            }
            Self::TimeFractionLoss { turn_duration } => {
                let total_spray_time = params.tank_capacity / params.flow_rate.per_second();
                let time_fraction = if total_spray_time.is_finite() && *total_spray_time > 0.0 {
                    Fraction::clamped(*turn_duration * f64::from(turns) / *total_spray_time)
                } else {
                    // No spray time to lose: the whole tank counts as lost
                    Fraction::ONE
                };
                TurnEfficiency {
                    time_fraction: Some(time_fraction),
                    ..TurnEfficiency::with_retained(time_fraction.complement())
                }
            }
            Self::SpeedWidthEfficiency { ks, kw } => {
                let speed_factor = axis_efficiency(ks, turns, *params.speed);
                let width_factor = axis_efficiency(kw, turns, *params.spray_width);
                TurnEfficiency {
                    speed_factor: Some(speed_factor),
                    width_factor: Some(width_factor),
                    ..TurnEfficiency::with_retained(speed_factor * width_factor)
                }
            }
        }
    }

    /// Apply the model to an ideal area.
    pub fn apply(&self, ideal_area: Acres, params: &SprayParameters) -> Acres {
        ideal_area * self.efficiency(params).retained
    }

    fn lossless(&self) -> TurnEfficiency {
        match self {
            Self::TimeFractionLoss { .. } => TurnEfficiency {
                time_fraction: Some(Fraction::ZERO),
                ..TurnEfficiency::with_retained(Fraction::ONE)
            },
            Self::SpeedWidthEfficiency { .. } => TurnEfficiency {
                speed_factor: Some(Fraction::ONE),
                width_factor: Some(Fraction::ONE),
                ..TurnEfficiency::with_retained(Fraction::ONE)
            },
            _ => TurnEfficiency::with_retained(Fraction::ONE),
        }
    }
}

/// `per_turn^turns`, clamped to [0, 1]
fn compounded_efficiency(per_turn: f64, turns: u32) -> Fraction {
    let exponent = i32::try_from(turns).unwrap_or(i32::MAX);
    Fraction::clamped(per_turn.powi(exponent))
}

/// `max(0, 1 - k * turns / extent)`; a zero constant never penalises
fn axis_efficiency(k: f64, turns: u32, extent: f64) -> Fraction {
    if k == 0.0 {
        return Fraction::ONE;
    }
    if extent <= 0.0 {
        return Fraction::ZERO;
    }
    Fraction::clamped(1.0 - k * (f64::from(turns) / extent))
}

/// Split a `key=value` model parameter argument.
///
/// # Errors
/// Returns [`SprayInputError::MalformedModelParameter`] when there is no `=`,
/// the key is empty, or the value is not a number.
pub fn parse_model_param(raw: &str) -> Result<(String, f64), SprayInputError> {
    let malformed = || SprayInputError::MalformedModelParameter {
        raw: raw.to_string(),
    };

    let (key, value) = raw.split_once('=').ok_or_else(malformed)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(malformed());
    }
    let value: f64 = value.trim().parse().map_err(|_| malformed())?;
    Ok((key.to_ascii_lowercase(), value))
}
