//! Spray Coverage Core Library
//!
//! Computes how much ground one tank of an agricultural spray drone covers.
//! The ideal area assumes continuous spraying; the real area discounts it for
//! the time and efficiency lost turning at the end of each pass.
//!
//! ## Turn-loss models
//!
//! - Per-turn exponential: a fixed share `eta` retained per turn
//! - Linear percent per turn: a fixed percentage lost per turn
//! - Time fraction: turn time as a share of the tank's spray time
//! - Speed/width efficiency: two empirical penalties on speed and swath
//!
//! ```
//! use spray_coverage_core::{evaluate, SprayParameters};
//!
//! let result = evaluate(&SprayParameters::default().with_turn_count(0));
//! assert_eq!(result.real_area_acres, result.ideal_area_acres);
//! ```

// Core types and utilities
pub mod core_types;

pub mod coverage;
pub mod error;

// Re-export the evaluation API
pub use coverage::{
    compare_models, evaluate, evaluate_with, sweep_turns, try_evaluate, AreaConversion,
    CoverageResult, EvaluationConfig, IdealAreaBreakdown, IdealAreaMethod, LossModel,
    LossModelKind, SprayParameters, SweepPoint, TurnEfficiency,
};
pub use error::SprayInputError;
