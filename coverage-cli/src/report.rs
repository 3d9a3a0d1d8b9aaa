//! Text rendering of coverage results

use spray_coverage_core::{CoverageResult, SweepPoint};
use std::fmt::Write;

/// Single evaluation, in the calculator's results layout.
pub fn render_result(result: &CoverageResult, precision: usize, breakdown: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Model: {}", result.model);
    let _ = writeln!(
        out,
        "ideal_area_acres: {:.*}",
        precision, *result.ideal_area_acres
    );
    let _ = writeln!(
        out,
        "real_area_acres:  {:.*}",
        precision, *result.real_area_acres
    );
    let _ = writeln!(
        out,
        "loss_fraction:    {:.*}",
        precision + 1,
        *result.loss_fraction
    );
    let _ = writeln!(
        out,
        "Total turn loss: {:.2}% over {} turns",
        result.loss_percent(),
        result.turn_count
    );
    let _ = writeln!(out, "{}", result.model.formula());

    if breakdown {
        let b = &result.breakdown;
        let _ = writeln!(out);
        let _ = writeln!(out, "Area rate:        {:.3}", b.area_rate);
        let _ = writeln!(out, "Flow rate:        {:.5}", b.flow_per_second);
        let _ = writeln!(out, "Application rate: {:.7}", b.application_rate);
        let _ = writeln!(out, "Volume per acre:  {:.3}", b.liters_per_acre);
        let _ = writeln!(out, "Spray time:       {:.1}", b.spray_time);

        let e = &result.efficiency;
        if let Some(f) = e.time_fraction {
            let _ = writeln!(out, "Turn time share:  {f}");
        }
        if let (Some(speed), Some(width)) = (e.speed_factor, e.width_factor) {
            let _ = writeln!(out, "Speed factor:     {speed}");
            let _ = writeln!(out, "Width factor:     {width}");
        }
        let _ = writeln!(out, "Retained:         {}", e.retained);
    }
    out
}

/// One row per turn count.
pub fn render_sweep(points: &[SweepPoint], precision: usize) -> String {
    let width = precision + 4;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:>width$}  {:>width$}  {:>7}",
        "turns", "ideal", "real", "loss%"
    );
    for p in points {
        let _ = writeln!(
            out,
            "{:>5}  {:>width$.precision$}  {:>width$.precision$}  {:>7.2}",
            p.turn_count,
            *p.result.ideal_area_acres,
            *p.result.real_area_acres,
            p.result.loss_percent(),
        );
    }
    out
}

/// One row per loss model.
pub fn render_comparison(results: &[CoverageResult], precision: usize) -> String {
    let width = precision + 4;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24}  {:>width$}  {:>width$}  {:>7}",
        "model", "ideal", "real", "loss%"
    );
    for r in results {
        let _ = writeln!(
            out,
            "{:<24}  {:>width$.precision$}  {:>width$.precision$}  {:>7.2}",
            r.model.name(),
            *r.ideal_area_acres,
            *r.real_area_acres,
            r.loss_percent(),
        );
    }
    out
}
