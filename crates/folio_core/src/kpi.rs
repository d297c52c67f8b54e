//! Display statistics derived from a project's chart series.
//!
//! # Invariants
//! - Derivation is pure; stored project data is never modified.
//! - At most [`MAX_CARD_KPIS`] statistics are returned.
//! - The change statistic requires a strictly positive first value.

use crate::model::project::{Kpi, Project};

/// Number of statistics a project card shows.
pub const MAX_CARD_KPIS: usize = 2;

/// Derives card statistics for `project`.
///
/// With fewer than two chart points the stored KPI list is used as-is.
pub fn derive_kpis(project: &Project) -> Vec<Kpi> {
    let points = project.chart_points();
    let (first, last) = match points {
        [first, .., last] => (first, last),
        _ => {
            return project
                .kpis
                .iter()
                .flatten()
                .take(MAX_CARD_KPIS)
                .cloned()
                .collect();
        }
    };

    let mut kpis = Vec::with_capacity(MAX_CARD_KPIS);
    kpis.push(Kpi::new(
        format!("Final Outcome ({})", last.name),
        format!("{}{}", format_locale_number(last.value), last.unit_str()),
    ));

    if first.value > 0.0 {
        let change = (last.value - first.value) / first.value * 100.0;
        let direction = if change < 0.0 {
            "Reduction"
        } else {
            "Improvement"
        };
        kpis.push(Kpi::new(
            format!("Overall {direction}"),
            format!("{:.1}%", round_half_up(change.abs(), 1)),
        ));
    }

    kpis
}

/// Formats a number the way an en-US locale displays it: thousands
/// separators and at most three fractional digits without trailing zeros.
pub fn format_locale_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", round_half_up(value.abs(), 3));
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Rounds a non-negative value to `digits` decimals with ties away from
/// zero; `format!` alone rounds ties to even.
fn round_half_up(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}
