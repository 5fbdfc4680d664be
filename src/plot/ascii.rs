//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-width rows), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - emissions breakdown: one stacked bar, `I` initial, `R` return, `P` packaging
//! - ROI savings: one row per category, `-` up to the low bound, `=` low..high

use crate::domain::{EmissionsBreakdown, InterventionCategory, RoiOutcome};

/// Render the emissions breakdown as a stacked bar plus a legend line.
///
/// A zero breakdown (zero total) renders an empty bar.
pub fn render_breakdown_bar(breakdown: &EmissionsBreakdown, width: usize) -> String {
    let width = width.max(10);
    let shares = [
        ('I', breakdown.initial_transport_pct),
        ('R', breakdown.return_transport_pct),
        ('P', breakdown.packaging_pct),
    ];
    let cells = allocate_cells(&shares.map(|(_, pct)| pct), width);

    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for ((ch, _), n) in shares.iter().zip(cells) {
        bar.extend(std::iter::repeat_n(*ch, n));
    }
    while bar.chars().count() < width + 1 {
        bar.push(' ');
    }
    bar.push(']');

    format!(
        "{bar}\nI initial {:.1}% | R return {:.1}% | P packaging {:.1}%\n",
        breakdown.initial_transport_pct, breakdown.return_transport_pct, breakdown.packaging_pct
    )
}

/// Render monthly savings ranges of every category on a shared scale.
pub fn render_savings_ranges(outcome: &RoiOutcome, width: usize) -> String {
    let width = width.max(10);
    let max_high = outcome
        .projections
        .values()
        .map(|p| p.monthly_high)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Monthly savings range (scale: 0..{max_high:.2})\n"));
    for category in InterventionCategory::ALL {
        let Some(p) = outcome.projections.get(&category) else {
            continue;
        };
        let low = scale(p.monthly_low, max_high, width);
        let high = scale(p.monthly_high, max_high, width).max(low);

        let mut row = String::with_capacity(width);
        row.extend(std::iter::repeat_n('-', low));
        row.extend(std::iter::repeat_n('=', high - low));
        row.extend(std::iter::repeat_n(' ', width - high));
        out.push_str(&format!("{:<20} |{row}|\n", category.display_name()));
    }
    out
}

fn scale(value: f64, max: f64, width: usize) -> usize {
    if !(max > 0.0) || !value.is_finite() {
        return 0;
    }
    let u = (value / max).clamp(0.0, 1.0);
    (u * width as f64).round() as usize
}

/// Split `width` cells across percentage shares (largest remainder), so the
/// cells always add up to exactly `width` unless every share is zero.
fn allocate_cells(pcts: &[f64; 3], width: usize) -> [usize; 3] {
    let total: f64 = pcts.iter().filter(|p| p.is_finite() && **p > 0.0).sum();
    if !(total > 0.0) {
        return [0; 3];
    }

    let exact: Vec<f64> = pcts
        .iter()
        .map(|p| if p.is_finite() && *p > 0.0 { p / total * width as f64 } else { 0.0 })
        .collect();
    let mut cells = [0usize; 3];
    for (i, e) in exact.iter().enumerate() {
        cells[i] = e.floor() as usize;
    }

    let mut remaining = width - cells.iter().sum::<usize>();
    let mut order: Vec<usize> = (0..3).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    for i in order {
        if remaining == 0 {
            break;
        }
        if exact[i] > 0.0 {
            cells[i] += 1;
            remaining -= 1;
        }
    }
    cells
}
