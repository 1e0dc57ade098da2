//! Aggregate hours, price range and timeline for a list of phases.

use tracing::{debug, instrument};

use stima_shared::money::{PRICE_STEP, round_half_away, round_to_multiple};
use stima_shared::{Aggregate, Phase, RateConfig, Result, StimaError};

/// Reduce `phases` to totals under `rates`.
///
/// - prices: hours × rate, rounded to the nearest multiple of 5 EUR
/// - weeks: best case is fewest hours at the fastest pace, worst case is most
///   hours at the slowest pace; no floor is applied, so 0 weeks is possible
///
/// Callers check that `phases` is non-empty. Weekly hours that are zero,
/// negative or not finite are rejected, and so are totals that do not fit
/// in `u32`.
#[instrument(skip_all, fields(phases = phases.len()))]
pub fn calculate(phases: &[Phase], rates: &RateConfig) -> Result<Aggregate> {
    check_weekly_hours("min_weekly_hours", rates.min_weekly_hours)?;
    check_weekly_hours("max_weekly_hours", rates.max_weekly_hours)?;

    let total_hours_min = total_hours(phases, |p| p.min_hours)?;
    let total_hours_max = total_hours(phases, |p| p.max_hours)?;

    let min = f64::from(total_hours_min);
    let max = f64::from(total_hours_max);

    let aggregate = Aggregate {
        total_hours_min,
        total_hours_max,
        price_min: round_to_multiple(min * rates.min_hourly_rate, PRICE_STEP),
        price_max: round_to_multiple(max * rates.max_hourly_rate, PRICE_STEP),
        weeks_min: round_half_away(min / rates.max_weekly_hours),
        weeks_max: round_half_away(max / rates.min_weekly_hours),
    };

    debug!(?aggregate, "estimate computed");
    Ok(aggregate)
}

fn total_hours(phases: &[Phase], hours: impl Fn(&Phase) -> u32) -> Result<u32> {
    phases.iter().try_fold(0u32, |total, phase| {
        total.checked_add(hours(phase)).ok_or_else(|| {
            StimaError::validation(format!(
                "total hours overflow at phase '{}' ({} ore)",
                phase.name,
                hours(phase)
            ))
        })
    })
}

fn check_weekly_hours(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StimaError::validation(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}
