//! Core domain types for stima estimates.

use serde::{Deserialize, Serialize};

use crate::money::{PRICE_STEP, round_half_away, round_to_multiple};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// A named unit of work with its estimated effort range in hours.
///
/// `min_hours == max_hours` denotes a single-value estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    /// Heading text of the phase (trimmed, never empty).
    pub name: String,
    /// Lower bound of the estimate.
    pub min_hours: u32,
    /// Upper bound of the estimate, always `>= min_hours`.
    pub max_hours: u32,
}

impl Phase {
    /// Build a phase, ordering the bounds so that `min_hours <= max_hours`.
    pub fn new(name: impl Into<String>, a: u32, b: u32) -> Self {
        Self {
            name: name.into(),
            min_hours: a.min(b),
            max_hours: a.max(b),
        }
    }

    /// Build a single-value phase.
    pub fn single(name: impl Into<String>, hours: u32) -> Self {
        Self::new(name, hours, hours)
    }

    /// Whether the estimate has no range.
    pub fn is_single(&self) -> bool {
        self.min_hours == self.max_hours
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            write!(f, "{}: {} ore", self.name, self.min_hours)
        } else {
            write!(f, "{}: {}-{} ore", self.name, self.min_hours, self.max_hours)
        }
    }
}

// ---------------------------------------------------------------------------
// RateConfig
// ---------------------------------------------------------------------------

/// Hourly rates (EUR) and weekly throughput used to price a quote.
///
/// Also the `[rates]` table of `stima.toml`. `min <= max` is expected but
/// not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    #[serde(default = "default_min_hourly_rate")]
    pub min_hourly_rate: f64,
    #[serde(default = "default_max_hourly_rate")]
    pub max_hourly_rate: f64,
    #[serde(default = "default_min_weekly_hours")]
    pub min_weekly_hours: f64,
    #[serde(default = "default_max_weekly_hours")]
    pub max_weekly_hours: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            min_hourly_rate: default_min_hourly_rate(),
            max_hourly_rate: default_max_hourly_rate(),
            min_weekly_hours: default_min_weekly_hours(),
            max_weekly_hours: default_max_weekly_hours(),
        }
    }
}

fn default_min_hourly_rate() -> f64 {
    34.0
}
fn default_max_hourly_rate() -> f64 {
    36.0
}
fn default_min_weekly_hours() -> f64 {
    12.0
}
fn default_max_weekly_hours() -> f64 {
    16.0
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Totals derived from a phase list and a [`RateConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub total_hours_min: u32,
    pub total_hours_max: u32,
    /// Best-case price in EUR, a multiple of 5.
    pub price_min: i64,
    /// Worst-case price in EUR, a multiple of 5.
    pub price_max: i64,
    /// Fewest hours at the fastest weekly pace.
    pub weeks_min: i64,
    /// Most hours at the slowest weekly pace.
    pub weeks_max: i64,
}

impl Aggregate {
    /// Average the bounds into the single values of a final quote.
    pub fn final_quote(&self) -> FinalQuote {
        let hours = f64::from(self.total_hours_min) + f64::from(self.total_hours_max);
        let price = (self.price_min + self.price_max) as f64;
        let weeks = (self.weeks_min + self.weeks_max) as f64;

        FinalQuote {
            total_hours: round_half_away(hours / 2.0) as u32,
            price: round_to_multiple(price / 2.0, PRICE_STEP),
            weeks: round_half_away(weeks / 2.0),
        }
    }
}

/// Single averaged values shown in a final quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalQuote {
    pub total_hours: u32,
    pub price: i64,
    pub weeks: i64,
}

/// Which summary layout to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Min/max bounds for hours, price and timeline.
    #[default]
    Range,
    /// Averaged values for a finalized quote.
    Final,
}
