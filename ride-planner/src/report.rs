//! Comparison report for a pooling quote.
//!
//! Renders a [`PoolQuote`] as the plain-text comparison table shown by the
//! command-line front end, or as JSON.

use std::fmt;

use serde::Serialize;

use crate::fare::RideMetrics;
use crate::rideshare::PoolQuote;

/// Whether the riders accepted the pooled ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareDecision {
    Share,
    Solo,
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    #[serde(flatten)]
    pub metrics: RideMetrics,
}

/// What each rider finally pays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalPrices {
    pub decision: ShareDecision,
    pub rider1: f64,
    pub rider2: f64,
}

/// A quote laid out for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<'q> {
    pub quote: &'q PoolQuote,
    pub rows: Vec<ComparisonRow>,
    pub final_prices: FinalPrices,
}

impl<'q> Comparison<'q> {
    /// Lay out `quote` for the given decision.
    ///
    /// Sharing charges each rider their discounted shared price; riding solo
    /// charges the undiscounted solo price.
    pub fn new(quote: &'q PoolQuote, decision: ShareDecision) -> Self {
        let rows = vec![
            ComparisonRow {
                label: "User 1 Solo",
                metrics: quote.rider1_solo.metrics,
            },
            ComparisonRow {
                label: "User 2 Solo",
                metrics: quote.rider2_solo.metrics,
            },
            ComparisonRow {
                label: "User 1 Shared",
                metrics: quote.shared.rider1,
            },
            ComparisonRow {
                label: "User 2 Shared",
                metrics: quote.shared.rider2,
            },
        ];

        let final_prices = match decision {
            ShareDecision::Share => FinalPrices {
                decision,
                rider1: quote.rider1_discounted,
                rider2: quote.rider2_discounted,
            },
            ShareDecision::Solo => FinalPrices {
                decision,
                rider1: quote.rider1_solo.metrics.price(),
                rider2: quote.rider2_solo.metrics.price(),
            },
        };

        Self {
            quote,
            rows,
            final_prices,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

const RULE: &str = "------------------------------------------------------------------";

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.quote;
        let legs = &quote.shared.legs;

        writeln!(f, "Solo routes:")?;
        writeln!(f, "  User 1: {}", quote.rider1_solo.route.path())?;
        writeln!(f, "  User 2: {}", quote.rider2_solo.route.path())?;
        writeln!(f)?;
        writeln!(f, "Shared ride:")?;
        writeln!(f, "  User 1 solo:    {}", legs.initial.route.path())?;
        writeln!(f, "  Shared segment: {}", legs.shared.route.path())?;
        writeln!(f, "  User 2 solo:    {}", legs.final_leg.route.path())?;
        writeln!(f)?;

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "| {:<15} | {:>13} | {:>12} | {:>13} |",
            "Ride Type", "Distance (km)", "Time (hours)", "Price (units)"
        )?;
        writeln!(f, "{RULE}")?;
        for row in &self.rows {
            writeln!(
                f,
                "| {:<15} | {:>13.2} | {:>12.2} | {:>13.2} |",
                row.label,
                row.metrics.distance(),
                row.metrics.time(),
                row.metrics.price()
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        writeln!(f, "Discounted shared price for User 1: {:.2} units", quote.rider1_discounted)?;
        writeln!(f, "Discounted shared price for User 2: {:.2} units", quote.rider2_discounted)?;
        writeln!(f)?;

        let heading = match self.final_prices.decision {
            ShareDecision::Share => "Final prices (shared ride):",
            ShareDecision::Solo => "Final prices (individual rides):",
        };
        writeln!(f, "{heading}")?;
        writeln!(f, "  User 1: {:.2} units", self.final_prices.rider1)?;
        write!(f, "  User 2: {:.2} units", self.final_prices.rider2)
    }
}
