//! Solo and pooled ride quotes.

use serde::Serialize;
use tracing::debug;

use crate::fare::{FareConfig, MetricsCalculator, MetricsError, RideMetrics};
use crate::routing::{PathOutcome, RouteProvider};

/// One routed segment with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    /// The route taken (or why there is none).
    pub route: PathOutcome,
    /// Metrics of the route; zero when there is none.
    pub metrics: RideMetrics,
}

/// The three legs of a pooled ride.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PooledLegs {
    /// Rider 1 alone, from their origin to rider 2's origin.
    pub initial: Leg,
    /// Both riders, from rider 2's origin to rider 1's destination.
    pub shared: Leg,
    /// Rider 2 alone, from rider 1's destination to rider 2's destination.
    #[serde(rename = "final")]
    pub final_leg: Leg,
}

/// A pooled ride: its legs and what each rider pays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedRide {
    pub legs: PooledLegs,
    pub rider1: RideMetrics,
    pub rider2: RideMetrics,
}

impl SharedRide {
    /// Both riders' prices after the sharing discount.
    pub fn discounted_prices(&self, config: &FareConfig) -> (f64, f64) {
        (
            config.discounted(self.rider1.price()),
            config.discounted(self.rider2.price()),
        )
    }
}

/// Endpoints for a two-rider pooling query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRequest {
    pub rider1_origin: String,
    pub rider1_destination: String,
    pub rider2_origin: String,
    pub rider2_destination: String,
}

impl PoolRequest {
    /// Create a new pooling request.
    pub fn new(
        rider1_origin: impl Into<String>,
        rider1_destination: impl Into<String>,
        rider2_origin: impl Into<String>,
        rider2_destination: impl Into<String>,
    ) -> Self {
        Self {
            rider1_origin: rider1_origin.into(),
            rider1_destination: rider1_destination.into(),
            rider2_origin: rider2_origin.into(),
            rider2_destination: rider2_destination.into(),
        }
    }
}

/// Everything needed to compare riding alone with riding together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolQuote {
    pub rider1_solo: Leg,
    pub rider2_solo: Leg,
    pub shared: SharedRide,
    /// Rider 1's shared price after the discount.
    pub rider1_discounted: f64,
    /// Rider 2's shared price after the discount.
    pub rider2_discounted: f64,
}

/// Prices solo and pooled rides over a route provider.
///
/// Every query is a pure function of the provider's graph and the given
/// endpoints.
pub struct RideShareEngine<'a, P: RouteProvider> {
    provider: &'a P,
    config: &'a FareConfig,
}

impl<'a, P: RouteProvider> RideShareEngine<'a, P> {
    /// Create a new engine.
    pub fn new(provider: &'a P, config: &'a FareConfig) -> Self {
        Self { provider, config }
    }

    /// Route and price one segment.
    pub fn leg(&self, from: &str, to: &str) -> Result<Leg, MetricsError> {
        let route = self.provider.route(from, to);
        let metrics = self.calculator().segment_metrics(route.path())?;
        Ok(Leg { route, metrics })
    }

    /// Metrics of a solo trip from `start` to `end`.
    pub fn individual_ride_metrics(&self, start: &str, end: &str) -> Result<RideMetrics, MetricsError> {
        Ok(self.leg(start, end)?.metrics)
    }

    /// Metrics of a pooled ride, per rider.
    ///
    /// The ride always runs rider 1's origin → rider 2's origin → rider 1's
    /// destination → rider 2's destination. Other pickup and drop-off orders
    /// are not considered. The shared leg's price is split evenly; distance
    /// and time are not split.
    pub fn shared_ride_metrics(
        &self,
        u1_start: &str,
        u1_end: &str,
        u2_start: &str,
        u2_end: &str,
    ) -> Result<SharedRide, MetricsError> {
        let initial = self.leg(u1_start, u2_start)?;
        let shared = self.leg(u2_start, u1_end)?;
        let final_leg = self.leg(u1_end, u2_end)?;

        let (i, s, f) = (&initial.metrics, &shared.metrics, &final_leg.metrics);
        let half_shared = s.price() / 2.0;

        let rider1 = RideMetrics::from_parts(
            i.distance() + s.distance(),
            i.time() + s.time(),
            i.price() + half_shared,
        );
        let rider2 = RideMetrics::from_parts(
            s.distance() + f.distance(),
            s.time() + f.time(),
            half_shared + f.price(),
        );

        debug!(
            initial_km = i.distance(),
            shared_km = s.distance(),
            final_km = f.distance(),
            rider1_price = rider1.price(),
            rider2_price = rider2.price(),
            "pooled ride priced"
        );

        Ok(SharedRide {
            legs: PooledLegs {
                initial,
                shared,
                final_leg,
            },
            rider1,
            rider2,
        })
    }

    /// Solo and pooled quotes for both riders.
    pub fn quote(&self, request: &PoolRequest) -> Result<PoolQuote, MetricsError> {
        let rider1_solo = self.leg(&request.rider1_origin, &request.rider1_destination)?;
        let rider2_solo = self.leg(&request.rider2_origin, &request.rider2_destination)?;
        let shared = self.shared_ride_metrics(
            &request.rider1_origin,
            &request.rider1_destination,
            &request.rider2_origin,
            &request.rider2_destination,
        )?;
        let (rider1_discounted, rider2_discounted) = shared.discounted_prices(self.config);

        Ok(PoolQuote {
            rider1_solo,
            rider2_solo,
            shared,
            rider1_discounted,
            rider2_discounted,
        })
    }

    fn calculator(&self) -> MetricsCalculator<'_> {
        MetricsCalculator::new(self.provider.graph(), self.config)
    }
}
