use crate::core::distance::{miles_to_metres, DistanceMetric, Haversine};
use crate::models::{MatchResult, MatchTier, ReferencePoint, School};

/// Upper (exclusive) ratio bounds for each tier, checked in order.
///
/// Anything at or above `warn_below` is `Bad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBoundaries {
    pub great_below: f64,
    pub okay_below: f64,
    pub warn_below: f64,
}

impl Default for TierBoundaries {
    fn default() -> Self {
        Self {
            great_below: 0.33,
            okay_below: 0.9,
            warn_below: 1.2,
        }
    }
}

impl TierBoundaries {
    /// Boundary table as `(exclusive upper bound, tier)` rows
    pub fn table(&self) -> [(f64, MatchTier); 3] {
        [
            (self.great_below, MatchTier::Great),
            (self.okay_below, MatchTier::Okay),
            (self.warn_below, MatchTier::Warn),
        ]
    }

    /// Look up the tier for a distance/radius ratio
    #[inline]
    pub fn tier_for(&self, ratio: f64) -> MatchTier {
        self.table()
            .into_iter()
            .find(|(upper, _)| ratio < *upper)
            .map(|(_, tier)| tier)
            .unwrap_or(MatchTier::Bad)
    }

    /// Bounds must be finite, positive and strictly increasing
    pub fn is_valid(&self) -> bool {
        let bounds = [self.great_below, self.okay_below, self.warn_below];
        bounds.iter().all(|b| b.is_finite() && *b > 0.0)
            && bounds.windows(2).all(|w| w[0] < w[1])
    }
}

/// Classifies a school against a reference point.
///
/// Pure: the result depends only on the reference point, the school,
/// the boundaries and the distance metric.
#[derive(Debug, Clone, Default)]
pub struct Classifier<M = Haversine> {
    boundaries: TierBoundaries,
    metric: M,
}

impl Classifier<Haversine> {
    pub fn new(boundaries: TierBoundaries) -> Self {
        Self {
            boundaries,
            metric: Haversine,
        }
    }
}

impl<M: DistanceMetric> Classifier<M> {
    pub fn with_metric(boundaries: TierBoundaries, metric: M) -> Self {
        Self { boundaries, metric }
    }

    pub fn boundaries(&self) -> &TierBoundaries {
        &self.boundaries
    }

    /// Measure and classify one school.
    ///
    /// Expects `school.catchment_radius_miles > 0`; the dataset loader
    /// rejects anything else.
    pub fn classify<'a>(&self, reference: &ReferencePoint, school: &'a School) -> MatchResult<'a> {
        let distance_metres = self
            .metric
            .metres_between(reference.coordinates(), school.coordinates);
        let ratio = distance_metres / miles_to_metres(school.catchment_radius_miles);

        MatchResult {
            school,
            distance_metres,
            ratio,
            tier: self.boundaries.tier_for(ratio),
        }
    }
}

/// Classify with the default boundaries and haversine distance
pub fn classify<'a>(reference: &ReferencePoint, school: &'a School) -> MatchResult<'a> {
    Classifier::new(TierBoundaries::default()).classify(reference, school)
}
