use crate::core::classify::{Classifier, TierBoundaries};
use crate::core::distance::{DistanceMetric, Haversine};
use crate::models::{MatchResult, ReferencePoint, School};

/// Schools further than this many catchment radii away are never shown
pub const DEFAULT_PLAUSIBLE_RATIO: f64 = 2.0;

/// Result of ranking against an optional reference point
#[derive(Debug, Clone, PartialEq)]
pub enum Ranking<'a> {
    /// No reference point has been placed yet
    NotReady,
    /// Plausible schools, nearest first
    Ready(Vec<MatchResult<'a>>),
}

impl<'a> Ranking<'a> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Ranking::Ready(_))
    }

    /// Ranked results, empty when not ready
    pub fn results(&self) -> &[MatchResult<'a>] {
        match self {
            Ranking::NotReady => &[],
            Ranking::Ready(results) => results,
        }
    }

    pub fn len(&self) -> usize {
        self.results().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }
}

/// Ranking pipeline
///
/// # Pipeline Stages
/// 1. Classify every school against the reference point
/// 2. Drop schools beyond the plausibility cutoff
/// 3. Stable sort by distance, nearest first
///
/// Holds no state between calls; the reference point is always passed in.
#[derive(Debug, Clone)]
pub struct Ranker<M = Haversine> {
    classifier: Classifier<M>,
    plausible_ratio: f64,
}

impl Ranker<Haversine> {
    pub fn new(boundaries: TierBoundaries, plausible_ratio: f64) -> Self {
        Self {
            classifier: Classifier::new(boundaries),
            plausible_ratio,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(TierBoundaries::default(), DEFAULT_PLAUSIBLE_RATIO)
    }
}

impl Default for Ranker<Haversine> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<M: DistanceMetric> Ranker<M> {
    pub fn with_metric(boundaries: TierBoundaries, plausible_ratio: f64, metric: M) -> Self {
        Self {
            classifier: Classifier::with_metric(boundaries, metric),
            plausible_ratio,
        }
    }

    pub fn classifier(&self) -> &Classifier<M> {
        &self.classifier
    }

    pub fn plausible_ratio(&self) -> f64 {
        self.plausible_ratio
    }

    /// Whether a classified school is close enough to be listed
    #[inline]
    pub fn is_plausible(&self, result: &MatchResult<'_>) -> bool {
        result.ratio <= self.plausible_ratio
    }

    /// Rank schools around a reference point.
    ///
    /// Ties in distance keep the input order, so ranking the same dataset
    /// twice gives identical output.
    pub fn rank<'a, I>(&self, reference: &ReferencePoint, schools: I) -> Vec<MatchResult<'a>>
    where
        I: IntoIterator<Item = &'a School>,
    {
        let mut total = 0usize;
        let mut matches: Vec<MatchResult<'a>> = schools
            .into_iter()
            .inspect(|_| total += 1)
            .map(|school| self.classifier.classify(reference, school))
            .filter(|result| self.is_plausible(result))
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| a.distance_metres.total_cmp(&b.distance_metres));

        tracing::debug!(
            "Ranked {} of {} schools around ({}, {})",
            matches.len(),
            total,
            reference.0.latitude,
            reference.0.longitude
        );

        matches
    }

    /// Rank if a reference point exists, otherwise report `NotReady`
    pub fn rank_from<'a, I>(&self, reference: Option<&ReferencePoint>, schools: I) -> Ranking<'a>
    where
        I: IntoIterator<Item = &'a School>,
    {
        match reference {
            Some(reference) => Ranking::Ready(self.rank(reference, schools)),
            None => Ranking::NotReady,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, MatchTier, SchoolId};

    /// Reads the distance straight out of the school's latitude
    struct LatitudeAsMetres;

    impl DistanceMetric for LatitudeAsMetres {
        fn metres_between(&self, _from: Coordinates, to: Coordinates) -> f64 {
            to.latitude
        }
    }

    fn create_school(id: u32, lat: f64, lon: f64, miles: f64) -> School {
        School {
            id: SchoolId(id),
            name: format!("School {}", id),
            coordinates: Coordinates::new(lat, lon),
            catchment_radius_miles: miles,
            total_applications: 100,
            offers: 25,
            inspection: None,
            details: Default::default(),
        }
    }

    fn fixed_ranker() -> Ranker<LatitudeAsMetres> {
        Ranker::with_metric(TierBoundaries::default(), DEFAULT_PLAUSIBLE_RATIO, LatitudeAsMetres)
    }

    #[test]
    fn test_rank_sorted_by_distance() {
        let ranker = fixed_ranker();
        let schools = vec![
            create_school(1, 1500.0, 0.0, 1.0),
            create_school(2, 200.0, 0.0, 1.0),
            create_school(3, 900.0, 0.0, 1.0),
        ];

        let ranked = ranker.rank(&ReferencePoint::new(0.0, 0.0), &schools);

        let ids: Vec<u32> = ranked.iter().map(|m| m.school.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let ranker = fixed_ranker();
        let radius = 1609.34;
        let schools = vec![
            create_school(1, radius * 2.0, 0.0, 1.0),
            create_school(2, radius * 2.0 + 0.01, 0.0, 1.0),
        ];

        let ranked = ranker.rank(&ReferencePoint::new(0.0, 0.0), &schools);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].school.id, SchoolId(1));
        assert_eq!(ranked[0].ratio, 2.0);
        assert_eq!(ranked[0].tier, MatchTier::Bad);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranker = fixed_ranker();
        let schools = vec![
            create_school(5, 700.0, 0.0, 1.0),
            create_school(3, 700.0, 0.0, 1.0),
            create_school(9, 700.0, 0.0, 1.0),
        ];

        let first = ranker.rank(&ReferencePoint::new(0.0, 0.0), &schools);
        let second = ranker.rank(&ReferencePoint::new(0.0, 0.0), &schools);

        let ids: Vec<u32> = first.iter().map(|m| m.school.id.0).collect();
        assert_eq!(ids, vec![5, 3, 9]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_cutoff() {
        let ranker = Ranker::with_metric(TierBoundaries::default(), 1.0, LatitudeAsMetres);
        let schools = vec![
            create_school(1, 1000.0, 0.0, 1.0),
            create_school(2, 2000.0, 0.0, 1.0),
        ];

        let ranked = ranker.rank(&ReferencePoint::new(0.0, 0.0), &schools);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].school.id, SchoolId(1));
    }

    #[test]
    fn test_rank_from_without_reference() {
        let ranker = Ranker::with_defaults();
        let schools = vec![create_school(1, 51.0876, 1.161034, 1.0)];

        let ranking = ranker.rank_from(None, &schools);

        assert_eq!(ranking, Ranking::NotReady);
        assert!(!ranking.is_ready());
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_rank_from_with_reference() {
        let ranker = Ranker::with_defaults();
        let schools = vec![create_school(1, 51.0876, 1.161034, 1.0)];
        let reference = ReferencePoint::new(51.0876, 1.161034);

        let ranking = ranker.rank_from(Some(&reference), &schools);

        assert!(ranking.is_ready());
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.results()[0].tier, MatchTier::Great);
    }
}
