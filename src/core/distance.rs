use geo::HaversineDistance;

use crate::models::Coordinates;

/// Metres in one statute mile, as used by the map
pub const METRES_PER_MILE: f64 = 1609.34;

/// Convert a radius in miles to metres
#[inline]
pub fn miles_to_metres(miles: f64) -> f64 {
    miles * METRES_PER_MILE
}

/// Source of point-to-point distances.
///
/// The map normally supplies this; tests can substitute their own.
pub trait DistanceMetric {
    /// Distance between two coordinates in metres
    fn metres_between(&self, from: Coordinates, to: Coordinates) -> f64;
}

/// Great-circle distance on a spherical Earth
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    #[inline]
    fn metres_between(&self, from: Coordinates, to: Coordinates) -> f64 {
        haversine_distance(from, to)
    }
}

/// Calculate the Haversine distance between two points in metres
#[inline]
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    let from: geo::Point<f64> = from.into();
    let to: geo::Point<f64> = to.into();
    from.haversine_distance(&to)
}
