use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a school within a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(pub u32);

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for SchoolId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(SchoolId)
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite, with latitude in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        // geo points are (x, y) = (longitude, latitude)
        geo::Point::new(c.longitude, c.latitude)
    }
}

/// The user-controlled search origin.
///
/// Replaced wholesale whenever the map reports a move; never patched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferencePoint(pub Coordinates);

impl ReferencePoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self(Coordinates::new(latitude, longitude))
    }

    pub fn coordinates(&self) -> Coordinates {
        self.0
    }
}

/// Latest inspection report for a school, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub date: Option<String>,
    pub rating: Option<String>,
    pub url: Option<String>,
    pub urn: Option<String>,
    pub category: Option<String>,
}

/// A school from the static dataset.
///
/// Loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub coordinates: Coordinates,
    /// Typical admission distance declared by the school, in miles. Always > 0.
    pub catchment_radius_miles: f64,
    pub total_applications: u32,
    pub offers: u32,
    pub inspection: Option<Inspection>,
    #[serde(default)]
    pub details: SchoolDetails,
}

/// Descriptive fields carried through from the admissions booklet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDetails {
    pub address: Option<String>,
    pub headteacher: Option<String>,
    pub website: Option<String>,
    pub age_range: Option<String>,
    pub status: Option<String>,
    pub published_admission_number: Option<String>,
    pub intake: Option<u32>,
    pub distance_offers: Option<u32>,
    pub criteria_offers: Option<u32>,
    pub local_authority: Option<u32>,
    pub own_admission_authority: Option<bool>,
}

/// How favourably a school's distance compares to its catchment radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Great,
    Okay,
    Warn,
    Bad,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Great => "great",
            MatchTier::Okay => "okay",
            MatchTier::Warn => "warn",
            MatchTier::Bad => "bad",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One classified school, recomputed on every ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<'a> {
    pub school: &'a School,
    pub distance_metres: f64,
    /// `distance_metres` divided by the catchment radius in metres
    pub ratio: f64,
    pub tier: MatchTier,
}

/// Position and radius the map draws for the focused school
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusOverlay {
    pub school_id: SchoolId,
    pub coordinates: Coordinates,
    pub radius_metres: f64,
}
