// Core algorithm exports
pub mod classify;
pub mod display;
pub mod distance;
pub mod ranking;
pub mod session;

pub use classify::{classify, Classifier, TierBoundaries};
pub use display::{applications_per_offer, display_rows, distance_km, format_inspection_date, format_inspection_rating, NOT_APPLICABLE};
pub use distance::{haversine_distance, miles_to_metres, DistanceMetric, Haversine, METRES_PER_MILE};
pub use ranking::{Ranker, Ranking, DEFAULT_PLAUSIBLE_RATIO};
pub use session::{MapSession, SessionError, SessionState};
