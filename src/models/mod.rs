// Model exports
pub mod domain;
pub mod records;
pub mod rows;

pub use domain::{Coordinates, FocusOverlay, Inspection, MatchResult, MatchTier, ReferencePoint, School, SchoolDetails, SchoolId};
pub use records::{InspectionRecord, SchoolRecord};
pub use rows::DisplayRow;
