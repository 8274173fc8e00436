//! School Finder - ranks schools around a movable reference point
//!
//! Each school is classified by how its distance from the reference point
//! compares to its catchment radius, implausibly distant schools are dropped,
//! and the rest are listed nearest first.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{classify, MapSession, Ranker, Ranking, TierBoundaries};
pub use models::{Coordinates, DisplayRow, MatchResult, MatchTier, ReferencePoint, School, SchoolId};
pub use services::{DatasetError, SchoolDataset};
