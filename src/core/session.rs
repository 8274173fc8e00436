use thiserror::Error;

use crate::core::distance::{miles_to_metres, DistanceMetric};
use crate::core::ranking::{Ranker, Ranking};
use crate::models::{FocusOverlay, ReferencePoint, SchoolId};
use crate::services::SchoolDataset;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown school: {0}")]
    UnknownSchool(SchoolId),
}

/// Whether a reference point has been placed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
}

/// State owned by the map: the reference point and the focused school.
///
/// The map is the only writer. Every update replaces the previous value
/// whole, and rankings are recomputed from scratch on request.
#[derive(Debug, Clone, Default)]
pub struct MapSession {
    reference: Option<ReferencePoint>,
    focused: Option<SchoolId>,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose reference point is already placed
    pub fn with_reference(reference: ReferencePoint) -> Self {
        Self {
            reference: Some(reference),
            focused: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.reference {
            Some(_) => SessionState::Ready,
            None => SessionState::Uninitialized,
        }
    }

    pub fn reference(&self) -> Option<&ReferencePoint> {
        self.reference.as_ref()
    }

    /// Replace the reference point after a drag or move
    pub fn move_reference(&mut self, reference: ReferencePoint) {
        tracing::debug!(
            "Reference point moved to ({}, {})",
            reference.0.latitude,
            reference.0.longitude
        );
        self.reference = Some(reference);
    }

    pub fn focused(&self) -> Option<SchoolId> {
        self.focused
    }

    /// Highlight one school, replacing any previous focus
    pub fn focus(&mut self, id: SchoolId, dataset: &SchoolDataset) -> Result<(), SessionError> {
        if !dataset.contains(id) {
            return Err(SessionError::UnknownSchool(id));
        }
        self.focused = Some(id);
        Ok(())
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Marker position and circle radius for the focused school
    pub fn focus_overlay(&self, dataset: &SchoolDataset) -> Option<FocusOverlay> {
        let school = dataset.get(self.focused?)?;
        Some(FocusOverlay {
            school_id: school.id,
            coordinates: school.coordinates,
            radius_metres: miles_to_metres(school.catchment_radius_miles),
        })
    }

    /// Rank the dataset around the current reference point
    pub fn ranking<'a, M: DistanceMetric>(
        &self,
        ranker: &Ranker<M>,
        dataset: &'a SchoolDataset,
    ) -> Ranking<'a> {
        ranker.rank_from(self.reference.as_ref(), dataset)
    }
}
