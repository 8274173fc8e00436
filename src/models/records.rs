use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Coordinates, Inspection, School, SchoolDetails, SchoolId};

/// A school entry as it appears in the prepared `schools.json` document
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SchoolRecord {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub miles: f64,
    #[serde(rename = "totalApplications")]
    pub total_applications: u32,
    pub offers: u32,
    #[serde(default)]
    pub ofsted: Option<InspectionRecord>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub headteacher: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub pan: Option<String>,
    #[serde(default)]
    pub intake: Option<u32>,
    #[serde(rename = "distanceOffers", default)]
    pub distance_offers: Option<u32>,
    #[serde(rename = "criteriaOffers", default)]
    pub criteria_offers: Option<u32>,
    #[serde(rename = "localAuthority", default)]
    pub local_authority: Option<u32>,
    #[serde(default)]
    pub authority: Option<bool>,
}

/// Inspection block of a dataset entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectionRecord {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

impl SchoolRecord {
    /// Convert a validated record into a domain school
    pub fn into_school(self, id: SchoolId) -> School {
        School {
            id,
            name: self.name,
            coordinates: Coordinates::new(self.lat, self.lng),
            catchment_radius_miles: self.miles,
            total_applications: self.total_applications,
            offers: self.offers,
            inspection: self.ofsted.map(|o| Inspection {
                date: o.date.filter(|d| !d.trim().is_empty()),
                rating: o.rating.filter(|r| !r.trim().is_empty()),
                url: o.url,
                urn: o.urn,
                category: o.category,
            }),
            details: SchoolDetails {
                address: self.address,
                headteacher: self.headteacher,
                website: self.website,
                age_range: self.age,
                status: self.status,
                published_admission_number: self.pan,
                intake: self.intake,
                distance_offers: self.distance_offers,
                criteria_offers: self.criteria_offers,
                local_authority: self.local_authority,
                own_admission_authority: self.authority,
            },
        }
    }
}
