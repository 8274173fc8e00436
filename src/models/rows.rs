use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchTier, SchoolId};

/// Display-ready row for one ranked school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub school_id: SchoolId,
    pub name: String,
    pub tier: MatchTier,
    /// Distance in kilometres, rounded to one decimal
    pub distance_km: f64,
    pub distance_label: String,
    /// `None` when the school reports zero offers
    pub applications_per_offer: Option<f64>,
    pub applications_per_offer_label: String,
    pub applications_summary: String,
    pub inspection_date: String,
    pub inspection_rating: String,
    pub inspection_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_camel_case() {
        let row = DisplayRow {
            school_id: SchoolId(3),
            name: "Castle Hill Primary".to_string(),
            tier: MatchTier::Okay,
            distance_km: 1.3,
            distance_label: "1.3km".to_string(),
            applications_per_offer: None,
            applications_per_offer_label: "N/A".to_string(),
            applications_summary: "96 applications for 0 places".to_string(),
            inspection_date: "N/A".to_string(),
            inspection_rating: "N/A".to_string(),
            inspection_url: None,
        };

        let json = serde_json::to_value(&row).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert!(keys.iter().all(|k| !k.contains('_')), "keys: {:?}", keys);
        assert_eq!(json["schoolId"], 3);
        assert_eq!(json["applicationsPerOfferLabel"], "N/A");
        assert_eq!(serde_json::from_value::<DisplayRow>(json).unwrap(), row);
    }
}
