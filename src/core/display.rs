use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{DisplayRow, Inspection, MatchResult};

/// Rendered in place of any missing or undefined value
pub const NOT_APPLICABLE: &str = "N/A";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d %B %Y", "%d %b %Y", "%d/%m/%Y"];

/// Round to one decimal place
#[inline]
pub fn round_one_dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Applications per offered place, rounded to one decimal.
///
/// `None` when no places were offered.
pub fn applications_per_offer(total_applications: u32, offers: u32) -> Option<f64> {
    if offers == 0 {
        return None;
    }
    Some(round_one_dp(total_applications as f64 / offers as f64))
}

/// Distance in kilometres, rounded to one decimal
#[inline]
pub fn distance_km(distance_metres: f64) -> f64 {
    round_one_dp(distance_metres / 1000.0)
}

/// Distance label such as `3.2km`
pub fn format_km(distance_metres: f64) -> String {
    // Halves round up, matching distance_km
    format!("{:.1}km", distance_km(distance_metres))
}

/// Inspection date as `YYYY-MM-DD`, or the sentinel
pub fn format_inspection_date(raw: Option<&str>) -> String {
    raw.and_then(parse_inspection_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Inspection rating lower-cased, or the sentinel
pub fn format_inspection_rating(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(rating) if !rating.is_empty() => rating.to_lowercase(),
        _ => NOT_APPLICABLE.to_string(),
    }
}

fn parse_inspection_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Timestamps are reported in UTC
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok());
    if parsed.is_none() {
        tracing::debug!("Unrecognised inspection date: {:?}", raw);
    }
    parsed
}

impl DisplayRow {
    /// Derive the display fields for one ranked school
    pub fn from_match(result: &MatchResult<'_>) -> Self {
        let school = result.school;
        let inspection = school.inspection.as_ref();
        let per_offer = applications_per_offer(school.total_applications, school.offers);

        DisplayRow {
            school_id: school.id,
            name: school.name.clone(),
            tier: result.tier,
            distance_km: distance_km(result.distance_metres),
            distance_label: format_km(result.distance_metres),
            applications_per_offer: per_offer,
            applications_per_offer_label: per_offer
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            applications_summary: format!(
                "{} applications for {} places",
                school.total_applications, school.offers
            ),
            inspection_date: format_inspection_date(inspection.and_then(|i| i.date.as_deref())),
            inspection_rating: format_inspection_rating(inspection.and_then(|i| i.rating.as_deref())),
            inspection_url: inspection.and_then(|i: &Inspection| i.url.clone()),
        }
    }
}

/// Display rows for a whole ranking, in ranked order
pub fn display_rows(results: &[MatchResult<'_>]) -> Vec<DisplayRow> {
    results.iter().map(DisplayRow::from_match).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, MatchTier, School, SchoolId};

    fn create_test_school(total_applications: u32, offers: u32, inspection: Option<Inspection>) -> School {
        School {
            id: SchoolId(42),
            name: "Hillside Academy".to_string(),
            coordinates: Coordinates::new(51.08, 1.16),
            catchment_radius_miles: 1.5,
            total_applications,
            offers,
            inspection,
            details: Default::default(),
        }
    }

    #[test]
    fn test_applications_per_offer() {
        assert_eq!(applications_per_offer(450, 90), Some(5.0));
        assert_eq!(applications_per_offer(100, 30), Some(3.3));
        assert_eq!(applications_per_offer(90, 90), Some(1.0));
    }

    #[test]
    fn test_zero_offers_is_guarded() {
        assert_eq!(applications_per_offer(10, 0), None);
    }

    #[test]
    fn test_distance_km() {
        assert_eq!(distance_km(3249.0), 3.2);
        assert_eq!(distance_km(0.0), 0.0);
        assert_eq!(format_km(3249.0), "3.2km");
        assert_eq!(format_km(0.0), "0.0km");
    }

    #[test]
    fn test_km_label_rounds_halves_up() {
        assert_eq!(format_km(3250.0), "3.3km");
        assert_eq!(format_km(250.0), "0.3km");
        assert_eq!(format_km(1250.0), "1.3km");
        for metres in [250.0, 1250.0, 3250.0, 4449.0] {
            assert_eq!(format_km(metres), format!("{:.1}km", distance_km(metres)));
        }
    }

    #[test]
    fn test_inspection_date_formats() {
        assert_eq!(format_inspection_date(Some("2019-03-12")), "2019-03-12");
        assert_eq!(format_inspection_date(Some("12 March 2019")), "2019-03-12");
        assert_eq!(format_inspection_date(Some("5 Nov 2021")), "2021-11-05");
        assert_eq!(format_inspection_date(Some("05/11/2021")), "2021-11-05");
        assert_eq!(format_inspection_date(Some("2021-11-05T23:30:00-02:00")), "2021-11-06");
    }

    #[test]
    fn test_inspection_date_missing() {
        assert_eq!(format_inspection_date(None), NOT_APPLICABLE);
        assert_eq!(format_inspection_date(Some("")), NOT_APPLICABLE);
        assert_eq!(format_inspection_date(Some("sometime")), NOT_APPLICABLE);
    }

    #[test]
    fn test_inspection_rating() {
        assert_eq!(format_inspection_rating(Some("Outstanding")), "outstanding");
        assert_eq!(format_inspection_rating(Some("  ")), NOT_APPLICABLE);
        assert_eq!(format_inspection_rating(None), NOT_APPLICABLE);
    }

    #[test]
    fn test_row_without_inspection() {
        let school = create_test_school(450, 90, None);
        let result = MatchResult {
            school: &school,
            distance_metres: 1234.0,
            ratio: 0.51,
            tier: MatchTier::Okay,
        };

        let row = DisplayRow::from_match(&result);

        assert_eq!(row.school_id, SchoolId(42));
        assert_eq!(row.distance_label, "1.2km");
        assert_eq!(row.applications_per_offer, Some(5.0));
        assert_eq!(row.applications_per_offer_label, "5.0");
        assert_eq!(row.applications_summary, "450 applications for 90 places");
        assert_eq!(row.inspection_date, NOT_APPLICABLE);
        assert_eq!(row.inspection_rating, NOT_APPLICABLE);
        assert_eq!(row.inspection_url, None);
    }

    #[test]
    fn test_row_with_zero_offers_and_inspection() {
        let inspection = Inspection {
            date: Some("2022-06-30".to_string()),
            rating: Some("Requires Improvement".to_string()),
            url: Some("https://reports.example.org/provider/1".to_string()),
            ..Default::default()
        };
        let school = create_test_school(80, 0, Some(inspection));
        let result = MatchResult {
            school: &school,
            distance_metres: 0.0,
            ratio: 0.0,
            tier: MatchTier::Great,
        };

        let row = DisplayRow::from_match(&result);

        assert_eq!(row.applications_per_offer, None);
        assert_eq!(row.applications_per_offer_label, NOT_APPLICABLE);
        assert_eq!(row.inspection_date, "2022-06-30");
        assert_eq!(row.inspection_rating, "requires improvement");
        assert!(row.inspection_url.is_some());
    }
}
