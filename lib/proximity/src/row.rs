use crate::columns::ResolvedColumns;
use geoprox_core::{cell_text, GeoPoint, RecordSet};
use geoprox_schema::CanonicalField;
use serde::Serialize;
use serde_json::Value;

/// Descriptive fields of the government record in a match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GovernmentInfo {
    /// Position of the record in the government input
    #[serde(rename = "gov_record_index")]
    pub record_index: usize,
    #[serde(rename = "gov_school_name")]
    pub name: Value,
    #[serde(rename = "gov_bemis_code")]
    pub identifier: Value,
    #[serde(rename = "gov_district")]
    pub district: Value,
    #[serde(rename = "gov_tehsil")]
    pub tehsil: Value,
    #[serde(rename = "gov_uc")]
    pub union_council: Value,
    #[serde(rename = "gov_level")]
    pub level: Value,
    #[serde(rename = "gov_gender")]
    pub gender: Value,
    #[serde(rename = "gov_enrollment")]
    pub enrollment: Value,
    #[serde(rename = "gov_space_for_rooms")]
    pub space_for_rooms: Value,
    #[serde(rename = "gov_total_rooms")]
    pub total_rooms: Value,
    #[serde(rename = "gov_toilets")]
    pub toilets: Value,
    #[serde(rename = "gov_boundary_wall")]
    pub boundary_wall: Value,
    #[serde(rename = "gov_drinking_water")]
    pub drinking_water: Value,
    #[serde(rename = "gov_latitude")]
    pub latitude: f64,
    #[serde(rename = "gov_longitude")]
    pub longitude: f64,
}

impl GovernmentInfo {
    pub fn extract(records: &RecordSet, columns: &ResolvedColumns, row: usize, point: &GeoPoint) -> Self {
        let v = |field| columns.value(records, row, field);
        Self {
            record_index: row,
            name: v(CanonicalField::Name),
            identifier: v(CanonicalField::Identifier),
            district: v(CanonicalField::District),
            tehsil: v(CanonicalField::Tehsil),
            union_council: v(CanonicalField::UnionCouncil),
            level: v(CanonicalField::Level),
            gender: v(CanonicalField::Gender),
            enrollment: v(CanonicalField::Enrollment),
            space_for_rooms: v(CanonicalField::SpaceForRooms),
            total_rooms: v(CanonicalField::TotalRooms),
            toilets: v(CanonicalField::Toilets),
            boundary_wall: v(CanonicalField::BoundaryWall),
            drinking_water: v(CanonicalField::DrinkingWater),
            latitude: point.lat(),
            longitude: point.lon(),
        }
    }
}

/// Descriptive fields of the candidate record in a match.
///
/// Coordinates are the corrected ones actually used for the distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateInfo {
    #[serde(rename = "custom_record_index")]
    pub record_index: usize,
    #[serde(rename = "custom_school_name")]
    pub name: Value,
    #[serde(rename = "custom_bemis_code")]
    pub identifier: Value,
    #[serde(rename = "custom_division")]
    pub division: Value,
    #[serde(rename = "custom_district")]
    pub district: Value,
    #[serde(rename = "custom_tehsil")]
    pub tehsil: Value,
    #[serde(rename = "custom_level")]
    pub level: Value,
    #[serde(rename = "custom_gender")]
    pub gender: Value,
    #[serde(rename = "custom_students")]
    pub students: Value,
    #[serde(rename = "custom_functional_status")]
    pub functional_status: Value,
    #[serde(rename = "custom_source")]
    pub source: Value,
    #[serde(rename = "custom_latitude")]
    pub latitude: f64,
    #[serde(rename = "custom_longitude")]
    pub longitude: f64,
}

impl CandidateInfo {
    pub fn extract(records: &RecordSet, columns: &ResolvedColumns, row: usize, point: &GeoPoint) -> Self {
        let v = |field| columns.value(records, row, field);
        Self {
            record_index: row,
            name: v(CanonicalField::Name),
            identifier: v(CanonicalField::Identifier),
            division: v(CanonicalField::Division),
            district: v(CanonicalField::District),
            tehsil: v(CanonicalField::Tehsil),
            level: v(CanonicalField::Level),
            gender: v(CanonicalField::Gender),
            students: v(CanonicalField::Students),
            functional_status: v(CanonicalField::FunctionalStatus),
            source: v(CanonicalField::Source),
            latitude: point.lat(),
            longitude: point.lon(),
        }
    }
}

/// Identity of a government record for grouping
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GovernmentKey {
    Identifier(String),
    /// Input position, used when the record has no identifier
    Record(usize),
}

/// One (government, candidate) pair within the radius
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    #[serde(flatten)]
    pub government: GovernmentInfo,
    #[serde(flatten)]
    pub candidate: CandidateInfo,
    /// Kilometers, rounded half away from zero to 2 decimals
    pub distance_km: f64,
    /// Candidates kept for this government record
    #[serde(rename = "custom_schools_count")]
    pub candidate_count: usize,
}

impl MatchRow {
    pub fn government_key(&self) -> GovernmentKey {
        match cell_text(&self.government.identifier) {
            Some(id) => GovernmentKey::Identifier(id),
            None => GovernmentKey::Record(self.government.record_index),
        }
    }

    /// Candidate source label; `None` when the source cell was empty
    pub fn source(&self) -> Option<String> {
        cell_text(&self.candidate.source)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;

    #[test]
    fn test_government_key_prefers_identifier() {
        assert_eq!(row(Some("1234"), 7, "BEF", 1.0, 1).government_key(), GovernmentKey::Identifier("1234".into()));
        assert_eq!(row(None, 7, "BEF", 1.0, 1).government_key(), GovernmentKey::Record(7));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(row(Some("1234"), 0, "BEF", 1.25, 3)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["gov_bemis_code"], "1234");
        assert_eq!(obj["custom_source"], "BEF");
        assert_eq!(obj["distance_km"], 1.25);
        assert_eq!(obj["custom_schools_count"], 3);
        assert!(obj["gov_district"].is_null());
        // every value is a plain JSON scalar
        assert!(obj.values().all(|v| !v.is_object() && !v.is_array()));
    }
}
