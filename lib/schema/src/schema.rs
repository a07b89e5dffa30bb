//! Canonical fields and the per-dataset field mapping
//!
//! A [`FieldMapping`] ties each canonical field to the literal column name
//! found in one record set. It is built once by the mapper and read-only
//! afterwards.

use geoprox_core::{Error, Result, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic attribute independent of the upstream column name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Latitude,
    Longitude,
    Identifier,
    Name,
    District,
    Tehsil,
    UnionCouncil,
    Division,
    Level,
    Gender,
    Enrollment,
    Students,
    Source,
    FunctionalStatus,
    SpaceForRooms,
    TotalRooms,
    Toilets,
    BoundaryWall,
    DrinkingWater,
}

impl CanonicalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Latitude => "latitude",
            CanonicalField::Longitude => "longitude",
            CanonicalField::Identifier => "identifier",
            CanonicalField::Name => "name",
            CanonicalField::District => "district",
            CanonicalField::Tehsil => "tehsil",
            CanonicalField::UnionCouncil => "union_council",
            CanonicalField::Division => "division",
            CanonicalField::Level => "level",
            CanonicalField::Gender => "gender",
            CanonicalField::Enrollment => "enrollment",
            CanonicalField::Students => "students",
            CanonicalField::Source => "source",
            CanonicalField::FunctionalStatus => "functional_status",
            CanonicalField::SpaceForRooms => "space_for_rooms",
            CanonicalField::TotalRooms => "total_rooms",
            CanonicalField::Toilets => "toilets",
            CanonicalField::BoundaryWall => "boundary_wall",
            CanonicalField::DrinkingWater => "drinking_water",
        }
    }

    /// Descriptive (non-coordinate) fields resolved for a role
    pub fn descriptive_for(role: Role) -> &'static [CanonicalField] {
        match role {
            Role::Government => &[
                CanonicalField::Identifier,
                CanonicalField::Name,
                CanonicalField::District,
                CanonicalField::Tehsil,
                CanonicalField::UnionCouncil,
                CanonicalField::Level,
                CanonicalField::Gender,
                CanonicalField::Enrollment,
                CanonicalField::SpaceForRooms,
                CanonicalField::TotalRooms,
                CanonicalField::Toilets,
                CanonicalField::BoundaryWall,
                CanonicalField::DrinkingWater,
            ],
            Role::Candidate => &[
                CanonicalField::Identifier,
                CanonicalField::Name,
                CanonicalField::Division,
                CanonicalField::District,
                CanonicalField::Tehsil,
                CanonicalField::Level,
                CanonicalField::Gender,
                CanonicalField::Students,
                CanonicalField::FunctionalStatus,
                CanonicalField::Source,
            ],
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field → column name for one record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    role: Role,
    columns: BTreeMap<CanonicalField, String>,
}

impl FieldMapping {
    /// Create a mapping directly, e.g. from an explicit user override
    pub fn new(role: Role, columns: BTreeMap<CanonicalField, String>) -> Self {
        Self { role, columns }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Column mapped to `field`, if any
    #[inline]
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.columns.iter().map(|(f, c)| (*f, c.as_str()))
    }

    /// The (latitude, longitude) column names, or a mapping error naming
    /// whichever is absent
    pub fn coordinates(&self, available: &[String]) -> Result<(&str, &str)> {
        match (self.get(CanonicalField::Latitude), self.get(CanonicalField::Longitude)) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            (lat, lon) => {
                let mut missing = Vec::new();
                if lat.is_none() {
                    missing.push(CanonicalField::Latitude.to_string());
                }
                if lon.is_none() {
                    missing.push(CanonicalField::Longitude.to_string());
                }
                Err(Error::Mapping {
                    role: self.role,
                    missing,
                    available: available.to_vec(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_missing_reports_both() {
        let mapping = FieldMapping::new(Role::Candidate, BTreeMap::new());
        let available = vec!["SchoolName".to_string()];
        match mapping.coordinates(&available) {
            Err(Error::Mapping { role, missing, available }) => {
                assert_eq!(role, Role::Candidate);
                assert_eq!(missing, vec!["latitude", "longitude"]);
                assert_eq!(available, vec!["SchoolName"]);
            }
            other => panic!("expected mapping error, got {:?}", other),
        }
    }

    #[test]
    fn test_coordinates_present() {
        let mut columns = BTreeMap::new();
        columns.insert(CanonicalField::Latitude, "X-Cord".to_string());
        columns.insert(CanonicalField::Longitude, "Y-Cord".to_string());
        let mapping = FieldMapping::new(Role::Government, columns);
        assert_eq!(mapping.coordinates(&[]).unwrap(), ("X-Cord", "Y-Cord"));
    }

    #[test]
    fn test_field_serde_names() {
        let json = serde_json::to_string(&CanonicalField::FunctionalStatus).unwrap();
        assert_eq!(json, "\"functional_status\"");
        assert_eq!(CanonicalField::UnionCouncil.as_str(), "union_council");
    }
}
