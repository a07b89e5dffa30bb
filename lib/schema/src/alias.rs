//! Declarative alias table for descriptive columns
//!
//! Every non-coordinate canonical field lists the normalized column names
//! it accepts. One generic routine walks the header and returns the first
//! column that matches; coordinate rules live separately in [`crate::axis`].

use crate::schema::CanonicalField;

/// A single accepted form of a column name, compared against the
/// trimmed, lower-cased header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasPattern {
    /// Whole name equals the alias
    Exact(&'static str),
    /// Name contains the fragment anywhere
    Contains(&'static str),
}

impl AliasPattern {
    #[inline]
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            AliasPattern::Exact(alias) => normalized == *alias,
            AliasPattern::Contains(fragment) => normalized.contains(fragment),
        }
    }
}

use AliasPattern::{Contains, Exact};

const ALIAS_TABLE: &[(CanonicalField, &[AliasPattern])] = &[
    (
        CanonicalField::Identifier,
        &[Exact("bemiscode"), Exact("bemis_code"), Exact("bemis code")],
    ),
    (
        CanonicalField::Name,
        &[Exact("school name"), Exact("schoolname"), Exact("school_name")],
    ),
    (CanonicalField::District, &[Exact("district")]),
    (CanonicalField::Tehsil, &[Exact("tehsil")]),
    (
        CanonicalField::UnionCouncil,
        &[Exact("uc"), Exact("union council"), Exact("union_council")],
    ),
    (CanonicalField::Division, &[Exact("division")]),
    (
        CanonicalField::Level,
        &[Exact("level"), Exact("schoollevel"), Exact("school level"), Exact("school_level")],
    ),
    // "gende" is a truncated header seen in upstream sheets
    (CanonicalField::Gender, &[Exact("gender"), Exact("gende")]),
    (CanonicalField::Enrollment, &[Contains("enroll")]),
    (
        CanonicalField::Students,
        &[Exact("student count"), Exact("students"), Exact("student_count")],
    ),
    (CanonicalField::Source, &[Exact("source")]),
    (
        CanonicalField::FunctionalStatus,
        &[Exact("functionalstatus"), Exact("functional status"), Exact("functional_status")],
    ),
    (CanonicalField::SpaceForRooms, &[Exact("space for new rooms")]),
    (CanonicalField::TotalRooms, &[Exact("total rooms")]),
    (CanonicalField::Toilets, &[Exact("toilets")]),
    (
        CanonicalField::BoundaryWall,
        &[Exact("boundry wall"), Exact("boundary wall")],
    ),
    (CanonicalField::DrinkingWater, &[Exact("drinking water")]),
];

/// Accepted patterns for a field; empty for coordinates
pub fn aliases_for(field: CanonicalField) -> &'static [AliasPattern] {
    ALIAS_TABLE
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, patterns)| *patterns)
        .unwrap_or(&[])
}

/// First column (header order) matching any of `patterns`
pub fn resolve_alias<'a>(columns: &'a [String], patterns: &[AliasPattern]) -> Option<&'a str> {
    columns
        .iter()
        .find(|column| {
            let normalized = normalize(column);
            patterns.iter().any(|p| p.matches(&normalized))
        })
        .map(String::as_str)
}

/// Trim and lower-case a header for comparison
#[inline]
pub fn normalize(column: &str) -> String {
    column.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        let columns = cols(&["School Name", "BEMIS Code", "District"]);
        assert_eq!(
            resolve_alias(&columns, aliases_for(CanonicalField::Identifier)),
            Some("BEMIS Code")
        );
        assert_eq!(
            resolve_alias(&columns, aliases_for(CanonicalField::Name)),
            Some("School Name")
        );
    }

    #[test]
    fn test_misspelled_gender_accepted() {
        let columns = cols(&["Gende", "Level"]);
        assert_eq!(
            resolve_alias(&columns, aliases_for(CanonicalField::Gender)),
            Some("Gende")
        );
    }

    #[test]
    fn test_first_matching_column_wins() {
        let columns = cols(&["SchoolLevel", "Level"]);
        assert_eq!(
            resolve_alias(&columns, aliases_for(CanonicalField::Level)),
            Some("SchoolLevel")
        );
    }

    #[test]
    fn test_exact_does_not_match_substring() {
        let columns = cols(&["Sub District"]);
        assert_eq!(resolve_alias(&columns, aliases_for(CanonicalField::District)), None);
    }

    #[test]
    fn test_contains_pattern() {
        let columns = cols(&["Name", "Total Enrollment 2023"]);
        assert_eq!(
            resolve_alias(&columns, aliases_for(CanonicalField::Enrollment)),
            Some("Total Enrollment 2023")
        );
    }

    #[test]
    fn test_coordinates_have_no_aliases() {
        assert!(aliases_for(CanonicalField::Latitude).is_empty());
        assert!(aliases_for(CanonicalField::Longitude).is_empty());
    }

    #[test]
    fn test_misspelled_boundary_wall() {
        let columns = cols(&["Boundry wall"]);
        assert_eq!(
            resolve_alias(&columns, aliases_for(CanonicalField::BoundaryWall)),
            Some("Boundry wall")
        );
    }
}
