//! Field mappings resolved to column positions
//!
//! Name lookups happen once per run; the matching loop only indexes rows.

use geoprox_core::{clean_cell, Error, GeoPoint, RecordParseError, RecordSet, Result};
use geoprox_schema::{CanonicalField, FieldMapping};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    latitude: usize,
    longitude: usize,
    fields: BTreeMap<CanonicalField, usize>,
}

impl ResolvedColumns {
    /// Resolve every mapped column against `records`.
    ///
    /// Missing coordinates, or a mapped column the record set does not
    /// have, surface as `Error::Mapping`.
    pub fn resolve(records: &RecordSet, mapping: &FieldMapping) -> Result<Self> {
        let (lat_name, lon_name) = mapping.coordinates(records.columns())?;
        let position = |field: CanonicalField, name: &str| {
            records.column_index(name).ok_or_else(|| Error::Mapping {
                role: mapping.role(),
                missing: vec![format!("{} ({:?})", field, name)],
                available: records.columns().to_vec(),
            })
        };

        let latitude = position(CanonicalField::Latitude, lat_name)?;
        let longitude = position(CanonicalField::Longitude, lon_name)?;

        let mut fields = BTreeMap::new();
        for (field, name) in mapping.iter() {
            if matches!(field, CanonicalField::Latitude | CanonicalField::Longitude) {
                continue;
            }
            fields.insert(field, position(field, name)?);
        }

        Ok(Self { latitude, longitude, fields })
    }

    /// Parse the record's point, swapping axes first when asked
    #[inline]
    pub fn point(&self, records: &RecordSet, row: usize, swap_axes: bool) -> std::result::Result<GeoPoint, RecordParseError> {
        GeoPoint::from_cells(
            records.cell(row, self.latitude),
            records.cell(row, self.longitude),
            swap_axes,
        )
    }

    /// Raw (latitude, longitude) cells, for diagnostics
    pub fn raw_coordinates<'a>(&self, records: &'a RecordSet, row: usize) -> (&'a Value, &'a Value) {
        (records.cell(row, self.latitude), records.cell(row, self.longitude))
    }

    /// Cleaned descriptive value; `Null` when the field is unmapped
    #[inline]
    pub fn value(&self, records: &RecordSet, row: usize, field: CanonicalField) -> Value {
        self.fields
            .get(&field)
            .map(|&col| clean_cell(records.cell(row, col)))
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprox_core::Role;
    use serde_json::json;

    fn records() -> RecordSet {
        RecordSet::new(
            vec!["X-Cord".into(), "Y-Cord".into(), "School Name".into()],
            vec![vec![json!("30.0"), json!(70.0), json!(" GPS Killi ")]],
        )
    }

    #[test]
    fn test_resolve_and_read() {
        let records = records();
        let mut map = BTreeMap::new();
        map.insert(CanonicalField::Latitude, "X-Cord".to_string());
        map.insert(CanonicalField::Longitude, "Y-Cord".to_string());
        map.insert(CanonicalField::Name, "School Name".to_string());
        let mapping = FieldMapping::new(Role::Government, map);

        let cols = ResolvedColumns::resolve(&records, &mapping).unwrap();
        let p = cols.point(&records, 0, false).unwrap();
        assert_eq!((p.lat(), p.lon()), (30.0, 70.0));
        assert_eq!(cols.value(&records, 0, CanonicalField::Name), json!("GPS Killi"));
        assert_eq!(cols.value(&records, 0, CanonicalField::District), Value::Null);
    }

    #[test]
    fn test_incomplete_mapping_is_structured_error() {
        let records = records();
        let mapping = FieldMapping::new(Role::Candidate, BTreeMap::new());
        assert!(matches!(
            ResolvedColumns::resolve(&records, &mapping),
            Err(Error::Mapping { .. })
        ));
    }

    #[test]
    fn test_mapping_to_unknown_column() {
        let records = records();
        let mut map = BTreeMap::new();
        map.insert(CanonicalField::Latitude, "lat".to_string());
        map.insert(CanonicalField::Longitude, "Y-Cord".to_string());
        let mapping = FieldMapping::new(Role::Government, map);
        match ResolvedColumns::resolve(&records, &mapping) {
            Err(Error::Mapping { missing, .. }) => assert!(missing[0].contains("latitude")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
