//! Mapping inference for a whole record set

use crate::alias::{aliases_for, resolve_alias};
use crate::axis::AxisRule;
use crate::schema::{CanonicalField, FieldMapping};
use geoprox_core::{RecordSet, Result, Role};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Axis convention used when the caller does not configure one
pub fn default_axis_rule(role: Role) -> AxisRule {
    match role {
        Role::Government => AxisRule::Inverted,
        Role::Candidate => AxisRule::Standard,
    }
}

/// Infer a mapping with the role's default axis convention
pub fn infer_mapping(records: &RecordSet, role: Role) -> Result<FieldMapping> {
    infer_mapping_with(records, role, default_axis_rule(role))
}

/// Infer a mapping with an explicit axis convention.
///
/// Fails with `Error::Mapping` when either coordinate column is missing.
pub fn infer_mapping_with(records: &RecordSet, role: Role, axes: AxisRule) -> Result<FieldMapping> {
    let columns = records.columns();
    let mut mapped = BTreeMap::new();

    for &field in CanonicalField::descriptive_for(role) {
        if let Some(column) = resolve_alias(columns, aliases_for(field)) {
            mapped.insert(field, column.to_string());
        }
    }

    let coords = axes.resolve(columns);
    if let Some(lat) = coords.latitude {
        mapped.insert(CanonicalField::Latitude, lat.to_string());
    }
    if let Some(lon) = coords.longitude {
        mapped.insert(CanonicalField::Longitude, lon.to_string());
    }

    let mapping = FieldMapping::new(role, mapped);
    let (lat, lon) = mapping.coordinates(columns)?;
    info!("{} coordinates: latitude={:?}, longitude={:?} ({:?} axes)", role, lat, lon, axes);
    debug!("{} columns: {:?}", role, columns);

    Ok(mapping)
}
