//! Coordinate column rules
//!
//! Upstream producers disagree on which of the "X"/"Y" columns holds the
//! latitude. Each convention is an [`AxisRule`]; the role only picks the
//! default, so a deployment can override it without touching alias matching.

use crate::alias::normalize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisRule {
    /// `X-Cord` holds latitude and `Y-Cord` holds longitude
    Inverted,
    /// `Y` is latitude and `X` is longitude. Underscore-prefixed columns
    /// (`_yCord`, `_y_cord`, ...) take precedence over plain ones.
    Standard,
}

/// Resolved coordinate column names for one header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisColumns<'a> {
    pub latitude: Option<&'a str>,
    pub longitude: Option<&'a str>,
}

#[inline]
fn mentions_coordinate(normalized: &str) -> bool {
    normalized.contains("cord") || normalized.contains("coord")
}

impl AxisRule {
    /// Find latitude/longitude columns; the first matching column wins
    /// for each axis
    pub fn resolve<'a>(&self, columns: &'a [String]) -> AxisColumns<'a> {
        match self {
            AxisRule::Inverted => resolve_plain(columns, 'x', 'y', |_| true),
            AxisRule::Standard => {
                let underscored = resolve_underscored(columns);
                let plain = resolve_plain(columns, 'y', 'x', |n| !n.starts_with('_'));
                AxisColumns {
                    latitude: underscored.latitude.or(plain.latitude),
                    longitude: underscored.longitude.or(plain.longitude),
                }
            }
        }
    }
}

fn resolve_plain<'a>(
    columns: &'a [String],
    lat_axis: char,
    lon_axis: char,
    eligible: impl Fn(&str) -> bool,
) -> AxisColumns<'a> {
    let mut found = AxisColumns::default();
    for column in columns {
        let n = normalize(column);
        if !eligible(&n) || !mentions_coordinate(&n) {
            continue;
        }
        if n.contains(lat_axis) {
            found.latitude.get_or_insert(column.as_str());
        } else if n.contains(lon_axis) {
            found.longitude.get_or_insert(column.as_str());
        }
    }
    found
}

fn resolve_underscored(columns: &[String]) -> AxisColumns<'_> {
    let mut found = AxisColumns::default();
    for column in columns {
        let n = normalize(column);
        if n == "_ycord" || n == "_y_cord" || (n.contains("_y") && mentions_coordinate(&n)) {
            found.latitude.get_or_insert(column.as_str());
        } else if n == "_xcord" || n == "_x_cord" || (n.contains("_x") && mentions_coordinate(&n)) {
            found.longitude.get_or_insert(column.as_str());
        }
    }
    found
}
