//! Summary statistics over a completed set of match rows
//!
//! Everything here is a pure function of the rows; nothing is maintained
//! incrementally.

use crate::row::{GovernmentKey, MatchRow};
use ahash::AHashMap;
use geoprox_core::{round_to, Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Label used for rows whose candidate has no source value
pub const UNKNOWN_SOURCE: &str = "N/A";

/// Two-bucket distance histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DistanceRanges {
    /// `d <= 2`
    #[serde(rename = "0-2km")]
    pub within_2km: usize,
    /// `2 < d <= 5`
    #[serde(rename = "2-5km")]
    pub from_2_to_5km: usize,
}

impl DistanceRanges {
    #[inline]
    fn add(&mut self, distance_km: f64) {
        if distance_km <= 2.0 {
            self.within_2km += 1;
        } else if distance_km <= 5.0 {
            self.from_2_to_5km += 1;
        }
    }
}

/// Statistics for one candidate source
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceSummary {
    pub count: usize,
    pub avg_distance: f64,
    pub distance_ranges: DistanceRanges,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_rows: usize,
    /// Distinct government records appearing in the rows
    pub total_gov_schools: usize,
    pub total_custom_schools_found: usize,
    pub avg_distance: f64,
    /// Mean number of rows per distinct government record, 1 decimal
    pub avg_custom_schools_per_gov: f64,
    pub distance_ranges: DistanceRanges,
    pub by_source: BTreeMap<String, SourceSummary>,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    sum: f64,
    ranges: DistanceRanges,
}

impl Accumulator {
    fn add(&mut self, distance_km: f64) {
        self.count += 1;
        self.sum += distance_km;
        self.ranges.add(distance_km);
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round_to(self.sum / self.count as f64, 2)
        }
    }
}

/// Compute summary statistics for `rows`.
///
/// Empty input yields the all-zero default. A negative or non-finite
/// distance means the rows were not produced by the matcher and is
/// reported as `Error::Aggregation`.
pub fn summarize(rows: &[MatchRow]) -> Result<SummaryStatistics> {
    if rows.is_empty() {
        return Ok(SummaryStatistics::default());
    }

    let mut overall = Accumulator::default();
    let mut by_source: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut per_government: AHashMap<GovernmentKey, usize> = AHashMap::new();

    for (i, row) in rows.iter().enumerate() {
        let d = row.distance_km;
        if !d.is_finite() || d < 0.0 {
            return Err(Error::Aggregation(format!(
                "row {} has invalid distance {}",
                i, d
            )));
        }

        overall.add(d);
        let source = row.source().unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
        by_source.entry(source).or_default().add(d);
        *per_government.entry(row.government_key()).or_insert(0) += 1;
    }

    let government_count = per_government.len();
    let group_total: usize = per_government.values().sum();

    Ok(SummaryStatistics {
        total_rows: rows.len(),
        total_gov_schools: government_count,
        total_custom_schools_found: rows.len(),
        avg_distance: overall.mean(),
        avg_custom_schools_per_gov: round_to(group_total as f64 / government_count as f64, 1),
        distance_ranges: overall.ranges,
        by_source: by_source
            .into_iter()
            .map(|(source, acc)| {
                let summary = SourceSummary {
                    count: acc.count,
                    avg_distance: acc.mean(),
                    distance_ranges: acc.ranges,
                };
                (source, summary)
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::fixtures::row;

    #[test]
    fn test_empty_rows() {
        let stats = summarize(&[]).unwrap();
        assert_eq!(stats, SummaryStatistics::default());
        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.avg_distance, 0.0);
        assert_eq!(stats.avg_custom_schools_per_gov, 0.0);
        assert!(stats.by_source.is_empty());
    }

    #[test]
    fn test_single_government_histogram() {
        let rows: Vec<_> = [1.0, 1.0, 3.0, 3.0]
            .iter()
            .map(|&d| row(Some("G1"), 0, "BEF", d, 4))
            .collect();
        let stats = summarize(&rows).unwrap();
        assert_eq!(stats.distance_ranges.within_2km, 2);
        assert_eq!(stats.distance_ranges.from_2_to_5km, 2);
        assert_eq!(stats.avg_distance, 2.0);
        assert_eq!(stats.avg_custom_schools_per_gov, 4.0);
        assert_eq!(stats.total_gov_schools, 1);
        assert_eq!(stats.total_rows, 4);
    }

    #[test]
    fn test_per_source_breakdown() {
        let rows = vec![
            row(Some("G1"), 0, "BEF", 0.5, 2),
            row(Some("G1"), 0, "NCHD", 2.5, 2),
            row(Some("G2"), 1, "BEF", 1.5, 1),
            row(None, 2, "", 4.0, 1),
        ];
        let stats = summarize(&rows).unwrap();

        assert_eq!(stats.total_gov_schools, 3);
        assert_eq!(stats.avg_distance, 2.13);
        assert_eq!(stats.avg_custom_schools_per_gov, 1.3);

        let bef = &stats.by_source["BEF"];
        assert_eq!(bef.count, 2);
        assert_eq!(bef.avg_distance, 1.0);
        assert_eq!(bef.distance_ranges.within_2km, 2);

        let nchd = &stats.by_source["NCHD"];
        assert_eq!(nchd.distance_ranges.from_2_to_5km, 1);

        assert_eq!(stats.by_source[UNKNOWN_SOURCE].count, 1);
    }

    #[test]
    fn test_boundary_buckets() {
        let rows = vec![
            row(Some("G1"), 0, "BEF", 2.0, 3),
            row(Some("G1"), 0, "BEF", 2.01, 3),
            row(Some("G1"), 0, "BEF", 5.0, 3),
        ];
        let stats = summarize(&rows).unwrap();
        assert_eq!(stats.distance_ranges.within_2km, 1);
        assert_eq!(stats.distance_ranges.from_2_to_5km, 2);
    }

    #[test]
    fn test_negative_distance_fails_loudly() {
        let rows = vec![row(Some("G1"), 0, "BEF", -1.0, 1)];
        assert!(matches!(summarize(&rows), Err(Error::Aggregation(_))));
        let rows = vec![row(Some("G1"), 0, "BEF", f64::NAN, 1)];
        assert!(matches!(summarize(&rows), Err(Error::Aggregation(_))));
    }

    #[test]
    fn test_serialized_keys() {
        let rows = vec![row(Some("G1"), 0, "BEF", 1.0, 1)];
        let json = serde_json::to_value(summarize(&rows).unwrap()).unwrap();
        assert_eq!(json["distance_ranges"]["0-2km"], 1);
        assert_eq!(json["by_source"]["BEF"]["count"], 1);
        assert_eq!(json["avg_custom_schools_per_gov"], 1.0);
    }
}
