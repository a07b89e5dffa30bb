//! Radius join between government and candidate records
//!
//! For every government record, distances to all valid candidates are
//! computed in one batch pass, filtered to the radius, stably sorted and
//! flattened into [`MatchRow`]s.

use crate::columns::ResolvedColumns;
use crate::config::MatchConfig;
use crate::progress::{ProgressSink, ProgressUpdate};
use crate::row::{CandidateInfo, GovernmentInfo, MatchRow};
use geoprox_core::{cell_text, round_to, GeoPoint, PointColumns, RecordSet, Result};
use geoprox_schema::{CanonicalField, FieldMapping};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Only the first few skipped records are logged individually
const LOG_SKIPPED_LIMIT: usize = 3;

/// Rows plus the per-run accounting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub rows: Vec<MatchRow>,
    /// Government records processed, including skipped ones
    pub processed: usize,
    /// Government records with at least one candidate in range
    pub matched_government: usize,
    /// Government records whose coordinate could not be parsed
    pub skipped_government: usize,
    /// Candidates excluded from the join because of an invalid coordinate
    pub invalid_candidates: usize,
}

/// Valid candidates, parsed and corrected once per run
struct CandidatePool {
    infos: Vec<CandidateInfo>,
    columns: PointColumns,
    invalid: usize,
}

impl CandidatePool {
    fn build(records: &RecordSet, columns: &ResolvedColumns, config: &MatchConfig) -> Self {
        let mut infos = Vec::new();
        let mut points = Vec::new();
        let mut invalid = 0;

        for row in 0..records.len() {
            let swap = cell_text(&columns.value(records, row, CanonicalField::Source))
                .map_or(false, |source| config.needs_swap(&source));

            match columns.point(records, row, swap) {
                Ok(point) => {
                    infos.push(CandidateInfo::extract(records, columns, row, &point));
                    points.push(point);
                }
                Err(e) => {
                    invalid += 1;
                    if invalid <= LOG_SKIPPED_LIMIT {
                        let (lat, lon) = columns.raw_coordinates(records, row);
                        debug!("Skipping candidate {}: {} (lat: {}, lon: {})", row, e, lat, lon);
                    }
                }
            }
        }

        Self {
            infos,
            columns: PointColumns::from_points(&points),
            invalid,
        }
    }
}

/// Proximity matcher for one configuration
#[derive(Debug, Clone, Default)]
pub struct ProximityMatcher {
    config: MatchConfig,
}

impl ProximityMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match every government record against all candidates.
    ///
    /// Government records are visited in input order. Rows for one
    /// government record are sorted nearest first (rounded distance, ties
    /// in candidate input order) and all carry the same candidate count.
    pub fn run(
        &self,
        government: &RecordSet,
        government_mapping: &FieldMapping,
        candidates: &RecordSet,
        candidate_mapping: &FieldMapping,
        mut progress: Option<&mut dyn ProgressSink>,
    ) -> Result<MatchOutcome> {
        self.config.validate()?;
        let gov_columns = ResolvedColumns::resolve(government, government_mapping)?;
        let cand_columns = ResolvedColumns::resolve(candidates, candidate_mapping)?;

        let pool = CandidatePool::build(candidates, &cand_columns, &self.config);
        let total = government.len();
        let interval = self.config.progress_interval;
        let radius = self.config.radius_km;

        let mut outcome = MatchOutcome {
            invalid_candidates: pool.invalid,
            ..MatchOutcome::default()
        };

        for row in 0..total {
            match gov_columns.point(government, row, false) {
                Ok(origin) => {
                    let kept = self.nearby(&pool, &origin, radius);
                    if !kept.is_empty() {
                        outcome.matched_government += 1;
                        let gov_info = GovernmentInfo::extract(government, &gov_columns, row, &origin);
                        let count = kept.len();
                        outcome.rows.extend(kept.into_iter().map(|(idx, distance_km)| MatchRow {
                            government: gov_info.clone(),
                            candidate: pool.infos[idx].clone(),
                            distance_km,
                            candidate_count: count,
                        }));
                    }
                }
                Err(e) => {
                    outcome.skipped_government += 1;
                    if outcome.skipped_government <= LOG_SKIPPED_LIMIT {
                        let (lat, lon) = gov_columns.raw_coordinates(government, row);
                        debug!("Skipping government record {}: {} (lat: {}, lon: {})", row, e, lat, lon);
                    }
                }
            }

            outcome.processed = row + 1;
            if outcome.processed % interval == 0 || outcome.processed == total {
                if let Some(sink) = progress.as_deref_mut() {
                    sink.report(&ProgressUpdate {
                        processed: outcome.processed,
                        total,
                        latest_row: outcome.rows.last(),
                    });
                }
            }
        }

        // An empty government set still gets its completion report
        if total == 0 {
            if let Some(sink) = progress.as_deref_mut() {
                sink.report(&ProgressUpdate { processed: 0, total: 0, latest_row: None });
            }
        }

        info!(
            "Matching complete: {} government records processed ({} matched, {} skipped), {} rows, {} invalid candidates",
            outcome.processed,
            outcome.matched_government,
            outcome.skipped_government,
            outcome.rows.len(),
            outcome.invalid_candidates
        );

        Ok(outcome)
    }

    /// Pool indices and rounded distances within `radius`, nearest first
    fn nearby(&self, pool: &CandidatePool, origin: &GeoPoint, radius: f64) -> Vec<(usize, f64)> {
        let distances = pool.columns.distances_from(origin);
        let mut kept: Vec<(usize, f64)> = distances
            .into_iter()
            .enumerate()
            .filter(|&(_, d)| d <= radius)
            .map(|(idx, d)| (idx, round_to(d, 2)))
            .collect();
        // sort_by is stable: equal distances keep candidate input order
        kept.sort_by(|a, b| a.1.total_cmp(&b.1));
        kept
    }
}

/// Run a match with an explicit radius and correction set and return just
/// the rows
pub fn find_matches(
    government: &RecordSet,
    government_mapping: &FieldMapping,
    candidates: &RecordSet,
    candidate_mapping: &FieldMapping,
    radius_km: f64,
    swap_sources: &BTreeSet<String>,
) -> Result<Vec<MatchRow>> {
    let config = MatchConfig {
        radius_km,
        swap_sources: swap_sources.clone(),
        ..MatchConfig::default()
    };
    ProximityMatcher::new(config)
        .run(government, government_mapping, candidates, candidate_mapping, None)
        .map(|outcome| outcome.rows)
}
