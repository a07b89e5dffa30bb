//! Mapping, matching and summarizing as one call

use crate::config::MatchConfig;
use crate::matcher::{MatchOutcome, ProximityMatcher};
use crate::progress::ProgressSink;
use crate::summary::{summarize, SummaryStatistics};
use geoprox_core::{RecordSet, Result, Role};
use geoprox_schema::{infer_mapping_with, FieldMapping};
use serde::Serialize;
use tracing::info;

/// Everything produced by one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub government_mapping: FieldMapping,
    pub candidate_mapping: FieldMapping,
    pub outcome: MatchOutcome,
    pub summary: SummaryStatistics,
}

/// Infer both mappings with the configured axis rules, match, then
/// summarize.
///
/// Mapping failures surface before any matching work is done.
pub fn analyze(
    government: &RecordSet,
    candidates: &RecordSet,
    config: &MatchConfig,
    progress: Option<&mut dyn ProgressSink>,
) -> Result<Analysis> {
    config.validate()?;
    let government_mapping = infer_mapping_with(government, Role::Government, config.government_axes)?;
    let candidate_mapping = infer_mapping_with(candidates, Role::Candidate, config.candidate_axes)?;

    info!(
        "Analyzing {} government records against {} candidates within {} km",
        government.len(),
        candidates.len(),
        config.radius_km
    );

    let matcher = ProximityMatcher::new(config.clone());
    let outcome = matcher.run(
        government,
        &government_mapping,
        candidates,
        &candidate_mapping,
        progress,
    )?;
    let summary = summarize(&outcome.rows)?;

    Ok(Analysis {
        government_mapping,
        candidate_mapping,
        outcome,
        summary,
    })
}
