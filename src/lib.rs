//! # geoprox
//!
//! Proximity analysis between two facility registries: for every record in
//! a government registry, find the candidate facilities within a radius
//! (5 km by default) and summarize what was found.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! geoprox --government gov.csv --candidates custom.csv --swap-source BEC
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use geoprox::prelude::*;
//!
//! let government = load_records("gov.csv").unwrap();
//! let candidates = load_records("custom.csv").unwrap();
//! let config = MatchConfig::default().with_swap_source("BEC");
//!
//! let analysis = analyze(&government, &candidates, &config, None).unwrap();
//! println!("{} rows, mean {} km", analysis.summary.total_rows, analysis.summary.avg_distance);
//! ```
//!
//! ## Crate Structure
//!
//! - `geoprox-core` - Validated points, haversine distance, raw record sets, errors
//! - `geoprox-schema` - Column inference for heterogeneous headers
//! - `geoprox-proximity` - Radius matcher and summary statistics
//! - `geoprox-storage` - File loading, report export, analysis sessions

// Re-export core types
pub use geoprox_core::{
    haversine_batch, haversine_km, round_to, Error, GeoPoint, PointColumns, RecordParseError,
    RecordSet, Result, Role, EARTH_RADIUS_KM,
};

// Re-export schema mapping
pub use geoprox_schema::{infer_mapping, infer_mapping_with, AxisRule, CanonicalField, FieldMapping};

// Re-export matching and aggregation
pub use geoprox_proximity::{
    analyze, find_matches, summarize, Analysis, MatchConfig, MatchOutcome, MatchRow,
    ProgressSink, ProgressUpdate, ProximityMatcher, SummaryStatistics,
};

// Re-export storage
pub use geoprox_storage::{
    is_supported_file, load_records, spawn_analysis, write_json, write_rows_csv,
    write_summary_csv, AnalysisStore, SessionId, SessionSnapshot, SessionStatus,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        analyze, load_records, summarize, AnalysisStore, Error, FieldMapping, GeoPoint,
        MatchConfig, MatchRow, ProgressSink, ProgressUpdate, ProximityMatcher, RecordSet, Result,
        Role, SessionStatus, SummaryStatistics,
    };
}
