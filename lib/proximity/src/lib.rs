//! # geoprox Proximity
//!
//! Radius join between a government facility set and a candidate facility
//! set, with summary statistics over the result.
//!
//! ## Features
//!
//! - **Batch haversine**: one pass over a precomputed candidate column per government record
//! - **Axis correction**: candidates from configured sources have latitude and longitude swapped once
//! - **Progress reporting**: an optional [`ProgressSink`] sees every N records and the completion
//! - **Summary**: overall and per-source histograms and means
//!
//! ## Example
//!
//! ```rust
//! use geoprox_core::RecordSet;
//! use geoprox_proximity::{analyze, MatchConfig};
//! use serde_json::json;
//!
//! let government = RecordSet::new(
//!     vec!["BemisCode".into(), "X-Cord".into(), "Y-Cord".into()],
//!     vec![vec![json!("G1"), json!(30.0), json!(70.0)]],
//! );
//! let candidates = RecordSet::new(
//!     vec!["School Name".into(), "_xCord".into(), "_yCord".into()],
//!     vec![vec![json!("Nearby"), json!(70.0), json!(30.01)]],
//! );
//!
//! let analysis = analyze(&government, &candidates, &MatchConfig::default(), None).unwrap();
//! assert_eq!(analysis.outcome.rows.len(), 1);
//! assert_eq!(analysis.summary.distance_ranges.within_2km, 1);
//! ```

pub mod columns;
pub mod config;
pub mod matcher;
pub mod pipeline;
pub mod progress;
pub mod row;
pub mod summary;

pub use columns::ResolvedColumns;
pub use config::{MatchConfig, DEFAULT_PROGRESS_INTERVAL, DEFAULT_RADIUS_KM};
pub use matcher::{find_matches, MatchOutcome, ProximityMatcher};
pub use pipeline::{analyze, Analysis};
pub use progress::{ProgressSink, ProgressUpdate};
pub use row::{CandidateInfo, GovernmentInfo, GovernmentKey, MatchRow};
pub use summary::{summarize, DistanceRanges, SourceSummary, SummaryStatistics, UNKNOWN_SOURCE};
