//! # geoprox Storage
//!
//! Everything around the matching core that touches files or outlives a
//! single call:
//!
//! - [`loader`]: delimited text files into [`RecordSet`](geoprox_core::RecordSet)s
//! - [`export`]: JSON and CSV reports
//! - [`session`]: [`AnalysisStore`], a registry of analyses running on worker threads

pub mod export;
pub mod loader;
pub mod session;

pub use export::{write_json, write_rows_csv, write_summary_csv};
pub use loader::{is_supported_file, load_records, parse_delimited, SUPPORTED_EXTENSIONS};
pub use session::{
    run_session, spawn_analysis, AnalysisStore, SessionId, SessionProgress, SessionSnapshot,
    SessionStatus, DEFAULT_TAIL_LEN,
};
