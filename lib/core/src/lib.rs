//! # geoprox Core
//!
//! Core library for geoprox.
//!
//! This crate provides the building blocks shared by the schema mapper and
//! the proximity matcher:
//!
//! - [`GeoPoint`] - A validated latitude/longitude pair
//! - [`haversine_km`] / [`haversine_batch`] - Great-circle distance, scalar and batch
//! - [`PointColumns`] - Precomputed point set for repeated batch queries
//! - [`RecordSet`] - Raw tabular input with trimmed column names
//! - [`Error`] / [`RecordParseError`] - Fatal and per-record error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use geoprox_core::{GeoPoint, haversine_km, haversine_batch};
//!
//! let quetta = GeoPoint::new(30.1798, 66.9750).unwrap();
//! let nearby = GeoPoint::new(30.1900, 66.9800).unwrap();
//!
//! let d = haversine_km(&quetta, &nearby);
//! let batch = haversine_batch(&quetta, &[nearby]);
//! assert_eq!(batch[0], d);
//! ```

pub mod error;
pub mod geo;
pub mod point;
pub mod record;

pub use error::{Error, RecordParseError, Result, Role};
pub use geo::{haversine_batch, haversine_km, round_to, PointColumns, EARTH_RADIUS_KM};
pub use point::{parse_coordinate, GeoPoint};
pub use record::{cell_text, clean_cell, RecordSet};
