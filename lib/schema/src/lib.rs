//! # geoprox Schema
//!
//! Heuristic column mapping for facility spreadsheets whose headers are not
//! schema-controlled.
//!
//! ## Overview
//!
//! Given a [`RecordSet`](geoprox_core::RecordSet) and a
//! [`Role`](geoprox_core::Role), [`infer_mapping`] produces a
//! [`FieldMapping`] from canonical fields to actual column names:
//!
//! 1. Descriptive columns (name, identifier, district, ...) are found through
//!    a declarative alias table, first matching column wins
//! 2. Coordinate columns are found through the role's [`AxisRule`], which
//!    captures the two incompatible X/Y conventions seen upstream
//! 3. A mapping without latitude or longitude is a fatal `Error::Mapping`
//!
//! ```rust
//! use geoprox_core::{RecordSet, Role};
//! use geoprox_schema::{infer_mapping, CanonicalField};
//!
//! let records = RecordSet::new(
//!     vec!["X-Cord".into(), "Y-Cord".into(), "School Name".into()],
//!     vec![],
//! );
//! let mapping = infer_mapping(&records, Role::Government).unwrap();
//! assert_eq!(mapping.get(CanonicalField::Latitude), Some("X-Cord"));
//! ```

pub mod alias;
pub mod axis;
pub mod infer;
pub mod schema;

pub use alias::{aliases_for, resolve_alias, AliasPattern};
pub use axis::{AxisColumns, AxisRule};
pub use infer::{default_axis_rule, infer_mapping, infer_mapping_with};
pub use schema::{CanonicalField, FieldMapping};
