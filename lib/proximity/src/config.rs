use geoprox_core::{Error, Result};
use geoprox_schema::AxisRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Default number of government records between progress reports
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Inclusive search radius around each government record
    pub radius_km: f64,
    /// Candidate `source` values whose latitude/longitude columns are
    /// populated in reverse
    pub swap_sources: BTreeSet<String>,
    pub progress_interval: usize,
    pub government_axes: AxisRule,
    pub candidate_axes: AxisRule,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            swap_sources: BTreeSet::new(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            government_axes: AxisRule::Inverted,
            candidate_axes: AxisRule::Standard,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    #[must_use]
    pub fn with_swap_source(mut self, source: impl Into<String>) -> Self {
        self.swap_sources.insert(source.into());
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Parse from JSON; absent keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "radius_km must be a positive finite number, got {}",
                self.radius_km
            )));
        }
        if self.progress_interval == 0 {
            return Err(Error::InvalidConfig(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a candidate with this `source` value needs its axes swapped.
    /// Whitespace is ignored and ASCII case does not matter.
    pub fn needs_swap(&self, source: &str) -> bool {
        let source = source.trim();
        !source.is_empty()
            && self
                .swap_sources
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.radius_km, 5.0);
        assert!(config.swap_sources.is_empty());
        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.government_axes, AxisRule::Inverted);
        assert_eq!(config.candidate_axes, AxisRule::Standard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_radius() {
        assert!(MatchConfig::default().with_radius(0.0).validate().is_err());
        assert!(MatchConfig::default().with_radius(-1.0).validate().is_err());
        assert!(MatchConfig::default().with_radius(f64::NAN).validate().is_err());
        assert!(MatchConfig::default().with_progress_interval(0).validate().is_err());
    }

    #[test]
    fn test_needs_swap() {
        let config = MatchConfig::default()
            .with_swap_source("BEAC")
            .with_swap_source(" NCHD ");
        assert!(config.needs_swap("BEAC"));
        assert!(config.needs_swap("beac "));
        assert!(config.needs_swap("nchd"));
        assert!(!config.needs_swap("BEF"));
        assert!(!config.needs_swap(""));
    }

    #[test]
    fn test_from_json_partial() {
        let config = MatchConfig::from_json_str(
            r#"{"radius_km": 2.5, "swap_sources": ["BEAC"], "government_axes": "standard"}"#,
        )
        .unwrap();
        assert_eq!(config.radius_km, 2.5);
        assert!(config.needs_swap("BEAC"));
        assert_eq!(config.government_axes, AxisRule::Standard);
        assert_eq!(config.progress_interval, 10);
    }

    #[test]
    fn test_from_json_rejects_bad_radius() {
        assert!(matches!(
            MatchConfig::from_json_str(r#"{"radius_km": -3}"#),
            Err(Error::InvalidConfig(_))
        ));
    }
}
