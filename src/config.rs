//! Index configuration.
//!
//! The outer bounds and leaf capacity are fixed for the lifetime of a tree.
//! The remaining knobs tune the depth guard and the k-nearest probe; their
//! defaults reproduce the classic expanding-radius behaviour.
use crate::compute::validation::{validate_bounds, validate_capacity};
use crate::error::{IndexError, Result};
use crate::index::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use quadex_types::Bounds;

/// Quadtree configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// The universe of accepted points.
    pub bounds: Bounds,

    /// Points a leaf holds before it subdivides.
    #[serde(default = "IndexConfig::default_capacity")]
    pub capacity: usize,

    /// Depth at which leaves stop subdividing and absorb overflow.
    #[serde(default = "IndexConfig::default_max_depth")]
    pub max_depth: usize,

    /// Half-extent of the first k-nearest probe square.
    #[serde(default = "IndexConfig::default_initial_search_radius")]
    pub initial_search_radius: f64,

    /// The probe stops growing once it holds more than `k * candidate_multiplier`
    /// candidates (subject to `max_candidates`).
    #[serde(default = "IndexConfig::default_candidate_multiplier")]
    pub candidate_multiplier: usize,

    #[serde(default = "IndexConfig::default_max_candidates")]
    pub max_candidates: usize,
}

impl IndexConfig {
    pub const DEFAULT_CAPACITY: usize = 16;

    const fn default_capacity() -> usize {
        Self::DEFAULT_CAPACITY
    }

    const fn default_max_depth() -> usize {
        DEFAULT_MAX_DEPTH
    }

    const fn default_initial_search_radius() -> f64 {
        10.0
    }

    const fn default_candidate_multiplier() -> usize {
        10
    }

    const fn default_max_candidates() -> usize {
        100_000
    }

    pub fn new(bounds: Bounds, capacity: usize) -> Self {
        Self {
            bounds,
            capacity,
            max_depth: Self::default_max_depth(),
            initial_search_radius: Self::default_initial_search_radius(),
            candidate_multiplier: Self::default_candidate_multiplier(),
            max_candidates: Self::default_max_candidates(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        self.capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        assert!(
            max_depth <= MAX_DEPTH_LIMIT,
            "Max depth must not exceed {}",
            MAX_DEPTH_LIMIT
        );
        self.max_depth = max_depth;
        self
    }

    pub fn with_initial_search_radius(mut self, radius: f64) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "Initial search radius must be positive and finite"
        );
        self.initial_search_radius = radius;
        self
    }

    pub fn with_candidate_multiplier(mut self, multiplier: usize) -> Self {
        assert!(multiplier > 0, "Candidate multiplier must be greater than zero");
        self.candidate_multiplier = multiplier;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        assert!(max_candidates > 0, "Max candidates must be greater than zero");
        self.max_candidates = max_candidates;
        self
    }

    /// Candidate count beyond which the k-nearest probe stops expanding.
    pub fn candidate_cap(&self, k: usize) -> usize {
        k.saturating_mul(self.candidate_multiplier)
            .min(self.max_candidates)
    }

    pub fn validate(&self) -> Result<()> {
        validate_bounds(&self.bounds)?;
        validate_capacity(self.capacity)?;

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(IndexError::InvalidConfig(format!(
                "Max depth must not exceed {}, got: {}",
                MAX_DEPTH_LIMIT, self.max_depth
            )));
        }

        if !self.initial_search_radius.is_finite() || self.initial_search_radius <= 0.0 {
            return Err(IndexError::InvalidConfig(format!(
                "Initial search radius must be positive and finite, got: {}",
                self.initial_search_radius
            )));
        }

        if self.candidate_multiplier == 0 {
            return Err(IndexError::InvalidConfig(
                "Candidate multiplier must be greater than zero".to_string(),
            ));
        }

        if self.max_candidates == 0 {
            return Err(IndexError::InvalidConfig(
                "Max candidates must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: IndexConfig =
            toml::from_str(toml_str).map_err(|e| IndexError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| IndexError::Toml(e.to_string()))
    }
}
