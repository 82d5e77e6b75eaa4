//! Index builder for flexible configuration
//!
//! Collects bounds, capacity and probe settings before constructing a
//! [`QuadTree`], validating everything in one place.

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::QuadTree;
use quadex_types::Bounds;

/// Builder for quadtree configuration.
#[derive(Debug, Default)]
pub struct QuadTreeBuilder {
    config: Option<IndexConfig>,
    bounds: Option<Bounds>,
    capacity: Option<usize>,
    max_depth: Option<usize>,
}

impl QuadTreeBuilder {
    /// Create a new builder. Bounds must be supplied before building.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the universe of accepted points.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the points-per-leaf capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the depth at which leaves stop subdividing.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Start from a full configuration. Explicit `bounds`, `capacity` and
    /// `max_depth` calls still override it.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the index.
    pub fn build<T>(self) -> Result<QuadTree<T>> {
        QuadTree::with_config(self.into_config()?)
    }

    fn into_config(self) -> Result<IndexConfig> {
        let mut config = match (self.config, self.bounds) {
            (Some(config), _) => config,
            (None, Some(bounds)) => IndexConfig::new(bounds, IndexConfig::DEFAULT_CAPACITY),
            (None, None) => {
                return Err(IndexError::InvalidConfig(
                    "Index bounds must be set before building".to_string(),
                ));
            }
        };

        if let Some(bounds) = self.bounds {
            config.bounds = bounds;
        }
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }

        Ok(config)
    }
}
