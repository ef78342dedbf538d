//! Fast local search configuration.

use crate::random::DEFAULT_SEED;

/// Neighbourhoods enabled in a fast local search run.
///
/// # Examples
///
/// ```
/// use steiner_grasp::local_search::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default().with_key_vertex_elimination(false);
/// assert!(config.key_path_exchange);
/// assert!(!config.key_vertex_elimination);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Steiner vertex insertion by edge swaps along tree paths.
    pub vertex_insertion: bool,
    /// Steiner vertex elimination by re-spanning the remaining vertices.
    pub vertex_elimination: bool,
    /// Replacement of key paths by cheaper reconnections.
    pub key_path_exchange: bool,
    /// Removal of branching Steiner vertices by re-approximation.
    pub key_vertex_elimination: bool,
    /// Random seed.
    pub seed: u64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            vertex_insertion: true,
            vertex_elimination: true,
            key_path_exchange: true,
            key_vertex_elimination: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl LocalSearchConfig {
    /// Every neighbourhood.
    pub fn all() -> Self {
        Self::default()
    }

    fn none() -> Self {
        Self {
            vertex_insertion: false,
            vertex_elimination: false,
            key_path_exchange: false,
            key_vertex_elimination: false,
            seed: DEFAULT_SEED,
        }
    }

    pub fn vertex_insertion_only() -> Self {
        Self::none().with_vertex_insertion(true)
    }

    pub fn vertex_elimination_only() -> Self {
        Self::none().with_vertex_elimination(true)
    }

    pub fn key_path_exchange_only() -> Self {
        Self::none().with_key_path_exchange(true)
    }

    pub fn key_vertex_elimination_only() -> Self {
        Self::none().with_key_vertex_elimination(true)
    }

    /// Only the vertex neighbourhoods.
    pub fn vertex_moves() -> Self {
        Self {
            key_path_exchange: false,
            key_vertex_elimination: false,
            ..Self::default()
        }
    }

    /// Only the key-path and key-vertex neighbourhoods.
    pub fn key_moves() -> Self {
        Self {
            vertex_insertion: false,
            vertex_elimination: false,
            ..Self::default()
        }
    }

    pub fn with_vertex_insertion(mut self, enabled: bool) -> Self {
        self.vertex_insertion = enabled;
        self
    }

    pub fn with_vertex_elimination(mut self, enabled: bool) -> Self {
        self.vertex_elimination = enabled;
        self
    }

    pub fn with_key_path_exchange(mut self, enabled: bool) -> Self {
        self.key_path_exchange = enabled;
        self
    }

    pub fn with_key_vertex_elimination(mut self, enabled: bool) -> Self {
        self.key_vertex_elimination = enabled;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Whether at least one neighbourhood is enabled.
    pub fn any_enabled(&self) -> bool {
        self.vertex_insertion
            || self.vertex_elimination
            || self.key_path_exchange
            || self.key_vertex_elimination
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.any_enabled() {
            return Err("at least one neighbourhood must be enabled".into());
        }
        Ok(())
    }
}
