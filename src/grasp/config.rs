//! GRASP configuration.

use crate::construction::Construction;
use crate::random::DEFAULT_SEED;
use crate::relinking::RelinkingStrategy;

use super::perturbation::Perturbation;

/// Configuration parameters for the hybrid GRASP.
///
/// # Examples
///
/// ```
/// use steiner_grasp::grasp::GraspConfig;
/// use steiner_grasp::relinking::RelinkingStrategy;
///
/// let config = GraspConfig::default()
///     .with_iterations(20)
///     .with_relinking(RelinkingStrategy::ComplementaryMoves);
/// assert_eq!(config.iterations, 20);
/// assert_eq!(config.elite_size, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Number of construct-and-improve iterations.
    pub iterations: usize,
    /// Capacity of the elite archive.
    pub elite_size: usize,
    /// Random seed.
    pub seed: u64,
    /// Path relinking strategy applied after the iterations.
    pub relinking: RelinkingStrategy,
    /// Construction heuristics. The first `constructions.len()` iterations
    /// use each one in order on the true weights.
    pub constructions: Vec<Construction>,
    /// Perturbation regimes, rotated by iteration index.
    pub perturbations: Vec<Perturbation>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            elite_size: 5,
            seed: DEFAULT_SEED,
            relinking: RelinkingStrategy::Hybrid,
            constructions: Construction::ALL.to_vec(),
            perturbations: Perturbation::ALL.to_vec(),
        }
    }
}

impl GraspConfig {
    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the elite archive capacity.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the path relinking strategy.
    pub fn with_relinking(mut self, strategy: RelinkingStrategy) -> Self {
        self.relinking = strategy;
        self
    }

    /// Sets the construction heuristics.
    pub fn with_constructions(mut self, constructions: Vec<Construction>) -> Self {
        self.constructions = constructions;
        self
    }

    /// Sets the perturbation regimes.
    pub fn with_perturbations(mut self, perturbations: Vec<Perturbation>) -> Self {
        self.perturbations = perturbations;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.elite_size == 0 {
            return Err("elite_size must be at least 1".into());
        }
        if self.constructions.is_empty() {
            return Err("at least one construction heuristic is required".into());
        }
        if self.perturbations.is_empty() {
            return Err("at least one perturbation regime is required".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grasp_config_defaults() {
        let config = GraspConfig::default();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.elite_size, 5);
        assert_eq!(config.seed, 1024 * 1024 - 1);
        assert_eq!(config.relinking, RelinkingStrategy::Hybrid);
        assert_eq!(config.constructions.len(), 4);
        assert_eq!(config.perturbations.len(), 3);
    }

    #[test]
    fn test_grasp_config_validation() {
        assert!(GraspConfig::default().with_elite_size(0).validate().is_err());
        assert!(GraspConfig::default().with_constructions(vec![]).validate().is_err());
        assert!(GraspConfig::default().with_perturbations(vec![]).validate().is_err());
        assert!(GraspConfig::default().with_iterations(0).validate().is_ok());
    }
}
