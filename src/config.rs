//! Configuration parameters for the swap route optimizer.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Configuration settings for the multi-start swap local search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Number of shuffle + local search restarts
    pub starts: usize,
    /// Maximum number of full swap sweeps per restart
    pub iterations: usize,
    /// Stop a restart after this many consecutive sweeps without improvement
    pub early_stopping: usize,
    /// Improvements smaller than this are treated as no improvement
    pub tolerance: f64,
    /// Number of shuffle passes applied before each restart
    pub shuffle_repetitions: usize,
    /// Seed for the random source, drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            starts: 3,
            iterations: 20,
            early_stopping: 2,
            tolerance: 1.0,
            shuffle_repetitions: 2,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        OptimizerConfig::default()
    }

    /// Set the number of restarts.
    pub fn with_starts(mut self, starts: usize) -> Self {
        self.starts = starts;
        self
    }

    /// Set the sweep budget per restart.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the early stopping patience.
    pub fn with_early_stopping(mut self, rounds: usize) -> Self {
        self.early_stopping = rounds;
        self
    }

    /// Set the improvement tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the number of shuffle passes per restart.
    pub fn with_shuffle_repetitions(mut self, repetitions: usize) -> Self {
        self.shuffle_repetitions = repetitions;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random source described by this configuration.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
