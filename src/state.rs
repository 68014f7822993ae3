// src/state.rs
//
// Bounded numeric state for a simulation episode.
// - StateVector: ordered fixed-length vector of fields, clipped against the
//   variant's declared [low, high] bounds as the final pass of every step.
// - EpisodeState: per-episode mutable state (vector + step counter + RNG),
//   owned exclusively by one Env and rebuilt on every reset.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{EpisodeConfig, FieldSpec};

/// Ordered, fixed-length numeric state.
///
/// Field meaning and bounds live in the variant's `EpisodeConfig`; the vector
/// itself only stores values. Consumers replace or read the whole vector;
/// per-field mutation is reserved for the transition engine. Intermediate
/// arithmetic may leave a field outside its bound, `clip` is always the last
/// operation of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    values: Vec<f64>,
}

impl StateVector {
    /// Build a vector from a literal assignment.
    pub fn new(initial: &[f64]) -> Self {
        Self {
            values: initial.to_vec(),
        }
    }

    /// Read a single field by index.
    pub fn get(&self, field: usize) -> f64 {
        self.values[field]
    }

    /// All field values in declaration order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn add(&mut self, field: usize, delta: f64) {
        self.values[field] += delta;
    }

    pub(crate) fn set(&mut self, field: usize, value: f64) {
        self.values[field] = value;
    }

    /// Force every field into its declared inclusive bound.
    pub fn clip(&mut self, fields: &[FieldSpec]) {
        for (value, spec) in self.values.iter_mut().zip(fields) {
            *value = value.clamp(spec.low, spec.high);
        }
    }

    /// True when every field lies within its declared bound.
    pub fn within_bounds(&self, fields: &[FieldSpec]) -> bool {
        self.values
            .iter()
            .zip(fields)
            .all(|(v, spec)| *v >= spec.low && *v <= spec.high)
    }
}

/// Mutable per-episode state.
///
/// Created on `reset`, mutated only by `step`, discarded on the next `reset`.
/// The RNG stream is seeded per episode so trajectories replay exactly.
#[derive(Debug, Clone)]
pub struct EpisodeState {
    /// Current state vector.
    pub state: StateVector,
    /// Steps taken since reset.
    pub step_count: u64,
    /// Per-episode random stream (perturbation + sampled action effects).
    pub rng: ChaCha8Rng,
}

impl EpisodeState {
    /// Initialize from the variant's literal initial assignment.
    pub fn new(config: &EpisodeConfig, seed: u64) -> Self {
        Self {
            state: StateVector::new(config.initial),
            step_count: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EpisodeConfig;

    #[test]
    fn clip_forces_fields_into_bounds() {
        let config = EpisodeConfig::evacuation();
        let mut state = StateVector::new(&[1.4, -0.2, 0.5, 2.0]);
        assert!(!state.within_bounds(config.fields));

        state.clip(config.fields);
        assert_eq!(state.values(), &[1.0, 0.0, 0.5, 1.0]);
        assert!(state.within_bounds(config.fields));
    }

    #[test]
    fn episode_state_starts_from_initial_literal() {
        let config = EpisodeConfig::hypertension();
        let episode = EpisodeState::new(&config, 7);
        assert_eq!(
            episode.state.values(),
            &[120.0, 80.0, 70.0, 5.0, 0.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(episode.step_count, 0);
    }

    #[test]
    fn same_seed_same_stream() {
        use rand::Rng;
        let config = EpisodeConfig::evacuation();
        let mut a = EpisodeState::new(&config, 42);
        let mut b = EpisodeState::new(&config, 42);
        let xa: f64 = a.rng.gen();
        let xb: f64 = b.rng.gen();
        assert_eq!(xa, xb);
    }
}
