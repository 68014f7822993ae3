// src/policy.rs
//
// Policy: the decision-making side of the agent/environment interface.
// The core only needs something that maps an observation to an action code;
// learned policies live outside this crate.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::env::Observation;

/// Maps an observation to a discrete action code.
pub trait Policy {
    /// Stable policy name (used in logs and summaries).
    fn name(&self) -> &str;

    /// Select an action code in `[0, action_count)`.
    fn select_action(&mut self, observation: &Observation, action_count: usize) -> i64;
}

/// Uniform random action selection with its own seeded stream, so demo runs
/// and tests replay exactly.
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, _observation: &Observation, action_count: usize) -> i64 {
        self.rng.gen_range(0..action_count) as i64
    }
}

/// Always plays the same action. Useful for horizon and baseline tests.
pub struct ConstantPolicy {
    action: i64,
}

impl ConstantPolicy {
    pub fn new(action: i64) -> Self {
        Self { action }
    }
}

impl Policy for ConstantPolicy {
    fn name(&self) -> &str {
        "constant"
    }

    fn select_action(&mut self, _observation: &Observation, _action_count: usize) -> i64 {
        self.action
    }
}
