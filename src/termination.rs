// src/termination.rs
//
// Termination policy: decides episode end from the post-clip state and the
// updated step counter. Horizon termination applies to every variant; a
// variant may additionally declare a goal predicate for early success.

use serde::{Deserialize, Serialize};

use crate::config::EpisodeConfig;
use crate::state::StateVector;

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoneReason {
    /// The step counter reached the variant's horizon.
    Horizon,
    /// The variant's goal predicate held on the post-clip state.
    GoalReached,
}

/// Evaluate termination after a step's state update.
///
/// The goal is checked first so that reaching it on the final step is
/// reported as a success, not a timeout.
pub fn episode_done(
    config: &EpisodeConfig,
    state: &StateVector,
    step_count: u64,
) -> Option<DoneReason> {
    if let Some(goal) = config.goal {
        if goal.eval(state) {
            return Some(DoneReason::GoalReached);
        }
    }
    if step_count >= config.max_steps {
        return Some(DoneReason::Horizon);
    }
    None
}
