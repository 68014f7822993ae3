// src/runner.rs
//
// Episode runner: drives one environment with a policy from reset to
// termination, feeding an event sink along the way and returning a
// serializable summary record.

use serde::{Deserialize, Serialize};

use crate::env::{Env, EnvError};
use crate::logging::EventSink;
use crate::policy::Policy;
use crate::termination::DoneReason;

/// Summary of a completed episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode ID.
    pub episode_id: u64,
    /// Seed used.
    pub seed: u64,
    /// Variant name.
    pub variant: String,
    /// Policy that drove the episode.
    pub policy: String,
    /// Total steps executed.
    pub total_steps: u64,
    /// Sum of step rewards.
    pub total_reward: f64,
    /// Why the episode ended.
    pub done_reason: DoneReason,
    /// Final post-clip state vector.
    pub final_state: Vec<f64>,
}

/// Run one episode to termination.
///
/// Resets the environment (with the given seed, or one drawn from the
/// environment's master RNG), then repeatedly asks the policy for an action
/// and logs each step to the sink.
pub fn run_episode(
    env: &mut Env,
    policy: &mut dyn Policy,
    sink: &mut dyn EventSink,
    episode_id: u64,
    seed: Option<u64>,
) -> Result<EpisodeSummary, EnvError> {
    let mut observation = env.reset(seed);
    let action_count = env.action_count();
    let mut total_reward = 0.0;

    loop {
        let action = policy.select_action(&observation, action_count);
        let result = env.step(action)?;
        let action_name = env
            .config()
            .actions
            .get(action as usize)
            .map(|rule| rule.name)
            .unwrap_or("unknown");

        sink.log_step(
            episode_id,
            action,
            action_name,
            result.reward,
            result.done,
            &result.observation,
        );

        total_reward += result.reward;
        observation = result.observation;

        if result.done {
            break;
        }
    }

    Ok(EpisodeSummary {
        episode_id,
        seed: env.seed(),
        variant: env.variant().as_str().to_string(),
        policy: policy.name().to_string(),
        total_steps: env.step_count(),
        total_reward,
        // the loop only exits on a done step, so a reason is always present
        done_reason: env.done_reason().unwrap_or(DoneReason::Horizon),
        final_state: observation.values,
    })
}
