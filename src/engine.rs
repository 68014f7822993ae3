// src/engine.rs
//
// Transition engine: one discrete time step in a fixed order.
//
//   1) unconditional perturbation of volatile fields
//   2) action effect, with guards read from the pre-perturbation snapshot
//   3) passive/background dynamics on the working state
//   4) field-wise clipping against declared bounds
//
// The order is load-bearing: guards see "before" values, passive drift sees
// the post-action state, and clipping is always last.

use rand::Rng;

use crate::config::EpisodeConfig;
use crate::effects::{apply_effects, Guard};
use crate::state::EpisodeState;

/// Background dynamics applied after the action effect, before clipping.
#[derive(Debug, Clone, Copy)]
pub enum PassiveRule {
    /// `state[field] = step_count / max_steps` (derived clock field).
    TimeFraction { field: usize },
    /// `state[field] += delta` while `guard` holds on the working state.
    DriftIf {
        guard: Guard,
        field: usize,
        delta: f64,
    },
}

/// Advance one step. The action code must already be validated.
///
/// Increments the episode's step counter and returns the base reward of the
/// action branch that fired (pre-state semantics); the caller layers the
/// post-clip shaping bonus on top.
pub fn advance(config: &EpisodeConfig, episode: &mut EpisodeState, action: usize) -> f64 {
    let pre = episode.state.clone();

    // 1) stochastic perturbation, one independent draw per volatile field
    for noise in config.step_noise {
        let draw = episode.rng.gen_range(noise.low..noise.high);
        episode.state.add(noise.field, draw);
    }

    // 2) action effect; threshold checks read the pre-step snapshot
    let rule = &config.actions[action];
    let base_reward = if rule.guard.eval(&pre) {
        apply_effects(rule.on_pass, &mut episode.state, &mut episode.rng);
        rule.reward_pass
    } else {
        apply_effects(rule.on_fail, &mut episode.state, &mut episode.rng);
        rule.reward_fail
    };

    // 3) passive dynamics
    episode.step_count += 1;
    for passive in config.passive {
        match *passive {
            PassiveRule::TimeFraction { field } => {
                let fraction = episode.step_count as f64 / config.max_steps as f64;
                episode.state.set(field, fraction);
            }
            PassiveRule::DriftIf {
                guard,
                field,
                delta,
            } => {
                if guard.eval(&episode.state) {
                    episode.state.add(field, delta);
                }
            }
        }
    }

    // 4) clip every field to its declared bound
    episode.state.clip(config.fields);

    base_reward
}
