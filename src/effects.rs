// src/effects.rs
//
// Action effect model.
//
// Each variant's per-action behavior is a table of ActionRule rows: a guard
// over the pre-step state, the effects and base reward of the guard-pass
// branch, and the effects and base reward of the guard-fail branch. New
// actions are added by inserting rows, not by editing the step function.
//
// Guards and effects are const-constructible data so the whole table can live
// in a static per-variant configuration.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::state::StateVector;

/// Predicate over a state snapshot.
///
/// Comparison variants are strict (`Gt`/`Lt`) or inclusive (`Ge`/`Within`)
/// to match the source effect tables exactly.
#[derive(Debug, Clone, Copy)]
pub enum Guard {
    Always,
    /// `state[field] > threshold`
    Gt { field: usize, threshold: f64 },
    /// `state[field] < threshold`
    Lt { field: usize, threshold: f64 },
    /// `state[field] >= threshold`
    Ge { field: usize, threshold: f64 },
    /// `low <= state[field] <= high`
    Within { field: usize, low: f64, high: f64 },
    All(&'static [Guard]),
    Any(&'static [Guard]),
}

impl Guard {
    pub fn eval(&self, state: &StateVector) -> bool {
        match *self {
            Guard::Always => true,
            Guard::Gt { field, threshold } => state.get(field) > threshold,
            Guard::Lt { field, threshold } => state.get(field) < threshold,
            Guard::Ge { field, threshold } => state.get(field) >= threshold,
            Guard::Within { field, low, high } => {
                let v = state.get(field);
                v >= low && v <= high
            }
            Guard::All(guards) => guards.iter().all(|g| g.eval(state)),
            Guard::Any(guards) => guards.iter().any(|g| g.eval(state)),
        }
    }
}

/// A single-field mutation.
///
/// Values are written unclipped; the transition engine clips the whole vector
/// once at the end of the step.
#[derive(Debug, Clone, Copy)]
pub enum StateEffect {
    /// Add a fixed delta.
    Add { field: usize, delta: f64 },
    /// Overwrite with a fixed value.
    Set { field: usize, value: f64 },
    /// Add an independent uniform draw from `[low, high)`.
    AddUniform { field: usize, low: f64, high: f64 },
}

/// Apply a list of effects to the working state, drawing any sampled
/// perturbations from the episode's RNG stream.
pub fn apply_effects(effects: &[StateEffect], state: &mut StateVector, rng: &mut ChaCha8Rng) {
    for effect in effects {
        match *effect {
            StateEffect::Add { field, delta } => state.add(field, delta),
            StateEffect::Set { field, value } => state.set(field, value),
            StateEffect::AddUniform { field, low, high } => {
                let draw = rng.gen_range(low..high);
                state.add(field, draw);
            }
        }
    }
}

/// One row of a variant's action table.
///
/// The guard is evaluated against the snapshot taken before this step's
/// perturbation; effects mutate the working (post-perturbation) state.
#[derive(Debug, Clone, Copy)]
pub struct ActionRule {
    /// Stable action name (used in logs and the demo CLI).
    pub name: &'static str,
    pub guard: Guard,
    pub on_pass: &'static [StateEffect],
    pub reward_pass: f64,
    pub on_fail: &'static [StateEffect],
    pub reward_fail: f64,
}

impl ActionRule {
    /// Row whose effects and base reward do not depend on any condition.
    pub const fn unconditional(
        name: &'static str,
        effects: &'static [StateEffect],
        reward: f64,
    ) -> Self {
        Self {
            name,
            guard: Guard::Always,
            on_pass: effects,
            reward_pass: reward,
            on_fail: &[],
            reward_fail: reward,
        }
    }
}
