// src/env.rs
//
// Gym-style environment facade.
//
// - Env: single environment with reset(seed) and step(action)
// - VecEnv: N independent environments for batched rollouts
//
// All transitions are deterministic given the reset seed. Each Env owns its
// episode state exclusively; callers wanting concurrent episodes instantiate
// one Env per episode.

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{EpisodeConfig, Variant};
use crate::engine;
use crate::render;
use crate::reward;
use crate::state::{EpisodeState, StateVector};
use crate::termination::{self, DoneReason};

/// Snapshot of the state vector after a reset or step.
///
/// Owned by value: no aliasing with the facade's internal state, so a render
/// collaborator can hold it across later steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Field values in declaration order.
    pub values: Vec<f64>,
    /// Steps taken since reset (0 for the reset observation).
    pub step: u64,
}

impl Observation {
    fn from_episode(episode: &EpisodeState) -> Self {
        Self {
            values: episode.state.values().to_vec(),
            step: episode.step_count,
        }
    }

    /// Read a single field by index.
    pub fn get(&self, field: usize) -> f64 {
        self.values[field]
    }
}

/// Auxiliary per-step information. Empty in this core; reserved extension
/// point for external diagnostics.
pub type Info = BTreeMap<String, serde_json::Value>;

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// The observation after taking the action.
    pub observation: Observation,
    /// The reward for this step.
    pub reward: f64,
    /// Whether the episode has terminated.
    pub done: bool,
    /// Additional information about the step.
    pub info: Info,
}

/// Contract violations at the facade boundary.
///
/// Both are synchronous usage errors: the caller corrects the call and
/// retries. A failed step observes no state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// Action code outside the declared discrete range.
    InvalidAction { action: i64, action_count: usize },
    /// `step` called before any `reset`.
    NotReset,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::InvalidAction {
                action,
                action_count,
            } => {
                write!(
                    f,
                    "invalid action {} (valid range 0..{})",
                    action, action_count
                )
            }
            EnvError::NotReset => write!(f, "step called before reset"),
        }
    }
}

impl std::error::Error for EnvError {}

/// Single Gym-style environment.
///
/// Composes the transition engine, reward shaper, and termination policy of
/// one variant configuration and owns the episode lifecycle:
/// `reset(seed) -> observation`, `step(action) -> (obs, reward, done, info)`.
pub struct Env {
    /// Variant constants (tables, bounds, horizon).
    config: EpisodeConfig,
    /// Current episode; None until the first reset.
    episode: Option<EpisodeState>,
    /// Master RNG used to derive a seed when the caller passes None.
    rng: ChaCha8Rng,
    /// Seed of the current episode.
    seed: u64,
    /// Whether the current episode has terminated.
    done: bool,
    /// Why the current episode terminated, once it has.
    done_reason: Option<DoneReason>,
}

impl Env {
    /// Create an environment for the given variant configuration.
    pub fn new(config: EpisodeConfig) -> Self {
        Self {
            config,
            episode: None,
            rng: ChaCha8Rng::seed_from_u64(0),
            seed: 0,
            done: false,
            done_reason: None,
        }
    }

    pub fn evacuation() -> Self {
        Self::new(EpisodeConfig::evacuation())
    }

    pub fn hypertension() -> Self {
        Self::new(EpisodeConfig::hypertension())
    }

    pub fn for_variant(variant: Variant) -> Self {
        Self::new(EpisodeConfig::for_variant(variant))
    }

    /// Reset the environment with an optional seed.
    ///
    /// Reinitializes the episode to the variant's literal initial vector,
    /// zeroes the step counter, and returns the initial observation.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        let seed = seed.unwrap_or_else(|| self.rng.gen());
        self.seed = seed;
        self.done = false;
        self.done_reason = None;

        let episode = EpisodeState::new(&self.config, seed);
        let observation = Observation::from_episode(&episode);
        self.episode = Some(episode);
        observation
    }

    /// Take a step in the environment.
    ///
    /// Fails with `InvalidAction` for a code outside `[0, action_count)` and
    /// with `NotReset` when no episode has been started; on error no state
    /// changes. Stepping a finished episode returns the terminal observation
    /// with reward 0.
    pub fn step(&mut self, action: i64) -> Result<StepResult, EnvError> {
        let action_count = self.config.action_count();
        let episode = self.episode.as_mut().ok_or(EnvError::NotReset)?;

        if action < 0 || action as usize >= action_count {
            return Err(EnvError::InvalidAction {
                action,
                action_count,
            });
        }

        if self.done {
            return Ok(StepResult {
                observation: Observation::from_episode(episode),
                reward: 0.0,
                done: true,
                info: Info::new(),
            });
        }

        // Transition -> reward -> termination, all on this episode's stream.
        let base = engine::advance(&self.config, episode, action as usize);
        let reward = reward::shaped_reward(base, self.config.shaping, &episode.state);
        let reason = termination::episode_done(&self.config, &episode.state, episode.step_count);

        self.done = reason.is_some();
        self.done_reason = reason;

        Ok(StepResult {
            observation: Observation::from_episode(episode),
            reward,
            done: self.done,
            info: Info::new(),
        })
    }

    /// Render the current state as text. Read-only; None before any reset.
    pub fn render(&self) -> Option<String> {
        self.episode
            .as_ref()
            .map(|episode| render::render_text(&self.config, &Observation::from_episode(episode)))
    }

    /// The variant configuration this environment runs.
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// Number of discrete actions.
    pub fn action_count(&self) -> usize {
        self.config.action_count()
    }

    /// Current state (None before any reset).
    pub fn state(&self) -> Option<&StateVector> {
        self.episode.as_ref().map(|e| &e.state)
    }

    /// Steps taken in the current episode.
    pub fn step_count(&self) -> u64 {
        self.episode.as_ref().map(|e| e.step_count).unwrap_or(0)
    }

    /// Seed of the current episode.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the current episode has terminated.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Why the current episode terminated, once it has.
    pub fn done_reason(&self) -> Option<DoneReason> {
        self.done_reason
    }
}

/// Vectorised environment: N independent episodes of one variant.
pub struct VecEnv {
    envs: Vec<Env>,
}

impl VecEnv {
    /// Create a batch of n environments sharing one variant configuration.
    pub fn new(n: usize, config: EpisodeConfig) -> Self {
        let envs = (0..n).map(|_| Env::new(config)).collect();
        Self { envs }
    }

    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// Reset all environments with optional per-environment seeds.
    ///
    /// Environments without a provided seed draw one from their own master
    /// RNG.
    pub fn reset_all(&mut self, seeds: Option<&[u64]>) -> Vec<Observation> {
        self.envs
            .iter_mut()
            .enumerate()
            .map(|(i, env)| {
                let seed = seeds.and_then(|s| s.get(i).copied());
                env.reset(seed)
            })
            .collect()
    }

    /// Step all environments with the given actions.
    ///
    /// Actions must have the same length as envs.
    pub fn step(&mut self, actions: &[i64]) -> Result<Vec<StepResult>, EnvError> {
        assert_eq!(
            actions.len(),
            self.envs.len(),
            "Actions length must match number of environments"
        );
        self.envs
            .iter_mut()
            .zip(actions.iter())
            .map(|(env, action)| env.step(*action))
            .collect()
    }

    /// Check which environments are done.
    pub fn dones(&self) -> Vec<bool> {
        self.envs.iter().map(|e| e.is_done()).collect()
    }

    /// Get all current seeds.
    pub fn seeds(&self) -> Vec<u64> {
        self.envs.iter().map(|e| e.seed()).collect()
    }

    /// Access one environment (for rendering or inspection).
    pub fn env(&self, index: usize) -> Option<&Env> {
        self.envs.get(index)
    }
}
