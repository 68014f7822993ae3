//! Vigilsim core library.
//!
//! Discrete-time decision-process simulators behind a Gym-style
//! agent/environment interface. Two variant configurations of one generic
//! simulation core:
//!
//! - **Evacuation**: flood evacuation dispatch (4 normalized fields,
//!   8 actions, 50-step horizon, early success when the safe zones fill).
//! - **Hypertension**: remote hypertension monitoring (8 vitals fields,
//!   7 actions, fixed 100-step horizon).
//!
//! # Architecture
//!
//! The core is five cooperating components, leaf-first:
//!
//! - **StateVector / EpisodeState** (`state`): bounded numeric state plus
//!   per-episode step counter and seeded RNG stream.
//! - **Action effect model** (`effects`): each variant's per-action behavior
//!   as a table of guard/effect/reward rows, data rather than control flow.
//! - **Transition engine** (`engine`): one step in fixed order —
//!   perturbation, action effect (guards on the pre-step snapshot), passive
//!   dynamics, clipping.
//! - **Reward shaper** (`reward`): base action reward plus first-matching
//!   post-clip shaping band.
//! - **Termination policy** (`termination`): horizon plus optional goal.
//! - **Environment facade** (`env`): `Env` with `reset(seed)` /
//!   `step(action)` / `render()`, and `VecEnv` for batched rollouts.
//!
//! All transitions are deterministic given the reset seed. One `Env` owns
//! one episode; instantiate one per concurrent episode.

pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod logging;
pub mod policy;
pub mod render;
pub mod reward;
pub mod runner;
pub mod state;
pub mod termination;

// --- Re-exports for ergonomic external use ---------------------------------

pub use config::{evac, htn, EpisodeConfig, FieldNoise, FieldSpec, Variant};
pub use effects::{ActionRule, Guard, StateEffect};
pub use engine::PassiveRule;
pub use env::{Env, EnvError, Info, Observation, StepResult, VecEnv};
pub use logging::{EventSink, FileSink, NoopSink};
pub use policy::{ConstantPolicy, Policy, RandomPolicy};
pub use render::render_text;
pub use reward::ShapingBand;
pub use runner::{run_episode, EpisodeSummary};
pub use state::{EpisodeState, StateVector};
pub use termination::DoneReason;
