// src/config.rs
//
// Central configuration for the simulation core.
// This is the single source of truth for each variant's constants: field
// bounds, initial assignment, episode horizon, per-step noise, the action
// effect table, passive dynamics, reward-shaping bands, and the optional
// early-termination goal.
//
// Both variants (flood evacuation dispatch, remote hypertension monitoring)
// are instances of the same generic shape; nothing outside this module
// branches on the variant.

use crate::effects::{ActionRule, Guard, StateEffect};
use crate::engine::PassiveRule;
use crate::reward::ShapingBand;

/// Declared bound and name of one state field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
}

/// Unconditional per-step uniform noise on one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldNoise {
    pub field: usize,
    pub low: f64,
    pub high: f64,
}

/// Simulation variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Evacuation,
    Hypertension,
}

impl Variant {
    /// Return a stable lowercase name for the variant (used in logs/CLI).
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Evacuation => "evacuation",
            Variant::Hypertension => "hypertension",
        }
    }

    /// Parse a variant name (case-insensitive). Returns None if unrecognized.
    pub fn parse(s: &str) -> Option<Variant> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evacuation" | "evac" | "e" => Some(Variant::Evacuation),
            "hypertension" | "htn" | "h" => Some(Variant::Hypertension),
            _ => None,
        }
    }
}

/// Immutable per-variant constants.
///
/// Built once by the `const fn` constructors below and held for the lifetime
/// of an `Env` instance. All tables are `'static` data.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeConfig {
    pub variant: Variant,
    /// Field names and bounds, in state-vector order.
    pub fields: &'static [FieldSpec],
    /// Literal initial assignment returned by every reset.
    pub initial: &'static [f64],
    /// Episode horizon in steps.
    pub max_steps: u64,
    /// Unconditional per-step perturbation of volatile fields.
    pub step_noise: &'static [FieldNoise],
    /// Action effect table; the action space is `0..actions.len()`.
    pub actions: &'static [ActionRule],
    /// Passive/background dynamics applied after the action effect.
    pub passive: &'static [PassiveRule],
    /// Post-clip reward-shaping bands, checked in order, first match wins.
    pub shaping: &'static [ShapingBand],
    /// Early-termination goal on the post-clip state, if the variant has one.
    pub goal: Option<Guard>,
}

impl EpisodeConfig {
    /// Number of discrete actions.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub const fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Evacuation => Self::evacuation(),
            Variant::Hypertension => Self::hypertension(),
        }
    }

    /// Flood evacuation dispatch: 4 normalized fields, 8 actions, horizon 50.
    pub const fn evacuation() -> Self {
        Self {
            variant: Variant::Evacuation,
            fields: EVAC_FIELDS,
            initial: EVAC_INITIAL,
            max_steps: 50,
            step_noise: &[],
            actions: EVAC_ACTIONS,
            passive: EVAC_PASSIVE,
            shaping: &[],
            goal: Some(Guard::Ge {
                field: evac::SAFE_ZONE_OCCUPANCY,
                threshold: 1.0,
            }),
        }
    }

    /// Remote hypertension monitoring: 8 vitals fields, 7 actions, horizon 100.
    pub const fn hypertension() -> Self {
        Self {
            variant: Variant::Hypertension,
            fields: HTN_FIELDS,
            initial: HTN_INITIAL,
            max_steps: 100,
            step_noise: HTN_NOISE,
            actions: HTN_ACTIONS,
            passive: &[],
            shaping: HTN_SHAPING,
            goal: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Evacuation variant
// ---------------------------------------------------------------------------

/// Field indices for the evacuation state vector.
pub mod evac {
    pub const GROUP_PROXIMITY: usize = 0;
    pub const WATER_LEVEL: usize = 1;
    pub const TIME_ELAPSED: usize = 2;
    pub const SAFE_ZONE_OCCUPANCY: usize = 3;
}

const EVAC_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "group_proximity",
        low: 0.0,
        high: 1.0,
    },
    FieldSpec {
        name: "water_level",
        low: 0.0,
        high: 1.0,
    },
    FieldSpec {
        name: "time_elapsed",
        low: 0.0,
        high: 1.0,
    },
    FieldSpec {
        name: "safe_zone_occupancy",
        low: 0.0,
        high: 1.0,
    },
];

// Groups near the flood, moderate water, clock at zero, safe zones empty.
const EVAC_INITIAL: &[f64] = &[0.8, 0.5, 0.0, 0.0];

const DIRECT_GUARD: Guard = Guard::Gt {
    field: evac::GROUP_PROXIMITY,
    threshold: 0.6,
};

const DIRECT_EFFECTS: &[StateEffect] = &[
    StateEffect::Add {
        field: evac::SAFE_ZONE_OCCUPANCY,
        delta: 0.3,
    },
    StateEffect::Add {
        field: evac::GROUP_PROXIMITY,
        delta: -0.3,
    },
];

/// Directing a group only succeeds while the group is still near the hazard.
const fn direct_to_zone(name: &'static str) -> ActionRule {
    ActionRule {
        name,
        guard: DIRECT_GUARD,
        on_pass: DIRECT_EFFECTS,
        reward_pass: 15.0,
        on_fail: &[],
        reward_fail: -10.0,
    }
}

const EVAC_ACTIONS: &[ActionRule] = &[
    // 0: observing may reveal a slightly different water level
    ActionRule::unconditional(
        "scan_environment",
        &[StateEffect::AddUniform {
            field: evac::WATER_LEVEL,
            low: -0.05,
            high: 0.05,
        }],
        0.0,
    ),
    // 1-3: direct group to safe zone A/B/C
    direct_to_zone("direct_to_zone_a"),
    direct_to_zone("direct_to_zone_b"),
    direct_to_zone("direct_to_zone_c"),
    // 4: rerouting only pays off when the hazard is rising fast
    ActionRule {
        name: "optimize_route",
        guard: Guard::Gt {
            field: evac::WATER_LEVEL,
            threshold: 0.7,
        },
        on_pass: &[],
        reward_pass: 5.0,
        on_fail: &[],
        reward_fail: -15.0,
    },
    // 5: extra support works best with high hazard and groups still at risk
    ActionRule {
        name: "rescue_alert",
        guard: Guard::All(&[
            Guard::Gt {
                field: evac::WATER_LEVEL,
                threshold: 0.6,
            },
            Guard::Gt {
                field: evac::GROUP_PROXIMITY,
                threshold: 0.5,
            },
        ]),
        on_pass: &[],
        reward_pass: 15.0,
        on_fail: &[],
        reward_fail: -10.0,
    },
    // 6: monitoring reads a noisier hazard estimate
    ActionRule::unconditional(
        "monitor_water",
        &[StateEffect::AddUniform {
            field: evac::WATER_LEVEL,
            low: -0.1,
            high: 0.1,
        }],
        0.0,
    ),
    // 7: opportunity cost of inaction
    ActionRule::unconditional("wait", &[], -5.0),
];

const EVAC_PASSIVE: &[PassiveRule] = &[
    // time_elapsed is derived from the step counter, never mutated directly
    PassiveRule::TimeFraction {
        field: evac::TIME_ELAPSED,
    },
    // hazard keeps rising while groups remain near danger
    PassiveRule::DriftIf {
        guard: Guard::Gt {
            field: evac::GROUP_PROXIMITY,
            threshold: 0.5,
        },
        field: evac::WATER_LEVEL,
        delta: 0.02,
    },
];

// ---------------------------------------------------------------------------
// Hypertension variant
// ---------------------------------------------------------------------------

/// Field indices for the hypertension state vector.
pub mod htn {
    pub const SBP: usize = 0;
    pub const DBP: usize = 1;
    pub const HR: usize = 2;
    pub const STRESS: usize = 3;
    pub const PHYS_ACT: usize = 4;
    pub const LAST_MED: usize = 5;
    pub const TIME_SINCE_DOSE: usize = 6;
    pub const SLEEP: usize = 7;
}

const HTN_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "sbp",
        low: 50.0,
        high: 200.0,
    },
    FieldSpec {
        name: "dbp",
        low: 30.0,
        high: 150.0,
    },
    FieldSpec {
        name: "hr",
        low: 40.0,
        high: 180.0,
    },
    FieldSpec {
        name: "stress",
        low: 0.0,
        high: 10.0,
    },
    FieldSpec {
        name: "phys_act",
        low: 0.0,
        high: 2.0,
    },
    FieldSpec {
        name: "last_med",
        low: 0.0,
        high: 3.0,
    },
    FieldSpec {
        name: "time_since_dose",
        low: 0.0,
        high: 120.0,
    },
    FieldSpec {
        name: "sleep",
        low: 0.0,
        high: 1.0,
    },
];

// Normotensive baseline, mid stress, resting, no medication on board.
const HTN_INITIAL: &[f64] = &[120.0, 80.0, 70.0, 5.0, 0.0, 0.0, 0.0, 1.0];

// Vitals drift every step regardless of the chosen action.
const HTN_NOISE: &[FieldNoise] = &[
    FieldNoise {
        field: htn::SBP,
        low: -3.0,
        high: 3.0,
    },
    FieldNoise {
        field: htn::DBP,
        low: -2.0,
        high: 2.0,
    },
    FieldNoise {
        field: htn::HR,
        low: -2.0,
        high: 2.0,
    },
    FieldNoise {
        field: htn::STRESS,
        low: -0.3,
        high: 0.3,
    },
];

const MED_LOW_EFFECTS: &[StateEffect] = &[
    StateEffect::Add {
        field: htn::SBP,
        delta: -3.0,
    },
    StateEffect::Add {
        field: htn::DBP,
        delta: -2.0,
    },
    StateEffect::Set {
        field: htn::LAST_MED,
        value: 1.0,
    },
    StateEffect::Set {
        field: htn::TIME_SINCE_DOSE,
        value: 0.0,
    },
];

const MED_MEDIUM_EFFECTS: &[StateEffect] = &[
    StateEffect::Add {
        field: htn::SBP,
        delta: -5.0,
    },
    StateEffect::Add {
        field: htn::DBP,
        delta: -3.0,
    },
    StateEffect::Set {
        field: htn::LAST_MED,
        value: 2.0,
    },
    StateEffect::Set {
        field: htn::TIME_SINCE_DOSE,
        value: 0.0,
    },
];

const MED_HIGH_EFFECTS: &[StateEffect] = &[
    StateEffect::Add {
        field: htn::SBP,
        delta: -8.0,
    },
    StateEffect::Add {
        field: htn::DBP,
        delta: -5.0,
    },
    StateEffect::Set {
        field: htn::LAST_MED,
        value: 3.0,
    },
    StateEffect::Set {
        field: htn::TIME_SINCE_DOSE,
        value: 0.0,
    },
];

/// An emergency call is only warranted in a crisis reading.
const EMERGENCY_GUARD: Guard = Guard::Any(&[
    Guard::Gt {
        field: htn::SBP,
        threshold: 160.0,
    },
    Guard::Gt {
        field: htn::DBP,
        threshold: 100.0,
    },
    Guard::Lt {
        field: htn::SBP,
        threshold: 80.0,
    },
    Guard::Lt {
        field: htn::DBP,
        threshold: 50.0,
    },
]);

const HTN_ACTIONS: &[ActionRule] = &[
    // 0: observe only
    ActionRule::unconditional("no_intervention", &[], 0.0),
    // 1-3: medication tiers; doses record themselves on the state
    ActionRule::unconditional("administer_med_low", MED_LOW_EFFECTS, 2.0),
    ActionRule::unconditional("administer_med_medium", MED_MEDIUM_EFFECTS, 4.0),
    ActionRule::unconditional("administer_med_high", MED_HIGH_EFFECTS, -2.0),
    // 4: relaxation guidance
    ActionRule::unconditional(
        "stress_reduction",
        &[StateEffect::Add {
            field: htn::STRESS,
            delta: -1.0,
        }],
        2.0,
    ),
    // 5: light exercise transiently raises pressure
    ActionRule::unconditional(
        "encourage_activity",
        &[
            StateEffect::Add {
                field: htn::SBP,
                delta: 2.0,
            },
            StateEffect::Add {
                field: htn::DBP,
                delta: 1.0,
            },
        ],
        1.0,
    ),
    // 6: emergency call; penalized when the reading does not warrant it
    ActionRule {
        name: "emergency_call",
        guard: EMERGENCY_GUARD,
        on_pass: &[],
        reward_pass: 10.0,
        on_fail: &[],
        reward_fail: -5.0,
    },
];

// Optimal band first; a state in the optimal band never also pays the
// critical penalty.
const HTN_SHAPING: &[ShapingBand] = &[
    ShapingBand {
        guard: Guard::All(&[
            Guard::Within {
                field: htn::SBP,
                low: 90.0,
                high: 120.0,
            },
            Guard::Within {
                field: htn::DBP,
                low: 60.0,
                high: 80.0,
            },
        ]),
        bonus: 10.0,
    },
    ShapingBand {
        guard: Guard::Any(&[
            Guard::Gt {
                field: htn::SBP,
                threshold: 130.0,
            },
            Guard::Gt {
                field: htn::DBP,
                threshold: 90.0,
            },
            Guard::Lt {
                field: htn::SBP,
                threshold: 80.0,
            },
            Guard::Lt {
                field: htn::DBP,
                threshold: 50.0,
            },
        ]),
        bonus: -10.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_shapes() {
        let evac = EpisodeConfig::evacuation();
        assert_eq!(evac.fields.len(), 4);
        assert_eq!(evac.initial.len(), 4);
        assert_eq!(evac.action_count(), 8);
        assert_eq!(evac.max_steps, 50);
        assert!(evac.goal.is_some());

        let htn = EpisodeConfig::hypertension();
        assert_eq!(htn.fields.len(), 8);
        assert_eq!(htn.initial.len(), 8);
        assert_eq!(htn.action_count(), 7);
        assert_eq!(htn.max_steps, 100);
        assert!(htn.goal.is_none());
    }

    #[test]
    fn initial_assignments_respect_bounds() {
        for config in [EpisodeConfig::evacuation(), EpisodeConfig::hypertension()] {
            for (value, spec) in config.initial.iter().zip(config.fields) {
                assert!(
                    *value >= spec.low && *value <= spec.high,
                    "{} initial {} outside [{}, {}]",
                    spec.name,
                    value,
                    spec.low,
                    spec.high
                );
            }
        }
    }

    #[test]
    fn noise_tables_target_declared_fields() {
        let htn = EpisodeConfig::hypertension();
        for noise in htn.step_noise {
            assert!(noise.field < htn.fields.len());
            assert!(noise.low < noise.high);
        }
        assert!(EpisodeConfig::evacuation().step_noise.is_empty());
    }

    #[test]
    fn variant_names_round_trip() {
        for variant in [Variant::Evacuation, Variant::Hypertension] {
            assert_eq!(Variant::parse(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::parse("htn"), Some(Variant::Hypertension));
        assert_eq!(Variant::parse("unknown"), None);
    }
}
