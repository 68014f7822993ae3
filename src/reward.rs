// src/reward.rs
//
// Reward shaper: scalar reward for the step just taken.
//
//   reward = base_reward(action, pre-state) + shaping_bonus(post-clip state)
//
// The base reward comes out of the action table (the branch whose guard
// fired); shaping bands are checked in declaration order against the
// post-clip state and the first match wins, so a state in the optimal band
// never also pays the critical penalty.

use crate::effects::Guard;
use crate::state::StateVector;

/// One reward-shaping band: a predicate over the post-clip state and the
/// additive bonus (or penalty) it grants.
#[derive(Debug, Clone, Copy)]
pub struct ShapingBand {
    pub guard: Guard,
    pub bonus: f64,
}

/// First-matching-band bonus, 0.0 when no band matches.
pub fn shaping_bonus(bands: &[ShapingBand], state: &StateVector) -> f64 {
    bands
        .iter()
        .find(|band| band.guard.eval(state))
        .map(|band| band.bonus)
        .unwrap_or(0.0)
}

/// Compose the action's base reward with the post-state shaping bonus.
pub fn shaped_reward(base: f64, bands: &[ShapingBand], post_state: &StateVector) -> f64 {
    base + shaping_bonus(bands, post_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EpisodeConfig;

    fn htn_state(sbp: f64, dbp: f64) -> StateVector {
        StateVector::new(&[sbp, dbp, 70.0, 5.0, 0.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn optimal_band_pays_bonus() {
        let config = EpisodeConfig::hypertension();
        assert_eq!(shaping_bonus(config.shaping, &htn_state(110.0, 70.0)), 10.0);
        // Inclusive edges of the band.
        assert_eq!(shaping_bonus(config.shaping, &htn_state(90.0, 60.0)), 10.0);
        assert_eq!(shaping_bonus(config.shaping, &htn_state(120.0, 80.0)), 10.0);
    }

    #[test]
    fn critical_band_pays_penalty() {
        let config = EpisodeConfig::hypertension();
        assert_eq!(
            shaping_bonus(config.shaping, &htn_state(135.0, 70.0)),
            -10.0
        );
        assert_eq!(
            shaping_bonus(config.shaping, &htn_state(110.0, 95.0)),
            -10.0
        );
        assert_eq!(shaping_bonus(config.shaping, &htn_state(75.0, 70.0)), -10.0);
        assert_eq!(
            shaping_bonus(config.shaping, &htn_state(110.0, 45.0)),
            -10.0
        );
    }

    #[test]
    fn between_bands_no_adjustment() {
        let config = EpisodeConfig::hypertension();
        // Elevated but not critical: 125/85.
        assert_eq!(shaping_bonus(config.shaping, &htn_state(125.0, 85.0)), 0.0);
    }

    #[test]
    fn first_matching_band_wins() {
        // Synthetic overlapping bands: ordering decides, not the best match.
        let bands = [
            ShapingBand {
                guard: Guard::Gt {
                    field: 0,
                    threshold: 1.0,
                },
                bonus: 10.0,
            },
            ShapingBand {
                guard: Guard::Gt {
                    field: 0,
                    threshold: 0.0,
                },
                bonus: -10.0,
            },
        ];
        assert_eq!(shaping_bonus(&bands, &StateVector::new(&[2.0])), 10.0);
        assert_eq!(shaping_bonus(&bands, &StateVector::new(&[0.5])), -10.0);
    }

    #[test]
    fn evacuation_has_no_shaping() {
        let config = EpisodeConfig::evacuation();
        let state = StateVector::new(&[0.8, 0.9, 0.5, 0.0]);
        assert_eq!(shaped_reward(-5.0, config.shaping, &state), -5.0);
    }

    #[test]
    fn base_reward_composes_with_band() {
        let config = EpisodeConfig::hypertension();
        // A "no intervention" step (base 0) in the optimal band still earns
        // the +10 bonus; preserved as specified.
        assert_eq!(shaped_reward(0.0, config.shaping, &htn_state(115.0, 75.0)), 10.0);
        // A medium dose (base 4) landing in the critical band nets -6.
        assert_eq!(shaped_reward(4.0, config.shaping, &htn_state(140.0, 75.0)), -6.0);
    }
}
