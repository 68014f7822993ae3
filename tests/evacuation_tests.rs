// tests/evacuation_tests.rs
//
// Evacuation variant behavior:
// - reset literal and horizon at exactly 50 steps
// - direct-to-zone effect and reward semantics, including the proximity guard
// - goal termination when the safe zones fill
// - conditional rewards for rerouting and rescue alerts

use vigilsim::engine::advance;
use vigilsim::termination::{episode_done, DoneReason};
use vigilsim::{evac, Env, EpisodeConfig, EpisodeState, StateVector};

#[test]
fn test_reset_literal() {
    let mut env = Env::evacuation();
    let obs = env.reset(Some(42));
    assert_eq!(obs.values, vec![0.8, 0.5, 0.0, 0.0]);
}

#[test]
fn test_horizon_is_exactly_fifty_steps() {
    let mut env = Env::evacuation();
    env.reset(Some(42));

    // Waiting never fills the safe zones, so only the horizon can end this.
    for step in 1..50 {
        let result = env.step(7).expect("valid action");
        assert!(!result.done, "done too early at step {}", step);
    }
    let last = env.step(7).expect("valid action");
    assert!(last.done);
    assert_eq!(last.observation.step, 50);
    assert_eq!(env.done_reason(), Some(DoneReason::Horizon));
}

#[test]
fn test_direct_sequence_fills_zones_while_groups_are_near() {
    let config = EpisodeConfig::evacuation();
    let mut episode = EpisodeState::new(&config, 42);

    // Three direct actions, each taken while proximity is still above 0.6.
    let mut occupancy = 0.0;
    for _ in 0..3 {
        episode.state = StateVector::new(&[0.8, 0.5, 0.0, occupancy]);
        let base = advance(&config, &mut episode, 1);
        assert_eq!(base, 15.0);
        occupancy = episode.state.get(evac::SAFE_ZONE_OCCUPANCY);
    }
    assert!(occupancy >= 0.9 - 1e-12);

    // Once the group has moved away, a further direct is a mistake.
    episode.state = StateVector::new(&[0.5, 0.5, 0.0, occupancy]);
    let base = advance(&config, &mut episode, 3);
    assert_eq!(base, -10.0);
    assert!((episode.state.get(evac::SAFE_ZONE_OCCUPANCY) - occupancy).abs() < 1e-12);
}

#[test]
fn test_full_zones_terminate_before_horizon() {
    let config = EpisodeConfig::evacuation();
    let mut episode = EpisodeState::new(&config, 1);

    // Occupancy 0.9 with the group still near: one more successful direct
    // overshoots to 1.2 and clips to 1.0.
    episode.state = StateVector::new(&[0.7, 0.5, 0.2, 0.9]);
    advance(&config, &mut episode, 2);
    assert_eq!(episode.state.get(evac::SAFE_ZONE_OCCUPANCY), 1.0);
    assert_eq!(
        episode_done(&config, &episode.state, episode.step_count),
        Some(DoneReason::GoalReached)
    );
}

#[test]
fn test_reroute_only_pays_in_rising_water() {
    let mut env = Env::evacuation();
    env.reset(Some(42));

    // From reset, water 0.5 <= 0.7: rerouting wastes time.
    let result = env.step(4).expect("valid action");
    assert_eq!(result.reward, -15.0);

    // Crafted high-water state: rerouting pays.
    let config = EpisodeConfig::evacuation();
    let mut episode = EpisodeState::new(&config, 2);
    episode.state = StateVector::new(&[0.8, 0.8, 0.0, 0.0]);
    assert_eq!(advance(&config, &mut episode, 4), 5.0);
}

#[test]
fn test_rescue_alert_needs_hazard_and_proximity() {
    let config = EpisodeConfig::evacuation();

    let mut episode = EpisodeState::new(&config, 3);
    episode.state = StateVector::new(&[0.6, 0.7, 0.0, 0.0]);
    assert_eq!(advance(&config, &mut episode, 5), 15.0);

    // High water alone is not enough.
    let mut episode = EpisodeState::new(&config, 3);
    episode.state = StateVector::new(&[0.4, 0.7, 0.0, 0.0]);
    assert_eq!(advance(&config, &mut episode, 5), -10.0);
}

#[test]
fn test_scan_and_monitor_keep_water_in_bounds() {
    let mut env = Env::evacuation();
    env.reset(Some(42));

    for step in 0..100 {
        let action = if step % 2 == 0 { 0 } else { 6 };
        let result = env.step(action).expect("valid action");
        let water = result.observation.get(evac::WATER_LEVEL);
        assert!((0.0..=1.0).contains(&water));
        assert_eq!(result.reward, 0.0);
        if result.done {
            break;
        }
    }
}
