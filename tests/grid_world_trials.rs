//! End-to-end runs of the learning agent against the grid world.

use smartcab::{
    AgentConfig, LearningAgent, WorldConfig,
    adapters::GridWorld,
    pipeline::{RunResult, TrialConfig, TrialRunner},
};

fn run_with(epsilon: f64, trials: usize, seed: u64) -> RunResult {
    let world_config = WorldConfig::new().with_seed(seed);
    let agent_config = AgentConfig::new()
        .with_epsilon(epsilon)
        .with_seed(seed.wrapping_add(1));

    let (mut env, mut planner) = GridWorld::build(world_config);
    let mut agent = LearningAgent::new(agent_config);
    let mut runner = TrialRunner::new(TrialConfig { n_trials: trials });
    runner
        .run(&mut agent, &mut env, &mut planner)
        .expect("run failed")
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = run_with(0.95, 30, 4242);
    let b = run_with(0.95, 30, 4242);

    assert_eq!(a.total_trials, b.total_trials);
    assert_eq!(a.reached, b.reached);
    assert_eq!(a.expired, b.expired);
    assert_eq!(a.mean_reward, b.mean_reward);
    assert_eq!(a.avg_steps_to_arrival, b.avg_steps_to_arrival);
    assert_eq!(a.states_discovered, b.states_discovered);
}

#[test]
fn learning_agent_beats_the_random_baseline() {
    let trials = 150;
    let learner = run_with(0.95, trials, 2025);
    let baseline = run_with(0.0, trials, 2025);

    assert!(
        learner.reached > baseline.reached,
        "learner reached {} vs baseline {}",
        learner.reached,
        baseline.reached
    );
    assert!(learner.mean_reward > baseline.mean_reward);
}

#[test]
fn every_trial_terminates_with_a_verdict() {
    let result = run_with(0.95, 40, 7);
    assert_eq!(result.total_trials, 40);
    assert_eq!(result.reached + result.expired, 40);
    // waypoint x light x oncoming x left = 4 * 2 * 4 * 4 possible keys.
    assert!(result.states_discovered > 0);
    assert!(result.states_discovered <= 4 * 2 * 4 * 4);
}

#[test]
fn run_results_round_trip_through_json() {
    let result = run_with(0.95, 10, 11);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("result.json");
    result.save(&path).expect("save");
    let loaded = RunResult::load(&path).expect("load");

    assert_eq!(loaded.total_trials, result.total_trials);
    assert_eq!(loaded.reached, result.reached);
    assert_eq!(loaded.success_rate, result.success_rate);
    assert_eq!(loaded.mean_reward, result.mean_reward);
    assert_eq!(loaded.avg_steps_to_arrival, result.avg_steps_to_arrival);
}
