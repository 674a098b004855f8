use approx::assert_abs_diff_eq;

use crate::{
    LocalSearchError, OptModel, RandomNeighborModel,
    optim::{LocalSearchOptimizer, SimulatedAnnealingOptimizer, Termination},
    problems::NQueens,
    schedule::Schedule,
    simulated_annealing,
};

use super::QuadraticModel;

#[test]
fn test() {
    let mut model = QuadraticModel::new(vec![2, 0, -3], (-10, 10), 5);
    let opt = SimulatedAnnealingOptimizer::new(Some(Schedule::geometric(10.0, 0.999)), 1e-3)
        .with_seed(17);
    let (final_state, final_cost, report) = opt.run(&mut model, None, &mut |_| {}).unwrap();
    assert_eq!(final_state, vec![2, 0, -3]);
    assert_abs_diff_eq!(0.0, final_cost);
    assert_eq!(report.termination, Termination::TemperatureFloor);
}

#[test]
fn test_stops_at_temperature_floor() {
    let mut model = NQueens::with_seed(8, 2);
    let opt = SimulatedAnnealingOptimizer::new(Some(Schedule::exponential(100.0, 7e-4)), 1e-3)
        .with_seed(2);
    let (_, _, report) = opt.run(&mut model, None, &mut |_| {}).unwrap();
    let expected = ((100.0f64 / 1e-3).ln() / 7e-4).floor() as usize + 1;
    assert_eq!(report.iterations, expected);
    assert_eq!(report.termination, Termination::TemperatureFloor);
}

#[test]
fn test_schedule_exhaustion() {
    let mut model = NQueens::with_seed(8, 2);
    let opt = SimulatedAnnealingOptimizer::default()
        .with_schedule(Schedule::linear(10.0, 1.0).with_limit(50))
        .with_seed(0);
    let mut temperatures = Vec::new();
    let (_, _, report) = opt
        .run(&mut model, None, &mut |p| temperatures.extend(p.temperature))
        .unwrap();
    assert_eq!(report.iterations, 50);
    assert_eq!(report.termination, Termination::ScheduleExhausted);
    assert_eq!(temperatures.len(), 50);
    assert!(temperatures.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_iteration_cap() {
    let mut model = NQueens::with_seed(8, 2);
    let opt = SimulatedAnnealingOptimizer::default()
        .with_schedule(Schedule::default())
        .with_max_iterations(10);
    let (_, _, report) = opt.run(&mut model, None, &mut |_| {}).unwrap();
    assert_eq!(report.iterations, 10);
    assert_eq!(report.termination, Termination::IterationLimit);
}

#[test]
fn test_custom_temperature_sequence() {
    let mut model = NQueens::with_seed(6, 8);
    let state = model.initial_random_state();
    let cost = model.cost(&state);
    let opt = SimulatedAnnealingOptimizer::default().with_seed(3);
    let (_, _, report) = opt.anneal(&mut model, state, cost, [1.0, 0.5, 0.25], &mut |_| {});
    assert_eq!(report.iterations, 3);
    assert_eq!(report.termination, Termination::ScheduleExhausted);
}

#[test]
fn test_hot_schedule_accepts_everything() {
    let mut model = QuadraticModel::new(vec![0, 0], (-5, 5), 6);
    let opt = SimulatedAnnealingOptimizer::default().with_seed(1);
    let state = model.initial_random_state();
    let cost = model.cost(&state);
    let (_, _, report) = opt.anneal(&mut model, state, cost, vec![1e300; 100], &mut |_| {});
    assert_eq!(report.accepted_count, 100);
}

/// Every random neighbor costs one more than the state it comes from
struct UphillModel;

impl OptModel for UphillModel {
    type StateType = u32;

    fn initial_random_state(&mut self) -> u32 {
        0
    }

    fn cost(&self, state: &u32) -> f64 {
        f64::from(*state)
    }

    fn dimension(&self) -> usize {
        1
    }
}

impl RandomNeighborModel for UphillModel {
    fn random_neighbor(&mut self, state: &u32) -> u32 {
        state + 1
    }
}

#[test]
fn test_cold_schedule_rejects_worse_neighbors() {
    let opt = SimulatedAnnealingOptimizer::default().with_seed(4);
    let mut visited = Vec::new();
    let (final_state, final_cost, report) =
        opt.anneal(&mut UphillModel, 5, 5.0, [2e-3; 50], &mut |p| {
            visited.push(*p.state)
        });
    assert_eq!(report.accepted_count, 0);
    assert_eq!(report.iterations, 50);
    assert_eq!(final_state, 5);
    assert_abs_diff_eq!(final_cost, 5.0);
    assert!(visited.iter().all(|&s| s == 5));
}

#[test]
fn test_window_size_bounds_acceptance_ratio() {
    let mut model = NQueens::with_seed(8, 6);
    let opt = SimulatedAnnealingOptimizer::default()
        .with_schedule(Schedule::geometric(2.0, 0.99).with_limit(200))
        .with_window_size(1)
        .with_seed(6);
    let mut ratios = Vec::new();
    opt.run(&mut model, None, &mut |p| ratios.push(p.acceptance_ratio))
        .unwrap();
    assert_eq!(ratios.len(), 200);
    assert!(ratios.iter().all(|&r| r == 0.0 || r == 1.0));
}

#[test]
fn test_invalid_parameters() {
    let mut model = NQueens::with_seed(8, 0);
    for floor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let opt = SimulatedAnnealingOptimizer::new(None, floor);
        assert!(matches!(
            opt.run(&mut model, None, &mut |_| {}),
            Err(LocalSearchError::InvalidParameter {
                name: "temperature_floor",
                ..
            })
        ));
    }
    let opt = SimulatedAnnealingOptimizer::new(Some(Schedule::geometric(1.0, 1.5)), 1e-3);
    assert!(opt.run(&mut model, None, &mut |_| {}).is_err());
    assert!(simulated_annealing(&mut model, None, 0.0).is_err());
}

#[test]
fn test_return_best() {
    let mut model = NQueens::with_seed(10, 4);
    let initial_state = model.initial_random_state();
    let initial_cost = model.cost(&initial_state);
    let opt = SimulatedAnnealingOptimizer::default()
        .with_schedule(Schedule::linear(5.0, 0.01).with_limit(2000))
        .with_return_best(true)
        .with_seed(9);
    let mut lowest = initial_cost;
    let (final_state, final_cost, _) =
        opt.optimize(&mut model, initial_state, initial_cost, &mut |p| {
            lowest = lowest.min(p.cost)
        });
    assert_abs_diff_eq!(final_cost, lowest);
    assert_abs_diff_eq!(model.cost(&final_state), lowest);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let mut model = NQueens::with_seed(12, 21);
        let opt = SimulatedAnnealingOptimizer::default()
            .with_schedule(Schedule::geometric(20.0, 0.99))
            .with_seed(21);
        opt.run(&mut model, None, &mut |_| {}).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_default_schedule_is_synthesised() {
    let mut model = NQueens::with_seed(8, 13);
    let final_state = simulated_annealing(&mut model, None, 1e-3).unwrap();
    let mut sorted = final_state.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_flat_landscape_stops_immediately() {
    // every sampled cost is equal, so the estimated start temperature is 0
    let mut model = QuadraticModel::new(vec![1, 1], (3, 3), 0);
    let opt = SimulatedAnnealingOptimizer::default();
    let (final_state, _, report) = opt.run(&mut model, None, &mut |_| {}).unwrap();
    assert_eq!(final_state, vec![3, 3]);
    assert_eq!(report.iterations, 0);
    assert_eq!(report.termination, Termination::TemperatureFloor);
}
