use rand::{Rng, SeedableRng, rngs::StdRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    LocalSearchError, RandomNeighborModel, callback::OptProgress, counter::AcceptanceCounter,
    schedule::Schedule,
};

use super::{LocalSearchOptimizer, OptReport, Termination, metropolis::acceptance_probability};

/// Default temperature below which annealing stops
pub const DEFAULT_TEMPERATURE_FLOOR: f64 = 1e-3;

/// Optimizer that implements the simulated annealing algorithm
///
/// One temperature is consumed per iteration. A random neighbor replaces the current
/// state when it is strictly cheaper, or otherwise with the Metropolis probability
/// `exp(-(cost increase) / T)`.
///
/// By default the state held when the run stops is returned, which is not necessarily
/// the best one visited. Use [`with_return_best`](Self::with_return_best) to get the
/// best visited state instead.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulatedAnnealingOptimizer {
    /// Temperature schedule, synthesised from the model when None
    schedule: Option<Schedule>,
    /// Stop once the temperature drops below this value
    temperature_floor: f64,
    /// Optional hard cap on the number of iterations
    max_iterations: Option<usize>,
    /// Return the best visited state rather than the last one
    return_best: bool,
    /// Seed of the acceptance draws, OS entropy when None
    seed: Option<u64>,
    /// Size of the window the reported acceptance ratio is computed over
    window_size: usize,
}

impl Default for SimulatedAnnealingOptimizer {
    fn default() -> Self {
        Self {
            schedule: None,
            temperature_floor: DEFAULT_TEMPERATURE_FLOOR,
            max_iterations: None,
            return_best: false,
            seed: None,
            window_size: 100,
        }
    }
}

impl SimulatedAnnealingOptimizer {
    /// Constructor of SimulatedAnnealingOptimizer
    ///
    /// - `schedule` : the temperature schedule. If None, one is estimated from the model,
    ///   see [`Schedule::default_for`]
    /// - `temperature_floor` : the optimizer stops once the temperature drops below this value
    pub fn new(schedule: Option<Schedule>, temperature_floor: f64) -> Self {
        Self {
            schedule,
            temperature_floor,
            ..Self::default()
        }
    }

    /// Set the temperature schedule
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Set the temperature floor
    pub fn with_temperature_floor(mut self, temperature_floor: f64) -> Self {
        self.temperature_floor = temperature_floor;
        self
    }

    /// Stop after at most `max_iterations` iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Return the best visited state rather than the state held at termination
    pub fn with_return_best(mut self, return_best: bool) -> Self {
        self.return_best = return_best;
        self
    }

    /// Seed the acceptance draws for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the sliding window of the reported acceptance ratio
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Temperature floor
    pub fn temperature_floor(&self) -> f64 {
        self.temperature_floor
    }

    /// Check the optimizer parameters
    pub fn check(&self) -> Result<(), LocalSearchError> {
        if !(self.temperature_floor.is_finite() && self.temperature_floor > 0.0) {
            return Err(LocalSearchError::invalid(
                "temperature_floor",
                format!("must be finite and positive, got {}", self.temperature_floor),
            ));
        }
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        Ok(())
    }

    /// Run annealing over an arbitrary temperature sequence
    ///
    /// - `model` : the model to optimize
    /// - `initial_state` : the state to start from
    /// - `initial_cost` : cost of `initial_state`
    /// - `schedule` : temperatures, consumed one per iteration
    /// - `callback` : callback function that will be invoked at the end of each iteration
    pub fn anneal<M, I>(
        &self,
        model: &mut M,
        initial_state: M::StateType,
        initial_cost: f64,
        schedule: I,
        callback: &mut dyn FnMut(OptProgress<'_, M::StateType>),
    ) -> (M::StateType, f64, OptReport)
    where
        M: RandomNeighborModel + ?Sized,
        I: IntoIterator<Item = f64>,
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut current_state = initial_state;
        let mut current_cost = initial_cost;
        let mut best = self
            .return_best
            .then(|| (current_state.clone(), current_cost));
        let mut counter = AcceptanceCounter::new(self.window_size);
        let mut accepted_count = 0;
        let mut iterations = 0;
        let mut termination = Termination::ScheduleExhausted;

        debug!(
            temperature_floor = self.temperature_floor,
            max_iterations = ?self.max_iterations,
            initial_cost,
            "starting simulated annealing"
        );

        for temperature in schedule {
            if self.max_iterations.is_some_and(|cap| iterations >= cap) {
                termination = Termination::IterationLimit;
                break;
            }
            if temperature.is_nan() || temperature < self.temperature_floor {
                termination = Termination::TemperatureFloor;
                break;
            }

            let candidate = model.random_neighbor(&current_state);
            let candidate_cost = model.cost(&candidate);
            let delta_cost = current_cost - candidate_cost;

            let accepted = delta_cost > 0.0
                || rng.random::<f64>() < acceptance_probability(delta_cost, temperature);
            if accepted {
                current_state = candidate;
                current_cost = candidate_cost;
                accepted_count += 1;
                if let Some((best_state, best_cost)) = best.as_mut() {
                    if current_cost < *best_cost {
                        trace!(iter = iterations, cost = current_cost, "new best");
                        *best_state = current_state.clone();
                        *best_cost = current_cost;
                    }
                }
            }
            counter.enqueue(accepted);

            callback(OptProgress {
                iter: iterations,
                accepted_count,
                state: &current_state,
                cost: current_cost,
                temperature: Some(temperature),
                acceptance_ratio: counter.acceptance_ratio(),
            });
            iterations += 1;
        }

        debug!(
            iterations,
            accepted_count,
            final_cost = current_cost,
            ?termination,
            "simulated annealing finished"
        );

        let report = OptReport {
            iterations,
            accepted_count,
            termination,
        };
        match best {
            Some((best_state, best_cost)) => (best_state, best_cost, report),
            None => (current_state, current_cost, report),
        }
    }
}

impl<M: RandomNeighborModel> LocalSearchOptimizer<M> for SimulatedAnnealingOptimizer {
    fn validate(&self) -> Result<(), LocalSearchError> {
        self.check()
    }

    /// Start optimization
    ///
    /// - `model` : the model to optimize
    /// - `initial_state` : the state to start from
    /// - `initial_cost` : cost of `initial_state`
    /// - `callback` : callback function that will be invoked at the end of each iteration
    fn optimize(
        &self,
        model: &mut M,
        initial_state: M::StateType,
        initial_cost: f64,
        callback: &mut dyn FnMut(OptProgress<'_, M::StateType>),
    ) -> (M::StateType, f64, OptReport) {
        let schedule = match &self.schedule {
            Some(schedule) => schedule.clone(),
            None => {
                let schedule = Schedule::default_for(&mut *model);
                debug!(policy = ?schedule.policy(), "synthesised default schedule");
                schedule
            }
        };
        self.anneal(model, initial_state, initial_cost, schedule, callback)
    }
}
