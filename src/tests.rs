use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{NeighborhoodModel, OptModel, RandomNeighborModel};

/// Separable quadratic bowl on the integer lattice, minimum 0 at `centers`
#[derive(Clone)]
struct QuadraticModel {
    centers: Vec<i64>,
    value_range: (i64, i64),
    rng: StdRng,
}

impl QuadraticModel {
    fn new(centers: Vec<i64>, value_range: (i64, i64), seed: u64) -> Self {
        Self {
            centers,
            value_range,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

type StateType = Vec<i64>;

impl OptModel for QuadraticModel {
    type StateType = StateType;

    fn initial_random_state(&mut self) -> StateType {
        let (low, high) = self.value_range;
        (0..self.centers.len())
            .map(|_| self.rng.random_range(low..=high))
            .collect()
    }

    fn cost(&self, state: &StateType) -> f64 {
        state
            .iter()
            .zip(&self.centers)
            .map(|(x, c)| ((x - c) * (x - c)) as f64)
            .sum()
    }

    fn dimension(&self) -> usize {
        self.centers.len()
    }
}

impl NeighborhoodModel for QuadraticModel {
    fn all_neighbors<'a>(
        &'a self,
        state: &'a StateType,
    ) -> Box<dyn Iterator<Item = StateType> + 'a> {
        Box::new((0..state.len()).flat_map(move |k| {
            [-1, 1].into_iter().map(move |d| {
                let mut neighbor = state.clone();
                neighbor[k] += d;
                neighbor
            })
        }))
    }
}

impl RandomNeighborModel for QuadraticModel {
    fn random_neighbor(&mut self, state: &StateType) -> StateType {
        let k = self.rng.random_range(0..state.len());
        let d = if self.rng.random::<bool>() { 1 } else { -1 };
        let mut neighbor = state.clone();
        neighbor[k] += d;
        neighbor
    }
}

/// Model whose states have no neighbors at all
struct IsolatedModel;

impl OptModel for IsolatedModel {
    type StateType = u8;

    fn initial_random_state(&mut self) -> u8 {
        7
    }

    fn cost(&self, state: &u8) -> f64 {
        f64::from(*state)
    }

    fn dimension(&self) -> usize {
        1
    }
}

impl NeighborhoodModel for IsolatedModel {
    fn all_neighbors<'a>(&'a self, _state: &'a u8) -> Box<dyn Iterator<Item = u8> + 'a> {
        Box::new(std::iter::empty())
    }
}

mod test_simulated_annealing;
