use rand::{
    SeedableRng,
    rngs::StdRng,
    seq::{SliceRandom, index},
};

use crate::{NeighborhoodModel, OptModel, RandomNeighborModel};

/// N-queens as conflict minimization
///
/// A state is a permutation of `0..n`: queen `i` sits in row `i` and column
/// `state[i]`, so rows and columns never clash and only diagonal conflicts are
/// counted. A solution has cost 0.
#[derive(Debug, Clone)]
pub struct NQueens {
    n: usize,
    rng: StdRng,
}

impl NQueens {
    /// Board of size `n`, seeded from OS entropy
    pub fn new(n: usize) -> Self {
        Self::with_rng(n, StdRng::from_os_rng())
    }

    /// Board of size `n` with a reproducible random source
    pub fn with_seed(n: usize, seed: u64) -> Self {
        Self::with_rng(n, StdRng::seed_from_u64(seed))
    }

    /// Board of size `n` drawing from `rng`
    pub fn with_rng(n: usize, rng: StdRng) -> Self {
        Self { n, rng }
    }

    /// Number of queens
    pub fn n(&self) -> usize {
        self.n
    }
}

impl Default for NQueens {
    fn default() -> Self {
        Self::new(8)
    }
}

impl OptModel for NQueens {
    type StateType = Vec<usize>;

    fn initial_random_state(&mut self) -> Vec<usize> {
        let mut state = (0..self.n).collect::<Vec<_>>();
        state.shuffle(&mut self.rng);
        state
    }

    fn cost(&self, state: &Vec<usize>) -> f64 {
        let conflicts = (0..state.len())
            .flat_map(|i| (i + 1..state.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| state[i].abs_diff(state[j]) == j - i)
            .count();
        conflicts as f64
    }

    fn dimension(&self) -> usize {
        self.n
    }
}

impl NeighborhoodModel for NQueens {
    /// All 2-swaps, `(i, j)` with `i < j` in lexicographic order
    fn all_neighbors<'a>(
        &'a self,
        state: &'a Vec<usize>,
    ) -> Box<dyn Iterator<Item = Vec<usize>> + 'a> {
        let n = state.len();
        Box::new(
            (0..n)
                .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
                .map(move |(i, j)| {
                    let mut neighbor = state.clone();
                    neighbor.swap(i, j);
                    neighbor
                }),
        )
    }
}

impl RandomNeighborModel for NQueens {
    fn random_neighbor(&mut self, state: &Vec<usize>) -> Vec<usize> {
        let mut neighbor = state.clone();
        if neighbor.len() < 2 {
            return neighbor;
        }
        let picked = index::sample(&mut self.rng, neighbor.len(), 2);
        neighbor.swap(picked.index(0), picked.index(1));
        neighbor
    }
}
