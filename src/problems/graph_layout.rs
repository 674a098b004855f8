use std::f64::consts::{FRAC_PI_6, PI};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{LocalSearchError, NeighborhoodModel, OptModel, RandomNeighborModel};

/// Distance from the canvas border no vertex may cross
const MARGIN: i32 = 10;

/// Weights of the terms of the layout cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutWeights {
    /// per pair of crossing edges
    pub crossings: f64,
    /// per pair of vertices closer than the minimum distance, scaled by proximity
    pub separation: f64,
    /// per pair of adjacent edges meeting at a small angle, scaled by sharpness
    pub angle: f64,
    /// relative distance of every vertex to the circle inscribed in the canvas
    pub circle: f64,
    /// imbalance of the vertex count between the two halves of each axis
    pub balance: f64,
}

impl Default for LayoutWeights {
    fn default() -> Self {
        Self {
            crossings: 0.5,
            separation: 3.0,
            angle: 2.0,
            circle: 0.0,
            balance: 0.0,
        }
    }
}

/// Drawing of a simple undirected graph on a square canvas
///
/// A state is the flat vector `[x0, y0, x1, y1, ...]` of pixel coordinates, in the
/// vertex order given at construction. Every coordinate stays within
/// `[10, size - 10]`.
#[derive(Debug, Clone)]
pub struct GraphLayout {
    vertices: Vec<String>,
    edges: Vec<(usize, usize)>,
    size: i32,
    weights: LayoutWeights,
    min_distance: f64,
    max_step: i32,
    rng: StdRng,
}

impl GraphLayout {
    /// Layout of the graph seeded from OS entropy
    ///
    /// - `vertices` : vertex names, the order fixes the state layout
    /// - `edges` : pairs of vertex names
    /// - `size` : side of the square canvas in pixels
    pub fn new<S: AsRef<str>>(
        vertices: &[S],
        edges: &[(S, S)],
        size: i32,
    ) -> Result<Self, LocalSearchError> {
        Self::with_rng(vertices, edges, size, StdRng::from_os_rng())
    }

    /// Layout of the graph with a reproducible random source
    pub fn with_seed<S: AsRef<str>>(
        vertices: &[S],
        edges: &[(S, S)],
        size: i32,
        seed: u64,
    ) -> Result<Self, LocalSearchError> {
        Self::with_rng(vertices, edges, size, StdRng::seed_from_u64(seed))
    }

    /// Layout of the graph drawing from `rng`
    pub fn with_rng<S: AsRef<str>>(
        vertices: &[S],
        edges: &[(S, S)],
        size: i32,
        rng: StdRng,
    ) -> Result<Self, LocalSearchError> {
        if size <= 2 * MARGIN {
            return Err(LocalSearchError::invalid(
                "size",
                format!("canvas must be larger than {} pixels, got {size}", 2 * MARGIN),
            ));
        }
        let vertices = vertices
            .iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>();
        let position = |name: &str| {
            vertices.iter().position(|v| v == name).ok_or_else(|| {
                LocalSearchError::invalid("edges", format!("unknown vertex `{name}`"))
            })
        };
        let edges = edges
            .iter()
            .map(|(a, b)| Ok((position(a.as_ref())?, position(b.as_ref())?)))
            .collect::<Result<Vec<_>, LocalSearchError>>()?;

        Ok(Self {
            vertices,
            edges,
            size,
            weights: LayoutWeights::default(),
            min_distance: 50.0,
            max_step: 10,
            rng,
        })
    }

    /// Replace the cost weights
    pub fn with_weights(mut self, weights: LayoutWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Minimum comfortable distance between two vertices, in pixels
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Largest displacement of a single move, in pixels
    pub fn with_max_step(mut self, max_step: i32) -> Self {
        self.max_step = max_step.max(1);
        self
    }

    /// Vertex names in state order
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Edges as pairs of vertex indices
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// `(x, y)` position of every vertex
    pub fn positions(&self, state: &[i32]) -> Vec<(i32, i32)> {
        state.chunks_exact(2).map(|p| (p[0], p[1])).collect()
    }

    fn clamp(&self, v: i32) -> i32 {
        v.clamp(MARGIN, self.size - MARGIN)
    }

    /// Number of pairs of edges crossing each other
    pub fn crossings(&self, state: &[i32]) -> usize {
        let pos = self.positions(state);
        let mut total = 0;
        for (k, &(a0, a1)) in self.edges.iter().enumerate() {
            for &(b0, b1) in &self.edges[k + 1..] {
                let (x0a, y0a) = to_f64(pos[a0]);
                let (xfa, yfa) = to_f64(pos[a1]);
                let (x0b, y0b) = to_f64(pos[b0]);
                let (xfb, yfb) = to_f64(pos[b1]);

                let den = (xfa - x0a) * (yfb - y0b) - (xfb - x0b) * (yfa - y0a);
                if den == 0.0 {
                    continue;
                }
                let ua = ((xfb - x0b) * (y0a - y0b) - (yfb - y0b) * (x0a - x0b)) / den;
                let ub = ((xfa - x0a) * (y0a - y0b) - (yfa - y0a) * (x0a - x0b)) / den;
                if 0.0 < ua && ua < 1.0 && 0.0 < ub && ub < 1.0 {
                    total += 1;
                }
            }
        }
        total
    }

    /// Penalty `1 - d / min_distance` summed over vertex pairs closer than `min_distance`
    pub fn separation(&self, state: &[i32]) -> f64 {
        let pos = self.positions(state);
        let mut total = 0.0;
        for (k, &p) in pos.iter().enumerate() {
            for &q in &pos[k + 1..] {
                let (x1, y1) = to_f64(p);
                let (x2, y2) = to_f64(q);
                let dist = (x1 - x2).hypot(y1 - y2);
                if dist < self.min_distance {
                    total += 1.0 - dist / self.min_distance;
                }
            }
        }
        total
    }

    /// Penalty `1 - angle / (pi / 6)` summed over adjacent edges meeting at less than 30 degrees
    pub fn angles(&self, state: &[i32]) -> f64 {
        let pos = self.positions(state);
        let mut total = 0.0;
        for (k, &(a0, a1)) in self.edges.iter().enumerate() {
            for &(b0, b1) in &self.edges[k + 1..] {
                let (shared, end_a) = if a0 == b0 || a0 == b1 {
                    (a0, a1)
                } else if a1 == b0 || a1 == b1 {
                    (a1, a0)
                } else {
                    continue;
                };
                let end_b = if b0 == shared { b1 } else { b0 };
                let angle = angle_at(pos[shared], pos[end_a], pos[end_b]);
                if angle < FRAC_PI_6 {
                    total += 1.0 - angle / FRAC_PI_6;
                }
            }
        }
        total
    }

    /// Sum over vertices of `|d - r| / r`, with `d` the distance to the canvas centre
    /// and `r = size / 2 - 10`
    pub fn circle_fit(&self, state: &[i32]) -> f64 {
        let centre = f64::from(self.size / 2);
        let radius = f64::from(self.size / 2 - MARGIN);
        self.positions(state)
            .into_iter()
            .map(|p| {
                let (x, y) = to_f64(p);
                ((x - centre).hypot(y - centre) - radius).abs() / radius
            })
            .sum()
    }

    /// Mean over both axes of `|2 * below - n| / n`, where `below` counts the vertices
    /// on the lower half of the axis; 0 when every axis splits the vertices evenly
    pub fn balance(&self, state: &[i32]) -> f64 {
        let pos = self.positions(state);
        if pos.is_empty() {
            return 0.0;
        }
        let n = pos.len() as f64;
        let half = self.size / 2;
        let left = pos.iter().filter(|&&(x, _)| x < half).count() as f64;
        let low = pos.iter().filter(|&&(_, y)| y < half).count() as f64;
        ((2.0 * left - n).abs() + (2.0 * low - n).abs()) / (2.0 * n)
    }
}

fn to_f64((x, y): (i32, i32)) -> (f64, f64) {
    (f64::from(x), f64::from(y))
}

/// Angle at `vertex` between the segments towards `p` and `q`; degenerate
/// segments count as a zero angle
fn angle_at(vertex: (i32, i32), p: (i32, i32), q: (i32, i32)) -> f64 {
    if vertex == p || vertex == q || p == q {
        return 0.0;
    }
    let (vx, vy) = to_f64(vertex);
    let (px, py) = to_f64(p);
    let (qx, qy) = to_f64(q);
    let (ux, uy) = (px - vx, py - vy);
    let (wx, wy) = (qx - vx, qy - vy);
    let cos = (ux * wx + uy * wy) / (ux.hypot(uy) * wx.hypot(wy));
    cos.clamp(-1.0, 1.0).acos()
}

impl OptModel for GraphLayout {
    type StateType = Vec<i32>;

    fn initial_random_state(&mut self) -> Vec<i32> {
        let (lo, hi) = (MARGIN, self.size - MARGIN);
        (0..2 * self.vertices.len())
            .map(|_| self.rng.random_range(lo..=hi))
            .collect()
    }

    fn cost(&self, state: &Vec<i32>) -> f64 {
        self.weights.crossings * self.crossings(state) as f64
            + self.weights.separation * self.separation(state)
            + self.weights.angle * self.angles(state)
            + self.weights.circle * self.circle_fit(state)
            + self.weights.balance * self.balance(state)
    }

    fn dimension(&self) -> usize {
        2 * self.vertices.len()
    }
}

impl NeighborhoodModel for GraphLayout {
    /// Every single coordinate moved by `-max_step` then `+max_step`, skipping moves
    /// blocked by the canvas border
    fn all_neighbors<'a>(
        &'a self,
        state: &'a Vec<i32>,
    ) -> Box<dyn Iterator<Item = Vec<i32>> + 'a> {
        let step = self.max_step;
        Box::new(
            (0..state.len())
                .flat_map(move |k| [(k, -step), (k, step)])
                .filter_map(move |(k, d)| {
                    let moved = self.clamp(state[k].saturating_add(d));
                    (moved != state[k]).then(|| {
                        let mut neighbor = state.clone();
                        neighbor[k] = moved;
                        neighbor
                    })
                }),
        )
    }
}

impl RandomNeighborModel for GraphLayout {
    /// Moves one vertex by a random vector shorter than `max_step`
    fn random_neighbor(&mut self, state: &Vec<i32>) -> Vec<i32> {
        let mut neighbor = state.clone();
        if neighbor.len() < 2 {
            return neighbor;
        }
        let v = self.rng.random_range(0..neighbor.len() / 2);
        let theta = 2.0 * PI * self.rng.random::<f64>();
        let magnitude = f64::from(self.max_step) * self.rng.random::<f64>();
        let dx = (magnitude * theta.cos()) as i32;
        let dy = (magnitude * theta.sin()) as i32;
        neighbor[2 * v] = self.clamp(neighbor[2 * v].saturating_add(dx));
        neighbor[2 * v + 1] = self.clamp(neighbor[2 * v + 1].saturating_add(dy));
        neighbor
    }
}
