/*!
# Uniform Graph Generator: `G(n,m)`

This module provides the classical `G(n,m)` model: a graph drawn
uniformly from all graphs with `n` nodes and exactly `m` **distinct**
edges.

Generation uses rejection sampling against a hash set of already-drawn
edges, which is efficient for the sparse to moderately dense graphs the
rewiring tests operate on.

# Examples
```
use rewire::{prelude::*, gens::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(7);
let edges = Gnm::new().nodes(5).edges(6).undirected(true).generate(rng);
assert_eq!(edges.len(), 6);
assert!(edges.iter().all(|Edge(u, v)| *u < 5 && *v < 5));
```
*/

use fxhash::FxHashSet;

use super::*;

/// Generator for uniform `G(n,m)` random graphs.
///
/// Draws `m` distinct edges uniformly from all possible edges over `n`
/// nodes. Whether the generated edges are interpreted as directed or
/// undirected is configured via [`Gnm::undirected`]; undirected edges are
/// emitted normalized. Self-loops are excluded by default.
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnm {
    n: NumNodes,
    m: NumEdges,
    undirected: bool,
    self_loops: bool,
}

impl Gnm {
    /// Creates a new, empty `G(n,m)` generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether edges are sampled from the undirected edge set
    /// (mutable setter).
    pub fn set_undirected(&mut self, undirected: bool) {
        self.undirected = undirected;
    }

    /// Configures whether edges are sampled from the undirected edge set
    /// (builder style).
    pub fn undirected(mut self, undirected: bool) -> Self {
        self.set_undirected(undirected);
        self
    }

    /// Configures whether self-loops may be sampled (mutable setter).
    pub fn set_self_loops(&mut self, self_loops: bool) {
        self.self_loops = self_loops;
    }

    /// Configures whether self-loops may be sampled (builder style).
    pub fn self_loops(mut self, self_loops: bool) -> Self {
        self.set_self_loops(self_loops);
        self
    }

    /// Number of distinct edges available under the current configuration.
    fn max_edges(&self) -> u64 {
        let n = self.n as u64;
        let mut max = if self.undirected {
            n * (n - 1) / 2
        } else {
            n * (n - 1)
        };
        if self.self_loops {
            max += n;
        }
        max
    }
}

impl NumNodesGen for Gnm {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl NumEdgesGen for Gnm {
    fn set_edges(&mut self, m: NumEdges) {
        self.m = m;
    }
}

impl GraphGenerator for Gnm {
    /// Draws `m` distinct edges by rejection against a hash set.
    ///
    /// # Panics
    /// - If node count `n` is zero
    /// - Debug-asserts if `m` exceeds the number of distinct edges
    ///   available
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        assert!(self.n > 0, "At least one node must be generated!");
        debug_assert!(
            self.m as u64 <= self.max_edges(),
            "Cannot sample {} distinct edges from {} available ones!",
            self.m,
            self.max_edges()
        );

        let mut seen = FxHashSet::with_capacity_and_hasher(self.m as usize, Default::default());
        let mut edges = Vec::with_capacity(self.m as usize);

        while edges.len() < self.m as usize {
            let u = rng.random_range(0..self.n);
            let v = rng.random_range(0..self.n);

            if u == v && !self.self_loops {
                continue;
            }

            let edge = if self.undirected {
                Edge(u, v).normalized()
            } else {
                Edge(u, v)
            };

            if seen.insert(edge) {
                edges.push(edge);
            }
        }

        edges
    }
}
