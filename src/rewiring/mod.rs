/*!
# In-Place Edge Rewiring

This module implements a Markov-chain procedure that randomizes the
edges of a graph **in place** under one of several null models, while
holding chosen structural features constant.

A [`Rewiring`] is configured in builder style and then applied to a
mutable graph together with a random source:

```
use rewire::{prelude::*, gens::*, Rewiring, RewireModel};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(42);
let mut g = AdjArray::gnm(rng, 50, 200);

let out_degrees: Vec<_> = g.degrees().collect();
let in_degrees: Vec<_> = g.in_degrees().collect();

// shuffle the edges, keeping every in- and out-degree fixed
let failures = Rewiring::new(RewireModel::Uncorrelated)
    .sweeps(10)
    .run(&mut g, rng);

assert_eq!(g.number_of_edges(), 200);
assert_eq!(g.degrees().collect::<Vec<_>>(), out_degrees);
assert_eq!(g.in_degrees().collect::<Vec<_>>(), in_degrees);
assert!(failures < 10 * 200);
```

## Models

| [`RewireModel`] | preserves | partner selection |
|---|---|---|
| `Erdos` | number of edges | fresh uniform vertex pair |
| `Uncorrelated` | all degrees | uniform edge pair |
| `Correlated` | degrees + endpoint-block pairs | edge with same target block |
| `Blockmodel` | degrees, converges to block ensemble | uniform pair + Metropolis |
| `AliasBlockmodel` | degrees, converges to block ensemble | alias-sampled block + Metropolis |
| `Traditional` | number of edges, block ensemble | fresh pair from sampled blocks |

The block-constrained models read vertex labels from a
[`Blocks`] assignment (degree pairs by default, arbitrary labels via
[`PropertyBlocks`]) and edge probabilities from a [`CorrProb`] functor.

## Iteration

One **sweep** visits every edge slot once in a freshly drawn random
order. [`Rewiring::sweeps`] configures full sweeps;
[`Rewiring::steps`] instead performs single-edge attempts (one random
slot per iteration). With [`Rewiring::persist`] every attempt is
retried until it succeeds; otherwise failed attempts are counted and
returned by [`Rewiring::run`].
*/

use rand::{seq::SliceRandom, Rng};

use crate::{edge::*, ops::*};

pub mod blocks;

mod blockmodel;
mod shuffle;
mod swap;

pub use blocks::{Blocks, CorrProb, DegreeBlocks, ProbFn, PropertyBlocks, UniformProb};

use blockmodel::{AliasBlockmodelRewire, BlockmodelRewire, TradBlockRewire};
use shuffle::{CorrelatedRewire, ErdosRewire, UncorrelatedRewire};

/// Everything the rewiring engine requires from a host graph.
///
/// Automatically implemented for every type providing the listed
/// operation traits, including [`AdjArray`](crate::repr::AdjArray) and
/// [`AdjArrayUndir`](crate::repr::AdjArrayUndir).
pub trait Rewireable: GraphType + AdjacencyList + AdjacencyTest + GraphEdgeEditing {}

impl<G> Rewireable for G where G: GraphType + AdjacencyList + AdjacencyTest + GraphEdgeEditing {}

/// The null model a [`Rewiring`] draws from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RewireModel {
    /// Fully random rewiring: both endpoints of the visited edge are
    /// resampled uniformly. Only the number of edges is preserved.
    Erdos,
    /// Degree-preserving rewiring via uniform target swaps
    /// (configuration model).
    Uncorrelated,
    /// Degree-preserving rewiring that additionally keeps the multiset
    /// of endpoint-block pairs fixed.
    Correlated,
    /// Degree-preserving stochastic blockmodel via rejection sampling
    /// (Metropolis–Hastings on uniform edge-pair proposals).
    Blockmodel,
    /// Degree-corrected stochastic blockmodel with alias-sampled
    /// proposals and the same Metropolis correction.
    AliasBlockmodel,
    /// Traditional stochastic blockmodel: endpoints are resampled from
    /// an alias-sampled block pair. Degrees are not preserved.
    Traditional,
}

/// Snapshot passed to a progress observer before every attempted move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Current iteration (sweep), starting at zero.
    pub iteration: usize,
    /// Configured number of iterations.
    pub total_iterations: usize,
    /// Position within the current iteration, starting at zero.
    pub step: usize,
    /// Attempts per iteration: the number of edges for full sweeps, one
    /// for single-step mode.
    pub total_steps: usize,
}

/// One rewiring strategy: proposes and, on success, applies a move for
/// the visited edge slot.
pub(crate) trait RewireStrategy<G, R> {
    fn propose(
        &mut self,
        g: &mut G,
        edges: &mut [Edge],
        ei: usize,
        self_loops: bool,
        parallel_edges: bool,
        rng: &mut R,
    ) -> bool;
}

#[derive(Copy, Clone)]
struct SweepOpts {
    n_iter: usize,
    no_sweep: bool,
    persist: bool,
    self_loops: bool,
    parallel_edges: bool,
}

/// A configurable in-place edge rewiring.
///
/// Constructed with [`Rewiring::new`] and adjusted in builder style, it
/// is applied with [`Rewiring::run`]. The generic parameters select the
/// [`Blocks`] assignment and the [`CorrProb`] functor for the
/// block-constrained models; both default to degree blocks with uniform
/// probabilities.
///
/// ```
/// use rewire::{prelude::*, Rewiring, RewireModel, PropertyBlocks};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let labels = [0u8, 0, 1, 1];
/// let mut g = AdjArray::from_edges(4, [(0, 2), (2, 0), (1, 3), (3, 1)]);
///
/// // drive the edges towards intra-community pairs, keeping degrees
/// let failures = Rewiring::new(RewireModel::AliasBlockmodel)
///     .blocks(PropertyBlocks(&labels))
///     .corr_prob(|s: &u8, t: &u8| if s == t { 1.0 } else { 0.0 })
///     .sweeps(50)
///     .run(&mut g, rng);
/// # let _ = failures;
/// ```
pub struct Rewiring<'a, B = DegreeBlocks, P = UniformProb> {
    model: RewireModel,
    self_loops: bool,
    parallel_edges: bool,
    n_iter: usize,
    no_sweep: bool,
    persist: bool,
    cache: bool,
    blocks: B,
    corr_prob: P,
    progress: Option<Box<dyn FnMut(Progress) + 'a>>,
}

impl<'a> Rewiring<'a, DegreeBlocks, UniformProb> {
    /// Creates a rewiring of the given model with default settings: one
    /// full sweep, no self-loops, no parallel edges, no persistence, no
    /// caching, degree blocks, uniform probabilities.
    pub fn new(model: RewireModel) -> Self {
        Self {
            model,
            self_loops: false,
            parallel_edges: false,
            n_iter: 1,
            no_sweep: false,
            persist: false,
            cache: false,
            blocks: DegreeBlocks,
            corr_prob: UniformProb,
            progress: None,
        }
    }
}

impl<'a, B, P> Rewiring<'a, B, P> {
    /// Allows moves that create self-loops (mutable setter).
    pub fn set_self_loops(&mut self, allow: bool) {
        self.self_loops = allow;
    }

    /// Allows moves that create self-loops (builder style).
    pub fn self_loops(mut self, allow: bool) -> Self {
        self.set_self_loops(allow);
        self
    }

    /// Allows moves that create parallel edges (mutable setter).
    pub fn set_parallel_edges(&mut self, allow: bool) {
        self.parallel_edges = allow;
    }

    /// Allows moves that create parallel edges (builder style).
    pub fn parallel_edges(mut self, allow: bool) -> Self {
        self.set_parallel_edges(allow);
        self
    }

    /// Performs `n` full sweeps: each sweep visits every edge slot once
    /// in a fresh random order (mutable setter).
    pub fn set_sweeps(&mut self, n: usize) {
        self.n_iter = n;
        self.no_sweep = false;
    }

    /// Performs `n` full sweeps (builder style).
    pub fn sweeps(mut self, n: usize) -> Self {
        self.set_sweeps(n);
        self
    }

    /// Performs exactly `n` single-edge attempts, each on a uniformly
    /// drawn slot (mutable setter).
    pub fn set_steps(&mut self, n: usize) {
        self.n_iter = n;
        self.no_sweep = true;
    }

    /// Performs exactly `n` single-edge attempts (builder style).
    pub fn steps(mut self, n: usize) -> Self {
        self.set_steps(n);
        self
    }

    /// Retries every rejected attempt until it succeeds, so that every
    /// visit performs a move (mutable setter).
    ///
    /// If no successful move is reachable for some slot, the run will
    /// not terminate; callers must pair persistence with feasible
    /// inputs.
    pub fn set_persist(&mut self, persist: bool) {
        self.persist = persist;
    }

    /// Retries every rejected attempt until it succeeds (builder style).
    pub fn persist(mut self, persist: bool) -> Self {
        self.set_persist(persist);
        self
    }

    /// Materializes all block-pair probabilities at strategy
    /// construction instead of evaluating the functor per proposal.
    /// Only relevant for [`RewireModel::Blockmodel`] (mutable setter).
    pub fn set_cache(&mut self, cache: bool) {
        self.cache = cache;
    }

    /// Materializes all block-pair probabilities up front (builder
    /// style).
    pub fn cache(mut self, cache: bool) -> Self {
        self.set_cache(cache);
        self
    }

    /// Replaces the block assignment (builder style).
    pub fn blocks<B2>(self, blocks: B2) -> Rewiring<'a, B2, P> {
        Rewiring {
            model: self.model,
            self_loops: self.self_loops,
            parallel_edges: self.parallel_edges,
            n_iter: self.n_iter,
            no_sweep: self.no_sweep,
            persist: self.persist,
            cache: self.cache,
            blocks,
            corr_prob: self.corr_prob,
            progress: self.progress,
        }
    }

    /// Replaces the correlation-probability functor with a closure over
    /// block pairs (builder style).
    pub fn corr_prob<F>(self, corr_prob: F) -> Rewiring<'a, B, ProbFn<F>> {
        self.corr_prob_with(ProbFn(corr_prob))
    }

    /// Replaces the correlation-probability functor with an arbitrary
    /// [`CorrProb`] implementation (builder style).
    pub fn corr_prob_with<P2>(self, corr_prob: P2) -> Rewiring<'a, B, P2> {
        Rewiring {
            model: self.model,
            self_loops: self.self_loops,
            parallel_edges: self.parallel_edges,
            n_iter: self.n_iter,
            no_sweep: self.no_sweep,
            persist: self.persist,
            cache: self.cache,
            blocks: self.blocks,
            corr_prob,
            progress: self.progress,
        }
    }

    /// Installs an observer invoked before every attempted move
    /// (builder style).
    pub fn on_progress<F>(mut self, observer: F) -> Self
    where
        F: FnMut(Progress) + 'a,
    {
        self.progress = Some(Box::new(observer));
        self
    }

    /// Rewires the edges of `graph` in place and returns the number of
    /// failed (non-retried) proposals.
    ///
    /// The graph is mutated towards the configured null model; the
    /// number of edges is always preserved. With zero iterations or an
    /// edgeless graph this returns immediately without touching the
    /// graph.
    pub fn run<G, R>(&mut self, graph: &mut G, rng: &mut R) -> usize
    where
        G: Rewireable,
        B: Blocks<G>,
        P: CorrProb<B::Block>,
        R: Rng,
    {
        let mut edges: Vec<Edge> = graph.edges(G::is_undirected()).collect();
        if edges.is_empty() || self.n_iter == 0 {
            return 0;
        }

        let opts = SweepOpts {
            n_iter: self.n_iter,
            no_sweep: self.no_sweep,
            persist: self.persist,
            self_loops: self.self_loops,
            parallel_edges: self.parallel_edges,
        };
        let mut progress = self.progress.take();
        let mut pcount = 0;

        match self.model {
            RewireModel::Erdos => {
                let strategy = ErdosRewire::new(graph);
                drive(graph, &mut edges, strategy, rng, opts, &mut progress, &mut pcount);
            }
            RewireModel::Uncorrelated => {
                let strategy = UncorrelatedRewire::new::<G>(edges.len());
                drive(graph, &mut edges, strategy, rng, opts, &mut progress, &mut pcount);
            }
            RewireModel::Correlated => {
                let strategy = CorrelatedRewire::new(graph, &edges, &self.blocks);
                drive(graph, &mut edges, strategy, rng, opts, &mut progress, &mut pcount);
            }
            RewireModel::Blockmodel => {
                let strategy =
                    BlockmodelRewire::new(graph, &edges, &self.blocks, &self.corr_prob, self.cache);
                drive(graph, &mut edges, strategy, rng, opts, &mut progress, &mut pcount);
            }
            RewireModel::AliasBlockmodel => {
                let strategy =
                    AliasBlockmodelRewire::new(graph, &edges, &self.blocks, &self.corr_prob);
                drive(graph, &mut edges, strategy, rng, opts, &mut progress, &mut pcount);
            }
            RewireModel::Traditional => {
                let strategy = TradBlockRewire::new(graph, &self.blocks, &self.corr_prob);
                drive(graph, &mut edges, strategy, rng, opts, &mut progress, &mut pcount);
            }
        }

        self.progress = progress;
        pcount
    }
}

/// The sweep/permutation loop shared by all strategies.
fn drive<'a, G, R, S>(
    graph: &mut G,
    edges: &mut [Edge],
    mut strategy: S,
    rng: &mut R,
    opts: SweepOpts,
    progress: &mut Option<Box<dyn FnMut(Progress) + 'a>>,
    pcount: &mut usize,
) where
    R: Rng,
    S: RewireStrategy<G, R>,
{
    let total_steps = if opts.no_sweep { 1 } else { edges.len() };
    let mut order: Vec<usize> = (0..edges.len()).collect();

    for iteration in 0..opts.n_iter {
        order.shuffle(rng);

        // for each edge rewire its target
        for (step, &ei) in order.iter().enumerate() {
            if let Some(observer) = progress.as_mut() {
                observer(Progress {
                    iteration,
                    total_iterations: opts.n_iter,
                    step,
                    total_steps,
                });
            }

            let mut success =
                strategy.propose(graph, edges, ei, opts.self_loops, opts.parallel_edges, rng);
            while opts.persist && !success {
                success =
                    strategy.propose(graph, edges, ei, opts.self_loops, opts.parallel_edges, rng);
            }

            if !success {
                *pcount += 1;
            }

            if opts.no_sweep {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use fxhash::FxHashMap;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::gens::RandomGraph;
    use crate::prelude::*;

    use super::*;

    const DEGREE_PRESERVING: [RewireModel; 4] = [
        RewireModel::Uncorrelated,
        RewireModel::Correlated,
        RewireModel::Blockmodel,
        RewireModel::AliasBlockmodel,
    ];

    fn in_out_degrees<G: GraphDegrees>(g: &G) -> Vec<(NumNodes, NumNodes)> {
        g.vertices().map(|u| g.in_out_degree_of(u)).collect_vec()
    }

    /// Multiset of ordered endpoint-block pairs over all edges.
    fn block_pair_census<G, B>(g: &G, blocks: &B) -> FxHashMap<(B::Block, B::Block), usize>
    where
        G: GraphType + AdjacencyList,
        B: Blocks<G>,
    {
        let mut census = FxHashMap::default();
        for Edge(u, v) in g.edges(G::is_undirected()) {
            *census
                .entry((blocks.block_of(g, u), blocks.block_of(g, v)))
                .or_insert(0usize) += 1;
        }
        census
    }

    fn assert_simple<G: GraphType + AdjacencyList>(g: &G) {
        let edges = g.ordered_edges(G::is_undirected());
        assert_eq!(edges.iter().unique().count(), edges.len(), "parallel edges");
        assert!(edges.iter().all(|e| !e.is_loop()), "self-loops");
    }

    #[test]
    fn zero_iterations_leave_the_graph_untouched() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let g = AdjArray::gnm(rng, 10, 30);

        for model in [
            RewireModel::Erdos,
            RewireModel::Uncorrelated,
            RewireModel::Correlated,
            RewireModel::Blockmodel,
            RewireModel::AliasBlockmodel,
            RewireModel::Traditional,
        ] {
            let mut shuffled = g.clone();
            let failures = Rewiring::new(model).sweeps(0).run(&mut shuffled, rng);

            assert_eq!(failures, 0);
            assert_eq!(shuffled.ordered_edges(false), g.ordered_edges(false));
        }
    }

    #[test]
    fn edgeless_graph_returns_immediately() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let mut g = AdjArray::new(5);

        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .sweeps(10)
            .run(&mut g, rng);

        assert_eq!(failures, 0);
        assert!(g.is_singleton_graph());
    }

    #[test]
    fn single_edge_rejects_every_proposal() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        // with one slot, every partner proposal is the slot itself
        let mut g = AdjArray::from_edges(2, [(0, 1)]);
        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .sweeps(10)
            .run(&mut g, rng);
        assert_eq!(failures, 10);
        assert_eq!(g.ordered_edges(false), vec![Edge(0, 1)]);

        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .steps(7)
            .run(&mut g, rng);
        assert_eq!(failures, 7);
    }

    #[test]
    fn directed_triangle_rejects_every_swap() {
        // swapping the targets of any two edges of a directed 3-cycle
        // would create a self-loop, so all proposals are rejected and
        // the cycle survives with its unit degrees
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let mut g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);

        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .sweeps(1)
            .run(&mut g, rng);

        assert_eq!(failures, 3);
        assert_eq!(g.ordered_edges(false), vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)]);
        for u in 0..3 {
            assert_eq!(g.in_out_degree_of(u), (1, 1));
        }
        assert_simple(&g);
    }

    #[test]
    fn complete_graph_rejects_degree_preserving_swaps() {
        // on a complete simple graph every target swap recreates an
        // existing edge (or a loop), so nothing can move
        let rng = &mut Pcg64Mcg::seed_from_u64(22);
        let n = 4 as NumNodes;
        let all_pairs = (0..n)
            .flat_map(|u| (0..n).filter(move |&v| v != u).map(move |v| Edge(u, v)))
            .collect_vec();
        let mut g = AdjArray::from_edges(n, all_pairs.clone());

        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .sweeps(2)
            .run(&mut g, rng);

        assert_eq!(failures, 2 * all_pairs.len());
        assert_eq!(g.ordered_edges(false), all_pairs);
    }

    #[test]
    fn directed_triangle_with_loops_allowed_keeps_degrees() {
        let rng = &mut Pcg64Mcg::seed_from_u64(21);
        let mut g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);

        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .self_loops(true)
            .persist(true)
            .sweeps(1)
            .run(&mut g, rng);

        assert_eq!(failures, 0);
        assert_eq!(g.number_of_edges(), 3);
        for u in 0..3 {
            assert_eq!(g.in_out_degree_of(u), (1, 1));
        }
    }

    #[test]
    fn four_cycle_correlated_preserves_degree_pairs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let mut g = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
        let census_before = block_pair_census(&g, &DegreeBlocks);

        Rewiring::new(RewireModel::Correlated)
            .sweeps(1000)
            .run(&mut g, rng);

        for u in 0..4 {
            assert_eq!(g.in_out_degree_of(u), (1, 1));
        }
        assert_eq!(block_pair_census(&g, &DegreeBlocks), census_before);
        assert_eq!(census_before[&((1, 1), (1, 1))], 4);
    }

    #[test]
    fn erdos_on_a_path_preserves_the_edge_count() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        let mut g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]);

        Rewiring::new(RewireModel::Erdos).steps(5).run(&mut g, rng);

        assert_eq!(g.number_of_edges(), 4);
        assert_simple(&g);
    }

    #[test]
    fn disjoint_edges_swap_targets_or_stay() {
        for seed in 0..20 {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            let mut g = AdjArray::from_edges(4, [(0, 1), (2, 3)]);

            Rewiring::new(RewireModel::Uncorrelated)
                .steps(1)
                .persist(true)
                .run(&mut g, rng);

            let edges = g.ordered_edges(false);
            assert!(
                edges == vec![Edge(0, 1), Edge(2, 3)] || edges == vec![Edge(0, 3), Edge(2, 1)],
                "{edges:?}"
            );
            assert_eq!(g.in_out_degree_of(0), (0, 1));
            assert_eq!(g.in_out_degree_of(1), (1, 0));
        }
    }

    #[test]
    fn uniform_blockmodel_reduces_to_uncorrelated() {
        // with constant probabilities the Metropolis step always accepts
        // and consumes no randomness, so the trajectories coincide
        for seed in [7u64, 8, 9] {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            let directed = AdjArray::gnm(rng, 20, 60);
            let undirected = AdjArrayUndir::gnm(rng, 20, 60);

            let reference = {
                let mut g = directed.clone();
                let rng = &mut Pcg64Mcg::seed_from_u64(seed + 100);
                Rewiring::new(RewireModel::Uncorrelated)
                    .sweeps(5)
                    .run(&mut g, rng);
                g.ordered_edges(false)
            };

            for cache in [false, true] {
                let mut g = directed.clone();
                let rng = &mut Pcg64Mcg::seed_from_u64(seed + 100);
                Rewiring::new(RewireModel::Blockmodel)
                    .cache(cache)
                    .sweeps(5)
                    .run(&mut g, rng);
                assert_eq!(g.ordered_edges(false), reference);
            }

            let reference = {
                let mut g = undirected.clone();
                let rng = &mut Pcg64Mcg::seed_from_u64(seed + 200);
                Rewiring::new(RewireModel::Uncorrelated)
                    .sweeps(5)
                    .run(&mut g, rng);
                g.ordered_edges(true)
            };

            let mut g = undirected.clone();
            let rng = &mut Pcg64Mcg::seed_from_u64(seed + 200);
            Rewiring::new(RewireModel::Blockmodel)
                .sweeps(5)
                .run(&mut g, rng);
            assert_eq!(g.ordered_edges(true), reference);
        }
    }

    #[test]
    fn alias_blockmodel_drives_edges_intra_block() {
        let rng = &mut Pcg64Mcg::seed_from_u64(10);
        let labels = [0u8, 0, 1, 1];
        let mut g = AdjArray::from_edges(4, [(0, 2), (2, 0), (1, 3), (3, 1)]);

        Rewiring::new(RewireModel::AliasBlockmodel)
            .blocks(PropertyBlocks(&labels))
            .corr_prob(|s: &u8, t: &u8| if s == t { 1.0 } else { 0.0 })
            .sweeps(50)
            .run(&mut g, rng);

        for Edge(u, v) in g.edges(false) {
            assert_eq!(labels[u as usize], labels[v as usize], "({u},{v})");
        }
        for u in 0..4 {
            assert_eq!(g.in_out_degree_of(u), (1, 1));
        }
    }

    #[test]
    fn degree_preserving_models_keep_all_invariants() {
        let corr = |s: &(NumNodes, NumNodes), t: &(NumNodes, NumNodes)| {
            1.0 / (1.0 + (s.1 as f64 - t.0 as f64).abs())
        };

        for model in DEGREE_PRESERVING {
            // Directed
            let rng = &mut Pcg64Mcg::seed_from_u64(11);
            let mut g = AdjArray::gnm(rng, 30, 120);
            let degrees = in_out_degrees(&g);

            Rewiring::new(model).corr_prob(corr).sweeps(5).run(&mut g, rng);

            assert_eq!(g.number_of_edges(), 120, "{model:?}");
            assert_eq!(in_out_degrees(&g), degrees, "{model:?}");
            assert_simple(&g);

            // Undirected
            let rng = &mut Pcg64Mcg::seed_from_u64(12);
            let mut g = AdjArrayUndir::gnm(rng, 30, 90);
            let degrees = in_out_degrees(&g);

            Rewiring::new(model).corr_prob(corr).sweeps(5).run(&mut g, rng);

            assert_eq!(g.number_of_edges(), 90, "{model:?}");
            assert_eq!(in_out_degrees(&g), degrees, "{model:?}");
            assert_simple(&g);
        }
    }

    #[test]
    fn correlated_preserves_the_block_pair_census() {
        let rng = &mut Pcg64Mcg::seed_from_u64(13);
        let labels: Vec<u8> = (0..30).map(|_| rng.random_range(0..3)).collect();
        let mut g = AdjArray::gnm(rng, 30, 120);
        let census = block_pair_census(&g, &PropertyBlocks(&labels));

        Rewiring::new(RewireModel::Correlated)
            .blocks(PropertyBlocks(&labels))
            .sweeps(10)
            .run(&mut g, rng);

        assert_eq!(block_pair_census(&g, &PropertyBlocks(&labels)), census);
    }

    #[test]
    fn non_degree_preserving_models_keep_the_edge_count() {
        let labels: Vec<u8> = (0..20).map(|v| (v % 2) as u8).collect();

        for model in [RewireModel::Erdos, RewireModel::Traditional] {
            for seed in [14u64, 15] {
                let rng = &mut Pcg64Mcg::seed_from_u64(seed);
                let mut g = AdjArray::gnm(rng, 20, 50);

                Rewiring::new(model)
                    .blocks(PropertyBlocks(&labels))
                    .corr_prob(|_: &u8, _: &u8| 1.0)
                    .sweeps(5)
                    .run(&mut g, rng);

                assert_eq!(g.number_of_edges(), 50, "{model:?}");
                assert_simple(&g);
            }
        }
    }

    #[test]
    fn traditional_with_persistence_moves_all_edges_intra_block() {
        let rng = &mut Pcg64Mcg::seed_from_u64(16);
        let labels: Vec<u8> = (0..10).map(|v| (v / 5) as u8).collect();
        let mut g = AdjArray::gnm(rng, 10, 10);

        // zero-probability pairs are never proposed by the traditional
        // sampler, so one persistent sweep moves every edge intra-block
        let failures = Rewiring::new(RewireModel::Traditional)
            .blocks(PropertyBlocks(&labels))
            .corr_prob(|s: &u8, t: &u8| if s == t { 1.0 } else { 0.0 })
            .persist(true)
            .sweeps(1)
            .run(&mut g, rng);

        assert_eq!(failures, 0);
        for Edge(u, v) in g.edges(false) {
            assert_eq!(labels[u as usize], labels[v as usize]);
        }
        assert_simple(&g);
    }

    #[test]
    fn persistence_reports_no_failures() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);
        let mut g = AdjArray::gnm(rng, 20, 60);

        let failures = Rewiring::new(RewireModel::Uncorrelated)
            .persist(true)
            .sweeps(3)
            .run(&mut g, rng);

        assert_eq!(failures, 0);
    }

    #[test]
    fn progress_observer_sees_every_attempt() {
        let rng = &mut Pcg64Mcg::seed_from_u64(18);
        let mut g = AdjArray::gnm(rng, 10, 7);

        let calls = Cell::new(0usize);
        Rewiring::new(RewireModel::Uncorrelated)
            .sweeps(2)
            .on_progress(|p: Progress| {
                assert_eq!(p.total_iterations, 2);
                assert_eq!(p.total_steps, 7);
                assert!(p.iteration < 2 && p.step < 7);
                calls.set(calls.get() + 1);
            })
            .run(&mut g, rng);
        assert_eq!(calls.get(), 14);

        let calls = Cell::new(0usize);
        Rewiring::new(RewireModel::Uncorrelated)
            .steps(5)
            .on_progress(|p: Progress| {
                assert_eq!(p.total_steps, 1);
                assert_eq!(p.step, 0);
                calls.set(calls.get() + 1);
            })
            .run(&mut g, rng);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn loops_and_parallels_survive_when_allowed() {
        let rng = &mut Pcg64Mcg::seed_from_u64(19);
        let mut g = AdjArrayUndir::from_edges(4, [(0, 0), (0, 1), (0, 1), (2, 3)]);
        let degrees = in_out_degrees(&g);

        Rewiring::new(RewireModel::Uncorrelated)
            .self_loops(true)
            .parallel_edges(true)
            .sweeps(10)
            .run(&mut g, rng);

        assert_eq!(g.number_of_edges(), 4);
        assert_eq!(in_out_degrees(&g), degrees);
    }

    #[test]
    fn uncorrelated_mixes_the_edge_set() {
        let rng = &mut Pcg64Mcg::seed_from_u64(20);
        let g = AdjArray::gnm(rng, 30, 120);

        let mut shuffled = g.clone();
        Rewiring::new(RewireModel::Uncorrelated)
            .sweeps(10)
            .run(&mut shuffled, rng);

        // a 120-edge graph shuffled for 10 sweeps shares only few edges
        // with its origin
        let before = g.ordered_edges(false);
        let after = shuffled.ordered_edges(false);
        let shared = before.iter().filter(|e| after.binary_search(e).is_ok()).count();
        assert!(shared < 60, "{shared} of 120 edges unchanged");
    }
}
