/*!
# Stochastic-Blockmodel Strategies

The strategies in this module rewire towards the ensemble in which an
edge between blocks `(s, t)` carries relative probability
`corr_prob(s, t)`, i.e. the stationary distribution is proportional to
the product of `corr_prob` over all edges.

- [`BlockmodelRewire`] proposes uniform edge pairs and applies a
  Metropolis–Hastings correction (rejection sampling).
- [`AliasBlockmodelRewire`] proposes the partner's target block through a
  per-source-block alias sampler and picks a concrete partner from
  incrementally maintained block-indexed edge buckets; the same
  Metropolis ratio corrects for the non-uniform proposal. Degrees are
  preserved.
- [`TradBlockRewire`] samples a block pair and fresh endpoints directly,
  without preserving degrees.

The first two sanitize probabilities with [`positive_prob`]: an exact
zero would make rejection permanent and stall persistence mode, so zeros
are raised to the smallest positive value. [`TradBlockRewire`] keeps
zeros ([`clamped_prob`]), as its sampler simply never selects such pairs.
*/

use std::hash::Hash;

use fxhash::FxHashMap;
use itertools::Itertools;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};

use crate::{edge::*, node::*, ops::*, utils::Sampler};

use super::blocks::{clamped_prob, positive_prob, Blocks, CorrProb};
use super::swap::{EdgePairStrategy, EdgeRef};
use super::RewireStrategy;

/// Metropolis–Hastings acceptance for moving from a state of weight `pi`
/// to one of weight `pf` under a symmetric proposal kernel.
fn metropolis_accept<R: Rng>(rng: &mut R, pi: f64, pf: f64) -> bool {
    if pf >= pi {
        return true;
    }
    if pf == 0.0 {
        return false;
    }
    rng.random::<f64>() < pf / pi
}

/// Collects the distinct blocks appearing among edge endpoints, in
/// first-seen order.
fn endpoint_blocks<G, B, K>(g: &G, edges: &[Edge], blocks: &B) -> Vec<K>
where
    B: Blocks<G, Block = K>,
    K: Clone + Eq + Hash,
{
    edges
        .iter()
        .flat_map(|&Edge(u, v)| [blocks.block_of(g, u), blocks.block_of(g, v)])
        .unique()
        .collect()
}

/// Rejection-sampled stochastic blockmodel.
///
/// Partner edges are proposed uniformly; the move is accepted with the
/// Metropolis ratio of the edge-probability products before and after
/// the swap. With `cache == true` all block-pair probabilities are
/// materialized at construction.
pub(crate) struct BlockmodelRewire<'a, B, K, P> {
    blocks: &'a B,
    corr_prob: &'a P,
    probs: Option<FxHashMap<(K, K), f64>>,
    slots: Uniform<usize>,
    orientation: Option<Bernoulli>,
}

impl<'a, B, K, P> BlockmodelRewire<'a, B, K, P>
where
    K: Clone + Eq + Hash,
    P: CorrProb<K>,
{
    pub(crate) fn new<G>(
        g: &G,
        edges: &[Edge],
        blocks: &'a B,
        corr_prob: &'a P,
        cache: bool,
    ) -> Self
    where
        G: GraphType,
        B: Blocks<G, Block = K>,
        P: CorrProb<K>,
    {
        let probs = cache.then(|| {
            let deg_set = endpoint_blocks(g, edges, blocks);
            deg_set
                .iter()
                .cartesian_product(deg_set.iter())
                .map(|(s, t)| {
                    (
                        (s.clone(), t.clone()),
                        positive_prob(corr_prob.prob(s, t)),
                    )
                })
                .collect()
        });

        Self {
            blocks,
            corr_prob,
            probs,
            slots: Uniform::new(0, edges.len()).unwrap(),
            // for undirected graphs we must select a random orientation
            orientation: G::is_undirected().then(|| Bernoulli::new(0.5).unwrap()),
        }
    }

    fn prob(&self, s: &K, t: &K) -> f64 {
        if let Some(probs) = &self.probs {
            if let Some(&p) = probs.get(&(s.clone(), t.clone())) {
                return p;
            }
        }
        positive_prob(self.corr_prob.prob(s, t))
    }
}

impl<G, R, B, K, P> EdgePairStrategy<G, R> for BlockmodelRewire<'_, B, K, P>
where
    G: AdjacencyTest + GraphEdgeEditing,
    B: Blocks<G, Block = K>,
    K: Clone + Eq + Hash,
    P: CorrProb<K>,
    R: Rng,
{
    fn get_target_edge(&mut self, g: &G, edges: &[Edge], ei: usize, rng: &mut R) -> EdgeRef {
        let Edge(s, t) = edges[ei];
        let s_deg = self.blocks.block_of(g, s);
        let t_deg = self.blocks.block_of(g, t);

        let ep = EdgeRef {
            slot: self.slots.sample(rng),
            flipped: self.orientation.as_ref().is_some_and(|coin| coin.sample(rng)),
        };

        let ep_s_deg = self.blocks.block_of(g, ep.src(edges));
        let ep_t_deg = self.blocks.block_of(g, ep.dst(edges));

        let pi = self.prob(&s_deg, &t_deg) * self.prob(&ep_s_deg, &ep_t_deg);
        let pf = self.prob(&s_deg, &ep_t_deg) * self.prob(&ep_s_deg, &t_deg);

        if metropolis_accept(rng, pi, pf) {
            ep
        } else {
            EdgeRef::new(ei) // reject
        }
    }
}

impl<G, R, B, K, P> RewireStrategy<G, R> for BlockmodelRewire<'_, B, K, P>
where
    G: AdjacencyTest + GraphEdgeEditing,
    B: Blocks<G, Block = K>,
    K: Clone + Eq + Hash,
    P: CorrProb<K>,
    R: Rng,
{
    fn propose(
        &mut self,
        g: &mut G,
        edges: &mut [Edge],
        ei: usize,
        self_loops: bool,
        parallel_edges: bool,
        rng: &mut R,
    ) -> bool {
        self.propose_swap(g, edges, ei, self_loops, parallel_edges, rng)
    }
}

/// Degree-corrected stochastic blockmodel with alias-sampled proposals.
///
/// For every source block an alias sampler over all target blocks is
/// built once; a proposal first draws the partner's target block in
/// O(1), then a concrete partner slot from the block-indexed edge
/// buckets. The buckets are kept exactly in sync with the edge set by
/// the remove/insert hooks around every swap (swap-and-pop via position
/// tables).
pub(crate) struct AliasBlockmodelRewire<'a, B, K> {
    blocks: &'a B,
    samplers: FxHashMap<K, Sampler<K>>,
    probs: FxHashMap<(K, K), f64>,
    in_edges: FxHashMap<K, Vec<usize>>,
    out_edges: FxHashMap<K, Vec<usize>>,
    in_pos: Vec<usize>,
    out_pos: Vec<usize>,
}

impl<'a, B, K> AliasBlockmodelRewire<'a, B, K>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new<G, P>(g: &G, edges: &[Edge], blocks: &'a B, corr_prob: &P) -> Self
    where
        G: GraphType,
        B: Blocks<G, Block = K>,
        P: CorrProb<K>,
    {
        let items = endpoint_blocks(g, edges, blocks);

        let mut samplers = FxHashMap::default();
        let mut probs = FxHashMap::default();
        for s in &items {
            let weights = items
                .iter()
                .map(|t| {
                    let p = positive_prob(corr_prob.prob(s, t));
                    probs.insert((s.clone(), t.clone()), p);
                    p
                })
                .collect_vec();

            samplers.insert(s.clone(), Sampler::new(items.clone(), &weights));
        }

        let mut in_edges: FxHashMap<K, Vec<usize>> = FxHashMap::default();
        let mut out_edges: FxHashMap<K, Vec<usize>> = FxHashMap::default();
        let mut in_pos = vec![0usize; edges.len()];
        let mut out_pos = vec![0usize; if G::is_undirected() { edges.len() } else { 0 }];

        for (i, &Edge(u, v)) in edges.iter().enumerate() {
            let list = in_edges.entry(blocks.block_of(g, v)).or_default();
            list.push(i);
            in_pos[i] = list.len() - 1;

            if G::is_undirected() {
                let list = out_edges.entry(blocks.block_of(g, u)).or_default();
                list.push(i);
                out_pos[i] = list.len() - 1;
            }
        }

        Self {
            blocks,
            samplers,
            probs,
            in_edges,
            out_edges,
            in_pos,
            out_pos,
        }
    }
}

impl<G, R, B, K> EdgePairStrategy<G, R> for AliasBlockmodelRewire<'_, B, K>
where
    G: AdjacencyTest + GraphEdgeEditing + GraphType,
    B: Blocks<G, Block = K>,
    K: Clone + Eq + Hash,
    R: Rng,
{
    fn get_target_edge(&mut self, g: &G, edges: &[Edge], ei: usize, rng: &mut R) -> EdgeRef {
        let Edge(s, t) = edges[ei];
        let s_deg = self.blocks.block_of(g, s);
        let t_deg = self.blocks.block_of(g, t);

        // O(1) draw of the new target block
        let nt = self.samplers[&s_deg].sample(rng).clone();

        let n_in = self.in_edges.get(&nt).map_or(0, |l| l.len());
        let ep = if G::is_directed() {
            if n_in == 0 {
                return EdgeRef::new(ei); // no edge carries this block: reject
            }
            let ies = &self.in_edges[&nt];
            EdgeRef::new(ies[rng.random_range(0..ies.len())])
        } else {
            let n_out = self.out_edges.get(&nt).map_or(0, |l| l.len());
            if n_in + n_out == 0 {
                return EdgeRef::new(ei); // no orientation carries this block: reject
            }

            if rng.random_bool(n_in as f64 / (n_in + n_out) as f64) {
                let ies = &self.in_edges[&nt];
                EdgeRef::new(ies[rng.random_range(0..ies.len())])
            } else {
                let oes = &self.out_edges[&nt];
                EdgeRef::reversed(oes[rng.random_range(0..oes.len())])
            }
        };

        let ep_s_deg = self.blocks.block_of(g, ep.src(edges));
        let ep_t_deg = self.blocks.block_of(g, ep.dst(edges));

        // The non-uniform proposal kernel is symmetric between the two
        // orientations of the move, so the plain probability ratio is the
        // correct Metropolis correction.
        let pi = self.probs[&(s_deg.clone(), t_deg.clone())]
            * self.probs[&(ep_s_deg.clone(), ep_t_deg.clone())];
        let pf = self.probs[&(s_deg, ep_t_deg)] * self.probs[&(ep_s_deg, t_deg)];

        if metropolis_accept(rng, pi, pf) {
            ep
        } else {
            EdgeRef::new(ei) // reject
        }
    }

    fn update_edge(&mut self, g: &G, edges: &[Edge], ei: usize, inserting: bool) {
        let Edge(u, v) = edges[ei];

        if inserting {
            let list = self.in_edges.entry(self.blocks.block_of(g, v)).or_default();
            list.push(ei);
            self.in_pos[ei] = list.len() - 1;

            if G::is_undirected() {
                let list = self.out_edges.entry(self.blocks.block_of(g, u)).or_default();
                list.push(ei);
                self.out_pos[ei] = list.len() - 1;
            }
        } else {
            let list = self.in_edges.get_mut(&self.blocks.block_of(g, v)).unwrap();
            let j = self.in_pos[ei];
            // the position table always points at the slot's bucket entry
            debug_assert_eq!(list[j], ei);
            let last = *list.last().unwrap();
            list[j] = last;
            self.in_pos[last] = j;
            list.pop();

            if G::is_undirected() {
                let list = self.out_edges.get_mut(&self.blocks.block_of(g, u)).unwrap();
                let j = self.out_pos[ei];
                debug_assert_eq!(list[j], ei);
                let last = *list.last().unwrap();
                list[j] = last;
                self.out_pos[last] = j;
                list.pop();
            }
        }
    }
}

impl<G, R, B, K> RewireStrategy<G, R> for AliasBlockmodelRewire<'_, B, K>
where
    G: AdjacencyTest + GraphEdgeEditing + GraphType,
    B: Blocks<G, Block = K>,
    K: Clone + Eq + Hash,
    R: Rng,
{
    fn propose(
        &mut self,
        g: &mut G,
        edges: &mut [Edge],
        ei: usize,
        self_loops: bool,
        parallel_edges: bool,
        rng: &mut R,
    ) -> bool {
        self.propose_swap(g, edges, ei, self_loops, parallel_edges, rng)
    }
}

/// Traditional stochastic blockmodel: resamples both endpoints of the
/// visited edge from an alias-sampled block pair.
///
/// Degrees are not preserved. Block pairs with zero probability are
/// simply never drawn, so no zero-raising is applied here.
pub(crate) struct TradBlockRewire<K> {
    vertices: FxHashMap<K, Vec<Node>>,
    sampler: Sampler<(K, K)>,
}

impl<K> TradBlockRewire<K>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new<G, B, P>(g: &G, blocks: &B, corr_prob: &P) -> Self
    where
        G: GraphNodeOrder,
        B: Blocks<G, Block = K>,
        P: CorrProb<K>,
    {
        let mut vertices: FxHashMap<K, Vec<Node>> = FxHashMap::default();
        for v in g.vertices() {
            vertices.entry(blocks.block_of(g, v)).or_default().push(v);
        }

        let keys = g
            .vertices()
            .map(|v| blocks.block_of(g, v))
            .unique()
            .collect_vec();

        let (items, weights): (Vec<_>, Vec<_>) = keys
            .iter()
            .cartesian_product(keys.iter())
            .map(|(s, t)| ((s.clone(), t.clone()), clamped_prob(corr_prob.prob(s, t))))
            .unzip();

        Self {
            vertices,
            sampler: Sampler::new(items, &weights),
        }
    }
}

impl<G, R, K> RewireStrategy<G, R> for TradBlockRewire<K>
where
    G: AdjacencyTest + GraphEdgeEditing,
    K: Clone + Eq + Hash,
    R: Rng,
{
    fn propose(
        &mut self,
        g: &mut G,
        edges: &mut [Edge],
        ei: usize,
        self_loops: bool,
        parallel_edges: bool,
        rng: &mut R,
    ) -> bool {
        let (bs, bt) = self.sampler.sample(rng);

        let svs = &self.vertices[bs];
        let tvs = &self.vertices[bt];
        let s = svs[rng.random_range(0..svs.len())];
        let t = tvs[rng.random_range(0..tvs.len())];

        // reject self-loops if not allowed
        if !self_loops && s == t {
            return false;
        }

        // reject parallel edges if not allowed
        if !parallel_edges && g.has_edge(s, t) {
            return false;
        }

        let Edge(u, v) = edges[ei];
        g.remove_edge(u, v);
        g.add_edge(s, t);
        edges[ei] = Edge(s, t);

        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::prelude::*;
    use crate::rewiring::blocks::{DegreeBlocks, UniformProb};

    use super::*;

    #[test]
    fn metropolis_acceptance_bounds() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for _ in 0..100 {
            assert!(metropolis_accept(rng, 0.3, 0.3));
            assert!(metropolis_accept(rng, 0.3, 0.9));
            assert!(!metropolis_accept(rng, 0.3, 0.0));
        }

        // ratio 1/2: accepted roughly half of the time
        let accepted = (0..10_000)
            .filter(|_| metropolis_accept(rng, 1.0, 0.5))
            .count();
        assert!((4_000..6_000).contains(&accepted));
    }

    /// Reconstructs the expected bucket contents from the current edge
    /// table and compares them against the strategy's incremental state.
    fn assert_buckets_consistent<G>(
        g: &G,
        edges: &[Edge],
        strategy: &AliasBlockmodelRewire<'_, DegreeBlocks, (NumNodes, NumNodes)>,
    ) where
        G: GraphType + GraphDegrees,
    {
        let mut in_edges: FxHashMap<(NumNodes, NumNodes), Vec<usize>> = FxHashMap::default();
        let mut out_edges: FxHashMap<(NumNodes, NumNodes), Vec<usize>> = FxHashMap::default();
        for (i, &Edge(u, v)) in edges.iter().enumerate() {
            in_edges.entry(g.in_out_degree_of(v)).or_default().push(i);
            if G::is_undirected() {
                out_edges.entry(g.in_out_degree_of(u)).or_default().push(i);
            }
        }

        for (block, expected) in &mut in_edges {
            let mut actual = strategy.in_edges[block].clone();
            actual.sort_unstable();
            expected.sort_unstable();
            assert_eq!(actual, *expected, "in-bucket of block {block:?}");
            for &slot in expected.iter() {
                assert_eq!(strategy.in_edges[block][strategy.in_pos[slot]], slot);
            }
        }
        assert_eq!(
            strategy.in_edges.values().map(|l| l.len()).sum::<usize>(),
            edges.len()
        );

        for (block, expected) in &mut out_edges {
            let mut actual = strategy.out_edges[block].clone();
            actual.sort_unstable();
            expected.sort_unstable();
            assert_eq!(actual, *expected, "out-bucket of block {block:?}");
            for &slot in expected.iter() {
                assert_eq!(strategy.out_edges[block][strategy.out_pos[slot]], slot);
            }
        }
    }

    fn bucket_maintenance<G: GraphType + GraphDegrees + AdjacencyTest + GraphEdgeEditing>(
        mut g: G,
        seed: u64,
    ) {
        let rng = &mut Pcg64Mcg::seed_from_u64(seed);
        let mut edges = g.edges(G::is_undirected()).collect_vec();

        let blocks = DegreeBlocks;
        let mut strategy = AliasBlockmodelRewire::new(&g, &edges, &blocks, &UniformProb);

        for round in 0..500 {
            let ei = rng.random_range(0..edges.len());
            strategy.propose_swap(&mut g, &mut edges, ei, false, false, rng);

            if round % 50 == 0 {
                assert_buckets_consistent(&g, &edges, &strategy);
            }
        }
        assert_buckets_consistent(&g, &edges, &strategy);
    }

    #[test]
    fn directed_bucket_maintenance() {
        use crate::gens::RandomGraph;
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        bucket_maintenance(AdjArray::gnm(rng, 20, 60), 6);
    }

    #[test]
    fn undirected_bucket_maintenance() {
        use crate::gens::RandomGraph;
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        bucket_maintenance(AdjArrayUndir::gnm(rng, 20, 60), 8);
    }
}
