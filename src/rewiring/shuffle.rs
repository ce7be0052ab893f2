/*!
# Degree-Agnostic and Degree-Preserving Shuffles

The three strategies in this module need no correlation probabilities:

- [`ErdosRewire`] resamples both endpoints uniformly, producing a fully
  random graph with the same number of edges.
- [`UncorrelatedRewire`] swaps targets of uniformly sampled edge pairs,
  preserving every in- and out-degree.
- [`CorrelatedRewire`] additionally preserves the joint distribution of
  endpoint blocks by restricting partners to edges whose target lies in
  the same block.
*/

use fxhash::FxHashMap;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};
use std::hash::Hash;

use crate::{edge::*, node::*, ops::*};

use super::blocks::Blocks;
use super::swap::{EdgePairStrategy, EdgeRef};
use super::RewireStrategy;

/// Rewires each visited edge onto a uniformly random vertex pair.
///
/// Degrees are not preserved; the result is a uniform graph with the
/// original number of edges, subject to the loop/parallel constraints.
pub(crate) struct ErdosRewire {
    nodes: Uniform<Node>,
}

impl ErdosRewire {
    pub(crate) fn new<G>(g: &G) -> Self
    where
        G: GraphNodeOrder,
    {
        Self {
            nodes: Uniform::new(0, g.number_of_nodes()).unwrap(),
        }
    }
}

impl<G, R> RewireStrategy<G, R> for ErdosRewire
where
    G: AdjacencyTest + GraphEdgeEditing,
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
        // try randomly drawn pairs of vertices
        let (s, t) = loop {
            let s = self.nodes.sample(rng);
            let t = self.nodes.sample(rng);

            // reject self-loops if not allowed
            if s == t && !self_loops {
                continue;
            }
            break (s, t);
        };

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

/// Swaps the target of the visited edge with the target of a uniformly
/// sampled partner edge.
///
/// Produces a uniform sample of the configuration model with the given
/// degree sequence, restricted by the loop/parallel constraints.
pub(crate) struct UncorrelatedRewire {
    slots: Uniform<usize>,
    orientation: Option<Bernoulli>,
}

impl UncorrelatedRewire {
    pub(crate) fn new<G>(num_slots: usize) -> Self
    where
        G: GraphType,
    {
        Self {
            slots: Uniform::new(0, num_slots).unwrap(),
            // for undirected graphs we must select a random orientation
            orientation: G::is_undirected().then(|| Bernoulli::new(0.5).unwrap()),
        }
    }
}

impl<G, R> EdgePairStrategy<G, R> for UncorrelatedRewire
where
    G: AdjacencyTest + GraphEdgeEditing,
    R: Rng,
{
    fn get_target_edge(&mut self, _g: &G, _edges: &[Edge], _ei: usize, rng: &mut R) -> EdgeRef {
        EdgeRef {
            slot: self.slots.sample(rng),
            flipped: self.orientation.as_ref().is_some_and(|coin| coin.sample(rng)),
        }
    }
}

impl<G, R> RewireStrategy<G, R> for UncorrelatedRewire
where
    G: AdjacencyTest + GraphEdgeEditing,
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

/// Swaps targets only between edges whose targets lie in the same block,
/// preserving the multiset of endpoint block pairs.
///
/// At construction every slot is indexed under the block of its target;
/// for undirected graphs the reversed orientation is additionally indexed
/// under the block of its source. Because a target swap exchanges the
/// target blocks of the two slots, the buckets stay valid without
/// updates.
pub(crate) struct CorrelatedRewire<'a, B, K> {
    blocks: &'a B,
    buckets: FxHashMap<K, Vec<EdgeRef>>,
}

impl<'a, B, K> CorrelatedRewire<'a, B, K>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new<G>(g: &G, edges: &[Edge], blocks: &'a B) -> Self
    where
        G: GraphType,
        B: Blocks<G, Block = K>,
    {
        let mut buckets: FxHashMap<K, Vec<EdgeRef>> = FxHashMap::default();

        for (ei, &Edge(u, v)) in edges.iter().enumerate() {
            buckets
                .entry(blocks.block_of(g, v))
                .or_default()
                .push(EdgeRef::new(ei));

            // For undirected graphs there is no difference between source
            // and target: each slot is indexed twice, once per
            // orientation.
            if G::is_undirected() {
                buckets
                    .entry(blocks.block_of(g, u))
                    .or_default()
                    .push(EdgeRef::reversed(ei));
            }
        }

        Self { blocks, buckets }
    }
}

impl<G, R, B, K> EdgePairStrategy<G, R> for CorrelatedRewire<'_, B, K>
where
    G: AdjacencyTest + GraphEdgeEditing + GraphType,
    B: Blocks<G, Block = K>,
    K: Clone + Eq + Hash,
    R: Rng,
{
    fn get_target_edge(&mut self, g: &G, edges: &[Edge], ei: usize, rng: &mut R) -> EdgeRef {
        // the bucket of the own target block is never empty: it contains
        // at least the visited slot itself
        let bucket = &self.buckets[&self.blocks.block_of(g, edges[ei].target())];
        bucket[rng.random_range(0..bucket.len())]
    }
}

impl<G, R, B, K> RewireStrategy<G, R> for CorrelatedRewire<'_, B, K>
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
