/*!
# Edge Slots and the Target-Swap Primitive

The engine addresses edges through a stable **slot table**: a
`Vec<Edge>` snapshot in which slot `i` keeps identifying the same edge
across rewiring moves, while the edge stored in the slot changes.

An [`EdgeRef`] is a slot index plus an orientation flip. Flipping is
meaningful only for undirected graphs, where it lets one edge appear
under both orientations in endpoint-indexed tables.

[`swap_target`] exchanges the targets of two slots. Because exactly the
targets are swapped, every endpoint keeps its degree (in and out,
directed or undirected) — this single primitive underlies all
degree-preserving moves.
*/

use crate::{edge::*, node::*, ops::*};

use rand::Rng;

/// Reference to an edge slot under a chosen orientation.
///
/// For directed graphs `flipped` is always `false`. For undirected
/// graphs, `flipped == true` reads the slot's edge with its endpoints
/// exchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EdgeRef {
    pub slot: usize,
    pub flipped: bool,
}

impl EdgeRef {
    /// References slot `slot` in its stored orientation.
    #[inline(always)]
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            flipped: false,
        }
    }

    /// References slot `slot` with endpoints exchanged.
    #[inline(always)]
    pub fn reversed(slot: usize) -> Self {
        Self {
            slot,
            flipped: true,
        }
    }

    /// Source of the referenced edge under this orientation.
    #[inline(always)]
    pub fn src(&self, edges: &[Edge]) -> Node {
        let Edge(u, v) = edges[self.slot];
        if self.flipped {
            v
        } else {
            u
        }
    }

    /// Target of the referenced edge under this orientation.
    #[inline(always)]
    pub fn dst(&self, edges: &[Edge]) -> Node {
        let Edge(u, v) = edges[self.slot];
        if self.flipped {
            u
        } else {
            v
        }
    }
}

/// Checks whether swapping the target of slot `e` with the target of
/// `te` would introduce a parallel edge.
///
/// We want to check that if we swap the target of `e` with the target of
/// `te`, as such
///
/// ```text
///  (s)    -e--> (t)          (s)    -e--> (nt)
///  (te_s) -te-> (nt)   =>    (te_s) -te-> (t)
/// ```
///
/// no parallel edges are introduced. Adjacency is checked in the current
/// graph state, i.e. with both old edges still present.
pub(crate) fn parallel_conflict<G>(g: &G, edges: &[Edge], e: usize, te: EdgeRef) -> bool
where
    G: AdjacencyTest,
{
    let Edge(s, t) = edges[e]; // current source and target
    let nt = te.dst(edges); // new target
    let te_s = te.src(edges); // target edge source

    // e would clash with an existing edge, or te would
    g.has_edge(s, nt) || g.has_edge(te_s, t)
}

/// Swaps the target of slot `e` with the target of `te`:
///
/// ```text
///  (s)    -e--> (t)          (s)    -e--> (nt)
///  (te_s) -te-> (nt)   =>    (te_s) -te-> (t)
/// ```
///
/// Both old edges are removed from the graph, the two new edges are
/// added, and the slot table is updated accordingly. If `te` is flipped
/// (undirected graphs only), the replacement for its slot is stored as
/// `(t, te_s)` to keep the slot's original endpoint ordering convention.
///
/// No-op if `e == te.slot`.
pub(crate) fn swap_target<G>(g: &mut G, edges: &mut [Edge], e: usize, te: EdgeRef)
where
    G: GraphEdgeEditing,
{
    if e == te.slot {
        return;
    }

    let Edge(s_e, t_e) = edges[e];
    let s_te = te.src(edges);
    let t_te = te.dst(edges);

    g.remove_edge(s_e, t_e);
    let Edge(u, v) = edges[te.slot];
    g.remove_edge(u, v);

    g.add_edge(s_e, t_te);
    edges[e] = Edge(s_e, t_te);

    let ne = if te.flipped {
        // keep invertedness (only for undirected graphs)
        Edge(t_e, s_te)
    } else {
        Edge(s_te, t_e)
    };
    g.add_edge(ne.0, ne.1);
    edges[te.slot] = ne;
}

/// The common proposal procedure shared by all edge-pair strategies.
///
/// A strategy only decides **where to sample the partner edge from**
/// ([`EdgePairStrategy::get_target_edge`]) and how to maintain its
/// internal indices across a swap ([`EdgePairStrategy::update_edge`]);
/// the provided [`EdgePairStrategy::propose_swap`] performs the
/// constraint checks and the swap itself.
///
/// The swap is bracketed by remove/insert calls to `update_edge` so that
/// strategies maintaining endpoint-indexed edge buckets observe both the
/// pre- and the post-swap state.
pub(crate) trait EdgePairStrategy<G, R>
where
    G: AdjacencyTest + GraphEdgeEditing,
    R: Rng,
{
    /// Samples the partner edge for a proposed swap with slot `ei`.
    ///
    /// Returning a reference to `ei` itself signals rejection.
    fn get_target_edge(&mut self, g: &G, edges: &[Edge], ei: usize, rng: &mut R) -> EdgeRef;

    /// Observes the removal (`inserting == false`, called before the
    /// swap) or insertion (`inserting == true`, called after) of the
    /// edge in slot `ei`.
    fn update_edge(&mut self, g: &G, edges: &[Edge], ei: usize, inserting: bool) {
        let _ = (g, edges, ei, inserting);
    }

    /// Attempts one rewiring move for slot `ei`. Returns `true` on an
    /// accepted (and applied) move.
    fn propose_swap(
        &mut self,
        g: &mut G,
        edges: &mut [Edge],
        ei: usize,
        self_loops: bool,
        parallel_edges: bool,
        rng: &mut R,
    ) -> bool {
        let te = self.get_target_edge(g, edges, ei, rng);

        // reject self-loops if not allowed
        if !self_loops {
            let Edge(s, t) = edges[ei];
            if s == te.dst(edges) || t == te.src(edges) {
                return false;
            }
        }

        // reject parallel edges if not allowed
        if !parallel_edges && te.slot != ei && parallel_conflict(g, edges, ei, te) {
            return false;
        }

        // no-op proposals count as rejections
        if ei == te.slot {
            return false;
        }

        self.update_edge(g, edges, ei, false);
        self.update_edge(g, edges, te.slot, false);

        swap_target(g, edges, ei, te);

        self.update_edge(g, edges, ei, true);
        self.update_edge(g, edges, te.slot, true);

        true
    }
}
