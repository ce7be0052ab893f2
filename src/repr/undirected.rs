/*!
# Undirected Graph Representation

An undirected multigraph backed by adjacency arrays.

Every edge `(u, v)` is mirrored into the lists of both `u` and `v`; a
self-loop therefore occupies two entries in the list of its single
endpoint and contributes two to its degree. Parallel edges are
represented by repeated entries.
*/

use std::iter::Copied;
use std::slice::Iter;

use crate::testing::test_graph_repr;

use super::*;

/// An undirected multigraph storing mirrored adjacency arrays.
///
/// - `nbs[u]` lists the opposite endpoint of every edge incidence at
///   `u`; a self-loop contributes two entries.
/// - Neighbor lists are unordered; removal swaps with the last entry.
#[derive(Clone, Default)]
pub struct AdjArrayUndir {
    nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

impl GraphType for AdjArrayUndir {
    type Dir = Undirected;
}

impl GraphNodeOrder for AdjArrayUndir {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjArrayUndir {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl AdjacencyList for AdjArrayUndir {
    type NeighborIter<'a> = Copied<Iter<'a, Node>>;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.nbs[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].len() as NumNodes
    }

    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        let mut loop_entries = 0usize;
        self.neighbors_of(u).filter_map(move |v| {
            if !only_normalized {
                return Some(Edge(u, v));
            }
            if u == v {
                // a self-loop occupies two adjacency entries but is one edge
                loop_entries += 1;
                (loop_entries % 2 == 0).then_some(Edge(u, v))
            } else {
                (u < v).then_some(Edge(u, v))
            }
        })
    }
}

impl GraphDegrees for AdjArrayUndir {
    fn in_out_degree_of(&self, u: Node) -> (NumNodes, NumNodes) {
        let d = self.degree_of(u);
        (d, d)
    }
}

impl AdjacencyTest for AdjArrayUndir {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        assert!(v < self.number_of_nodes());
        self.nbs[u as usize].contains(&v)
    }
}

impl GraphNew for AdjArrayUndir {
    fn new(n: NumNodes) -> Self {
        Self {
            nbs: vec![Vec::new(); n as usize],
            num_edges: 0,
        }
    }
}

impl GraphEdgeEditing for AdjArrayUndir {
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.nbs[u as usize].push(v);
        // a self-loop is mirrored into the same list
        self.nbs[v as usize].push(u);
        self.num_edges += 1;
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        let Some(pos) = self.nbs[u as usize].iter().position(|&w| w == v) else {
            return false;
        };
        self.nbs[u as usize].swap_remove(pos);

        // The mirror entry must exist
        let pos = self.nbs[v as usize].iter().position(|&w| w == u).unwrap();
        self.nbs[v as usize].swap_remove(pos);

        self.num_edges -= 1;
        true
    }
}

test_graph_repr!(
    adj_array_undir_tests,
    AdjArrayUndir,
    true,
    (GraphNew, AdjacencyList, GraphEdgeEditing)
);
