/*!
# Directed Graph Representation

A directed multigraph backed by adjacency arrays.

[`AdjArray`] stores **both outgoing and incoming neighborhoods**, making
in-degree queries O(1) at the cost of mirroring every edit. Parallel
edges are represented by repeated entries in the adjacency lists.
*/

use std::iter::Copied;
use std::slice::Iter;

use crate::testing::test_graph_repr;

use super::*;

/// A directed multigraph storing outgoing and incoming adjacency arrays.
///
/// - `out_nbs[u]` lists the head of every edge leaving `u`.
/// - `in_nbs[v]` lists the tail of every edge entering `v`.
/// - Neighbor lists are unordered; removal swaps with the last entry.
#[derive(Clone, Default)]
pub struct AdjArray {
    out_nbs: Vec<Vec<Node>>,
    in_nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

impl GraphType for AdjArray {
    type Dir = Directed;
}

impl GraphNodeOrder for AdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_nbs.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl AdjacencyList for AdjArray {
    type NeighborIter<'a> = Copied<Iter<'a, Node>>;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.out_nbs[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.out_nbs[u as usize].len() as NumNodes
    }
}

impl DirectedAdjacencyList for AdjArray {
    type InNeighborIter<'a> = Copied<Iter<'a, Node>>;

    fn in_neighbors_of(&self, u: Node) -> Self::InNeighborIter<'_> {
        self.in_nbs[u as usize].iter().copied()
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_nbs[u as usize].len() as NumNodes
    }
}

impl GraphDegrees for AdjArray {
    fn in_out_degree_of(&self, u: Node) -> (NumNodes, NumNodes) {
        (self.in_degree_of(u), self.out_degree_of(u))
    }
}

impl AdjacencyTest for AdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        assert!(v < self.number_of_nodes());
        self.out_nbs[u as usize].contains(&v)
    }
}

impl GraphNew for AdjArray {
    fn new(n: NumNodes) -> Self {
        Self {
            out_nbs: vec![Vec::new(); n as usize],
            in_nbs: vec![Vec::new(); n as usize],
            num_edges: 0,
        }
    }
}

impl GraphEdgeEditing for AdjArray {
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.out_nbs[u as usize].push(v);
        self.in_nbs[v as usize].push(u);
        self.num_edges += 1;
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        let out = &mut self.out_nbs[u as usize];
        let Some(pos) = out.iter().position(|&w| w == v) else {
            return false;
        };
        out.swap_remove(pos);

        let inn = &mut self.in_nbs[v as usize];
        // The mirror entry must exist
        let pos = inn.iter().position(|&w| w == u).unwrap();
        inn.swap_remove(pos);

        self.num_edges -= 1;
        true
    }
}

test_graph_repr!(
    adj_array_tests,
    AdjArray,
    false,
    (GraphNew, AdjacencyList, DirectedAdjacencyList, GraphEdgeEditing)
);
