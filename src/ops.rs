/*!
# Graph Operations

Core graph traits and operations.

This module defines the **fundamental traits** that all graph
representations in `rewire` implement. It covers:
- **Graph type metadata** ([`GraphType`], [`GraphDir`], [`GraphDirection`]).
- **Node and edge counts** ([`GraphNodeOrder`], [`GraphEdgeOrder`]).
- **Neighborhood access** ([`AdjacencyList`], [`DirectedAdjacencyList`], [`GraphDegrees`]).
- **Edge testing and editing** ([`AdjacencyTest`], [`GraphEdgeEditing`]).

All editing traits use **multigraph** semantics: `add_edge` appends a new
occurrence of an edge (even if an equal edge already exists) and
`remove_edge` removes exactly one occurrence. Simple graphs are the
special case in which no edge occurs twice.

# Examples
```
use rewire::prelude::*;

// Build an undirected triangle graph
let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2), (2, 0)]);

assert_eq!(g.number_of_nodes(), 3);
assert_eq!(g.number_of_edges(), 3);
assert!(g.has_edge(0, 1));
assert!(g.has_edge(1, 0)); // undirected
```
*/

use std::ops::Range;

use itertools::Itertools;

use super::{edge::*, node::*};

/// Whether a graph is `Directed` or `Undirected`.
///
/// Used by [`GraphType`] to specialize behavior.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GraphDirection {
    Directed,
    Undirected,
}

/// Marker type representing a directed graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Directed;

/// Marker type representing an undirected graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Undirected;

/// Trait implemented by [`Directed`] and [`Undirected`].
///
/// Provides a compile-time constant [`GraphDirection`].
pub trait GraphDir {
    const DIRECTION: GraphDirection;
}

impl GraphDir for Directed {
    const DIRECTION: GraphDirection = GraphDirection::Directed;
}

impl GraphDir for Undirected {
    const DIRECTION: GraphDirection = GraphDirection::Undirected;
}

/// Identifies whether a graph is directed or undirected.
///
/// Every graph representation **must implement this trait**.
/// Algorithms use it to branch on orientation handling.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// assert!(AdjArrayUndir::is_undirected());
/// assert!(AdjArray::is_directed());
/// ```
pub trait GraphType {
    /// Getter for graph direction.
    /// As `#![feature(associated_const_equality)]` is not stable yet,
    /// this allows for selective implementations of algorithms
    /// that are only meant for directed/undirected graphs.
    type Dir: GraphDir;

    /// Returns *true* if the graph is directed
    #[inline(always)]
    fn is_directed() -> bool {
        Self::Dir::DIRECTION == GraphDirection::Directed
    }

    /// Returns *true* if the graph is undirected
    #[inline(always)]
    fn is_undirected() -> bool {
        Self::Dir::DIRECTION == GraphDirection::Undirected
    }
}

/// Provides accessors related to the number of nodes.
///
/// Nodes are always the contiguous range `0..n`.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
/// assert_eq!(g.number_of_nodes(), 3);
/// assert_eq!(g.len(), 3);
/// assert_eq!(g.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
pub trait GraphNodeOrder {
    /// Returns the number of nodes in the graph.
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns the number of nodes as a `usize`.
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over all nodes in the graph.
    ///
    /// This does not borrow `self` beyond the call and can be used where
    /// additional mutable references are needed.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns `true` if the graph has no nodes (and therefore no edges).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides accessors related to the number of edges.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
/// assert_eq!(g.number_of_edges(), 2);
/// assert!(!g.is_singleton_graph());
/// ```
pub trait GraphEdgeOrder {
    /// Returns the number of edges in the graph, counting parallel edges
    /// with their multiplicity.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns `true` if the graph has no edges.
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Trait providing access to neighborhoods and edges.
///
/// Implemented by both directed and undirected graphs.
/// For directed graphs, `neighbors_of(u)` corresponds to outgoing
/// neighbors. A neighbor appears once per parallel edge.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
///
/// assert_eq!(g.degree_of(1), 2);
/// assert_eq!(g.neighbors_of(1).collect::<Vec<_>>(), vec![0, 2]);
///
/// let edges: Vec<_> = g.edges(true).collect();
/// assert_eq!(edges.len(), 2); // normalized edges only
/// ```
pub trait AdjacencyList: GraphNodeOrder + GraphEdgeOrder + Sized {
    /// Iterator over all neighbors of a vertex in the graph.
    ///
    /// Returned by [`AdjacencyList::neighbors_of`].
    type NeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the neighborhood of a given vertex,
    /// with parallel neighbors repeated per occurrence.
    ///
    /// **Panics if `u >= n`.**
    ///
    /// Note: For directed graphs, this is equivalent to `out_neighbors_of`.
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns the number of adjacency entries at a vertex (its degree).
    ///
    /// Parallel edges count with multiplicity. A self-loop counts once
    /// in directed graphs (one outgoing entry) and twice in undirected
    /// graphs (both incidences).
    ///
    /// **Panics if `u >= n`.**
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degree of each vertex in the graph.
    ///
    /// # Examples
    /// ```
    /// use rewire::prelude::*;
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    /// assert_eq!(g.degrees().collect::<Vec<_>>(), vec![1, 2, 1]);
    /// ```
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree among all vertices.
    ///
    /// Returns `0` if the graph has no vertices.
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns a sorted vector of `(degree, count)` pairs.
    ///
    /// Each pair indicates how many nodes have that degree.
    ///
    /// # Examples
    /// ```
    /// use rewire::prelude::*;
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    /// assert_eq!(g.degree_distribution(), vec![(1, 2), (2, 1)]);
    /// ```
    fn degree_distribution(&self) -> Vec<(NumNodes, NumNodes)> {
        let mut distr = self
            .degrees()
            .counts()
            .into_iter()
            .map(|(d, n)| (d, n as NumNodes))
            .collect_vec();
        distr.sort_by_key(|(d, _)| *d);
        distr
    }

    /// Returns an iterator over the outgoing edges of a vertex.
    ///
    /// If `only_normalized` is `true`, only edges `(u, v)` with `u <= v`
    /// are returned.
    ///
    /// **Panics if `u >= n`.**
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph, with parallel
    /// edges repeated per occurrence.
    ///
    /// If `only_normalized` is `true`, only edges `(u, v)` with `u <= v`
    /// are returned; for undirected graphs this enumerates every edge
    /// exactly once. Directed graphs should pass `false`.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in sorted order.
    ///
    /// Mostly useful for tests and deterministic comparisons.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        let mut edges = self.edges(only_normalized).collect_vec();
        edges.sort_unstable();
        edges
    }
}

/// Extends [`AdjacencyList`] with in-neighbor access for directed graphs.
///
/// Also aliases functions of [`AdjacencyList`] with `out`-versions
/// (aka. [`AdjacencyList::neighbors_of`] => [`DirectedAdjacencyList::out_neighbors_of`]).
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArray::from_edges(3, [(0, 1), (2, 1)]);
///
/// assert_eq!(g.out_degree_of(0), 1);
/// assert_eq!(g.in_degree_of(1), 2);
/// assert_eq!(g.in_neighbors_of(1).collect::<Vec<_>>(), vec![0, 2]);
/// ```
pub trait DirectedAdjacencyList: AdjacencyList + GraphType<Dir = Directed> {
    /// Iterator over all incoming neighbors of a vertex in the graph.
    ///
    /// Returned by [`DirectedAdjacencyList::in_neighbors_of`].
    type InNeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over incoming neighbors of a vertex
    /// (`v` such that `(v, u)` exists), repeated per parallel edge.
    ///
    /// **Panics if `u >= n`.**
    fn in_neighbors_of(&self, u: Node) -> Self::InNeighborIter<'_>;

    /// Returns the number of incoming edges for vertex `u`.
    ///
    /// **Panics if `u >= n`.**
    fn in_degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over outgoing neighbors of a given vertex.
    /// Delegates to [`AdjacencyList::neighbors_of`].
    ///
    /// **Panics if `u >= n`.**
    fn out_neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.neighbors_of(u)
    }

    /// Returns the out-degree of a given vertex.
    /// Delegates to [`AdjacencyList::degree_of`].
    ///
    /// **Panics if `u >= n`.**
    fn out_degree_of(&self, u: Node) -> NumNodes {
        self.degree_of(u)
    }

    /// Returns the sum of in-degree and out-degree for vertex `u`.
    ///
    /// **Panics if `u >= n`.**
    fn total_degree_of(&self, u: Node) -> NumNodes {
        self.out_degree_of(u) + self.in_degree_of(u)
    }

    /// Returns an iterator over all vertex in-degrees.
    fn in_degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.in_degree_of(u))
    }
}

/// Uniform access to the `(in-degree, out-degree)` pair of a vertex.
///
/// For directed graphs this is `(in_degree_of(u), out_degree_of(u))`;
/// for undirected graphs both components equal `degree_of(u)`. Algorithms
/// that classify vertices by degree use this trait so they need not
/// branch on orientation.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArray::from_edges(3, [(0, 1), (2, 1)]);
/// assert_eq!(g.in_out_degree_of(1), (2, 0));
///
/// let h = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
/// assert_eq!(h.in_out_degree_of(1), (2, 2));
/// ```
pub trait GraphDegrees: AdjacencyList {
    /// Returns `(in-degree, out-degree)` of vertex `u`.
    ///
    /// **Panics if `u >= n`.**
    fn in_out_degree_of(&self, u: Node) -> (NumNodes, NumNodes);
}

/// Trait for testing the existence of edges.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
///
/// assert!(g.has_edge(0, 1));
/// assert!(g.has_edge(1, 0));
/// assert!(!g.has_edge(0, 2));
/// ```
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns `true` if at least one edge `(u, v)` exists in the graph.
    ///
    /// For undirected graphs this test is symmetric in `u` and `v`.
    ///
    /// **Panics if `u >= n || v >= n`.**
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns `true` if a self-loop `(u, u)` exists at the given vertex.
    ///
    /// **Panics if `u >= n`.**
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }

    /// Returns `true` if any vertex in the graph has a self-loop.
    fn has_self_loops(&self) -> bool {
        self.vertices().any(|u| self.has_self_loop(u))
    }
}

/// Creates a new empty graph with a given number of nodes.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArrayUndir::new(5);
/// assert_eq!(g.number_of_nodes(), 5);
/// assert_eq!(g.number_of_edges(), 0);
/// ```
pub trait GraphNew {
    /// Creates a new graph with `n` singleton nodes (nodes with no edges).
    fn new(n: NumNodes) -> Self;
}

/// Provides edge insertion and deletion operations with multigraph
/// semantics.
///
/// `add_edge` always appends a new occurrence; `remove_edge` removes one
/// occurrence. Counting number of edges with multiplicity is the caller's
/// concern via [`GraphEdgeOrder::number_of_edges`].
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let mut g = AdjArrayUndir::new(3);
/// g.add_edge(0, 1);
/// g.add_edge(0, 1); // parallel edge
/// assert_eq!(g.number_of_edges(), 2);
/// g.remove_edge(0, 1);
/// assert!(g.has_edge(0, 1)); // one occurrence left
/// ```
pub trait GraphEdgeEditing: GraphNew {
    /// Adds a new occurrence of the edge `(u, v)` to the graph.
    ///
    /// **Panics if `u >= n` or `v >= n`.**
    fn add_edge(&mut self, u: Node, v: Node);

    /// Adds all edges in the provided collection to the graph.
    ///
    /// **Panics if any edge `(u, v)` is invalid.**
    fn add_edges<I, E>(&mut self, edges: I)
    where
        E: Into<Edge>,
        I: IntoIterator<Item = E>,
    {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }

    /// Removes one occurrence of the edge `(u, v)` from the graph.
    ///
    /// Returns `true` if an occurrence was present.
    ///
    /// **Panics if `u >= n || v >= n`.**
    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool;

    /// Removes one occurrence of the edge `(u, v)` from the graph.
    ///
    /// **Panics if the edge does not exist or if `u >= n || v >= n`.**
    fn remove_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_remove_edge(u, v));
    }

    /// Removes one occurrence of every edge in the provided collection.
    ///
    /// **Panics if any edge does not exist or is invalid.**
    fn remove_edges<I, E>(&mut self, edges: I)
    where
        E: Into<Edge>,
        I: IntoIterator<Item = E>,
    {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.remove_edge(u, v);
        }
    }
}

/// Build a graph from scratch given a number of nodes and edges.
///
/// # Examples
/// ```
/// use rewire::prelude::*;
///
/// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
/// assert_eq!(g.number_of_nodes(), 3);
/// assert!(g.has_edge(0, 1));
/// ```
pub trait GraphFromScratch {
    /// Creates a new graph with `n` nodes and the given edges.
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Self
    where
        E: Into<Edge>,
        I: IntoIterator<Item = E>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Self
    where
        E: Into<Edge>,
        I: IntoIterator<Item = E>,
    {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }
}
