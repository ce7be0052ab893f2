/*!
# Node Representation

Nodes are unlabelled and unweighted: a graph on `n` nodes uses the ids
`0..n` and nothing else. Nodes are therefore plain `u32` values, which
keeps adjacency arrays compact and lets node ids double as indices.
*/

/// A node of a graph with `n` nodes is a value in `0..n`.
///
/// As most common graphs do not exceed `2^32` nodes, `u32` suffices and
/// saves space compared to `u64`/`usize`.
pub type Node = u32;

/// Number of nodes in a graph.
///
/// Limited to `u32` (maximum `2^32 - 1` nodes).
pub type NumNodes = Node;
