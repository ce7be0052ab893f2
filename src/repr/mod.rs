/*!
# Graph Representation

This module contains the concrete graph data structures the engine
mutates. Both store adjacency lists in `Vec<Vec<Node>>` and support
**multigraphs**: parallel edges are kept with their multiplicity and
self-loops are allowed.

### Representations

- [`AdjArray`]
  Directed multigraph storing outgoing **and** incoming adjacency arrays,
  so `in_degree_of` and `in_neighbors_of` are cheap.

- [`AdjArrayUndir`]
  Undirected multigraph. Every edge `(u, v)` is mirrored into both
  endpoint lists; a self-loop occupies two entries at its single
  endpoint and contributes two to its degree.

Both representations are `Clone` and implement the full editing trait set
of [`ops`](crate::ops), which is what the rewiring engine requires.
*/

use crate::{edge::*, node::*, ops::*};

pub mod directed;
pub mod undirected;

pub use directed::AdjArray;
pub use undirected::AdjArrayUndir;
