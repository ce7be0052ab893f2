/*!
`rewire` is an in-place Markov-chain edge-rewiring engine for graphs that are
- **u**nlabelled & **u**nsigned : Nodes are numbered `0` to `n - 1`
- **m**utable multigraphs : parallel edges and self-loops are first-class
- directed **or** undirected

# What it does

Given a graph `G = (V, E)`, a [`Rewiring`] repeatedly swaps edges in
place so that the result is a sample from a chosen null model
([`RewireModel`]) — fully random, degree-preserving, joint-degree
preserving, or one of three stochastic-blockmodel variants — while
optional constraints forbid self-loops and parallel edges.

```
use rewire::{prelude::*, gens::*, Rewiring, RewireModel};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(42);

// a random simple directed graph with 100 nodes and 400 edges
let mut g = AdjArray::gnm(rng, 100, 400);
let degrees: Vec<_> = g.vertices().map(|u| g.in_out_degree_of(u)).collect();

// sample from the configuration model with the same degree sequence
Rewiring::new(RewireModel::Uncorrelated)
    .sweeps(20)
    .run(&mut g, rng);

assert_eq!(g.number_of_edges(), 400);
assert_eq!(
    g.vertices().map(|u| g.in_out_degree_of(u)).collect::<Vec<_>>(),
    degrees
);
```

# Representation

Nodes are `u32` values in `0..n`; edges are tuple structs
`Edge(Node, Node)`. The engine works on any graph type implementing the
operation traits in [`ops`] (see [`rewiring::Rewireable`]); the [`repr`]
module provides two ready-made multigraph backends, [`AdjArray`]
(directed) and [`AdjArrayUndir`] (undirected).

# Design

Algorithms are configurable structs driven with the *Builder* / *Setter*
pattern: configure a [`Rewiring`] (or a generator from [`gens`]), then
apply it to a graph together with a caller-supplied [`rand::Rng`]. All
randomness flows through that RNG, so seeded runs are reproducible.

[`AdjArray`]: crate::repr::AdjArray
[`AdjArrayUndir`]: crate::repr::AdjArrayUndir
*/

pub mod edge;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub mod rewiring;
pub(crate) mod testing;
pub mod utils;

pub use rewiring::{
    Blocks, CorrProb, DegreeBlocks, ProbFn, Progress, PropertyBlocks, RewireModel, Rewiring,
    UniformProb,
};

/// `rewire::prelude` includes definitions for nodes and edges, all basic
/// graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}
