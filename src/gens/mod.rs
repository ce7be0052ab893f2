/*!
# Graph Generators

This module provides random graph generation used to produce inputs for
the rewiring engine (and its tests).

Generators are configurable structs in builder style:

```
use rewire::{prelude::*, gens::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(42);
let edges = Gnm::new().nodes(10).edges(20).generate(rng);
assert_eq!(edges.len(), 20);
```

Instead of configuring a model step by step, you can also create a graph
directly using the [`RandomGraph`] trait:

```
use rewire::{prelude::*, gens::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(42);
let g = AdjArray::gnm(rng, 10, 20);
assert_eq!(g.number_of_nodes(), 10);
assert_eq!(g.number_of_edges(), 20);
```
*/

use rand::Rng;

use crate::prelude::*;

pub mod gnm;

pub use gnm::Gnm;

/// Trait for generators that allow specifying the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in the generator (mutable setter).
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes and returns the generator (builder style).
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for generators that allow specifying the number of edges.
pub trait NumEdgesGen: Sized {
    /// Sets the number of edges in the generator (mutable setter).
    fn set_edges(&mut self, m: NumEdges);

    /// Sets the number of edges and returns the generator (builder style).
    fn edges(mut self, m: NumEdges) -> Self {
        self.set_edges(m);
        self
    }
}

/// General trait for a configurable random edge generator.
pub trait GraphGenerator {
    /// Generates the full list of edges of one random graph instance.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng;
}

/// Trait for constructing full random graph instances.
///
/// Implemented for any type that supports [`GraphFromScratch`] +
/// [`GraphType`].
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,m)` graph with exactly `m` distinct edges
    /// and no self-loops.
    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch + GraphType,
{
    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            Gnm::new()
                .nodes(n)
                .edges(m)
                .undirected(Self::is_undirected())
                .generate(rng),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn random_graph_gnm() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for (n, m) in [
            (10 as NumNodes, 20 as NumEdges),
            (20, 60),
            (50, 500),
            (100, 2000),
        ] {
            for _ in 0..20 {
                // Directed
                let g = AdjArray::gnm(rng, n, m);
                assert_eq!(g.number_of_nodes(), n);
                assert_eq!(g.number_of_edges(), m);
                assert!(!g.has_self_loops());

                // Undirected
                let g = AdjArrayUndir::gnm(rng, n, m);
                assert_eq!(g.number_of_nodes(), n);
                assert_eq!(g.number_of_edges(), m);
                assert!(!g.has_self_loops());
            }
        }
    }
}
