/// Every graph representation is exercised against a multiplicity-aware
/// reference model: a multiset of edge occurrences.
macro_rules! test_graph_repr {
    ($env:ident, $graph:ident, $undirected:literal, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use fxhash::FxHashMap;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            use crate::{edge::*, node::*, ops::*, repr::*, testing::test_graph_repr};

            /// Creates a list of `m` random edges for nodes `0..n`.
            /// Duplicates are kept: these are multigraphs.
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> Vec<Edge> {
                (0..m)
                    .map(|_| {
                        let u = rng.random_range(0..n);
                        let v = rng.random_range(0..n);

                        if $undirected {
                            Edge(u, v).normalized()
                        } else {
                            Edge(u, v)
                        }
                    })
                    .collect_vec()
            }

            /// Reference multiset of edge occurrences.
            fn edge_counts(edges: &[Edge]) -> FxHashMap<Edge, usize> {
                let mut counts = FxHashMap::default();
                for &e in edges {
                    *counts.entry(e).or_insert(0usize) += 1;
                }
                counts
            }

            /// Reference degrees: out-degrees for directed graphs, full
            /// incidence counts (self-loops twice) for undirected ones.
            fn reference_degrees(n: NumNodes, edges: &[Edge]) -> Vec<NumNodes> {
                let mut degs = vec![0 as NumNodes; n as usize];
                for &Edge(u, v) in edges {
                    degs[u as usize] += 1;
                    if $undirected {
                        degs[v as usize] += 1;
                    }
                }
                degs
            }

            $(
                test_graph_repr!($graph<$undirected>: $trait);
            )*
        }
    };
    ($graph:ident<$undirected:literal>: GraphNew) => {
        #[test]
        fn graph_new() {
            for n in 1..50 {
                let graph = <$graph>::new(n);

                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), n);
                assert!(graph.is_singleton_graph());
                assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
            }
        }
    };
    ($graph:ident<$undirected:literal>: AdjacencyList) => {
        #[test]
        fn adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m in [n, n * 3, n * 8] {
                    let edges = random_edges(rng, n, m as NumEdges);
                    let graph = <$graph>::from_edges(n, edges.iter());

                    assert_eq!(graph.number_of_nodes(), n);
                    assert_eq!(graph.number_of_edges(), m as NumEdges);

                    let mut expected = edges.clone();
                    expected.sort_unstable();
                    assert_eq!(graph.ordered_edges($undirected), expected);

                    let degs = reference_degrees(n, &edges);
                    for u in 0..n {
                        assert_eq!(graph.degree_of(u), degs[u as usize], "degree of {u}");
                    }

                    let counts = edge_counts(&edges);
                    for u in 0..n {
                        for v in 0..n {
                            let key = if $undirected {
                                Edge(u, v).normalized()
                            } else {
                                Edge(u, v)
                            };
                            assert_eq!(graph.has_edge(u, v), counts.contains_key(&key));
                        }
                    }
                }
            }
        }
    };
    ($graph:ident<$undirected:literal>: DirectedAdjacencyList) => {
        #[test]
        fn directed_adjacency_list() {
            assert!(!$undirected);

            let rng = &mut Pcg64Mcg::seed_from_u64(7);

            for n in [10 as NumNodes, 20, 50] {
                let edges = random_edges(rng, n, 5 * n as NumEdges);
                let graph = <$graph>::from_edges(n, edges.iter());

                let mut in_degs = vec![0 as NumNodes; n as usize];
                let mut in_nbs = vec![Vec::new(); n as usize];
                for &Edge(u, v) in &edges {
                    in_degs[v as usize] += 1;
                    in_nbs[v as usize].push(u);
                }

                for u in 0..n {
                    assert_eq!(graph.in_degree_of(u), in_degs[u as usize]);
                    assert_eq!(
                        graph.in_neighbors_of(u).sorted_unstable().collect_vec(),
                        in_nbs[u as usize].iter().copied().sorted_unstable().collect_vec()
                    );
                    assert_eq!(
                        graph.in_out_degree_of(u),
                        (graph.in_degree_of(u), graph.degree_of(u))
                    );
                }
            }
        }
    };
    ($graph:ident<$undirected:literal>: GraphEdgeEditing) => {
        #[test]
        fn edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(11);

            for n in [10 as NumNodes, 20, 50] {
                let edges = random_edges(rng, n, 5 * n as NumEdges);
                let mut graph = <$graph>::from_edges(n, edges.iter());
                let mut counts = edge_counts(&edges);

                let mut m = graph.number_of_edges();
                for &e in edges.iter().step_by(2) {
                    let remaining = counts.get_mut(&e).unwrap();
                    if *remaining == 0 {
                        continue;
                    }
                    *remaining -= 1;

                    assert!(graph.try_remove_edge(e.0, e.1));
                    m -= 1;
                    assert_eq!(graph.number_of_edges(), m);

                    // Adjacency reflects the remaining multiplicity
                    assert_eq!(graph.has_edge(e.0, e.1), *remaining > 0);
                }

                // Removing an absent edge is rejected without effect
                for u in 0..n {
                    for v in 0..n {
                        let key = if $undirected {
                            Edge(u, v).normalized()
                        } else {
                            Edge(u, v)
                        };
                        if counts.get(&key).copied().unwrap_or(0) == 0 {
                            assert!(!graph.try_remove_edge(u, v));
                            assert_eq!(graph.number_of_edges(), m);
                        }
                    }
                }
            }
        }

        #[test]
        fn parallel_edges_and_loops() {
            let mut graph = <$graph>::new(4);

            for _ in 0..3 {
                graph.add_edge(1, 2);
            }
            graph.add_edge(3, 3);

            assert_eq!(graph.number_of_edges(), 4);
            assert!(graph.has_edge(1, 2));
            assert!(graph.has_self_loop(3));

            graph.remove_edge(1, 2);
            graph.remove_edge(1, 2);
            assert!(graph.has_edge(1, 2));
            graph.remove_edge(1, 2);
            assert!(!graph.has_edge(1, 2));

            graph.remove_edge(3, 3);
            assert!(graph.is_singleton_graph());
        }
    };
}

pub(crate) use test_graph_repr;
