//! Recursive partitioning of the whole graph into communities.

use crate::divide::{Division, divide};
use crate::structure::ModularityStructure;
use crate::submatrix::Submatrix;
use rand::Rng;

/// Recursively divides the graph into communities, returning the vertex
/// groups in emission order.
///
/// A stack of submatrix views starts from the whole vertex set. Each
/// popped view is divided; indivisible views are emitted as final groups,
/// divisible ones are split along the refined sign vector and the halves
/// are pushed back (single vertices are emitted right away). Groups are
/// never empty, never overlap, and together cover every vertex.
///
/// Graphs without edges get one group per vertex: the modularity matrix is
/// identically zero there, so no split is ever an improvement, and leaving
/// every vertex alone matches how the other detectors in this family treat
/// edgeless input.
pub fn partition<R>(structure: &ModularityStructure, rng: &mut R, eps: f64) -> Vec<Vec<usize>>
where
    R: Rng,
{
    let n = structure.node_count();
    if n == 0 {
        return Vec::new();
    }
    if structure.degree_sum() == 0.0 {
        return (0..n).map(|i| vec![i]).collect();
    }

    let mut groups = Vec::new();
    let mut stack = vec![Submatrix::whole(structure)];
    while let Some(mut sub) = stack.pop() {
        if sub.len() <= 1 {
            groups.push(sub.into_vertices());
            continue;
        }
        match divide(&mut sub, rng, eps) {
            Division::Indivisible => {
                groups.push(sub.into_vertices());
            }
            Division::Split(s) => {
                let (positive, negative) = sub.split(&s);
                if positive.is_empty() || negative.is_empty() {
                    // Refinement pushed everything to one side; the group
                    // is final after all.
                    let whole = if positive.is_empty() { negative } else { positive };
                    groups.push(whole.into_vertices());
                    continue;
                }
                for child in [positive, negative] {
                    if child.len() <= 1 {
                        groups.push(child.into_vertices());
                    } else {
                        stack.push(child);
                    }
                }
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use petgraph::graph::UnGraph;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> UnGraph<(), ()> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for &(u, v) in edges {
            graph.add_edge(nodes[u], nodes[v], ());
        }
        graph
    }

    fn run(graph: &UnGraph<(), ()>) -> Vec<Vec<usize>> {
        let structure = ModularityStructure::new(graph);
        let mut rng = StdRng::seed_from_u64(42);
        partition(&structure, &mut rng, 1e-5)
    }

    fn assert_covers(groups: &[Vec<usize>], n: usize) {
        let mut seen = vec![false; n];
        for group in groups {
            assert!(!group.is_empty(), "groups must be non-empty");
            for &v in group {
                assert!(!seen[v], "vertex {} emitted twice", v);
                seen[v] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "every vertex must be covered");
    }

    #[test]
    fn test_empty_graph() {
        let graph = UnGraph::<(), ()>::new_undirected();
        assert!(run(&graph).is_empty());
    }

    #[test]
    fn test_isolated_vertex() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        graph.add_node(());
        assert_eq!(run(&graph), vec![vec![0]]);
    }

    #[test]
    fn test_edgeless_graph_keeps_singletons() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        for _ in 0..5 {
            graph.add_node(());
        }
        let groups = run(&graph);
        assert_eq!(groups.len(), 5);
        assert_covers(&groups, 5);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_two_triangles() {
        let graph = graph_from_edges(6, &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)]);
        let groups = run(&graph);
        assert_covers(&groups, 6);
        assert_eq!(groups.len(), 2);

        let mut sorted = groups.clone();
        sorted.sort();
        assert_eq!(sorted, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_two_cliques() {
        let mut edges = Vec::new();
        for offset in [0, 4] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((offset + i, offset + j));
                }
            }
        }
        let graph = graph_from_edges(8, &edges);
        let groups = run(&graph);
        assert_covers(&groups, 8);
        assert_eq!(groups.len(), 2);

        let mut sorted = groups.clone();
        sorted.sort();
        assert_eq!(sorted, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
    }

    #[test]
    fn test_path_of_four() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let groups = run(&graph);
        assert_covers(&groups, 4);

        let mut sorted = groups.clone();
        sorted.sort();
        assert_eq!(sorted, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_complete_bipartite_stays_whole() {
        let graph = graph_from_edges(
            6,
            &[
                (0, 3),
                (0, 4),
                (0, 5),
                (1, 3),
                (1, 4),
                (1, 5),
                (2, 3),
                (2, 4),
                (2, 5),
            ],
        );
        let groups = run(&graph);
        assert_covers(&groups, 6);
        assert_eq!(groups, vec![vec![0, 1, 2, 3, 4, 5]]);
    }

    #[test]
    fn test_emission_is_deterministic_under_a_fixed_seed() {
        let graph = graph_from_edges(
            10,
            &[
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 3),
                (3, 4),
                (3, 5),
                (4, 5),
                (5, 6),
                (6, 7),
                (6, 8),
                (7, 8),
                (8, 9),
            ],
        );
        let first = run(&graph);
        let second = run(&graph);
        assert_eq!(first, second);
        assert_covers(&first, 10);
    }
}
