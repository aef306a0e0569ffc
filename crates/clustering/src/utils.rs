use crate::structure::ModularityStructure;
use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers, NodeCount};
use std::collections::HashMap;
use std::hash::Hash;

/// Calculate modularity for a graph with given community assignments.
///
/// Modularity measures the strength of a division of a network into
/// communities: the fraction of edges inside communities minus the
/// fraction expected if edges were placed at random with the same degree
/// sequence.
///
/// # Arguments
///
/// * `graph` - A reference to a graph implementing required traits
/// * `communities` - A hashmap that maps each node to its community ID
///
/// # Returns
///
/// The modularity value for the given community structure, ranging from
/// -0.5 to 1.0. Higher values indicate better community structure.
pub fn modularity<G>(graph: G, communities: &HashMap<G::NodeId, usize>) -> f64
where
    G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + Clone,
{
    let structure = ModularityStructure::new(graph);
    let m = structure.degree_sum();
    if m == 0.0 {
        return 0.0;
    }

    let assignment: Vec<usize> = graph
        .node_identifiers()
        .map(|u| communities.get(&u).copied().unwrap_or(0))
        .collect();
    let community_count = assignment.iter().copied().max().map_or(0, |c| c + 1);

    // Per community: twice the internal edge count and the degree sum.
    let mut internal = vec![0.0; community_count];
    let mut degree_total = vec![0.0; community_count];
    for i in 0..structure.node_count() {
        let c = assignment[i];
        degree_total[c] += structure.degree(i);
        for &j in structure.neighbors(i) {
            if assignment[j] == c {
                internal[c] += 1.0;
            }
        }
    }

    (0..community_count)
        .map(|c| (internal[c] - degree_total[c] * degree_total[c] / m) / m)
        .sum()
}

/// Renumber communities from 0 to n-1, where n is the number of communities.
///
/// This function is useful when the community IDs are not consecutive or do
/// not start from 0.
///
/// # Arguments
///
/// * `communities` - A hashmap that maps each node to its community ID
///
/// # Returns
///
/// A new hashmap with renumbered community IDs
pub fn renumber_communities<T>(communities: &HashMap<T, usize>) -> HashMap<T, usize>
where
    T: Eq + Hash + Clone,
{
    let mut ids = HashMap::new();
    let mut result = HashMap::with_capacity(communities.len());
    for (node, &community) in communities {
        let next = ids.len();
        let id = *ids.entry(community).or_insert(next);
        result.insert(node.clone(), id);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;

    #[test]
    fn test_modularity_of_two_triangles() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
        for &(u, v) in &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)] {
            graph.add_edge(nodes[u], nodes[v], ());
        }

        let communities: HashMap<_, _> = nodes
            .iter()
            .enumerate()
            .map(|(i, &u)| (u, if i < 3 { 0 } else { 1 }))
            .collect();

        // Two disjoint triangles split by component score exactly 1/2.
        assert!((modularity(&graph, &communities) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_modularity_of_trivial_partition_is_zero() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        for w in nodes.windows(2) {
            graph.add_edge(w[0], w[1], ());
        }

        let communities: HashMap<_, _> = nodes.iter().map(|&u| (u, 0)).collect();
        assert!(modularity(&graph, &communities).abs() < 1e-12);
    }

    #[test]
    fn test_modularity_of_empty_graph() {
        let graph = UnGraph::<(), ()>::new_undirected();
        let communities = HashMap::new();
        assert_eq!(modularity(&graph, &communities), 0.0);
    }

    #[test]
    fn test_renumber_communities() {
        let mut communities = HashMap::new();
        communities.insert("a", 7);
        communities.insert("b", 7);
        communities.insert("c", 3);

        let renumbered = renumber_communities(&communities);
        assert_eq!(renumbered["a"], renumbered["b"]);
        assert_ne!(renumbered["a"], renumbered["c"]);
        assert!(renumbered.values().all(|&id| id < 2));
    }
}
