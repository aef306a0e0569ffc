//! petgraph-clustering-newman detects communities in undirected graphs by
//! recursive modularity maximization.
//!
//! The algorithm repeatedly bisects vertex groups along the leading
//! eigenvector of the modularity matrix restricted to the group. The
//! restricted operator is never materialized: submatrix views compute its
//! rows on demand from a shared sparse adjacency structure, a 1-norm
//! diagonal shift keeps power iteration on the most positive eigenvalue,
//! and every accepted split is polished by a greedy single-move
//! refinement before recursing.

mod divide;
mod eigen;
mod partition;
mod refine;
mod structure;
mod submatrix;
mod utils;

pub use divide::{Division, divide};
pub use eigen::{power_iteration, random_vector, rayleigh_quotient};
pub use partition::partition;
pub use refine::refine;
pub use structure::ModularityStructure;
pub use submatrix::Submatrix;
pub use utils::{modularity, renumber_communities};

use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers, NodeCount};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::hash::Hash;

/// Tolerance used wherever a scalar is compared against zero: modularity
/// sign decisions and power-iteration convergence alike.
pub const EPSILON: f64 = 1e-5;

/// Trait for community detection algorithms.
///
/// Implementations of this trait provide methods to detect communities in
/// graphs. All algorithms return a mapping from node identifiers to
/// community IDs (as usize).
pub trait CommunityDetection<G>
where
    G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + Clone,
{
    /// Detect communities in the input graph
    ///
    /// # Returns
    ///
    /// A `HashMap` mapping each node's `NodeId` to its community ID (as usize)
    fn detect_communities(&self, graph: G) -> HashMap<G::NodeId, usize>;
}

/// Newman's spectral community detection algorithm.
///
/// Communities are found by recursive bisection: each group is split along
/// the sign pattern of the leading eigenvector of its restricted modularity
/// matrix, refined by greedy single-vertex moves, until no group has a
/// split that improves modularity.
///
/// # Examples
///
/// ```
/// use petgraph::graph::UnGraph;
/// use petgraph_clustering_newman::{CommunityDetection, Newman};
///
/// // A path of four nodes splits down the middle.
/// let mut graph = UnGraph::<(), ()>::new_undirected();
/// let n1 = graph.add_node(());
/// let n2 = graph.add_node(());
/// let n3 = graph.add_node(());
/// let n4 = graph.add_node(());
/// graph.add_edge(n1, n2, ());
/// graph.add_edge(n2, n3, ());
/// graph.add_edge(n3, n4, ());
///
/// let communities = Newman::new().detect_communities(&graph);
///
/// assert_eq!(communities[&n1], communities[&n2]);
/// assert_eq!(communities[&n3], communities[&n4]);
/// assert_ne!(communities[&n1], communities[&n3]);
/// ```
#[derive(Debug, Clone)]
pub struct Newman {
    /// Positivity and convergence tolerance.
    pub eps: f64,
    /// Seed of the power-iteration start vectors. Two runs with the same
    /// seed produce identical partitions.
    pub seed: u64,
}

impl Newman {
    /// Creates a new Newman instance with default values.
    ///
    /// Default values:
    /// - eps: [`EPSILON`]
    /// - seed: 42
    pub fn new() -> Self {
        Newman {
            eps: EPSILON,
            seed: 42,
        }
    }

    /// Sets the positivity and convergence tolerance.
    pub fn eps(&mut self, eps: f64) -> &mut Self {
        self.eps = eps;
        self
    }

    /// Sets the random seed.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }
}

impl Default for Newman {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> CommunityDetection<G> for Newman
where
    G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
    G::NodeId: Eq + Hash + Clone,
{
    fn detect_communities(&self, graph: G) -> HashMap<G::NodeId, usize> {
        let structure = ModularityStructure::new(graph);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let groups = partition(&structure, &mut rng, self.eps);

        let nodes: Vec<G::NodeId> = graph.node_identifiers().collect();
        let mut communities = HashMap::new();
        for (community, group) in groups.iter().enumerate() {
            for &vertex in group {
                communities.insert(nodes[vertex].clone(), community);
            }
        }
        communities
    }
}
