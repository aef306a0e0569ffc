//! Precomputed adjacency structure for the modularity operator.
//!
//! The structure caches the graph topology in compressed sparse rows
//! (offsets into one flat, sorted neighbor array) together with the
//! per-vertex degrees, the degree sum M = 2|E| and the k/M ratios that
//! appear in every entry of the modularity matrix. It is built once and
//! then shared read-only by all submatrix views.

use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers, NodeCount};
use std::collections::HashMap;
use std::hash::Hash;

/// Cached topology and degree data of an undirected, unweighted graph.
///
/// Vertex positions follow the graph's `node_identifiers()` enumeration
/// order, so position `i` here corresponds to the i-th identifier yielded
/// by the source graph.
#[derive(Debug, Clone)]
pub struct ModularityStructure {
    n: usize,
    /// CSR offsets; row i occupies `columns[offsets[i]..offsets[i + 1]]`.
    offsets: Vec<usize>,
    /// Flat neighbor array, ascending within each row.
    columns: Vec<usize>,
    /// Degree of each vertex.
    degrees: Vec<f64>,
    /// Sum of all degrees, i.e. twice the edge count.
    degree_sum: f64,
    /// degrees[i] / degree_sum, zero-filled when the graph has no edges.
    k_div_m: Vec<f64>,
}

impl ModularityStructure {
    /// Builds the structure from any petgraph-compatible graph.
    pub fn new<G>(graph: G) -> Self
    where
        G: IntoNeighbors + IntoNodeIdentifiers + NodeCount,
        G::NodeId: Eq + Hash,
    {
        let n = graph.node_count();
        let indices: HashMap<G::NodeId, usize> = graph
            .node_identifiers()
            .enumerate()
            .map(|(i, u)| (u, i))
            .collect();

        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); n];
        for u in graph.node_identifiers() {
            let row = &mut rows[indices[&u]];
            for v in graph.neighbors(u) {
                row.push(indices[&v]);
            }
            row.sort_unstable();
            // Parallel edges collapse to a single adjacency; rows must be
            // unique for the merged walks downstream.
            row.dedup();
        }

        Self::from_rows(rows)
    }

    fn from_rows(rows: Vec<Vec<usize>>) -> Self {
        let n = rows.len();
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        let mut columns = Vec::new();
        let mut degrees = Vec::with_capacity(n);
        for row in &rows {
            columns.extend_from_slice(row);
            offsets.push(columns.len());
            degrees.push(row.len() as f64);
        }

        let degree_sum: f64 = degrees.iter().sum();
        let k_div_m = if degree_sum > 0.0 {
            degrees.iter().map(|&k| k / degree_sum).collect()
        } else {
            vec![0.0; n]
        };

        ModularityStructure {
            n,
            offsets,
            columns,
            degrees,
            degree_sum,
            k_div_m,
        }
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Sum of all vertex degrees (twice the number of edges).
    pub fn degree_sum(&self) -> f64 {
        self.degree_sum
    }

    /// Degree of vertex `i`.
    pub fn degree(&self, i: usize) -> f64 {
        self.degrees[i]
    }

    /// Neighbors of vertex `i`, ascending.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.columns[self.offsets[i]..self.offsets[i + 1]]
    }

    pub(crate) fn k_div_m(&self, i: usize) -> f64 {
        self.k_div_m[i]
    }
}
