//! Single two-way division of a submatrix view.

use crate::eigen::{power_iteration, random_vector, rayleigh_quotient};
use crate::refine::refine;
use crate::submatrix::Submatrix;
use ndarray::Array1;
use rand::Rng;

/// Outcome of attempting to divide a vertex group in two.
#[derive(Debug, Clone, PartialEq)]
pub enum Division {
    /// A refined ±1 split vector over the view's positions.
    Split(Array1<f64>),
    /// No split improves modularity; the group should be kept whole.
    Indivisible,
}

/// Attempts to divide the view along its leading modularity eigenvector.
///
/// The diagonal is shifted by the operator's 1-norm first. The unshifted
/// operator can be indefinite, in which case power iteration would lock on
/// the largest-magnitude eigenvalue; the shift makes every eigenvalue
/// non-negative so the iteration lands on the most positive one, which is
/// the direction that maximizes modularity. The shift is cleared again
/// before the eigenvalue and the split are judged.
///
/// Numerical collapse of the iteration is reported as [`Division::Indivisible`],
/// never as an error.
pub fn divide<R>(sub: &mut Submatrix, rng: &mut R, eps: f64) -> Division
where
    R: Rng,
{
    debug_assert!(sub.len() >= 2);

    let shift = sub.one_norm();
    sub.set_diag_shift(shift);

    let b0 = random_vector(sub.len(), rng);
    let Some(vector) = power_iteration(sub, b0, eps) else {
        sub.set_diag_shift(0.0);
        log::debug!(
            "power iteration collapsed on a group of {}; keeping it whole",
            sub.len()
        );
        return Division::Indivisible;
    };

    let eigenvalue = rayleigh_quotient(sub, &vector) - shift;
    sub.set_diag_shift(0.0);
    log::debug!(
        "leading eigenvalue {:.6} on a group of {}",
        eigenvalue,
        sub.len()
    );
    if eigenvalue <= eps {
        return Division::Indivisible;
    }

    let mut s = vector.mapv(|x| if x > 0.0 { 1.0 } else { -1.0 });
    if sub.quadratic_form(&s) <= eps {
        return Division::Indivisible;
    }

    refine(sub, &mut s, eps);
    Division::Split(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::ModularityStructure;
    use petgraph::graph::UnGraph;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> UnGraph<(), ()> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for &(u, v) in edges {
            graph.add_edge(nodes[u], nodes[v], ());
        }
        graph
    }

    #[test]
    fn test_divide_separates_two_triangles() {
        let graph = graph_from_edges(6, &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)]);
        let structure = ModularityStructure::new(&graph);
        let mut sub = Submatrix::whole(&structure);
        let mut rng = StdRng::seed_from_u64(42);

        match divide(&mut sub, &mut rng, 1e-5) {
            Division::Split(s) => {
                assert_eq!(s[0], s[1]);
                assert_eq!(s[1], s[2]);
                assert_eq!(s[3], s[4]);
                assert_eq!(s[4], s[5]);
                assert!(s[0] != s[3], "split should follow the components");
            }
            Division::Indivisible => panic!("two triangles are divisible"),
        }
        assert_eq!(sub.diag_shift(), 0.0, "shift must be cleared");
    }

    #[test]
    fn test_divide_rejects_single_edge() {
        let graph = graph_from_edges(2, &[(0, 1)]);
        let structure = ModularityStructure::new(&graph);
        let mut sub = Submatrix::whole(&structure);
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(divide(&mut sub, &mut rng, 1e-5), Division::Indivisible);
    }

    #[test]
    fn test_divide_rejects_complete_bipartite() {
        // K_{3,3}: modularity penalizes splitting a complete bipartite
        // graph along its bipartition; the leading eigenvalue is zero.
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
        let structure = ModularityStructure::new(&graph);
        let mut sub = Submatrix::whole(&structure);
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(divide(&mut sub, &mut rng, 1e-5), Division::Indivisible);
    }

    #[test]
    fn test_divide_rejects_complete_graph() {
        let graph = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let structure = ModularityStructure::new(&graph);
        let mut sub = Submatrix::whole(&structure);
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(divide(&mut sub, &mut rng, 1e-5), Division::Indivisible);
    }
}
