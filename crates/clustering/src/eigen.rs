//! Power iteration for the leading eigenpair of a submatrix view.

use crate::submatrix::Submatrix;
use ndarray::Array1;
use rand::Rng;

/// Generates a random start vector with entries uniform in (−1, 1).
pub fn random_vector<R>(n: usize, rng: &mut R) -> Array1<f64>
where
    R: Rng,
{
    Array1::from_shape_fn(n, |_| rng.gen_range(-1.0..1.0))
}

/// Scales `v` to unit 2-norm and returns the norm it had before scaling.
/// A zero (or non-finite) return means the vector collapsed.
pub fn normalize(v: &mut Array1<f64>) -> f64 {
    let norm = v.dot(v).sqrt();
    if norm > 0.0 {
        *v /= norm;
    }
    norm
}

fn is_close(a: &Array1<f64>, b: &Array1<f64>, eps: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
}

/// Runs power iteration on the view until the normalized iterate changes
/// by less than `eps` in every component, returning the dominant
/// eigenvector of the (shifted) operator.
///
/// There is no iteration cap: callers are expected to have shifted the
/// operator positive semidefinite, which provides the spectral gap the
/// iteration needs. `None` signals that the iterate collapsed to zero and
/// no dominant eigenvector exists.
pub fn power_iteration(sub: &Submatrix, b0: Array1<f64>, eps: f64) -> Option<Array1<f64>> {
    let mut current = b0;
    if !(normalize(&mut current) > 0.0) {
        return None;
    }

    let mut next = Array1::zeros(sub.len());
    loop {
        sub.multiply(&current, &mut next);
        if !(normalize(&mut next) > 0.0) {
            return None;
        }
        if is_close(&next, &current, eps) {
            return Some(next);
        }
        std::mem::swap(&mut current, &mut next);
    }
}

/// Rayleigh quotient `(vᵀB̂v)/(vᵀv)` of the view at `v`; the dominant
/// eigenvalue once `v` has converged. Callers that shifted the diagonal
/// subtract the shift to recover the modularity eigenvalue.
pub fn rayleigh_quotient(sub: &Submatrix, v: &Array1<f64>) -> f64 {
    let denominator = v.dot(v);
    if denominator > 0.0 {
        sub.quadratic_form(v) / denominator
    } else {
        0.0
    }
}
