use crate::math::{Matrix, Real, Vector};

/// Computes the cross-covariance matrix `Σ pᵢ qᵢᵀ` of two index-correspondent sets of vectors.
///
/// Entry `(r, c)` of the result is the sum of `p[r] * q[c]` over every pair, i.e., `Sxy` is
/// the sum of the products of the `x` coordinates of `p` with the `y` coordinates of `q`.
/// Pairs beyond the length of the shortest input are ignored.
pub fn cross_cov(p: &[Vector<Real>], q: &[Vector<Real>]) -> Matrix<Real> {
    let mut cov = Matrix::zeros();

    for (p, q) in p.iter().zip(q.iter()) {
        cov += p * q.transpose();
    }

    cov
}

#[cfg(test)]
mod test {
    use super::cross_cov;
    use crate::math::Vector;

    #[test]
    fn cross_cov_layout() {
        let p = [Vector::x()];
        let q = [Vector::y()];
        let cov = cross_cov(&p, &q);

        // Only Sxy is set.
        assert_eq!(cov[(0, 1)], 1.0);
        assert_eq!(cov.sum(), 1.0);
    }
}
