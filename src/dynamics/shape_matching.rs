//! Extraction of the rigid motion that best explains a deformed point cloud.
//!
//! Given reference offsets `pᵢ` and current offsets `qᵢ`, both relative to their own centroid,
//! the rotation `R` minimizing `Σ |R pᵢ - qᵢ|²` is the unit quaternion maximizing `qᵀ K q` where
//! `K` is the symmetric key matrix built from the cross-covariance `S = Σ pᵢ qᵢᵀ`. That
//! quaternion is the eigenvector of the largest eigenvalue of `K`, found here by power
//! iteration.

use crate::dynamics::ShapeMatchingParams;
use crate::math::{
    Isometry, KeyMatrix, Matrix, Point, QuaternionCoords, Real, Rotation, Translation,
    UnitVector, Vector,
};
use crate::utils;
use na::{Quaternion, Unit};

/// The starting estimate of the power iteration, as `(w, x, y, z)`.
const SEED_QUATERNION: [Real; 4] = [1.0, 0.1, 0.1, 0.1];

/// A rotation followed by a translation.
///
/// Applied to a point expressed relative to the initial centroid of a chassis, this yields
/// its best-fit current world position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidTransform {
    /// The best-fit rotation, with a non-negative real part.
    pub rotation: Rotation<Real>,
    /// The current centroid.
    pub translation: Point<Real>,
}

impl RigidTransform {
    /// The identity rotation placed at `translation`.
    pub fn identity_at(translation: Point<Real>) -> Self {
        Self {
            rotation: Rotation::identity(),
            translation,
        }
    }

    /// The rotation as an angle in `[0, π]` and a unit axis.
    ///
    /// Near the identity the axis is numerically meaningless: when `sin(angle / 2)` is smaller
    /// than `axis_epsilon` the axis `(1, 0, 0)` is returned instead.
    pub fn angle_axis(&self, axis_epsilon: Real) -> (Real, UnitVector<Real>) {
        let q = self.rotation.quaternion();
        let w = q.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (angle * 0.5).sin();

        if s.abs() < axis_epsilon {
            return (angle, Vector::x_axis());
        }

        match Unit::try_new(q.imag() / s, 0.0) {
            Some(axis) => (angle, axis),
            None => (angle, Vector::x_axis()),
        }
    }

    /// This transform as an isometry.
    pub fn to_isometry(&self) -> Isometry<Real> {
        Isometry::from_parts(Translation::from(self.translation.coords), self.rotation)
    }

    /// Transforms a point expressed relative to the initial centroid.
    pub fn transform_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.translation + self.rotation * pt.coords
    }

    /// Are all the components of this transform finite?
    pub fn is_finite(&self) -> bool {
        self.rotation.coords.iter().all(|x| x.is_finite())
            && self.translation.iter().all(|x| x.is_finite())
    }
}

/// The symmetric key matrix of the cross-covariance `s = Σ pᵢ qᵢᵀ`.
///
/// Rows and columns are ordered `(w, x, y, z)`.
pub fn key_matrix(s: &Matrix<Real>) -> KeyMatrix<Real> {
    let (sxx, sxy, sxz) = (s[(0, 0)], s[(0, 1)], s[(0, 2)]);
    let (syx, syy, syz) = (s[(1, 0)], s[(1, 1)], s[(1, 2)]);
    let (szx, szy, szz) = (s[(2, 0)], s[(2, 1)], s[(2, 2)]);

    KeyMatrix::new(
        sxx + syy + szz,
        syz - szy,
        szx - sxz,
        sxy - syx,
        //
        syz - szy,
        sxx - syy - szz,
        sxy + syx,
        szx + sxz,
        //
        szx - sxz,
        sxy + syx,
        -sxx + syy - szz,
        syz + szy,
        //
        sxy - syx,
        szx + sxz,
        syz + szy,
        -sxx - syy + szz,
    )
}

/// The unit eigenvector of the largest eigenvalue of the symmetric matrix `k`.
///
/// The power iteration runs on `k + σI`, where `σ` is the largest absolute row sum of `k`.
/// This shift makes every eigenvalue non-negative without changing the eigenvectors, so that
/// the iteration cannot settle on a negative eigenvalue of larger magnitude. Iteration stops
/// once two successive estimates differ by less than `params.tolerance`, or after
/// `params.max_iterations` steps.
///
/// Returns `None` if `k` is zero, in which case every unit quaternion is an eigenvector.
pub fn dominant_eigenvector(
    k: &KeyMatrix<Real>,
    params: &ShapeMatchingParams,
) -> Option<QuaternionCoords<Real>> {
    let sigma = k
        .row_iter()
        .map(|row| row.iter().map(|x| x.abs()).sum::<Real>())
        .fold(0.0, Real::max);

    if sigma == 0.0 {
        return None;
    }

    let shifted = k + KeyMatrix::identity() * sigma;
    let mut q = QuaternionCoords::from(SEED_QUATERNION).try_normalize(0.0)?;

    for _ in 0..params.max_iterations {
        let next = (shifted * q).try_normalize(0.0)?;
        let step = (next - q).norm();
        q = next;

        if step < params.tolerance {
            return Some(q);
        }
    }

    log::debug!(
        "Shape matching power iteration did not converge in {} iterations.",
        params.max_iterations
    );
    Some(q)
}

/// The rotation that best maps the `reference` offsets onto the `current` offsets.
///
/// Both sets must be index-correspondent and relative to their own centroid. The result has
/// a non-negative real part. Degenerate inputs with a zero cross-covariance yield the identity.
pub fn best_fit_rotation(
    reference: &[Vector<Real>],
    current: &[Vector<Real>],
    params: &ShapeMatchingParams,
) -> Rotation<Real> {
    let k = key_matrix(&utils::cross_cov(reference, current));

    match dominant_eigenvector(&k, params) {
        Some(q) => {
            let quat = Quaternion::new(q[0], q[1], q[2], q[3]);
            let quat = if quat.w < 0.0 { -quat } else { quat };
            Rotation::new_normalize(quat)
        }
        None => Rotation::identity(),
    }
}

/// The rigid transform best explaining the current `positions` of points whose offsets to
/// their initial centroid were `reference_offsets`.
pub fn match_shape(
    reference_offsets: &[Vector<Real>],
    positions: &[Point<Real>],
    params: &ShapeMatchingParams,
) -> RigidTransform {
    let centroid = utils::center(positions);
    let offsets: Vec<_> = positions.iter().map(|pt| pt - centroid).collect();

    RigidTransform {
        rotation: best_fit_rotation(reference_offsets, &offsets, params),
        translation: centroid,
    }
}
