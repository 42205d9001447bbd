use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Matrix, Real};
use crate::shape::Triangle;

/// An unstructured list of triangles, with no connectivity information.
///
/// This is the static geometry the chassis collides with. A `TriangleSoup` never contains
/// degenerate (zero-area) or non-finite triangles: they are discarded at construction time since
/// they have no well-defined closest point.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSoup {
    triangles: Vec<Triangle>,
}

impl TriangleSoup {
    /// Creates a new triangle soup, discarding every degenerate or non-finite triangle.
    pub fn new(mut triangles: Vec<Triangle>) -> Self {
        let num_input = triangles.len();
        triangles.retain(|tri| tri.is_finite() && !tri.is_affinely_dependent());

        let num_discarded = num_input - triangles.len();
        if num_discarded > 0 {
            log::warn!(
                "Discarded {} degenerate triangle(s) out of {}.",
                num_discarded,
                num_input
            );
        }

        Self { triangles }
    }

    /// The triangles of this soup.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Consumes `self` and returns its triangles.
    #[inline]
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    /// The number of triangles of this soup.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Does this soup contain no triangle at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The AABB enclosing every vertex of this soup.
    ///
    /// Returns an invalid AABB if the soup is empty.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.triangles.iter().flat_map(|tri| tri.vertices()))
    }

    /// Applies the rigid transformation `m` to every vertex of this soup.
    pub fn transform_by(&mut self, m: &Isometry<Real>) {
        for tri in &mut self.triangles {
            *tri = tri.transformed(m);
        }
    }

    /// Applies the linear map `m` (e.g. an axis flip between asset conventions) to every vertex
    /// of this soup.
    ///
    /// Triangles that become degenerate (for example if `m` is singular) are discarded.
    pub fn linearly_transform_by(&mut self, m: &Matrix<Real>) {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| tri.linearly_transformed(m))
            .collect();
        *self = Self::new(triangles);
    }
}

impl From<Vec<Triangle>> for TriangleSoup {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::new(triangles)
    }
}
