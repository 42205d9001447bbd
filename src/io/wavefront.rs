use crate::io::LoadError;
use crate::math::{Point, Real};
use crate::shape::{Triangle, TriangleSoup};
use obj::ObjData;
use std::io::Read;
use std::path::Path;

/// Reads the triangles of a Wavefront (`.obj`) file.
///
/// Only vertex positions and faces are used. Faces of every object and group are merged,
/// and faces with more than three vertices are fan-triangulated from their first vertex.
/// Degenerate triangles are discarded by [`TriangleSoup::new`].
///
/// The `obj` parser stores positions as `f32`: coordinates are rounded to single precision
/// before being widened to [`Real`]. Tracks needing more than about seven significant digits
/// should be built from a [`TriangleSoup`] directly.
///
/// This function is enabled by the `wavefront` feature flag.
pub fn load_obj<R: Read>(reader: R) -> Result<TriangleSoup, LoadError> {
    let data = ObjData::load_buf(reader)?;
    let vertices: Vec<_> = data
        .position
        .iter()
        .map(|v| Point::new(v[0] as Real, v[1] as Real, v[2] as Real))
        .collect();

    let polys = data
        .objects
        .iter()
        .flat_map(|object| object.groups.iter())
        .flat_map(|group| group.polys.iter());
    let mut triangles = Vec::new();

    for (face, poly) in polys.enumerate() {
        let indices = &poly.0;

        if indices.len() < 3 {
            return Err(LoadError::DegenerateFace {
                face,
                vertex_count: indices.len(),
            });
        }

        let mut corners = Vec::with_capacity(indices.len());
        for tuple in indices {
            let vertex = vertices
                .get(tuple.0)
                .ok_or(LoadError::VertexIndexOutOfBounds {
                    face,
                    index: tuple.0,
                    len: vertices.len(),
                })?;
            corners.push(*vertex);
        }

        for k in 1..corners.len() - 1 {
            triangles.push(Triangle::new(corners[0], corners[k], corners[k + 1]));
        }
    }

    log::debug!(
        "Loaded {} triangles from {} vertices.",
        triangles.len(),
        vertices.len()
    );

    Ok(TriangleSoup::new(triangles))
}

/// Reads the triangles of the Wavefront (`.obj`) file at `path`. See [`load_obj`].
///
/// This function is enabled by the `wavefront` feature flag.
pub fn load_obj_file(path: impl AsRef<Path>) -> Result<TriangleSoup, LoadError> {
    let file = std::fs::File::open(path)?;
    load_obj(std::io::BufReader::new(file))
}

#[cfg(test)]
mod test {
    use super::*;

    const QUAD: &str = "\
# a unit quad in the y = 0 plane
o ground
v 0 0 0
v 1 0 0
v 1 0 1
v 0 0 1
vn 0 1 0
f 1//1 2//1 3//1 4//1
";

    #[test]
    fn polygons_are_fan_triangulated() {
        let soup = load_obj(QUAD.as_bytes()).unwrap();
        let triangles = soup.triangles();

        assert_eq!(triangles.len(), 2);
        assert_eq!(
            triangles[0],
            Triangle::new(
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 1.0)
            )
        );
        assert_eq!(
            triangles[1],
            Triangle::new(
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 1.0),
                Point::new(0.0, 0.0, 1.0)
            )
        );
    }

    #[test]
    fn positions_have_single_precision() {
        let text = "v 0.1 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 3\n";
        let soup = load_obj(text.as_bytes()).unwrap();
        let a = soup.triangles()[0].a;

        assert_eq!(a.x, 0.1f32 as Real);
        assert_ne!(a.x, 0.1);
    }

    #[test]
    fn out_of_range_vertex_fails_the_load() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9\n";
        let err = load_obj(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::VertexIndexOutOfBounds {
                face: 1,
                index: 8,
                len: 3
            }
        ));
    }
}
