//! Loading of static geometry and chassis descriptions.

pub use self::chassis::{load_chassis, load_chassis_file, parse_chassis};
#[cfg(feature = "wavefront")]
pub use self::wavefront::{load_obj, load_obj_file};

mod chassis;
#[cfg(feature = "wavefront")]
mod wavefront;

/// Error raised while loading geometry or a chassis description.
///
/// A failed load never yields a partially built result.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The Wavefront file could not be parsed.
    #[cfg(feature = "wavefront")]
    #[error(transparent)]
    Obj(#[from] obj::ObjError),
    /// A record has missing, extra, or unparseable fields.
    #[error("line {line}: {message}")]
    Parse {
        /// The 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// A record starts with an unsupported keyword.
    #[error("line {line}: unknown record `{keyword}`")]
    UnknownRecord {
        /// The 1-based line number.
        line: usize,
        /// The offending keyword.
        keyword: String,
    },
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but only {len} vertices exist")]
    VertexIndexOutOfBounds {
        /// The 0-based index of the face, in file order.
        face: usize,
        /// The 0-based vertex index.
        index: usize,
        /// The number of vertices.
        len: usize,
    },
    /// A face has fewer than three vertices.
    #[error("face {face} has only {vertex_count} vertices")]
    DegenerateFace {
        /// The 0-based index of the face, in file order.
        face: usize,
        /// The number of vertices of the face.
        vertex_count: usize,
    },
}
