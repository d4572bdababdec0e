//! Indexed triangle mesh and its OBJ loader.
//!
//! Only the subset of Wavefront OBJ the renderer needs is understood:
//!
//! ```text
//! v  <x> <y> <z>
//! vt <u> <v> [<w>]
//! f  <v>/<t>/<n> <v>/<t>/<n> <v>/<t>/<n>
//! ```
//!
//! Indices in the file are 1-based and stored 0-based. Normal indices are
//! parsed but discarded. Every other line is ignored.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::triangle::Face;

/// Errors raised while loading a model from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The `.obj` file could not be opened or read.
    MeshFileOpen { path: PathBuf, source: io::Error },
    /// The diffuse texture is missing or could not be decoded.
    TextureFileLoad {
        path: PathBuf,
        source: image::ImageError,
    },
    /// A face line without three `v/t/n` triples, or with bad tokens.
    MalformedFace { line: usize, content: String },
    /// A `v` or `vt` line whose coordinates do not parse.
    MalformedVertex { line: usize, content: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MeshFileOpen { path, source } => {
                write!(f, "cannot open mesh file {}: {}", path.display(), source)
            }
            LoadError::TextureFileLoad { path, source } => {
                write!(f, "cannot load texture {}: {}", path.display(), source)
            }
            LoadError::MalformedFace { line, content } => {
                write!(f, "malformed face on line {}: {:?}", line, content)
            }
            LoadError::MalformedVertex { line, content } => {
                write!(f, "malformed vertex on line {}: {:?}", line, content)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::MeshFileOpen { source, .. } => Some(source),
            LoadError::TextureFileLoad { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Vertex positions, texture coordinates and the faces indexing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    texture_coords: Vec<Vec2>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, texture_coords: Vec<Vec2>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            texture_coords,
            faces,
        }
    }

    /// Read and parse an OBJ file.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoadError::MeshFileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Parse OBJ text.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let mut mesh = Mesh::default();

        for (number, line) in source.lines().enumerate() {
            let number = number + 1;
            if let Some(rest) = line.strip_prefix("v ") {
                let [x, y, z] = parse_floats::<3>(rest).ok_or_else(|| {
                    LoadError::MalformedVertex {
                        line: number,
                        content: line.to_string(),
                    }
                })?;
                mesh.vertices.push(Vec3::new(x, y, z));
            } else if let Some(rest) = line.strip_prefix("vt ") {
                let [u, v] = parse_floats::<2>(rest).ok_or_else(|| LoadError::MalformedVertex {
                    line: number,
                    content: line.to_string(),
                })?;
                mesh.texture_coords.push(Vec2::new(u, v));
            } else if let Some(rest) = line.strip_prefix("f ") {
                let face = parse_face(rest).ok_or_else(|| LoadError::MalformedFace {
                    line: number,
                    content: line.to_string(),
                })?;
                mesh.faces.push(face);
            }
        }

        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn texture_coords(&self) -> &[Vec2] {
        &self.texture_coords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    pub fn texture_coord(&self, index: usize) -> Option<Vec2> {
        self.texture_coords.get(index).copied()
    }

    pub fn face(&self, index: usize) -> Option<Face> {
        self.faces.get(index).copied()
    }

    /// Resolve a face's indices into its corner positions and texture
    /// coordinates. `None` if any index is out of range.
    pub fn face_corners(&self, face: &Face) -> Option<([Vec3; 3], [Vec2; 3])> {
        let mut positions = [Vec3::ZERO; 3];
        let mut uvs = [Vec2::ZERO; 3];
        for i in 0..3 {
            positions[i] = self.vertex(face.vertices[i])?;
            uvs[i] = self.texture_coord(face.texture_coords[i])?;
        }
        Some((positions, uvs))
    }
}

/// Parse the first `N` whitespace-separated floats; extra tokens (such as
/// the optional `w` of a `vt` line) are ignored.
fn parse_floats<const N: usize>(s: &str) -> Option<[f32; N]> {
    let mut values = [0.0; N];
    let mut tokens = s.split_whitespace();
    for value in values.iter_mut() {
        *value = tokens.next()?.parse().ok()?;
    }
    Some(values)
}

/// Parse one 1-based OBJ index into a 0-based one. Zero and negative
/// (relative) indices are rejected.
fn parse_index(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()?.checked_sub(1)
}

/// Parse the `v/t/n` triples of a face line. Triples past the third are
/// ignored since only triangles are rendered.
fn parse_face(s: &str) -> Option<Face> {
    let mut vertices = [0; 3];
    let mut texture_coords = [0; 3];
    let mut triples = s.split_whitespace();

    for i in 0..3 {
        let mut parts = triples.next()?.split('/');
        vertices[i] = parse_index(parts.next()?)?;
        texture_coords[i] = parse_index(parts.next()?)?;
        parse_index(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
    }

    Some(Face::new(vertices, texture_coords))
}
