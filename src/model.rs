//! A textured mesh loaded by name.
//!
//! A [`Model`] pairs a [`Mesh`] with its diffuse [`Texture`]. Both files live
//! in the same directory and share a base name:
//!
//! ```text
//! <dir>/<name>.obj
//! <dir>/<name>_diffuse.tga
//! ```

use std::path::{Path, PathBuf};

use image::Rgb;
use log::info;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::{LoadError, Mesh};
use crate::texture::Texture;
use crate::triangle::Face;

/// A mesh and the diffuse texture it is painted with. Read-only once loaded.
#[derive(Clone, Debug)]
pub struct Model {
    name: String,
    mesh: Mesh,
    texture: Texture,
}

impl Model {
    pub fn new(name: impl Into<String>, mesh: Mesh, texture: Texture) -> Self {
        Self {
            name: name.into(),
            mesh,
            texture,
        }
    }

    /// Load `<dir>/<name>.obj` and `<dir>/<name>_diffuse.tga`.
    pub fn load(name: &str, dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mesh_path = Self::mesh_path(name, &dir);
        info!("loading model {}", mesh_path.display());
        let mesh = Mesh::from_obj(&mesh_path)?;

        let texture_path = Self::texture_path(name, &dir);
        let texture =
            Texture::from_file(&texture_path).map_err(|source| LoadError::TextureFileLoad {
                path: texture_path,
                source,
            })?;

        let model = Self::new(name, mesh, texture);
        info!(
            "## vertices : {} ## texture vertices : {} ## faces : {} ##",
            model.vertex_count(),
            model.mesh.texture_coords().len(),
            model.face_count()
        );
        Ok(model)
    }

    pub fn mesh_path(name: &str, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(format!("{name}.obj"))
    }

    pub fn texture_path(name: &str, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(format!("{name}_diffuse.tga"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices().len()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.faces().len()
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.mesh.vertex(index)
    }

    pub fn texture_coord(&self, index: usize) -> Option<Vec2> {
        self.mesh.texture_coord(index)
    }

    pub fn face(&self, index: usize) -> Option<Face> {
        self.mesh.face(index)
    }

    pub fn texture_size(&self) -> (u32, u32) {
        self.texture.size()
    }

    /// Diffuse color at a normalized texture coordinate.
    pub fn diffuse(&self, uv: Vec2) -> Rgb<u8> {
        self.texture.sample(uv)
    }
}
