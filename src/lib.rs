//! A minimal offline software rasterizer.
//!
//! Loads a textured triangle mesh, rasterizes its lit faces on the CPU with a
//! depth buffer, and writes a two-pass "rim" composite plus a depth
//! visualization as image files.
//!
//! # Quick Start
//!
//! ```ignore
//! use rimraster::prelude::*;
//!
//! let config = RenderConfig::default();
//! let model = Model::load("diablo3_pose", &config.model_dir)?;
//! let output = Engine::new(config.clone()).render(&model);
//! output.save(&config)?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod texture;
pub mod transform;

// Internal modules - used within the crate only
pub(crate) mod render;
pub(crate) mod triangle;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use engine::{Engine, OutputError, Pass, PassStats, RenderOutput};
pub use mesh::{LoadError, Mesh};
pub use model::Model;
pub use transform::Viewport;
pub use triangle::Face;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rimraster::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, Pass, RenderOutput};

    // Model
    pub use crate::mesh::{LoadError, Mesh};
    pub use crate::model::Model;
    pub use crate::texture::Texture;

    // Lighting & coordinates
    pub use crate::light::DirectionalLight;
    pub use crate::transform::Viewport;

    // Math
    pub use crate::math::matrix::{Mat4, Matrix};
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        BarycentricRasterizer, FlatShader, FrameBuffer, PixelShader, TextureShader, Triangle,
    };
}
