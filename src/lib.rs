//! Sample an animated scalar field over a grid and extract its isolines with marching squares.
//!
//! The core is renderer-agnostic: [`GridModel`] and [`IsolineExtractor`] expose plain vertex, value and index
//! buffers that any graphics API can upload. A small software rasterizer is included to turn those buffers into
//! pixels without a GPU.
//!
//! ```
//! use isofield::{Command, Scene, SceneConfig};
//!
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.apply(Command::IncreaseDetail);
//! let extraction = scene.tick(1.0 / 60.0);
//! assert_eq!(scene.isoline_indices().len(), extraction.segments * 2);
//! ```

pub mod buffer;
pub mod error;
pub mod field;
pub mod grid;
pub mod isoline;
pub mod math;
pub mod pipeline;
pub mod rasterizer;
pub mod render;
pub mod resolution;
pub mod scene;

// Reexports
pub use self::{
    buffer::Buffer2d,
    error::{Error, Result},
    field::{Bumps, ScalarField},
    grid::{Dimensions, GridModel, Limits},
    isoline::{Extraction, IsolineExtractor, LevelRange, LevelSet},
    pipeline::Pipeline,
    rasterizer::{Lines, Rasterizer, Triangles},
    render::Renderer,
    resolution::ResolutionController,
    scene::{Command, Scene, SceneConfig},
};

/// Represents a 2-dimensional rendering target that can have pixel data read and written to it.
pub trait Target {
    /// The type of items contained within this target.
    type Texel: Clone;

    /// Get the dimensions of the target.
    fn size(&self) -> [usize; 2];

    /// Read the texel at the given position, or `None` if it is out of bounds.
    fn read(&self, pos: [usize; 2]) -> Option<Self::Texel>;

    /// Write a texel at the given position. Writes out of bounds are ignored.
    fn write(&mut self, pos: [usize; 2], texel: Self::Texel);

    /// Clear the target with copies of the specified texel.
    fn clear(&mut self, texel: Self::Texel);
}
