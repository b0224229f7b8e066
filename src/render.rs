//! Drawing the grid and its isolines into a pixel buffer.

use crate::{
    buffer::Buffer2d,
    grid::GridModel,
    isoline::IsolineExtractor,
    pipeline::Pipeline,
    rasterizer::{Lines, Triangles},
    Target,
};
use vek::{Rgba, Vec2};

/// Background colour of every frame.
pub const CLEAR_COLOUR: u32 = 0x00FF_FFFF;

/// Map a field value to a colour: positive values shade from white towards red, negative ones towards blue.
///
/// The result is not clamped, so that interpolating between vertices behaves like a vertex-coloured mesh. Clamping
/// happens when the colour is packed.
pub fn value_colour(v: f32) -> Rgba<f32> {
    let f = if v > 0.0 { 1.0 } else { -1.0 };
    let grey = 1.0 - v.abs();
    Rgba::new(f32::max(f, grey), grey, f32::max(-f, grey), 1.0)
}

/// Pack a colour as `0x00RRGGBB`, clamping each channel to `[0, 1]`.
pub fn pack_rgb(colour: Rgba<f32>) -> u32 {
    let channel = |c: f32| {
        let c = if c.is_nan() { 0.0 } else { c.max(0.0).min(1.0) };
        (c * 255.0 + 0.5) as u32
    };
    (channel(colour.r) << 16) | (channel(colour.g) << 8) | channel(colour.b)
}

/// Split a `0x00RRGGBB` pixel into its channels.
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

/// Shades indexed grid triangles by the field value at each vertex.
pub struct FieldPipeline<'a> {
    pub vertices: &'a [Vec2<f32>],
    pub values: &'a [f32],
}

impl<'a> Pipeline for FieldPipeline<'a> {
    type Vertex = u32;
    type VertexData = Rgba<f32>;
    type Pixel = u32;

    #[inline(always)]
    fn vertex(&self, index: &u32) -> ([f32; 2], Rgba<f32>) {
        let i = *index as usize;
        match (self.vertices.get(i), self.values.get(i)) {
            (Some(pos), Some(&v)) => ([pos.x, pos.y], value_colour(v)),
            _ => ([f32::NAN; 2], Rgba::zero()),
        }
    }

    #[inline(always)]
    fn fragment(&self, colour: Rgba<f32>) -> u32 {
        pack_rgb(colour)
    }
}

/// Draws indexed isoline segments in a single colour.
pub struct IsolinePipeline<'a> {
    pub points: &'a [Vec2<f32>],
    pub colour: Rgba<f32>,
}

impl<'a> Pipeline for IsolinePipeline<'a> {
    type Vertex = u32;
    type VertexData = Rgba<f32>;
    type Pixel = u32;

    #[inline(always)]
    fn vertex(&self, index: &u32) -> ([f32; 2], Rgba<f32>) {
        match self.points.get(*index as usize) {
            Some(p) => ([p.x, p.y], self.colour),
            None => ([f32::NAN; 2], self.colour),
        }
    }

    #[inline(always)]
    fn fragment(&self, colour: Rgba<f32>) -> u32 {
        pack_rgb(colour)
    }
}

/// Draws a full frame: the shaded grid with its isolines on top.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Renderer {
    pub background: u32,
    pub isoline_colour: Rgba<f32>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: CLEAR_COLOUR,
            isoline_colour: Rgba::black(),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&self, grid: &GridModel, isolines: &IsolineExtractor, frame: &mut Buffer2d<u32>) {
        frame.clear(self.background);

        FieldPipeline {
            vertices: grid.vertices(),
            values: grid.values(),
        }
        .render::<Triangles, _>(grid.triangle_indices(), frame);

        IsolinePipeline {
            points: isolines.points(),
            colour: self.isoline_colour,
        }
        .render::<Lines, _>(isolines.indices(), frame);
    }
}

/// Write a frame to disk as an 8-bit RGB PNG.
#[cfg(feature = "image")]
pub fn save_png<P: AsRef<std::path::Path>>(frame: &Buffer2d<u32>, path: P) -> crate::error::Result<()> {
    let [w, h] = frame.size();
    let bytes = frame
        .raw()
        .iter()
        .flat_map(|&pixel| unpack_rgb(pixel))
        .collect::<Vec<_>>();
    image_::save_buffer_with_format(
        path.as_ref(),
        &bytes,
        w as u32,
        h as u32,
        image_::ColorType::Rgb8,
        image_::ImageFormat::Png,
    )?;
    log::info!("saved {}x{} frame to {}", w, h, path.as_ref().display());
    Ok(())
}
