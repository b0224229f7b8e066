use thiserror::Error;

/// Errors raised while building a configuration or exporting a frame.
///
/// Nothing in the per-frame path returns these: once a configuration has been validated, out-of-range requests are
/// clamped and degenerate geometry is dropped.
#[derive(Debug, Error)]
pub enum Error {
    /// A grid limit was zero, which would allow a zero-sized grid.
    #[error("grid limits must be at least 1x1, got {max_cols}x{max_rows}")]
    ZeroCapacity { max_cols: usize, max_rows: usize },

    /// A level range was empty, inverted, or not finite.
    #[error("invalid level range [{min}, {max}]")]
    InvalidLevelRange { min: f32, max: f32 },

    /// Writing a rendered frame to disk failed.
    #[cfg(feature = "image")]
    #[error("failed to export frame: {0}")]
    Image(#[from] image_::ImageError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
