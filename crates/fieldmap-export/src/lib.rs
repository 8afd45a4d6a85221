//! fieldmap-export: Pure scene serializers (sans-IO).
//!
//! Converts a rendered [`fieldmap_layout::Scene`] into output formats:
//! SVG (vector, with orientation letters) and PNG (raster).

pub mod raster;
pub mod svg;

pub use crate::raster::{to_pixmap, to_png, to_rgba_image};
pub use crate::svg::{SvgMetadata, to_svg};

/// Errors that can occur while exporting a scene.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The scene has no usable drawing surface attached.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(&'static str),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}
