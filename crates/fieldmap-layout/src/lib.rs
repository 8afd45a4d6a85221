//! fieldmap-layout: Pure field layout core (sans-IO).
//!
//! Turns a validated [`Field`] and an [`EncodedDescriptor`] into:
//!
//! - a drawn scene (grid, border, letters, parking zone, boxes, cubes) on
//!   any [`DrawingSurface`], and
//! - one descriptor line per field element on any [`TextPanel`].
//!
//! This crate has **no I/O dependencies**. Fetching the field lives in
//! `fieldmap-source`; writing SVG/PNG files lives in `fieldmap-export`.

pub mod chain;
pub mod color;
pub mod descriptor;
pub mod diagonal;
pub mod encode;
pub mod mock;
pub mod scene;
pub mod transform;
pub mod types;

pub use chain::{ChainRole, ColorChain};
pub use color::{Color, Rgb};
pub use descriptor::{DescriptorEntry, TextPanel};
pub use diagonal::{Diagonal, DiagonalChooser, FixedDiagonal, RandomDiagonal};
pub use encode::{EncodedDescriptor, encode_descriptor, encode_point};
pub use scene::{Canvas, DrawingSurface, Scene, SceneRenderer, Shape, Stroke, TextStyle};
pub use transform::LayoutConfig;
pub use types::{BoxSpec, Field, FieldDescription, LayoutError, Point, Rect};

/// Render `field` into a fresh [`Scene`] with default geometry.
///
/// Convenience wrapper around [`SceneRenderer::render`] that collects the
/// descriptor text into a `Vec<String>`.
///
/// # Errors
///
/// Returns [`LayoutError::DescriptorRange`] if a chained record is
/// missing from `descriptor`.
pub fn render_to_scene(
    field: &Field,
    descriptor: &EncodedDescriptor,
    chooser: &mut impl DiagonalChooser,
) -> Result<(Scene, Vec<String>), LayoutError> {
    let mut scene = Scene::new();
    let mut panel = Vec::new();
    SceneRenderer::default().render(field, descriptor, &mut scene, &mut panel, chooser)?;
    Ok((scene, panel))
}
