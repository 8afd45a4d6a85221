//! Raster export via `tiny-skia`.
//!
//! Rasterizes the lines and rectangles of a recorded [`Scene`] with
//! anti-aliasing and encodes the result as PNG. Text labels are not
//! rasterized (tiny-skia has no text shaping); use the SVG export when
//! the orientation letters are needed.

use image::{ImageEncoder, Rgba, RgbaImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use fieldmap_layout::{Point, Rgb, Scene, Shape, Stroke};

use crate::ExportError;

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.0, color.1, color.2, 255);
    paint.anti_alias = true;
    paint
}

fn stroke_style(stroke: Stroke) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: px(stroke.width),
        ..tiny_skia::Stroke::default()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn px(v: f64) -> f32 {
    v as f32
}

fn line_path(from: Point, to: Point) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(px(from.x), px(from.y));
    pb.line_to(px(to.x), px(to.y));
    pb.finish()
}

/// Rasterize a rendered scene into a pixmap.
///
/// # Errors
///
/// Returns [`ExportError::SurfaceUnavailable`] if the scene was never
/// rendered or the pixmap cannot be allocated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_pixmap(scene: &Scene) -> Result<Pixmap, ExportError> {
    let canvas = scene.canvas().ok_or(ExportError::SurfaceUnavailable(
        "scene has not been rendered",
    ))?;
    let width = canvas.width.ceil() as u32;
    let height = canvas.height.ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::SurfaceUnavailable(
        "canvas has zero or oversized dimensions",
    ))?;
    let bg = canvas.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    let mut skipped_text = 0usize;
    for shape in scene.shapes() {
        match shape {
            Shape::Line { from, to, stroke } => {
                if let Some(path) = line_path(*from, *to) {
                    pixmap.stroke_path(
                        &path,
                        &paint(stroke.color),
                        &stroke_style(*stroke),
                        Transform::identity(),
                        None,
                    );
                }
            }
            Shape::Rect {
                origin,
                width,
                height,
                fill,
                stroke,
            } => {
                let Some(rect) =
                    tiny_skia::Rect::from_xywh(px(origin.x), px(origin.y), px(*width), px(*height))
                else {
                    continue;
                };
                let path = PathBuilder::from_rect(rect);
                pixmap.fill_path(
                    &path,
                    &paint(*fill),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
                pixmap.stroke_path(
                    &path,
                    &paint(stroke.color),
                    &stroke_style(*stroke),
                    Transform::identity(),
                    None,
                );
            }
            Shape::Text { .. } => skipped_text += 1,
        }
    }
    if skipped_text > 0 {
        tracing::debug!(skipped_text, "text labels are not rasterized");
    }
    Ok(pixmap)
}

/// Rasterize a rendered scene into a straight-alpha RGBA image.
///
/// # Errors
///
/// Same as [`to_pixmap`].
#[allow(clippy::cast_possible_truncation)]
pub fn to_rgba_image(scene: &Scene) -> Result<RgbaImage, ExportError> {
    let pixmap = to_pixmap(scene)?;
    let (width, height) = (pixmap.width(), pixmap.height());

    // Convert the pixmap (premultiplied RGBA) to an `RgbaImage` (straight RGBA).
    let data = pixmap.data();
    let mut img = RgbaImage::new(width, height);
    for (i, pixel) in img.pixels_mut().enumerate() {
        let off = i * 4;
        let a = data[off + 3];
        if a == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            let r = u16::from(data[off]) * 255 / u16::from(a);
            let g = u16::from(data[off + 1]) * 255 / u16::from(a);
            let b = u16::from(data[off + 2]) * 255 / u16::from(a);
            *pixel = Rgba([r as u8, g as u8, b as u8, a]);
        }
    }
    Ok(img)
}

/// Rasterize a rendered scene and encode it as PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::SurfaceUnavailable`] as [`to_pixmap`] does,
/// or [`ExportError::Image`] if PNG encoding fails.
pub fn to_png(scene: &Scene) -> Result<Vec<u8>, ExportError> {
    let img = to_rgba_image(scene)?;
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}
