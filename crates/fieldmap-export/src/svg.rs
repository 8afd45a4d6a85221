//! SVG export serializer.
//!
//! Converts a recorded [`Scene`] into an SVG string using the [`svg`]
//! crate for document construction and XML escaping. Each recorded shape
//! becomes one element, in draw order, on top of a background rectangle.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::{Description, Element, Line, Rectangle, Title};
use svg::node::{Node, Text};

use fieldmap_layout::{Scene, Shape};

use crate::ExportError;

/// Metadata to embed in the SVG document.
///
/// When present, a `<title>` and/or `<desc>` element is emitted right
/// after the opening `<svg>` tag.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    ///
    /// Typically the descriptor text of the rendered field, one entry per
    /// line.
    pub description: Option<&'a str>,
}

/// Serialize a rendered scene into an SVG document.
///
/// # Errors
///
/// Returns [`ExportError::SurfaceUnavailable`] if the scene was never
/// rendered.
///
/// # Examples
///
/// ```
/// use fieldmap_layout::{Diagonal, FixedDiagonal, encode_descriptor, mock, render_to_scene};
/// use fieldmap_export::{SvgMetadata, to_svg};
///
/// let field = mock::mock_field();
/// let descriptor = encode_descriptor(&field, &mut FixedDiagonal(Diagonal::Main));
/// let (scene, _) = render_to_scene(&field, &descriptor, &mut FixedDiagonal(Diagonal::Main)).unwrap();
/// let metadata = SvgMetadata { title: Some("field"), ..SvgMetadata::default() };
/// let svg = to_svg(&scene, &metadata).unwrap();
/// assert!(svg.contains("<title>field</title>"));
/// assert!(svg.contains(r#"viewBox="0 0 606 606""#));
/// ```
pub fn to_svg(scene: &Scene, metadata: &SvgMetadata<'_>) -> Result<String, ExportError> {
    let canvas = scene.canvas().ok_or(ExportError::SurfaceUnavailable(
        "scene has not been rendered",
    ))?;

    let mut doc = Document::new()
        .set("width", canvas.width)
        .set("height", canvas.height)
        .set("viewBox", (0, 0, canvas.width, canvas.height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    doc = doc.add(
        Rectangle::new()
            .set("width", canvas.width)
            .set("height", canvas.height)
            .set("fill", canvas.background.to_css()),
    );

    for shape in scene.shapes() {
        doc = match shape {
            Shape::Line { from, to, stroke } => doc.add(
                Line::new()
                    .set("x1", from.x)
                    .set("y1", from.y)
                    .set("x2", to.x)
                    .set("y2", to.y)
                    .set("stroke", stroke.color.to_css())
                    .set("stroke-width", stroke.width),
            ),
            Shape::Rect {
                origin,
                width,
                height,
                fill,
                stroke,
            } => doc.add(
                Rectangle::new()
                    .set("x", origin.x)
                    .set("y", origin.y)
                    .set("width", *width)
                    .set("height", *height)
                    .set("fill", fill.to_css())
                    .set("stroke", stroke.color.to_css())
                    .set("stroke-width", stroke.width),
            ),
            Shape::Text { at, text, style } => {
                let mut el = Element::new("text");
                el.assign("x", at.x);
                el.assign("y", at.y);
                el.assign("font-family", style.font_family);
                el.assign("font-size", style.font_size);
                el.assign("fill", style.color.to_css());
                // Text is anchored at its top-left corner, like the scene.
                el.assign("dominant-baseline", "hanging");
                el.append(Text::new(text.as_str()));
                doc.add(el)
            }
        };
    }

    // The svg crate omits the XML declaration, so we prepend it.
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n"))
}
