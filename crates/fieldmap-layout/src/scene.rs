//! Scene rendering: grid, border, letters, parking zone, boxes and cubes.
//!
//! [`SceneRenderer::render`] draws onto any [`DrawingSurface`]. The
//! [`Scene`] surface records shapes in memory; exporters turn a recorded
//! scene into SVG or PNG.
//!
//! All positions handed to a surface are canvas pixels. Field-native
//! values go through the renderer's [`LayoutConfig`] first.

use crate::chain::ColorChain;
use crate::color::Rgb;
use crate::descriptor::{self, DescriptorEntry, TextPanel};
use crate::diagonal::DiagonalChooser;
use crate::encode::EncodedDescriptor;
use crate::transform::LayoutConfig;
use crate::types::{Field, LayoutError, Point, Rect};

/// Side of a cube face in field units.
pub const CUBE_FACE: f64 = 60.0;

/// Top-left offsets of the four cube faces inside a box, in field units.
pub const CUBE_FACE_OFFSETS: [(f64, f64); 4] =
    [(85.0, 0.0), (0.0, 85.0), (170.0, 85.0), (85.0, 170.0)];

/// Offset of the orientation letters from the canvas edge, in pixels.
const LETTER_INSET: f64 = 10.0;

/// Arm length of a grid cross, in pixels.
const CROSS_SIZE: f64 = 5.0;

const CROSS_COLOR: Rgb = Rgb::from_hex(0x888888);
const LETTER_COLOR: Rgb = Rgb::from_hex(0xff1010);
const PARKING_ENTRY_COLOR: Rgb = Rgb::from_hex(0x00aa00);

const BORDER_WIDTH: f64 = 5.0;
const PARKING_ZONE_WIDTH: f64 = 3.0;
const OUTLINE_WIDTH: f64 = 1.0;

/// Size and background of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Background fill.
    pub background: Rgb,
}

/// Stroke style for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line width in pixels.
    pub width: f64,
    /// Line color.
    pub color: Rgb,
}

impl Stroke {
    #[must_use]
    pub const fn new(width: f64, color: Rgb) -> Self {
        Self { width, color }
    }
}

/// Style for text labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name.
    pub font_family: &'static str,
    /// Font size in pixels.
    pub font_size: f64,
    /// Fill color.
    pub color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial",
            font_size: 9.0,
            color: LETTER_COLOR,
        }
    }
}

/// One recorded drawing primitive, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A straight segment.
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// A filled, outlined rectangle.
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Rgb,
        stroke: Stroke,
    },
    /// A text label anchored at its top-left corner.
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
}

/// Something the renderer can draw on.
pub trait DrawingSurface {
    /// (Re)initialize the surface, discarding previous content.
    fn begin(&mut self, canvas: Canvas);

    /// Draw a straight segment.
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Draw a filled rectangle with an outline.
    fn rect(&mut self, origin: Point, width: f64, height: f64, fill: Rgb, stroke: Stroke);

    /// Draw a text label.
    fn text(&mut self, at: Point, text: &str, style: &TextStyle);
}

/// In-memory drawing surface recording every shape in draw order.
///
/// Starts uninitialized; [`DrawingSurface::begin`] makes it ready and
/// clears anything drawn by a previous render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    canvas: Option<Canvas>,
    shapes: Vec<Shape>,
}

impl Scene {
    /// An uninitialized scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas set by the last `begin`, or `None` if never rendered.
    #[must_use]
    pub const fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Recorded shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl DrawingSurface for Scene {
    fn begin(&mut self, canvas: Canvas) {
        self.canvas = Some(canvas);
        self.shapes.clear();
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.shapes.push(Shape::Line { from, to, stroke });
    }

    fn rect(&mut self, origin: Point, width: f64, height: f64, fill: Rgb, stroke: Stroke) {
        self.shapes.push(Shape::Rect {
            origin,
            width,
            height,
            fill,
            stroke,
        });
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.shapes.push(Shape::Text {
            at,
            text: text.to_owned(),
            style: style.clone(),
        });
    }
}

/// Placement of a contour drawn in local coordinates.
///
/// Local coordinates are relative to the contour's first point. The
/// contour is anchored at `position` with `pivot` as its local anchor,
/// so `pivot` lands on `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPlacement {
    /// Local anchor point.
    pub pivot: Point,
    /// Canvas position of the anchor.
    pub position: Point,
}

impl ContourPlacement {
    /// Map a local point to canvas pixels.
    #[must_use]
    pub fn place(&self, local: Point) -> Point {
        self.position.offset_by(local.relative_to(self.pivot))
    }
}

/// Draws a field onto a surface and its descriptor text onto a panel.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    config: LayoutConfig,
}

impl SceneRenderer {
    /// Renderer using the given canvas geometry.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] if `config` fails
    /// [`LayoutConfig::validate`].
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Canvas geometry in use.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Render `field` with `descriptor`.
    ///
    /// The descriptor entries are computed before anything is drawn, so
    /// a descriptor that does not fit the field leaves both `surface`
    /// and `panel` untouched. Returns the entries appended to `panel`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DescriptorRange`] if a chained record is
    /// missing from `descriptor`.
    pub fn render(
        &self,
        field: &Field,
        descriptor: &EncodedDescriptor,
        surface: &mut impl DrawingSurface,
        panel: &mut impl TextPanel,
        chooser: &mut impl DiagonalChooser,
    ) -> Result<Vec<DescriptorEntry>, LayoutError> {
        let chain = ColorChain::resolve(field);
        if !descriptor.matches_parking_zone(field) {
            tracing::warn!(
                descriptor = descriptor.as_str(),
                "descriptor parking-zone record does not match the field"
            );
        }
        let entries = descriptor::describe_field(field, &chain, descriptor, chooser)?;

        let side = self.config.canvas_side_px();
        surface.begin(Canvas {
            width: side,
            height: side,
            background: Rgb::WHITE,
        });
        self.draw_letters(surface);
        self.draw_crosses(surface);
        self.draw_border(surface);
        self.draw_parking_zone(surface, field);
        self.draw_boxes(surface, field);
        tracing::debug!(chained = ?chain.chained(), "field drawn");

        descriptor::publish(&entries, panel);
        Ok(entries)
    }

    /// Letters `A`, `B`, ... along the top and left edges, one per grid
    /// line.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn draw_letters(&self, surface: &mut impl DrawingSurface) {
        let style = TextStyle::default();
        let step = self.config.grid_step_px();
        for i in 1..=self.config.grid_cells() {
            let letter = char::from(b'A' + (i - 1) as u8).to_string();
            let along = i as f64 * step;
            surface.text(Point::new(along, LETTER_INSET), &letter, &style);
            surface.text(Point::new(LETTER_INSET, along), &letter, &style);
        }
    }

    /// A small cross at every grid node.
    #[allow(clippy::cast_precision_loss)]
    fn draw_crosses(&self, surface: &mut impl DrawingSurface) {
        let stroke = Stroke::new(OUTLINE_WIDTH, CROSS_COLOR);
        let step = self.config.grid_step_px();
        let nodes = self.config.grid_cells();
        let half = CROSS_SIZE / 2.0;
        for i in 0..=nodes {
            for j in 0..=nodes {
                let x = self.config.margin + i as f64 * step;
                let y = self.config.margin + j as f64 * step;
                surface.line(Point::new(x - half, y), Point::new(x + half, y), stroke);
                surface.line(Point::new(x, y - half), Point::new(x, y + half), stroke);
            }
        }
    }

    /// Closed outline of the field, pulled in so the thick stroke stays
    /// on the canvas.
    fn draw_border(&self, surface: &mut impl DrawingSurface) {
        let stroke = Stroke::new(BORDER_WIDTH, Rgb::BLACK);
        let near = self.config.margin;
        let size = self.config.field_size_px();
        let right = near + size - 2.0;
        let bottom = near + size - 3.0;
        let corners = [
            Point::new(near, near),
            Point::new(right, near),
            Point::new(right, bottom),
            Point::new(near, bottom),
        ];
        for (k, &from) in corners.iter().enumerate() {
            surface.line(from, corners[(k + 1) % corners.len()], stroke);
        }
    }

    /// Parking-zone contour through its four corners: the entry edge
    /// (first to second corner) in green, the next two edges in black.
    fn draw_parking_zone(&self, surface: &mut impl DrawingSurface, field: &Field) {
        let px = field.parking_zone().map(|p| self.config.place(p));
        let local = px.map(|p| p.relative_to(px[0]));
        let placement = self.parking_zone_placement(field);

        let entry = Stroke::new(PARKING_ZONE_WIDTH, PARKING_ENTRY_COLOR);
        let edge = Stroke::new(PARKING_ZONE_WIDTH, Rgb::BLACK);
        let placed = local.map(|p| placement.place(p));
        surface.line(placed[0], placed[1], entry);
        surface.line(placed[1], placed[2], edge);
        surface.line(placed[2], placed[3], edge);
    }

    /// Placement of the parking-zone contour: anchored at the midpoint of
    /// the diagonal from the first to the third corner.
    #[must_use]
    pub fn parking_zone_placement(&self, field: &Field) -> ContourPlacement {
        let zone = field.parking_zone();
        let p0 = self.config.place(zone[0]);
        let p2 = self.config.place(zone[2]);
        let diagonal = p2.relative_to(p0);
        ContourPlacement {
            pivot: Point::new(diagonal.x / 2.0, diagonal.y / 2.0),
            position: p0.midpoint(p2),
        }
    }

    /// Each box in its own color, then the four faces of its cube.
    fn draw_boxes(&self, surface: &mut impl DrawingSurface, field: &Field) {
        for (i, rect) in field.boxes().iter().enumerate() {
            self.draw_rect(surface, rect, field.box_colors()[i].rgb());
            let cube = field.cube_colors()[i].rgb();
            for face in cube_faces(rect) {
                self.draw_rect(surface, &face, cube);
            }
        }
    }

    fn draw_rect(&self, surface: &mut impl DrawingSurface, rect: &Rect, fill: Rgb) {
        surface.rect(
            self.config.place(rect.origin()),
            self.config.to_pixels(rect.width()),
            self.config.to_pixels(rect.height()),
            fill,
            Stroke::new(OUTLINE_WIDTH, Rgb::BLACK),
        );
    }
}

/// The four cube-face rectangles inside `rect`, in field units.
#[must_use]
pub fn cube_faces(rect: &Rect) -> [Rect; 4] {
    CUBE_FACE_OFFSETS
        .map(|(dx, dy)| Rect::square(Point::new(rect.left + dx, rect.top + dy), CUBE_FACE))
}
