//! Shared types for the fieldmap layout core.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Number of corners in the parking-zone contour.
pub const PARKING_ZONE_CORNERS: usize = 4;

/// Number of boxes placed on the field.
pub const BOX_COUNT: usize = 5;

/// Side length of a box in field units.
///
/// Used when a box is described by its grid position instead of an
/// explicit rectangle.
pub const BOX_SIDE: f64 = 230.0;

/// A 2D point.
///
/// Field-native units ("sm") unless the caller documents pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (grows downwards).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate this point by an offset vector.
    #[must_use]
    pub fn offset_by(self, delta: Self) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Vector from `origin` to this point.
    #[must_use]
    pub fn relative_to(self, origin: Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }

    /// Midpoint between this point and another.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle in field units.
///
/// Field names follow the wire format of field descriptions
/// (`bott` rather than `bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Smallest y coordinate.
    pub top: f64,
    /// Smallest x coordinate.
    pub left: f64,
    /// Largest y coordinate.
    pub bott: f64,
    /// Largest x coordinate.
    pub right: f64,
}

impl Rect {
    /// Square of side `side` with its top-left corner at `origin`.
    #[must_use]
    pub fn square(origin: Point, side: f64) -> Self {
        Self {
            top: origin.y,
            left: origin.x,
            bott: origin.y + side,
            right: origin.x + side,
        }
    }

    /// Square of side [`BOX_SIDE`] centered on `center`.
    #[must_use]
    pub fn box_at(center: Point) -> Self {
        let half = BOX_SIDE / 2.0;
        Self::square(Point::new(center.x - half, center.y - half), BOX_SIDE)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bott - self.top
    }

    /// Whether `left < right` and `top < bott` hold.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.left < self.right && self.top < self.bott
    }
}

/// A box as it appears in a field description.
///
/// Either an explicit rectangle or the grid position of the box center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoxSpec {
    /// Explicit `{top, left, bott, right}` rectangle.
    Rect(Rect),
    /// Center position `{x, y}`; expands to a [`BOX_SIDE`] square.
    Position(Point),
}

impl BoxSpec {
    /// Resolve to the rectangle the box occupies.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        match self {
            Self::Rect(rect) => rect,
            Self::Position(center) => Rect::box_at(center),
        }
    }
}

/// A parsed, not yet validated, field description.
///
/// This is the JSON shape served by the field endpoint. Convert it to a
/// [`Field`] with [`Field::from_description`] to enforce the invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    /// Parking-zone contour, in winding order.
    pub parking_zone: Vec<Point>,
    /// Heading offset relative to the first parking-zone corner.
    pub parking_zone_direction: Point,
    /// Box placements.
    pub boxes: Vec<BoxSpec>,
    /// Color painted on each box.
    pub box_colors: Vec<String>,
    /// Color of the cube inside each box.
    pub cube_colors: Vec<String>,
}

/// Errors produced by the layout core.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A field description violates the field invariants.
    #[error("malformed field: {0}")]
    MalformedField(String),

    /// A color name is missing from the color table.
    #[error("unknown color name: {0:?}")]
    UnknownColor(String),

    /// Canvas geometry that cannot be drawn.
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    /// A chained record does not fit inside the encoded descriptor.
    #[error("descriptor of length {len} has no record at offset {offset}")]
    DescriptorRange {
        /// Character offset of the record that was requested.
        offset: usize,
        /// Length of the descriptor in bytes.
        len: usize,
    },
}

/// One validated, immutable field instance.
///
/// Built once from a [`FieldDescription`]; there is no way to mutate it
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    parking_zone: [Point; PARKING_ZONE_CORNERS],
    parking_zone_direction: Point,
    boxes: [Rect; BOX_COUNT],
    box_colors: [Color; BOX_COUNT],
    cube_colors: [Color; BOX_COUNT],
}

impl Field {
    /// Validate a description and build a field from it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MalformedField`] if a sequence has the wrong
    /// length, a color name is unknown, box colors repeat or lack
    /// `"Blue"`, or a box rectangle is inverted.
    pub fn from_description(description: &FieldDescription) -> Result<Self, LayoutError> {
        let parking_zone: [Point; PARKING_ZONE_CORNERS] =
            exact(&description.parking_zone, "parkingZone")?;

        let specs: [BoxSpec; BOX_COUNT] = exact(&description.boxes, "boxes")?;
        let boxes = specs.map(BoxSpec::to_rect);
        if let Some(i) = boxes.iter().position(|b| !b.is_well_formed()) {
            return Err(LayoutError::MalformedField(format!(
                "box {i} is not a valid rectangle: {:?}",
                boxes[i]
            )));
        }

        let box_colors = parse_colors(&description.box_colors, "boxColors")?;
        for (i, color) in box_colors.iter().enumerate() {
            if box_colors[..i].contains(color) {
                return Err(LayoutError::MalformedField(format!(
                    "boxColors repeats {color}"
                )));
            }
        }
        if !box_colors.contains(&Color::Blue) {
            return Err(LayoutError::MalformedField(
                "boxColors must contain Blue exactly once".to_owned(),
            ));
        }

        let cube_colors = parse_colors(&description.cube_colors, "cubeColors")?;

        Ok(Self {
            parking_zone,
            parking_zone_direction: description.parking_zone_direction,
            boxes,
            box_colors,
            cube_colors,
        })
    }

    /// Parking-zone corners in winding order.
    #[must_use]
    pub const fn parking_zone(&self) -> &[Point; PARKING_ZONE_CORNERS] {
        &self.parking_zone
    }

    /// Heading offset relative to the first parking-zone corner.
    #[must_use]
    pub const fn parking_zone_direction(&self) -> Point {
        self.parking_zone_direction
    }

    /// The heading point: first parking-zone corner plus the direction.
    #[must_use]
    pub fn parking_zone_heading(&self) -> Point {
        self.parking_zone[0].offset_by(self.parking_zone_direction)
    }

    /// Box rectangles.
    #[must_use]
    pub const fn boxes(&self) -> &[Rect; BOX_COUNT] {
        &self.boxes
    }

    /// Box colors, one per box.
    #[must_use]
    pub const fn box_colors(&self) -> &[Color; BOX_COUNT] {
        &self.box_colors
    }

    /// Cube colors, one per box.
    #[must_use]
    pub const fn cube_colors(&self) -> &[Color; BOX_COUNT] {
        &self.cube_colors
    }

    /// Index of the box painted `color`, if any.
    #[must_use]
    pub fn box_index_of(&self, color: Color) -> Option<usize> {
        self.box_colors.iter().position(|&c| c == color)
    }
}

impl TryFrom<FieldDescription> for Field {
    type Error = LayoutError;

    fn try_from(description: FieldDescription) -> Result<Self, Self::Error> {
        Self::from_description(&description)
    }
}

/// Copy a slice into a fixed-size array, failing on a length mismatch.
fn exact<T: Copy, const N: usize>(items: &[T], name: &str) -> Result<[T; N], LayoutError> {
    <[T; N]>::try_from(items).map_err(|_| {
        LayoutError::MalformedField(format!(
            "{name} must have exactly {N} entries, got {}",
            items.len()
        ))
    })
}

fn parse_colors(names: &[String], name: &str) -> Result<[Color; BOX_COUNT], LayoutError> {
    if names.len() != BOX_COUNT {
        return Err(LayoutError::MalformedField(format!(
            "{name} must have exactly {BOX_COUNT} entries, got {}",
            names.len()
        )));
    }
    let mut colors = [Color::Blue; BOX_COUNT];
    for (slot, raw) in colors.iter_mut().zip(names) {
        *slot = raw
            .parse()
            .map_err(|e: LayoutError| LayoutError::MalformedField(format!("{name}: {e}")))?;
    }
    Ok(colors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::mock_field_description;

    #[test]
    fn mock_description_builds_field() {
        let field = Field::from_description(&mock_field_description()).unwrap();
        assert_eq!(field.box_index_of(Color::Blue), Some(0));
        assert_eq!(field.cube_colors()[2], Color::Blue);
    }

    #[test]
    fn position_expands_to_centered_box() {
        let rect = BoxSpec::Position(Point::new(1150.0, 230.0)).to_rect();
        assert_eq!(rect.left, 1035.0);
        assert_eq!(rect.right, 1265.0);
        assert_eq!(rect.top, 115.0);
        assert_eq!(rect.bott, 345.0);
    }

    #[test]
    fn rectangle_form_is_kept_as_is() {
        let json = r#"{"top": 10, "left": 20, "bott": 240, "right": 250}"#;
        let spec: BoxSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec.to_rect(),
            Rect {
                top: 10.0,
                left: 20.0,
                bott: 240.0,
                right: 250.0
            }
        );
    }

    #[test]
    fn description_parses_from_camel_case_json() {
        let json = serde_json::to_string(&mock_field_description()).unwrap();
        assert!(json.contains("parkingZoneDirection"));
        let back: FieldDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mock_field_description());
    }

    #[test]
    fn wrong_box_count_is_malformed() {
        let mut description = mock_field_description();
        description.boxes.pop();
        let err = Field::from_description(&description).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedField(ref m) if m.contains("boxes")));
    }

    #[test]
    fn wrong_parking_zone_length_is_malformed() {
        let mut description = mock_field_description();
        description.parking_zone.push(Point::new(0.0, 0.0));
        assert!(matches!(
            Field::from_description(&description),
            Err(LayoutError::MalformedField(_))
        ));
    }

    #[test]
    fn missing_blue_is_malformed() {
        let mut description = mock_field_description();
        description.box_colors[0] = "Red".to_owned();
        assert!(matches!(
            Field::from_description(&description),
            Err(LayoutError::MalformedField(_))
        ));
    }

    #[test]
    fn repeated_box_color_is_malformed() {
        let mut description = mock_field_description();
        description.box_colors[4] = "Blue".to_owned();
        let err = Field::from_description(&description).unwrap_err();
        assert!(err.to_string().contains("repeats Blue"), "{err}");
    }

    #[test]
    fn unknown_color_is_malformed() {
        let mut description = mock_field_description();
        description.cube_colors[1] = "Purple".to_owned();
        let err = Field::from_description(&description).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedField(ref m) if m.contains("Purple")));
    }

    #[test]
    fn inverted_rectangle_is_malformed() {
        let mut description = mock_field_description();
        description.boxes[3] = BoxSpec::Rect(Rect {
            top: 100.0,
            left: 300.0,
            bott: 50.0,
            right: 400.0,
        });
        assert!(matches!(
            Field::from_description(&description),
            Err(LayoutError::MalformedField(_))
        ));
    }

    #[test]
    fn heading_adds_direction_to_first_corner() {
        let field = Field::from_description(&mock_field_description()).unwrap();
        assert_eq!(field.parking_zone_heading(), Point::new(230.0, 575.0));
    }
}
