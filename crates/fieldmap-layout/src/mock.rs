//! Fixture field used by tests, the mock field source, and the CLI's
//! `--mock` mode.

use crate::types::{BoxSpec, Field, FieldDescription, Point};

/// The fixture field description.
#[must_use]
pub fn mock_field_description() -> FieldDescription {
    FieldDescription {
        parking_zone: vec![
            Point::new(460.0, 805.0),
            Point::new(640.0, 491.0),
            Point::new(954.0, 671.0),
            Point::new(774.0, 985.0),
        ],
        parking_zone_direction: Point::new(-230.0, -230.0),
        boxes: [
            (1955.0, 1725.0),
            (1725.0, 920.0),
            (1150.0, 230.0),
            (1495.0, 1265.0),
            (1840.0, 575.0),
        ]
        .map(|(x, y)| BoxSpec::Position(Point::new(x, y)))
        .to_vec(),
        box_colors: ["Blue", "Green", "Orange", "Red", "Yellow"]
            .map(str::to_owned)
            .to_vec(),
        cube_colors: ["Green", "Orange", "Blue", "Yellow", "Red"]
            .map(str::to_owned)
            .to_vec(),
    }
}

/// The fixture field, validated.
///
/// # Panics
///
/// Never: the fixture satisfies every field invariant, which the unit
/// tests of this module check.
#[must_use]
#[allow(clippy::expect_used)]
pub fn mock_field() -> Field {
    Field::from_description(&mock_field_description()).expect("fixture field is valid")
}
