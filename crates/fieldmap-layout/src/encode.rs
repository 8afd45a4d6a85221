//! Point encoding and the fixed-width encoded descriptor.
//!
//! # Record schema
//!
//! An encoded descriptor is a run of [`RECORD_WIDTH`]-character records:
//!
//! ```text
//! o+0    o+1..o+4   o+4   o+5..o+8   o+8
//! <tag>  <point 1>  ' '   <point 2>  ';'
//! ```
//!
//! | offset | tag | content                                  |
//! |--------|-----|------------------------------------------|
//! | 0      | `P` | parking zone: first corner, heading      |
//! | 9      | `B` | Blue box                                 |
//! | 18     | `F` | first box on the color chain             |
//! | 27     | `S` | second box on the color chain            |
//!
//! Consumers read only the two point slices. Tags and separators exist
//! so a descriptor stays readable when printed.
//!
//! Nothing in the descriptor identifies the field it was produced for;
//! [`EncodedDescriptor::matches_parking_zone`] is the only cross-check.

use std::fmt;

use crate::chain::{ChainRole, ColorChain};
use crate::diagonal::DiagonalChooser;
use crate::transform::{GRID_CELLS, GRID_STEP};
use crate::types::{Field, LayoutError, Point};

/// Width of one descriptor record in characters.
pub const RECORD_WIDTH: usize = 9;

/// Width of one encoded point in characters.
pub const POINT_WIDTH: usize = 3;

/// Offset of the parking-zone record.
pub const PARKING_ZONE_OFFSET: usize = 0;

/// Tag of the parking-zone record.
const PARKING_ZONE_TAG: char = 'P';

/// Total length of a descriptor produced by [`encode_descriptor`].
pub const DESCRIPTOR_LEN: usize = RECORD_WIDTH * (1 + ChainRole::ALL.len());

/// Encode a field point as a 3-character grid reference.
///
/// The x cell becomes a column letter `A..T`, the y cell a zero-padded
/// 1-based row number `01..20`. Coordinates outside the field clamp to
/// the nearest edge cell. The grid is the fixed one drawn on the map;
/// [`LayoutConfig::validate`](crate::LayoutConfig::validate) rejects any
/// other.
///
/// # Examples
///
/// ```
/// use fieldmap_layout::{Point, encode_point};
///
/// assert_eq!(encode_point(Point::new(460.0, 805.0)), "E08");
/// assert_eq!(encode_point(Point::new(0.0, 2300.0)), "A20");
/// ```
#[must_use]
pub fn encode_point(point: Point) -> String {
    let column = char::from(b'A' + grid_cell(point.x));
    let row = grid_cell(point.y) + 1;
    format!("{column}{row:02}")
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn grid_cell(v: f64) -> u8 {
    let last = (GRID_CELLS - 1) as f64;
    (v / GRID_STEP).floor().clamp(0.0, last) as u8
}

/// A descriptor string produced for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDescriptor(String);

impl EncodedDescriptor {
    /// Wrap a descriptor string.
    #[must_use]
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    /// The raw descriptor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two point slices of the record starting at `offset`:
    /// `[offset+1, offset+4)` and `[offset+5, offset+8)`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DescriptorRange`] if either slice falls
    /// outside the descriptor or splits a multi-byte character.
    pub fn record(&self, offset: usize) -> Result<(&str, &str), LayoutError> {
        let slice = |start: usize| {
            self.0
                .get(start..start + POINT_WIDTH)
                .ok_or(LayoutError::DescriptorRange {
                    offset,
                    len: self.0.len(),
                })
        };
        Ok((slice(offset + 1)?, slice(offset + 1 + POINT_WIDTH + 1)?))
    }

    /// Whether the parking-zone record agrees with `field`.
    #[must_use]
    pub fn matches_parking_zone(&self, field: &Field) -> bool {
        self.record(PARKING_ZONE_OFFSET).is_ok_and(|(first, heading)| {
            first == encode_point(field.parking_zone()[0])
                && heading == encode_point(field.parking_zone_heading())
        })
    }
}

impl fmt::Display for EncodedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncodedDescriptor {
    fn from(descriptor: String) -> Self {
        Self(descriptor)
    }
}

/// Produce the descriptor for `field`.
///
/// Writes the parking-zone record and one record per chain role. A role
/// that lands on an already recorded box repeats that box's record, so
/// the output is always [`DESCRIPTOR_LEN`] characters long. Chained box
/// corners are chosen with `chooser`, box indices in walk order.
#[must_use]
pub fn encode_descriptor(field: &Field, chooser: &mut impl DiagonalChooser) -> EncodedDescriptor {
    let chain = ColorChain::resolve(field);
    let mut out = String::with_capacity(DESCRIPTOR_LEN);
    push_record(
        &mut out,
        PARKING_ZONE_TAG,
        field.parking_zone()[0],
        field.parking_zone_heading(),
    );

    let mut written: Vec<(usize, Point, Point)> = Vec::new();
    for role in ChainRole::ALL {
        let Some(index) = chain.index_of(role) else {
            break;
        };
        let (first, second) = match written.iter().find(|(i, ..)| *i == index) {
            Some(&(_, first, second)) => (first, second),
            None => {
                let corners = chooser.choose(index).corners(&field.boxes()[index]);
                written.push((index, corners.0, corners.1));
                corners
            }
        };
        push_record(&mut out, role.tag(), first, second);
    }
    EncodedDescriptor(out)
}

fn push_record(out: &mut String, tag: char, first: Point, second: Point) {
    out.push(tag);
    out.push_str(&encode_point(first));
    out.push(' ');
    out.push_str(&encode_point(second));
    out.push(';');
}
