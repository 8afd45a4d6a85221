//! Descriptor text: one coordinate-pair line per field element.
//!
//! Chained boxes take their points from the encoded descriptor without
//! any local computation. Unchained boxes encode a diagonal of their own
//! rectangle, picked by a [`DiagonalChooser`].

use std::fmt;

use crate::chain::ColorChain;
use crate::diagonal::DiagonalChooser;
use crate::encode::{EncodedDescriptor, encode_point};
use crate::types::{Field, LayoutError};

/// Label of the parking-zone entry.
pub const PARKING_ZONE_LABEL: &str = "Parking Zone";

/// One line of descriptor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorEntry {
    /// Element name: a box color or [`PARKING_ZONE_LABEL`].
    pub label: String,
    /// First encoded point.
    pub first: String,
    /// Second encoded point.
    pub second: String,
}

impl fmt::Display for DescriptorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({} {})", self.label, self.first, self.second)
    }
}

/// Receiver of descriptor paragraphs, e.g. a results panel.
pub trait TextPanel {
    /// Append one paragraph.
    fn append(&mut self, paragraph: &str);
}

impl TextPanel for Vec<String> {
    fn append(&mut self, paragraph: &str) {
        self.push(paragraph.to_owned());
    }
}

/// The parking-zone entry: first corner, then first corner plus heading.
#[must_use]
pub fn describe_parking_zone(field: &Field) -> DescriptorEntry {
    DescriptorEntry {
        label: PARKING_ZONE_LABEL.to_owned(),
        first: encode_point(field.parking_zone()[0]),
        second: encode_point(field.parking_zone_heading()),
    }
}

/// Build every descriptor entry: the parking zone first, then boxes
/// in index order.
///
/// # Errors
///
/// Returns [`LayoutError::DescriptorRange`] if a chained box's record
/// does not fit in `descriptor`.
pub fn describe_field(
    field: &Field,
    chain: &ColorChain,
    descriptor: &EncodedDescriptor,
    chooser: &mut impl DiagonalChooser,
) -> Result<Vec<DescriptorEntry>, LayoutError> {
    let mut entries = Vec::with_capacity(1 + field.boxes().len());
    entries.push(describe_parking_zone(field));

    for (i, rect) in field.boxes().iter().enumerate() {
        let (first, second) = if let Some(offset) = chain.offset_of(i) {
            let (first, second) = descriptor.record(offset)?;
            (first.to_owned(), second.to_owned())
        } else {
            let (a, b) = chooser.choose(i).corners(rect);
            (encode_point(a), encode_point(b))
        };
        entries.push(DescriptorEntry {
            label: field.box_colors()[i].name().to_owned(),
            first,
            second,
        });
    }
    Ok(entries)
}

/// Append `entries` to `panel`, one paragraph each.
pub fn publish(entries: &[DescriptorEntry], panel: &mut impl TextPanel) {
    for entry in entries {
        panel.append(&entry.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagonal::{Diagonal, FixedDiagonal};
    use crate::encode::encode_descriptor;
    use crate::mock::{mock_field, mock_field_description};

    #[test]
    fn parking_zone_comes_first_with_heading_second() {
        let entry = describe_parking_zone(&mock_field());
        assert_eq!(entry.to_string(), "Parking Zone: (E08 C06)");
    }

    #[test]
    fn parking_zone_order_ignores_quadrilateral_shape() {
        let mut description = mock_field_description();
        description.parking_zone.reverse();
        let field = Field::from_description(&description).unwrap();
        let entry = describe_parking_zone(&field);
        // First corner is now (774, 985); heading (544, 755).
        assert_eq!(entry.first, "G09");
        assert_eq!(entry.second, "E07");
    }

    #[test]
    fn mock_field_text() {
        let field = mock_field();
        let chain = ColorChain::resolve(&field);
        let descriptor = encode_descriptor(&field, &mut FixedDiagonal(Diagonal::Main));
        let entries =
            describe_field(&field, &chain, &descriptor, &mut FixedDiagonal(Diagonal::Anti))
                .unwrap();
        let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "Parking Zone: (E08 C06)",
                "Blue: (Q15 S17)",
                "Green: (O08 Q10)",
                "Orange: (J02 L04)",
                // Red box 1380..1610 x 1150..1380, anti-diagonal.
                "Red: (O11 M13)",
                // Yellow box 1725..1955 x 460..690, anti-diagonal.
                "Yellow: (R05 P07)",
            ]
        );
    }

    #[test]
    fn chained_boxes_never_consult_the_chooser() {
        let field = mock_field();
        let chain = ColorChain::resolve(&field);
        let descriptor = EncodedDescriptor::new("P........B123 456;Fabc def;Sxyz uvw;");
        let mut asked = Vec::new();
        let entries = describe_field(&field, &chain, &descriptor, &mut |i: usize| {
            asked.push(i);
            Diagonal::Main
        })
        .unwrap();
        assert_eq!(asked, [3, 4]);
        assert_eq!(entries[1].to_string(), "Blue: (123 456)");
        assert_eq!(entries[2].to_string(), "Green: (abc def)");
        assert_eq!(entries[3].to_string(), "Orange: (xyz uvw)");
    }

    #[test]
    fn truncated_descriptor_fails() {
        let field = mock_field();
        let chain = ColorChain::resolve(&field);
        let descriptor = EncodedDescriptor::new("PE08 C06;BQ15 S17;");
        let err = describe_field(
            &field,
            &chain,
            &descriptor,
            &mut FixedDiagonal(Diagonal::Main),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::DescriptorRange { offset: 18, .. }));
    }

    #[test]
    fn publish_appends_one_paragraph_per_entry() {
        let entries = vec![describe_parking_zone(&mock_field())];
        let mut panel: Vec<String> = Vec::new();
        publish(&entries, &mut panel);
        assert_eq!(panel, ["Parking Zone: (E08 C06)"]);
    }
}
