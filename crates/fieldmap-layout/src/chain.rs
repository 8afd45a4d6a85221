//! Color-chain resolution.
//!
//! Starting at the Blue box, follow "the cube in this box has color C,
//! go to the box painted C" for up to [`CHAIN_HOPS`] boxes. Boxes on that
//! walk are *chained*: their descriptor text comes from the externally
//! encoded descriptor. All other boxes are *unchained*.
//!
//! The relation is built once as a successor map from color to box index
//! and then walked, so a different hop count only changes the constant.

use std::collections::{BTreeSet, HashMap};

use crate::color::Color;
use crate::encode::RECORD_WIDTH;
use crate::types::Field;

/// Number of boxes visited by the walk, Blue included.
pub const CHAIN_HOPS: usize = 3;

/// Role of a position on the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainRole {
    /// The Blue box itself.
    Blue,
    /// The box whose color matches the cube in the Blue box.
    First,
    /// The box whose color matches the cube in the first box.
    Second,
}

impl ChainRole {
    /// Roles in walk order.
    pub const ALL: [Self; CHAIN_HOPS] = [Self::Blue, Self::First, Self::Second];

    /// Character offset of this role's record in the encoded descriptor.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Blue => RECORD_WIDTH,
            Self::First => 2 * RECORD_WIDTH,
            Self::Second => 3 * RECORD_WIDTH,
        }
    }

    /// Tag character written at the start of this role's record.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Blue => 'B',
            Self::First => 'F',
            Self::Second => 'S',
        }
    }
}

/// The resolved chain for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorChain {
    /// Box index per role, in walk order. Indices repeat when the chain
    /// closes on itself early.
    hops: Vec<usize>,
}

impl ColorChain {
    /// Walk the cube-color relation from the Blue box.
    #[must_use]
    pub fn resolve(field: &Field) -> Self {
        let box_of: HashMap<Color, usize> = field
            .box_colors()
            .iter()
            .enumerate()
            .map(|(i, &color)| (color, i))
            .collect();

        let mut hops = Vec::with_capacity(CHAIN_HOPS);
        let mut current = box_of.get(&Color::Blue).copied();
        while let Some(index) = current {
            hops.push(index);
            if hops.len() == CHAIN_HOPS {
                break;
            }
            current = box_of.get(&field.cube_colors()[index]).copied();
        }

        tracing::debug!(?hops, "resolved color chain");
        Self { hops }
    }

    /// Box index holding `role`, if the walk got that far.
    #[must_use]
    pub fn index_of(&self, role: ChainRole) -> Option<usize> {
        let position = ChainRole::ALL.iter().position(|&r| r == role)?;
        self.hops.get(position).copied()
    }

    /// The earliest role held by box `index`, if it is chained.
    #[must_use]
    pub fn role_of(&self, index: usize) -> Option<ChainRole> {
        self.hops
            .iter()
            .position(|&i| i == index)
            .and_then(|position| ChainRole::ALL.get(position).copied())
    }

    /// Descriptor offset for box `index`, if it is chained.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        self.role_of(index).map(ChainRole::offset)
    }

    /// Whether box `index` is on the chain.
    #[must_use]
    pub fn is_chained(&self, index: usize) -> bool {
        self.hops.contains(&index)
    }

    /// Distinct chained box indices.
    #[must_use]
    pub fn chained(&self) -> BTreeSet<usize> {
        self.hops.iter().copied().collect()
    }

    /// Box indices per role in walk order, repeats included.
    #[must_use]
    pub fn hops(&self) -> &[usize] {
        &self.hops
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{mock_field, mock_field_description};

    fn field_with_cubes(cubes: [&str; 5]) -> Field {
        let mut description = mock_field_description();
        description.cube_colors = cubes.map(str::to_owned).to_vec();
        Field::from_description(&description).unwrap()
    }

    #[test]
    fn mock_field_chains_first_three_boxes() {
        let chain = ColorChain::resolve(&mock_field());
        assert_eq!(chain.index_of(ChainRole::Blue), Some(0));
        assert_eq!(chain.index_of(ChainRole::First), Some(1));
        assert_eq!(chain.index_of(ChainRole::Second), Some(2));
        assert_eq!(chain.chained(), BTreeSet::from([0, 1, 2]));
        assert!(!chain.is_chained(3));
        assert!(!chain.is_chained(4));
    }

    #[test]
    fn offsets_follow_role_order() {
        let chain = ColorChain::resolve(&mock_field());
        assert_eq!(chain.offset_of(0), Some(9));
        assert_eq!(chain.offset_of(1), Some(18));
        assert_eq!(chain.offset_of(2), Some(27));
        assert_eq!(chain.offset_of(3), None);
    }

    #[test]
    fn self_loop_collapses_to_blue() {
        // Blue box holds the blue cube.
        let field = field_with_cubes(["Blue", "Orange", "Green", "Yellow", "Red"]);
        let chain = ColorChain::resolve(&field);
        assert_eq!(chain.hops(), &[0, 0, 0]);
        assert_eq!(chain.chained().len(), 1);
        assert_eq!(chain.role_of(0), Some(ChainRole::Blue));
        assert_eq!(chain.offset_of(0), Some(9));
    }

    #[test]
    fn two_cycle_returns_to_blue() {
        // Blue holds Green, Green holds Blue.
        let field = field_with_cubes(["Green", "Blue", "Orange", "Yellow", "Red"]);
        let chain = ColorChain::resolve(&field);
        assert_eq!(chain.hops(), &[0, 1, 0]);
        assert_eq!(chain.chained(), BTreeSet::from([0, 1]));
        // Box 0 holds both Blue and Second; the earlier role wins.
        assert_eq!(chain.offset_of(0), Some(9));
        assert_eq!(chain.offset_of(1), Some(18));
    }

    #[test]
    fn first_box_self_loop() {
        // Blue holds Red, Red holds Red.
        let field = field_with_cubes(["Red", "Green", "Orange", "Red", "Yellow"]);
        let chain = ColorChain::resolve(&field);
        assert_eq!(chain.hops(), &[0, 3, 3]);
        assert_eq!(chain.offset_of(3), Some(18));
    }

    #[test]
    fn blue_need_not_be_first_box() {
        let mut description = mock_field_description();
        description.box_colors = ["Green", "Orange", "Blue", "Red", "Yellow"]
            .map(str::to_owned)
            .to_vec();
        description.cube_colors = ["Red", "Orange", "Yellow", "Blue", "Green"]
            .map(str::to_owned)
            .to_vec();
        let field = Field::from_description(&description).unwrap();
        let chain = ColorChain::resolve(&field);
        // Blue (2) holds Yellow -> box 4 holds Green -> box 0.
        assert_eq!(chain.hops(), &[2, 4, 0]);
    }
}
