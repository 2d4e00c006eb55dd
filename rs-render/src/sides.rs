use std::fmt;

use rs_utils::{BlockFace, IVec3, WorldView};

/// Sky visibility of the four horizontal neighbours of the cell above a block.
/// Bit 0 north, bit 1 south, bit 2 west, bit 3 east.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct VisibleSides(u8);

impl VisibleSides {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    pub const fn from_flags(flags: [bool; 4]) -> Self {
        Self(
            (flags[0] as u8)
                | (flags[1] as u8) << 1
                | (flags[2] as u8) << 2
                | (flags[3] as u8) << 3,
        )
    }

    pub const fn flags(self) -> [bool; 4] {
        [
            self.0 & 0b0001 != 0,
            self.0 & 0b0010 != 0,
            self.0 & 0b0100 != 0,
            self.0 & 0b1000 != 0,
        ]
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_open(self, face: BlockFace) -> bool {
        BlockFace::HORIZONTAL
            .iter()
            .position(|f| *f == face)
            .is_some_and(|i| self.0 & (1 << i) != 0)
    }

    /// True when every side open in `self` is also open in `candidate`.
    pub const fn covered_by(self, candidate: Self) -> bool {
        self.0 & !candidate.0 == 0
    }
}

impl fmt::Display for VisibleSides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.flags();
        for (i, face) in BlockFace::HORIZONTAL.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", face.name(), if flags[i] { "yes" } else { "no" })?;
        }
        Ok(())
    }
}

/// Cells past the edge of the coordinate space count as closed.
pub fn visible_sides<W: WorldView + ?Sized>(world: &W, pos: IVec3) -> VisibleSides {
    let Some(above) = BlockFace::Up.step(pos) else {
        return VisibleSides::NONE;
    };
    let mut flags = [false; 4];
    for (flag, face) in flags.iter_mut().zip(BlockFace::HORIZONTAL) {
        *flag = face
            .step(above)
            .is_some_and(|neighbour| world.is_sky_visible(neighbour));
    }
    VisibleSides::from_flags(flags)
}

/// `candidate` must be open on at least every side `original` is.
pub fn is_visible_on_original_sides(original: [bool; 4], candidate: [bool; 4]) -> bool {
    VisibleSides::from_flags(original).covered_by(VisibleSides::from_flags(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rs_utils::{BlockState, MemoryWorld};

    fn all_masks() -> impl Iterator<Item = [bool; 4]> {
        (0u8..16).map(|bits| VisibleSides(bits).flags())
    }

    #[test]
    fn flags_keep_compass_order() {
        let sides = VisibleSides::from_flags([true, false, false, true]);
        assert_eq!(sides.bits(), 0b1001);
        assert!(sides.is_open(BlockFace::North));
        assert!(!sides.is_open(BlockFace::South));
        assert!(sides.is_open(BlockFace::East));
        assert!(!sides.is_open(BlockFace::Up));
        assert_eq!(sides.flags(), [true, false, false, true]);
    }

    #[test]
    fn dominance_matches_per_side_definition() {
        for original in all_masks() {
            for candidate in all_masks() {
                let expected = !(0..4).any(|i| original[i] && !candidate[i]);
                assert_eq!(
                    is_visible_on_original_sides(original, candidate),
                    expected,
                    "original {original:?} candidate {candidate:?}"
                );
            }
        }
    }

    #[test]
    fn empty_original_is_covered_by_anything() {
        for candidate in all_masks() {
            assert!(is_visible_on_original_sides([false; 4], candidate));
        }
    }

    #[test]
    fn dominance_is_not_symmetric() {
        let narrow = [true, false, false, false];
        let wide = [true, true, false, false];
        assert!(is_visible_on_original_sides(narrow, wide));
        assert!(!is_visible_on_original_sides(wide, narrow));
    }

    #[test]
    fn samples_neighbours_of_the_cell_above() {
        let mut world = MemoryWorld::new(0, 32);
        let pos = IVec3::new(0, 10, 0);
        // Roof over the north and east neighbours of (0, 11, 0).
        world.set_block(IVec3::new(0, 20, -1), BlockState::STONE);
        world.set_block(IVec3::new(1, 20, 0), BlockState::STONE);
        // Blocks at the same height as `pos` must not matter.
        world.set_block(IVec3::new(0, 10, 1), BlockState::STONE);
        world.set_block(IVec3::new(-1, 10, 0), BlockState::STONE);

        let sides = visible_sides(&world, pos);
        assert_eq!(sides.flags(), [false, true, true, false]);
        assert_eq!(visible_sides(&world, IVec3::new(5, 10, 5)), VisibleSides::ALL);
    }

    #[test]
    fn top_of_coordinate_space_has_no_open_side() {
        let world = MemoryWorld::default();
        assert_eq!(
            visible_sides(&world, IVec3::new(0, i32::MAX, 0)),
            VisibleSides::NONE
        );
        let edge = visible_sides(&world, IVec3::new(i32::MAX, 10, 0));
        assert_eq!(edge.flags(), [true, true, true, false]);
    }

    #[test]
    fn display_lists_each_side() {
        let sides = VisibleSides::from_flags([true, false, true, false]);
        assert_eq!(sides.to_string(), "north:yes south:no west:yes east:no");
        assert_eq!(
            VisibleSides::NONE.to_string(),
            "north:no south:no west:no east:no"
        );
        assert!(VisibleSides::NONE.covered_by(VisibleSides::ALL));
        assert!(!VisibleSides::ALL.covered_by(sides));
    }
}
