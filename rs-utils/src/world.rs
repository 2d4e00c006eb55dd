use std::collections::HashMap;
use std::ops::Range;

use bevy::prelude::IVec3;

use crate::block::BlockState;

/// Read-only access to the host world. Both queries must be total and free of side effects.
pub trait WorldView {
    fn block_state(&self, pos: IVec3) -> BlockState;
    fn is_sky_visible(&self, pos: IVec3) -> bool;
}

impl<T: WorldView + ?Sized> WorldView for &T {
    fn block_state(&self, pos: IVec3) -> BlockState {
        (**self).block_state(pos)
    }

    fn is_sky_visible(&self, pos: IVec3) -> bool {
        (**self).is_sky_visible(pos)
    }
}

/// Sparse world bounded vertically to `[min_y, max_y)`.
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    min_y: i32,
    max_y: i32,
    blocks: HashMap<IVec3, BlockState>,
    sky_overrides: HashMap<IVec3, bool>,
}

impl MemoryWorld {
    pub fn new(min_y: i32, max_y: i32) -> Self {
        Self {
            min_y,
            max_y: max_y.max(min_y),
            blocks: HashMap::new(),
            sky_overrides: HashMap::new(),
        }
    }

    pub fn height_range(&self) -> Range<i32> {
        self.min_y..self.max_y
    }

    /// Out-of-bounds writes are dropped, as are writes of air.
    pub fn set_block(&mut self, pos: IVec3, state: BlockState) {
        if !self.height_range().contains(&pos.y) {
            return;
        }
        if state == BlockState::AIR {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    pub fn fill_column(&mut self, x: i32, z: i32, ys: Range<i32>, state: BlockState) {
        for y in ys {
            self.set_block(IVec3::new(x, y, z), state);
        }
    }

    /// Pins the sky visibility of a single cell regardless of the blocks above it.
    pub fn set_sky_override(&mut self, pos: IVec3, visible: bool) {
        self.sky_overrides.insert(pos, visible);
    }

    pub fn clear_sky_override(&mut self, pos: IVec3) {
        self.sky_overrides.remove(&pos);
    }

    fn column_blocks_sky(&self, pos: IVec3) -> bool {
        let start = pos.y.max(self.min_y);
        (start..self.max_y).any(|y| {
            self.blocks
                .get(&IVec3::new(pos.x, y, pos.z))
                .is_some_and(|state| state.kind().is_opaque())
        })
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new(-64, 320)
    }
}

impl WorldView for MemoryWorld {
    fn block_state(&self, pos: IVec3) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    fn is_sky_visible(&self, pos: IVec3) -> bool {
        if let Some(visible) = self.sky_overrides.get(&pos) {
            return *visible;
        }
        !self.column_blocks_sky(pos)
    }
}
