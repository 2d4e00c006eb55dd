pub mod block;
pub mod world;

pub use block::{BlockFace, BlockKind, BlockState, BlockStateParseError};
pub use world::{MemoryWorld, WorldView};

pub use bevy::prelude::IVec3;
