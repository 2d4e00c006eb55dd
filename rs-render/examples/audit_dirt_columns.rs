use std::collections::HashMap;

use rs_render::{
    DecorSettings, DirtAtlasMapping, DirtDecorClassifier, DirtTexture, MISSING_TEXTURE,
    ModelFace as Face, dirt_face_tint,
};
use rs_utils::{BlockFace, BlockState, IVec3, MemoryWorld, WorldView};
use tracing::{Level, info};

const SURFACE: i32 = 64;
const BIOME_PLAINS: u8 = 1;
const SPACING: i32 = 3;

fn main() {
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(Level::DEBUG)
        .init();

    let world = build_world();
    let classifier = DirtDecorClassifier::new(
        DecorSettings::from_env().with_trace_pos(IVec3::new(4 * SPACING, SURFACE, 0)),
    );
    let mapping = DirtAtlasMapping::build(&demo_atlas());

    let mut counts: HashMap<DirtTexture, usize> = HashMap::new();
    for case in 0..8 {
        let x = case * SPACING;
        let pos = IVec3::new(x, SURFACE, 0);
        let state = world.block_state(pos);
        let texture = classifier.classify(&world, pos, state);
        let tinted = classifier.should_be_tinted(&world, pos);
        let side = Face::PosZ;
        info!(
            "case={case} x={x} texture={} atlas={} tint={:?}",
            texture.label(),
            mapping.texture_index(texture, side),
            dirt_face_tint(texture, side, tinted, BIOME_PLAINS)
        );
        *counts.entry(texture).or_default() += 1;
    }

    for texture in DirtTexture::ALL {
        info!(
            "{}: {}",
            texture.label(),
            counts.get(&texture).copied().unwrap_or(0)
        );
    }
}

/// A row of dirt columns along +X, `SPACING` apart so they do not shade each other.
fn build_world() -> MemoryWorld {
    let mut world = MemoryWorld::default();
    let cases: [(i32, BlockState); 8] = [
        (0, BlockState::GRASS_BLOCK),
        (3, BlockState::GRASS_BLOCK),
        (0, BlockState::SNOWY_GRASS_BLOCK),
        (2, BlockState::SNOWY_GRASS_BLOCK),
        (4, BlockState::GRASS_BLOCK),
        (1, BlockState::STONE),
        (0, BlockState::AIR),
        (2, BlockState::GRASS_BLOCK),
    ];
    for (case, (depth, top)) in cases.into_iter().enumerate() {
        let x = case as i32 * SPACING;
        world.fill_column(x, 0, SURFACE..SURFACE + 1 + depth, BlockState::DIRT);
        world.set_block(IVec3::new(x, SURFACE + 1 + depth, 0), top);
    }

    // Column 4 loses its south side two blocks up.
    let shaded = IVec3::new(4 * SPACING, SURFACE + 3, 0) + BlockFace::South.offset();
    world.set_sky_override(shaded, false);
    // Column 7 sits under an overhang.
    world.set_block(IVec3::new(7 * SPACING, SURFACE + 12, 0), BlockState::STONE);
    world
}

fn demo_atlas() -> HashMap<String, u16> {
    [
        MISSING_TEXTURE,
        "dirt.png",
        "grass_side_overlay.png",
        "grass_side_snowed.png",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| (name.to_string(), i as u16))
    .collect()
}
