//! Picks the side texture of a dirt block from the column stacked on top of it.
//!
//! A dirt block gets grassy (or snowy) sides when it sits under a run of dirt capped by a
//! grass block that sees the sky, and every dirt block in that run stays open to the sky on
//! at least the sides the base block is open on.

use bevy::prelude::IVec3;
use rs_utils::{BlockFace, BlockState, WorldView};
use tracing::debug;

use crate::settings::DecorSettings;
use crate::sides::{VisibleSides, visible_sides};


#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum DirtTexture {
    #[default]
    Default,
    Grassy,
    Snowy,
}

impl DirtTexture {
    pub const ALL: [Self; 3] = [Self::Default, Self::Grassy, Self::Snowy];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grassy => "grassy",
            Self::Snowy => "snowy",
        }
    }
}

/// Line sink for step-by-step classification traces.
pub type TraceSink<'a> = &'a mut dyn FnMut(&str);

struct Tracer<'a> {
    sink: Option<TraceSink<'a>>,
}

impl Tracer<'_> {
    fn emit(&mut self, line: impl FnOnce() -> String) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink(&line());
        }
    }
}

/// Holds the settings a render pass classifies with.
#[derive(Debug, Clone, Default)]
pub struct DirtDecorClassifier {
    settings: DecorSettings,
}

impl DirtDecorClassifier {
    pub fn new(settings: DecorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DecorSettings {
        &self.settings
    }

    pub fn classify<W: WorldView + ?Sized>(
        &self,
        world: &W,
        pos: IVec3,
        state: BlockState,
    ) -> DirtTexture {
        classify(world, pos, state, &self.settings)
    }

    pub fn should_be_tinted<W: WorldView + ?Sized>(&self, world: &W, pos: IVec3) -> bool {
        should_be_tinted(world, pos, &self.settings)
    }
}

/// Traces through `tracing` when `base_pos` is the configured trace position.
pub fn classify<W: WorldView + ?Sized>(
    world: &W,
    base_pos: IVec3,
    base_state: BlockState,
    settings: &DecorSettings,
) -> DirtTexture {
    if settings.traces(base_pos) {
        let log: TraceSink<'_> = &mut |line: &str| {
            debug!(target: "rs_render::dirt_decor", "{line}");
        };
        classify_with_sink(world, base_pos, base_state, settings, Some(log))
    } else {
        classify_with_sink(world, base_pos, base_state, settings, None)
    }
}

pub fn classify_with_sink<W: WorldView + ?Sized>(
    world: &W,
    base_pos: IVec3,
    base_state: BlockState,
    settings: &DecorSettings,
    sink: Option<TraceSink<'_>>,
) -> DirtTexture {
    let mut trace = Tracer { sink };
    trace.emit(|| format!("found traced block {base_state} at {base_pos}"));

    let base_sides = visible_sides(world, base_pos);
    trace.emit(|| format!("base sides {base_sides}"));
    if base_sides.is_empty() {
        trace.emit(|| "no open side, keeping default".to_string());
        return DirtTexture::Default;
    }

    let Some((top_pos, top_state)) =
        climb_dirt(world, base_pos, Some(base_sides), settings, &mut trace)
    else {
        return DirtTexture::Default;
    };

    let sky_open = BlockFace::Up
        .step(top_pos)
        .is_some_and(|above| world.is_sky_visible(above));
    if !sky_open {
        trace.emit(|| format!("top block at {top_pos} has no sky access"));
        return DirtTexture::Default;
    }
    trace.emit(|| format!("top block at {top_pos} can access sky"));

    let texture = if top_state == BlockState::GRASS_BLOCK {
        DirtTexture::Grassy
    } else if top_state == BlockState::SNOWY_GRASS_BLOCK {
        DirtTexture::Snowy
    } else {
        DirtTexture::Default
    };
    trace.emit(|| format!("top block is {top_state}, texture {}", texture.label()));
    texture
}

/// Whether the grass overlay on `pos` should carry the biome tint: the first non-dirt
/// block above it is grass without snow.
pub fn should_be_tinted<W: WorldView + ?Sized>(
    world: &W,
    pos: IVec3,
    settings: &DecorSettings,
) -> bool {
    let mut trace = Tracer { sink: None };
    climb_dirt(world, pos, None, settings, &mut trace)
        .is_some_and(|(_, state)| state == BlockState::GRASS_BLOCK)
}

/// Walks up through dirt from the cell above `base_pos`. With `base_sides` set, the walk
/// also stops on a dirt block that closes a side the base had open. Returns the terminal
/// cell, or `None` once the walk would climb past `max_scan_height`.
fn climb_dirt<W: WorldView + ?Sized>(
    world: &W,
    base_pos: IVec3,
    base_sides: Option<VisibleSides>,
    settings: &DecorSettings,
    trace: &mut Tracer<'_>,
) -> Option<(IVec3, BlockState)> {
    let Some(mut current) = BlockFace::Up.step(base_pos) else {
        trace.emit(|| format!("no room above {base_pos}"));
        return None;
    };
    let mut state = world.block_state(current);
    let mut climbed = 0u32;

    while state == BlockState::DIRT {
        if let Some(base_sides) = base_sides {
            let sides = visible_sides(world, current);
            trace.emit(|| format!("dirt at {current} sides {sides}"));
            if !base_sides.covered_by(sides) {
                trace.emit(|| format!("loop broken at {current}"));
                break;
            }
        }
        if climbed >= settings.max_scan_height {
            trace.emit(|| format!("gave up above {current} after {climbed} blocks"));
            debug!(
                "dirt column above {base_pos} exceeds max_scan_height {}",
                settings.max_scan_height
            );
            return None;
        }
        let Some(next) = BlockFace::Up.step(current) else {
            trace.emit(|| format!("no room above {current}"));
            return None;
        };
        trace.emit(|| "moving up".to_string());
        climbed += 1;
        current = next;
        state = world.block_state(current);
    }

    trace.emit(|| format!("loop ended at {current}"));
    Some((current, state))
}
