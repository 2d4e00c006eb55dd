mod block_textures;
pub mod dirt_decor;
pub mod settings;
mod sides;

pub use block_textures::{
    BiomeTint, DirtAtlasMapping, Face as ModelFace, MISSING_TEXTURE, biome_tint,
    dirt_face_tint, dirt_texture_candidates,
};
pub use dirt_decor::{
    DirtDecorClassifier, DirtTexture, TraceSink, classify, classify_with_sink, should_be_tinted,
};
pub use settings::{DecorSettings, SettingsError};
pub use sides::{VisibleSides, is_visible_on_original_sides, visible_sides};
