use std::collections::HashMap;

use rs_utils::BlockFace;

use crate::dirt_decor::DirtTexture;

pub const MISSING_TEXTURE: &str = "missing_texture.png";

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::NegX => 1,
            Self::PosY => 2,
            Self::NegY => 3,
            Self::PosZ => 4,
            Self::NegZ => 5,
        }
    }

    pub const fn is_side(self) -> bool {
        !matches!(self, Self::PosY | Self::NegY)
    }
}

impl From<Face> for BlockFace {
    fn from(face: Face) -> Self {
        match face {
            Face::PosX => BlockFace::East,
            Face::NegX => BlockFace::West,
            Face::PosY => BlockFace::Up,
            Face::NegY => BlockFace::Down,
            Face::PosZ => BlockFace::South,
            Face::NegZ => BlockFace::North,
        }
    }
}

/// Atlas indices for every (texture, face) pair of a decorated dirt block.
#[derive(Clone, Debug)]
pub struct DirtAtlasMapping {
    face_indices: [[u16; 6]; 3],
    pub missing_index: u16,
}

impl DirtAtlasMapping {
    pub fn build(name_to_index: &HashMap<String, u16>) -> Self {
        let missing_index = *name_to_index.get(MISSING_TEXTURE).unwrap_or(&0);
        let mut face_indices = [[missing_index; 6]; 3];

        for (slot, texture) in DirtTexture::ALL.into_iter().enumerate() {
            for face in Face::ALL {
                face_indices[slot][face.index()] = dirt_texture_candidates(texture, face)
                    .iter()
                    .find_map(|name| name_to_index.get(name).copied())
                    .unwrap_or(missing_index);
            }
        }

        Self {
            face_indices,
            missing_index,
        }
    }

    pub fn texture_index(&self, texture: DirtTexture, face: Face) -> u16 {
        let slot = match texture {
            DirtTexture::Default => 0,
            DirtTexture::Grassy => 1,
            DirtTexture::Snowy => 2,
        };
        self.face_indices[slot][face.index()]
    }
}

/// Atlas names to try, best first. Covers both the 1.8 and the flattened naming.
pub fn dirt_texture_candidates(texture: DirtTexture, face: Face) -> Vec<String> {
    let mut candidates = Vec::with_capacity(4);
    if face.is_side() {
        match texture {
            DirtTexture::Default => {}
            DirtTexture::Grassy => {
                candidates.push("grass_side_overlay.png".to_string());
                candidates.push("grass_block_side_overlay.png".to_string());
            }
            DirtTexture::Snowy => {
                candidates.push("grass_side_snowed.png".to_string());
                candidates.push("grass_block_snow.png".to_string());
            }
        }
    }
    candidates.push("dirt.png".to_string());
    candidates
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeTint {
    pub grass: [f32; 4],
}

pub fn biome_tint(biome_id: u8) -> BiomeTint {
    let grass = match biome_id {
        // desert, desert hills
        2 | 17 => rgb(0.91, 0.77, 0.38),
        // swampland
        6 => rgb(0.4, 0.56, 0.2),
        // taigas
        5 | 19 | 30 | 31 => rgb(0.5, 0.6, 0.5),
        // ice plains and spikes
        12 | 140 => rgb(0.8, 0.8, 0.9),
        // jungles
        21 | 22 | 23 => rgb(0.2, 0.6, 0.2),
        // savannas
        35 | 36 => rgb(0.5, 0.7, 0.2),
        // mesas
        37 | 38 | 39 => rgb(0.75, 0.65, 0.4),
        _ => rgb(0.36, 0.74, 0.29),
    };
    BiomeTint { grass }
}

/// Tint applied to one face of a decorated dirt block. Only grassy side overlays are
/// tinted, and only when the column is capped by snow-free grass.
pub fn dirt_face_tint(
    texture: DirtTexture,
    face: Face,
    tinted: bool,
    biome_id: u8,
) -> Option<[f32; 4]> {
    (texture == DirtTexture::Grassy && face.is_side() && tinted).then(|| biome_tint(biome_id).grass)
}

fn rgb(r: f32, g: f32, b: f32) -> [f32; 4] {
    [r, g, b, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas(names: &[&str]) -> HashMap<String, u16> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i as u16))
            .collect()
    }

    #[test]
    fn plain_dirt_only_tries_dirt() {
        for face in Face::ALL {
            assert_eq!(
                dirt_texture_candidates(DirtTexture::Default, face),
                vec!["dirt.png".to_string()]
            );
        }
    }

    #[test]
    fn top_and_bottom_stay_dirt() {
        for texture in DirtTexture::ALL {
            assert_eq!(
                dirt_texture_candidates(texture, Face::PosY),
                vec!["dirt.png".to_string()]
            );
            assert_eq!(
                dirt_texture_candidates(texture, Face::NegY),
                vec!["dirt.png".to_string()]
            );
        }
    }

    #[test]
    fn mapping_prefers_legacy_names_and_falls_back() {
        let names = atlas(&[
            MISSING_TEXTURE,
            "dirt.png",
            "grass_block_side_overlay.png",
            "grass_side_snowed.png",
        ]);
        let mapping = DirtAtlasMapping::build(&names);
        assert_eq!(mapping.missing_index, 0);
        assert_eq!(mapping.texture_index(DirtTexture::Default, Face::PosX), 1);
        assert_eq!(mapping.texture_index(DirtTexture::Grassy, Face::NegZ), 2);
        assert_eq!(mapping.texture_index(DirtTexture::Snowy, Face::PosZ), 3);
        assert_eq!(mapping.texture_index(DirtTexture::Snowy, Face::PosY), 1);
    }

    #[test]
    fn mapping_without_textures_uses_missing() {
        let names = atlas(&["stone.png", MISSING_TEXTURE]);
        let mapping = DirtAtlasMapping::build(&names);
        assert_eq!(mapping.missing_index, 1);
        for texture in DirtTexture::ALL {
            for face in Face::ALL {
                assert_eq!(mapping.texture_index(texture, face), 1);
            }
        }
    }

    #[test]
    fn only_tinted_grassy_sides_get_colour() {
        let plains = biome_tint(1).grass;
        assert_eq!(dirt_face_tint(DirtTexture::Grassy, Face::PosX, true, 1), Some(plains));
        assert_eq!(dirt_face_tint(DirtTexture::Grassy, Face::PosX, false, 1), None);
        assert_eq!(dirt_face_tint(DirtTexture::Grassy, Face::PosY, true, 1), None);
        assert_eq!(dirt_face_tint(DirtTexture::Snowy, Face::NegX, true, 1), None);
        assert_eq!(dirt_face_tint(DirtTexture::Default, Face::NegX, true, 1), None);
    }

    #[test]
    fn biomes_differ_from_default() {
        assert_ne!(biome_tint(2).grass, biome_tint(1).grass);
        assert_eq!(biome_tint(200).grass, biome_tint(1).grass);
    }

    #[test]
    fn faces_map_to_compass() {
        assert_eq!(BlockFace::from(Face::NegZ), BlockFace::North);
        assert_eq!(BlockFace::from(Face::PosX), BlockFace::East);
        assert_eq!(BlockFace::from(Face::PosY), BlockFace::Up);
    }
}
