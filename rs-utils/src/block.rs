use std::fmt;
use std::str::FromStr;

use bevy::prelude::IVec3;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum BlockFace {
    North,
    South,
    West,
    East,
    Up,
    Down,
}

impl BlockFace {
    /// Horizontal faces in the order side-visibility masks use.
    pub const HORIZONTAL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];

    pub const fn offset(self) -> IVec3 {
        match self {
            Self::North => IVec3::new(0, 0, -1),
            Self::South => IVec3::new(0, 0, 1),
            Self::West => IVec3::new(-1, 0, 0),
            Self::East => IVec3::new(1, 0, 0),
            Self::Up => IVec3::new(0, 1, 0),
            Self::Down => IVec3::new(0, -1, 0),
        }
    }

    /// Neighbour of `pos` on this face, or `None` past the edge of the coordinate space.
    pub const fn step(self, pos: IVec3) -> Option<IVec3> {
        let offset = self.offset();
        let (Some(x), Some(y), Some(z)) = (
            pos.x.checked_add(offset.x),
            pos.y.checked_add(offset.y),
            pos.z.checked_add(offset.z),
        ) else {
            return None;
        };
        Some(IVec3::new(x, y, z))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum BlockKind {
    Air,
    Dirt,
    CoarseDirt,
    GrassBlock,
    Podzol,
    Mycelium,
    Stone,
    SnowLayer,
    SnowBlock,
    Leaves,
    Log,
    Water,
    Other,
}

impl BlockKind {
    pub fn from_registry_key(key: &str) -> Self {
        let base = key.strip_prefix("minecraft:").unwrap_or(key);
        match base {
            "air" | "cave_air" | "void_air" => Self::Air,
            "dirt" => Self::Dirt,
            "coarse_dirt" => Self::CoarseDirt,
            // 1.8 names the grass block plain "grass".
            "grass_block" | "grass" => Self::GrassBlock,
            "podzol" => Self::Podzol,
            "mycelium" => Self::Mycelium,
            "stone" => Self::Stone,
            "snow" | "snow_layer" => Self::SnowLayer,
            "snow_block" => Self::SnowBlock,
            "leaves" | "leaves2" | "oak_leaves" | "birch_leaves" | "spruce_leaves" => {
                Self::Leaves
            }
            "log" | "log2" | "oak_log" | "birch_log" | "spruce_log" => Self::Log,
            "water" | "flowing_water" => Self::Water,
            _ => Self::Other,
        }
    }

    pub const fn registry_key(self) -> &'static str {
        match self {
            Self::Air => "minecraft:air",
            Self::Dirt => "minecraft:dirt",
            Self::CoarseDirt => "minecraft:coarse_dirt",
            Self::GrassBlock => "minecraft:grass_block",
            Self::Podzol => "minecraft:podzol",
            Self::Mycelium => "minecraft:mycelium",
            Self::Stone => "minecraft:stone",
            Self::SnowLayer => "minecraft:snow",
            Self::SnowBlock => "minecraft:snow_block",
            Self::Leaves => "minecraft:oak_leaves",
            Self::Log => "minecraft:oak_log",
            Self::Water => "minecraft:water",
            Self::Other => "minecraft:unknown",
        }
    }

    /// Blocks sky light for every cell below it.
    pub const fn is_opaque(self) -> bool {
        !matches!(self, Self::Air | Self::SnowLayer | Self::Water | Self::Leaves)
    }

    pub const fn has_snowy_property(self) -> bool {
        matches!(self, Self::GrassBlock | Self::Podzol | Self::Mycelium)
    }
}

/// Material plus the property set the décor logic cares about. Compared by value.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct BlockState {
    kind: BlockKind,
    snowy: bool,
}

impl BlockState {
    pub const AIR: Self = Self::new(BlockKind::Air, false);
    pub const DIRT: Self = Self::new(BlockKind::Dirt, false);
    pub const GRASS_BLOCK: Self = Self::new(BlockKind::GrassBlock, false);
    pub const SNOWY_GRASS_BLOCK: Self = Self::new(BlockKind::GrassBlock, true);
    pub const STONE: Self = Self::new(BlockKind::Stone, false);

    /// `snowy` is dropped for kinds that do not carry the property.
    pub const fn new(kind: BlockKind, snowy: bool) -> Self {
        Self {
            kind,
            snowy: snowy && kind.has_snowy_property(),
        }
    }

    pub const fn of(kind: BlockKind) -> Self {
        Self::new(kind, false)
    }

    pub const fn kind(self) -> BlockKind {
        self.kind
    }

    pub const fn is_snowy(self) -> bool {
        self.snowy
    }

    pub const fn with_snowy(self, snowy: bool) -> Self {
        Self::new(self.kind, snowy)
    }
}

impl Default for BlockState {
    fn default() -> Self {
        Self::AIR
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.registry_key())?;
        if self.kind.has_snowy_property() {
            write!(f, "[snowy={}]", self.snowy)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStateParseError {
    Empty,
    UnclosedProperties(String),
    MalformedProperty(String),
    InvalidSnowy(String),
}

impl fmt::Display for BlockStateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty block state"),
            Self::UnclosedProperties(input) => {
                write!(f, "unterminated property list in {input:?}")
            }
            Self::MalformedProperty(prop) => write!(f, "property {prop:?} is not key=value"),
            Self::InvalidSnowy(value) => write!(f, "snowy must be true or false, got {value:?}"),
        }
    }
}

impl std::error::Error for BlockStateParseError {}

impl FromStr for BlockState {
    type Err = BlockStateParseError;

    /// Accepts `minecraft:grass_block[snowy=true]`, `grass_block` and the like.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(BlockStateParseError::Empty);
        }

        let (name, props) = match input.split_once('[') {
            Some((name, rest)) => {
                let Some(props) = rest.strip_suffix(']') else {
                    return Err(BlockStateParseError::UnclosedProperties(input.to_string()));
                };
                (name, Some(props))
            }
            None => (input, None),
        };
        if name.is_empty() {
            return Err(BlockStateParseError::Empty);
        }

        let mut snowy = false;
        for prop in props.into_iter().flat_map(|p| p.split(',')) {
            let prop = prop.trim();
            if prop.is_empty() {
                continue;
            }
            let Some((key, value)) = prop.split_once('=') else {
                return Err(BlockStateParseError::MalformedProperty(prop.to_string()));
            };
            if key.trim() == "snowy" {
                snowy = match value.trim() {
                    "true" => true,
                    "false" => false,
                    other => return Err(BlockStateParseError::InvalidSnowy(other.to_string())),
                };
            }
        }

        Ok(Self::new(BlockKind::from_registry_key(name), snowy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowy_grass() {
        let state: BlockState = "minecraft:grass_block[snowy=true]".parse().unwrap();
        assert_eq!(state, BlockState::SNOWY_GRASS_BLOCK);
        assert_ne!(state, BlockState::GRASS_BLOCK);
    }

    #[test]
    fn bare_names_and_legacy_grass() {
        assert_eq!("dirt".parse::<BlockState>().unwrap(), BlockState::DIRT);
        assert_eq!(
            "minecraft:grass".parse::<BlockState>().unwrap(),
            BlockState::GRASS_BLOCK
        );
        assert_eq!(
            "minecraft:spruce_planks".parse::<BlockState>().unwrap().kind(),
            BlockKind::Other
        );
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let state: BlockState = "minecraft:grass_block[foo=bar, snowy=false]".parse().unwrap();
        assert_eq!(state, BlockState::GRASS_BLOCK);
    }

    #[test]
    fn snowy_is_dropped_where_it_does_not_apply() {
        let state: BlockState = "minecraft:dirt[snowy=true]".parse().unwrap();
        assert_eq!(state, BlockState::DIRT);
        assert!(!BlockState::STONE.with_snowy(true).is_snowy());
    }

    #[test]
    fn rejects_malformed_properties() {
        assert_eq!(
            "grass_block[snowy=true".parse::<BlockState>(),
            Err(BlockStateParseError::UnclosedProperties(
                "grass_block[snowy=true".to_string()
            ))
        );
        assert!(matches!(
            "grass_block[snowy]".parse::<BlockState>(),
            Err(BlockStateParseError::MalformedProperty(_))
        ));
        assert!(matches!(
            "grass_block[snowy=maybe]".parse::<BlockState>(),
            Err(BlockStateParseError::InvalidSnowy(_))
        ));
        assert_eq!("  ".parse::<BlockState>(), Err(BlockStateParseError::Empty));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(
            BlockState::SNOWY_GRASS_BLOCK.to_string(),
            "minecraft:grass_block[snowy=true]"
        );
        assert_eq!(BlockState::DIRT.to_string(), "minecraft:dirt");
        let again: BlockState = BlockState::GRASS_BLOCK.to_string().parse().unwrap();
        assert_eq!(again, BlockState::GRASS_BLOCK);
    }

    #[test]
    fn step_stops_at_the_edge_of_the_coordinate_space() {
        let top = IVec3::new(0, i32::MAX, 0);
        assert_eq!(BlockFace::Up.step(top), None);
        assert_eq!(BlockFace::Down.step(top), Some(IVec3::new(0, i32::MAX - 1, 0)));
        assert_eq!(BlockFace::West.step(IVec3::new(i32::MIN, 0, 0)), None);
        assert_eq!(
            BlockFace::North.step(IVec3::new(1, 2, 3)),
            Some(IVec3::new(1, 2, 2))
        );
    }

    #[test]
    fn horizontal_offsets_follow_compass() {
        let offsets: Vec<IVec3> = BlockFace::HORIZONTAL.iter().map(|f| f.offset()).collect();
        assert_eq!(
            offsets,
            vec![
                IVec3::new(0, 0, -1),
                IVec3::new(0, 0, 1),
                IVec3::new(-1, 0, 0),
                IVec3::new(1, 0, 0),
            ]
        );
    }
}
