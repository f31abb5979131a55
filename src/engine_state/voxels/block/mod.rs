//! # Block Module
//!
//! Core block-related functionality: the block type enum, the six block
//! faces, and the sprite atlas table mapping `(BlockType, BlockSide)` pairs
//! to texture atlas slots.

use block_side::BlockSide;
use block_type::BlockType;
use phf::phf_map;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to store block types in chunk memory.
pub type BlockTypeSize = u8;

/// Number of equal-width sprite slots in the horizontal texture atlas strip.
pub const MAX_SPRITE: usize = 8;

/// Maps each meshable block type to its atlas slot for each face.
///
/// Keyed by the block type's [`BlockTypeSize`] value; the inner array is
/// indexed by [`BlockSide`] in the order [FRONT, BACK, BOTTOM, TOP, LEFT,
/// RIGHT]. Air is never meshed and deliberately has no entry.
static SPRITE_SLOTS: phf::Map<u8, [u8; 6]> = phf_map! {
    1u8 => [0, 0, 0, 0, 0, 0], // DIRT
    2u8 => [1, 1, 0, 2, 1, 1], // GRASS (top: 2, bottom: 0, sides: 1)
    3u8 => [0, 0, 0, 0, 0, 0], // WATER (tinted by the water shader)
    4u8 => [4, 4, 4, 4, 4, 4], // OAK
    5u8 => [6, 6, 6, 6, 6, 6], // LEAF
};

/// Looks up the atlas slot for a block face.
///
/// The sprite table is a closed, must-be-exhaustive set for every block type
/// the generator can produce. A missing entry is a configuration error, not
/// a recoverable condition: no default texture is substituted.
///
/// # Panics
/// Panics with a diagnostic if `block_type` has no entry in the table.
pub fn sprite_slot(block_type: BlockType, side: BlockSide) -> u8 {
    match SPRITE_SLOTS.get(&(block_type as BlockTypeSize)) {
        Some(slots) => slots[side as usize],
        None => panic!(
            "no sprite mapping for block type {:?}, face {:?}; every meshable block type must appear in the sprite table",
            block_type, side
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_meshable_block_type_has_a_sprite_entry() {
        // Air is skipped before any sprite lookup; all other types must
        // resolve for all six faces without panicking.
        for btype in [
            BlockType::DIRT,
            BlockType::GRASS,
            BlockType::WATER,
            BlockType::OAK,
            BlockType::LEAF,
        ] {
            for side in BlockSide::all() {
                let slot = sprite_slot(btype, side) as usize;
                assert!(slot < MAX_SPRITE);
            }
        }
    }

    #[test]
    fn grass_uses_distinct_top_and_bottom_sprites() {
        assert_eq!(sprite_slot(BlockType::GRASS, BlockSide::TOP), 2);
        assert_eq!(sprite_slot(BlockType::GRASS, BlockSide::BOTTOM), 0);
        assert_eq!(sprite_slot(BlockType::GRASS, BlockSide::LEFT), 1);
    }
}
