//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and
//! the solidity rule shared by meshing and physics.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each cell of a chunk holds exactly one of these tags, stored compactly as
/// a [`BlockTypeSize`]. The `FromPrimitive` derive allows conversion back
/// from the compact storage format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block: non-solid, never meshed, never collides.
    AIR,

    /// A basic dirt block, the bulk of the terrain below the surface.
    DIRT,

    /// The surface block of a terrain column, with a distinct top texture.
    GRASS,

    /// Water filling every cell below the fixed sea level.
    ///
    /// Water is rendered through a separate translucent mesh, but it is
    /// *solid* for both face culling and collision (see [`BlockType::is_solid`]).
    WATER,

    /// An oak trunk block placed by the tree scatter pass.
    OAK,

    /// A leaf block forming the tree canopy.
    LEAF,
}

impl BlockType {
    /// Converts a [`BlockTypeSize`] back to a `BlockType`.
    ///
    /// # Panics
    /// Panics if the value does not correspond to a valid `BlockType`; chunk
    /// storage only ever contains values written from a valid tag.
    pub fn from_int(btype: BlockTypeSize) -> Self {
        let btype_option = num::FromPrimitive::from_u8(btype);
        btype_option.unwrap()
    }

    /// The solidity rule shared by meshing's neighbor test and the physics
    /// collision query.
    ///
    /// Every type except [`BlockType::AIR`] is solid. Water is intentionally
    /// included: it culls faces and collides like terrain even though it is
    /// drawn by the translucent pass.
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::AIR)
    }
}
