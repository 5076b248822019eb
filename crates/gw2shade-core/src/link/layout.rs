//! Memory layout constants for the MumbleLink shared region.
//!
//! The region is written by the game process with a fixed C ABI
//! (little-endian, IEEE-754 f32, no padding between the fields below),
//! so every offset here is part of an external contract and must not
//! move. Offsets are byte offsets from the start of the mapping.

/// Layout of the outer `LinkedMem` structure.
pub mod linked {
    /// 32-bit word size
    pub const WORD: usize = 4;
    /// One 3-component f32 vector
    pub const VEC3: usize = 12;
    /// Fixed UTF-16 field of 256 code units
    pub const WTEXT_256: usize = 512;

    pub const UI_VERSION: usize = 0;
    pub const UI_TICK: usize = UI_VERSION + WORD;
    pub const AVATAR_POSITION: usize = UI_TICK + WORD;
    pub const AVATAR_FRONT: usize = AVATAR_POSITION + VEC3;
    pub const AVATAR_TOP: usize = AVATAR_FRONT + VEC3;
    pub const NAME: usize = AVATAR_TOP + VEC3;
    pub const CAMERA_POSITION: usize = NAME + WTEXT_256;
    pub const CAMERA_FRONT: usize = CAMERA_POSITION + VEC3;
    pub const CAMERA_TOP: usize = CAMERA_FRONT + VEC3;
    pub const IDENTITY: usize = CAMERA_TOP + VEC3;
    pub const CONTEXT_LEN: usize = IDENTITY + WTEXT_256;
    pub const CONTEXT: usize = CONTEXT_LEN + WORD;
    pub const CONTEXT_SIZE: usize = 256;
    pub const DESCRIPTION: usize = CONTEXT + CONTEXT_SIZE;
    /// Fixed UTF-16 field of 2048 code units
    pub const DESCRIPTION_SIZE: usize = 4096;

    /// Total size of the mapping (5460 bytes).
    pub const SIZE: usize = DESCRIPTION + DESCRIPTION_SIZE;
}

/// Layout of the Guild Wars 2 context sub-record embedded in
/// `LinkedMem.context`. `context_len` does not bound this; the
/// sub-record is always fully present by the mapping's fixed size.
pub mod context {
    pub const WORD: usize = 4;

    /// sockaddr_in or sockaddr_in6, opaque to us
    pub const SERVER_ADDRESS: usize = 0;
    pub const SERVER_ADDRESS_SIZE: usize = 28;

    pub const MAP_ID: usize = SERVER_ADDRESS + SERVER_ADDRESS_SIZE;
    pub const MAP_TYPE: usize = MAP_ID + WORD;
    pub const SHARD_ID: usize = MAP_TYPE + WORD;
    pub const INSTANCE: usize = SHARD_ID + WORD;
    pub const BUILD_ID: usize = INSTANCE + WORD;

    /// Decoded size of the sub-record (48 bytes).
    pub const SIZE: usize = BUILD_ID + WORD;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_offsets_match_contract() {
        assert_eq!(linked::UI_TICK, 4);
        assert_eq!(linked::AVATAR_POSITION, 8);
        assert_eq!(linked::NAME, 44);
        assert_eq!(linked::CAMERA_POSITION, 556);
        assert_eq!(linked::IDENTITY, 592);
        assert_eq!(linked::CONTEXT_LEN, 1104);
        assert_eq!(linked::CONTEXT, 1108);
        assert_eq!(linked::DESCRIPTION, 1364);
        assert_eq!(linked::SIZE, 5460);
    }

    #[test]
    fn test_context_offsets_match_contract() {
        assert_eq!(context::MAP_ID, 28);
        assert_eq!(context::MAP_TYPE, 32);
        assert_eq!(context::SHARD_ID, 36);
        assert_eq!(context::INSTANCE, 40);
        assert_eq!(context::BUILD_ID, 44);
        assert_eq!(context::SIZE, 48);
    }
}
