//! Fixed-layout decoding of MumbleLink snapshots.
//!
//! Decoding is pure and total over full-size input: field values are
//! never validated, only extracted at the offsets in [`super::layout`].
//! All integers are read as little-endian 32-bit words and all floats
//! as IEEE-754 f32, matching the producing process regardless of the
//! host's own endianness.

use encoding_rs::UTF_16LE;

use super::layout::{context, linked};
use crate::error::{Error, Result};

/// The outer link structure shared by the game.
///
/// Position and orientation vectors are decoded in place to keep the
/// offsets honest but are not otherwise consumed by this tool.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedMem {
    pub ui_version: u32,
    pub ui_tick: u32,
    pub avatar_position: [f32; 3],
    pub avatar_front: [f32; 3],
    pub avatar_top: [f32; 3],
    pub name: String,
    pub camera_position: [f32; 3],
    pub camera_front: [f32; 3],
    pub camera_top: [f32; 3],
    pub identity: String,
    pub context_len: u32,
    pub context: [u8; linked::CONTEXT_SIZE],
    pub description: String,
}

/// The Guild Wars 2 context sub-record embedded in `LinkedMem.context`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gw2Context {
    /// Raw sockaddr_in / sockaddr_in6 bytes, interpreted only by
    /// external consumers.
    pub server_address: [u8; context::SERVER_ADDRESS_SIZE],
    pub map_id: u32,
    pub map_type: u32,
    pub shard_id: u32,
    pub instance: u32,
    pub build_id: u32,
}

/// Decode the outer link structure from a full snapshot.
pub fn decode_linked_mem(bytes: &[u8]) -> Result<LinkedMem> {
    if bytes.len() < linked::SIZE {
        return Err(Error::TruncatedSnapshot {
            expected: linked::SIZE,
            actual: bytes.len(),
        });
    }

    let mut ctx = [0u8; linked::CONTEXT_SIZE];
    ctx.copy_from_slice(&bytes[linked::CONTEXT..linked::CONTEXT + linked::CONTEXT_SIZE]);

    Ok(LinkedMem {
        ui_version: read_u32(bytes, linked::UI_VERSION),
        ui_tick: read_u32(bytes, linked::UI_TICK),
        avatar_position: read_vec3(bytes, linked::AVATAR_POSITION),
        avatar_front: read_vec3(bytes, linked::AVATAR_FRONT),
        avatar_top: read_vec3(bytes, linked::AVATAR_TOP),
        name: read_wtext(bytes, linked::NAME, linked::WTEXT_256),
        camera_position: read_vec3(bytes, linked::CAMERA_POSITION),
        camera_front: read_vec3(bytes, linked::CAMERA_FRONT),
        camera_top: read_vec3(bytes, linked::CAMERA_TOP),
        identity: read_wtext(bytes, linked::IDENTITY, linked::WTEXT_256),
        context_len: read_u32(bytes, linked::CONTEXT_LEN),
        context: ctx,
        description: read_wtext(bytes, linked::DESCRIPTION, linked::DESCRIPTION_SIZE),
    })
}

/// Decode the context sub-record from the first 48 bytes of the
/// `context` field. `context_len` is informational only and does not
/// bound this read.
pub fn decode_context(bytes: &[u8]) -> Result<Gw2Context> {
    if bytes.len() < context::SIZE {
        return Err(Error::TruncatedSnapshot {
            expected: context::SIZE,
            actual: bytes.len(),
        });
    }

    let mut addr = [0u8; context::SERVER_ADDRESS_SIZE];
    addr.copy_from_slice(
        &bytes[context::SERVER_ADDRESS..context::SERVER_ADDRESS + context::SERVER_ADDRESS_SIZE],
    );

    Ok(Gw2Context {
        server_address: addr,
        map_id: read_u32(bytes, context::MAP_ID),
        map_type: read_u32(bytes, context::MAP_TYPE),
        shard_id: read_u32(bytes, context::SHARD_ID),
        instance: read_u32(bytes, context::INSTANCE),
        build_id: read_u32(bytes, context::BUILD_ID),
    })
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    f32::from_le_bytes(buf)
}

fn read_vec3(bytes: &[u8], offset: usize) -> [f32; 3] {
    [
        read_f32(bytes, offset),
        read_f32(bytes, offset + 4),
        read_f32(bytes, offset + 8),
    ]
}

/// Decode a fixed-size UTF-16LE field, cutting at the first NUL code
/// unit. Invalid sequences are replaced rather than rejected; the game
/// owns these bytes and we never fail on their content.
fn read_wtext(bytes: &[u8], offset: usize, byte_len: usize) -> String {
    let field = &bytes[offset..offset + byte_len];

    // Find the terminating NUL code unit, scanning u16-aligned pairs.
    let end = field
        .chunks_exact(2)
        .position(|unit| unit == [0, 0])
        .map(|units| units * 2)
        .unwrap_or(byte_len);

    let (decoded, _had_errors) = UTF_16LE.decode_without_bom_handling(&field[..end]);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
        buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn write_wtext(buf: &mut [u8], offset: usize, text: &str) {
        let mut at = offset;
        for unit in text.encode_utf16() {
            buf[at..at + 2].copy_from_slice(&unit.to_le_bytes());
            at += 2;
        }
    }

    #[test]
    fn test_decode_is_offset_exact() {
        let mut buf = vec![0u8; linked::SIZE];
        write_u32(&mut buf, linked::UI_VERSION, 2);
        write_u32(&mut buf, linked::UI_TICK, 0xDEAD_BEEF);
        buf[linked::AVATAR_POSITION..linked::AVATAR_POSITION + 4]
            .copy_from_slice(&1.5f32.to_le_bytes());
        write_wtext(&mut buf, linked::NAME, "Guild Wars 2");
        write_wtext(&mut buf, linked::IDENTITY, "{\"name\":\"Rytlock\"}");
        write_u32(&mut buf, linked::CONTEXT_LEN, 48);
        write_u32(&mut buf, linked::CONTEXT + context::MAP_ID, 15);
        write_u32(&mut buf, linked::CONTEXT + context::BUILD_ID, 181_393);

        let state = decode_linked_mem(&buf).unwrap();
        assert_eq!(state.ui_version, 2);
        assert_eq!(state.ui_tick, 0xDEAD_BEEF);
        assert_eq!(state.avatar_position[0], 1.5);
        assert_eq!(state.name, "Guild Wars 2");
        assert_eq!(state.identity, "{\"name\":\"Rytlock\"}");
        assert_eq!(state.context_len, 48);

        let ctx = decode_context(&state.context).unwrap();
        assert_eq!(ctx.map_id, 15);
        assert_eq!(ctx.map_type, 0);
        assert_eq!(ctx.build_id, 181_393);
    }

    #[test]
    fn test_decode_total_over_full_snapshots() {
        // Arbitrary byte content must never fail to decode.
        let buf: Vec<u8> = (0..linked::SIZE).map(|i| (i % 251) as u8).collect();
        let state = decode_linked_mem(&buf).unwrap();
        decode_context(&state.context).unwrap();
    }

    #[test]
    fn test_decode_truncated_snapshot() {
        let buf = vec![0u8; linked::SIZE - 1];
        let err = decode_linked_mem(&buf).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedSnapshot {
                expected: linked::SIZE,
                actual,
            } if actual == linked::SIZE - 1
        ));
    }

    #[test]
    fn test_context_len_does_not_bound_decoding() {
        let mut buf = vec![0u8; linked::SIZE];
        // context_len of zero; sub-record fields must still decode.
        write_u32(&mut buf, linked::CONTEXT_LEN, 0);
        write_u32(&mut buf, linked::CONTEXT + context::MAP_ID, 1206);

        let state = decode_linked_mem(&buf).unwrap();
        let ctx = decode_context(&state.context).unwrap();
        assert_eq!(ctx.map_id, 1206);
    }

    #[test]
    fn test_wtext_without_terminator_uses_full_field() {
        let mut buf = vec![0u8; linked::SIZE];
        for unit in buf[linked::NAME..linked::NAME + linked::WTEXT_256].chunks_exact_mut(2) {
            unit.copy_from_slice(&('a' as u16).to_le_bytes());
        }
        let state = decode_linked_mem(&buf).unwrap();
        assert_eq!(state.name.len(), 256);
        assert!(state.name.chars().all(|c| c == 'a'));
    }
}
