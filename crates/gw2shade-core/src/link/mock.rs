//! Scripted link source and snapshot builder for tests.

use std::collections::VecDeque;

use super::LinkSource;
use super::layout::{context, linked};
use crate::error::Result;

/// Builds full-size snapshots field by field.
#[derive(Clone)]
pub struct SnapshotBuilder {
    bytes: Vec<u8>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; linked::SIZE],
        }
    }

    pub fn tick(mut self, tick: u32) -> Self {
        self.put_u32(linked::UI_TICK, tick);
        self
    }

    pub fn map_id(mut self, map_id: u32) -> Self {
        self.put_u32(linked::CONTEXT + context::MAP_ID, map_id);
        self.put_u32(linked::CONTEXT_LEN, context::SIZE as u32);
        self
    }

    pub fn shard_id(mut self, shard_id: u32) -> Self {
        self.put_u32(linked::CONTEXT + context::SHARD_ID, shard_id);
        self
    }

    pub fn name(mut self, text: &str) -> Self {
        let mut at = linked::NAME;
        for unit in text.encode_utf16() {
            self.bytes[at..at + 2].copy_from_slice(&unit.to_le_bytes());
            at += 2;
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    fn put_u32(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Link source that replays a queued sequence of snapshots, then keeps
/// repeating the last one.
pub struct MockLink {
    queue: VecDeque<Vec<u8>>,
    last: Vec<u8>,
}

impl MockLink {
    pub fn new(snapshots: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let queue: VecDeque<Vec<u8>> = snapshots.into_iter().collect();
        let last = queue
            .back()
            .cloned()
            .unwrap_or_else(|| SnapshotBuilder::new().build());
        Self { queue, last }
    }
}

impl LinkSource for MockLink {
    fn read_snapshot(&mut self) -> Result<Vec<u8>> {
        match self.queue.pop_front() {
            Some(snap) => {
                self.last = snap.clone();
                Ok(snap)
            }
            None => Ok(self.last.clone()),
        }
    }
}
