//! Deferred value scheduling.
//!
//! Entries whose value lives out-of-line, and links to nested or chained
//! directories, cannot be resolved when their directory entry is read. They
//! are queued by absolute stream offset and dispatched when the stream
//! position reaches them.
//!
//! Offsets are visited in increasing order, so forward offsets are reached
//! naturally as bytes arrive and nothing ever needs to seek. Targets that
//! already lie behind the position are unreachable in one forward pass and
//! are dropped. This also makes directory cycles impossible: a link back to
//! an already-read directory is always behind the position.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::format::tiff::{ByteOrder, DecodedTag, Directory, FieldType};

use super::context::ParserContext;
use super::state::{State, Transition};

// =============================================================================
// PendingValue
// =============================================================================

/// What to do when the stream reaches a pending offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingKind {
    /// Read `len` bytes and emit them as the value of `tag`
    Value {
        tag: u16,
        field_type: FieldType,
        len: u64,
    },

    /// Parse a directory starting here
    Directory(Directory),
}

/// A read scheduled at an absolute stream offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingValue {
    /// Absolute stream offset of the target
    pub offset: u64,

    pub kind: PendingKind,

    /// Byte order of the TIFF body at enqueue time
    pub byte_order: ByteOrder,

    /// Directory that referenced this target
    pub directory: Directory,

    /// Insertion order, to keep ties deterministic
    seq: u64,
}

impl Ord for PendingValue {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.offset, self.seq).cmp(&(other.offset, other.seq))
    }
}

impl PartialOrd for PendingValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// PendingQueue
// =============================================================================

/// Min-heap of pending reads keyed by absolute offset.
#[derive(Debug, Default)]
pub(crate) struct PendingQueue {
    heap: BinaryHeap<Reverse<PendingValue>>,
    next_seq: u64,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a read.
    pub fn push(
        &mut self,
        offset: u64,
        kind: PendingKind,
        byte_order: ByteOrder,
        directory: Directory,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(PendingValue {
            offset,
            kind,
            byte_order,
            directory,
            seq,
        }));
    }

    /// Lowest scheduled offset.
    pub fn peek_offset(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(head)| head.offset)
    }

    /// Remove and return the entry with the lowest offset.
    pub fn pop(&mut self) -> Option<PendingValue> {
        self.heap.pop().map(|Reverse(head)| head)
    }

    /// Drop every entry whose offset is below `position`.
    ///
    /// Returns the dropped entries.
    pub fn discard_before(&mut self, position: u64) -> Vec<PendingValue> {
        let mut dropped = Vec::new();
        while self.peek_offset().is_some_and(|offset| offset < position) {
            if let Some(entry) = self.pop() {
                dropped.push(entry);
            }
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

// =============================================================================
// State handlers
// =============================================================================

/// Drop pending targets the stream has already passed.
pub(crate) fn discard_unreachable(ctx: &mut ParserContext) {
    for entry in ctx.pending.discard_before(ctx.position) {
        debug!(
            offset = entry.offset,
            position = ctx.position,
            kind = ?entry.kind,
            "dropping pending value behind stream position"
        );
    }
}

/// Dispatch the head of the queue once the stream reaches it.
pub(crate) fn pending_values(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    discard_unreachable(ctx);

    let Some(target) = ctx.pending.peek_offset() else {
        debug!(position = ctx.position, "directory chain exhausted");
        return Ok(Some(State::Done));
    };

    if target > ctx.position {
        if input.is_empty() {
            return Ok(None);
        }
        // Bytes nothing points at: skip forward to the next known target.
        if ctx.resync_target != Some(target) {
            warn!(
                position = ctx.position,
                target,
                gap = target - ctx.position,
                "no pending value at current position, skipping ahead"
            );
            ctx.resync_target = Some(target);
        }
        ctx.skip(target - ctx.position, input);
        return Ok(Some(State::PendingValues));
    }

    ctx.resync_target = None;
    let Some(head) = ctx.pending.pop() else {
        return Ok(Some(State::Done));
    };

    match head.kind {
        PendingKind::Directory(directory) => {
            ctx.directory = directory;
            Ok(Some(State::IfdHeader))
        }
        PendingKind::Value { .. } => Ok(Some(State::ReadValue(head))),
    }
}

/// Read an out-of-line value and emit it.
pub(crate) fn read_value(
    ctx: &mut ParserContext,
    input: &mut Bytes,
    pending: PendingValue,
) -> Transition {
    let PendingKind::Value {
        tag,
        field_type,
        len,
    } = pending.kind
    else {
        return Ok(Some(State::PendingValues));
    };

    // Length is bounded by `max_value_len` when the entry is queued.
    let Some(data) = ctx.take(len as usize, input) else {
        return Ok(None);
    };

    ctx.emit(DecodedTag {
        tag,
        field_type,
        data,
        byte_order: pending.byte_order,
        directory: pending.directory,
    });
    Ok(Some(State::PendingValues))
}
