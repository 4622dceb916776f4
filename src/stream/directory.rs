//! IFD handlers.
//!
//! A directory is read record by record: the entry count, one 12-byte
//! record per entry, then the next-IFD link. Inline values are emitted
//! straight away; anything stored elsewhere goes to the pending queue.

use bytes::Bytes;
use tracing::debug;

use crate::error::FormatError;
use crate::format::tiff::{
    DecodedTag, IfdEntry, Placement, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE,
};

use super::context::ParserContext;
use super::scheduler::{discard_unreachable, PendingKind};
use super::state::{State, Transition};

pub(crate) fn ifd_header(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(record) = ctx.take(IFD_COUNT_SIZE, input) else {
        return Ok(None);
    };
    let count = ctx.byte_order.read_u16(&record);
    debug!(
        directory = %ctx.directory,
        entries = count,
        position = ctx.position,
        "reading directory"
    );

    if count == 0 {
        return Ok(Some(State::IfdEnd));
    }
    Ok(Some(State::IfdEntry { remaining: count }))
}

pub(crate) fn ifd_entry(ctx: &mut ParserContext, input: &mut Bytes, remaining: u16) -> Transition {
    let Some(record) = ctx.take(IFD_ENTRY_SIZE, input) else {
        return Ok(None);
    };
    let entry = IfdEntry::parse(record, ctx.byte_order)?;

    match entry.placement(ctx.byte_order, ctx.options.follow_gps_ifd) {
        Placement::Inline(data) => ctx.emit(DecodedTag {
            tag: entry.tag,
            field_type: entry.field_type,
            data,
            byte_order: ctx.byte_order,
            directory: ctx.directory,
        }),
        Placement::Deferred { offset, len } => {
            let target = ctx.absolute(offset);
            if target < ctx.position {
                debug!(
                    tag = entry.tag,
                    offset = target,
                    position = ctx.position,
                    "dropping value behind stream position"
                );
            } else if len > ctx.options.max_value_len {
                return Err(FormatError::ValueTooLarge {
                    tag: entry.tag,
                    len,
                    max: ctx.options.max_value_len,
                });
            } else {
                ctx.pending.push(
                    target,
                    PendingKind::Value {
                        tag: entry.tag,
                        field_type: entry.field_type,
                        len,
                    },
                    ctx.byte_order,
                    ctx.directory,
                );
            }
        }
        Placement::SubDirectory { offset, directory } => {
            debug!(%directory, offset, "scheduling sub-directory");
            ctx.pending.push(
                ctx.absolute(offset),
                PendingKind::Directory(directory),
                ctx.byte_order,
                ctx.directory,
            );
        }
    }

    match remaining - 1 {
        0 => Ok(Some(State::IfdEnd)),
        remaining => Ok(Some(State::IfdEntry { remaining })),
    }
}

pub(crate) fn ifd_end(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(record) = ctx.take(IFD_NEXT_OFFSET_SIZE, input) else {
        return Ok(None);
    };
    let next = ctx.byte_order.read_u32(&record);
    if next != 0 {
        let directory = ctx.directory.next();
        debug!(%directory, offset = next, "scheduling linked directory");
        ctx.pending.push(
            ctx.absolute(next),
            PendingKind::Directory(directory),
            ctx.byte_order,
            ctx.directory,
        );
    }

    discard_unreachable(ctx);
    debug!(
        directory = %ctx.directory,
        pending = ctx.pending.len(),
        "directory done"
    );
    Ok(Some(State::PendingValues))
}
