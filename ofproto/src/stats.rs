//! Reply shapes produced by the stats assembler (C5).

use crate::effects::EffectsBody;
use crate::match_::Match;
use crate::message::Xid;
use crate::protocol::Version;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowStatsEntry {
    pub table_id: u8,
    pub match_: Match,
    pub cookie: u64,
    pub priority: u16,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    /// Only populated for 1.3+ requests, per spec.md §4.5.
    pub flags: Option<u16>,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub packet_count: u64,
    pub byte_count: u64,
    /// `None` if the entry's effects were programmed under a different wire
    /// version than the reply itself (spec.md §4.5 version gate) — present
    /// but empty, since the containing entry is still reported.
    pub effects: Option<EffectsBody>,
}

/// One wire-sized chunk of a flow-stats reply. A single logical request can
/// produce several of these; see spec.md §4.5 for the chunking rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowStatsReply {
    pub xid: Xid,
    pub version: Version,
    pub entries: Vec<FlowStatsEntry>,
    /// `true` ("more") on every reply but the last in a chunked sequence.
    pub more: bool,
}

impl FlowStatsReply {
    pub fn new(xid: Xid, version: Version) -> FlowStatsReply {
        FlowStatsReply { xid, version, entries: Vec::new(), more: true }
    }

    /// A rough estimate of this reply's wire length, used to decide when to
    /// cut a new chunk. The encoder is out of scope; this only needs to be
    /// monotonic in `entries.len()` and large enough to trip the threshold
    /// at a realistic entry count, which is what the threshold in
    /// [`crate::stats::CHUNK_THRESHOLD`] is calibrated against.
    pub fn estimated_wire_len(&self) -> usize {
        const REPLY_HEADER: usize = 16;
        const ENTRY_HEADER: usize = 56;
        REPLY_HEADER
            + self.entries.iter().map(|e| ENTRY_HEADER + effects_len(&e.effects)).sum::<usize>()
    }
}

fn effects_len(effects: &Option<EffectsBody>) -> usize {
    match effects {
        None => 0,
        Some(EffectsBody::Actions(actions)) => actions.len() * 8,
        Some(EffectsBody::Instructions(instructions)) => instructions.len() * 16,
    }
}

/// OpenFlow caps individual messages well under 64 KiB; spec.md §4.5 cuts a
/// new flow-stats reply once the current one exceeds 2^15 bytes (32 KiB).
pub const CHUNK_THRESHOLD: usize = 1 << 15;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateStatsReply {
    pub xid: Xid,
    pub packet_count: u64,
    pub byte_count: u64,
    pub flow_count: u32,
}
