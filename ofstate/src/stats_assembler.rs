//! C5: Stats Assembler (spec.md §4.5). Builds flow-stats and
//! aggregate-stats replies, chunking flow-stats once a reply's estimated
//! wire length crosses [`ofproto::CHUNK_THRESHOLD`].

use ofproto::{
    AggregateStatsReply, AggregateStatsRequest, FlowStatsEntry, FlowStatsReply, FlowStatsRequest,
    Reply, CHUNK_THRESHOLD,
};

use crate::clock::Clock;
use crate::connection::{Connection, CxnId};
use crate::flow_table::{FlowTable, MatchMode};
use crate::forwarding::Forwarding;
use crate::port::Port;
use crate::query_builder::{build_meta_match, QuerySource};
use crate::state_manager::StateManager;

fn send_reply<FT, F, P, C, CL>(sm: &mut StateManager<FT, F, P, C, CL>, cxn_id: CxnId, reply: Reply)
where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    if let Err(err) = sm.connection.send(cxn_id, reply) {
        tracing::error!(?err, "failed to send stats reply");
    }
}

/// spec.md §4.5 flow-stats. The terminal reply always carries `more =
/// false`; if nothing ever matched, an empty reply is still sent so the
/// controller gets a response for its xid (spec.md §9's recommended fix for
/// the zero-match case).
pub fn drive_flow_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: FlowStatsRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let source = QuerySource::from(&request);
    let query = build_meta_match(&source, MatchMode::NonStrict, false);
    let matches = sm.flow_table.iter_matching(&query);
    let current_time = sm.clock.now();

    let mut current: Option<FlowStatsReply> = None;
    let mut to_send = Vec::new();

    for flow_id in matches {
        let entry = match sm.flow_table.get(flow_id) {
            Some(entry) => entry.clone(),
            None => continue,
        };

        let counters = match sm.forwarding.flow_stats_get(flow_id) {
            Ok(counters) => counters,
            Err(_) => continue,
        };

        // Version gate (spec.md §4.5): omit entries programmed under a
        // different wire version than the requester.
        if request.header.version != entry.effects.version {
            continue;
        }

        let reply = current
            .get_or_insert_with(|| FlowStatsReply::new(request.header.xid, request.header.version));

        let duration = current_time.checked_sub(entry.insert_time).unwrap_or_default();
        let flags = request.header.version.at_least_13().then_some(entry.flags);

        reply.entries.push(FlowStatsEntry {
            table_id: entry.table_id,
            match_: entry.match_,
            cookie: entry.cookie,
            priority: entry.priority,
            idle_timeout: entry.idle_timeout,
            hard_timeout: entry.hard_timeout,
            flags,
            duration_sec: duration.as_secs() as u32,
            duration_nsec: duration.subsec_nanos(),
            packet_count: counters.packets,
            byte_count: counters.bytes,
            effects: Some(entry.effects.body),
        });

        if reply.estimated_wire_len() > CHUNK_THRESHOLD {
            let mut finished = current.take().unwrap();
            finished.more = true;
            to_send.push(finished);
        }
    }

    let mut last = current.unwrap_or_else(|| FlowStatsReply::new(request.header.xid, request.header.version));
    last.more = false;
    to_send.push(last);

    for reply in to_send {
        send_reply(sm, cxn_id, Reply::FlowStats(reply));
    }
}

/// spec.md §4.5 aggregate-stats. Unlike flow-stats, the per-entry version
/// gate is *not* applied (spec.md §9's fourth open question: preserved as
/// specified in §4.5, all matched flows are counted regardless of the
/// version they were programmed under).
pub fn drive_aggregate_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: AggregateStatsRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let source = QuerySource::from(&request);
    let query = build_meta_match(&source, MatchMode::NonStrict, false);
    let matches = sm.flow_table.iter_matching(&query);

    let mut packet_count = 0u64;
    let mut byte_count = 0u64;
    let mut flow_count = 0u32;

    for flow_id in matches {
        if let Ok(counters) = sm.forwarding.flow_stats_get(flow_id) {
            packet_count += counters.packets;
            byte_count += counters.bytes;
            flow_count += 1;
        }
    }

    send_reply(
        sm,
        cxn_id,
        Reply::AggregateStats(AggregateStatsReply { xid: request.header.xid, packet_count, byte_count, flow_count }),
    );
}
