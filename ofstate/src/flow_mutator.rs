//! C3: Flow Mutator (spec.md §4.3). add / modify / modify-strict / delete /
//! delete-strict against the flow table and forwarding layer, with
//! cross-layer rollback.

use ofproto::{ErrorKind, ErrorType, FlowModFailedCode, FlowModFlags, FlowModRequest};

use crate::clock::Clock;
use crate::connection::{Connection, CxnId};
use crate::error_translator::{echo, send_error, send_flow_mod_error};
use crate::flow_table::{FlowEntry, FlowTable, MatchMode};
use crate::forwarding::Forwarding;
use crate::iterator_driver::{drive_delete, drive_modify};
use crate::port::Port;
use crate::query_builder::{build_meta_match, QuerySource};
use crate::state_manager::StateManager;

/// Deletes an entry from both the table and the forwarding layer. The
/// forwarding side is best-effort: a failure here is logged, not
/// propagated, since the entry is leaving the table either way (spec.md
/// doesn't specify a rollback-of-a-rollback for this path).
pub fn flow_entry_delete<FT, F, P, C, CL>(sm: &mut StateManager<FT, F, P, C, CL>, flow_id: u64)
where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    if sm.flow_table.delete(flow_id).is_some() {
        if let Err(kind) = sm.forwarding.flow_delete(flow_id) {
            tracing::warn!(flow_id, ?kind, "forwarding refused delete of a table entry being removed");
        }
    }
}

/// spec.md §4.3 `flow_add`. Always "returns" by way of a reply or error
/// sent through `Connection`; there is no value surfaced to the caller.
pub fn flow_add<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &FlowModRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let version = request.header.version;
    let xid = request.header.xid;
    let source = QuerySource::from(request);

    if request.flags.contains(FlowModFlags::CHECK_OVERLAP) {
        let query = build_meta_match(&source, MatchMode::Overlap, true);
        if !sm.flow_table.iter_matching(&query).is_empty() {
            send_error(
                &mut sm.connection,
                cxn_id,
                version,
                xid,
                ErrorType::FlowModFailed,
                FlowModFailedCode::Overlap.wire_code(version),
                Some(echo(request)),
            );
            return;
        }
    }

    if request.flags.contains(FlowModFlags::EMERGENCY)
        && (request.idle_timeout != 0 || request.hard_timeout != 0)
    {
        send_error(
            &mut sm.connection,
            cxn_id,
            version,
            xid,
            ErrorType::FlowModFailed,
            FlowModFailedCode::BadEmergencyTimeout.wire_code(version),
            Some(echo(request)),
        );
        return;
    }

    let strict_query = build_meta_match(&source, MatchMode::Strict, true);
    if let Some(duplicate_id) = sm.flow_table.strict_match(&strict_query) {
        flow_entry_delete(sm, duplicate_id);
    }

    let flow_id = sm.counters.alloc_flow_id();
    let entry = FlowEntry {
        flow_id,
        table_id: request.table_id.unwrap_or(0),
        match_: request.match_.clone(),
        priority: request.priority,
        idle_timeout: request.idle_timeout,
        hard_timeout: request.hard_timeout,
        cookie: request.cookie,
        flags: request.flags.bits(),
        insert_time: sm.clock.now(),
        effects: request.effects.clone(),
    };
    sm.flow_table.add(flow_id, entry);

    match sm.forwarding.flow_create(flow_id, request) {
        Ok(table_id) => {
            if let Some(entry) = sm.flow_table.get_mut(flow_id) {
                entry.table_id = table_id;
            }
        }
        Err(kind) => {
            sm.flow_table.record_forwarding_add_error();
            sm.flow_table.delete(flow_id);
            send_flow_mod_error(&mut sm.connection, cxn_id, version, xid, kind, Some(echo(request)));
        }
    }
}

/// spec.md §4.3 `flow_modify` (non-strict). Spawns an iterator task; see
/// [`crate::iterator_driver::drive_modify`] for the per-entry callback and
/// the `num_matched == 0 → re-enter flow_add` terminal rule.
pub fn flow_modify<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: FlowModRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let source = QuerySource::from(&request);
    let query = build_meta_match(&source, MatchMode::NonStrict, true);
    drive_modify(sm, query, request, cxn_id);
}

/// spec.md §4.3 `flow_modify_strict`. Synchronous.
pub fn flow_modify_strict<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: FlowModRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let source = QuerySource::from(&request);
    let query = build_meta_match(&source, MatchMode::Strict, true);

    match sm.flow_table.strict_match(&query) {
        None => flow_add(sm, &request, cxn_id),
        Some(flow_id) => {
            apply_modify_to_entry(sm, flow_id, &request, cxn_id);
        }
    }
}

/// Shared by the strict and per-match non-strict paths: ask forwarding to
/// modify, and on success replace the entry's effects in place.
pub(crate) fn apply_modify_to_entry<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    flow_id: u64,
    request: &FlowModRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    match sm.forwarding.flow_modify(flow_id, request) {
        Ok(()) => {
            sm.flow_table.modify_effects(flow_id, request.effects.clone());
        }
        Err(kind) => {
            send_flow_mod_error(
                &mut sm.connection,
                cxn_id,
                request.header.version,
                request.header.xid,
                kind,
                Some(echo(request)),
            );
        }
    }
}

/// spec.md §4.3 `flow_delete` (non-strict). `out_port` is taken from the
/// request, not forced wildcard — v1.0 delete supports an out-port filter.
pub fn flow_delete<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: FlowModRequest,
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
    drive_delete(sm, query, cxn_id);
}

/// spec.md §4.3 `flow_delete_strict`. Synchronous.
pub fn flow_delete_strict<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: FlowModRequest,
    _cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let source = QuerySource::from(&request);
    let query = build_meta_match(&source, MatchMode::Strict, true);
    if let Some(flow_id) = sm.flow_table.strict_match(&query) {
        flow_entry_delete(sm, flow_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::connection::RecordingConnection;
    use crate::flow_table::InMemoryFlowTable;
    use crate::forwarding::SimForwarding;
    use crate::port::SimPort;
    use ofproto::{Effects, FlowModCommand, Header, Match, MatchField, Version};

    fn new_sm() -> StateManager<InMemoryFlowTable, SimForwarding, SimPort, RecordingConnection, FixedClock>
    {
        StateManager::new(
            InMemoryFlowTable::new(),
            SimForwarding::new(),
            SimPort::new(),
            RecordingConnection::new(),
            FixedClock::default(),
        )
    }

    fn add_request(priority: u16, match_: Match, version: Version) -> FlowModRequest {
        FlowModRequest {
            header: Header { xid: 7, version },
            command: FlowModCommand::Add,
            table_id: Some(0),
            match_,
            priority,
            idle_timeout: 0,
            hard_timeout: 0,
            cookie: 0,
            cookie_mask: 0,
            out_port: None,
            flags: FlowModFlags::empty(),
            effects: Effects::actions(version, vec![]),
        }
    }

    #[test]
    fn successful_add_inserts_one_entry() {
        let mut sm = new_sm();
        let request = add_request(100, Match::new().set(MatchField::InPort, 1), Version::Of13);
        flow_add(&mut sm, &request, 1);
        assert_eq!(sm.flow_table.current_count(), 1);
    }

    #[test]
    fn forwarding_refusal_rolls_back_the_entry() {
        let mut sm = new_sm();
        sm.forwarding.refuse_creates_with = Some(ErrorKind::Resource);
        let request = add_request(100, Match::new(), Version::Of10);
        flow_add(&mut sm, &request, 1);

        assert_eq!(sm.flow_table.current_count(), 0);
        assert_eq!(sm.flow_table.forwarding_add_errors(), 1);
        assert_eq!(sm.connection.errors.len(), 1);
        assert_eq!(sm.connection.errors[0].error_type, ErrorType::FlowModFailed);
    }

    #[test]
    fn strict_duplicate_is_overwritten_before_insert() {
        let mut sm = new_sm();
        let first = add_request(100, Match::new().set(MatchField::InPort, 1), Version::Of13);
        flow_add(&mut sm, &first, 1);
        assert_eq!(sm.flow_table.current_count(), 1);

        let second = add_request(100, Match::new().set(MatchField::InPort, 1), Version::Of13);
        flow_add(&mut sm, &second, 1);
        assert_eq!(sm.flow_table.current_count(), 1);
    }

    #[test]
    fn overlap_flag_rejects_overlapping_entry() {
        let mut sm = new_sm();
        let existing = add_request(100, Match::new().set(MatchField::InPort, 1), Version::Of13);
        flow_add(&mut sm, &existing, 1);

        let mut overlapping = add_request(100, Match::new(), Version::Of13);
        overlapping.flags = FlowModFlags::CHECK_OVERLAP;
        flow_add(&mut sm, &overlapping, 1);

        assert_eq!(sm.flow_table.current_count(), 1);
        assert_eq!(sm.connection.errors.len(), 1);
        assert_eq!(
            sm.connection.errors[0].code,
            FlowModFailedCode::Overlap.wire_code(Version::Of13)
        );
    }

    #[test]
    fn emergency_flag_with_nonzero_timeout_is_rejected() {
        let mut sm = new_sm();
        let mut request = add_request(100, Match::new(), Version::Of10);
        request.flags = FlowModFlags::EMERGENCY;
        request.idle_timeout = 5;
        flow_add(&mut sm, &request, 1);

        assert_eq!(sm.flow_table.current_count(), 0);
        assert_eq!(sm.connection.errors.len(), 1);
        assert_eq!(
            sm.connection.errors[0].code,
            FlowModFailedCode::BadEmergencyTimeout.wire_code(Version::Of10)
        );
    }

    #[test]
    fn add_then_modify_strict_replaces_effects() {
        let mut sm = new_sm();
        let add = add_request(100, Match::new().set(MatchField::InPort, 1), Version::Of13);
        flow_add(&mut sm, &add, 1);

        let mut modify = add;
        modify.command = FlowModCommand::Modify { strict: true };
        modify.effects = Effects::actions(
            Version::Of13,
            vec![ofproto::Action::Output(9)],
        );
        flow_modify_strict(&mut sm, modify, 1);

        assert_eq!(sm.flow_table.current_count(), 1);
        let (_, entry) = sm
            .flow_table
            .get(1)
            .map(|e| (e.flow_id, e))
            .expect("entry should still exist");
        assert_eq!(entry.effects.body, ofproto::EffectsBody::Actions(vec![ofproto::Action::Output(9)]));
    }

    #[test]
    fn modify_strict_with_no_match_falls_back_to_add() {
        let mut sm = new_sm();
        let modify = {
            let mut r = add_request(100, Match::new(), Version::Of13);
            r.command = FlowModCommand::Modify { strict: true };
            r
        };
        flow_modify_strict(&mut sm, modify, 1);
        assert_eq!(sm.flow_table.current_count(), 1);
    }
}
