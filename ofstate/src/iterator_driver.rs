//! C4: Async Iterator Driver (spec.md §4.4). Drives the flow table's
//! matching-entry enumeration for non-strict modify and delete, owning the
//! request message across the scan.
//!
//! The table's own `FlowTable::spawn_iter_task` (spec.md §6) hands a
//! callback only table-scoped state, one match at a time, which is the
//! right seam for the table's internal scheduling. The handlers here need
//! per-match access to `forwarding` and `connection` as well, which a
//! callback confined to `&mut FT` can't reach without re-borrowing sibling
//! fields of `StateManager` through it — so the drivers below get the
//! matching id snapshot from `iter_matching` up front and then invoke the
//! exact same "one call per match, then one terminal call" contract
//! themselves, against the full `StateManager`. Nothing about this
//! contract differs from what `spawn_iter_task` documents; only who holds
//! the loop changes. Flow-stats and aggregate-stats drivers live in
//! [`crate::stats_assembler`] since they also need the chunking logic.

use ofproto::FlowModRequest;

use crate::clock::Clock;
use crate::connection::{Connection, CxnId};
use crate::flow_mutator::{apply_modify_to_entry, flow_add, flow_entry_delete};
use crate::flow_table::{FlowTable, MetaMatch};
use crate::forwarding::Forwarding;
use crate::port::Port;
use crate::state_manager::StateManager;

/// spec.md §4.3 `modify_iter_cb`. Ownership of `request` is transferred in
/// from `flow_mutator::flow_modify`; it's released (dropped) when this
/// function returns, whichever branch it took.
pub(crate) fn drive_modify<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    query: MetaMatch,
    request: FlowModRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let matches = sm.flow_table.iter_matching(&query);
    let mut num_matched = 0u32;

    for flow_id in matches {
        apply_modify_to_entry(sm, flow_id, &request, cxn_id);
        num_matched += 1;
    }

    if num_matched == 0 {
        // Terminal callback, zero matches: re-enter as add, transferring
        // ownership of the same request (spec.md §4.3).
        flow_add(sm, &request, cxn_id);
    }
    // num_matched > 0: request released here by falling out of scope.
}

/// spec.md §4.3 non-strict `flow_delete`'s iterator callback: delete every
/// matched entry with reason `Delete`. No per-entry errors are sent —
/// deletion success isn't reported to the controller per entry.
pub(crate) fn drive_delete<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    query: MetaMatch,
    _cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let matches = sm.flow_table.iter_matching(&query);
    for flow_id in matches {
        flow_entry_delete(sm, flow_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::connection::RecordingConnection;
    use crate::flow_table::{InMemoryFlowTable, PortScope, TableScope};
    use crate::forwarding::SimForwarding;
    use crate::port::SimPort;
    use ofproto::{Effects, FlowModCommand, FlowModFlags, Header, Match, MatchField, Version};

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

    fn wildcard_query() -> MetaMatch {
        MetaMatch {
            mode: crate::flow_table::MatchMode::NonStrict,
            table_id: TableScope::Any,
            match_: Match::new(),
            check_priority: false,
            priority: 0,
            out_port: PortScope::Wildcard,
            cookie: 0,
            cookie_mask: 0,
        }
    }

    fn modify_request(version: Version) -> FlowModRequest {
        FlowModRequest {
            header: Header { xid: 1, version },
            command: FlowModCommand::Modify { strict: false },
            table_id: Some(0),
            match_: Match::new(),
            priority: 100,
            idle_timeout: 0,
            hard_timeout: 0,
            cookie: 0,
            cookie_mask: 0,
            out_port: None,
            flags: FlowModFlags::empty(),
            effects: Effects::actions(version, vec![ofproto::Action::Drop]),
        }
    }

    #[test]
    fn zero_matches_re_enters_as_add() {
        let mut sm = new_sm();
        let request = modify_request(Version::Of13);
        drive_modify(&mut sm, wildcard_query(), request, 1);
        assert_eq!(sm.flow_table.current_count(), 1);
    }

    #[test]
    fn every_match_gets_modified_and_counted() {
        let mut sm = new_sm();
        let add = FlowModRequest {
            header: Header { xid: 1, version: Version::Of13 },
            command: FlowModCommand::Add,
            table_id: Some(0),
            match_: Match::new().set(MatchField::InPort, 1),
            priority: 100,
            idle_timeout: 0,
            hard_timeout: 0,
            cookie: 0,
            cookie_mask: 0,
            out_port: None,
            flags: FlowModFlags::empty(),
            effects: Effects::actions(Version::Of13, vec![]),
        };
        flow_add(&mut sm, &add, 1);
        let mut add2 = add.clone();
        add2.match_ = Match::new().set(MatchField::InPort, 2);
        flow_add(&mut sm, &add2, 1);
        assert_eq!(sm.flow_table.current_count(), 2);

        let request = modify_request(Version::Of13);
        drive_modify(&mut sm, wildcard_query(), request, 1);

        assert_eq!(sm.flow_table.current_count(), 2);
        for id in [1u64, 2u64] {
            let entry = sm.flow_table.get(id).unwrap();
            assert_eq!(
                entry.effects.body,
                ofproto::EffectsBody::Actions(vec![ofproto::Action::Drop])
            );
        }
    }

    #[test]
    fn delete_removes_every_match() {
        let mut sm = new_sm();
        let add = FlowModRequest {
            header: Header { xid: 1, version: Version::Of13 },
            command: FlowModCommand::Add,
            table_id: Some(0),
            match_: Match::new().set(MatchField::InPort, 1),
            priority: 100,
            idle_timeout: 0,
            hard_timeout: 0,
            cookie: 0,
            cookie_mask: 0,
            out_port: None,
            flags: FlowModFlags::empty(),
            effects: Effects::actions(Version::Of13, vec![]),
        };
        flow_add(&mut sm, &add, 1);
        assert_eq!(sm.flow_table.current_count(), 1);

        drive_delete(&mut sm, wildcard_query(), 1);
        assert_eq!(sm.flow_table.current_count(), 0);
    }
}
