//! End-to-end scenarios driven through `dispatcher::handle`, exercising the
//! full wiring (dispatch → mutator/iterator driver/stats assembler →
//! forwarding/connection) rather than any single component in isolation.

use ofproto::{
    Action, Effects, ErrorKind, ErrorType, FlowModCommand, FlowModFailedCode, FlowModFlags,
    FlowModRequest, FlowStatsRequest, Header, Match, MatchField, Message, Version,
};
use ofstate::clock::FixedClock;
use ofstate::connection::RecordingConnection;
use ofstate::flow_table::{FlowTable, InMemoryFlowTable};
use ofstate::forwarding::SimForwarding;
use ofstate::port::SimPort;
use ofstate::state_manager::StateManager;

type Sm = StateManager<InMemoryFlowTable, SimForwarding, SimPort, RecordingConnection, FixedClock>;

fn new_sm() -> Sm {
    StateManager::new(
        InMemoryFlowTable::new(),
        SimForwarding::new(),
        SimPort::new(),
        RecordingConnection::new(),
        FixedClock::default(),
    )
}

fn add_request(xid: u32, priority: u16, match_: Match, actions: Vec<Action>) -> FlowModRequest {
    FlowModRequest {
        header: Header { xid, version: Version::Of13 },
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
        effects: Effects::actions(Version::Of13, actions),
    }
}

#[test]
fn add_then_modify_strict_replaces_actions() {
    let mut sm = new_sm();
    let match_ = Match::new().set(MatchField::InPort, 1);

    ofstate::handle(
        &mut sm,
        Message::FlowMod(add_request(1, 100, match_.clone(), vec![Action::Output(1)])),
        1,
    );
    assert_eq!(sm.flow_table.current_count(), 1);

    let mut modify = add_request(2, 100, match_, vec![Action::Output(2)]);
    modify.command = FlowModCommand::Modify { strict: true };
    ofstate::handle(&mut sm, Message::FlowMod(modify), 1);

    assert_eq!(sm.flow_table.current_count(), 1);
    let entry = sm.flow_table.get(1).expect("entry survives modify");
    assert_eq!(
        entry.effects.body,
        ofproto::EffectsBody::Actions(vec![Action::Output(2)])
    );
}

#[test]
fn non_strict_modify_against_empty_table_re_enters_as_add() {
    let mut sm = new_sm();
    let mut modify = add_request(1, 100, Match::new(), vec![Action::Output(3)]);
    modify.command = FlowModCommand::Modify { strict: false };

    ofstate::handle(&mut sm, Message::FlowMod(modify), 1);

    assert_eq!(sm.flow_table.current_count(), 1);
}

#[test]
fn overlap_rejection_leaves_table_unchanged() {
    let mut sm = new_sm();
    let broad = Match::new().set(MatchField::InPort, 1);
    ofstate::handle(&mut sm, Message::FlowMod(add_request(1, 100, broad, vec![])), 1);

    let mut overlapping = add_request(2, 100, Match::new(), vec![]);
    overlapping.flags = FlowModFlags::CHECK_OVERLAP;
    ofstate::handle(&mut sm, Message::FlowMod(overlapping), 1);

    assert_eq!(sm.flow_table.current_count(), 1);
    assert_eq!(sm.connection.errors.len(), 1);
    assert_eq!(sm.connection.errors[0].error_type, ErrorType::FlowModFailed);
    assert_eq!(
        sm.connection.errors[0].code,
        FlowModFailedCode::Overlap.wire_code(Version::Of13)
    );
}

#[test]
fn forwarding_refusal_rolls_back_add_and_counts_the_error() {
    let mut sm = new_sm();
    sm.forwarding.refuse_creates_with = Some(ErrorKind::Resource);

    ofstate::handle(
        &mut sm,
        Message::FlowMod(add_request(1, 100, Match::new(), vec![])),
        1,
    );

    assert_eq!(sm.flow_table.current_count(), 0);
    assert_eq!(sm.flow_table.forwarding_add_errors(), 1);
    assert_eq!(sm.connection.errors.len(), 1);
    assert_eq!(
        sm.connection.errors[0].code,
        FlowModFailedCode::AllTablesFull.wire_code(Version::Of13)
    );
}

#[test]
fn chunked_flow_stats_spans_multiple_replies_sharing_one_xid() {
    let mut sm = new_sm();
    let big_actions: Vec<Action> = (0..40).map(Action::Output).collect();
    for i in 0..1000u64 {
        ofstate::handle(
            &mut sm,
            Message::FlowMod(add_request(
                i as u32,
                1,
                Match::new().set(MatchField::TcpSrc, i),
                big_actions.clone(),
            )),
            1,
        );
    }
    assert_eq!(sm.flow_table.current_count(), 1000);

    let request = FlowStatsRequest {
        header: Header { xid: 555, version: Version::Of13 },
        table_id: None,
        match_: Match::new(),
        out_port: None,
        cookie: 0,
        cookie_mask: 0,
    };
    ofstate::handle(&mut sm, Message::FlowStatsRequest(request), 1);

    assert!(sm.connection.replies.len() >= 2);
    let mut total_entries = 0;
    for (i, (cxn_id, reply)) in sm.connection.replies.iter().enumerate() {
        assert_eq!(*cxn_id, 1);
        let ofproto::Reply::FlowStats(stats) = reply else {
            panic!("expected FlowStats reply, got {reply:?}")
        };
        assert_eq!(stats.xid, 555);
        let is_last = i == sm.connection.replies.len() - 1;
        assert_eq!(stats.more, !is_last);
        total_entries += stats.entries.len();
    }
    assert_eq!(total_entries, 1000);
}

#[test]
fn experimenter_fan_out_sends_bad_experimenter_when_both_refuse() {
    let mut sm = new_sm();
    let request = ofproto::ExperimenterRequest {
        header: Header { xid: 42, version: Version::Of13 },
        experimenter_id: 0xdeadbeef,
        body: vec![],
    };
    ofstate::handle(&mut sm, Message::Experimenter(request), 1);

    assert_eq!(sm.connection.errors.len(), 1);
    assert_eq!(sm.connection.errors[0].xid, 42);
    assert_eq!(sm.connection.errors[0].error_type, ErrorType::BadRequest);
    assert_eq!(
        sm.connection.errors[0].code,
        ofproto::BadRequestCode::BadExperimenter.wire_code(Version::Of13)
    );
}
