//! C6: Request Dispatcher (spec.md §4.6). One entry point per message
//! kind, delegating to C3 (flow mutator), C4/C5 (iterator driver / stats
//! assembler), or C7 (simple handlers). `handle` takes ownership of the
//! inbound `Message` and is the single point that releases it — in Rust
//! terms, the only place it needs to be dropped, which happens implicitly
//! once the match arm it's moved into returns.

use ofproto::{FlowModCommand, Message};

use crate::clock::Clock;
use crate::connection::{Connection, CxnId};
use crate::error_translator::send_bad_type;
use crate::flow_mutator::{flow_add, flow_delete, flow_delete_strict, flow_modify, flow_modify_strict};
use crate::flow_table::FlowTable;
use crate::forwarding::Forwarding;
use crate::port::Port;
use crate::simple_handlers;
use crate::stats_assembler::{drive_aggregate_stats, drive_flow_stats};
use crate::state_manager::StateManager;

pub fn handle<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    message: Message,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    tracing::trace!(xid = message.xid(), version = ?message.version(), "dispatching message");

    match message {
        Message::Hello(_) | Message::EchoReply(_) | Message::TableMod(_) => {
            // Accepted, logged, no reply (spec.md's SUPPLEMENT).
        }
        Message::PacketOut(request) => sm.forwarding.packet_out(&request),
        Message::PortMod(request) => simple_handlers::port_mod(sm, &request, cxn_id),
        Message::PortStatsRequest(request) => simple_handlers::port_stats(sm, &request, cxn_id),
        Message::QueueGetConfigRequest(request) => {
            simple_handlers::queue_get_config(sm, &request, cxn_id)
        }
        Message::QueueStatsRequest(request) => simple_handlers::queue_stats(sm, &request, cxn_id),
        Message::FeaturesRequest(request) => simple_handlers::features(sm, request.header.xid, cxn_id),
        Message::GetConfigRequest(request) => {
            simple_handlers::get_config(sm, request.header.xid, cxn_id)
        }
        Message::SetConfig(request) => simple_handlers::set_config(sm, &request),
        Message::FlowMod(request) => match request.command {
            FlowModCommand::Add => flow_add(sm, &request, cxn_id),
            FlowModCommand::Modify { strict: false } => flow_modify(sm, request, cxn_id),
            FlowModCommand::Modify { strict: true } => flow_modify_strict(sm, request, cxn_id),
            FlowModCommand::Delete { strict: false } => flow_delete(sm, request, cxn_id),
            FlowModCommand::Delete { strict: true } => flow_delete_strict(sm, request, cxn_id),
        },
        Message::FlowStatsRequest(request) => drive_flow_stats(sm, request, cxn_id),
        Message::AggregateStatsRequest(request) => drive_aggregate_stats(sm, request, cxn_id),
        Message::DescStatsRequest(request) => {
            simple_handlers::desc_stats(sm, request.header.xid, cxn_id)
        }
        Message::TableStatsRequest(request) => {
            simple_handlers::table_stats(sm, request.header.xid, cxn_id)
        }
        Message::PortDescStatsRequest(request) => {
            simple_handlers::port_desc_stats(sm, request.header.xid, cxn_id)
        }
        Message::Experimenter(request) => simple_handlers::experimenter(sm, &request, cxn_id),
        Message::BsnSetIpMask(request) => simple_handlers::bsn_set_ip_mask(sm, &request, cxn_id),
        Message::BsnGetIpMaskRequest(request) => {
            simple_handlers::bsn_get_ip_mask(sm, &request, cxn_id)
        }
        Message::BsnHybridGetRequest(request) => {
            simple_handlers::bsn_hybrid_get(sm, request.header.xid, cxn_id)
        }
        // Unhandled kinds (spec.md §4.6): log and send BadRequest/BadType
        // with xid preserved.
        unhandled @ Message::ExperimenterStatsRequest(_) => {
            tracing::warn!(xid = unhandled.xid(), "unhandled message kind");
            send_bad_type(&mut sm.connection, cxn_id, &unhandled);
        }
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
    use ofproto::{BareRequest, Header, Version};

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

    #[test]
    fn unhandled_kind_sends_bad_type_with_matching_xid() {
        let mut sm = new_sm();
        let message = Message::ExperimenterStatsRequest(BareRequest {
            header: Header { xid: 77, version: Version::Of13 },
        });
        handle(&mut sm, message, 1);

        assert_eq!(sm.connection.errors.len(), 1);
        assert_eq!(sm.connection.errors[0].xid, 77);
        assert_eq!(sm.connection.errors[0].error_type, ofproto::ErrorType::BadRequest);
    }

    #[test]
    fn bsn_hybrid_get_request_replies_with_hybrid_enabled() {
        let mut sm = new_sm();
        let message = Message::BsnHybridGetRequest(BareRequest {
            header: Header { xid: 12, version: Version::Of13 },
        });
        handle(&mut sm, message, 1);

        assert!(sm.connection.errors.is_empty());
        assert_eq!(sm.connection.replies.len(), 1);
        match &sm.connection.replies[0].1 {
            ofproto::Reply::BsnHybridGet(reply) => {
                assert_eq!(reply.xid, 12);
                assert!(reply.hybrid_enable);
                assert_eq!(reply.hybrid_version, 0);
            }
            other => panic!("expected BsnHybridGet reply, got {other:?}"),
        }
    }

    #[test]
    fn hello_is_accepted_with_no_reply_or_error() {
        let mut sm = new_sm();
        let message =
            Message::Hello(BareRequest { header: Header { xid: 1, version: Version::Of13 } });
        handle(&mut sm, message, 1);

        assert!(sm.connection.replies.is_empty());
        assert!(sm.connection.errors.is_empty());
    }
}
