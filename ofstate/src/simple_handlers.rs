//! C7: Simple Handlers (spec.md §6, folded in from `handlers.c` per the
//! SUPPLEMENT). One-shot request/reply transforms with no iteration and no
//! rollback: features, desc, port-desc, table stats, set/get config,
//! port-mod, port/queue stats pass-throughs, experimenter fan-out, and the
//! BSN vendor extension.

use ofproto::{
    BsnGetIpMaskReply, BsnGetIpMaskRequest, BsnHybridGetReply, BsnSetIpMaskRequest, DescStatsReply,
    ErrorKind, ErrorType, ExperimenterRequest, FeaturesReply, GetConfigReply, PortDescReply,
    PortModFailedCode, PortModRequest, PortStatsRequest, QueueGetConfigRequest, QueueStatsRequest,
    Reply, SetConfigRequest, TableStatsReply, Version, Xid,
};

use crate::clock::Clock;
use crate::connection::{Connection, CxnId};
use crate::error_translator::{echo, send_error};
use crate::flow_table::FlowTable;
use crate::forwarding::Forwarding;
use crate::port::Port;
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
        tracing::error!(?err, "failed to send reply");
    }
}

pub fn port_mod<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &PortModRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    if sm.port.port_modify(request).is_err() {
        let version = request.header.version;
        send_error(
            &mut sm.connection,
            cxn_id,
            version,
            request.header.xid,
            ErrorType::PortModFailed,
            PortModFailedCode::BadPort.wire_code(version),
            None,
        );
    }
}

/// Stats/queue pass-throughs: a failure here is logged and swallowed, not
/// turned into an error reply — stats are advisory (spec.md §7), so the
/// controller simply gets no reply for that xid.
pub fn port_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &PortStatsRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    match sm.port.port_stats_get(request) {
        Ok(stats) => send_reply(sm, cxn_id, Reply::PortStats(stats)),
        Err(kind) => tracing::warn!(?kind, port = request.port_no, "port_stats_get failed"),
    }
}

pub fn queue_get_config<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &QueueGetConfigRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    match sm.port.queue_config_get(request) {
        Ok(config) => send_reply(sm, cxn_id, Reply::QueueConfig(config)),
        Err(kind) => tracing::warn!(?kind, port = request.port_no, "queue_config_get failed"),
    }
}

pub fn queue_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &QueueStatsRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    match sm.port.queue_stats_get(request) {
        Ok(stats) => send_reply(sm, cxn_id, Reply::QueueStats(stats)),
        Err(kind) => tracing::warn!(?kind, port = request.port_no, "queue_stats_get failed"),
    }
}

pub fn features<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    xid: Xid,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let (capabilities, actions) = sm.forwarding.forwarding_features_get();
    let port_features = sm.port.port_features_get();
    send_reply(
        sm,
        cxn_id,
        Reply::Features(FeaturesReply {
            xid,
            datapath_id: 0,
            n_buffers: 0,
            n_tables: 1,
            capabilities: capabilities | port_features,
            actions,
        }),
    );
}

pub fn desc_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    xid: Xid,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let config = &sm.config;
    let descriptor = DescStatsReply {
        xid,
        mfr_desc: config.mfr_desc.clone(),
        hw_desc: config.hw_desc.clone(),
        sw_desc: config.sw_desc.clone(),
        serial_num: config.serial_num.clone(),
        dp_desc: config.dp_desc.clone(),
    };
    send_reply(sm, cxn_id, Reply::DescStats(descriptor));
}

pub fn table_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    xid: Xid,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let stats = sm.forwarding.table_stats_get(xid);
    send_reply(sm, cxn_id, Reply::TableStats(stats));
}

pub fn port_desc_stats<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    xid: Xid,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let descriptor = sm.port.port_desc_stats_get(xid);
    send_reply(sm, cxn_id, Reply::PortDescStats(descriptor));
}

pub fn get_config<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    xid: Xid,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    send_reply(
        sm,
        cxn_id,
        Reply::GetConfig(GetConfigReply { xid, flags: sm.config.flags, miss_send_len: sm.config.miss_send_len }),
    );
}

/// `AgentConfig`'s only writer (spec.md §3).
pub fn set_config<FT, F, P, C, CL>(sm: &mut StateManager<FT, F, P, C, CL>, request: &SetConfigRequest)
where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    sm.config.set(request.flags, request.miss_send_len);
}

/// spec.md §4.7: vendor/experimenter messages are dispatched to both
/// the forwarding and port layers; the port submodule's result is
/// evaluated first, then overwritten by the forwarding submodule's if it
/// also errored, so a forwarding error wins when both fail with something
/// other than `NotSupported`.
pub fn experimenter<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &ExperimenterRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    let port_result = sm.port.experimenter(request);
    let forwarding_result = sm.forwarding.experimenter(request);

    let both_unsupported =
        matches!(port_result, Err(ErrorKind::NotSupported)) && matches!(forwarding_result, Err(ErrorKind::NotSupported));

    if both_unsupported {
        use ofproto::BadRequestCode;
        let version = request.header.version;
        send_error(
            &mut sm.connection,
            cxn_id,
            version,
            request.header.xid,
            ErrorType::BadRequest,
            BadRequestCode::BadExperimenter.wire_code(version),
            Some(echo(request)),
        );
        return;
    }

    let winning_error = match (port_result, forwarding_result) {
        (_, Err(kind)) if kind != ErrorKind::NotSupported => Some(kind),
        (Err(kind), _) if kind != ErrorKind::NotSupported => Some(kind),
        _ => None,
    };

    if let Some(kind) = winning_error {
        tracing::warn!(?kind, "experimenter message rejected by a collaborator");
    }
}

fn generic_bad_index_error<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    cxn_id: CxnId,
    version: Version,
    xid: Xid,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    send_error(&mut sm.connection, cxn_id, version, xid, ErrorType::Generic, 0, None);
}

pub fn bsn_set_ip_mask<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &BsnSetIpMaskRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    if !sm.ip_mask.set(request.index, request.mask) {
        generic_bad_index_error(sm, cxn_id, request.header.version, request.header.xid);
    }
}

pub fn bsn_get_ip_mask<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    request: &BsnGetIpMaskRequest,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    match sm.ip_mask.get(request.index) {
        Some(mask) => send_reply(
            sm,
            cxn_id,
            Reply::BsnGetIpMask(BsnGetIpMaskReply { xid: request.header.xid, index: request.index, mask }),
        ),
        None => generic_bad_index_error(sm, cxn_id, request.header.version, request.header.xid),
    }
}

/// BSN vendor extension: reports hybrid mode always on, version 0 — this
/// agent doesn't distinguish hybrid-mode generations (SUPPLEMENT, per
/// `handlers.c`'s `bsn_hybrid_get_request`).
pub fn bsn_hybrid_get<FT, F, P, C, CL>(
    sm: &mut StateManager<FT, F, P, C, CL>,
    xid: Xid,
    cxn_id: CxnId,
) where
    FT: FlowTable,
    F: Forwarding,
    P: Port,
    C: Connection,
    CL: Clock,
{
    send_reply(
        sm,
        cxn_id,
        Reply::BsnHybridGet(BsnHybridGetReply { xid, hybrid_enable: true, hybrid_version: 0 }),
    );
}
