//! Reply shapes for the one-shot (C7) handlers and features/desc/config
//! messages. Flow-stats and aggregate-stats replies live in [`crate::stats`]
//! since they're produced by the chunked assembler (C5), not a one-shot
//! transform.

use crate::message::Xid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeaturesReply {
    pub xid: Xid,
    pub datapath_id: u64,
    pub n_buffers: u32,
    pub n_tables: u8,
    pub capabilities: u32,
    pub actions: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetConfigReply {
    pub xid: Xid,
    pub flags: u16,
    pub miss_send_len: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescStatsReply {
    pub xid: Xid,
    pub mfr_desc: String,
    pub hw_desc: String,
    pub sw_desc: String,
    pub serial_num: String,
    pub dp_desc: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableStatsReply {
    pub xid: Xid,
    pub active_count: u32,
    pub lookup_count: u64,
    pub matched_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDescReply {
    pub xid: Xid,
    pub port_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortStatsReply {
    pub xid: Xid,
    pub port_no: u32,
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfigReply {
    pub xid: Xid,
    pub port_no: u32,
    pub queue_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueStatsReply {
    pub xid: Xid,
    pub port_no: u32,
    pub queue_id: u32,
    pub tx_packets: u64,
    pub tx_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BsnGetIpMaskReply {
    pub xid: Xid,
    pub index: u8,
    pub mask: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BsnHybridGetReply {
    pub xid: Xid,
    pub hybrid_enable: bool,
    pub hybrid_version: u32,
}

/// Every reply the state manager can emit, in the same tagged-variant
/// spirit as [`crate::message::Message`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Features(FeaturesReply),
    GetConfig(GetConfigReply),
    DescStats(DescStatsReply),
    TableStats(TableStatsReply),
    PortDescStats(PortDescReply),
    PortStats(PortStatsReply),
    QueueConfig(QueueConfigReply),
    QueueStats(QueueStatsReply),
    FlowStats(crate::stats::FlowStatsReply),
    AggregateStats(crate::stats::AggregateStatsReply),
    BsnGetIpMask(BsnGetIpMaskReply),
    BsnHybridGet(BsnHybridGetReply),
}
