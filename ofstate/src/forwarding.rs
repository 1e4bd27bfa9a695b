//! `Forwarding`: the dataplane forwarding collaborator (spec.md §6).
//! External in production; [`SimForwarding`] is a reference implementation
//! for tests, modeled the way `ovs`'s mock backends in the teacher crate
//! stub out an external OVS instance.

use std::collections::HashMap;

use ofproto::{
    ErrorKind, ExperimenterRequest, FlowModRequest, PacketOutRequest, TableStatsReply,
};

pub struct FlowCounters {
    pub packets: u64,
    pub bytes: u64,
}

pub trait Forwarding {
    fn flow_create(&mut self, flow_id: u64, request: &FlowModRequest) -> Result<u8, ErrorKind>;
    fn flow_modify(&mut self, flow_id: u64, request: &FlowModRequest) -> Result<(), ErrorKind>;
    fn flow_delete(&mut self, flow_id: u64) -> Result<(), ErrorKind>;
    fn flow_stats_get(&self, flow_id: u64) -> Result<FlowCounters, ErrorKind>;
    fn table_stats_get(&self, xid: u32) -> TableStatsReply;
    fn forwarding_features_get(&self) -> (u32, u32);
    fn experimenter(&mut self, request: &ExperimenterRequest) -> Result<(), ErrorKind>;
    fn packet_out(&mut self, request: &PacketOutRequest);
}

/// Simulated forwarding layer: always accepts flows into table 0 and tracks
/// synthetic per-flow counters so stats tests have something to read back.
#[derive(Default)]
pub struct SimForwarding {
    counters: HashMap<u64, FlowCounters>,
    pub refuse_creates_with: Option<ErrorKind>,
}

impl SimForwarding {
    pub fn new() -> SimForwarding {
        SimForwarding::default()
    }
}

impl Forwarding for SimForwarding {
    fn flow_create(&mut self, flow_id: u64, _request: &FlowModRequest) -> Result<u8, ErrorKind> {
        if let Some(kind) = self.refuse_creates_with {
            return Err(kind);
        }
        self.counters.insert(flow_id, FlowCounters { packets: 0, bytes: 0 });
        Ok(0)
    }

    fn flow_modify(&mut self, flow_id: u64, _request: &FlowModRequest) -> Result<(), ErrorKind> {
        if self.counters.contains_key(&flow_id) {
            Ok(())
        } else {
            Err(ErrorKind::NotFound)
        }
    }

    fn flow_delete(&mut self, flow_id: u64) -> Result<(), ErrorKind> {
        self.counters.remove(&flow_id);
        Ok(())
    }

    fn flow_stats_get(&self, flow_id: u64) -> Result<FlowCounters, ErrorKind> {
        self.counters
            .get(&flow_id)
            .map(|c| FlowCounters { packets: c.packets, bytes: c.bytes })
            .ok_or(ErrorKind::NotFound)
    }

    fn table_stats_get(&self, xid: u32) -> TableStatsReply {
        TableStatsReply {
            xid,
            active_count: self.counters.len() as u32,
            lookup_count: 0,
            matched_count: 0,
        }
    }

    fn forwarding_features_get(&self) -> (u32, u32) {
        (0, 0)
    }

    fn experimenter(&mut self, _request: &ExperimenterRequest) -> Result<(), ErrorKind> {
        Err(ErrorKind::NotSupported)
    }

    fn packet_out(&mut self, _request: &PacketOutRequest) {}
}
