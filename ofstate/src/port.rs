//! `Port`: the port/queue subsystem collaborator (spec.md §6).

use ofproto::{
    ErrorKind, ExperimenterRequest, PortDescReply, PortModRequest, PortStatsReply,
    PortStatsRequest, QueueConfigReply, QueueGetConfigRequest, QueueStatsReply,
    QueueStatsRequest,
};

pub trait Port {
    fn port_modify(&mut self, request: &PortModRequest) -> Result<(), ErrorKind>;
    fn port_stats_get(&self, request: &PortStatsRequest) -> Result<PortStatsReply, ErrorKind>;
    fn queue_config_get(
        &self,
        request: &QueueGetConfigRequest,
    ) -> Result<QueueConfigReply, ErrorKind>;
    fn queue_stats_get(&self, request: &QueueStatsRequest) -> Result<QueueStatsReply, ErrorKind>;
    fn port_desc_stats_get(&self, xid: u32) -> PortDescReply;
    fn port_features_get(&self) -> u32;
    fn experimenter(&mut self, request: &ExperimenterRequest) -> Result<(), ErrorKind>;
}

/// Reference implementation with one fixed port (no. 1) for tests.
#[derive(Default)]
pub struct SimPort {
    pub known_port: u32,
}

impl SimPort {
    pub fn new() -> SimPort {
        SimPort { known_port: 1 }
    }
}

impl Port for SimPort {
    fn port_modify(&mut self, request: &PortModRequest) -> Result<(), ErrorKind> {
        if request.port_no == self.known_port {
            Ok(())
        } else {
            Err(ErrorKind::NotFound)
        }
    }

    fn port_stats_get(&self, request: &PortStatsRequest) -> Result<PortStatsReply, ErrorKind> {
        if request.port_no != self.known_port {
            return Err(ErrorKind::NotFound);
        }
        Ok(PortStatsReply {
            xid: request.header.xid,
            port_no: request.port_no,
            rx_packets: 0,
            tx_packets: 0,
            rx_bytes: 0,
            tx_bytes: 0,
        })
    }

    fn queue_config_get(
        &self,
        request: &QueueGetConfigRequest,
    ) -> Result<QueueConfigReply, ErrorKind> {
        if request.port_no != self.known_port {
            return Err(ErrorKind::NotFound);
        }
        Ok(QueueConfigReply { xid: request.header.xid, port_no: request.port_no, queue_count: 0 })
    }

    fn queue_stats_get(&self, request: &QueueStatsRequest) -> Result<QueueStatsReply, ErrorKind> {
        if request.port_no != self.known_port {
            return Err(ErrorKind::NotFound);
        }
        Ok(QueueStatsReply {
            xid: request.header.xid,
            port_no: request.port_no,
            queue_id: request.queue_id,
            tx_packets: 0,
            tx_bytes: 0,
        })
    }

    fn port_desc_stats_get(&self, xid: u32) -> PortDescReply {
        PortDescReply { xid, port_count: 1 }
    }

    fn port_features_get(&self) -> u32 {
        0
    }

    fn experimenter(&mut self, _request: &ExperimenterRequest) -> Result<(), ErrorKind> {
        Err(ErrorKind::NotSupported)
    }
}
