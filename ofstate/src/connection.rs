//! `Connection`: the channel-send collaborator (spec.md §6). Owns nothing
//! about OpenFlow framing; just accepts a reply or error to deliver to a
//! given connection id.

use ofproto::{ErrorType, Reply, Version, Xid};

pub type CxnId = u64;

pub trait Connection {
    fn send(&mut self, cxn_id: CxnId, reply: Reply) -> anyhow::Result<()>;
    fn send_error(
        &mut self,
        cxn_id: CxnId,
        version: Version,
        xid: Xid,
        error_type: ErrorType,
        code: u16,
        data: Option<Vec<u8>>,
    ) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentError {
    pub cxn_id: CxnId,
    pub version: Version,
    pub xid: Xid,
    pub error_type: ErrorType,
    pub code: u16,
    pub data: Option<Vec<u8>>,
}

/// Records every send for assertions in tests, the way the teacher's own
/// `daemon` tests assert on recorded side effects rather than real I/O.
#[derive(Default)]
pub struct RecordingConnection {
    pub replies: Vec<(CxnId, Reply)>,
    pub errors: Vec<SentError>,
}

impl RecordingConnection {
    pub fn new() -> RecordingConnection {
        RecordingConnection::default()
    }
}

impl Connection for RecordingConnection {
    fn send(&mut self, cxn_id: CxnId, reply: Reply) -> anyhow::Result<()> {
        self.replies.push((cxn_id, reply));
        Ok(())
    }

    fn send_error(
        &mut self,
        cxn_id: CxnId,
        version: Version,
        xid: Xid,
        error_type: ErrorType,
        code: u16,
        data: Option<Vec<u8>>,
    ) -> anyhow::Result<()> {
        self.errors.push(SentError { cxn_id, version, xid, error_type, code, data });
        Ok(())
    }
}
