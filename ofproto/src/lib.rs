//! Decoded OpenFlow message shapes, the internal error taxonomy, and the
//! per-version numeric error-code tables for the OF state manager.
//!
//! This crate deliberately contains no wire codec: per spec.md §6, decoding
//! and encoding the actual OpenFlow byte stream is an external
//! collaborator's job (a LOCI-style codec sitting below the state manager).
//! What lives here is the *shape* a decoded message takes once that codec
//! has done its work, plus the version-indexed lookup tables the error
//! translator needs.

pub mod effects;
pub mod errors;
pub mod flow_mod;
pub mod match_;
pub mod message;
pub mod protocol;
pub mod replies;
pub mod stats;

pub use effects::{Action, Effects, EffectsBody, Instruction};
pub use errors::{BadRequestCode, ErrorKind, ErrorType, FlowModFailedCode, PortModFailedCode};
pub use flow_mod::{FlowModCommand, FlowModFlags};
pub use match_::{Match, MatchField};
pub use message::{
    AggregateStatsRequest, BareRequest, BsnGetIpMaskRequest, BsnSetIpMaskRequest,
    ExperimenterRequest, FlowModRequest, FlowStatsRequest, Header, Message, PacketOutRequest,
    PortModRequest, PortStatsRequest, QueueGetConfigRequest, QueueStatsRequest, SetConfigRequest,
    Xid,
};
pub use protocol::{Version, Versions};
pub use replies::{
    BsnGetIpMaskReply, BsnHybridGetReply, DescStatsReply, FeaturesReply, GetConfigReply,
    PortDescReply, PortStatsReply, QueueConfigReply, QueueStatsReply, Reply, TableStatsReply,
};
pub use stats::{AggregateStatsReply, FlowStatsEntry, FlowStatsReply, CHUNK_THRESHOLD};
