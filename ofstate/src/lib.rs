//! The OpenFlow State Manager core: flow-mod handling, async stats/delete
//! iteration, per-version error translation, and the one-shot handlers
//! that round out a complete agent-side dispatcher.
//!
//! [`state_manager::StateManager`] owns the flow table and the three
//! external collaborators (`forwarding`, `port`, `connection`) plus a
//! clock; [`dispatcher::handle`] is the single entry point that takes
//! ownership of a decoded [`ofproto::Message`] and routes it to the right
//! component.

pub mod clock;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod error_translator;
pub mod flow_mutator;
pub mod flow_table;
pub mod forwarding;
pub mod ip_mask;
pub mod iterator_driver;
pub mod port;
pub mod query_builder;
pub mod simple_handlers;
pub mod state_manager;
pub mod stats_assembler;

pub use connection::{Connection, CxnId, RecordingConnection};
pub use dispatcher::handle;
pub use flow_table::{FlowEntry, FlowTable, InMemoryFlowTable, MatchMode, MetaMatch};
pub use forwarding::{Forwarding, SimForwarding};
pub use port::{Port, SimPort};
pub use state_manager::{Counters, StateManager};
