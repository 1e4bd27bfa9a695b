//! The mutable part of a flow entry: its actions (1.0) or instructions
//! (1.1+), tagged with the protocol version they were programmed under.
//!
//! Action/instruction *semantics* (what `Output(port)` does to a packet)
//! are a dataplane concern and out of scope here; what the state manager
//! needs is only to store them, replace them wholesale on modify, and gate
//! stats replies on whether the requester's version matches the version
//! they were programmed under (spec.md §4.5).

use crate::protocol::Version;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Output(u32),
    Drop,
    SetField(crate::match_::MatchField, u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    ApplyActions(Vec<Action>),
    WriteActions(Vec<Action>),
    GotoTable(u8),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectsBody {
    Actions(Vec<Action>),
    Instructions(Vec<Instruction>),
}

/// A flow entry's effects, version-tagged so a stats reply can tell whether
/// it was programmed under the same wire version as the requester.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effects {
    pub version: Version,
    pub body: EffectsBody,
}

impl Effects {
    pub fn actions(version: Version, actions: Vec<Action>) -> Effects {
        Effects { version, body: EffectsBody::Actions(actions) }
    }

    pub fn instructions(version: Version, instructions: Vec<Instruction>) -> Effects {
        Effects { version, body: EffectsBody::Instructions(instructions) }
    }
}
