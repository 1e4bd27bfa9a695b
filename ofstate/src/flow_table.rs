//! The authoritative flow table: `FlowEntry`, the `MetaMatch` query shape,
//! and the `FlowTable` trait the rest of the core (C1, C3, C4) is built
//! against. spec.md §1 treats the table's container itself as an external
//! collaborator ("assumed given"); [`InMemoryFlowTable`] is the reference
//! implementation this crate tests against.

use std::collections::BTreeMap;
use std::time::Duration;

use ofproto::{Effects, Match};

/// spec.md §3: the authoritative mirror of a single programmed flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowEntry {
    pub flow_id: u64,
    pub table_id: u8,
    pub match_: Match,
    pub priority: u16,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub cookie: u64,
    pub flags: u16,
    pub insert_time: Duration,
    pub effects: Effects,
}

/// spec.md §4.1: the query mode a [`MetaMatch`] is built for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchMode {
    Strict,
    NonStrict,
    Overlap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableScope {
    Any,
    Id(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortScope {
    Wildcard,
    Port(u32),
}

/// spec.md §3: a query object consumed by the flow table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaMatch {
    pub mode: MatchMode,
    pub table_id: TableScope,
    pub match_: Match,
    pub check_priority: bool,
    pub priority: u16,
    pub out_port: PortScope,
    pub cookie: u64,
    pub cookie_mask: u64,
}

impl MetaMatch {
    /// True if `entry` is selected by this query, per the rules in
    /// spec.md §4.1/§4.3: table scope, match containment (or strict
    /// equality/overlap depending on mode), optional priority, out_port, and
    /// masked cookie comparison.
    pub fn meta_matches(&self, entry: &FlowEntry) -> bool {
        if let TableScope::Id(id) = self.table_id {
            if entry.table_id != id {
                return false;
            }
        }
        if self.check_priority && entry.priority != self.priority {
            return false;
        }
        if let PortScope::Port(port) = self.out_port {
            if !entry_outputs_to(entry, port) {
                return false;
            }
        }
        if self.cookie_mask != 0 && (entry.cookie & self.cookie_mask) != (self.cookie & self.cookie_mask) {
            return false;
        }
        match self.mode {
            MatchMode::Strict => entry.match_.equals(&self.match_) && self.check_priority,
            MatchMode::NonStrict => entry.match_.contains(&self.match_),
            MatchMode::Overlap => entry.match_.overlaps(&self.match_),
        }
    }
}

fn entry_outputs_to(entry: &FlowEntry, port: u32) -> bool {
    use ofproto::{Action, EffectsBody, Instruction};
    let actions_output = |actions: &[Action]| {
        actions.iter().any(|a| matches!(a, Action::Output(p) if *p == port))
    };
    match &entry.effects.body {
        EffectsBody::Actions(actions) => actions_output(actions),
        EffectsBody::Instructions(instructions) => instructions.iter().any(|i| match i {
            Instruction::ApplyActions(a) | Instruction::WriteActions(a) => actions_output(a),
            Instruction::GotoTable(_) => false,
        }),
    }
}

/// spec.md §6: the external flow-table interface, consumed by C1/C3/C4.
///
/// `spawn_iter_task` here runs synchronously to completion rather than
/// yielding between callback invocations — spec.md §1 marks the table's own
/// scheduling as out of scope, and a synchronous reference table satisfies
/// the same contract (callback once per match, then once with `None`)
/// without needing an executor. A production table backed by the agent's
/// real event loop would interleave other handlers between callbacks; the
/// callback contract here is identical either way.
pub trait FlowTable {
    fn add(&mut self, flow_id: u64, entry: FlowEntry);
    fn delete(&mut self, flow_id: u64) -> Option<FlowEntry>;
    fn get(&self, flow_id: u64) -> Option<&FlowEntry>;
    fn get_mut(&mut self, flow_id: u64) -> Option<&mut FlowEntry>;
    fn iter_matching(&self, query: &MetaMatch) -> Vec<u64>;
    fn current_count(&self) -> usize;
    fn forwarding_add_errors(&self) -> u64;
    fn record_forwarding_add_error(&mut self);

    /// Unique entry whose (priority, match, table_id) equals the query's,
    /// per spec.md §4.3's ordering tie-break — duplicates are forbidden by
    /// invariant (3), so at most one id is ever returned.
    fn strict_match(&self, query: &MetaMatch) -> Option<u64> {
        self.iter_matching(query).into_iter().next()
    }

    fn modify_effects(&mut self, flow_id: u64, effects: Effects) {
        if let Some(entry) = self.get_mut(flow_id) {
            entry.effects = effects;
        }
    }

    /// Invokes `callback` once per matching id, then once with `None`.
    fn spawn_iter_task(
        &mut self,
        query: &MetaMatch,
        mut callback: impl FnMut(&mut Self, Option<u64>),
    ) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        for id in self.iter_matching(query) {
            callback(self, Some(id));
        }
        callback(self, None);
        Ok(())
    }
}

/// Reference/test [`FlowTable`] implementation backed by a `BTreeMap`.
#[derive(Default)]
pub struct InMemoryFlowTable {
    entries: BTreeMap<u64, FlowEntry>,
    forwarding_add_errors: u64,
}

impl InMemoryFlowTable {
    pub fn new() -> InMemoryFlowTable {
        InMemoryFlowTable::default()
    }
}

impl FlowTable for InMemoryFlowTable {
    fn add(&mut self, flow_id: u64, entry: FlowEntry) {
        self.entries.insert(flow_id, entry);
    }

    fn delete(&mut self, flow_id: u64) -> Option<FlowEntry> {
        self.entries.remove(&flow_id)
    }

    fn get(&self, flow_id: u64) -> Option<&FlowEntry> {
        self.entries.get(&flow_id)
    }

    fn get_mut(&mut self, flow_id: u64) -> Option<&mut FlowEntry> {
        self.entries.get_mut(&flow_id)
    }

    fn iter_matching(&self, query: &MetaMatch) -> Vec<u64> {
        self.entries
            .iter()
            .filter(|(_, entry)| query.meta_matches(entry))
            .map(|(id, _)| *id)
            .collect()
    }

    fn current_count(&self) -> usize {
        self.entries.len()
    }

    fn forwarding_add_errors(&self) -> u64 {
        self.forwarding_add_errors
    }

    fn record_forwarding_add_error(&mut self) {
        self.forwarding_add_errors += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofproto::{MatchField, Version};

    fn entry(id: u64, priority: u16, match_: Match) -> FlowEntry {
        FlowEntry {
            flow_id: id,
            table_id: 0,
            match_,
            priority,
            idle_timeout: 0,
            hard_timeout: 0,
            cookie: 0,
            flags: 0,
            insert_time: Duration::from_secs(0),
            effects: Effects::actions(Version::Of10, vec![]),
        }
    }

    fn wildcard_query(mode: MatchMode, match_: Match) -> MetaMatch {
        MetaMatch {
            mode,
            table_id: TableScope::Any,
            match_,
            check_priority: false,
            priority: 0,
            out_port: PortScope::Wildcard,
            cookie: 0,
            cookie_mask: 0,
        }
    }

    #[test]
    fn non_strict_query_matches_containing_entry() {
        let mut table = InMemoryFlowTable::new();
        table.add(1, entry(1, 100, Match::new().set(MatchField::InPort, 1)));
        let query = wildcard_query(MatchMode::NonStrict, Match::new());
        assert_eq!(table.iter_matching(&query), vec![1]);
    }

    #[test]
    fn strict_query_requires_priority_and_exact_match() {
        let mut table = InMemoryFlowTable::new();
        table.add(1, entry(1, 100, Match::new().set(MatchField::InPort, 1)));
        let mut query = wildcard_query(MatchMode::Strict, Match::new().set(MatchField::InPort, 1));
        query.check_priority = true;
        query.priority = 100;
        assert_eq!(table.strict_match(&query), Some(1));

        query.priority = 200;
        assert_eq!(table.strict_match(&query), None);
    }

    #[test]
    fn spawn_iter_task_visits_every_match_then_sentinel() {
        let mut table = InMemoryFlowTable::new();
        table.add(1, entry(1, 100, Match::new()));
        table.add(2, entry(2, 100, Match::new()));
        let query = wildcard_query(MatchMode::NonStrict, Match::new());

        let mut seen = Vec::new();
        table
            .spawn_iter_task(&query, |_table, id| seen.push(id))
            .unwrap();

        assert_eq!(seen, vec![Some(1), Some(2), None]);
    }
}
