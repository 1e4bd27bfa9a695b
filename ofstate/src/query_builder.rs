//! C1: Query Builder (spec.md §4.1). Builds a zero-initialized `MetaMatch`
//! from a flow-mod-shaped request for a given matching mode.

use ofproto::{AggregateStatsRequest, FlowModRequest, FlowStatsRequest, Match, Version};

use crate::flow_table::{MatchMode, MetaMatch, PortScope, TableScope};

/// Shared fields every flow-mod-shaped request carries, regardless of
/// whether it's an add/modify/delete or a stats request — the query
/// builder only needs these.
pub struct QuerySource {
    pub version: Version,
    pub table_id: Option<u8>,
    pub match_: Match,
    pub priority: u16,
    pub out_port: Option<u32>,
    pub cookie: u64,
    pub cookie_mask: u64,
}

impl From<&FlowModRequest> for QuerySource {
    fn from(request: &FlowModRequest) -> QuerySource {
        QuerySource {
            version: request.header.version,
            table_id: request.table_id,
            match_: request.match_.clone(),
            priority: request.priority,
            out_port: request.out_port,
            cookie: request.cookie,
            cookie_mask: request.cookie_mask,
        }
    }
}

impl From<&FlowStatsRequest> for QuerySource {
    fn from(request: &FlowStatsRequest) -> QuerySource {
        QuerySource {
            version: request.header.version,
            table_id: request.table_id,
            match_: request.match_.clone(),
            priority: 0,
            out_port: request.out_port,
            cookie: request.cookie,
            cookie_mask: request.cookie_mask,
        }
    }
}

impl From<&AggregateStatsRequest> for QuerySource {
    fn from(request: &AggregateStatsRequest) -> QuerySource {
        QuerySource {
            version: request.header.version,
            table_id: request.table_id,
            match_: request.match_.clone(),
            priority: 0,
            out_port: request.out_port,
            cookie: request.cookie,
            cookie_mask: request.cookie_mask,
        }
    }
}

/// Builds a `MetaMatch` per the field-source table in spec.md §4.1.
///
/// `force_wildcard_port`: callers that must ignore the request's out_port
/// (overlap checks, and non-strict/strict modify which operate regardless
/// of output port) pass `true`.
pub fn build_meta_match(
    source: &QuerySource,
    mode: MatchMode,
    force_wildcard_port: bool,
) -> MetaMatch {
    let table_id = match source.table_id {
        Some(id) if source.version.at_least_11() => TableScope::Id(id),
        _ => TableScope::Any,
    };

    let check_priority = matches!(mode, MatchMode::Strict | MatchMode::Overlap);

    let out_port = if force_wildcard_port {
        PortScope::Wildcard
    } else {
        match source.out_port {
            Some(port) => PortScope::Port(port),
            None => PortScope::Wildcard,
        }
    };

    let use_cookie = mode != MatchMode::Overlap && source.version.at_least_11();
    let (cookie, cookie_mask) = if use_cookie { (source.cookie, source.cookie_mask) } else { (0, 0) };

    MetaMatch {
        mode,
        table_id,
        match_: source.match_.clone(),
        check_priority,
        priority: source.priority,
        out_port,
        cookie,
        cookie_mask,
    }
}
