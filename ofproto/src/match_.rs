//! A simplified, wildcard-aware match structure.
//!
//! The dataplane's actual wire match format (OXM / standard match, per-field
//! prefix masks) is explicitly out of scope here — spec.md treats "how flows
//! are matched against traffic" as a dataplane concern. What the state
//! manager core needs from a match is only: decode it from a request,
//! compare two matches for non-strict containment, strict equality, and
//! overlap. [`Match`] models exactly that, as a sparse set of fields: a
//! field absent from the set is a wildcard.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchField {
    InPort,
    EthSrc,
    EthDst,
    EthType,
    VlanVid,
    IpSrc,
    IpDst,
    IpProto,
    TcpSrc,
    TcpDst,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Match {
    fields: BTreeMap<MatchField, u64>,
}

impl Match {
    pub fn new() -> Match {
        Match::default()
    }

    pub fn set(mut self, field: MatchField, value: u64) -> Match {
        self.fields.insert(field, value);
        self
    }

    pub fn get(&self, field: MatchField) -> Option<u64> {
        self.fields.get(&field).copied()
    }

    pub fn is_wildcard(&self, field: MatchField) -> bool {
        !self.fields.contains_key(&field)
    }

    /// True if every field `query` specifies is present and equal in `self`
    /// (the candidate flow entry's match). This is OpenFlow non-strict
    /// containment: a wildcarded query field matches anything.
    pub fn contains(&self, query: &Match) -> bool {
        query.fields.iter().all(|(field, value)| self.fields.get(field) == Some(value))
    }

    /// True if `self` and `other` specify exactly the same fields with the
    /// same values (strict match, modulo priority/table_id which callers
    /// compare separately).
    pub fn equals(&self, other: &Match) -> bool {
        self.fields == other.fields
    }

    /// True if `self` and `other` could both match some single packet: for
    /// every field specified in both, the values agree.
    pub fn overlaps(&self, other: &Match) -> bool {
        self.fields.iter().all(|(field, value)| match other.fields.get(field) {
            Some(other_value) => other_value == value,
            None => true,
        })
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "*");
        }
        let mut first = true;
        for (field, value) in &self.fields {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{field:?}={value:#x}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_query_matches_anything() {
        let entry = Match::new().set(MatchField::InPort, 1).set(MatchField::EthType, 0x0800);
        let query = Match::new();
        assert!(entry.contains(&query));
    }

    #[test]
    fn specific_query_requires_exact_field_value() {
        let entry = Match::new().set(MatchField::InPort, 1);
        let query = Match::new().set(MatchField::InPort, 2);
        assert!(!entry.contains(&query));
    }

    #[test]
    fn overlap_ignores_fields_only_one_side_specifies() {
        let a = Match::new().set(MatchField::InPort, 1);
        let b = Match::new().set(MatchField::EthType, 0x0800);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn overlap_fails_on_conflicting_shared_field() {
        let a = Match::new().set(MatchField::InPort, 1);
        let b = Match::new().set(MatchField::InPort, 2);
        assert!(!a.overlaps(&b));
    }
}
