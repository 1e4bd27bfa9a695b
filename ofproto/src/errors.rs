//! Internal error taxonomy and the per-version OpenFlow (type, code) tables
//! it translates to.
//!
//! The original C implementation this agent's handling logic traces back to
//! looked these numeric codes up through per-version macros
//! (`OF_FLOW_MOD_FAILED_OVERLAP_BY_VERSION(ver)` and so on), with `@fixme`
//! notes next to the ones that were wrong for anything newer than 1.0. Here
//! the mapping is a plain data table indexed by [`Version`], so there's one
//! place to get it right instead of one macro per logical code.

use crate::protocol::Version;

/// Internal error taxonomy (spec.md §7). Handler logic reasons about these;
/// only the flow-mod-shaped handlers in [`crate::FlowModFailedCode`]
/// translate a subset of them further into OpenFlow wire codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    None,
    NotFound,
    Range,
    Resource,
    NotSupported,
    Param,
    Unknown,
}

/// The `type` field of an OpenFlow error message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorType {
    HelloFailed,
    BadRequest,
    BadMatch,
    FlowModFailed,
    PortModFailed,
    /// Bare type/code 0/0, used by the BSN vendor extension's bad-index
    /// path, which has never had a proper error code assigned to it.
    Generic,
}

/// Logical flow-mod failure reasons, independent of wire version. See
/// spec.md §4.2.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowModFailedCode {
    AllTablesFull,
    Overlap,
    Eperm,
    BadEmergencyTimeout,
    Unsupported,
    Unknown,
}

impl FlowModFailedCode {
    /// The numeric wire code for this logical reason under `version`.
    ///
    /// OpenFlow 1.0's `OFPFMFC_*` enumeration differs from 1.1+'s: 1.0 has
    /// `ALL_TABLES_FULL`/`EPERM`/`BAD_EMERG_TIMEOUT` where 1.1+ collapsed
    /// emergency flows out of the protocol and renamed/renumbered the rest.
    pub fn wire_code(self, version: Version) -> u16 {
        use FlowModFailedCode::*;
        match (version, self) {
            (Version::Of10, AllTablesFull) => 0,
            (Version::Of10, Overlap) => 1,
            (Version::Of10, Eperm) => 2,
            (Version::Of10, BadEmergencyTimeout) => 3,
            (Version::Of10, Unsupported) => 5,
            (Version::Of10, Unknown) => 2, // 1.0 has no UNKNOWN; EPERM is the fallback.

            (_, Unknown) => 0,
            (_, AllTablesFull) => 1, // renamed TABLE_FULL in 1.1+
            (_, Overlap) => 3,
            (_, Eperm) => 4,
            (_, BadEmergencyTimeout) => 5, // renamed BAD_TIMEOUT; emergency flows gone in 1.1+
            (_, Unsupported) => 6, // closest analog, BAD_COMMAND
        }
    }
}

/// Logical `OFPBRC_*` (bad-request) reasons used by this agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BadRequestCode {
    BadType,
    BadExperimenter,
}

impl BadRequestCode {
    pub fn wire_code(self, _version: Version) -> u16 {
        match self {
            BadRequestCode::BadType => 1,
            BadRequestCode::BadExperimenter => 2,
        }
    }
}

/// Logical `OFPPMFC_*` (port-mod-failed) reasons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortModFailedCode {
    BadPort,
}

impl PortModFailedCode {
    pub fn wire_code(self, _version: Version) -> u16 {
        match self {
            PortModFailedCode::BadPort => 0,
        }
    }
}

impl ErrorType {
    pub fn wire_type(self, _version: Version) -> u16 {
        match self {
            ErrorType::HelloFailed => 0,
            ErrorType::BadRequest => 1,
            ErrorType::BadMatch => 13,
            ErrorType::FlowModFailed => 3,
            ErrorType::PortModFailed => 7,
            ErrorType::Generic => 0,
        }
    }
}

/// Maps an internal [`ErrorKind`] from a failed flow-mod to the
/// version-specific (type, code) pair to send, per spec.md §4.2.
///
/// Returns `None` for [`ErrorKind::None`] — no error should be sent.
pub fn flow_mod_error(kind: ErrorKind, version: Version) -> Option<(ErrorType, u16)> {
    let code = match kind {
        ErrorKind::None => return None,
        ErrorKind::Resource => FlowModFailedCode::AllTablesFull,
        ErrorKind::NotSupported => FlowModFailedCode::Unsupported,
        _ => {
            if version == Version::Of10 {
                FlowModFailedCode::Eperm
            } else {
                FlowModFailedCode::Unknown
            }
        }
    };
    Some((ErrorType::FlowModFailed, code.wire_code(version)))
}
