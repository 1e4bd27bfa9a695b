//! OpenFlow protocol versions.
//!
//! Only the versions this agent actually speaks are modeled: 1.0, 1.1, 1.3,
//! 1.4. 1.2 and 1.5+ are intentionally absent, matching the set of versions
//! the error-code tables in [`crate::errors`] cover.

use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    Of10,
    Of11,
    Of13,
    Of14,
}

impl Version {
    /// `true` for every version at or after 1.1, where `table_id` and cookie
    /// masking were added to flow-mod-shaped messages.
    pub fn at_least_11(self) -> bool {
        self >= Version::Of11
    }

    /// `true` for every version at or after 1.3, where flow-stats entries
    /// gained a `flags` field.
    pub fn at_least_13(self) -> bool {
        self >= Version::Of13
    }
}

bitflags! {
    /// A set of protocol versions, e.g. the versions a listener is willing
    /// to negotiate.
    pub struct Versions: u8 {
        const OF10 = 0b0001;
        const OF11 = 0b0010;
        const OF13 = 0b0100;
        const OF14 = 0b1000;

        const SUPPORTED = Self::OF10.bits | Self::OF11.bits | Self::OF13.bits | Self::OF14.bits;
    }
}

impl From<Version> for Versions {
    fn from(v: Version) -> Versions {
        match v {
            Version::Of10 => Versions::OF10,
            Version::Of11 => Versions::OF11,
            Version::Of13 => Versions::OF13,
            Version::Of14 => Versions::OF14,
        }
    }
}
