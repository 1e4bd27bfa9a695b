//! Flow-mod command kind and flags, mirroring `OFPFC_*`/`OFPFF_*` from the
//! wire protocol without any of the wire encoding.

use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowModCommand {
    Add,
    Modify { strict: bool },
    Delete { strict: bool },
}

impl FlowModCommand {
    pub fn is_strict(self) -> bool {
        match self {
            FlowModCommand::Add => false,
            FlowModCommand::Modify { strict } | FlowModCommand::Delete { strict } => strict,
        }
    }
}

bitflags! {
    pub struct FlowModFlags: u16 {
        const SEND_FLOW_REM = 1 << 0;
        const CHECK_OVERLAP = 1 << 1;
        /// OpenFlow 1.0 only; emergency flows were removed in 1.1.
        const EMERGENCY = 1 << 2;
    }
}
