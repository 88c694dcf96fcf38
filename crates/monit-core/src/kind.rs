//! Service kind discriminant
//!
//! Monit numbers its service types on the wire. Code 4 is not a kind this
//! collector understands and stays unassigned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a monitored service, keyed by the agent's numeric type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum ServiceKind {
    Filesystem = 0,
    Directory = 1,
    File = 2,
    Process = 3,
    System = 5,
    Fifo = 6,
    Program = 7,
    Net = 8,
}

impl ServiceKind {
    /// Every kind, in wire-code order
    pub const ALL: [ServiceKind; 8] = [
        ServiceKind::Filesystem,
        ServiceKind::Directory,
        ServiceKind::File,
        ServiceKind::Process,
        ServiceKind::System,
        ServiceKind::Fifo,
        ServiceKind::Program,
        ServiceKind::Net,
    ];

    /// Wire type code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Resolve a wire type code, `None` for codes outside the enumeration
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ServiceKind::Filesystem),
            1 => Some(ServiceKind::Directory),
            2 => Some(ServiceKind::File),
            3 => Some(ServiceKind::Process),
            5 => Some(ServiceKind::System),
            6 => Some(ServiceKind::Fifo),
            7 => Some(ServiceKind::Program),
            8 => Some(ServiceKind::Net),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Filesystem => "filesystem",
            ServiceKind::Directory => "directory",
            ServiceKind::File => "file",
            ServiceKind::Process => "process",
            ServiceKind::System => "system",
            ServiceKind::Fifo => "fifo",
            ServiceKind::Program => "program",
            ServiceKind::Net => "net",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
