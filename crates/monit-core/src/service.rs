//! Generic service record and the composite blocks it carries
//!
//! Every service kind arrives as the same `<service>` element, so the
//! decoder fills one record shape holding the payload of every kind.
//! The record is read only through the projectors in [`crate::projection`].

use crate::kind::ServiceKind;
use serde::{Deserialize, Serialize};

/// Kind-ambiguous `monit>services>service` record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericService {
    pub(crate) name: String,
    pub(crate) kind_code: u32,
    pub(crate) collected_sec: i64,
    pub(crate) collected_usec: i64,
    pub(crate) status: u32,
    pub(crate) status_hint: u32,
    pub(crate) monitor: u32,
    pub(crate) monitor_mode: u32,
    pub(crate) pending_action: u32,

    // filesystem / directory / file / fifo
    pub(crate) mode: String,
    pub(crate) uid: u32,
    pub(crate) gid: u32,
    pub(crate) flags: u32,
    pub(crate) block: FilesystemSize,
    pub(crate) inode: FilesystemSize,
    pub(crate) timestamp: i64,
    pub(crate) size: u64,

    // process
    pub(crate) pid: u32,
    pub(crate) ppid: u32,
    pub(crate) euid: u32,
    pub(crate) uptime: u64,
    pub(crate) children: u32,
    pub(crate) memory: Memory,
    pub(crate) cpu: ProcessCpu,

    // system / program / net
    pub(crate) system: SystemSnapshot,
    pub(crate) program: ProgramRun,
    pub(crate) link: Link,
}

impl GenericService {
    /// Service name as configured in the agent
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw wire type code
    pub fn kind_code(&self) -> u32 {
        self.kind_code
    }

    /// Resolved kind, `None` when the agent sent a code this collector does not know
    pub fn kind(&self) -> Option<ServiceKind> {
        ServiceKind::from_code(self.kind_code)
    }
}

/// Block or inode usage of a filesystem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesystemSize {
    pub percent: f64,
    pub usage: f64,
    pub total: f64,
}

/// Memory usage, shared by process and system records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub percent: f64,
    pub percent_total: f64,
    pub kilobyte: u64,
    pub kilobyte_total: u64,
}

/// CPU usage of a process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessCpu {
    pub percent: f64,
    pub percent_total: f64,
}

/// CPU usage of the whole host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemCpu {
    pub user: f64,
    pub system: f64,
    pub wait: f64,
}

/// Load averages over 1, 5 and 15 minutes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub avg01: f64,
    pub avg05: f64,
    pub avg15: f64,
}

/// Swap usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swap {
    pub percent: f64,
    pub kilobyte: u64,
}

/// `service>system` snapshot carried by system records
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SystemSnapshot {
    pub(crate) cpu: SystemCpu,
    pub(crate) memory: Memory,
    pub(crate) load: Load,
    pub(crate) swap: Swap,
}

/// `service>program` block carried by program records
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ProgramRun {
    pub(crate) status: i32,
    pub(crate) started: u64,
    pub(crate) output: String,
}

/// `service>link` block carried by network-link records
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Link {
    pub(crate) state: i32,
    pub(crate) speed: i64,
    pub(crate) duplex: i32,
    pub(crate) download: LinkTraffic,
    pub(crate) upload: LinkTraffic,
}

/// Traffic counters for one direction of a network link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkTraffic {
    pub packets: LinkCount,
    pub bytes: LinkCount,
    pub errors: LinkCount,
}

/// Per-second rate and running total of a link counter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkCount {
    pub now: i64,
    pub total: i64,
}
