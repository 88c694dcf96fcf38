//! Kind-specific service views
//!
//! Each view carries the common [`ServiceEnvelope`] plus only the fields
//! its kind reports. Views are produced by the projectors on
//! [`crate::GenericService`] and own all of their data.

use crate::kind::ServiceKind;
use crate::service::{
    FilesystemSize, LinkTraffic, Load, Memory, ProcessCpu, Swap, SystemCpu,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields every service kind reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEnvelope {
    pub name: String,
    pub kind: ServiceKind,

    /// `collected_sec` + `collected_usec`
    pub collected_at: DateTime<Utc>,

    pub status: u32,
    pub status_hint: u32,
    pub monitor: u32,
    pub monitor_mode: u32,
    pub pending_action: u32,
}

/// Filesystem service (type 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filesystem {
    pub envelope: ServiceEnvelope,
    pub mode: String,
    pub uid: u32,
    pub gid: u32,
    pub flags: u32,
    pub block: FilesystemSize,
    pub inode: FilesystemSize,
}

/// Directory service (type 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub envelope: ServiceEnvelope,
    pub mode: String,
    pub uid: u32,
    pub gid: u32,
    /// Last modification time
    pub timestamp: DateTime<Utc>,
}

/// File service (type 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub envelope: ServiceEnvelope,
    pub mode: String,
    pub uid: u32,
    pub gid: u32,
    /// Last modification time
    pub timestamp: DateTime<Utc>,
    pub size: u64,
}

/// Process service (type 3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub envelope: ServiceEnvelope,
    pub pid: u32,
    pub ppid: u32,
    pub euid: u32,
    pub gid: u32,
    /// Seconds since the process started
    pub uptime: u64,
    pub children: u32,
    pub memory: Memory,
    pub cpu: ProcessCpu,
}

/// Host system service (type 5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub envelope: ServiceEnvelope,
    pub cpu: SystemCpu,
    pub memory: Memory,
    pub load: Load,
    pub swap: Swap,
}

/// Named pipe service (type 6)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fifo {
    pub envelope: ServiceEnvelope,
    pub mode: String,
    pub uid: u32,
    pub gid: u32,
    /// Last modification time
    pub timestamp: DateTime<Utc>,
}

/// Program service (type 7)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub envelope: ServiceEnvelope,
    /// Exit status of the last run
    pub exit_status: i32,
    /// Start time of the last run, seconds since the epoch
    pub started: u64,
    pub output: String,
}

/// Network link service (type 8)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub envelope: ServiceEnvelope,
    /// -1 unknown, 0 down, 1 up
    pub state: i32,
    /// Link speed in bits per second, -1 when unknown
    pub speed: i64,
    /// -1 unknown, 0 half, 1 full
    pub duplex: i32,
    pub download: LinkTraffic,
    pub upload: LinkTraffic,
}

/// Any projected service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServiceView {
    Filesystem(Filesystem),
    Directory(Directory),
    File(File),
    Process(Process),
    System(System),
    Fifo(Fifo),
    Program(Program),
    Net(Net),
}

impl ServiceView {
    pub fn envelope(&self) -> &ServiceEnvelope {
        match self {
            ServiceView::Filesystem(v) => &v.envelope,
            ServiceView::Directory(v) => &v.envelope,
            ServiceView::File(v) => &v.envelope,
            ServiceView::Process(v) => &v.envelope,
            ServiceView::System(v) => &v.envelope,
            ServiceView::Fifo(v) => &v.envelope,
            ServiceView::Program(v) => &v.envelope,
            ServiceView::Net(v) => &v.envelope,
        }
    }

    pub fn name(&self) -> &str {
        &self.envelope().name
    }

    pub fn kind(&self) -> ServiceKind {
        self.envelope().kind
    }
}
