//! Kind-checked projection of generic service records
//!
//! One projector per [`ServiceKind`]. Each checks the record's type code
//! against the kind it builds, then copies the fields its view declares.
//! Projection never mutates the record; projecting the same record twice
//! yields equal views.

use crate::error::{ProjectionError, ProjectionResult};
use crate::kind::ServiceKind;
use crate::service::GenericService;
use crate::view::{
    Directory, Fifo, File, Filesystem, Net, Process, Program, ServiceEnvelope, ServiceView,
    System,
};
use chrono::{DateTime, TimeZone, Utc};

const MICROS_PER_SEC: i64 = 1_000_000;

/// Compose a wall-clock time from split seconds and microseconds
///
/// Microseconds outside `0..1_000_000` carry into the seconds.
pub fn compose_time(seconds: i64, micros: i64) -> Option<DateTime<Utc>> {
    let total = seconds.checked_mul(MICROS_PER_SEC)?.checked_add(micros)?;
    Utc.timestamp_micros(total).single()
}

impl GenericService {
    /// Project onto the view matching the record's own type code
    pub fn project(&self) -> ProjectionResult<ServiceView> {
        let kind = self.kind().ok_or_else(|| self.unknown_kind())?;

        Ok(match kind {
            ServiceKind::Filesystem => ServiceView::Filesystem(self.as_filesystem()?),
            ServiceKind::Directory => ServiceView::Directory(self.as_directory()?),
            ServiceKind::File => ServiceView::File(self.as_file()?),
            ServiceKind::Process => ServiceView::Process(self.as_process()?),
            ServiceKind::System => ServiceView::System(self.as_system()?),
            ServiceKind::Fifo => ServiceView::Fifo(self.as_fifo()?),
            ServiceKind::Program => ServiceView::Program(self.as_program()?),
            ServiceKind::Net => ServiceView::Net(self.as_net()?),
        })
    }

    pub fn as_filesystem(&self) -> ProjectionResult<Filesystem> {
        Ok(Filesystem {
            envelope: self.envelope(ServiceKind::Filesystem)?,
            mode: self.mode.clone(),
            uid: self.uid,
            gid: self.gid,
            flags: self.flags,
            block: self.block.clone(),
            inode: self.inode.clone(),
        })
    }

    pub fn as_directory(&self) -> ProjectionResult<Directory> {
        Ok(Directory {
            envelope: self.envelope(ServiceKind::Directory)?,
            mode: self.mode.clone(),
            uid: self.uid,
            gid: self.gid,
            timestamp: self.modified_at()?,
        })
    }

    pub fn as_file(&self) -> ProjectionResult<File> {
        Ok(File {
            envelope: self.envelope(ServiceKind::File)?,
            mode: self.mode.clone(),
            uid: self.uid,
            gid: self.gid,
            timestamp: self.modified_at()?,
            size: self.size,
        })
    }

    pub fn as_process(&self) -> ProjectionResult<Process> {
        Ok(Process {
            envelope: self.envelope(ServiceKind::Process)?,
            pid: self.pid,
            ppid: self.ppid,
            euid: self.euid,
            gid: self.gid,
            uptime: self.uptime,
            children: self.children,
            memory: self.memory.clone(),
            cpu: self.cpu.clone(),
        })
    }

    pub fn as_system(&self) -> ProjectionResult<System> {
        Ok(System {
            envelope: self.envelope(ServiceKind::System)?,
            cpu: self.system.cpu.clone(),
            memory: self.system.memory.clone(),
            load: self.system.load.clone(),
            swap: self.system.swap.clone(),
        })
    }

    pub fn as_fifo(&self) -> ProjectionResult<Fifo> {
        Ok(Fifo {
            envelope: self.envelope(ServiceKind::Fifo)?,
            mode: self.mode.clone(),
            uid: self.uid,
            gid: self.gid,
            timestamp: self.modified_at()?,
        })
    }

    pub fn as_program(&self) -> ProjectionResult<Program> {
        Ok(Program {
            envelope: self.envelope(ServiceKind::Program)?,
            exit_status: self.program.status,
            started: self.program.started,
            output: self.program.output.clone(),
        })
    }

    pub fn as_net(&self) -> ProjectionResult<Net> {
        Ok(Net {
            envelope: self.envelope(ServiceKind::Net)?,
            state: self.link.state,
            speed: self.link.speed,
            duplex: self.link.duplex,
            download: self.link.download.clone(),
            upload: self.link.upload.clone(),
        })
    }

    /// Check the type code and build the common fields
    fn envelope(&self, expected: ServiceKind) -> ProjectionResult<ServiceEnvelope> {
        match self.kind() {
            Some(actual) if actual == expected => {}
            Some(actual) => {
                return Err(ProjectionError::KindMismatch {
                    service: self.name.clone(),
                    expected,
                    actual,
                })
            }
            None => return Err(self.unknown_kind()),
        }

        let collected_at = compose_time(self.collected_sec, self.collected_usec).ok_or_else(|| {
            ProjectionError::InvalidTimestamp {
                service: self.name.clone(),
                field: "collected time",
                seconds: self.collected_sec,
                micros: self.collected_usec,
            }
        })?;

        Ok(ServiceEnvelope {
            name: self.name.clone(),
            kind: expected,
            collected_at,
            status: self.status,
            status_hint: self.status_hint,
            monitor: self.monitor,
            monitor_mode: self.monitor_mode,
            pending_action: self.pending_action,
        })
    }

    fn unknown_kind(&self) -> ProjectionError {
        ProjectionError::UnknownKind {
            service: self.name.clone(),
            code: self.kind_code,
        }
    }

    fn modified_at(&self) -> ProjectionResult<DateTime<Utc>> {
        compose_time(self.timestamp, 0).ok_or_else(|| ProjectionError::InvalidTimestamp {
            service: self.name.clone(),
            field: "modification time",
            seconds: self.timestamp,
            micros: 0,
        })
    }
}
