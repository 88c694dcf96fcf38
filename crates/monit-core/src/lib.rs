//! Monit Core - notification model, decoding and service projection
//!
//! A Monit agent pushes its state as one XML document per notification.
//! Every monitored service arrives as the same `<service>` element whatever
//! its kind, so decoding happens in two passes:
//!
//! 1. [`Parser`] decodes the document into a [`Document`] holding
//!    kind-ambiguous [`GenericService`] records.
//! 2. A consumer projects each record onto the view for its kind
//!    ([`GenericService::as_process`], [`GenericService::project`], ...).
//!    Asking for the wrong kind is a [`ProjectionError::KindMismatch`].
//!
//! ```
//! use monit_core::{parse, ServiceKind};
//!
//! let document = parse(
//!     br#"<monit id="abc"><services><service type="3" name="sshd"><pid>100</pid></service></services></monit>"#,
//! )
//! .unwrap();
//!
//! let sshd = &document.services[0];
//! assert_eq!(sshd.kind(), Some(ServiceKind::Process));
//! assert_eq!(sshd.as_process().unwrap().pid, 100);
//! assert!(sshd.as_file().is_err());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod decode;
pub mod document;
pub mod error;
pub mod kind;
mod mapping;
pub mod parser;
pub mod projection;
pub mod service;
pub mod view;

pub use decode::{Decoder, XmlDecoder, XmlElement};
pub use document::{Credentials, Document, Event, Httpd, Platform, Server, ServiceGroup};
pub use error::{DecodeError, DecodeResult, ProjectionError, ProjectionResult};
pub use kind::ServiceKind;
pub use parser::{parse, Parser};
pub use projection::compose_time;
pub use service::{
    FilesystemSize, GenericService, LinkCount, LinkTraffic, Load, Memory, ProcessCpu, Swap,
    SystemCpu,
};
pub use view::{
    Directory, Fifo, File, Filesystem, Net, Process, Program, ServiceEnvelope, ServiceView,
    System,
};
