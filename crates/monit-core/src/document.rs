//! Notification document model
//!
//! One [`Document`] per pushed notification. Everything here is plain data
//! produced by [`crate::Parser`]; service records stay generic until a
//! consumer projects them.

use crate::projection::compose_time;
use crate::service::GenericService;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root `<monit>` node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Agent identity
    pub id: String,

    /// Changes every time the agent restarts
    pub incarnation: String,

    /// Agent version
    pub version: String,

    pub server: Server,

    pub platform: Platform,

    /// Service records in document order
    pub services: Vec<GenericService>,

    /// Group membership pairs in document order
    pub service_groups: Vec<ServiceGroup>,

    /// Present only on event notifications
    pub event: Option<Event>,
}

impl Document {
    /// Look up a service record by name
    pub fn service(&self, name: &str) -> Option<&GenericService> {
        self.services.iter().find(|s| s.name() == name)
    }

    /// Names of the services that belong to `group`
    pub fn group_members<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.service_groups
            .iter()
            .filter(move |g| g.name == group)
            .map(|g| g.service.as_str())
    }
}

/// `monit>server`: the agent's description of itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub uptime: u64,
    pub poll: u32,
    pub start_delay: u32,
    pub local_hostname: String,
    pub control_file: String,
    pub httpd: Httpd,
    pub credentials: Credentials,
}

/// `monit>server>httpd`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Httpd {
    pub address: String,
    pub port: u16,
    pub ssl: u32,
}

/// `monit>server>credentials`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// `monit>platform`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    pub cpu: String,
    pub memory: String,
    pub swap: String,
}

/// One `servicegroup`/`service` membership pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub name: String,
    pub service: String,
}

/// `monit>event`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub collected_sec: i64,
    pub collected_usec: i64,

    /// Name of the service the event is about
    pub service: String,

    #[serde(rename = "type")]
    pub event_type: i32,
    pub id: i64,
    pub state: i32,
    pub action: i32,
    pub message: String,
    pub token: String,
}

impl Event {
    /// Wall-clock time the event was collected
    pub fn collected_at(&self) -> Option<DateTime<Utc>> {
        compose_time(self.collected_sec, self.collected_usec)
    }
}
