//! Field locations of the notification wire format
//!
//! Maps a decoded [`XmlElement`] tree onto the document model. Absent and
//! empty elements take the zero value; text that does not parse as the
//! field's type fails the whole document.

use crate::decode::XmlElement;
use crate::document::{Credentials, Document, Event, Httpd, Platform, Server, ServiceGroup};
use crate::error::{DecodeError, DecodeResult};
use crate::service::{
    FilesystemSize, GenericService, Link, LinkCount, LinkTraffic, Load, Memory, ProcessCpu,
    ProgramRun, Swap, SystemCpu, SystemSnapshot,
};
use std::str::FromStr;

const ROOT: &str = "monit";

impl Document {
    /// Map a decoded `<monit>` tree onto a document
    pub fn from_element(root: &XmlElement) -> DecodeResult<Self> {
        if root.name != ROOT {
            return Err(DecodeError::UnexpectedRoot(root.name.clone()));
        }

        let services = match root.child("services") {
            Some(services) => services
                .children_named("service")
                .map(generic_service)
                .collect::<DecodeResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        let service_groups = root
            .child("servicegroups")
            .map(service_groups)
            .unwrap_or_default();

        let event = root.child("event").map(event).transpose()?;

        Ok(Self {
            id: attribute_text(root, "id"),
            incarnation: attribute_text(root, "incarnation"),
            version: attribute_text(root, "version"),
            server: section(root, "server", server)?,
            platform: section(root, "platform", platform)?,
            services,
            service_groups,
            event,
        })
    }
}

fn server(el: &XmlElement) -> DecodeResult<Server> {
    Ok(Server {
        uptime: field(el, "uptime")?,
        poll: field(el, "poll")?,
        start_delay: field(el, "startdelay")?,
        local_hostname: text(el, "localhostname"),
        control_file: text(el, "controlfile"),
        httpd: section(el, "httpd", |httpd| {
            Ok(Httpd {
                address: text(httpd, "address"),
                port: field(httpd, "port")?,
                ssl: field(httpd, "ssl")?,
            })
        })?,
        credentials: el
            .child("credentials")
            .map(|c| Credentials {
                username: text(c, "username"),
                password: text(c, "password"),
            })
            .unwrap_or_default(),
    })
}

fn platform(el: &XmlElement) -> DecodeResult<Platform> {
    Ok(Platform {
        name: text(el, "name"),
        release: text(el, "release"),
        version: text(el, "version"),
        machine: text(el, "machine"),
        cpu: text(el, "cpu"),
        memory: text(el, "memory"),
        swap: text(el, "swap"),
    })
}

fn generic_service(el: &XmlElement) -> DecodeResult<GenericService> {
    // Older agents put name/type in child elements, newer ones in attributes.
    let name = el
        .attribute("name")
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| text(el, "name"));
    let kind_code: u32 = match el.attribute("type") {
        Some(raw) => parse_value(el, "type", raw)?,
        None => field(el, "type")?,
    };

    Ok(GenericService {
        name,
        kind_code,
        collected_sec: field(el, "collected_sec")?,
        collected_usec: field(el, "collected_usec")?,
        status: field(el, "status")?,
        status_hint: field(el, "status_hint")?,
        monitor: field(el, "monitor")?,
        monitor_mode: field(el, "monitormode")?,
        pending_action: field(el, "pendingaction")?,
        mode: text(el, "mode"),
        uid: field(el, "uid")?,
        gid: field(el, "gid")?,
        flags: field(el, "flags")?,
        block: section(el, "block", filesystem_size)?,
        inode: section(el, "inode", filesystem_size)?,
        timestamp: field(el, "timestamp")?,
        size: field(el, "size")?,
        pid: field(el, "pid")?,
        ppid: field(el, "ppid")?,
        euid: field(el, "euid")?,
        uptime: field(el, "uptime")?,
        children: field(el, "children")?,
        memory: section(el, "memory", memory)?,
        cpu: section(el, "cpu", |cpu| {
            Ok(ProcessCpu {
                percent: field(cpu, "percent")?,
                percent_total: field(cpu, "percenttotal")?,
            })
        })?,
        system: section(el, "system", system_snapshot)?,
        program: section(el, "program", |program| {
            Ok(ProgramRun {
                status: field(program, "status")?,
                started: field(program, "started")?,
                output: text(program, "output"),
            })
        })?,
        link: section(el, "link", link)?,
    })
}

fn filesystem_size(el: &XmlElement) -> DecodeResult<FilesystemSize> {
    Ok(FilesystemSize {
        percent: field(el, "percent")?,
        usage: field(el, "usage")?,
        total: field(el, "total")?,
    })
}

fn memory(el: &XmlElement) -> DecodeResult<Memory> {
    Ok(Memory {
        percent: field(el, "percent")?,
        percent_total: field(el, "percenttotal")?,
        kilobyte: field(el, "kilobyte")?,
        kilobyte_total: field(el, "kilobytetotal")?,
    })
}

fn system_snapshot(el: &XmlElement) -> DecodeResult<SystemSnapshot> {
    Ok(SystemSnapshot {
        cpu: section(el, "cpu", |cpu| {
            Ok(SystemCpu {
                user: field(cpu, "user")?,
                system: field(cpu, "system")?,
                wait: field(cpu, "wait")?,
            })
        })?,
        memory: section(el, "memory", memory)?,
        load: section(el, "load", |load| {
            Ok(Load {
                avg01: field(load, "avg01")?,
                avg05: field(load, "avg05")?,
                avg15: field(load, "avg15")?,
            })
        })?,
        swap: section(el, "swap", |swap| {
            Ok(Swap {
                percent: field(swap, "percent")?,
                kilobyte: field(swap, "kilobyte")?,
            })
        })?,
    })
}

fn link(el: &XmlElement) -> DecodeResult<Link> {
    Ok(Link {
        state: field(el, "state")?,
        speed: field(el, "speed")?,
        duplex: field(el, "duplex")?,
        download: section(el, "download", link_traffic)?,
        upload: section(el, "upload", link_traffic)?,
    })
}

fn link_traffic(el: &XmlElement) -> DecodeResult<LinkTraffic> {
    Ok(LinkTraffic {
        packets: section(el, "packets", link_count)?,
        bytes: section(el, "bytes", link_count)?,
        errors: section(el, "errors", link_count)?,
    })
}

fn link_count(el: &XmlElement) -> DecodeResult<LinkCount> {
    Ok(LinkCount {
        now: field(el, "now")?,
        total: field(el, "total")?,
    })
}

fn service_groups(el: &XmlElement) -> Vec<ServiceGroup> {
    el.children_named("servicegroup")
        .flat_map(|group| {
            let name = group.attribute("name").unwrap_or_default().to_string();
            group.children_named("service").map(move |member| ServiceGroup {
                name: name.clone(),
                service: member.text.trim().to_string(),
            })
        })
        .collect()
}

fn event(el: &XmlElement) -> DecodeResult<Event> {
    let message = match el.child("message") {
        Some(message) => message.text.clone(),
        None => el.text.clone(),
    };

    Ok(Event {
        collected_sec: field(el, "collected_sec")?,
        collected_usec: field(el, "collected_usec")?,
        service: text(el, "service"),
        event_type: field(el, "type")?,
        id: field(el, "id")?,
        state: field(el, "state")?,
        action: field(el, "action")?,
        message,
        token: text(el, "token"),
    })
}

/// Map an optional child section, zero value when absent
fn section<T, F>(el: &XmlElement, name: &str, map: F) -> DecodeResult<T>
where
    T: Default,
    F: FnOnce(&XmlElement) -> DecodeResult<T>,
{
    el.child(name).map(map).transpose().map(Option::unwrap_or_default)
}

fn attribute_text(el: &XmlElement, key: &str) -> String {
    el.attribute(key).unwrap_or_default().to_string()
}

fn text(el: &XmlElement, name: &str) -> String {
    el.child(name)
        .map(|c| c.text.trim().to_string())
        .unwrap_or_default()
}

fn field<T>(el: &XmlElement, name: &str) -> DecodeResult<T>
where
    T: FromStr + Default,
{
    match el.child(name) {
        Some(child) => parse_value(el, name, &child.text),
        None => Ok(T::default()),
    }
}

fn parse_value<T>(el: &XmlElement, name: &str, raw: &str) -> DecodeResult<T>
where
    T: FromStr + Default,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse().map_err(|_| DecodeError::InvalidValue {
        field: format!("{}>{}", el.name, name),
        value: raw.to_string(),
    })
}
