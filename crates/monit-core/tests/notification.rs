//! Full status and event notifications as an agent sends them

use monit_core::{parse, DecodeError, ProjectionError, ServiceKind, ServiceView};

const STATUS: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<monit id="4ee4c4bd2f1b2fd1c1ed1d8b0f5e3a2c" incarnation="1417171580" version="5.10">
  <server>
    <uptime>5</uptime>
    <poll>30</poll>
    <startdelay>0</startdelay>
    <localhostname>web01</localhostname>
    <controlfile>/etc/monit/monitrc</controlfile>
    <httpd>
      <address>127.0.0.1</address>
      <port>2812</port>
      <ssl>0</ssl>
    </httpd>
    <credentials>
      <username>admin</username>
      <password>monit</password>
    </credentials>
  </server>
  <platform>
    <name>Linux</name>
    <release>3.13.0-39-generic</release>
    <version>#66-Ubuntu SMP</version>
    <machine>x86_64</machine>
    <cpu>2</cpu>
    <memory>2048212</memory>
    <swap>1046524</swap>
  </platform>
  <services>
    <service type="0">
      <name>rootfs</name>
      <collected_sec>1417171585</collected_sec>
      <collected_usec>437652</collected_usec>
      <status>0</status>
      <status_hint>0</status_hint>
      <monitor>1</monitor>
      <monitormode>0</monitormode>
      <pendingaction>0</pendingaction>
      <mode>755</mode>
      <uid>0</uid>
      <gid>0</gid>
      <flags>4096</flags>
      <block>
        <percent>41.5</percent>
        <usage>8192.0</usage>
        <total>19740.2</total>
      </block>
      <inode>
        <percent>12.5</percent>
        <usage>160000</usage>
        <total>1280000</total>
      </inode>
    </service>
    <service type="2">
      <name>syslog</name>
      <collected_sec>1417171585</collected_sec>
      <collected_usec>438001</collected_usec>
      <status>0</status>
      <mode>640</mode>
      <uid>104</uid>
      <gid>4</gid>
      <timestamp>1417171500</timestamp>
      <size>524288</size>
    </service>
    <service type="3">
      <name>sshd</name>
      <collected_sec>1417171585</collected_sec>
      <collected_usec>439000</collected_usec>
      <status>0</status>
      <monitor>1</monitor>
      <pid>812</pid>
      <ppid>1</ppid>
      <euid>0</euid>
      <gid>0</gid>
      <uptime>86400</uptime>
      <children>2</children>
      <memory>
        <percent>0.1</percent>
        <percenttotal>0.4</percenttotal>
        <kilobyte>2652</kilobyte>
        <kilobytetotal>8120</kilobytetotal>
      </memory>
      <cpu>
        <percent>0.0</percent>
        <percenttotal>0.1</percenttotal>
      </cpu>
    </service>
    <service type="7">
      <name>backup-check</name>
      <collected_sec>1417171585</collected_sec>
      <collected_usec>440000</collected_usec>
      <status>8192</status>
      <program>
        <started>1417171555</started>
        <status>1</status>
        <output><![CDATA[last backup is 3 days old]]></output>
      </program>
    </service>
    <service type="8">
      <name>eth0</name>
      <collected_sec>1417171585</collected_sec>
      <collected_usec>441000</collected_usec>
      <link>
        <state>1</state>
        <speed>1000000000</speed>
        <duplex>1</duplex>
        <download>
          <packets><now>12</now><total>345678</total></packets>
          <bytes><now>2048</now><total>987654321</total></bytes>
          <errors><now>0</now><total>3</total></errors>
        </download>
        <upload>
          <packets><now>9</now><total>234567</total></packets>
          <bytes><now>1024</now><total>123456789</total></bytes>
          <errors><now>-1</now><total>-1</total></errors>
        </upload>
      </link>
    </service>
    <service type="5">
      <name>web01</name>
      <collected_sec>1417171585</collected_sec>
      <collected_usec>442000</collected_usec>
      <system>
        <load>
          <avg01>0.21</avg01>
          <avg05>0.18</avg05>
          <avg15>0.12</avg15>
        </load>
        <cpu>
          <user>3.2</user>
          <system>1.1</system>
          <wait>0.4</wait>
        </cpu>
        <memory>
          <percent>51.0</percent>
          <kilobyte>1048576</kilobyte>
        </memory>
        <swap>
          <percent>1.5</percent>
          <kilobyte>2048</kilobyte>
        </swap>
      </system>
    </service>
  </services>
  <servicegroups>
    <servicegroup name="web">
      <service>sshd</service>
      <service>syslog</service>
    </servicegroup>
  </servicegroups>
</monit>"#;

const EVENT: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<monit id="4ee4c4bd2f1b2fd1c1ed1d8b0f5e3a2c" incarnation="1417171580" version="5.10">
  <server>
    <localhostname>web01</localhostname>
  </server>
  <event>
    <collected_sec>1417171590</collected_sec>
    <collected_usec>5000</collected_usec>
    <service>sshd</service>
    <type>3</type>
    <id>512</id>
    <state>1</state>
    <action>6</action>
    <message><![CDATA[process is not running]]></message>
    <token>a3f1</token>
  </event>
</monit>"#;

#[test]
fn status_notification_decodes_envelope() {
    let document = parse(STATUS.as_bytes()).unwrap();

    assert_eq!(document.id, "4ee4c4bd2f1b2fd1c1ed1d8b0f5e3a2c");
    assert_eq!(document.incarnation, "1417171580");
    assert_eq!(document.version, "5.10");
    assert_eq!(document.server.poll, 30);
    assert_eq!(document.server.local_hostname, "web01");
    assert_eq!(document.server.httpd.port, 2812);
    assert_eq!(document.server.credentials.username, "admin");
    assert_eq!(document.platform.machine, "x86_64");
    assert!(document.event.is_none());

    let members: Vec<&str> = document.group_members("web").collect();
    assert_eq!(members, vec!["sshd", "syslog"]);
}

#[test]
fn status_notification_projects_every_service() {
    let document = parse(STATUS.as_bytes()).unwrap();

    let kinds: Vec<ServiceKind> = document
        .services
        .iter()
        .map(|s| s.project().unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            ServiceKind::Filesystem,
            ServiceKind::File,
            ServiceKind::Process,
            ServiceKind::Program,
            ServiceKind::Net,
            ServiceKind::System,
        ]
    );

    let rootfs = document.service("rootfs").unwrap().as_filesystem().unwrap();
    assert_eq!(rootfs.block.percent, 41.5);
    assert_eq!(rootfs.inode.total, 1_280_000.0);
    assert_eq!(rootfs.flags, 4096);

    let syslog = document.service("syslog").unwrap().as_file().unwrap();
    assert_eq!(syslog.size, 524_288);
    assert_eq!(syslog.timestamp.timestamp(), 1_417_171_500);

    let sshd = document.service("sshd").unwrap().as_process().unwrap();
    assert_eq!(sshd.pid, 812);
    assert_eq!(sshd.memory.kilobyte_total, 8120);
    assert_eq!(sshd.envelope.collected_at.timestamp_subsec_micros(), 439_000);

    let backup = document.service("backup-check").unwrap().as_program().unwrap();
    assert_eq!(backup.exit_status, 1);
    assert_eq!(backup.envelope.status, 8192);
    assert_eq!(backup.output, "last backup is 3 days old");

    let eth0 = document.service("eth0").unwrap().as_net().unwrap();
    assert_eq!(eth0.speed, 1_000_000_000);
    assert_eq!(eth0.download.bytes.total, 987_654_321);
    assert_eq!(eth0.upload.errors.now, -1);

    match document.service("web01").unwrap().project().unwrap() {
        ServiceView::System(system) => {
            assert_eq!(system.load.avg05, 0.18);
            assert_eq!(system.cpu.wait, 0.4);
            assert_eq!(system.swap.kilobyte, 2048);
        }
        other => panic!("expected a system view, got {other:?}"),
    }
}

#[test]
fn wrong_kind_on_decoded_record_is_a_mismatch() {
    let document = parse(STATUS.as_bytes()).unwrap();
    let eth0 = document.service("eth0").unwrap();

    let err = eth0.as_system().unwrap_err();
    assert_eq!(
        err,
        ProjectionError::KindMismatch {
            service: "eth0".into(),
            expected: ServiceKind::System,
            actual: ServiceKind::Net,
        }
    );
}

#[test]
fn event_notification_decodes_event() {
    let document = parse(EVENT.as_bytes()).unwrap();

    assert!(document.services.is_empty());
    let event = document.event.expect("event notification carries an event");
    assert_eq!(event.service, "sshd");
    assert_eq!(event.event_type, 3);
    assert_eq!(event.id, 512);
    assert_eq!(event.action, 6);
    assert_eq!(event.message, "process is not running");
    assert_eq!(event.token, "a3f1");

    let at = event.collected_at().unwrap();
    assert_eq!(at.timestamp(), 1_417_171_590);
    assert_eq!(at.timestamp_subsec_micros(), 5000);
}

#[test]
fn truncated_notification_is_an_error_not_a_zero_document() {
    let cut = &STATUS[..STATUS.len() / 2];
    let err = parse(cut.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated(_) | DecodeError::Xml(_)));
}

#[test]
fn bad_number_fails_the_document() {
    let body = STATUS.replace("<pid>812</pid>", "<pid>eight</pid>");
    let err = parse(body.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidValue { ref value, .. } if value == "eight"));
}
