//! Notification parser

use crate::decode::{Decoder, XmlDecoder};
use crate::document::Document;
use crate::error::DecodeResult;
use std::io::BufRead;

/// Decodes one notification per [`Parser::parse`] call
pub struct Parser<D> {
    decoder: D,
}

impl<R: BufRead> Parser<XmlDecoder<R>> {
    /// Parser reading XML from `source`
    pub fn new(source: R) -> Self {
        Self::with_decoder(XmlDecoder::new(source))
    }
}

impl<D: Decoder> Parser<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decode the next document
    ///
    /// Exactly one decoder call; a decoder failure is returned as is.
    pub fn parse(&mut self) -> DecodeResult<Document> {
        let root = self.decoder.decode_element()?;
        let document = Document::from_element(&root)?;
        tracing::debug!(
            id = %document.id,
            incarnation = %document.incarnation,
            services = document.services.len(),
            event = document.event.is_some(),
            "Decoded notification"
        );
        Ok(document)
    }
}

/// Parse one notification from an in-memory body
pub fn parse(body: &[u8]) -> DecodeResult<Document> {
    Parser::new(body).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::XmlElement;
    use crate::error::DecodeError;
    use crate::kind::ServiceKind;
    use crate::ProjectionError;

    /// Decoder handing out scripted results and counting calls
    struct FakeDecoder {
        responses: Vec<DecodeResult<XmlElement>>,
        calls: usize,
    }

    impl FakeDecoder {
        fn new(responses: Vec<DecodeResult<XmlElement>>) -> Self {
            Self {
                responses,
                calls: 0,
            }
        }
    }

    impl Decoder for FakeDecoder {
        fn decode_element(&mut self) -> DecodeResult<XmlElement> {
            self.calls += 1;
            if self.responses.is_empty() {
                return Err(DecodeError::Empty);
            }
            self.responses.remove(0)
        }
    }

    #[test]
    fn test_parse_calls_decoder_once() {
        let mut parser = Parser::with_decoder(FakeDecoder::new(vec![
            Ok(XmlElement::new("monit").with_attribute("id", "first")),
            Ok(XmlElement::new("monit").with_attribute("id", "second")),
        ]));

        let document = parser.parse().unwrap();
        assert_eq!(document.id, "first");
        assert_eq!(parser.decoder.calls, 1);
    }

    #[test]
    fn test_decoder_failure_is_returned() {
        let mut parser = Parser::with_decoder(FakeDecoder::new(vec![Err(
            DecodeError::UnsupportedCharset("ebcdic".into()),
        )]));

        let err = parser.parse().unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedCharset(label) if label == "ebcdic"));
        assert_eq!(parser.decoder.calls, 1);
    }

    #[test]
    fn test_minimal_document() {
        let document = parse(br#"<monit id="abc" incarnation="1" version="5.6"/>"#).unwrap();

        assert_eq!(document.id, "abc");
        assert_eq!(document.incarnation, "1");
        assert_eq!(document.version, "5.6");
        assert!(document.services.is_empty());
        assert!(document.service_groups.is_empty());
        assert!(document.event.is_none());
        assert_eq!(document.server.uptime, 0);
    }

    #[test]
    fn test_services_keep_document_order() {
        let document = parse(
            br#"<monit><services>
                <service type="5" name="host"/>
                <service type="3" name="sshd"/>
                <service type="0" name="rootfs"/>
                <service type="8" name="eth0"/>
            </services></monit>"#,
        )
        .unwrap();

        let names: Vec<&str> = document.services.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["host", "sshd", "rootfs", "eth0"]);
    }

    #[test]
    fn test_process_example_end_to_end() {
        let document = parse(
            br#"<monit id="abc" incarnation="1" version="5.6"><services><service type="3" name="sshd"><pid>100</pid></service></services></monit>"#,
        )
        .unwrap();

        assert_eq!(document.services.len(), 1);
        let service = &document.services[0];
        assert_eq!(service.name(), "sshd");
        assert_eq!(service.kind(), Some(ServiceKind::Process));

        let process = service.as_process().unwrap();
        assert_eq!(process.envelope.name, "sshd");
        assert_eq!(process.pid, 100);

        assert_eq!(
            service.as_file().unwrap_err(),
            ProjectionError::KindMismatch {
                service: "sshd".into(),
                expected: ServiceKind::File,
                actual: ServiceKind::Process,
            }
        );
    }

    #[test]
    fn test_malformed_body_fails() {
        assert!(parse(b"<monit><services></monit>").is_err());
        assert!(matches!(
            parse(b"not xml at all").unwrap_err(),
            DecodeError::Empty
        ));
    }
}
