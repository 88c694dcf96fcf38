//! Decoder capability
//!
//! A [`Decoder`] turns a byte source into one [`XmlElement`] tree. Markup
//! parsing and charset resolution happen here; mapping the tree onto the
//! document model happens in [`crate::mapping`].

use crate::error::{DecodeError, DecodeResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Element of a decoded document: name, attributes, children and text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated character data directly inside this element
    pub text: String,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder helper: add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder helper: add a child element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder helper: set the character data
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child named `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child named `name`, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a chain of child names, first match at each step
    pub fn path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |el, name| el.child(name))
    }
}

/// Source of decoded document trees
pub trait Decoder {
    /// Decode one complete root element
    fn decode_element(&mut self) -> DecodeResult<XmlElement>;
}

/// quick-xml backed [`Decoder`]
///
/// Honors the encoding named in the XML declaration. A declaration naming an
/// encoding without a known decoder is a [`DecodeError::UnsupportedCharset`],
/// and so is UTF-16 in any form: the tokenizer only reads ASCII-compatible
/// input.
pub struct XmlDecoder<R> {
    reader: Reader<R>,
}

impl<R: BufRead> XmlDecoder<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        Self { reader }
    }

    fn open_element(&self, start: &BytesStart<'_>) -> DecodeResult<XmlElement> {
        let decoder = self.reader.decoder();
        let name = decoder.decode(start.local_name().as_ref())?.into_owned();
        let mut element = XmlElement::new(name);

        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = decoder
                .decode(attribute.key.local_name().as_ref())?
                .into_owned();
            let value = attribute
                .decode_and_unescape_value(&self.reader)?
                .into_owned();
            element.attributes.push((key, value));
        }

        Ok(element)
    }
}

impl<R: BufRead> Decoder for XmlDecoder<R> {
    fn decode_element(&mut self) -> DecodeResult<XmlElement> {
        if self.reader.buffer_position() == 0 {
            let head = self.reader.get_mut().fill_buf().map_err(quick_xml::Error::from)?;
            if let Some(label) = utf16_signature(head) {
                return Err(DecodeError::UnsupportedCharset(label.to_string()));
            }
        }

        let mut buf = Vec::new();
        let mut open: Vec<XmlElement> = Vec::new();

        loop {
            let event = self.reader.read_event_into(&mut buf)?;
            let closed = match event {
                Event::Decl(decl) => {
                    if let Some(label) = decl.encoding() {
                        let label = label?;
                        match encoding_rs::Encoding::for_label(&label) {
                            Some(encoding) if !is_utf16(encoding) => {}
                            _ => {
                                return Err(DecodeError::UnsupportedCharset(
                                    String::from_utf8_lossy(&label).into_owned(),
                                ))
                            }
                        }
                    }
                    None
                }
                Event::Start(start) => {
                    open.push(self.open_element(&start)?);
                    None
                }
                Event::Empty(start) => Some(self.open_element(&start)?),
                Event::Text(text) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                    None
                }
                Event::CData(data) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&self.reader.decoder().decode(&data)?);
                    }
                    None
                }
                Event::End(_) => open.pop(),
                Event::Eof => {
                    return Err(match open.pop() {
                        Some(unclosed) => DecodeError::Truncated(unclosed.name),
                        None => DecodeError::Empty,
                    });
                }
                Event::Comment(_) | Event::PI(_) | Event::DocType(_) => None,
            };

            if let Some(element) = closed {
                match open.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            buf.clear();
        }
    }
}

fn is_utf16(encoding: &'static encoding_rs::Encoding) -> bool {
    encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE
}

/// UTF-16 byte order mark, or a `<` encoded as two bytes
fn utf16_signature(head: &[u8]) -> Option<&'static str> {
    match head {
        [0xFF, 0xFE, ..] | [b'<', 0x00, ..] => Some(encoding_rs::UTF_16LE.name()),
        [0xFE, 0xFF, ..] | [0x00, b'<', ..] => Some(encoding_rs::UTF_16BE.name()),
        _ => None,
    }
}
