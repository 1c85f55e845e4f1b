//! Serialize an [`Element`] tree back to bytes.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::tree::Element;
use crate::XmlError;

/// Output formatting knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root.
    pub declaration: bool,
    /// Indent nested elements by this many spaces; `None` writes everything
    /// on one line.
    pub indent: Option<usize>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            declaration: true,
            indent: Some(2),
        }
    }
}

/// Write `root` as a complete UTF-8 document.
pub fn write(root: &Element, options: &WriteOptions) -> Result<Vec<u8>, XmlError> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };
    if options.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }
    write_element(&mut writer, root)?;
    let mut bytes = writer.into_inner();
    if options.indent.is_some() {
        bytes.push(b'\n');
    }
    Ok(bytes)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let name = element.name.qualified();
    let mut start = BytesStart::new(name.as_str());
    for decl in &element.namespaces {
        let key = match &decl.prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        start.push_attribute((key.as_str(), decl.uri.as_str()));
    }
    for attr in &element.attributes {
        let key = attr.name.qualified();
        let value = attribute_value(&attr.value);
        start.push_attribute((key.as_bytes(), value.as_bytes()));
    }

    if element.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }
    writer.write_event(Event::Start(start)).map_err(write_error)?;
    if !element.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.text)))
            .map_err(write_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(write_error)
}

/// Escaped attribute value; tabs and line breaks are written as character
/// references.
fn attribute_value(value: &str) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len());
    for ch in escaped.chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_error(err: impl std::fmt::Display) -> XmlError {
    XmlError::Write(err.to_string())
}
