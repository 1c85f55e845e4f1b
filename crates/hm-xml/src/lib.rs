//! Read and write namespace-resolved XML element trees using quick-xml.
//!
//! The tree is deliberately schema-agnostic: element and attribute names are
//! resolved against the in-scope namespace declarations, character data is
//! unescaped, and everything else (comments, processing instructions, the
//! XML declaration) is dropped.

mod tree;
mod writer;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, QName, ResolveResult};
use quick_xml::NsReader;
use thiserror::Error;
use tracing::debug;

pub use tree::{Attribute, Element, Name, NamespaceDecl, XSI_NS};
pub use writer::{write, WriteOptions};

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },
    #[error("unbound namespace prefix '{0}'")]
    UnboundPrefix(String),
    #[error("invalid UTF-8: {0}")]
    Encoding(String),
    #[error("malformed document: {0}")]
    Structure(String),
    #[error("xml write: {0}")]
    Write(String),
}

/// Parse a UTF-8 XML document into its root element.
pub fn parse(bytes: &[u8]) -> Result<Element, XmlError> {
    let mut reader = NsReader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => {
                let element = open_element(&reader, &start)?;
                stack.push(element);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&reader, &start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Structure("unexpected end tag".into()))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|err| XmlError::Syntax {
                    position: reader.buffer_position(),
                    message: err.to_string(),
                })?;
                append_text(&mut stack, &text)?;
            }
            Ok(Event::CData(cdata)) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|err| XmlError::Encoding(err.to_string()))?;
                append_text(&mut stack, text)?;
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(XmlError::Syntax {
                    position: reader.buffer_position(),
                    message: err.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Structure(format!(
            "element <{}> is not closed",
            open.name.qualified()
        )));
    }
    let root = root.ok_or_else(|| XmlError::Structure("document has no root element".into()))?;
    debug!(root = %root.name.qualified(), "parsed xml tree");
    Ok(root)
}

/// Parse an XML document held in a string.
pub fn parse_str(xml: &str) -> Result<Element, XmlError> {
    parse(xml.as_bytes())
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let (resolved, local) = reader.resolve_element(start.name());
    let mut element = Element::new(utf8(local.as_ref())?);
    element.name.prefix = prefix_of(start.name())?;
    element.name.namespace = namespace_of(resolved)?;

    for attr in start.attributes() {
        let attr = attr.map_err(|err| XmlError::Syntax {
            position: reader.buffer_position(),
            message: err.to_string(),
        })?;
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::Syntax {
                position: reader.buffer_position(),
                message: err.to_string(),
            })?
            .into_owned();
        if let Some(binding) = attr.key.as_namespace_binding() {
            let prefix = match binding {
                PrefixDeclaration::Default => None,
                PrefixDeclaration::Named(prefix) => Some(utf8(prefix)?),
            };
            element.namespaces.push(NamespaceDecl { prefix, uri: value });
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        element.attributes.push(Attribute {
            name: Name {
                prefix: prefix_of(attr.key)?,
                local: utf8(local.as_ref())?,
                namespace: namespace_of(resolved)?,
            },
            value,
        });
    }
    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_some() => Err(XmlError::Structure(format!(
            "second root element <{}>",
            element.name.qualified()
        ))),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::Structure(
            "character data outside the root element".into(),
        )),
    }
}

fn prefix_of(name: QName<'_>) -> Result<Option<String>, XmlError> {
    name.prefix()
        .map(|prefix| utf8(prefix.as_ref()))
        .transpose()
}

fn namespace_of(resolved: ResolveResult<'_>) -> Result<Option<String>, XmlError> {
    match resolved {
        ResolveResult::Bound(namespace) => utf8(namespace.as_ref()).map(Some),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XmlError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|err| XmlError::Encoding(err.to_string()))
}
