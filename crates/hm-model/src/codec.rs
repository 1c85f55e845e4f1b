//! Table-driven conversion between element trees and records.

use hm_xml::Element;
use tracing::{debug, warn};

use crate::node::{Node, SlotMut, SlotRef};
use crate::path::FieldPath;
use crate::schema::{ContentKind, DataType, FieldDecl, XmlKind, HM_NS_URI};
use crate::ModelError;

/// `xsi:` attributes the document root keeps; they are not record data.
const SCHEMA_LOCATION_ATTRS: [&str; 2] = ["schemaLocation", "noNamespaceSchemaLocation"];

/// Fill `node` from `element`. `path` names `element` in error messages.
pub fn decode(node: &mut dyn Node, element: &Element, path: &FieldPath) -> Result<(), ModelError> {
    check_namespace(element, path)?;
    let class = node.class();
    let mut seen: Vec<&'static str> = Vec::new();

    for attr in &element.attributes {
        if attr.name.is_xsi() {
            if !(path.is_root() && SCHEMA_LOCATION_ATTRS.contains(&attr.name.local.as_str())) {
                warn!(%path, attribute = %attr.name.qualified(), "ignoring xsi attribute");
            }
            continue;
        }
        let attr_path = path.with_attribute(&attr.name.local);
        let decl = match (&attr.name.namespace, class.attribute(&attr.name.local)) {
            (None, Some(decl)) => decl,
            _ => return Err(ModelError::UnknownAttribute { path: attr_path }),
        };
        assign(node, decl, &attr.value, &attr_path)?;
        seen.push(decl.name);
    }

    match class.content {
        ContentKind::ElementOnly => {
            if element.has_text() {
                return Err(ModelError::UnexpectedText { path: path.clone() });
            }
        }
        ContentKind::Simple => {
            if let Some(child) = element.children.first() {
                return Err(ModelError::UnknownElement {
                    path: path.child(&child.name.local),
                });
            }
            if let Some(decl) = class.content() {
                if is_textual(decl) || element.has_text() {
                    assign(node, decl, &element.text, path)?;
                }
            }
        }
    }

    for child in &element.children {
        let local = child.name.local.as_str();
        let child_path = path.child(local);
        let decl = class
            .element(local)
            .ok_or_else(|| ModelError::UnknownElement {
                path: child_path.clone(),
            })?;
        if seen.contains(&decl.name) {
            return Err(ModelError::DuplicateElement { path: child_path });
        }
        seen.push(decl.name);

        if decl.datatype.record().is_some() {
            match node.slot_mut(decl.name) {
                Some(SlotMut::Child(slot)) => decode(slot.ensure(), child, &child_path)?,
                _ => return Err(ModelError::UnknownElement { path: child_path }),
            }
        } else {
            check_namespace(child, &child_path)?;
            check_scalar_element(child, &child_path)?;
            assign(node, decl, &child.text, &child_path)?;
        }
    }

    for decl in class.fields {
        if seen.contains(&decl.name) {
            continue;
        }
        if decl.kind == XmlKind::Attribute && decl.is_required() {
            return Err(ModelError::MissingAttribute {
                path: path.with_attribute(decl.name),
            });
        }
        if let (Some(default), false) = (decl.default, decl.is_unsettable()) {
            let field_path = match decl.kind {
                XmlKind::Attribute => path.with_attribute(decl.name),
                _ => path.child(decl.name),
            };
            assign(node, decl, default, &field_path)?;
        }
    }

    debug!(%path, class = class.name, "decoded record");
    Ok(())
}

/// Build the element named `name` for `node`. Unset fields are omitted;
/// fields are written in class-table order.
pub fn encode(node: &dyn Node, name: &str) -> Element {
    let mut element = Element::new(name);
    for decl in node.class().fields {
        match (decl.kind, node.slot(decl.name)) {
            (XmlKind::Attribute, Some(SlotRef::Scalar(slot))) => {
                if let Some(value) = slot.lexical() {
                    element.push_attribute(decl.name, value);
                }
            }
            (XmlKind::Content, Some(SlotRef::Scalar(slot))) => {
                if let Some(value) = slot.lexical() {
                    element.text = value;
                }
            }
            (XmlKind::Element, Some(SlotRef::Scalar(slot))) => {
                if let Some(value) = slot.lexical() {
                    element.push_child(Element::with_text(decl.name, value));
                }
            }
            (XmlKind::Element, Some(SlotRef::Child(slot))) => {
                if let Some(child) = slot.get() {
                    element.push_child(encode(child, decl.name));
                }
            }
            _ => {}
        }
    }
    element
}

/// String content is kept verbatim, blank included. Blank numeric content
/// leaves the field unset.
fn is_textual(decl: &FieldDecl) -> bool {
    matches!(decl.datatype, DataType::String | DataType::NormalizedString)
}

fn assign(
    node: &mut dyn Node,
    decl: &FieldDecl,
    lexical: &str,
    path: &FieldPath,
) -> Result<(), ModelError> {
    match node.slot_mut(decl.name) {
        Some(SlotMut::Scalar(slot)) => slot.assign(lexical).map_err(|source| ModelError::Value {
            path: path.clone(),
            source,
        }),
        _ => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

fn check_namespace(element: &Element, path: &FieldPath) -> Result<(), ModelError> {
    match element.name.namespace.as_deref() {
        None | Some(HM_NS_URI) => Ok(()),
        Some(other) => Err(ModelError::Namespace {
            path: path.clone(),
            namespace: other.to_string(),
        }),
    }
}

/// A scalar element carries only character data.
fn check_scalar_element(element: &Element, path: &FieldPath) -> Result<(), ModelError> {
    if let Some(child) = element.children.first() {
        return Err(ModelError::UnknownElement {
            path: path.child(&child.name.local),
        });
    }
    match element.attributes.iter().find(|attr| !attr.name.is_xsi()) {
        Some(attr) => Err(ModelError::UnknownAttribute {
            path: path.with_attribute(&attr.name.local),
        }),
        None => Ok(()),
    }
}
