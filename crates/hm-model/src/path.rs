//! Field addressing by path string, e.g. `FBP/Backprojection/Tilt@done`.
//!
//! Segments are element names below `HMxml`; a trailing `@name` selects an
//! attribute of the last record. A path that ends at a simple-content record
//! addresses its character data.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::node::{Node, SlotMut, SlotRef};
use crate::schema::{ContentKind, XmlKind, CONTENT};
use crate::ModelError;

const ROOT: &str = "HMxml";

/// Location of a field relative to the document element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
    attribute: Option<String>,
}

impl FieldPath {
    /// The document element itself.
    pub fn root() -> Self {
        FieldPath::default()
    }

    pub fn child(&self, name: &str) -> Self {
        let mut path = self.clone();
        path.segments.push(name.to_string());
        path
    }

    pub fn with_attribute(&self, name: &str) -> Self {
        let mut path = self.clone();
        path.attribute = Some(name.to_string());
        path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty() && self.attribute.is_none()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, "@{attribute}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = ModelError;

    /// Accepts `FBP/LogFile`, `/FBP/LogFile` and `HMxml/FBP/LogFile`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidPath(text.to_string());
        let trimmed = text.trim().trim_start_matches('/');
        let (elements, attribute) = match trimmed.split_once('@') {
            Some((elements, attribute)) => (elements, Some(attribute)),
            None => (trimmed, None),
        };
        let mut segments: Vec<String> = Vec::new();
        for segment in elements.split('/') {
            if segment.is_empty() {
                return Err(invalid());
            }
            segments.push(segment.to_string());
        }
        if segments.first().map(String::as_str) == Some(ROOT) {
            segments.remove(0);
        }
        if segments.is_empty() {
            return Err(invalid());
        }
        if let Some(attribute) = attribute {
            if attribute.is_empty() || attribute.contains(['/', '@']) {
                return Err(invalid());
            }
        }
        Ok(FieldPath {
            segments,
            attribute: attribute.map(str::to_string),
        })
    }
}

/// Lexical value at `path`; `None` when the field or any record above it
/// is absent.
pub fn get(root: &dyn Node, path: &FieldPath) -> Result<Option<String>, ModelError> {
    let (last, parents) = split(path)?;
    let Some(node) = descend(root, parents, path)? else {
        return Ok(None);
    };
    if let Some(attribute) = path.attribute() {
        let Some(record) = child(node, last, path)? else {
            return Ok(None);
        };
        return match attribute_slot(record, attribute, path)? {
            SlotRef::Scalar(slot) => Ok(slot.lexical()),
            SlotRef::Child(_) => Err(ModelError::UnknownField { path: path.clone() }),
        };
    }
    match node.slot(last) {
        Some(SlotRef::Scalar(slot)) => {
            ensure_element(node, last, path)?;
            Ok(slot.lexical())
        }
        Some(SlotRef::Child(slot)) => {
            if slot.class().content != ContentKind::Simple {
                return Err(ModelError::NotAValue { path: path.clone() });
            }
            match slot.get() {
                Some(record) => match record.slot(CONTENT) {
                    Some(SlotRef::Scalar(content)) => Ok(content.lexical()),
                    _ => Err(ModelError::NotAValue { path: path.clone() }),
                },
                None => Ok(None),
            }
        }
        None => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

pub fn is_set(root: &dyn Node, path: &FieldPath) -> Result<bool, ModelError> {
    Ok(get(root, path)?.is_some())
}

/// Store `value` at `path`, creating any missing records on the way.
pub fn set(root: &mut dyn Node, path: &FieldPath, value: &str) -> Result<(), ModelError> {
    let (last, parents) = split(path)?;
    let node = descend_mut(root, parents, path, true)?.ok_or_else(|| ModelError::UnknownField {
        path: path.clone(),
    })?;
    let slot = leaf_mut(node, last, path, true)?.ok_or_else(|| ModelError::UnknownField {
        path: path.clone(),
    })?;
    slot.assign(value).map_err(|source| ModelError::Value {
        path: path.clone(),
        source,
    })?;
    debug!(%path, value, "field set");
    Ok(())
}

/// Clear the value at `path`. Missing records are left alone; required
/// attributes cannot be unset.
pub fn unset(root: &mut dyn Node, path: &FieldPath) -> Result<(), ModelError> {
    let (last, parents) = split(path)?;
    let Some(node) = descend_mut(root, parents, path, false)? else {
        return Ok(());
    };
    let Some(slot) = leaf_mut(node, last, path, false)? else {
        return Ok(());
    };
    slot.clear();
    debug!(%path, "field unset");
    Ok(())
}

/// Drop the record at `path`. Returns whether it was present.
pub fn remove(root: &mut dyn Node, path: &FieldPath) -> Result<bool, ModelError> {
    if path.attribute().is_some() {
        return Err(ModelError::NotARecord { path: path.clone() });
    }
    let (last, parents) = split(path)?;
    let Some(node) = descend_mut(root, parents, path, false)? else {
        return Ok(false);
    };
    match node.slot_mut(last) {
        Some(SlotMut::Child(slot)) => {
            let present = slot.get_mut().is_some();
            slot.clear();
            debug!(%path, present, "record removed");
            Ok(present)
        }
        Some(SlotMut::Scalar(_)) => Err(ModelError::NotARecord { path: path.clone() }),
        None => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

fn split(path: &FieldPath) -> Result<(&str, &[String]), ModelError> {
    path.segments()
        .split_last()
        .map(|(last, parents)| (last.as_str(), parents))
        .ok_or_else(|| ModelError::InvalidPath(path.to_string()))
}

fn child<'a>(
    node: &'a dyn Node,
    name: &str,
    path: &FieldPath,
) -> Result<Option<&'a dyn Node>, ModelError> {
    match node.slot(name) {
        Some(SlotRef::Child(slot)) => Ok(slot.get()),
        Some(SlotRef::Scalar(_)) => Err(ModelError::NotARecord { path: path.clone() }),
        None => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

fn descend<'a>(
    root: &'a dyn Node,
    segments: &[String],
    path: &FieldPath,
) -> Result<Option<&'a dyn Node>, ModelError> {
    let mut node = root;
    for segment in segments {
        match child(node, segment, path)? {
            Some(next) => node = next,
            None => return Ok(None),
        }
    }
    Ok(Some(node))
}

fn descend_mut<'a>(
    root: &'a mut dyn Node,
    segments: &[String],
    path: &FieldPath,
    create: bool,
) -> Result<Option<&'a mut dyn Node>, ModelError> {
    let mut node = root;
    for segment in segments {
        let slot = match node.slot_mut(segment) {
            Some(SlotMut::Child(slot)) => slot,
            Some(SlotMut::Scalar(_)) => return Err(ModelError::NotARecord { path: path.clone() }),
            None => return Err(ModelError::UnknownField { path: path.clone() }),
        };
        node = if create {
            slot.ensure()
        } else {
            match slot.get_mut() {
                Some(next) => next,
                None => return Ok(None),
            }
        };
    }
    Ok(Some(node))
}

/// Scalar addressed by the last segment (plus attribute) of `path`.
///
/// With `create` the record holding the scalar is created if missing;
/// without it a missing record yields `None`, and required fields are
/// rejected since the only caller without `create` is `unset`.
fn leaf_mut<'a>(
    node: &'a mut dyn Node,
    last: &str,
    path: &FieldPath,
    create: bool,
) -> Result<Option<&'a mut dyn crate::node::ScalarSlot>, ModelError> {
    let class = node.class();
    let (record, field): (&'a mut dyn Node, &str) = match path.attribute() {
        Some(attribute) => {
            let slot = match node.slot_mut(last) {
                Some(SlotMut::Child(slot)) => slot,
                Some(SlotMut::Scalar(_)) => {
                    return Err(ModelError::NotARecord { path: path.clone() })
                }
                None => return Err(ModelError::UnknownField { path: path.clone() }),
            };
            let record = if create {
                slot.ensure()
            } else {
                match slot.get_mut() {
                    Some(record) => record,
                    None => return Ok(None),
                }
            };
            attribute_slot(&*record, attribute, path)?;
            (record, attribute)
        }
        None => {
            let simple_record = match class.element(last) {
                Some(decl) => decl
                    .datatype
                    .record()
                    .map(|nested| nested.content == ContentKind::Simple),
                None => return Err(ModelError::UnknownField { path: path.clone() }),
            };
            match simple_record {
                None => (node, last),
                Some(false) => return Err(ModelError::NotAValue { path: path.clone() }),
                Some(true) => {
                    let record = match node.slot_mut(last) {
                        Some(SlotMut::Child(slot)) if create => slot.ensure(),
                        Some(SlotMut::Child(slot)) => match slot.get_mut() {
                            Some(record) => record,
                            None => return Ok(None),
                        },
                        _ => return Err(ModelError::UnknownField { path: path.clone() }),
                    };
                    (record, CONTENT)
                }
            }
        }
    };
    if !create {
        if let Some(decl) = record.class().field(field) {
            if decl.is_required() {
                return Err(ModelError::Required { path: path.clone() });
            }
        }
    }
    match record.slot_mut(field) {
        Some(SlotMut::Scalar(slot)) => Ok(Some(slot)),
        _ => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

fn attribute_slot<'a>(
    record: &'a dyn Node,
    attribute: &str,
    path: &FieldPath,
) -> Result<SlotRef<'a>, ModelError> {
    match record.class().attribute(attribute) {
        Some(_) => record
            .slot(attribute)
            .ok_or_else(|| ModelError::UnknownField { path: path.clone() }),
        None => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

fn ensure_element(node: &dyn Node, name: &str, path: &FieldPath) -> Result<(), ModelError> {
    match node.class().field(name) {
        Some(decl) if decl.kind == XmlKind::Element => Ok(()),
        _ => Err(ModelError::UnknownField { path: path.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Backprojection, Fbp, HmXml, InputData, Tilt};
    use crate::value::Decimal;

    fn path(text: &str) -> FieldPath {
        text.parse().expect("valid path")
    }

    #[test]
    fn parse_and_display() {
        let tilt = path("FBP/Backprojection/Tilt@done");
        assert_eq!(tilt.segments(), ["FBP", "Backprojection", "Tilt"]);
        assert_eq!(tilt.attribute(), Some("done"));
        assert_eq!(tilt.to_string(), "HMxml/FBP/Backprojection/Tilt@done");
        assert_eq!(path("/HMxml/FBP/LogFile"), path("FBP/LogFile"));
        assert!(FieldPath::root().is_root());
        assert_eq!(FieldPath::root().child("FBP").to_string(), "HMxml/FBP");
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "/", "HMxml", "FBP//LogFile", "FBP@", "FBP@a@b", "FBP@a/b"] {
            assert!(
                matches!(bad.parse::<FieldPath>(), Err(ModelError::InvalidPath(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn get_walks_typed_records() {
        let mut root = HmXml::default();
        let fbp = root.fbp.get_or_insert_with(Fbp::default);
        fbp.gpu_device_number = Some(0);
        fbp.backprojection = Some(Backprojection {
            image_centre: Some("1024.5".parse().unwrap()),
            tilt: Some(Tilt {
                done: "yes".into(),
                ..Tilt::default()
            }),
            ..Backprojection::default()
        });
        assert_eq!(get(&root, &path("FBP/GPUDeviceNumber")).unwrap().as_deref(), Some("0"));
        assert_eq!(
            get(&root, &path("FBP/Backprojection/ImageCentre")).unwrap().as_deref(),
            Some("1024.5")
        );
        assert_eq!(
            get(&root, &path("FBP/Backprojection/Tilt@done")).unwrap().as_deref(),
            Some("yes")
        );
        assert_eq!(get(&root, &path("FBP/Backprojection/Tilt/X-tilt")).unwrap(), None);
        assert_eq!(get(&root, &path("FBP/InputData/Folder")).unwrap(), None);
        assert!(!is_set(&root, &path("FBP/LogFile")).unwrap());
    }

    #[test]
    fn get_reports_bad_addresses() {
        let mut root = HmXml::default();
        root.fbp = Some(Fbp::default());
        assert!(matches!(
            get(&root, &path("FBP/Nope")),
            Err(ModelError::UnknownField { .. })
        ));
        assert!(matches!(
            get(&root, &path("FBP/GPUDeviceNumber/Deeper")),
            Err(ModelError::NotARecord { .. })
        ));
        assert!(matches!(
            get(&root, &path("FBP/InputData")),
            Err(ModelError::NotAValue { .. })
        ));
        root.fbp.as_mut().unwrap().backprojection = Some(Backprojection::default());
        assert!(matches!(
            get(&root, &path("FBP/Backprojection@done")),
            Err(ModelError::UnknownField { .. })
        ));
    }

    #[test]
    fn set_creates_intermediate_records() {
        let mut root = HmXml::default();
        set(&mut root, &path("FBP/Backprojection/Tilt/X-tilt"), "0.25").unwrap();
        set(&mut root, &path("FBP/Backprojection/Tilt@done"), "no").unwrap();
        set(&mut root, &path("FBP/InputData/NOD"), "4").unwrap();
        set(&mut root, &path("FBP/InputData/NOD@info"), "detectors").unwrap();
        let fbp = root.fbp.as_ref().unwrap();
        let tilt = fbp.backprojection.as_ref().unwrap().tilt.as_ref().unwrap();
        assert_eq!(tilt.x_tilt.as_deref(), Some("0.25"));
        assert_eq!(tilt.done.as_str(), "no");
        let nod = fbp.input_data.as_ref().unwrap().nod.as_ref().unwrap();
        assert_eq!(nod.value, Some(4));
        assert_eq!(nod.info, "detectors");
    }

    #[test]
    fn set_reports_conversion_errors_with_path() {
        let mut root = HmXml::default();
        let err = set(&mut root, &path("FBP/GPUDeviceNumber"), "two").unwrap_err();
        match err {
            ModelError::Value { path, .. } => assert_eq!(path.to_string(), "HMxml/FBP/GPUDeviceNumber"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            set(&mut root, &path("FBP/InputData"), "x"),
            Err(ModelError::NotAValue { .. })
        ));
    }

    #[test]
    fn unset_keeps_zero_and_absence_apart() {
        let mut root = HmXml::default();
        let gpu = path("FBP/GPUDeviceNumber");
        assert!(!is_set(&root, &gpu).unwrap());
        set(&mut root, &gpu, "0").unwrap();
        assert!(is_set(&root, &gpu).unwrap());
        assert_eq!(root.fbp.as_ref().unwrap().gpu_device_number, Some(0));
        unset(&mut root, &gpu).unwrap();
        assert!(!is_set(&root, &gpu).unwrap());
        assert_eq!(root.fbp.as_ref().unwrap().gpu_device_number, None);
        unset(&mut root, &gpu).unwrap();
    }

    #[test]
    fn unset_content_and_required_attributes() {
        let mut root = HmXml::default();
        set(&mut root, &path("FBP/InputData/MemorySizeMax"), "1.5").unwrap();
        unset(&mut root, &path("FBP/InputData/MemorySizeMax")).unwrap();
        let input = root.fbp.as_ref().unwrap().input_data.as_ref().unwrap();
        assert_eq!(input.memory_size_max.as_ref().unwrap().value, None::<Decimal>);
        assert!(matches!(
            unset(&mut root, &path("FBP/InputData/MemorySizeMax@info")),
            Err(ModelError::Required { .. })
        ));
        unset(&mut root, &path("FBP/OutputData/Folder")).unwrap();
        assert!(root.fbp.as_ref().unwrap().output_data.is_none());
    }

    #[test]
    fn remove_drops_whole_records() {
        let mut root = HmXml::default();
        set(&mut root, &path("FBP/InputData/FileFirst"), "10").unwrap();
        assert!(remove(&mut root, &path("FBP/InputData")).unwrap());
        assert_eq!(root.fbp.as_ref().unwrap().input_data, None::<InputData>);
        assert!(!remove(&mut root, &path("FBP/InputData")).unwrap());
        assert!(matches!(
            remove(&mut root, &path("FBP/LogFile")),
            Err(ModelError::NotARecord { .. })
        ));
    }
}
