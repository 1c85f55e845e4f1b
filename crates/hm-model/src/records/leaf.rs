//! Value records shared by most parameters.
//!
//! The schema declares dozens of structurally identical simple-content types
//! (`TypeType` through `TypeType17`, `ShapeType`/`ShapeType1`, ...). They
//! collapse into three generic shapes that differ only in which status
//! attributes they carry.

use crate::node::{Node, Record, SlotMut, SlotRef};
use crate::schema::{ClassDecl, ContentKind, DataType, FieldDecl, XmlKind, CONTENT};
use crate::value::{NormalizedString, XsdValue};

/// Value with a human readable `info` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Described<T> {
    pub value: Option<T>,
    pub info: String,
}

/// Value with a `done` workflow marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Flagged<T> {
    pub value: Option<T>,
    pub done: NormalizedString,
}

/// Value carrying both a `done` marker and an `info` description.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracked<T> {
    pub value: Option<T>,
    pub done: NormalizedString,
    pub info: String,
}

impl<T> Default for Described<T> {
    fn default() -> Self {
        Described {
            value: None,
            info: String::new(),
        }
    }
}

impl<T> Default for Flagged<T> {
    fn default() -> Self {
        Flagged {
            value: None,
            done: NormalizedString::default(),
        }
    }
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Tracked {
            value: None,
            done: NormalizedString::default(),
            info: String::new(),
        }
    }
}

impl<T> Described<T> {
    pub fn new(value: T, info: impl Into<String>) -> Self {
        Described {
            value: Some(value),
            info: info.into(),
        }
    }
}

impl<T> Flagged<T> {
    pub fn new(value: T, done: impl Into<NormalizedString>) -> Self {
        Flagged {
            value: Some(value),
            done: done.into(),
        }
    }
}

impl<T> Tracked<T> {
    pub fn new(value: T, done: impl Into<NormalizedString>, info: impl Into<String>) -> Self {
        Tracked {
            value: Some(value),
            done: done.into(),
            info: info.into(),
        }
    }
}

const fn content_field(datatype: DataType) -> FieldDecl {
    FieldDecl::scalar(CONTENT, XmlKind::Content, datatype, false, false)
}

const DONE: FieldDecl = FieldDecl::scalar(
    "done",
    XmlKind::Attribute,
    DataType::NormalizedString,
    true,
    false,
);

const INFO: FieldDecl = FieldDecl::scalar("info", XmlKind::Attribute, DataType::String, true, false);

const fn described_name(datatype: DataType) -> &'static str {
    match datatype {
        DataType::String => "Described<xsd:string>",
        DataType::NormalizedString => "Described<xsd:normalizedString>",
        DataType::Int => "Described<xsd:int>",
        DataType::Decimal => "Described<xsd:decimal>",
        _ => "Described",
    }
}

const fn flagged_name(datatype: DataType) -> &'static str {
    match datatype {
        DataType::String => "Flagged<xsd:string>",
        DataType::Int => "Flagged<xsd:int>",
        _ => "Flagged",
    }
}

const fn tracked_name(datatype: DataType) -> &'static str {
    match datatype {
        DataType::NormalizedString => "Tracked<xsd:normalizedString>",
        _ => "Tracked",
    }
}

impl<T: XsdValue> Record for Described<T> {
    const CLASS: &'static ClassDecl = &ClassDecl {
        name: described_name(T::DATATYPE),
        content: ContentKind::Simple,
        fields: &[content_field(T::DATATYPE), INFO],
    };
}

impl<T: XsdValue> Node for Described<T> {
    fn class(&self) -> &'static ClassDecl {
        <Self as Record>::CLASS
    }

    fn slot(&self, name: &str) -> Option<SlotRef<'_>> {
        match name {
            CONTENT => Some(SlotRef::Scalar(&self.value)),
            "info" => Some(SlotRef::Scalar(&self.info)),
            _ => None,
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
        match name {
            CONTENT => Some(SlotMut::Scalar(&mut self.value)),
            "info" => Some(SlotMut::Scalar(&mut self.info)),
            _ => None,
        }
    }
}

impl<T: XsdValue> Record for Flagged<T> {
    const CLASS: &'static ClassDecl = &ClassDecl {
        name: flagged_name(T::DATATYPE),
        content: ContentKind::Simple,
        fields: &[content_field(T::DATATYPE), DONE],
    };
}

impl<T: XsdValue> Node for Flagged<T> {
    fn class(&self) -> &'static ClassDecl {
        <Self as Record>::CLASS
    }

    fn slot(&self, name: &str) -> Option<SlotRef<'_>> {
        match name {
            CONTENT => Some(SlotRef::Scalar(&self.value)),
            "done" => Some(SlotRef::Scalar(&self.done)),
            _ => None,
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
        match name {
            CONTENT => Some(SlotMut::Scalar(&mut self.value)),
            "done" => Some(SlotMut::Scalar(&mut self.done)),
            _ => None,
        }
    }
}

impl<T: XsdValue> Record for Tracked<T> {
    const CLASS: &'static ClassDecl = &ClassDecl {
        name: tracked_name(T::DATATYPE),
        content: ContentKind::Simple,
        fields: &[content_field(T::DATATYPE), DONE, INFO],
    };
}

impl<T: XsdValue> Node for Tracked<T> {
    fn class(&self) -> &'static ClassDecl {
        <Self as Record>::CLASS
    }

    fn slot(&self, name: &str) -> Option<SlotRef<'_>> {
        match name {
            CONTENT => Some(SlotRef::Scalar(&self.value)),
            "done" => Some(SlotRef::Scalar(&self.done)),
            "info" => Some(SlotRef::Scalar(&self.info)),
            _ => None,
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
        match name {
            CONTENT => Some(SlotMut::Scalar(&mut self.value)),
            "done" => Some(SlotMut::Scalar(&mut self.done)),
            "info" => Some(SlotMut::Scalar(&mut self.info)),
            _ => None,
        }
    }
}
