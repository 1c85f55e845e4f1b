//! Static description of the hm parameter schema.
//!
//! Every record type publishes a [`ClassDecl`] listing its fields in schema
//! sequence order. The codec and the path accessors are driven entirely by
//! these tables.

use bitflags::bitflags;

/// Target namespace of `hm.xsd`. The schema is unqualified, so documents may
/// also leave their elements in no namespace.
pub const HM_NS_URI: &str =
    "platform:/resource/uk.ac.diamond.tomography.reconstruction.parameters/model/hm.xsd";

/// Field name used for the simple content of a value record.
pub const CONTENT: &str = ":0";

/// How a field is carried in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlKind {
    Element,
    Attribute,
    /// Character data of a simple-content record.
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    ElementOnly,
    Simple,
}

/// Declared datatype of a field.
#[derive(Debug, Clone, Copy)]
pub enum DataType {
    String,
    NormalizedString,
    Int,
    Decimal,
    Double,
    /// Nested record described by its own class table.
    Record(&'static ClassDecl),
}

impl DataType {
    /// Name of the datatype as written in the schema.
    pub fn xsd_name(&self) -> &'static str {
        match self {
            DataType::String => "xsd:string",
            DataType::NormalizedString => "xsd:normalizedString",
            DataType::Int => "xsd:int",
            DataType::Decimal => "xsd:decimal",
            DataType::Double => "xsd:double",
            DataType::Record(class) => class.name,
        }
    }

    pub fn record(&self) -> Option<&'static ClassDecl> {
        match *self {
            DataType::Record(class) => Some(class),
            _ => None,
        }
    }
}

bitflags! {
    /// Per-field cardinality flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u8 {
        /// Lower bound 1; the field must be present in every document.
        const REQUIRED = 0b01;
        /// Presence is tracked separately from the value.
        const UNSETTABLE = 0b10;
    }
}

/// One row of a class table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    /// Element or attribute name in markup.
    pub name: &'static str,
    pub kind: XmlKind,
    pub datatype: DataType,
    pub flags: FieldFlags,
    /// Lexical default applied when the field is absent.
    pub default: Option<&'static str>,
}

impl FieldDecl {
    /// Optional nested record carried as a child element.
    pub const fn child(name: &'static str, class: &'static ClassDecl) -> Self {
        FieldDecl {
            name,
            kind: XmlKind::Element,
            datatype: DataType::Record(class),
            flags: FieldFlags::empty(),
            default: None,
        }
    }

    pub const fn scalar(
        name: &'static str,
        kind: XmlKind,
        datatype: DataType,
        required: bool,
        unsettable: bool,
    ) -> Self {
        let mut flags = FieldFlags::empty();
        if required {
            flags = flags.union(FieldFlags::REQUIRED);
        }
        if unsettable {
            flags = flags.union(FieldFlags::UNSETTABLE);
        }
        FieldDecl {
            name,
            kind,
            datatype,
            flags,
            default: None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    pub fn is_unsettable(&self) -> bool {
        self.flags.contains(FieldFlags::UNSETTABLE)
    }
}

/// Schema class: a complex type and its ordered fields.
#[derive(Debug)]
pub struct ClassDecl {
    /// Type name as declared in the schema.
    pub name: &'static str,
    pub content: ContentKind,
    pub fields: &'static [FieldDecl],
}

impl ClassDecl {
    pub fn field(&self, name: &str) -> Option<&'static FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field carried as a child element named `name`.
    pub fn element(&self, name: &str) -> Option<&'static FieldDecl> {
        self.fields
            .iter()
            .find(|field| field.kind == XmlKind::Element && field.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&'static FieldDecl> {
        self.fields
            .iter()
            .find(|field| field.kind == XmlKind::Attribute && field.name == name)
    }

    /// Simple-content field, if the class has simple content.
    pub fn content(&self) -> Option<&'static FieldDecl> {
        self.fields
            .iter()
            .find(|field| field.kind == XmlKind::Content)
    }
}

/// Every class reachable from `HMxml`, parents before children. Classes
/// shared by several fields are listed once.
pub fn classes() -> Vec<&'static ClassDecl> {
    let mut out: Vec<&'static ClassDecl> = Vec::new();
    collect(<crate::records::HmXml as crate::node::Record>::CLASS, &mut out);
    out
}

/// Look up a class by its schema type name.
pub fn class(name: &str) -> Option<&'static ClassDecl> {
    classes().into_iter().find(|class| class.name == name)
}

fn collect(class: &'static ClassDecl, out: &mut Vec<&'static ClassDecl>) {
    if out.iter().any(|seen| seen.name == class.name) {
        return;
    }
    out.push(class);
    for field in class.fields {
        if let Some(nested) = field.datatype.record() {
            collect(nested, out);
        }
    }
}
