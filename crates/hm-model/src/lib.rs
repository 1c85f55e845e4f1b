//! Typed model of the `hm.xsd` reconstruction parameter file.
//!
//! Records mirror the schema one to one and are plain structs with public
//! fields. Each record also publishes a static class table; the XML codec
//! and the path accessors ([`HmDocument::get`], [`HmDocument::set`], ...)
//! are driven by those tables instead of per-type code.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod document;
pub mod node;
pub mod path;
pub mod records;
pub mod schema;
pub mod value;

use hm_xml::XmlError;
use thiserror::Error;

pub use document::{parse, serialize, HmDocument, SchemaLocation};
pub use hm_xml::WriteOptions;
pub use node::{Node, Record};
pub use path::FieldPath;
pub use records::*;
pub use schema::{ClassDecl, DataType, FieldDecl, FieldFlags, XmlKind, HM_NS_URI};
pub use value::{Decimal, NormalizedString, ValueError, XsdValue};

/// Error type produced while reading, writing or addressing a document.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The bytes are not well-formed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// The document element is not `HMxml`.
    #[error("expected root element HMxml, found {0}")]
    UnexpectedRoot(String),
    /// An element is qualified with a namespace other than the hm schema's.
    #[error("{path}: namespace '{namespace}' does not belong to the hm schema")]
    Namespace { path: FieldPath, namespace: String },
    #[error("{path}: element not allowed here")]
    UnknownElement { path: FieldPath },
    #[error("{path}: attribute not allowed here")]
    UnknownAttribute { path: FieldPath },
    #[error("{path}: element appears more than once")]
    DuplicateElement { path: FieldPath },
    /// Character data inside an element that only holds child elements.
    #[error("{path}: unexpected character data")]
    UnexpectedText { path: FieldPath },
    #[error("{path}: required attribute is missing")]
    MissingAttribute { path: FieldPath },
    /// A lexical value does not convert to the declared datatype.
    #[error("{path}: {source}")]
    Value {
        path: FieldPath,
        #[source]
        source: ValueError,
    },
    #[error("invalid field path '{0}'")]
    InvalidPath(String),
    /// The path names no field of the schema.
    #[error("{path}: no such field")]
    UnknownField { path: FieldPath },
    #[error("{path}: not a record")]
    NotARecord { path: FieldPath },
    /// The path ends at a record that holds child elements, not a value.
    #[error("{path}: addresses a record, not a value")]
    NotAValue { path: FieldPath },
    #[error("{path}: required field cannot be unset")]
    Required { path: FieldPath },
}
