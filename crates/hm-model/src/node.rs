//! Dynamic view over typed records.
//!
//! Records are plain structs with public fields. [`Node`] exposes the same
//! fields by their markup name so the codec and the path accessors can walk
//! any record using only its [`ClassDecl`].

use std::fmt;

use crate::schema::{ClassDecl, DataType};
use crate::value::{NormalizedString, ValueError, XsdValue};

/// Field-by-name access to a record.
pub trait Node: fmt::Debug {
    fn class(&self) -> &'static ClassDecl;

    /// Field named `name` in markup (`":0"` for simple content).
    fn slot(&self, name: &str) -> Option<SlotRef<'_>>;

    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>>;
}

/// A concrete record type with a static class table.
pub trait Record: Node + Default + Clone + PartialEq + 'static {
    const CLASS: &'static ClassDecl;
}

pub enum SlotRef<'a> {
    Scalar(&'a dyn ScalarSlot),
    Child(&'a dyn ChildSlot),
}

pub enum SlotMut<'a> {
    Scalar(&'a mut dyn ScalarSlot),
    Child(&'a mut dyn ChildSlot),
}

/// Storage of one scalar field, addressed through its lexical form.
pub trait ScalarSlot {
    /// Lexical value, `None` when the field is unset.
    fn lexical(&self) -> Option<String>;

    fn is_set(&self) -> bool {
        self.lexical().is_some()
    }

    fn assign(&mut self, lexical: &str) -> Result<(), ValueError>;

    /// Return the field to its initial state.
    fn clear(&mut self);
}

impl<T: XsdValue> ScalarSlot for Option<T> {
    fn lexical(&self) -> Option<String> {
        self.as_ref().map(XsdValue::to_lexical)
    }

    fn is_set(&self) -> bool {
        self.is_some()
    }

    fn assign(&mut self, lexical: &str) -> Result<(), ValueError> {
        *self = Some(T::parse_lexical(lexical)?);
        Ok(())
    }

    fn clear(&mut self) {
        *self = None;
    }
}

impl ScalarSlot for String {
    fn lexical(&self) -> Option<String> {
        Some(self.clone())
    }

    fn assign(&mut self, lexical: &str) -> Result<(), ValueError> {
        *self = lexical.to_string();
        Ok(())
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

impl ScalarSlot for NormalizedString {
    fn lexical(&self) -> Option<String> {
        Some(self.to_lexical())
    }

    fn assign(&mut self, lexical: &str) -> Result<(), ValueError> {
        *self = NormalizedString::new(lexical);
        Ok(())
    }

    fn clear(&mut self) {
        *self = NormalizedString::default();
    }
}

/// Storage of one optional nested record.
pub trait ChildSlot {
    fn class(&self) -> &'static ClassDecl;

    fn get(&self) -> Option<&dyn Node>;

    fn get_mut(&mut self) -> Option<&mut dyn Node>;

    /// The nested record, created empty if absent.
    fn ensure(&mut self) -> &mut dyn Node;

    fn clear(&mut self);
}

impl<R: Record> ChildSlot for Option<R> {
    fn class(&self) -> &'static ClassDecl {
        R::CLASS
    }

    fn get(&self) -> Option<&dyn Node> {
        self.as_ref().map(|record| record as &dyn Node)
    }

    fn get_mut(&mut self) -> Option<&mut dyn Node> {
        self.as_mut().map(|record| record as &mut dyn Node)
    }

    fn ensure(&mut self) -> &mut dyn Node {
        self.get_or_insert_with(R::default)
    }

    fn clear(&mut self) {
        *self = None;
    }
}

/// Compile-time metadata of a scalar field type. Plain `String` and
/// `NormalizedString` are used for required attributes; everything optional
/// is an `Option`.
pub trait ScalarType {
    const DATATYPE: DataType;
    const REQUIRED: bool;
}

impl<T: XsdValue> ScalarType for Option<T> {
    const DATATYPE: DataType = T::DATATYPE;
    const REQUIRED: bool = false;
}

impl ScalarType for String {
    const DATATYPE: DataType = DataType::String;
    const REQUIRED: bool = true;
}

impl ScalarType for NormalizedString {
    const DATATYPE: DataType = DataType::NormalizedString;
    const REQUIRED: bool = true;
}

/// Compile-time metadata of a nested record field.
pub trait ChildType {
    const CLASS: &'static ClassDecl;
}

impl<R: Record> ChildType for Option<R> {
    const CLASS: &'static ClassDecl = R::CLASS;
}

/// Declare a record struct together with its class table and its [`Node`]
/// implementation.
///
/// Each field is `kind name: Type = "XmlName"` where `kind` is one of
/// `child` (nested record), `element`, `unsettable` (element whose presence
/// is tracked), `attribute` or `content`.
macro_rules! hm_record {
    (@content element_only) => { $crate::schema::ContentKind::ElementOnly };
    (@content simple) => { $crate::schema::ContentKind::Simple };

    (@decl child $ty:ty, $xml:literal) => {
        $crate::schema::FieldDecl::child($xml, <$ty as $crate::node::ChildType>::CLASS)
    };
    (@decl element $ty:ty, $xml:literal) => {
        $crate::node::hm_record!(@scalar $ty, $xml, Element, false)
    };
    (@decl unsettable $ty:ty, $xml:literal) => {
        $crate::node::hm_record!(@scalar $ty, $xml, Element, true)
    };
    (@decl attribute $ty:ty, $xml:literal) => {
        $crate::node::hm_record!(@scalar $ty, $xml, Attribute, false)
    };
    (@decl content $ty:ty, $xml:literal) => {
        $crate::node::hm_record!(@scalar $ty, $xml, Content, false)
    };
    (@scalar $ty:ty, $xml:literal, $kind:ident, $unsettable:literal) => {
        $crate::schema::FieldDecl::scalar(
            $xml,
            $crate::schema::XmlKind::$kind,
            <$ty as $crate::node::ScalarType>::DATATYPE,
            <$ty as $crate::node::ScalarType>::REQUIRED,
            $unsettable,
        )
    };

    (@ref child $field:expr) => { $crate::node::SlotRef::Child($field) };
    (@ref $kind:ident $field:expr) => { $crate::node::SlotRef::Scalar($field) };
    (@mut child $field:expr) => { $crate::node::SlotMut::Child($field) };
    (@mut $kind:ident $field:expr) => { $crate::node::SlotMut::Scalar($field) };

    (
        $(#[$meta:meta])*
        pub struct $name:ident as $class:literal ($content:ident) {
            $(
                $(#[$fmeta:meta])*
                $kind:ident $field:ident : $ty:ty = $xml:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $crate::node::Record for $name {
            const CLASS: &'static $crate::schema::ClassDecl = &$crate::schema::ClassDecl {
                name: $class,
                content: $crate::node::hm_record!(@content $content),
                fields: &[
                    $( $crate::node::hm_record!(@decl $kind $ty, $xml), )*
                ],
            };
        }

        impl $crate::node::Node for $name {
            fn class(&self) -> &'static $crate::schema::ClassDecl {
                <Self as $crate::node::Record>::CLASS
            }

            fn slot(&self, name: &str) -> Option<$crate::node::SlotRef<'_>> {
                match name {
                    $( $xml => Some($crate::node::hm_record!(@ref $kind &self.$field)), )*
                    _ => None,
                }
            }

            fn slot_mut(&mut self, name: &str) -> Option<$crate::node::SlotMut<'_>> {
                match name {
                    $( $xml => Some($crate::node::hm_record!(@mut $kind &mut self.$field)), )*
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use hm_record;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContentKind, XmlKind};
    use crate::value::Decimal;

    hm_record! {
        /// Small record exercising every field kind.
        pub struct Sample as "SampleType" (element_only) {
            element label: Option<NormalizedString> = "Label",
            unsettable count: Option<i32> = "Count",
            element ratio: Option<Decimal> = "Ratio",
            child inner: Option<Leaf> = "Inner",
            attribute done: NormalizedString = "done",
        }
    }

    hm_record! {
        pub struct Leaf as "LeafType" (simple) {
            content value: Option<f64> = ":0",
            attribute comment: Option<String> = "comment",
        }
    }

    #[test]
    fn class_table_follows_declaration_order() {
        let class = <Sample as Record>::CLASS;
        assert_eq!(class.name, "SampleType");
        assert_eq!(class.content, ContentKind::ElementOnly);
        let names: Vec<_> = class.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["Label", "Count", "Ratio", "Inner", "done"]);
        assert!(class.field("Count").unwrap().is_unsettable());
        assert!(class.field("done").unwrap().is_required());
        assert_eq!(class.field("done").unwrap().kind, XmlKind::Attribute);
        assert_eq!(
            class.field("Inner").unwrap().datatype.record().unwrap().name,
            "LeafType"
        );
        assert!(class.field("comment").is_none());
        assert!(<Leaf as Record>::CLASS.content().is_some());
    }

    #[test]
    fn scalar_slots_round_trip_lexical_values() {
        let mut sample = Sample::default();
        assert!(matches!(sample.slot("Count"), Some(SlotRef::Scalar(s)) if !s.is_set()));
        match sample.slot_mut("Count") {
            Some(SlotMut::Scalar(slot)) => slot.assign("0").unwrap(),
            _ => panic!("Count is a scalar"),
        }
        assert_eq!(sample.count, Some(0));
        match sample.slot_mut("Ratio") {
            Some(SlotMut::Scalar(slot)) => {
                assert!(slot.assign("x").is_err());
                slot.assign("1.000").unwrap();
            }
            _ => panic!("Ratio is a scalar"),
        }
        assert_eq!(sample.ratio.as_ref().unwrap().as_str(), "1.000");
        match sample.slot("done") {
            Some(SlotRef::Scalar(slot)) => assert_eq!(slot.lexical().as_deref(), Some("")),
            _ => panic!("done is a scalar"),
        }
        assert!(sample.slot("Missing").is_none());
    }

    #[test]
    fn child_slots_create_on_demand() {
        let mut sample = Sample::default();
        match sample.slot_mut("Inner") {
            Some(SlotMut::Child(slot)) => {
                assert!(slot.get_mut().is_none());
                let leaf = slot.ensure();
                assert_eq!(leaf.class().name, "LeafType");
            }
            _ => panic!("Inner is a record"),
        }
        assert_eq!(sample.inner, Some(Leaf::default()));
        match sample.slot_mut("Inner") {
            Some(SlotMut::Child(slot)) => slot.clear(),
            _ => panic!("Inner is a record"),
        }
        assert!(sample.inner.is_none());
    }
}
