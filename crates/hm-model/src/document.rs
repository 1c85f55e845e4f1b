//! Parameter document: the `HMxml` tree plus the XML infrastructure around
//! it (namespace declarations and schema locations).

use std::str::FromStr;

use hm_xml::{Attribute, Name, NamespaceDecl, WriteOptions, XSI_NS};
use tracing::{debug, info};

use crate::codec;
use crate::path::{self, FieldPath};
use crate::records::{Fbp, HmXml};
use crate::ModelError;

const ROOT_ELEMENT: &str = "HMxml";

/// `xsi:schemaLocation` entry, or `xsi:noNamespaceSchemaLocation` when
/// `namespace` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    pub namespace: Option<String>,
    pub location: String,
}

/// A parsed parameter file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HmDocument {
    /// Namespace declarations found on the root element, written back as is.
    pub namespaces: Vec<NamespaceDecl>,
    pub schema_locations: Vec<SchemaLocation>,
    pub hmxml: HmXml,
}

impl HmDocument {
    /// Empty document without an `FBP` element.
    pub fn new() -> Self {
        HmDocument::default()
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, ModelError> {
        let root = hm_xml::parse(bytes)?;
        if root.name.local != ROOT_ELEMENT {
            return Err(ModelError::UnexpectedRoot(root.name.qualified()));
        }
        let mut document = HmDocument {
            namespaces: root.namespaces.clone(),
            schema_locations: schema_locations(&root.attributes),
            hmxml: HmXml::default(),
        };
        codec::decode(&mut document.hmxml, &root, &FieldPath::root())?;
        debug!(
            namespaces = document.namespaces.len(),
            has_fbp = document.hmxml.fbp.is_some(),
            "parsed parameter document"
        );
        Ok(document)
    }

    /// Serialize with the default [`WriteOptions`].
    pub fn to_xml(&self) -> Result<Vec<u8>, ModelError> {
        self.to_xml_with(&WriteOptions::default())
    }

    pub fn to_xml_with(&self, options: &WriteOptions) -> Result<Vec<u8>, ModelError> {
        let mut root = codec::encode(&self.hmxml, ROOT_ELEMENT);
        root.namespaces = self.namespaces.clone();
        if !self.schema_locations.is_empty() {
            let prefix = xsi_prefix(&mut root.namespaces);
            let mut attributes = location_attributes(&self.schema_locations, &prefix);
            attributes.append(&mut root.attributes);
            root.attributes = attributes;
        }
        let bytes = hm_xml::write(&root, options)?;
        info!(bytes = bytes.len(), "serialized parameter document");
        Ok(bytes)
    }

    pub fn to_xml_string(&self) -> Result<String, ModelError> {
        let bytes = self.to_xml()?;
        String::from_utf8(bytes).map_err(|err| ModelError::Xml(hm_xml::XmlError::Encoding(err.to_string())))
    }

    pub fn fbp(&self) -> Option<&Fbp> {
        self.hmxml.fbp.as_ref()
    }

    /// The job descriptor, created empty if the document has none.
    pub fn fbp_mut(&mut self) -> &mut Fbp {
        self.hmxml.fbp.get_or_insert_with(Fbp::default)
    }

    /// Lexical value at `path` (see [`FieldPath`] for the syntax).
    pub fn get(&self, path: &str) -> Result<Option<String>, ModelError> {
        path::get(&self.hmxml, &path.parse()?)
    }

    pub fn set(&mut self, path: &str, value: &str) -> Result<(), ModelError> {
        path::set(&mut self.hmxml, &path.parse()?, value)
    }

    pub fn unset(&mut self, path: &str) -> Result<(), ModelError> {
        path::unset(&mut self.hmxml, &path.parse()?)
    }

    pub fn is_set(&self, path: &str) -> Result<bool, ModelError> {
        path::is_set(&self.hmxml, &path.parse()?)
    }

    pub fn remove(&mut self, path: &str) -> Result<bool, ModelError> {
        path::remove(&mut self.hmxml, &path.parse()?)
    }
}

impl FromStr for HmDocument {
    type Err = ModelError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        HmDocument::parse(xml.as_bytes())
    }
}

/// Parse a parameter file.
pub fn parse(bytes: &[u8]) -> Result<HmDocument, ModelError> {
    HmDocument::parse(bytes)
}

/// Serialize a parameter document with default formatting.
pub fn serialize(document: &HmDocument) -> Result<Vec<u8>, ModelError> {
    document.to_xml()
}

/// Prefix bound to the XSI namespace, declaring `xsi` if needed.
fn xsi_prefix(namespaces: &mut Vec<NamespaceDecl>) -> String {
    let declared = namespaces
        .iter()
        .find(|decl| decl.uri == XSI_NS)
        .and_then(|decl| decl.prefix.clone());
    match declared {
        Some(prefix) => prefix,
        None => {
            namespaces.push(NamespaceDecl {
                prefix: Some("xsi".into()),
                uri: XSI_NS.into(),
            });
            "xsi".into()
        }
    }
}

fn schema_locations(attributes: &[Attribute]) -> Vec<SchemaLocation> {
    let mut locations = Vec::new();
    for attr in attributes.iter().filter(|attr| attr.name.is_xsi()) {
        match attr.name.local.as_str() {
            "schemaLocation" => {
                let tokens: Vec<&str> = attr.value.split_whitespace().collect();
                for pair in tokens.chunks(2) {
                    if let [namespace, location] = pair {
                        locations.push(SchemaLocation {
                            namespace: Some(namespace.to_string()),
                            location: location.to_string(),
                        });
                    }
                }
            }
            "noNamespaceSchemaLocation" => locations.push(SchemaLocation {
                namespace: None,
                location: attr.value.trim().to_string(),
            }),
            _ => {}
        }
    }
    locations
}

fn location_attributes(locations: &[SchemaLocation], prefix: &str) -> Vec<Attribute> {
    let pairs: Vec<String> = locations
        .iter()
        .filter_map(|loc| {
            loc.namespace
                .as_ref()
                .map(|namespace| format!("{namespace} {}", loc.location))
        })
        .collect();
    let mut attributes = Vec::new();
    if !pairs.is_empty() {
        attributes.push(Attribute {
            name: Name::prefixed(prefix, "schemaLocation", XSI_NS),
            value: pairs.join(" "),
        });
    }
    if let Some(loc) = locations.iter().find(|loc| loc.namespace.is_none()) {
        attributes.push(Attribute {
            name: Name::prefixed(prefix, "noNamespaceSchemaLocation", XSI_NS),
            value: loc.location.clone(),
        });
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::HM_NS_URI;
    use crate::value::Decimal;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<HMxml>
  <FBP>
    <BeamlineUser done="no"/>
    <Backprojection>
      <Tilt done="no"/>
      <CoordinateSystem done="no"/>
    </Backprojection>
  </FBP>
</HMxml>
"#;

    #[test]
    fn minimal_document_has_everything_optional_absent() {
        let doc: HmDocument = MINIMAL.parse().unwrap();
        let fbp = doc.fbp().unwrap();
        assert!(fbp.default_xml.is_none());
        assert!(fbp.gpu_device_number.is_none());
        assert!(fbp.log_file.is_none());
        assert!(fbp.input_data.is_none());
        assert!(fbp.flat_dark_fields.is_none());
        assert!(fbp.preprocessing.is_none());
        assert!(fbp.transform.is_none());
        assert!(fbp.output_data.is_none());
        let user = fbp.beamline_user.as_ref().unwrap();
        assert_eq!(user.done.as_str(), "no");
        assert!(user.beamline_name.is_none());
        let bp = fbp.backprojection.as_ref().unwrap();
        assert!(bp.image_centre.is_none());
        assert!(bp.tilt.as_ref().unwrap().x_tilt.is_none());
        assert!(!doc.is_set("FBP/GPUDeviceNumber").unwrap());
    }

    #[test]
    fn minimal_document_round_trips() {
        let doc: HmDocument = MINIMAL.parse().unwrap();
        let text = doc.to_xml_string().unwrap();
        assert_eq!(text, MINIMAL);
    }

    #[test]
    fn gpu_device_zero_is_written_and_unset_removes_it() {
        let mut doc: HmDocument = MINIMAL.parse().unwrap();
        doc.fbp_mut().gpu_device_number = Some(0);
        assert!(doc.is_set("FBP/GPUDeviceNumber").unwrap());
        let text = doc.to_xml_string().unwrap();
        assert!(text.contains("<GPUDeviceNumber>0</GPUDeviceNumber>"));
        assert_eq!(
            HmDocument::from_str(&text).unwrap().fbp().unwrap().gpu_device_number,
            Some(0)
        );

        doc.unset("FBP/GPUDeviceNumber").unwrap();
        assert!(!doc.is_set("FBP/GPUDeviceNumber").unwrap());
        assert!(!doc.to_xml_string().unwrap().contains("GPUDeviceNumber"));
    }

    #[test]
    fn unset_survives_read_modify_write_cycles() {
        let mut doc: HmDocument = MINIMAL.parse().unwrap();
        for round in 0..3 {
            doc.set("FBP/InputData/FileFirst", "0").unwrap();
            let mut reread = HmDocument::parse(&serialize(&doc).unwrap()).unwrap();
            assert_eq!(reread.get("FBP/InputData/FileFirst").unwrap().as_deref(), Some("0"), "round {round}");
            reread.unset("FBP/InputData/FileFirst").unwrap();
            let again = parse(&reread.to_xml().unwrap()).unwrap();
            assert!(!again.is_set("FBP/InputData/FileFirst").unwrap());
            assert!(again.fbp().unwrap().input_data.is_some());
            doc = again;
        }
    }

    #[test]
    fn blank_string_content_survives_a_save() {
        let mut doc: HmDocument = MINIMAL.parse().unwrap();
        doc.set("FBP/Backprojection/Filter/Name", "").unwrap();
        doc.set("FBP/InputData/Restrictions", " ").unwrap();
        let reread = parse(&serialize(&doc).unwrap()).unwrap();
        assert!(reread.is_set("FBP/Backprojection/Filter/Name").unwrap());
        assert_eq!(reread.get("FBP/Backprojection/Filter/Name").unwrap().as_deref(), Some(""));
        assert_eq!(reread.get("FBP/InputData/Restrictions").unwrap().as_deref(), Some(" "));
        assert_eq!(serialize(&reread).unwrap(), serialize(&doc).unwrap());
    }

    #[test]
    fn required_attribute_missing_fails_whole_parse() {
        let xml = MINIMAL.replace(r#"<CoordinateSystem done="no"/>"#, "<CoordinateSystem/>");
        let err = HmDocument::from_str(&xml).unwrap_err();
        assert!(matches!(err, ModelError::MissingAttribute { .. }));
        assert_eq!(
            err.to_string(),
            "HMxml/FBP/Backprojection/CoordinateSystem@done: required attribute is missing"
        );
    }

    #[test]
    fn decimals_round_trip_exactly() {
        let xml = r#"<HMxml><FBP><InputData><ValueMin>12.345678901234567890</ValueMin><ValueMax>-0.10</ValueMax><PixelParam>1E0</PixelParam></InputData></FBP></HMxml>"#;
        assert!(matches!(
            HmDocument::from_str(xml),
            Err(ModelError::Value { .. })
        ));
        let xml = xml.replace("1E0", "1.000000000000000000001");
        let doc = HmDocument::from_str(&xml).unwrap();
        let input = doc.fbp().unwrap().input_data.as_ref().unwrap();
        assert_eq!(input.value_max, Some("-0.10".parse::<Decimal>().unwrap()));
        let text = doc
            .to_xml_with(&WriteOptions {
                declaration: false,
                indent: None,
            })
            .unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), xml);
    }

    #[test]
    fn rejects_wrong_root_and_namespace() {
        assert!(matches!(
            HmDocument::from_str("<FBP/>"),
            Err(ModelError::UnexpectedRoot(name)) if name == "FBP"
        ));
        assert!(matches!(
            HmDocument::from_str(r#"<HMxml xmlns="urn:elsewhere"/>"#),
            Err(ModelError::Namespace { .. })
        ));
        assert!(matches!(
            HmDocument::from_str("<HMxml><FBP>"),
            Err(ModelError::Xml(_))
        ));
    }

    #[test]
    fn namespace_and_schema_location_are_kept() {
        let xml = format!(
            r#"<HMxml xmlns="{HM_NS_URI}" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="{HM_NS_URI} hm.xsd" xsi:type="ignored"><FBP><LogFile>log.xml</LogFile></FBP></HMxml>"#
        );
        let doc = HmDocument::from_str(&xml).unwrap();
        assert_eq!(doc.namespaces.len(), 2);
        assert_eq!(
            doc.schema_locations,
            vec![SchemaLocation {
                namespace: Some(HM_NS_URI.into()),
                location: "hm.xsd".into(),
            }]
        );
        let text = doc.to_xml_string().unwrap();
        assert!(text.contains(&format!(r#"xmlns="{HM_NS_URI}""#)));
        assert!(text.contains(&format!(r#"xsi:schemaLocation="{HM_NS_URI} hm.xsd""#)));
        assert!(!text.contains("xsi:type"));
        let reread = HmDocument::from_str(&text).unwrap();
        assert_eq!(reread, doc);
    }

    #[test]
    fn no_namespace_location_declares_xsi() {
        let mut doc = HmDocument::new();
        doc.schema_locations.push(SchemaLocation {
            namespace: None,
            location: "hm.xsd".into(),
        });
        doc.fbp_mut();
        let text = doc.to_xml_string().unwrap();
        assert!(text.contains(r#"<HMxml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="hm.xsd">"#));
        assert!(text.contains("<FBP/>"));
    }

    #[test]
    fn path_accessors_on_document() {
        let mut doc = HmDocument::new();
        doc.set("FBP/Backprojection/ImageCentre", "2000.125").unwrap();
        assert_eq!(
            doc.get("HMxml/FBP/Backprojection/ImageCentre").unwrap().as_deref(),
            Some("2000.125")
        );
        assert!(doc.remove("FBP/Backprojection").unwrap());
        assert_eq!(doc.get("FBP/Backprojection/ImageCentre").unwrap(), None);
        assert!(matches!(doc.get("FBP//x"), Err(ModelError::InvalidPath(_))));
    }
}
