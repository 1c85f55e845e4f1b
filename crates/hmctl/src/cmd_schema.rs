use anyhow::{anyhow, Result};
use hm_recon::model::schema::{self, ClassDecl, ContentKind, XmlKind};
use serde::Serialize;

use crate::common;

#[derive(Serialize)]
struct ClassInfo {
    name: &'static str,
    simple_content: bool,
    fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    kind: &'static str,
    datatype: &'static str,
    required: bool,
    unsettable: bool,
}

impl From<&ClassDecl> for ClassInfo {
    fn from(class: &ClassDecl) -> Self {
        ClassInfo {
            name: class.name,
            simple_content: class.content == ContentKind::Simple,
            fields: class
                .fields
                .iter()
                .map(|field| FieldInfo {
                    name: field.name,
                    kind: match field.kind {
                        XmlKind::Element => "element",
                        XmlKind::Attribute => "attribute",
                        XmlKind::Content => "content",
                    },
                    datatype: field.datatype.xsd_name(),
                    required: field.is_required(),
                    unsettable: field.is_unsettable(),
                })
                .collect(),
        }
    }
}

pub fn run(class: Option<String>, json: bool) -> Result<()> {
    let classes = match class {
        Some(name) => {
            vec![schema::class(&name).ok_or_else(|| anyhow!("no schema class named {name}"))?]
        }
        None => schema::classes(),
    };
    let infos: Vec<ClassInfo> = classes.into_iter().map(ClassInfo::from).collect();

    if json {
        return common::print_json(&infos);
    }
    for info in &infos {
        let content = if info.simple_content { " (simple)" } else { "" };
        println!("{}{content}", info.name);
        for field in &info.fields {
            let mut flags = Vec::new();
            if field.required {
                flags.push("required");
            }
            if field.unsettable {
                flags.push("unsettable");
            }
            println!(
                "  {:<24} {:<9} {:<32} {}",
                field.name,
                field.kind,
                field.datatype,
                flags.join(",")
            );
        }
    }
    Ok(())
}
