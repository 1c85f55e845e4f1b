use std::path::Path;

use anyhow::{Context, Result};
use hm_recon::model::node::{Node, SlotRef};
use hm_recon::model::schema::{XmlKind, CONTENT};
use hm_recon::ReconSettings;
use serde::Serialize;
use serde_json::{Map, Value};

pub fn load_settings(path: &Path) -> Result<ReconSettings> {
    ReconSettings::load(path).with_context(|| format!("load settings {}", path.display()))
}

pub fn save_settings(settings: &ReconSettings, path: &Path) -> Result<()> {
    settings
        .save(path)
        .with_context(|| format!("save settings {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}

/// JSON object of the set fields of `node`. Attributes are keyed `@name`,
/// simple content `#text`.
pub fn node_json(node: &dyn Node) -> Value {
    let mut object = Map::new();
    for field in node.class().fields {
        let key = match field.kind {
            XmlKind::Attribute => format!("@{}", field.name),
            XmlKind::Content => "#text".to_string(),
            XmlKind::Element => field.name.to_string(),
        };
        match node.slot(field.name) {
            Some(SlotRef::Scalar(slot)) => {
                if let Some(value) = slot.lexical() {
                    object.insert(key, Value::String(value));
                }
            }
            Some(SlotRef::Child(slot)) => {
                if let Some(child) = slot.get() {
                    object.insert(key, node_json(child));
                }
            }
            None => {}
        }
    }
    Value::Object(object)
}

/// Indented text tree of the set fields below `node`.
pub fn render_tree(node: &dyn Node, name: &str, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push_str(name);
    for field in node.class().fields {
        if field.kind != XmlKind::Attribute {
            continue;
        }
        if let Some(SlotRef::Scalar(slot)) = node.slot(field.name) {
            if let Some(value) = slot.lexical() {
                out.push_str(&format!(" @{}={value:?}", field.name));
            }
        }
    }
    if let Some(SlotRef::Scalar(slot)) = node.slot(CONTENT) {
        if let Some(value) = slot.lexical() {
            out.push_str(&format!(" = {value:?}"));
        }
    }
    out.push('\n');

    for field in node.class().fields {
        if field.kind != XmlKind::Element {
            continue;
        }
        match node.slot(field.name) {
            Some(SlotRef::Scalar(slot)) => {
                if let Some(value) = slot.lexical() {
                    out.push_str(&format!("{indent}  {} = {value:?}\n", field.name));
                }
            }
            Some(SlotRef::Child(slot)) => {
                if let Some(child) = slot.get() {
                    render_tree(child, field.name, depth + 1, out);
                }
            }
            None => {}
        }
    }
}
