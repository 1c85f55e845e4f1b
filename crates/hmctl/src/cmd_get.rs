use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::common;

#[derive(Serialize)]
struct FieldValue<'a> {
    path: &'a str,
    value: Option<String>,
}

pub fn run(file: PathBuf, path: String, json: bool) -> Result<()> {
    let settings = common::load_settings(&file)?;
    let value = settings
        .document()
        .get(&path)
        .with_context(|| format!("read field {path}"))?;

    if json {
        let payload = FieldValue { path: &path, value };
        common::print_json(&payload)?;
    } else {
        match value {
            Some(value) => println!("{value}"),
            None => println!("(unset)"),
        }
    }

    Ok(())
}
