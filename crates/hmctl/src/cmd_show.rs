use std::path::PathBuf;

use anyhow::Result;

use crate::common;

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let settings = common::load_settings(&file)?;
    let root = &settings.document().hmxml;
    if json {
        common::print_json(&common::node_json(root))?;
    } else {
        let mut out = String::new();
        common::render_tree(root, "HMxml", 0, &mut out);
        print!("{out}");
    }
    Ok(())
}
