use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Serialize)]
struct SetResponse<'a> {
    path: &'a str,
    value: Option<String>,
}

pub fn run(
    file: PathBuf,
    path: String,
    value: String,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut settings = common::load_settings(&file)?;
    settings
        .document_mut()
        .set(&path, &value)
        .with_context(|| format!("write field {path}"))?;
    let read_back = settings
        .document()
        .get(&path)
        .with_context(|| format!("read field {path}"))?;

    let target = output.unwrap_or(file);
    common::save_settings(&settings, &target)?;
    info!(path = %path, file = %target.display(), "field written");

    if json {
        let payload = SetResponse {
            path: &path,
            value: read_back,
        };
        common::print_json(&payload)?;
    } else if let Some(value) = read_back {
        println!("{value}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_recon::ReconSettings;

    #[test]
    fn set_writes_to_output_and_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("settings.xml");
        let target = dir.path().join("edited.xml");
        ReconSettings::blueprint().unwrap().save(&source).unwrap();

        run(
            source.clone(),
            "FBP/GPUDeviceNumber".into(),
            "3".into(),
            Some(target.clone()),
            false,
        )
        .unwrap();

        let edited = ReconSettings::load(&target).unwrap();
        assert_eq!(edited.document().fbp().unwrap().gpu_device_number, Some(3));
        let original = ReconSettings::load(&source).unwrap();
        assert_eq!(original.document().fbp().unwrap().gpu_device_number, Some(0));
    }

    #[test]
    fn bad_value_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("settings.xml");
        ReconSettings::blueprint().unwrap().save(&source).unwrap();
        let before = std::fs::read(&source).unwrap();

        let err = run(
            source.clone(),
            "FBP/GPUDeviceNumber".into(),
            "gpu0".into(),
            None,
            false,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("HMxml/FBP/GPUDeviceNumber"));
        assert_eq!(std::fs::read(&source).unwrap(), before);
    }
}
