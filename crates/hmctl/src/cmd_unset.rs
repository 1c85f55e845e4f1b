use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Serialize)]
struct UnsetResponse<'a> {
    path: &'a str,
    /// Whether a value or record was present before.
    was_set: bool,
}

pub fn run(
    file: PathBuf,
    path: String,
    record: bool,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut settings = common::load_settings(&file)?;
    let document = settings.document_mut();
    let was_set = if record {
        document
            .remove(&path)
            .with_context(|| format!("remove record {path}"))?
    } else {
        let was_set = document
            .is_set(&path)
            .with_context(|| format!("read field {path}"))?;
        document
            .unset(&path)
            .with_context(|| format!("unset field {path}"))?;
        was_set
    };

    let target = output.unwrap_or(file);
    common::save_settings(&settings, &target)?;
    info!(path = %path, was_set, file = %target.display(), "field cleared");

    if json {
        common::print_json(&UnsetResponse {
            path: &path,
            was_set,
        })?;
    } else if !was_set {
        println!("{path} was not set");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_recon::ReconSettings;

    #[test]
    fn unset_and_remove_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.xml");
        ReconSettings::blueprint().unwrap().save(&file).unwrap();

        run(file.clone(), "FBP/GPUDeviceNumber".into(), false, None, false).unwrap();
        run(file.clone(), "FBP/Preprocessing".into(), true, None, false).unwrap();

        let settings = ReconSettings::load(&file).unwrap();
        let fbp = settings.document().fbp().unwrap();
        assert_eq!(fbp.gpu_device_number, None);
        assert!(fbp.preprocessing.is_none());
        assert!(fbp.transform.is_some());
    }

    #[test]
    fn required_attribute_cannot_be_unset() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.xml");
        ReconSettings::blueprint().unwrap().save(&file).unwrap();

        let result = run(file, "FBP/Backprojection/Tilt@done".into(), false, None, false);
        assert!(result.is_err());
    }
}
