use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use hm_recon::{centre_sweep, write_sweep};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Serialize)]
struct TrialEntry {
    centre: f64,
    label: String,
    file: String,
}

pub fn run(
    settings: PathBuf,
    out: PathBuf,
    centre: Option<f64>,
    step: f64,
    total: u32,
    json: bool,
) -> Result<()> {
    let base = common::load_settings(&settings)?;
    let centre = centre
        .or_else(|| base.image_centre())
        .ok_or_else(|| anyhow!("no --centre given and {} has no ImageCentre", settings.display()))?;

    let trials = centre_sweep(centre, step, total)?;
    let files = write_sweep(&base, &trials, &out)
        .with_context(|| format!("write centre sweep to {}", out.display()))?;
    info!(centre, step, total, out = %out.display(), "centre sweep ready");

    if json {
        let entries: Vec<TrialEntry> = trials
            .into_iter()
            .zip(&files)
            .map(|(trial, file)| TrialEntry {
                centre: trial.centre,
                label: trial.label,
                file: file.display().to_string(),
            })
            .collect();
        common::print_json(&entries)?;
    } else {
        for (trial, file) in trials.iter().zip(&files) {
            println!("{:.2} {}", trial.centre, file.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_recon::{paths, ReconSettings};

    #[test]
    fn centre_defaults_to_the_settings_image_centre() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.xml");
        ReconSettings::blueprint().unwrap().save(&settings).unwrap();
        let out = dir.path().join("sweep");

        run(settings, out.clone(), None, 0.5, 3, false).unwrap();

        for label in ["127950", "128000", "128050"] {
            assert!(out.join(format!("centre_{label}.xml")).is_file(), "{label}");
        }
        let upper = ReconSettings::load(out.join("centre_128050.xml")).unwrap();
        assert_eq!(upper.image_centre(), Some(1280.5));
    }

    #[test]
    fn explicit_centre_wins() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.xml");
        ReconSettings::blueprint().unwrap().save(&settings).unwrap();
        let out = dir.path().join("sweep");

        run(settings, out.clone(), Some(100.0), 1.0, 1, true).unwrap();
        let only = ReconSettings::load(out.join("centre_10000.xml")).unwrap();
        assert_eq!(only.image_centre(), Some(100.0));
    }

    #[test]
    fn missing_centre_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.xml");
        let mut base = ReconSettings::blueprint().unwrap();
        base.document_mut().unset(paths::IMAGE_CENTRE).unwrap();
        base.save(&settings).unwrap();

        let err = run(settings, dir.path().join("sweep"), None, 0.5, 3, false).unwrap_err();
        assert!(err.to_string().contains("has no ImageCentre"));
        assert!(!dir.path().join("sweep").exists());
    }
}
