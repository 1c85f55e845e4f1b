//! Centre of rotation sweeps: the same job reconstructed around a range of
//! candidate centres so the sharpest slice can be picked by eye.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{ReconError, ReconSettings};

/// One candidate centre of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct CentreTrial {
    pub centre: f64,
    /// Centre with two decimals and no point, e.g. `128350` for `1283.5`.
    pub label: String,
}

impl CentreTrial {
    pub fn new(centre: f64) -> Self {
        Self {
            centre,
            label: centre_label(centre),
        }
    }

    /// Settings file written for this trial, `centre_<label>.xml`.
    pub fn file_name(&self) -> String {
        format!("centre_{}.xml", self.label)
    }

    /// Copy of `settings` with the image centre set to this trial.
    pub fn settings(&self, settings: &ReconSettings) -> Result<ReconSettings, ReconError> {
        let mut trial = settings.clone();
        trial.set_image_centre(self.centre)?;
        Ok(trial)
    }
}

/// Label used in file names: two decimals, decimal point removed.
pub fn centre_label(centre: f64) -> String {
    format!("{centre:.2}").replace('.', "")
}

/// `total` centres spaced by `step`, starting `total / 2` steps below
/// `centre`.
pub fn centre_sweep(centre: f64, step: f64, total: u32) -> Result<Vec<CentreTrial>, ReconError> {
    if total == 0 {
        return Err(ReconError::InvalidSweep("at least one step is required".into()));
    }
    if !centre.is_finite() || !step.is_finite() || step <= 0.0 {
        return Err(ReconError::InvalidSweep(format!(
            "centre {centre} and step {step} must be finite with a positive step"
        )));
    }
    let mut value = centre - f64::from(total / 2) * step;
    let mut trials = Vec::with_capacity(total as usize);
    for _ in 0..total {
        trials.push(CentreTrial::new(value));
        value += step;
    }
    debug!(centre, step, total, "planned centre sweep");
    Ok(trials)
}

/// Write one settings file per trial into `dir`.
pub fn write_sweep(
    settings: &ReconSettings,
    trials: &[CentreTrial],
    dir: &Path,
) -> Result<Vec<PathBuf>, ReconError> {
    fs::create_dir_all(dir).map_err(|err| ReconError::io(dir, err))?;
    let mut files = Vec::with_capacity(trials.len());
    for trial in trials {
        let path = dir.join(trial.file_name());
        trial.settings(settings)?.save(&path)?;
        files.push(path);
    }
    info!(dir = %dir.display(), trials = files.len(), "wrote centre sweep");
    Ok(files)
}
