use std::path::PathBuf;

use anyhow::{bail, Result};
use hm_recon::ReconSettings;
use serde::Serialize;
use tracing::{info, warn};

use crate::common;

#[derive(Serialize)]
struct Report {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(files: Vec<PathBuf>, json: bool) -> Result<()> {
    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let report = match ReconSettings::load(file) {
            Ok(_) => {
                info!(file = %file.display(), "valid");
                Report {
                    file: file.display().to_string(),
                    valid: true,
                    error: None,
                }
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "invalid");
                Report {
                    file: file.display().to_string(),
                    valid: false,
                    error: Some(err.to_string()),
                }
            }
        };
        reports.push(report);
    }

    if json {
        common::print_json(&reports)?;
    } else {
        for report in &reports {
            match &report.error {
                None => println!("{}: ok", report.file),
                Some(error) => println!("{}: {error}", report.file),
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed > 0 {
        bail!("{failed} of {} files failed validation", reports.len());
    }
    Ok(())
}
