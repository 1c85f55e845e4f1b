//! Per-job overrides applied on top of a settings file before it is handed
//! to the reconstruction.

use tracing::info;

use crate::{paths, ReconError, ReconSettings};

/// File name prefix of the sinograms read by a job.
pub const SINOGRAM_PREFIX: &str = "sino_";
/// File name prefix of the reconstructed slices.
pub const IMAGE_PREFIX: &str = "image_";
/// Flat field image inside the flat directory.
pub const FLAT_FILE_NAME: &str = "flat.tif";
/// Dark field image inside the dark directory.
pub const DARK_FILE_NAME: &str = "dark.tif";

/// Folders, calibration images and centre of rotation for one job. Fields
/// left as `None` keep whatever the settings already hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobOverrides {
    pub sinogram_folder: Option<String>,
    pub image_folder: Option<String>,
    pub flat_dir: Option<String>,
    pub dark_dir: Option<String>,
    pub centre: Option<f64>,
}

impl JobOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read sinograms from `folder`; the input prefix becomes `sino_`.
    pub fn sinogram_folder(mut self, folder: impl Into<String>) -> Self {
        self.sinogram_folder = Some(folder.into());
        self
    }

    /// Write slices to `folder`; the output prefix becomes `image_`.
    pub fn image_folder(mut self, folder: impl Into<String>) -> Self {
        self.image_folder = Some(folder.into());
        self
    }

    /// Use `<dir>/flat.tif` as flat field.
    pub fn flat_dir(mut self, dir: impl Into<String>) -> Self {
        self.flat_dir = Some(dir.into());
        self
    }

    /// Use `<dir>/dark.tif` as dark field.
    pub fn dark_dir(mut self, dir: impl Into<String>) -> Self {
        self.dark_dir = Some(dir.into());
        self
    }

    pub fn centre(mut self, centre: f64) -> Self {
        self.centre = Some(centre);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the overrides into `settings`, creating records as needed.
    pub fn apply(&self, settings: &mut ReconSettings) -> Result<(), ReconError> {
        let document = settings.document_mut();
        if let Some(folder) = &self.sinogram_folder {
            document.set(paths::INPUT_FOLDER, folder)?;
            document.set(paths::INPUT_PREFIX, SINOGRAM_PREFIX)?;
        }
        if let Some(folder) = &self.image_folder {
            document.set(paths::OUTPUT_FOLDER, folder)?;
            document.set(paths::OUTPUT_PREFIX, IMAGE_PREFIX)?;
        }
        if let Some(dir) = &self.flat_dir {
            document.set(paths::FLAT_FILE, &join(dir, FLAT_FILE_NAME))?;
        }
        if let Some(dir) = &self.dark_dir {
            document.set(paths::DARK_FILE, &join(dir, DARK_FILE_NAME))?;
        }
        if let Some(centre) = self.centre {
            settings.set_image_centre(centre)?;
        }
        info!(
            sinograms = self.sinogram_folder.as_deref(),
            images = self.image_folder.as_deref(),
            centre = self.centre,
            "applied job overrides"
        );
        Ok(())
    }
}

fn join(dir: &str, file: &str) -> String {
    format!("{}/{file}", dir.trim_end_matches('/'))
}
