//! Settings files: a parameter document tied to the file it came from.

use std::fs;
use std::path::{Path, PathBuf};

use hm_model::{Decimal, HmDocument, WriteOptions};
use tracing::{debug, info};

use crate::{paths, ReconError};

const BLUEPRINT: &str = include_str!("../resources/settings.xml");

/// Reconstruction settings backed by an hm parameter document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconSettings {
    document: HmDocument,
    source: Option<PathBuf>,
}

impl ReconSettings {
    /// Wrap an in-memory document.
    pub fn new(document: HmDocument) -> Self {
        Self {
            document,
            source: None,
        }
    }

    /// Default settings shipped with the library.
    pub fn blueprint() -> Result<Self, ReconError> {
        let document = HmDocument::parse(BLUEPRINT.as_bytes())?;
        debug!("loaded bundled settings blueprint");
        Ok(Self::new(document))
    }

    /// Read and parse the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReconError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| ReconError::io(path, err))?;
        let document = HmDocument::parse(&bytes)?;
        info!(path = %path.display(), "loaded settings");
        Ok(Self {
            document,
            source: Some(path.to_path_buf()),
        })
    }

    /// Write the settings to `path` with default formatting.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReconError> {
        self.save_with(path, &WriteOptions::default())
    }

    pub fn save_with(&self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<(), ReconError> {
        let path = path.as_ref();
        let bytes = self.document.to_xml_with(options)?;
        fs::write(path, &bytes).map_err(|err| ReconError::io(path, err))?;
        info!(path = %path.display(), bytes = bytes.len(), "saved settings");
        Ok(())
    }

    /// File the settings were loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn document(&self) -> &HmDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut HmDocument {
        &mut self.document
    }

    pub fn into_document(self) -> HmDocument {
        self.document
    }

    /// Centre of rotation in pixels.
    pub fn image_centre(&self) -> Option<f64> {
        self.document
            .fbp()
            .and_then(|fbp| fbp.backprojection.as_ref())
            .and_then(|backprojection| backprojection.image_centre.as_ref())
            .map(Decimal::to_f64)
    }

    /// Store the centre of rotation, creating the back-projection record if
    /// needed.
    pub fn set_image_centre(&mut self, centre: f64) -> Result<(), ReconError> {
        let centre = Decimal::from_f64(centre).map_err(|source| hm_model::ModelError::Value {
            path: paths::IMAGE_CENTRE.parse().unwrap_or_default(),
            source,
        })?;
        self.document.set(paths::IMAGE_CENTRE, centre.as_str())?;
        Ok(())
    }
}

impl From<HmDocument> for ReconSettings {
    fn from(document: HmDocument) -> Self {
        Self::new(document)
    }
}
